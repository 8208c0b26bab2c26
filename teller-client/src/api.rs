//! Ledger service API: payload shapes and the HTTP implementation.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use teller_core::Direction;

/// One transaction in the create-statement payload.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPayload {
    pub date: NaiveDate,
    pub description: String,
    pub direction: Direction,
    pub amount: f64,
}

/// Request body for `POST /api/manual-statements`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateStatementRequest {
    pub bank_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_last4: Option<String>,
    pub currency: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<f64>,
    pub transactions: Vec<TransactionPayload>,
}

#[derive(Debug, Deserialize)]
struct CreateStatementResponse {
    id: String,
}

/// The two calls the ledger service exposes to this tool.
///
/// The service is write-only from here: we never read a statement back.
#[allow(async_fn_in_trait)]
pub trait LedgerApi {
    /// Create a draft statement; returns the opaque statement id.
    async fn create_manual_statement(&self, req: &CreateStatementRequest) -> Result<String>;

    /// Promote all non-ignored rows of a draft into the ledger.
    async fn commit_rows(&self, statement_id: &str) -> Result<()>;
}

/// reqwest-backed client for the back-office REST API.
pub struct HttpLedgerApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpLedgerApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut rb = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            rb = rb.bearer_auth(token);
        }
        rb
    }
}

impl LedgerApi for HttpLedgerApi {
    async fn create_manual_statement(&self, req: &CreateStatementRequest) -> Result<String> {
        let resp = self
            .post("/api/manual-statements")
            .json(req)
            .send()
            .await
            .context("create-statement request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("create-statement error: {status} {txt}");
        }

        let out: CreateStatementResponse =
            resp.json().await.context("parse create-statement response")?;
        Ok(out.id)
    }

    async fn commit_rows(&self, statement_id: &str) -> Result<()> {
        let resp = self
            .post(&format!("/api/manual-statements/{statement_id}/commit"))
            .json(&serde_json::json!({ "commit_all_non_ignored": true }))
            .send()
            .await
            .context("commit request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("commit error: {status} {txt}");
        }
        Ok(())
    }
}
