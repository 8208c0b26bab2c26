//! Two-step save-then-commit orchestration for a reviewed batch.

use teller_core::{ParsedRow, SaveError, StatementHeader};

use crate::api::{CreateStatementRequest, LedgerApi, TransactionPayload};

/// Submit reviewed rows as a draft statement, optionally promoting it to
/// the ledger. Duplicate-flagged rows are excluded from the payload.
///
/// Validation failures (`MissingPeriod`, `NoRowsToSave`) happen before any
/// network call. On a commit failure the draft created by the first call
/// still exists server-side; there is no compensation or retry here.
pub async fn save(
    api: &impl LedgerApi,
    rows: &[ParsedRow],
    header: &StatementHeader,
    promote_to_ledger: bool,
) -> Result<String, SaveError> {
    let (Some(period_start), Some(period_end)) = (header.period_start, header.period_end) else {
        return Err(SaveError::MissingPeriod);
    };

    let transactions: Vec<TransactionPayload> = rows
        .iter()
        .filter(|r| !r.duplicate)
        .map(|r| TransactionPayload {
            date: r.date,
            description: r.description.clone(),
            direction: r.direction,
            amount: amount_value(&r.amount),
        })
        .collect();

    if transactions.is_empty() {
        return Err(SaveError::NoRowsToSave);
    }

    let req = CreateStatementRequest {
        bank_name: header.bank_name.clone(),
        bank_code: header.bank_code.clone(),
        account_last4: header.account_last4.clone(),
        currency: header.currency.clone(),
        period_start,
        period_end,
        opening_balance: header.opening_balance.as_deref().and_then(balance_value),
        closing_balance: header.closing_balance.as_deref().and_then(balance_value),
        transactions,
    };

    let statement_id = api
        .create_manual_statement(&req)
        .await
        .map_err(|e| SaveError::RemoteSaveFailed(format!("{e:#}")))?;

    if promote_to_ledger {
        api.commit_rows(&statement_id)
            .await
            .map_err(|e| SaveError::RemoteCommitFailed {
                statement_id: statement_id.clone(),
                message: format!("{e:#}"),
            })?;
    }

    Ok(statement_id)
}

/// Row amounts arrive from the parser comma-stripped, so this only fails
/// on a hand-edited value; those fall back to 0.0.
fn amount_value(s: &str) -> f64 {
    s.replace(',', "").parse().unwrap_or(0.0)
}

/// Balances are free-text header fields; anything non-numeric is omitted
/// from the payload rather than rejected.
fn balance_value(s: &str) -> Option<f64> {
    s.replace(',', "").trim().parse().ok()
}
