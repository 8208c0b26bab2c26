//! Statement draft header metadata, entered by the reviewer alongside the
//! pasted text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header for a manual statement draft.
///
/// Balances stay as entered (strings); they become numbers at the
/// submission boundary, not earlier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementHeader {
    pub bank_name: String,
    pub bank_code: Option<String>,
    pub account_last4: Option<String>,
    pub currency: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub opening_balance: Option<String>,
    pub closing_balance: Option<String>,
}
