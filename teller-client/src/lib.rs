//! teller-client: ledger service boundary and the save/commit orchestration

pub mod api;
pub mod save;

pub use api::{CreateStatementRequest, HttpLedgerApi, LedgerApi, TransactionPayload};
pub use save::save;
