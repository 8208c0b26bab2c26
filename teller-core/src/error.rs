//! Error taxonomy for parsing and submission.

use thiserror::Error;

/// Failures from the manual statement parser.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No line in the pasted text matched any productive shape.
    #[error("could not find any row matching the expected format")]
    NoRowsParsed,
}

/// Failures from the save/commit orchestration.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Local validation; no network call was made.
    #[error("statement period start and end are required")]
    MissingPeriod,

    /// Local validation; every row was a duplicate or the batch was empty.
    #[error("no non-duplicate rows to save")]
    NoRowsToSave,

    /// The create-statement call was rejected; no draft exists.
    #[error("creating the statement draft failed: {0}")]
    RemoteSaveFailed(String),

    /// The commit call was rejected after the draft was created. The draft
    /// still exists server-side; follow-up is the caller's responsibility.
    #[error("committing statement {statement_id} to the ledger failed: {message}")]
    RemoteCommitFailed {
        statement_id: String,
        message: String,
    },
}
