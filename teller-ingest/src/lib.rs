//! teller-ingest: pasted bank-statement text parsing into reviewable rows

pub mod manual;

pub use manual::{parse_manual_text, parse_manual_text_current_year};
