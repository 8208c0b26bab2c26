//! teller-core: transaction row types, duplicate detection, and error taxonomy

pub mod error;
pub mod header;
pub mod row;

pub use error::{ParseError, SaveError};
pub use header::StatementHeader;
pub use row::{DedupeKey, Direction, ParsedRow, mark_duplicates};
