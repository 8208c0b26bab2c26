//! Manual statement parser: free-form text pasted out of a PDF viewer.
//!
//! Expected line shapes, in priority order:
//!   01/15 CCD DEPOSIT, EBAY INC 415.91    (date + description + amount)
//!   1,204.50                              (amount completing a pending row)
//!   01/16 CHECK PAID                      (date + description, amount later)
//!   REF 00219                             (continuation of the pending row)
//!
//! Everything else is dropped without error. Processing is strictly in
//! line order with no lookahead.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use teller_core::{Direction, ParseError, ParsedRow, mark_duplicates, row::normalize_description};

// M/D, description, then a two-decimal amount ending the line.
static DATE_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<month>\d{1,2})/(?P<day>\d{1,2})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<amount>-?\d+(?:,\d+)*\.\d{2})$"
    ))
    .expect("date+amount pattern")
});

// The whole line is a two-decimal amount.
static AMOUNT_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:,\d+)*\.\d{2}$").expect("amount pattern"));

// M/D at the start with no trailing amount.
static DATE_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<month>\d{1,2})/(?P<day>\d{1,2})(?:\s+(?P<rest>.+))?$")
        .expect("date-start pattern")
});

/// A date line whose amount hasn't arrived yet. At most one is live during
/// a parse pass; a later date line replaces it outright, losing whatever
/// it had accumulated.
struct ParseBuffer {
    /// None when the M/D isn't a real calendar day; the buffer still
    /// occupies the slot but can never emit a row.
    date: Option<NaiveDate>,
    parts: Vec<String>,
}

/// Parse pasted statement text into review candidates.
///
/// `statement_year` is required because rows carry MM/DD only; statements
/// spanning a year boundary are not supported.
///
/// Rows come back in emission order with ids 1..n, all directions credit,
/// and repeats flagged via [`mark_duplicates`]. Zero rows is a failure.
pub fn parse_manual_text(raw: &str, statement_year: i32) -> Result<Vec<ParsedRow>, ParseError> {
    let mut rows: Vec<ParsedRow> = Vec::new();
    let mut pending: Option<ParseBuffer> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = DATE_AMOUNT_RE.captures(line) {
            // Self-contained row. A pending buffer with no amount is
            // abandoned, never emitted.
            pending = None;
            let date = resolve_date(statement_year, &caps["month"], &caps["day"]);
            push_row(&mut rows, date, &caps["desc"], &caps["amount"]);
            continue;
        }

        if AMOUNT_ONLY_RE.is_match(line) {
            // Completes the pending row if there is one; an amount with
            // nothing before it is an orphan.
            if let Some(buf) = pending.take() {
                let desc = buf.parts.join(" ");
                push_row(&mut rows, buf.date, &desc, line);
            }
            continue;
        }

        if let Some(caps) = DATE_START_RE.captures(line) {
            // Destructive replace: an unterminated prior buffer is lost.
            let mut parts = Vec::new();
            if let Some(rest) = caps.name("rest") {
                parts.push(rest.as_str().to_string());
            }
            pending = Some(ParseBuffer {
                date: resolve_date(statement_year, &caps["month"], &caps["day"]),
                parts,
            });
            continue;
        }

        if let Some(buf) = pending.as_mut() {
            buf.parts.push(line.to_string());
        }
        // No pending buffer: orphan line, dropped.
    }

    if rows.is_empty() {
        return Err(ParseError::NoRowsParsed);
    }

    mark_duplicates(&mut rows);
    Ok(rows)
}

/// [`parse_manual_text`] with the current calendar year, matching the
/// original behavior of stamping "today's" year on every MM/DD row.
pub fn parse_manual_text_current_year(raw: &str) -> Result<Vec<ParsedRow>, ParseError> {
    parse_manual_text(raw, Local::now().year())
}

fn resolve_date(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    let m: u32 = month.parse().ok()?;
    let d: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, m, d)
}

fn push_row(rows: &mut Vec<ParsedRow>, date: Option<NaiveDate>, desc: &str, amount_raw: &str) {
    // Skip candidates whose M/D isn't a real calendar day.
    let Some(date) = date else { return };
    rows.push(ParsedRow {
        id: rows.len() as u32 + 1,
        date,
        description: normalize_description(desc),
        amount: amount_raw.replace(',', ""),
        direction: Direction::Credit,
        duplicate: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(YEAR, m, d).unwrap()
    }

    #[test]
    fn test_single_line_row() {
        let rows = parse_manual_text("01/15 CCD DEPOSIT, EBAY INC 415.91", YEAR).unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.id, 1);
        assert_eq!(r.date, date(1, 15));
        assert_eq!(r.description, "CCD DEPOSIT, EBAY INC");
        assert_eq!(r.amount, "415.91");
        assert_eq!(r.direction, Direction::Credit);
        assert!(!r.duplicate);
    }

    #[test]
    fn test_row_split_across_lines() {
        let text = "01/16 CHECK PAID\nREF 00219\n1,204.50";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(1, 16));
        assert_eq!(rows[0].description, "CHECK PAID REF 00219");
        assert_eq!(rows[0].amount, "1204.50");
        assert!(!rows[0].duplicate);
    }

    #[test]
    fn test_repeated_rows_flagged() {
        let text = "02/01 AMAZON MKTPLACE 50.00\n02/01 AMAZON MKTPLACE 50.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, rows[1].description);
        assert_eq!(rows[0].amount, rows[1].amount);
        assert!(!rows[0].duplicate);
        assert!(rows[1].duplicate);
    }

    #[test]
    fn test_unterminated_buffer_dropped_by_next_date_line() {
        let text = "03/01 PENDING WIRE\n03/02 DIRECT DEPOSIT 200.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(3, 2));
        assert_eq!(rows[0].description, "DIRECT DEPOSIT");
        assert_eq!(rows[0].amount, "200.00");
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(parse_manual_text("", YEAR), Err(ParseError::NoRowsParsed));
        assert_eq!(parse_manual_text("\n  \n\n", YEAR), Err(ParseError::NoRowsParsed));
    }

    #[test]
    fn test_garbage_input_fails() {
        assert_eq!(
            parse_manual_text("not a statement at all", YEAR),
            Err(ParseError::NoRowsParsed)
        );
    }

    #[test]
    fn test_reparse_is_identical() {
        let text = "01/15 CCD DEPOSIT, EBAY INC 415.91\n01/16 CHECK PAID\nREF 00219\n1,204.50";
        let a = parse_manual_text(text, YEAR).unwrap();
        let b = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_amount_keeps_sign() {
        let rows = parse_manual_text("04/02 SERVICE FEE -12.00", YEAR).unwrap();
        assert_eq!(rows[0].amount, "-12.00");
    }

    #[test]
    fn test_thousands_separators_stripped() {
        let rows = parse_manual_text("04/03 WIRE IN 1,234,567.89", YEAR).unwrap();
        assert_eq!(rows[0].amount, "1234567.89");
    }

    #[test]
    fn test_orphan_lines_ignored() {
        // Header noise before the first date line must not become a row
        // or a continuation.
        let text = "TRANSACTION DETAIL\nDATE DESCRIPTION AMOUNT\n05/04 PAYROLL ACME 900.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "PAYROLL ACME");
    }

    #[test]
    fn test_amount_without_pending_buffer_ignored() {
        let text = "77.10\n05/05 REFUND 20.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, "20.00");
    }

    #[test]
    fn test_amount_needs_two_decimals() {
        // "415.9" isn't an amount, so the line opens a buffer instead and
        // never completes.
        assert_eq!(
            parse_manual_text("01/15 CCD DEPOSIT 415.9", YEAR),
            Err(ParseError::NoRowsParsed)
        );
    }

    #[test]
    fn test_invalid_calendar_day_skipped() {
        // 02/30 still classifies as a date line (it abandons the pending
        // buffer) but can never emit.
        let text = "03/01 PENDING WIRE\n02/30 GHOST ENTRY 10.00\n03/02 DEPOSIT 5.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(3, 2));
    }

    #[test]
    fn test_multi_line_description_collapses_whitespace() {
        let text = "06/07 ACH   PAYMENT\n  INV  2231\n  300.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        assert_eq!(rows[0].description, "ACH PAYMENT INV 2231");
    }

    #[test]
    fn test_ids_follow_emission_order() {
        let text = "09/02 SECOND OF MONTH 2.00\n09/01 FIRST OF MONTH 1.00";
        let rows = parse_manual_text(text, YEAR).unwrap();
        // Emission order is preserved; rows are not re-sorted by date.
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].date, date(9, 2));
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].date, date(9, 1));
    }
}
