use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use teller_client::{HttpLedgerApi, save};
use teller_core::{Direction, ParsedRow, StatementHeader};
use teller_ingest::{parse_manual_text, parse_manual_text_current_year};

#[derive(Parser, Debug)]
#[command(name = "teller", version, about = "Manual bank-statement ingestion for the back-office ledger")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse pasted statement text and preview the rows without submitting
    Parse {
        /// Text file with the pasted statement (defaults to stdin)
        file: Option<PathBuf>,

        /// Statement year for the MM/DD dates (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Parse, then save the rows as a draft statement
    Submit {
        /// Text file with the pasted statement (defaults to stdin)
        file: Option<PathBuf>,

        /// Statement year for the MM/DD dates (default: current year)
        #[arg(long)]
        year: Option<i32>,

        /// Bank display name
        #[arg(long)]
        bank: String,

        #[arg(long)]
        bank_code: Option<String>,

        /// Last 4 digits of the account number
        #[arg(long)]
        account_last4: Option<String>,

        #[arg(long, default_value = "USD")]
        currency: String,

        /// Statement period start (YYYY-MM-DD)
        #[arg(long)]
        period_start: NaiveDate,

        /// Statement period end (YYYY-MM-DD)
        #[arg(long)]
        period_end: NaiveDate,

        #[arg(long)]
        opening_balance: Option<String>,

        #[arg(long)]
        closing_balance: Option<String>,

        /// Row id to flip to debit before submitting (repeatable)
        #[arg(long = "debit")]
        debit: Vec<u32>,

        /// Promote the draft to the ledger right after saving
        #[arg(long)]
        commit: bool,

        /// Ledger service base URL
        #[arg(long, default_value = "http://localhost:8000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { file, year } => {
            let text = read_input(file.as_deref())?;
            let rows = parse_rows(&text, year)?;
            print_rows(&rows);
        }

        Command::Submit {
            file,
            year,
            bank,
            bank_code,
            account_last4,
            currency,
            period_start,
            period_end,
            opening_balance,
            closing_balance,
            debit,
            commit,
            base_url,
        } => {
            let text = read_input(file.as_deref())?;
            let mut rows = parse_rows(&text, year)?;

            for id in &debit {
                let row = rows
                    .iter_mut()
                    .find(|r| r.id == *id)
                    .with_context(|| format!("no parsed row with id {id}"))?;
                row.direction = Direction::Debit;
            }

            print_rows(&rows);

            let header = StatementHeader {
                bank_name: bank,
                bank_code,
                account_last4,
                currency,
                period_start: Some(period_start),
                period_end: Some(period_end),
                opening_balance,
                closing_balance,
            };

            let api = HttpLedgerApi::new(&base_url, std::env::var("TELLER_API_TOKEN").ok());
            let id = save(&api, &rows, &header, commit).await?;

            if commit {
                println!("\nSaved and committed statement {id}");
            } else {
                println!("\nSaved draft statement {id}");
            }
        }
    }

    Ok(())
}

fn parse_rows(text: &str, year: Option<i32>) -> Result<Vec<ParsedRow>> {
    let rows = match year {
        Some(y) => parse_manual_text(text, y),
        None => parse_manual_text_current_year(text),
    }?;
    Ok(rows)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => {
            if !p.exists() {
                bail!("file not found: {}", p.display());
            }
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading stdin")?;
            Ok(s)
        }
    }
}

fn print_rows(rows: &[ParsedRow]) {
    println!(
        "{:>3}  {:<10}  {:<44}  {:>12}  {:<6}  dup",
        "id", "date", "description", "amount", "dir"
    );
    for r in rows {
        println!(
            "{:>3}  {:<10}  {:<44}  {:>12}  {:<6}  {}",
            r.id,
            r.date.to_string(),
            truncated(&r.description, 44),
            r.amount,
            r.direction.as_str(),
            if r.duplicate { "yes" } else { "" }
        );
    }
    let dups = rows.iter().filter(|r| r.duplicate).count();
    println!("\n{} rows ({} flagged duplicate)", rows.len(), dups);
}

fn truncated(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
