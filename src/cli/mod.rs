use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

use crate::application::{
    AppError, LedgerService, Outcome, Status, StudentStatement, respond,
};
use crate::domain::format_amount;
use crate::domain::validation::{parse_amount, parse_optional_date, validate_student_name};
use crate::io::Exporter;
use crate::storage::LedgerPaths;

/// Student Payments - a CSV-backed student payment ledger
#[derive(Parser, Debug)]
#[command(name = "student-payments")]
#[command(about = "Track students and their payments in two CSV tables")]
#[command(version)]
pub struct Cli {
    /// Directory holding students.csv and transactions.csv
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Students table (overrides --data-dir)
    #[arg(long, global = true)]
    pub students_file: Option<PathBuf>,

    /// Transactions table (overrides --data-dir)
    #[arg(long, global = true)]
    pub transactions_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new student
    AddStudent {
        /// First name, optionally followed by a last name
        name: String,
    },

    /// Record a payment (positive) or a charge (negative) for a student
    AddTransaction {
        /// Registered student name
        name: String,

        /// Amount, e.g. "50" or "-20.5"
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Date of the transaction (MM-DD-YYYY, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show a student's transactions and balance
    ShowStudent {
        /// Registered student name
        name: String,
    },

    /// Show every student with their balance
    #[command(alias = "all-students")]
    Students,

    /// Export student balances (CSV, or JSON with --format json)
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Table locations selected by the command line.
    pub fn paths(&self) -> LedgerPaths {
        let defaults = LedgerPaths::in_dir(&self.data_dir);
        LedgerPaths::new(
            self.students_file.clone().unwrap_or(defaults.students),
            self.transactions_file
                .clone()
                .unwrap_or(defaults.transactions),
        )
    }

    /// Run the selected command. Rejected requests are reported and yield
    /// `Status::Error`; storage failures are returned as errors.
    pub fn run(self) -> Result<Status> {
        let paths = self.paths();
        let format = self.format;

        match self.command {
            Commands::AddStudent { name } => {
                let result = match validate_student_name(&name) {
                    Ok(name) => open(paths)?.add_student(&name),
                    Err(e) => Err(e.into()),
                };
                emit(format, result, |added| println!("{}", added.message()))
            }

            Commands::AddTransaction { name, amount, date } => {
                let result = validate_transaction(&name, &amount, date.as_deref())
                    .and_then(|(name, amount, date)| {
                        open(paths)?.add_transaction(&name, amount, date)
                    });
                emit(format, result, |added| println!("{}", added.message()))
            }

            Commands::ShowStudent { name } => {
                let result = match validate_student_name(&name) {
                    Ok(name) => open(paths)?.show_student(&name),
                    Err(e) => Err(e.into()),
                };
                emit(format, result, print_statement)
            }

            Commands::Students => {
                let balances = open(paths)?.show_all_students();
                match format {
                    OutputFormat::Json => print_json(&balances)?,
                    OutputFormat::Text if balances.is_empty() => println!("No students found."),
                    OutputFormat::Text => {
                        for entry in &balances {
                            println!("{}: ${}", entry.name, format_amount(entry.balance));
                        }
                    }
                }
                Ok(Status::Success)
            }

            Commands::Export { output } => {
                let service = open(paths)?;
                run_export_command(&service, format, output)?;
                Ok(Status::Success)
            }
        }
    }
}

fn open(paths: LedgerPaths) -> Result<LedgerService, AppError> {
    LedgerService::open(paths)
}

fn validate_transaction(
    name: &str,
    amount: &str,
    date: Option<&str>,
) -> Result<(String, f64, Option<chrono::NaiveDate>), AppError> {
    let name = validate_student_name(name)?;
    let amount = parse_amount(amount)?;
    let date = parse_optional_date(date)?;
    Ok((name, amount, date))
}

/// Render an operation result. Recoverable failures are shown to the user,
/// anything else aborts the command.
fn emit<T, F>(format: OutputFormat, result: Result<T, AppError>, render: F) -> Result<Status>
where
    T: Outcome + Serialize,
    F: FnOnce(&T),
{
    let result = match result {
        Err(err) if !err.is_recoverable() => {
            return Err(anyhow::Error::new(err).context("Ledger operation failed"));
        }
        other => other,
    };

    let response = respond(result);
    match format {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Text => match &response.data {
            Some(data) => render(data),
            None => eprintln!("{}", response.message),
        },
    }
    Ok(response.status)
}

fn print_statement(statement: &StudentStatement) {
    println!("{}", statement.message());
    println!();
    for t in &statement.transactions {
        println!(
            "Transaction ID: {}, Amount: {}, Date: {}",
            t.transaction_id,
            format_amount(t.amount),
            t.date.format("%m-%d-%y")
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{}", json);
    Ok(())
}

fn run_export_command(
    service: &LedgerService,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let exporter = Exporter::new(service);

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            match format {
                OutputFormat::Text => {
                    let count = exporter.export_balances_csv(file)?;
                    println!("Exported {} student(s) to {}", count, path.display());
                }
                OutputFormat::Json => {
                    let snapshot = exporter.export_balances_json(file)?;
                    println!(
                        "Exported {} student(s) to {}",
                        snapshot.students.len(),
                        path.display()
                    );
                }
            }
        }
        None => {
            let stdout = std::io::stdout();
            match format {
                OutputFormat::Text => {
                    exporter.export_balances_csv(stdout.lock())?;
                }
                OutputFormat::Json => {
                    exporter.export_balances_json(stdout.lock())?;
                    println!();
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn cli(dir: &TempDir, args: &[&str]) -> Cli {
        let data_dir = dir.path().to_str().unwrap();
        let mut argv = vec!["student-payments", "--data-dir", data_dir];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_negative_amount_and_date() {
        let parsed = Cli::try_parse_from([
            "student-payments",
            "add-transaction",
            "Bob Smith",
            "-20.5",
            "--date",
            "01-15-2024",
        ])
        .unwrap();

        match parsed.command {
            Commands::AddTransaction { name, amount, date } => {
                assert_eq!(name, "Bob Smith");
                assert_eq!(amount, "-20.5");
                assert_eq!(date.as_deref(), Some("01-15-2024"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_file_flags_override_data_dir() {
        let parsed = Cli::try_parse_from([
            "student-payments",
            "--data-dir",
            "/srv/ledger",
            "--transactions-file",
            "/tmp/tx.csv",
            "students",
        ])
        .unwrap();

        let paths = parsed.paths();
        assert_eq!(paths.students, PathBuf::from("/srv/ledger/students.csv"));
        assert_eq!(paths.transactions, PathBuf::from("/tmp/tx.csv"));
    }

    #[test]
    fn test_all_students_alias() {
        let parsed = Cli::try_parse_from(["student-payments", "all-students"]).unwrap();
        assert!(matches!(parsed.command, Commands::Students));
    }

    #[test]
    fn test_run_add_student_then_duplicate() {
        let dir = TempDir::new().unwrap();

        let status = cli(&dir, &["add-student", "Alice"]).run().unwrap();
        assert_eq!(status, Status::Success);

        let status = cli(&dir, &["add-student", "Alice"]).run().unwrap();
        assert_eq!(status, Status::Error);

        let students = fs::read_to_string(dir.path().join("students.csv")).unwrap();
        assert_eq!(students, "student_id,name\n1,Alice\n");
    }

    #[test]
    fn test_run_rejects_invalid_input_without_writing() {
        let dir = TempDir::new().unwrap();

        let status = cli(&dir, &["add-student", "Alice Mary Smith"]).run().unwrap();
        assert_eq!(status, Status::Error);

        cli(&dir, &["add-student", "Bob"]).run().unwrap();
        let status = cli(&dir, &["add-transaction", "Bob", "lots"]).run().unwrap();
        assert_eq!(status, Status::Error);
        let status = cli(&dir, &["add-transaction", "Bob", "5", "--date", "2024-01-15"])
            .run()
            .unwrap();
        assert_eq!(status, Status::Error);

        assert!(!dir.path().join("transactions.csv").exists());
    }

    #[test]
    fn test_run_export_to_file() {
        let dir = TempDir::new().unwrap();
        cli(&dir, &["add-student", "Bob"]).run().unwrap();
        cli(&dir, &["add-transaction", "Bob", "12.5", "--date", "03-01-2024"])
            .run()
            .unwrap();

        let out = dir.path().join("balances.csv");
        cli(&dir, &["export", "--output", out.to_str().unwrap()])
            .run()
            .unwrap();

        let text = fs::read_to_string(out).unwrap();
        assert_eq!(text, "student_id,name,balance,transactions\n1,Bob,12.5,1\n");
    }

    #[test]
    fn test_unreadable_ledger_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("students.csv"), "student_id,name\nx,Broken\n").unwrap();

        assert!(cli(&dir, &["students"]).run().is_err());
    }
}
