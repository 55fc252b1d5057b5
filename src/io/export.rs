use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;

use crate::application::{BalanceEntry, LedgerService};

/// Balance summary for a JSON export
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSnapshot {
    pub version: String,
    pub exported_at: DateTime<Local>,
    pub students: Vec<BalanceEntry>,
    pub total: f64,
}

/// Exporter for writing ledger summaries to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export per-student balances to CSV format
    pub fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let store = self.service.store();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["student_id", "name", "balance", "transactions"])?;

        let mut count = 0;
        for student in store.registered_students() {
            let transactions = store.transactions_for(student.student_id).count();
            let balance = store.balance(student.student_id);

            csv_writer.write_record(&[
                student.student_id.to_string(),
                student.name.clone(),
                balance.to_string(),
                transactions.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export per-student balances as a JSON snapshot
    pub fn export_balances_json<W: Write>(&self, mut writer: W) -> Result<BalanceSnapshot> {
        let students = self.service.show_all_students();
        let total = students.iter().fold(0.0, |total, entry| total + entry.balance);

        let snapshot = BalanceSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Local::now(),
            students,
            total,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::storage::LedgerPaths;

    fn seeded_service() -> (LedgerService, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut service = LedgerService::open(LedgerPaths::in_dir(dir.path())).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15);
        service.add_student("Alice").unwrap();
        service.add_student("Bob").unwrap();
        service.add_transaction("Bob", 50.0, date).unwrap();
        service.add_transaction("Bob", -20.0, date).unwrap();
        (service, dir)
    }

    #[test]
    fn test_export_balances_csv() {
        let (service, _dir) = seeded_service();
        let mut out = Vec::new();

        let count = Exporter::new(&service).export_balances_csv(&mut out).unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "student_id,name,balance,transactions");
        assert_eq!(lines[1], "1,Alice,0,0");
        assert_eq!(lines[2], "2,Bob,30,2");
    }

    #[test]
    fn test_export_balances_json() {
        let (service, _dir) = seeded_service();
        let mut out = Vec::new();

        let snapshot = Exporter::new(&service).export_balances_json(&mut out).unwrap();

        assert_eq!(snapshot.total, 30.0);
        assert!(snapshot.students[0].balance.is_sign_positive());
        assert!(!String::from_utf8_lossy(&out).contains("\"balance\": -"));
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["students"][1]["name"], "Bob");
        assert_eq!(json["students"][1]["balance"], 30.0);
    }
}
