//! CSV export of the session ledger.

use csv::WriterBuilder;

use crate::{Ledger, LedgerError, ResultLedger, transactions::Row};

/// Default file name offered for the downloadable artifact.
pub const EXPORT_FILE_NAME: &str = "finance_data.csv";

/// Column header of the export, in row field order.
const HEADER: [&str; 5] = ["Amount", "Category", "Type", "Date", "Description"];

/// Serializes the full ledger to UTF-8 CSV bytes.
///
/// Header row is `Amount,Category,Type,Date,Description`, then one row per
/// record in insertion order. An empty ledger yields a header-only file.
pub fn export_csv(ledger: &Ledger) -> ResultLedger<Vec<u8>> {
    // The header is written by hand so that an empty ledger still produces it;
    // the serializer would only emit one alongside the first record.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(vec![]);
    writer.write_record(HEADER)?;
    for tx in ledger.transactions() {
        writer.serialize(Row::from(tx))?;
    }

    writer
        .into_inner()
        .map_err(|err| LedgerError::Export(err.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Money, Transaction, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_ledger_exports_header_only() {
        let ledger = Ledger::new();
        let bytes = export_csv(&ledger).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "Amount,Category,Type,Date,Description");
    }

    #[test]
    fn export_round_trips_rows() {
        let mut ledger = Ledger::new();
        ledger.add(
            Transaction::new(
                TransactionKind::Income,
                Money::new(100_00),
                "Salary".to_string(),
                date(2024, 1, 5),
                "January pay".to_string(),
            )
            .unwrap(),
        );
        ledger.add(
            Transaction::new(
                TransactionKind::Expense,
                Money::new(40_00),
                "Food".to_string(),
                date(2024, 1, 10),
                String::new(),
            )
            .unwrap(),
        );

        let bytes = export_csv(&ledger).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<Row> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), ledger.len());
        assert_eq!(rows[0].amount, "100.00");
        assert_eq!(rows[0].kind, "Income");
        assert_eq!(rows[0].date, "2024-01-05");
        assert_eq!(rows[1].category, "Food");
        assert_eq!(rows[1].description, "");
    }

    #[test]
    fn export_preserves_commas_in_free_text() {
        let mut ledger = Ledger::new();
        ledger.add(
            Transaction::new(
                TransactionKind::Expense,
                Money::new(12_50),
                "Food, drinks".to_string(),
                date(2024, 2, 1),
                "bar, with friends".to_string(),
            )
            .unwrap(),
        );

        let bytes = export_csv(&ledger).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<Row> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(rows[0].category, "Food, drinks");
        assert_eq!(rows[0].description, "bar, with friends");
    }
}
