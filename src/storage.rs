use crate::errors::StoreError;
use crate::ledger::{parse_day_first, Ledger, DATE_FORMAT};
use crate::models::DayRecord;
use std::path::Path;
use tokio::fs;
use tracing::error;

const HEADER: [&str; 3] = ["date", "count", "manual_count"];

/// Read the full store. A missing file means a fresh ledger; an unreadable or
/// malformed one is logged and also degrades to empty rather than aborting.
pub async fn load_ledger(path: &Path) -> Ledger {
    match fs::read(path).await {
        Ok(bytes) => match parse_csv(&bytes) {
            Ok(ledger) => ledger,
            Err(err) => {
                error!("failed to parse store file: {err}");
                Ledger::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ledger::new(),
        Err(err) => {
            error!("failed to read store file: {err}");
            Ledger::new()
        }
    }
}

/// Overwrite the store with the full record set, ascending by date.
pub async fn save_ledger(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    let payload = to_csv(ledger)?;
    fs::write(path, payload).await.map_err(StoreError::Write)?;
    Ok(())
}

pub fn to_csv(ledger: &Ledger) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|err| StoreError::Encode(err.to_string()))?;
    for (date, record) in ledger.records() {
        writer
            .write_record([
                date.format(DATE_FORMAT).to_string(),
                record.count.to_string(),
                record.manual_count.to_string(),
            ])
            .map_err(|err| StoreError::Encode(err.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|err| StoreError::Encode(err.to_string()))
}

fn parse_csv(bytes: &[u8]) -> Result<Ledger, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // header occupies line 1
        let line = index + 2;
        let row = row.map_err(|err| StoreError::BadRow {
            line,
            reason: err.to_string(),
        })?;

        let date_field = row.get(0).ok_or_else(|| StoreError::BadRow {
            line,
            reason: "missing date column".into(),
        })?;
        let date = parse_day_first(date_field).map_err(|err| StoreError::BadRow {
            line,
            reason: err.to_string(),
        })?;

        let count = parse_count(&row, 1, line)?;
        // older store files predate the manual column
        let manual_count = parse_count(&row, 2, line)?;

        records.push((
            date,
            DayRecord {
                count,
                manual_count,
            },
        ));
    }

    Ok(Ledger::from_records(records))
}

fn parse_count(row: &csv::StringRecord, index: usize, line: usize) -> Result<u64, StoreError> {
    let field = row.get(index).map(str::trim).unwrap_or("");
    if field.is_empty() {
        return Ok(0);
    }
    field.parse().map_err(|_| StoreError::BadRow {
        line,
        reason: format!("bad count {field:?}"),
    })
}
