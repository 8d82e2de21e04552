// src/services/export.rs
use anyhow::Result;
use csv::Writer;

use crate::models::Transaction;

/// Serialize transactions for download. Column order is part of the export
/// contract consumed by investors' spreadsheets; do not reorder.
pub fn transactions_csv(transactions: &[Transaction]) -> Result<String> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(["Date", "Type", "Amount", "Mode", "Transaction ID", "Status"])?;
    for t in transactions {
        wtr.write_record([
            t.date.to_string(),
            t.kind.to_string(),
            format!("{:.2}", t.amount),
            t.mode.clone(),
            t.id.to_string(),
            t.status.to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv writer: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}
