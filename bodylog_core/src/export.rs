//! CSV export of the measurement record.
//!
//! Flattens the aggregate into one row per measurement so the data can be
//! inspected or charted outside the tool. The export is a fresh snapshot
//! file, not an append target.

use crate::types::{BodyPart, BodyStats, Measurement};
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    series: &'static str,
    value: f64,
    date: String,
}

impl CsvRow {
    fn new(series: &'static str, entry: &Measurement) -> Self {
        CsvRow {
            series,
            value: entry.value,
            date: entry.date.to_rfc3339(),
        }
    }
}

/// Write every measurement to `path` as CSV, weight history first and then
/// each part series in display order, all in insertion order.
///
/// The file is synced to disk before returning. Returns the row count.
pub fn export_csv(stats: &BodyStats, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut count = 0;
    for entry in &stats.weight_history {
        writer.serialize(CsvRow::new("weight", entry))?;
        count += 1;
    }
    for part in BodyPart::ALL {
        for entry in stats.series(part) {
            writer.serialize(CsvRow::new(part.key(), entry))?;
            count += 1;
        }
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} measurements to {:?}", count, path);
    Ok(count)
}
