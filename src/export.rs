//! JSON export of the assembled series.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::data::{GcLog, Series};

/// Build the export document for `series`.
///
/// `log` supplies per-event detail (reason, pause) that the chart series
/// does not carry.
pub fn to_json(log: &GcLog, series: &Series) -> serde_json::Value {
    let total_pause_ms: f64 = log
        .young
        .iter()
        .chain(log.full.iter())
        .map(|e| e.pause.as_secs_f64() * 1000.0)
        .sum();

    serde_json::json!({
        "summary": {
            "version": series.version_label(),
            "young_collections": series.young.len(),
            "full_collections": series.full.len(),
            "process_starts": series.starts.len(),
            "start": series.bounds.start,
            "end": series.bounds.end,
            "peak_mb": series.peak_mb(),
            "total_pause_ms": total_pause_ms,
        },
        "capacity": series.capacity.iter().map(|(ts, mb)| {
            serde_json::json!({ "timestamp": ts, "capacity_mb": mb })
        }).collect::<Vec<_>>(),
        "young": log.young,
        "full": log.full,
        "starts": series.starts,
    })
}

/// Write the export document to `path`.
pub fn export_to_file(log: &GcLog, series: &Series, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(log, series))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
