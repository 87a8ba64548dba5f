//! One end-to-end run: parse, window, assemble, then render or export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;
use crate::data::{GcLog, Series};
use crate::error::GcLogError;
use crate::export::export_to_file;
use crate::render::draw_chart;
use crate::source::parse_file;

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub logfile: PathBuf,
    pub settings: Settings,
    /// Write JSON here instead of drawing a PNG.
    pub export: Option<PathBuf>,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct Outcome {
    /// The log after windowing.
    pub log: GcLog,
    pub series: Series,
    /// The PNG or JSON file that was written.
    pub written: PathBuf,
}

/// Run the whole pipeline, printing progress to stdout.
///
/// Nothing is written unless the log yields at least one capacity sample.
pub fn run(options: &RunOptions) -> Result<Outcome> {
    let settings = &options.settings;
    let window = settings.tail_window()?;

    println!("Parsing GC log: '{}'", options.logfile.display());
    let log = parse_file(&options.logfile, &settings.parse_options())?;
    if log.is_empty() {
        return Err(GcLogError::EmptyDataset.into());
    }
    info!(
        young = log.young.len(),
        full = log.full.len(),
        starts = log.starts.len(),
        "parsed GC log"
    );

    let log = match window {
        Some(window) => {
            let tailed = log.tail(window);
            info!(
                window_secs = window.num_seconds(),
                kept = tailed.event_count(),
                dropped = log.event_count() - tailed.event_count(),
                "applied tail window"
            );
            tailed
        }
        None => log,
    };
    let series = Series::assemble(&log)?;

    let written = match &options.export {
        Some(path) => {
            export_to_file(&log, &series, path)
                .with_context(|| format!("Failed to export series to {}", path.display()))?;
            println!("Exported series to: {}", path.display());
            path.clone()
        }
        None => {
            let chart = settings.chart_options();
            println!(
                "Plotting graph to '{}' (heap {} GC, timezone {})",
                settings.output.display(),
                chart.heap_mode.label(),
                series.bounds.start.offset()
            );
            draw_chart(&series, &chart, &settings.output)
                .with_context(|| format!("Failed to draw chart to {}", settings.output.display()))?;
            settings.output.clone()
        }
    };

    Ok(Outcome {
        log,
        series,
        written,
    })
}
