//! The heap chart itself.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::DrawingBackend;

use super::backend::TextSafeBackend;
use super::{ChartOptions, Theme};
use crate::data::{CollectionKind, HeapChange, HeapMode, Series, Timestamp};

/// Seconds of padding around a chart whose data sits on a single instant.
const MIN_SPAN_SECS: f64 = 60.0;

/// Headroom above the tallest value.
const Y_HEADROOM: f64 = 1.05;

/// Position on the x axis: seconds since the Unix epoch.
fn to_x(ts: &Timestamp) -> f64 {
    ts.timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`to_x`], rendered in the log's own offset.
fn format_instant(x: f64, offset: FixedOffset) -> String {
    DateTime::from_timestamp_millis((x * 1000.0).round() as i64)
        .map(|utc| utc.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// X range covering process starts and every capacity sample.
fn x_range(series: &Series) -> (f64, f64) {
    let start = to_x(&series.first_instant());
    let end = to_x(&series.bounds.end);
    if end - start < MIN_SPAN_SECS {
        let mid = (start + end) / 2.0;
        (mid - MIN_SPAN_SECS / 2.0, mid + MIN_SPAN_SECS / 2.0)
    } else {
        (start, end)
    }
}

/// Render `series` as a PNG at `path`.
pub fn draw_chart(series: &Series, options: &ChartOptions, path: &Path) -> Result<()> {
    let backend = BitMapBackend::new(path, (options.width, options.height));
    let root = TextSafeBackend::new(backend).into_drawing_area();
    draw(root, series, options.heap_mode, &Theme::default())
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    series: &Series,
    mode: HeapMode,
    theme: &Theme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let offset = *series.bounds.start.offset();
    let (x_start, x_end) = x_range(series);
    let y_max = (series.peak_mb() * Y_HEADROOM).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("GC Log (Java {})", series.version_label()), ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_start..x_end, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_labels(10)
        .x_label_formatter(&|x| format_instant(*x, offset))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_desc(format!("Time ({})", offset))
        .y_desc("Memory (MB)")
        .bold_line_style(theme.grid)
        .light_line_style(theme.background)
        .draw()?;

    let capacity_style = theme.capacity_style();
    chart
        .draw_series(
            series
                .capacity
                .iter()
                .map(|(ts, mb)| PathElement::new(vec![(to_x(ts), 0.0), (to_x(ts), *mb)], capacity_style)),
        )?
        .label("Allocated Heap")
        .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 20, y + 4)], capacity_style.color.filled()));

    match mode {
        HeapMode::Change => {
            draw_changes(&mut chart, &series.young, CollectionKind::Young, theme)?;
            draw_changes(&mut chart, &series.full, CollectionKind::Full, theme)?;
            draw_full_markers(&mut chart, &series.full, mode, theme)?;
        }
        HeapMode::After | HeapMode::Before => {
            draw_young_points(&mut chart, &series.young, mode, theme)?;
            draw_full_markers(&mut chart, &series.full, mode, theme)?;
        }
    }

    let start_style = theme.start_style();
    chart
        .draw_series(
            series
                .starts
                .iter()
                .map(|ts| PathElement::new(vec![(to_x(ts), 0.0), (to_x(ts), y_max)], start_style)),
        )?
        .label("Start")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], start_style));

    let annotation = ("sans-serif", 14).into_font().color(&theme.annotation);
    let label_y = y_max * 0.02;
    chart.draw_series([
        Text::new(
            format!("Start: {}", series.bounds.start.format("%Y-%m-%d %H:%M:%S")),
            (to_x(&series.bounds.start), label_y),
            annotation.clone(),
        ),
        Text::new(
            format!("End:   {}", series.bounds.end.format("%Y-%m-%d %H:%M:%S")),
            (to_x(&series.bounds.end), label_y),
            annotation,
        ),
    ])?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerMiddle)
        .background_style(theme.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>>;

/// One vertical before→after segment per collection.
fn draw_changes<DB>(
    chart: &mut Chart<'_, DB>,
    changes: &[HeapChange],
    kind: CollectionKind,
    theme: &Theme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = theme.collection_style(kind);
    chart
        .draw_series(changes.iter().map(|c| {
            let x = to_x(&c.timestamp);
            PathElement::new(vec![(x, c.before_mb), (x, c.after_mb)], style)
        }))?
        .label(format!("Heap {} {}", HeapMode::Change.label(), kind.label()))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    Ok(())
}

/// Young collections as a thin polyline over stems.
fn draw_young_points<DB>(
    chart: &mut Chart<'_, DB>,
    changes: &[HeapChange],
    mode: HeapMode,
    theme: &Theme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let stem_style = theme.stem_style();
    chart.draw_series(changes.iter().map(|c| {
        let x = to_x(&c.timestamp);
        PathElement::new(vec![(x, 0.0), (x, mode.value(c))], stem_style)
    }))?;

    let line_style = theme.collection_style(CollectionKind::Young);
    chart
        .draw_series(
            LineSeries::new(changes.iter().map(|c| (to_x(&c.timestamp), mode.value(c))), line_style)
                .point_size(1),
        )?
        .label(format!("Heap {} {}", mode.label(), CollectionKind::Young.label()))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    Ok(())
}

/// Full collections as triangles at the value selected by `mode`.
fn draw_full_markers<DB>(
    chart: &mut Chart<'_, DB>,
    changes: &[HeapChange],
    mode: HeapMode,
    theme: &Theme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let marker = theme.full.filled();
    let wording = match mode {
        HeapMode::Change => HeapMode::After.label(),
        _ => mode.label(),
    };
    chart
        .draw_series(
            changes
                .iter()
                .map(|c| TriangleMarker::new((to_x(&c.timestamp), mode.value(c)), 8, marker)),
        )?
        .label(format!("Heap {} {}", wording, CollectionKind::Full.label()))
        .legend(move |(x, y)| TriangleMarker::new((x + 10, y), 6, marker));
    Ok(())
}
