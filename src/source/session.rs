//! The single parse pass: classified lines in, [`GcLog`] out.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use tracing::{debug, trace, warn};

use super::{classify, sniff_banner_version, sniff_unified_version, RawCollection, RawLine};
use crate::data::{
    bytes_to_mb, resolve_byte_quantity, CapacitySample, CollectionEvent, CollectionKind, GcLog,
    LogFormat, ProcessStart, Timestamp,
};
use crate::error::GcLogError;

/// ISO 8601 with fractional seconds and a numeric UTC offset, as written by
/// both `-XX:+PrintGCDateStamps` and unified logging's `time` decorator.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// What to do with a recognized line whose timestamp does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Abort the whole parse.
    #[default]
    Strict,
    /// Drop the line with a warning and keep going.
    Skip,
}

/// Options for a parse pass.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// chrono `strftime` pattern for the timestamp field.
    pub datetime_format: String,
    pub timestamp_policy: TimestampPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            timestamp_policy: TimestampPolicy::Strict,
        }
    }
}

/// Parse a timestamp with `format`.
///
/// Patterns without an offset are accepted too; the result is then taken
/// to be UTC.
pub fn parse_timestamp(text: &str, format: &str) -> Result<Timestamp, chrono::ParseError> {
    match DateTime::parse_from_str(text, format) {
        Ok(ts) => Ok(ts),
        Err(err) => match NaiveDateTime::parse_from_str(text, format) {
            Ok(naive) => Ok(naive.and_utc().fixed_offset()),
            Err(_) => Err(err),
        },
    }
}

/// Detects JVM restarts from the uptime column.
///
/// Uptime only grows within one process. The first value seen, and any
/// value below its predecessor, marks a new process.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    previous: Option<f64>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an uptime value. Returns true if it starts a new process.
    pub fn observe(&mut self, relative_seconds: f64) -> bool {
        let restarted = self.previous.map_or(true, |prev| relative_seconds < prev);
        self.previous = Some(relative_seconds);
        restarted
    }
}

/// Boot instant of the process that wrote a line at `timestamp` with
/// `relative_seconds` of uptime. `None` if it falls outside chrono's range.
fn boot_instant(timestamp: Timestamp, relative_seconds: f64) -> Option<Timestamp> {
    let uptime = TimeDelta::microseconds((relative_seconds * 1_000_000.0).round() as i64);
    timestamp.checked_sub_signed(uptime)
}

/// Accept the Python-style `.%f` fraction, which chrono spells `%.f`.
///
/// chrono's bare `%f` reads the digits as nanoseconds, so `.324` would
/// silently become 324ns.
pub fn chrono_pattern(format: &str) -> Cow<'_, str> {
    if format.contains(".%f") {
        Cow::Owned(format.replace(".%f", "%.f"))
    } else {
        Cow::Borrowed(format)
    }
}

/// State carried across the lines of one log.
///
/// Feed lines in file order with [`ParseSession::feed`], then call
/// [`ParseSession::finish`].
#[derive(Debug)]
pub struct ParseSession {
    options: ParseOptions,
    timeline: Timeline,
    line_number: usize,
    skipped: usize,
    log: GcLog,
}

impl ParseSession {
    pub fn new(mut options: ParseOptions) -> Self {
        options.datetime_format = chrono_pattern(&options.datetime_format).into_owned();
        Self {
            options,
            timeline: Timeline::new(),
            line_number: 0,
            skipped: 0,
            log: GcLog::default(),
        }
    }

    /// Process the next line of the log.
    pub fn feed(&mut self, line: &str) -> Result<(), GcLogError> {
        self.line_number += 1;

        let Some(raw) = classify(line) else {
            trace!(line = self.line_number, "no grammar matched");
            if self.log.version.is_none() {
                self.capture_version(sniff_banner_version(line));
            }
            return Ok(());
        };

        let timestamp = match parse_timestamp(raw.timestamp, &self.options.datetime_format) {
            Ok(ts) => ts,
            Err(source) => {
                let err = GcLogError::TimestampParse {
                    line: self.line_number,
                    text: raw.timestamp.to_string(),
                    format: self.options.datetime_format.clone(),
                    source,
                };
                return match self.options.timestamp_policy {
                    TimestampPolicy::Strict => Err(err),
                    TimestampPolicy::Skip => {
                        warn!("Skipping line: {}", err);
                        self.skipped += 1;
                        Ok(())
                    }
                };
            }
        };

        self.record(&raw, timestamp)
    }

    fn record(&mut self, raw: &RawLine<'_>, timestamp: Timestamp) -> Result<(), GcLogError> {
        // Both grammars only accept `\d+\.\d+` here.
        let relative: f64 = raw.relative_seconds.parse().unwrap_or_default();
        if self.timeline.observe(relative) {
            match boot_instant(timestamp, relative) {
                Some(boot) => {
                    debug!(line = self.line_number, %boot, "process start");
                    self.log.starts.push(ProcessStart { timestamp: boot });
                }
                None => warn!(
                    line = self.line_number,
                    uptime = raw.relative_seconds,
                    "uptime out of range, no process start marker"
                ),
            }
        }

        if let Some(gc) = &raw.collection {
            self.record_collection(gc, timestamp, raw.format)?;
        }

        if self.log.version.is_none() {
            self.capture_version(raw.message.and_then(sniff_unified_version));
        }
        Ok(())
    }

    fn record_collection(
        &mut self,
        gc: &RawCollection<'_>,
        timestamp: Timestamp,
        format: LogFormat,
    ) -> Result<(), GcLogError> {
        let event = CollectionEvent {
            timestamp,
            kind: gc.kind,
            reason: gc.reason.to_string(),
            heap_before_mb: bytes_to_mb(resolve_byte_quantity(gc.before)?),
            heap_after_mb: bytes_to_mb(resolve_byte_quantity(gc.after)?),
            pause: gc.pause,
            format,
        };
        let sample = CapacitySample {
            timestamp,
            capacity_mb: bytes_to_mb(resolve_byte_quantity(gc.capacity)?),
            format,
        };

        match event.kind {
            CollectionKind::Young => self.log.young.push(event),
            CollectionKind::Full => self.log.full.push(event),
        }
        self.log.capacity.push(sample);
        Ok(())
    }

    fn capture_version(&mut self, version: Option<&str>) {
        if let Some(version) = version {
            debug!(line = self.line_number, version, "JVM version");
            self.log.version = Some(version.to_string());
        }
    }

    /// Lines dropped under [`TimestampPolicy::Skip`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> GcLog {
        debug!(
            lines = self.line_number,
            young = self.log.young.len(),
            full = self.log.full.len(),
            starts = self.log.starts.len(),
            skipped = self.skipped,
            "parse finished"
        );
        self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unified(ts: &str, uptime: &str, message: &str) -> String {
        format!("[{ts}][{uptime}s][info][gc] {message}")
    }

    fn session() -> ParseSession {
        ParseSession::new(ParseOptions::default())
    }

    #[test]
    fn test_unified_event_round_trip() {
        let mut session = session();
        session
            .feed(&unified(
                "2025-07-07T10:49:33.324+0200",
                "120.500",
                "GC(1) Pause Young (Normal) (G1 Evacuation Pause) 100M->50M(200M) 3.250ms",
            ))
            .unwrap();
        let log = session.finish();

        assert_eq!(log.young.len(), 1);
        assert!(log.full.is_empty());
        assert_eq!(log.young[0].heap_before_mb, 100.0);
        assert_eq!(log.young[0].heap_after_mb, 50.0);
        assert_eq!(log.young[0].reason, "(Normal)");
        assert_eq!(log.young[0].format, LogFormat::Unified);
        assert_eq!(log.capacity.len(), 1);
        assert_eq!(log.capacity[0].capacity_mb, 200.0);
        assert_eq!(log.capacity[0].timestamp, log.young[0].timestamp);
    }

    #[test]
    fn test_timeline_restart_detection() {
        let mut timeline = Timeline::new();
        let starts: Vec<bool> = [1.0, 2.0, 0.5, 1.5].iter().map(|rt| timeline.observe(*rt)).collect();
        assert_eq!(starts, vec![true, false, true, false]);
    }

    #[test]
    fn test_restart_markers_from_lines() {
        let mut session = session();
        for (ts, uptime) in [
            ("2025-07-07T10:00:01.000+0000", "1.000"),
            ("2025-07-07T10:00:02.000+0000", "2.000"),
            ("2025-07-07T10:05:00.500+0000", "0.500"),
            ("2025-07-07T10:05:01.500+0000", "1.500"),
        ] {
            session
                .feed(&unified(ts, uptime, "GC(0) Pause Young (Normal) (G1 Evacuation Pause) 10M->5M(64M) 1.000ms"))
                .unwrap();
        }
        let log = session.finish();

        assert_eq!(log.starts.len(), 2);
        assert_eq!(log.starts[0].timestamp, parse_timestamp("2025-07-07T10:00:00.000+0000", DEFAULT_DATETIME_FORMAT).unwrap());
        assert_eq!(log.starts[1].timestamp, parse_timestamp("2025-07-07T10:05:00.000+0000", DEFAULT_DATETIME_FORMAT).unwrap());
    }

    #[test]
    fn test_cursor_shared_across_grammars() {
        let mut session = session();
        session
            .feed(&unified("2025-07-07T10:00:10.000+0000", "10.000", "Using G1"))
            .unwrap();
        session
            .feed("2025-07-07T10:00:20.000+0000: 20.000: [GC (Allocation Failure)  1000K->500K(2000K), 0.0010000 secs]")
            .unwrap();
        assert_eq!(session.finish().starts.len(), 1);
    }

    #[test]
    fn test_first_version_wins() {
        let mut session = session();
        session
            .feed(&unified("2025-07-07T10:00:00.010+0000", "0.010", "Version: 17.0.8+7 (release)"))
            .unwrap();
        session
            .feed(&unified("2025-07-07T10:00:00.020+0000", "0.020", "Version: 21.0.1+12 (release)"))
            .unwrap();
        session
            .feed("OpenJDK 64-Bit Server VM (25.292-b10) for linux-amd64 JRE (1.8.0_292-b10)")
            .unwrap();
        assert_eq!(session.finish().version.as_deref(), Some("17.0.8+7"));
    }

    #[test]
    fn test_banner_version_from_unmatched_line() {
        let mut session = session();
        session
            .feed("Java HotSpot(TM) 64-Bit Server VM (25.151-b12) for linux-amd64 JRE (1.8.0_151-b12), built on Sep  5 2017")
            .unwrap();
        assert_eq!(session.finish().version.as_deref(), Some("1.8.0_151-b12"));
    }

    #[test]
    fn test_bad_timestamp_is_fatal_by_default() {
        let mut session = session();
        let err = session
            .feed("yesterday: 13.146: [GC (Allocation Failure)  1000K->500K(2000K), 0.0010000 secs]")
            .unwrap_err();
        assert!(matches!(err, GcLogError::TimestampParse { line: 1, .. }));
    }

    #[test]
    fn test_bad_timestamp_skipped_when_lenient() {
        let mut session = ParseSession::new(ParseOptions {
            timestamp_policy: TimestampPolicy::Skip,
            ..Default::default()
        });
        session
            .feed("yesterday: 13.146: [GC (Allocation Failure)  1000K->500K(2000K), 0.0010000 secs]")
            .unwrap();
        session
            .feed("2025-06-29T06:40:02.118+0200: 14.000: [GC (Allocation Failure)  1000K->500K(2000K), 0.0010000 secs]")
            .unwrap();
        assert_eq!(session.skipped(), 1);

        let log = session.finish();
        assert_eq!(log.young.len(), 1);
        assert_eq!(log.starts.len(), 1);
    }

    #[test]
    fn test_format_without_offset_is_utc() {
        let ts = parse_timestamp("2025-06-29 06:40:02", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.to_rfc3339(), "2025-06-29T06:40:02+00:00");
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let mut session = session();
        for line in ["", "Heap", "some application noise", "{Heap before GC invocations=1 (full 0):"] {
            session.feed(line).unwrap();
        }
        assert!(session.finish().is_empty());
    }

    #[test]
    fn test_huge_uptime_skips_start_marker() {
        let mut session = session();
        session
            .feed("2025-06-29T06:00:00.000+0200: 9000000000000.000: [GC (Allocation Failure) 600M->100M(1024M), 0.0100000 secs]")
            .unwrap();
        let log = session.finish();

        assert!(log.starts.is_empty());
        assert_eq!(log.young.len(), 1);
        assert_eq!(log.capacity.len(), 1);
    }

    #[test]
    fn test_python_style_fraction_is_translated() {
        assert_eq!(chrono_pattern("%Y-%m-%dT%H:%M:%S.%f%z"), DEFAULT_DATETIME_FORMAT);
        assert_eq!(chrono_pattern(DEFAULT_DATETIME_FORMAT), DEFAULT_DATETIME_FORMAT);

        let mut session = ParseSession::new(ParseOptions {
            datetime_format: "%Y-%m-%dT%H:%M:%S.%f%z".to_string(),
            ..Default::default()
        });
        session
            .feed("2025-06-29T06:40:02.118+0200: 14.000: [GC (Allocation Failure)  1000K->500K(2000K), 0.0010000 secs]")
            .unwrap();
        let log = session.finish();
        assert_eq!(log.young[0].timestamp.timestamp_subsec_millis(), 118);
    }
}
