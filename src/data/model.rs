//! Normalized GC event model.
//!
//! Everything here is produced once by a parse pass and never mutated
//! afterwards. Windowing builds new values instead.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Absolute point in time, carrying the offset found in the log.
pub type Timestamp = DateTime<FixedOffset>;

/// Which line grammar produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JDK 9+ unified logging (`-Xlog:gc`).
    Unified,
    /// Pre-unified `-XX:+PrintGCDetails -XX:+PrintGCDateStamps` output.
    Legacy,
}

/// Kind of collection pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Young,
    Full,
}

impl CollectionKind {
    /// Map a kind token from either grammar.
    ///
    /// Returns `None` for tokens neither grammar knows about.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Pause Young" | "GC" => Some(CollectionKind::Young),
            "Full GC" => Some(CollectionKind::Full),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Young => "GC",
            CollectionKind::Full => "Full GC",
        }
    }
}

/// A single garbage collection with heap occupancy around it.
///
/// `heap_before_mb >= heap_after_mb` is not checked; collector output is
/// taken as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEvent {
    pub timestamp: Timestamp,
    pub kind: CollectionKind,
    pub reason: String,
    pub heap_before_mb: f64,
    pub heap_after_mb: f64,
    pub pause: Duration,
    pub format: LogFormat,
}

/// Committed heap size reported alongside a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacitySample {
    pub timestamp: Timestamp,
    pub capacity_mb: f64,
    pub format: LogFormat,
}

/// Inferred boot instant of a JVM instance writing to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessStart {
    pub timestamp: Timestamp,
}

/// Everything extracted from one GC log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GcLog {
    pub young: Vec<CollectionEvent>,
    pub full: Vec<CollectionEvent>,
    pub capacity: Vec<CapacitySample>,
    pub starts: Vec<ProcessStart>,
    pub version: Option<String>,
}

impl GcLog {
    /// Total number of collection events of either kind.
    pub fn event_count(&self) -> usize {
        self.young.len() + self.full.len()
    }

    /// True when nothing plottable was recognized.
    ///
    /// Start markers alone do not make a chart: every capacity sample
    /// comes from a collection, so an empty capacity series means there
    /// is no heap data at all.
    pub fn is_empty(&self) -> bool {
        self.capacity.is_empty() && self.event_count() == 0
    }

    /// Timestamp of the latest collection event, if any.
    pub fn last_event_time(&self) -> Option<Timestamp> {
        self.young.iter().chain(self.full.iter()).map(|e| e.timestamp).max()
    }
}
