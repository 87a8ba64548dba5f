//! Chart-ready series assembled from a parsed (and possibly windowed) log.

use serde::{Deserialize, Serialize};

use super::model::{CollectionEvent, GcLog, Timestamp};
use crate::error::GcLogError;

/// Label used when the log never announced a JVM version.
pub const UNKNOWN_VERSION: &str = "unknown version";

/// How heap occupancy around a collection is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeapMode {
    /// A segment from the heap before to the heap after each collection.
    #[default]
    Change,
    /// The heap remaining after each collection.
    After,
    /// The heap occupied right before each collection.
    Before,
}

impl HeapMode {
    /// Wording used in progress output and legends.
    pub fn label(&self) -> &'static str {
        match self {
            HeapMode::Change => "change by",
            HeapMode::After => "after",
            HeapMode::Before => "before",
        }
    }

    /// The single value plotted for point modes.
    ///
    /// `Change` plots both ends, so it reports the after value here.
    pub fn value(&self, change: &HeapChange) -> f64 {
        match self {
            HeapMode::Before => change.before_mb,
            HeapMode::Change | HeapMode::After => change.after_mb,
        }
    }
}

/// Heap occupancy around one collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeapChange {
    pub timestamp: Timestamp,
    pub before_mb: f64,
    pub after_mb: f64,
}

impl From<&CollectionEvent> for HeapChange {
    fn from(event: &CollectionEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            before_mb: event.heap_before_mb,
            after_mb: event.heap_after_mb,
        }
    }
}

/// First and last capacity sample, used for the x range and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeBounds {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Everything the renderer needs, in time order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub capacity: Vec<(Timestamp, f64)>,
    pub young: Vec<HeapChange>,
    pub full: Vec<HeapChange>,
    pub starts: Vec<Timestamp>,
    pub bounds: TimeBounds,
    pub version: Option<String>,
}

impl Series {
    /// Build the series from a parsed log.
    ///
    /// Fails with [`GcLogError::EmptyDataset`] when there are no capacity
    /// samples to derive display bounds from.
    pub fn assemble(log: &GcLog) -> Result<Self, GcLogError> {
        let mut capacity: Vec<(Timestamp, f64)> =
            log.capacity.iter().map(|s| (s.timestamp, s.capacity_mb)).collect();
        capacity.sort_by_key(|(ts, _)| *ts);

        let (Some(&(start, _)), Some(&(end, _))) = (capacity.first(), capacity.last()) else {
            return Err(GcLogError::EmptyDataset);
        };

        let mut young: Vec<HeapChange> = log.young.iter().map(HeapChange::from).collect();
        young.sort_by_key(|c| c.timestamp);

        let mut full: Vec<HeapChange> = log.full.iter().map(HeapChange::from).collect();
        full.sort_by_key(|c| c.timestamp);

        let mut starts: Vec<Timestamp> = log.starts.iter().map(|s| s.timestamp).collect();
        starts.sort();

        Ok(Self {
            capacity,
            young,
            full,
            starts,
            bounds: TimeBounds { start, end },
            version: log.version.clone(),
        })
    }

    /// Version for titles, falling back to [`UNKNOWN_VERSION`].
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }

    /// Largest heap figure in any series, for the y range.
    pub fn peak_mb(&self) -> f64 {
        let capacity = self.capacity.iter().map(|(_, mb)| *mb);
        let changes = self
            .young
            .iter()
            .chain(self.full.iter())
            .flat_map(|c| [c.before_mb, c.after_mb]);
        capacity.chain(changes).fold(0.0, f64::max)
    }

    /// Earliest instant any series reaches, including process starts.
    pub fn first_instant(&self) -> Timestamp {
        self.starts
            .first()
            .map_or(self.bounds.start, |s| (*s).min(self.bounds.start))
    }
}
