//! Tail-window truncation.
//!
//! Each series is a list of whole records, so dropping records can never
//! separate a timestamp from its value.

use chrono::TimeDelta;

use super::model::{CapacitySample, CollectionEvent, GcLog, ProcessStart, Timestamp};

/// A record positioned on the time axis.
pub trait Timed {
    fn timestamp(&self) -> Timestamp;
}

impl Timed for CollectionEvent {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Timed for CapacitySample {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Timed for ProcessStart {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Keep the records strictly newer than `cutoff`, in their original order.
pub fn retain_after<T: Timed + Clone>(records: &[T], cutoff: Timestamp) -> Vec<T> {
    records.iter().filter(|r| r.timestamp() > cutoff).cloned().collect()
}

impl GcLog {
    /// Restrict every series to the `window` before the last collection.
    ///
    /// The cutoff is anchored on the latest young or full event, not on the
    /// wall clock. A log without events, or a window reaching past the
    /// representable range, is returned unchanged.
    pub fn tail(&self, window: TimeDelta) -> GcLog {
        match self
            .last_event_time()
            .and_then(|last| last.checked_sub_signed(window))
        {
            Some(cutoff) => self.truncated_at(cutoff),
            None => self.clone(),
        }
    }

    /// Drop everything at or before `cutoff`.
    pub fn truncated_at(&self, cutoff: Timestamp) -> GcLog {
        GcLog {
            young: retain_after(&self.young, cutoff),
            full: retain_after(&self.full, cutoff),
            capacity: retain_after(&self.capacity, cutoff),
            starts: retain_after(&self.starts, cutoff),
            version: self.version.clone(),
        }
    }
}
