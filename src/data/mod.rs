//! Data models and processing for parsed GC logs.
//!
//! ## Submodules
//!
//! - [`units`]: Byte and duration suffix resolution (e.g., "3784M", "2h")
//! - [`model`]: Normalized events ([`GcLog`], [`CollectionEvent`], [`CapacitySample`])
//! - [`window`]: Record-aligned tail-window truncation
//! - [`series`]: Chart-ready [`Series`] with display bounds
//!
//! ## Data Flow
//!
//! ```text
//! ParseSession::finish()
//!        │
//!        ▼
//!      GcLog ──▶ GcLog::tail() (optional)
//!        │
//!        ▼
//! Series::assemble()
//!        │
//!        └──▶ render / export
//! ```

pub mod model;
pub mod series;
pub mod units;
pub mod window;

pub use model::{
    CapacitySample, CollectionEvent, CollectionKind, GcLog, LogFormat, ProcessStart, Timestamp,
};
pub use series::{HeapChange, HeapMode, Series, TimeBounds, UNKNOWN_VERSION};
pub use units::{bytes_to_mb, resolve_byte_quantity, resolve_duration_quantity};
pub use window::{retain_after, Timed};
