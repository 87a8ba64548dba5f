//! # java-gclog-graph
//!
//! Turns a Java garbage-collection log into a PNG chart of heap usage over
//! time.
//!
//! Both JDK 9+ unified logging (`-Xlog:gc`) and the older JDK 8
//! `-XX:+PrintGCDetails -XX:+PrintGCDateStamps` output are understood, and a
//! single file may mix the two.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          pipeline                            │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │ source  │───▶│   data   │───▶│ render  │───▶│   PNG    │  │
//! │  │ (parse) │    │ (window, │    │(plotters│    │          │  │
//! │  └────┬────┘    │  series) │    └─────────┘    └──────────┘  │
//! │       │         └────┬─────┘                                 │
//! │       ▲              └──────────▶ export ───▶ JSON           │
//! │  UnifiedGrammar | LegacyGrammar                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Line grammars ([`LineGrammar`] trait) and the stateful
//!   [`ParseSession`] that turns lines into a [`GcLog`]
//! - **[`data`]**: Normalized events, unit resolution, tail windowing and the
//!   chart-ready [`Series`]
//! - **[`render`]**: The PNG chart, drawn with plotters
//! - **[`export`]**: JSON dump of the same data
//! - **[`config`]**: [`Settings`] from defaults, a settings file and flags
//! - **[`pipeline`]**: One full run from log file to output file
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Last six hours, heap after each collection
//! java-gclog-graph -f /var/log/app/gc.log -o gc.png -t 6h -m after
//! ```
//!
//! ### As a library
//!
//! ```
//! use gclog_graph::{parse_str, ParseOptions, Series};
//!
//! let log = parse_str(
//!     "[2025-07-07T10:49:33.324+0200][12.772s][info][gc] GC(3) Pause Young (Normal) (G1 Evacuation Pause) 300M->200M(1024M) 9.163ms\n",
//!     &ParseOptions::default(),
//! )
//! .unwrap();
//! let series = Series::assemble(&log).unwrap();
//! assert_eq!(series.young[0].after_mb, 200.0);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod source;

pub use config::Settings;
pub use data::{
    CapacitySample, CollectionEvent, CollectionKind, GcLog, HeapMode, LogFormat, ProcessStart,
    Series,
};
pub use error::GcLogError;
pub use pipeline::{run, Outcome, RunOptions};
pub use render::{draw_chart, ChartOptions};
pub use source::{parse_file, parse_str, LineGrammar, ParseOptions, ParseSession, TimestampPolicy};
