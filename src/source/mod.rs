//! GC log line grammars and the parse pass that drives them.
//!
//! Two grammars are supported, tried in a fixed order for every line:
//!
//! 1. [`UnifiedGrammar`]: JDK 9+ unified logging
//!    (`[2025-07-07T10:49:33.324+0200][825925.772s][info][gc] GC(34861) Pause Young ...`)
//! 2. [`LegacyGrammar`]: JDK 8 style `-XX:+PrintGCDateStamps` output
//!    (`2025-06-29T06:36:19.401+0200: 13.146: [Full GC (Metadata GC Threshold) ...`)
//!
//! Lines matching neither are not errors; GC logs are full of headers,
//! phase details and application noise.

mod file;
mod legacy;
mod session;
mod unified;
mod version;

pub use file::{parse_file, parse_str};
pub use legacy::LegacyGrammar;
pub use session::{
    chrono_pattern, parse_timestamp, ParseOptions, ParseSession, Timeline, TimestampPolicy, DEFAULT_DATETIME_FORMAT,
};
pub use unified::UnifiedGrammar;
pub use version::{sniff_banner_version, sniff_unified_version};

use std::time::Duration;

use crate::data::{CollectionKind, LogFormat};

/// Fields pulled out of a classified line, still as text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine<'a> {
    pub format: LogFormat,
    pub timestamp: &'a str,
    pub relative_seconds: &'a str,
    pub collection: Option<RawCollection<'a>>,
    /// Free-text message part, where the grammar has one.
    pub message: Option<&'a str>,
}

/// The collection phrase of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCollection<'a> {
    pub kind: CollectionKind,
    pub reason: &'a str,
    pub before: &'a str,
    pub after: &'a str,
    pub capacity: &'a str,
    pub pause: Duration,
}

/// A line shape the parser knows how to read.
///
/// Implementations are stateless; all cross-line state lives in
/// [`ParseSession`].
pub trait LineGrammar: std::fmt::Debug {
    /// The format tag attached to records from this grammar.
    fn format(&self) -> LogFormat;

    /// Try to classify `line`. Returns `None` if the line is not of this shape.
    fn try_match<'a>(&self, line: &'a str) -> Option<RawLine<'a>>;
}

/// Grammars in priority order. The first match wins.
pub const GRAMMARS: &[&dyn LineGrammar] = &[&UnifiedGrammar, &LegacyGrammar];

/// Classify a line against [`GRAMMARS`].
pub fn classify(line: &str) -> Option<RawLine<'_>> {
    GRAMMARS.iter().find_map(|grammar| grammar.try_match(line))
}
