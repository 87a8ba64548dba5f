//! JDK 9+ unified logging grammar.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::{LineGrammar, RawCollection, RawLine};
use crate::data::{CollectionKind, LogFormat};

/// `[<timestamp>][<uptime>s][<level>][<tags>] <message>`
static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]\[(\d+\.\d+)s\]\[([^\]]+)\]\[([^\]]+)\] (.*)$")
        .expect("Invalid unified line regex")
});

/// `Pause Young (Normal) (G1 Evacuation Pause) 3784M->2661M(8192M) 48.725ms`
static COLLECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(Pause Young|Full GC)\s+(\([^)]+\)).*\s+(\d+[KMGT])->(\d+[KMGT])\((\d+[KMGT])\)\s+(\d+\.\d+)ms",
    )
    .expect("Invalid unified collection regex")
});

/// Unified logging as written by `-Xlog:gc*:file=...:time,uptime,level,tags`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedGrammar;

impl UnifiedGrammar {
    fn collection(message: &str) -> Option<RawCollection<'_>> {
        let caps = COLLECTION.captures(message)?;
        let kind = CollectionKind::from_token(caps.get(1)?.as_str())?;
        let pause_ms: f64 = caps.get(6)?.as_str().parse().ok()?;
        Some(RawCollection {
            kind,
            reason: caps.get(2)?.as_str(),
            before: caps.get(3)?.as_str(),
            after: caps.get(4)?.as_str(),
            capacity: caps.get(5)?.as_str(),
            pause: Duration::from_micros((pause_ms * 1000.0).round() as u64),
        })
    }
}

impl LineGrammar for UnifiedGrammar {
    fn format(&self) -> LogFormat {
        LogFormat::Unified
    }

    fn try_match<'a>(&self, line: &'a str) -> Option<RawLine<'a>> {
        let caps = LINE.captures(line)?;
        let message = caps.get(5)?.as_str();
        Some(RawLine {
            format: self.format(),
            timestamp: caps.get(1)?.as_str(),
            relative_seconds: caps.get(2)?.as_str(),
            collection: Self::collection(message),
            message: Some(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YOUNG: &str = "[2025-07-07T10:49:33.324+0200][825925.772s][info][gc          ] GC(34861) Pause Young (Concurrent Start) (G1 Humongous Allocation) 3784M->2661M(8192M) 48.725ms";

    #[test]
    fn test_young_pause() {
        let raw = UnifiedGrammar.try_match(YOUNG).unwrap();
        assert_eq!(raw.format, LogFormat::Unified);
        assert_eq!(raw.timestamp, "2025-07-07T10:49:33.324+0200");
        assert_eq!(raw.relative_seconds, "825925.772");

        let gc = raw.collection.unwrap();
        assert_eq!(gc.kind, CollectionKind::Young);
        assert_eq!(gc.reason, "(Concurrent Start)");
        assert_eq!(gc.before, "3784M");
        assert_eq!(gc.after, "2661M");
        assert_eq!(gc.capacity, "8192M");
        assert_eq!(gc.pause.as_micros(), 48_725);
    }

    #[test]
    fn test_full_gc() {
        let line = "[2025-07-07T11:00:00.000+0200][12.500s][info][gc] GC(7) Full GC (System.gc()) 500M->100M(1024M) 310.200ms";
        let gc = UnifiedGrammar.try_match(line).unwrap().collection.unwrap();
        assert_eq!(gc.kind, CollectionKind::Full);
        assert_eq!(gc.before, "500M");
        assert_eq!(gc.after, "100M");
    }

    #[test]
    fn test_non_collection_line_still_matches() {
        let line = "[2025-07-07T10:00:00.001+0200][0.010s][info][gc,init] Version: 17.0.8+7 (release)";
        let raw = UnifiedGrammar.try_match(line).unwrap();
        assert!(raw.collection.is_none());
        assert_eq!(raw.message, Some("Version: 17.0.8+7 (release)"));
    }

    #[test]
    fn test_unknown_pause_kind_has_no_collection() {
        let line = "[2025-07-07T10:00:00.001+0200][5.010s][info][gc] GC(3) Pause Remark 120M->118M(512M) 2.110ms";
        let raw = UnifiedGrammar.try_match(line).unwrap();
        assert!(raw.collection.is_none());
    }

    #[test]
    fn test_legacy_line_does_not_match() {
        let line = "2025-06-29T06:36:19.401+0200: 13.146: [GC (Allocation Failure) 1000K->500K(2000K), 0.0012 secs]";
        assert!(UnifiedGrammar.try_match(line).is_none());
    }
}
