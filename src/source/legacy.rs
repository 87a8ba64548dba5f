//! JDK 8 style GC log grammar.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::{LineGrammar, RawCollection, RawLine};
use crate::data::{CollectionKind, LogFormat};

/// `<timestamp>: <uptime>: [<GC|Full GC> (<reason>) ... <before>-><after>(<capacity>), ... <pause> secs]`
///
/// Generation breakdowns such as `[PSYoungGen: ...]` are skipped by the lazy
/// gaps; the first `a->b(c),` triple is the whole-heap figure.
static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\S+):\s+(\d+\.\d+):\s+\[(GC|Full GC)\s+(\([^)]+\)).*?\s+(\d+[KMGT])->(\d+[KMGT])\((\d+[KMGT])\),.*?\s+(\d+\.\d+) secs\]",
    )
    .expect("Invalid legacy line regex")
});

/// Output of `-XX:+PrintGCDetails -XX:+PrintGCDateStamps`.
///
/// Only lines carrying a collection are recognized; this grammar never
/// yields a line without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyGrammar;

impl LineGrammar for LegacyGrammar {
    fn format(&self) -> LogFormat {
        LogFormat::Legacy
    }

    fn try_match<'a>(&self, line: &'a str) -> Option<RawLine<'a>> {
        let caps = LINE.captures(line)?;
        let kind = CollectionKind::from_token(caps.get(3)?.as_str())?;
        let pause_secs: f64 = caps.get(8)?.as_str().parse().ok()?;
        Some(RawLine {
            format: self.format(),
            timestamp: caps.get(1)?.as_str(),
            relative_seconds: caps.get(2)?.as_str(),
            collection: Some(RawCollection {
                kind,
                reason: caps.get(4)?.as_str(),
                before: caps.get(5)?.as_str(),
                after: caps.get(6)?.as_str(),
                capacity: caps.get(7)?.as_str(),
                pause: Duration::from_micros((pause_secs * 1_000_000.0).round() as u64),
            }),
            message: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "2025-06-29T06:36:19.401+0200: 13.146: [Full GC (Metadata GC Threshold) [PSYoungGen: 19983K->0K(1136640K)] [ParOldGen: 176K->19827K(1398272K)] 20159K->19827K(2534912K), [Metaspace: 20747K->20747K(1069056K)], 0.0996065 secs] [Times: user=0.31 sys=0.01, real=0.10 secs]";

    const YOUNG: &str = "2025-06-29T06:40:02.118+0200: 236.863: [GC (Allocation Failure) [PSYoungGen: 1092608K->34912K(1136640K)] 1112435K->54747K(2534912K), 0.0234512 secs] [Times: user=0.08 sys=0.00, real=0.02 secs]";

    #[test]
    fn test_full_gc_uses_whole_heap_figures() {
        let raw = LegacyGrammar.try_match(FULL).unwrap();
        assert_eq!(raw.format, LogFormat::Legacy);
        assert_eq!(raw.timestamp, "2025-06-29T06:36:19.401+0200");
        assert_eq!(raw.relative_seconds, "13.146");
        assert!(raw.message.is_none());

        let gc = raw.collection.unwrap();
        assert_eq!(gc.kind, CollectionKind::Full);
        assert_eq!(gc.reason, "(Metadata GC Threshold)");
        assert_eq!(gc.before, "20159K");
        assert_eq!(gc.after, "19827K");
        assert_eq!(gc.capacity, "2534912K");
        assert_eq!(gc.pause.as_millis(), 99);
    }

    #[test]
    fn test_young_gc() {
        let gc = LegacyGrammar.try_match(YOUNG).unwrap().collection.unwrap();
        assert_eq!(gc.kind, CollectionKind::Young);
        assert_eq!(gc.reason, "(Allocation Failure)");
        assert_eq!(gc.before, "1112435K");
        assert_eq!(gc.after, "54747K");
        assert_eq!(gc.capacity, "2534912K");
    }

    #[test]
    fn test_non_event_lines_are_ignored() {
        for line in [
            "Java HotSpot(TM) 64-Bit Server VM (25.151-b12) for linux-amd64 JRE (1.8.0_151-b12)",
            "CommandLine flags: -XX:+PrintGCDetails -XX:+PrintGCDateStamps",
            "Heap",
            " PSYoungGen      total 1136640K, used 402653K",
            "",
        ] {
            assert!(LegacyGrammar.try_match(line).is_none(), "{line}");
        }
    }
}
