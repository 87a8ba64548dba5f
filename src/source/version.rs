//! JVM version sniffing.

use std::sync::LazyLock;

use regex::Regex;

/// `[gc,init] Version: 17.0.8+7 (release)`
static UNIFIED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Version:\s+(\S+)").expect("Invalid version regex"));

/// The JRE banner of legacy logs, e.g. `... JRE (1.8.0_151-b12), built on ...`
static BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^\)]*([0-9]\.[0-9]\.[0-9][0-9a-z_-]+)[^\(]*\)").expect("Invalid banner regex")
});

/// Version token from a unified logging message.
pub fn sniff_unified_version(message: &str) -> Option<&str> {
    UNIFIED.captures(message)?.get(1).map(|m| m.as_str())
}

/// Version token from a parenthesized banner anywhere in a line.
pub fn sniff_banner_version(line: &str) -> Option<&str> {
    BANNER.captures(line)?.get(1).map(|m| m.as_str())
}
