//! Reading a GC log from disk.

use std::fs;
use std::path::Path;

use super::{ParseOptions, ParseSession};
use crate::data::GcLog;
use crate::error::GcLogError;

/// Parse a GC log file in one pass.
///
/// Invalid UTF-8 is replaced rather than rejected; GC logs are sometimes
/// interleaved with application output in other encodings.
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<GcLog, GcLogError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| GcLogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&String::from_utf8_lossy(&bytes), options)
}

/// Parse GC log text already in memory.
pub fn parse_str(content: &str, options: &ParseOptions) -> Result<GcLog, GcLogError> {
    let mut session = ParseSession::new(options.clone());
    for line in content.lines() {
        session.feed(line)?;
    }
    Ok(session.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_log() -> &'static str {
        "Java HotSpot(TM) 64-Bit Server VM (25.151-b12) for linux-amd64 JRE (1.8.0_151-b12), built on Sep  5 2017 19:20:58\n\
         CommandLine flags: -XX:+PrintGCDateStamps -XX:+PrintGCDetails\n\
         2025-06-29T06:36:19.401+0200: 13.146: [Full GC (Metadata GC Threshold) [PSYoungGen: 19983K->0K(1136640K)] [ParOldGen: 176K->19827K(1398272K)] 20159K->19827K(2534912K), [Metaspace: 20747K->20747K(1069056K)], 0.0996065 secs] [Times: user=0.31 sys=0.01, real=0.10 secs]\n\
         2025-06-29T06:40:02.118+0200: 236.863: [GC (Allocation Failure) [PSYoungGen: 1092608K->34912K(1136640K)] 1112435K->54747K(2534912K), 0.0234512 secs] [Times: user=0.08 sys=0.00, real=0.02 secs]\n"
    }

    #[test]
    fn test_parse_file_reads_legacy_log() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_log()).unwrap();

        let log = parse_file(file.path(), &ParseOptions::default()).unwrap();

        assert_eq!(log.version.as_deref(), Some("1.8.0_151-b12"));
        assert_eq!(log.full.len(), 1);
        assert_eq!(log.young.len(), 1);
        assert_eq!(log.capacity.len(), 2);
        assert_eq!(log.starts.len(), 1);
    }

    #[test]
    fn test_parse_file_tolerates_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xfe garbage\n").unwrap();
        write!(file, "{}", sample_log()).unwrap();

        let log = parse_file(file.path(), &ParseOptions::default()).unwrap();
        assert_eq!(log.event_count(), 2);
    }

    #[test]
    fn test_parse_file_missing_file() {
        let err = parse_file("/nonexistent/path/gc.log", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, GcLogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/path/gc.log"));
    }
}
