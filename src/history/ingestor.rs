// Reads a shell history transcript into command records
//
// zsh's extended history writes lines like ": 1700000000:0;git push".
// We turn the epoch into a readable timestamp and keep the command after
// a two-space gap, so everything downstream sees "<timestamp>  <command>".

use crate::error::{OnboardError, Result};
use crate::store::CommandRecord;
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

// ": <epoch>:<duration>;<command>"
const EXTENDED_HISTORY_PATTERN: &str = r"^: (\d+):\d+;(.*)$";

// Never contains two consecutive spaces, so the "  " split stays unambiguous
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct HistoryIngestor {
    extended_marker: Regex,
    lossy_utf8: bool,
}

impl HistoryIngestor {
    pub fn new() -> Self {
        // Compile once, reuse for every line
        let extended_marker =
            Regex::new(EXTENDED_HISTORY_PATTERN).expect("extended history pattern is valid");

        Self {
            extended_marker,
            lossy_utf8: false,
        }
    }

    /// Replace undecodable bytes instead of failing the whole ingest
    pub fn with_lossy_utf8(mut self, lossy: bool) -> Self {
        self.lossy_utf8 = lossy;
        self
    }

    /// Read a transcript from disk
    ///
    /// # Returns
    /// * `Ok(Vec<CommandRecord>)` - non-blank lines in file order
    /// * `Err(OnboardError::Ingest)` - file missing, unreadable, or not valid UTF-8
    pub fn ingest<P: AsRef<Path>>(&self, path: P) -> Result<Vec<CommandRecord>> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| OnboardError::Ingest {
            path: path.to_path_buf(),
            source,
        })?;

        let text = if self.lossy_utf8 {
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::from_utf8(bytes).map_err(|e| OnboardError::Ingest {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, e),
            })?
        };

        let records = self.ingest_str(&text);
        debug!(
            path = %path.display(),
            records = records.len(),
            "history transcript ingested"
        );

        Ok(records)
    }

    /// Same as [`ingest`](Self::ingest) for a transcript already in memory
    pub fn ingest_str(&self, text: &str) -> Vec<CommandRecord> {
        text.lines()
            .filter_map(|line| CommandRecord::from_line(&self.normalize_line(line)))
            .collect()
    }

    /// Rewrite an extended-history line as "<timestamp>  <command>".
    /// Anything else comes back unchanged.
    pub fn normalize_line(&self, line: &str) -> String {
        let Some(caps) = self.extended_marker.captures(line) else {
            return line.to_string();
        };

        let timestamp = caps[1]
            .parse::<i64>()
            .ok()
            .and_then(|epoch| DateTime::from_timestamp(epoch, 0));

        match timestamp {
            Some(ts) => format!(
                "{}  {}",
                ts.with_timezone(&Local).format(TIMESTAMP_FORMAT),
                &caps[2]
            ),
            // Epoch out of range, leave the line as-is
            None => line.to_string(),
        }
    }
}

impl Default for HistoryIngestor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn local_stamp(epoch: i64) -> String {
        DateTime::from_timestamp(epoch, 0)
            .unwrap()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    #[test]
    fn test_normalize_extended_line() {
        let ingestor = HistoryIngestor::new();

        let line = ingestor.normalize_line(": 1704103200:0;git status");
        assert_eq!(line, format!("{}  git status", local_stamp(1704103200)));
    }

    #[test]
    fn test_normalize_plain_line() {
        let ingestor = HistoryIngestor::new();

        assert_eq!(ingestor.normalize_line("npm test"), "npm test");
        // Not a marker: missing duration
        assert_eq!(ingestor.normalize_line(": 1704103200;ls"), ": 1704103200;ls");
    }

    #[test]
    fn test_normalize_out_of_range_epoch() {
        let ingestor = HistoryIngestor::new();

        let line = ": 99999999999999999999:0;ls";
        assert_eq!(ingestor.normalize_line(line), line);
    }

    #[test]
    fn test_ingest_str_skips_blank_lines() {
        let ingestor = HistoryIngestor::new();
        let text = ": 1704103200:0;git add .\n\n   \n: 1704103260:3;git commit -m wip\ncargo build\n";

        let records = ingestor.ingest_str(text);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].extracted_command, "git add .");
        assert_eq!(records[1].extracted_command, "git commit -m wip");
        assert_eq!(records[2].raw_text, "cargo build");
        assert_eq!(records[2].extracted_command, "cargo build");
    }

    #[test]
    fn test_ingest_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ": 1704103200:0;docker ps").unwrap();
        writeln!(file, "vim notes.md").unwrap();

        let records = HistoryIngestor::new().ingest(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].raw_text.ends_with("  docker ps"));
        assert_eq!(records[1].extracted_command, "vim notes.md");
    }

    #[test]
    fn test_ingest_missing_file() {
        let result = HistoryIngestor::new().ingest("/definitely/not/here/.zsh_history");

        match result {
            Err(OnboardError::Ingest { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("Expected Ingest error, got {:?}", other),
        }
    }

    #[test]
    fn test_ingest_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"git push\n\xff\xfe broken\n").unwrap();

        let strict = HistoryIngestor::new().ingest(file.path());
        match strict {
            Err(OnboardError::Ingest { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData)
            }
            other => panic!("Expected Ingest error, got {:?}", other),
        }

        let lossy = HistoryIngestor::new()
            .with_lossy_utf8(true)
            .ingest(file.path())
            .unwrap();
        assert_eq!(lossy.len(), 2);
        assert_eq!(lossy[0].extracted_command, "git push");
    }
}
