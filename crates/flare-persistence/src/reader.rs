//! Reading records back from daily JSON Lines files.

use crate::error::PersistenceResult;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Daily files for `prefix`, oldest first.
fn daily_files(dir: &Path, prefix: &str) -> PersistenceResult<Vec<PathBuf>> {
    let head = format!("{prefix}_");
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&head) && n.ends_with(".jsonl"))
        })
        .collect();
    // YYYY-MM-DD sorts lexically.
    files.sort();
    Ok(files)
}

/// Load the newest `limit` records for `prefix`, returned oldest first.
///
/// A missing directory yields no records. Lines that fail to parse are
/// skipped with a warning.
pub fn read_recent<T: DeserializeOwned>(
    dir: impl AsRef<Path>,
    prefix: &str,
    limit: usize,
) -> PersistenceResult<Vec<T>> {
    let dir = dir.as_ref();
    if !dir.exists() || limit == 0 {
        return Ok(Vec::new());
    }

    let mut recent: VecDeque<T> = VecDeque::with_capacity(limit);
    let mut skipped = 0usize;

    for path in daily_files(dir, prefix)? {
        let reader = BufReader::new(File::open(&path)?);
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<T>(&line) {
                Ok(record) => {
                    if recent.len() == limit {
                        recent.pop_front();
                    }
                    recent.push_back(record);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(path = %path.display(), line = line_no + 1, error = %e, "Skipping corrupt record");
                }
            }
        }
    }

    info!(prefix, loaded = recent.len(), skipped, "Loaded persisted records");
    Ok(recent.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::JsonLinesWriter;
    use serde::{Deserialize, Serialize};
    use std::io::Write;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Entry {
        n: u32,
    }

    #[test]
    fn test_read_recent_keeps_newest_in_order() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut writer = JsonLinesWriter::new(temp_dir.path(), "trades", 100);
            for n in 0..10 {
                writer.append(Entry { n }).unwrap();
            }
        }

        let entries: Vec<Entry> = read_recent(temp_dir.path(), "trades", 3).unwrap();
        assert_eq!(entries, vec![Entry { n: 7 }, Entry { n: 8 }, Entry { n: 9 }]);
    }

    #[test]
    fn test_files_read_in_date_order() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("chat_2024-01-02.jsonl"), "{\"n\":2}\n").unwrap();
        std::fs::write(temp_dir.path().join("chat_2024-01-01.jsonl"), "{\"n\":1}\n").unwrap();
        std::fs::write(temp_dir.path().join("trades_2024-01-03.jsonl"), "{\"n\":99}\n").unwrap();

        let entries: Vec<Entry> = read_recent(temp_dir.path(), "chat", 10).unwrap();
        assert_eq!(entries, vec![Entry { n: 1 }, Entry { n: 2 }]);
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = File::create(temp_dir.path().join("chat_2024-01-01.jsonl")).unwrap();
        writeln!(file, "{{\"n\":1}}").unwrap();
        writeln!(file, "{{\"n\":").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{{\"n\":3}}").unwrap();

        let entries: Vec<Entry> = read_recent(temp_dir.path(), "chat", 10).unwrap();
        assert_eq!(entries, vec![Entry { n: 1 }, Entry { n: 3 }]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let entries: Vec<Entry> = read_recent("/nonexistent/flare-data", "chat", 10).unwrap();
        assert!(entries.is_empty());
    }
}
