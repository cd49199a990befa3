//! JSON Lines writer with daily rotation.
//!
//! Each line is a complete JSON object, so an interrupted write damages at
//! most one record. Files are opened in append mode and never truncated.

use crate::error::PersistenceResult;
use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Active writer state for a daily file.
struct ActiveWriter {
    writer: BufWriter<File>,
    date: String,
    records_written: usize,
}

/// Buffered JSON Lines writer for one record kind.
pub struct JsonLinesWriter<T: Serialize> {
    base_dir: PathBuf,
    /// File name prefix, e.g. `trades` or `chat`.
    prefix: String,
    buffer: Vec<T>,
    /// Flush once this many records are pending.
    max_buffer_size: usize,
    active_writer: Option<ActiveWriter>,
}

impl<T: Serialize> JsonLinesWriter<T> {
    pub fn new(base_dir: impl AsRef<Path>, prefix: &str, max_buffer_size: usize) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&base_dir) {
            warn!(?e, dir = %base_dir.display(), "Failed to create directory");
        }

        Self {
            base_dir,
            prefix: prefix.to_string(),
            buffer: Vec::with_capacity(max_buffer_size),
            max_buffer_size: max_buffer_size.max(1),
            active_writer: None,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Buffer a record, flushing when the buffer is full.
    pub fn append(&mut self, record: T) -> PersistenceResult<()> {
        self.buffer.push(record);

        if self.buffer.len() >= self.max_buffer_size {
            self.flush()?;
        }

        Ok(())
    }

    fn close_active_writer(&mut self) {
        if let Some(mut active) = self.active_writer.take() {
            if let Err(e) = active.writer.flush() {
                warn!(?e, "Failed to flush writer on close");
            }
            info!(
                prefix = %self.prefix,
                date = %active.date,
                records = active.records_written,
                "Closed JSON Lines writer"
            );
        }
    }

    fn open_writer(&self, date: &str) -> PersistenceResult<ActiveWriter> {
        let path = self.base_dir.join(format!("{}_{}.jsonl", self.prefix, date));
        info!(path = %path.display(), "Opening JSON Lines writer (append mode)");

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(ActiveWriter {
            writer: BufWriter::new(file),
            date: date.to_string(),
            records_written: 0,
        })
    }

    /// Write all buffered records to today's file.
    pub fn flush(&mut self) -> PersistenceResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();

        if self
            .active_writer
            .as_ref()
            .is_some_and(|w| w.date != today)
        {
            self.close_active_writer();
        }

        let mut active = match self.active_writer.take() {
            Some(active) => active,
            None => self.open_writer(&today)?,
        };

        let record_count = self.buffer.len();
        let result = write_records(&mut active.writer, &self.buffer);
        if result.is_ok() {
            active.records_written += record_count;
        }
        self.active_writer = Some(active);
        result?;

        debug!(
            prefix = %self.prefix,
            date = %today,
            records = record_count,
            "Flushed records to JSON Lines"
        );

        self.buffer.clear();
        Ok(())
    }

    /// Flush pending records and close the file.
    pub fn close(&mut self) -> PersistenceResult<()> {
        self.flush()?;
        self.close_active_writer();
        Ok(())
    }
}

fn write_records<T: Serialize>(writer: &mut BufWriter<File>, records: &[T]) -> PersistenceResult<()> {
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(())
}

impl<T: Serialize> Drop for JsonLinesWriter<T> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(?e, "Failed to flush buffer on drop");
        }
        self.close_active_writer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::{BufRead, BufReader};
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    fn note(id: u32) -> Note {
        Note {
            id,
            text: format!("note {id}"),
        }
    }

    fn read_lines(dir: &Path) -> Vec<String> {
        let entries: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(entries.len(), 1);
        let file = File::open(entries[0].path()).unwrap();
        BufReader::new(file).lines().map_while(Result::ok).collect()
    }

    #[test]
    fn test_write_and_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = JsonLinesWriter::new(temp_dir.path(), "trades", 100);

        for i in 0..5 {
            writer.append(note(i)).unwrap();
        }
        writer.close().unwrap();

        let name = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .file_name()
            .into_string()
            .unwrap();
        assert!(name.starts_with("trades_"));
        assert!(name.ends_with(".jsonl"));

        let lines = read_lines(temp_dir.path());
        assert_eq!(lines.len(), 5);
        let first: Note = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first, note(0));
    }

    #[test]
    fn test_append_mode_across_writers() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut writer = JsonLinesWriter::new(temp_dir.path(), "chat", 100);
            for i in 0..3 {
                writer.append(note(i)).unwrap();
            }
        }
        {
            let mut writer = JsonLinesWriter::new(temp_dir.path(), "chat", 100);
            for i in 3..6 {
                writer.append(note(i)).unwrap();
            }
        }

        assert_eq!(read_lines(temp_dir.path()).len(), 6);
    }

    #[test]
    fn test_auto_flush_at_capacity() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = JsonLinesWriter::new(temp_dir.path(), "trades", 2);

        writer.append(note(1)).unwrap();
        assert_eq!(writer.pending(), 1);
        writer.append(note(2)).unwrap();
        assert_eq!(writer.pending(), 0);

        assert_eq!(read_lines(temp_dir.path()).len(), 2);
    }

    #[test]
    fn test_empty_flush_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer: JsonLinesWriter<Note> = JsonLinesWriter::new(temp_dir.path(), "trades", 10);

        writer.flush().unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert!(entries.is_empty());
    }
}
