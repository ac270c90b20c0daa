//! Line-oriented sources and sinks used to persist trees and run batch queries.
//!
//! Stores are plain values passed to each call; a [`FileStore`] only holds its path and opens the
//! file for the duration of a single read or write.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::{KdTreeError, Result};

const FIELD_DELIMITER: u8 = b',';
const FIELD_SEPARATOR: &str = ",";

/// Supplies lines of text.
pub trait LineSource {
    /// A short description of where the lines come from, used in errors.
    fn name(&self) -> String;

    /// Read every line, in order, without line terminators.
    ///
    /// A source that cannot be read, or that holds no lines, is a
    /// [`KdTreeError::SourceUnavailable`].
    fn read_lines(&self) -> Result<Vec<String>>;
}

/// Accepts lines of text.
pub trait LineSink {
    /// Replace the sink's contents with `lines`, one per line.
    fn write_lines(&mut self, lines: &[String]) -> Result<()>;
}

/// A newline-delimited text file.
///
/// Lines are read and written as comma-separated records of any width. Fields are never quoted,
/// so each line comes back exactly as it was written. Empty lines are skipped and `\r\n` line
/// endings are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the file at `path`. The file is not opened until it is read or written.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileStore {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let unavailable = |source| KdTreeError::SourceUnavailable {
            name: self.name(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(FIELD_DELIMITER)
            .from_path(&self.path)
            .map_err(|err| unavailable(Some(err.into())))?;

        let mut lines = Vec::new();
        let mut record = StringRecord::new();
        while reader
            .read_record(&mut record)
            .map_err(|err| unavailable(Some(err.into())))?
        {
            lines.push(record.iter().collect::<Vec<_>>().join(FIELD_SEPARATOR));
        }

        if lines.is_empty() {
            return Err(unavailable(None));
        }
        Ok(lines)
    }
}

impl LineSink for FileStore {
    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        let unavailable = |source| KdTreeError::SinkUnavailable {
            name: self.name(),
            source,
        };

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .delimiter(FIELD_DELIMITER)
            .terminator(Terminator::Any(b'\n'))
            .from_path(&self.path)
            .map_err(|err| unavailable(err.into()))?;
        for line in lines {
            writer
                .write_record(line.split(FIELD_SEPARATOR))
                .map_err(|err| unavailable(err.into()))?;
        }
        writer.flush().map_err(unavailable)
    }
}

/// Lines held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    lines: Vec<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines currently held.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the store, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl<S: Into<String>> FromIterator<S> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for MemoryStore {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        if self.lines.is_empty() {
            return Err(KdTreeError::SourceUnavailable {
                name: self.name(),
                source: None,
            });
        }
        Ok(self.lines.clone())
    }
}

impl LineSink for MemoryStore {
    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        self.lines = lines.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("lines.csv"));

        let lines = vec!["1,2".to_string(), "nullptr".to_string(), "3,4".to_string()];
        store.write_lines(&lines).unwrap();

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(written, "1,2\nnullptr\n3,4\n");
        assert_eq!(store.read_lines().unwrap(), lines);
    }

    #[test]
    fn file_store_strips_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.csv");
        std::fs::write(&path, "1,2\r\n3,4\r\n").unwrap();

        let lines = FileStore::new(&path).read_lines().unwrap();
        assert_eq!(lines, vec!["1,2", "3,4"]);
    }

    #[test]
    fn file_store_keeps_records_of_any_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "9.5,7.75,5.75, ,4.25\n\nnullptr\n\"1\",2\n").unwrap();

        let mut store = FileStore::new(&path);
        let lines = store.read_lines().unwrap();
        assert_eq!(lines, vec!["9.5,7.75,5.75, ,4.25", "nullptr", "\"1\",2"]);

        store.write_lines(&lines).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "9.5,7.75,5.75, ,4.25\nnullptr\n\"1\",2\n");
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileStore::new(dir.path().join("missing.csv"))
            .read_lines()
            .unwrap_err();
        match err {
            KdTreeError::SourceUnavailable { name, source } => {
                assert!(name.ends_with("missing.csv"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_unavailable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = FileStore::new(file.path()).read_lines().unwrap_err();
        assert!(matches!(
            err,
            KdTreeError::SourceUnavailable { source: None, .. }
        ));
    }

    #[test]
    fn memory_store_replaces_contents() {
        let mut store: MemoryStore = ["old"].into_iter().collect();
        store.write_lines(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(store.lines().to_vec(), vec!["a", "b"]);
        assert!(MemoryStore::new().read_lines().is_err());
    }
}
