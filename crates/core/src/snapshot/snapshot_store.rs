//! File-backed append-only snapshot store.
//!
//! Storage format: one JSON-serialized [`Snapshot`] per line. Every
//! append is a single `O_APPEND` write of one complete line, so two
//! writers interleave records instead of overwriting each other's whole
//! file. An in-memory index (coin tag → byte offsets, in append order)
//! is built by one full scan at open and maintained incrementally on
//! append; `latest` answers by seeking to the last matching offset.
//!
//! The index assumes this handle is the only writer of the file while it
//! is open; records appended by another process are durable but not
//! visible to this handle until the store is reopened.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::errors::{Result, StoreError};
use crate::snapshot::{Snapshot, SnapshotRepositoryTrait};
use crate::table::Table;

#[derive(Default)]
struct StoreIndex {
    /// Byte offset of every record, in append order.
    offsets: Vec<u64>,
    /// Coin tag → offsets of the records stored under it, append order.
    by_tag: HashMap<String, Vec<u64>>,
    /// Next append position.
    end: u64,
}

impl StoreIndex {
    fn record(&mut self, coin: &str, offset: u64) {
        self.offsets.push(offset);
        self.by_tag.entry(coin.to_string()).or_default().push(offset);
    }
}

/// Append-only snapshot log with a coin-tag index.
pub struct SnapshotStore {
    path: PathBuf,
    index: Mutex<StoreIndex>,
}

impl SnapshotStore {
    /// Open a store at `path`, creating parent directories as needed. A
    /// missing file is an empty history; an existing file is scanned
    /// whole to build the index, and any undeserializable record fails
    /// the open with [`StoreError::Corrupt`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::Io)?;
            }
        }

        let index = Self::scan(&path)?;
        debug!(
            "Opened snapshot store at {} ({} records)",
            path.display(),
            index.offsets.len()
        );

        Ok(Self {
            path,
            index: Mutex::new(index),
        })
    }

    /// Build the index by scanning the whole file once.
    fn scan(path: &Path) -> Result<StoreIndex> {
        let mut index = StoreIndex::default();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(index),
            Err(e) => return Err(StoreError::Io(e).into()),
        };

        let mut reader = BufReader::new(file);
        let mut offset = 0u64;
        let mut line_number = 0usize;
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader.read_line(&mut line).map_err(StoreError::Io)?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let record = line.trim_end_matches(['\n', '\r']);
            if !record.trim().is_empty() {
                let snapshot = Self::parse_record(path, line_number, record)?;
                index.record(&snapshot.coin, offset);
            }

            offset += read as u64;
        }

        index.end = offset;
        Ok(index)
    }

    fn parse_record(path: &Path, line_number: usize, record: &str) -> Result<Snapshot> {
        serde_json::from_str(record).map_err(|e| {
            StoreError::Corrupt {
                path: path.display().to_string(),
                message: format!("line {}: {}", line_number, e),
            }
            .into()
        })
    }

    /// Read the single record starting at `offset`.
    fn read_at(&self, offset: u64) -> Result<Snapshot> {
        let mut file = File::open(&self.path).map_err(StoreError::Io)?;
        file.seek(SeekFrom::Start(offset)).map_err(StoreError::Io)?;

        let mut reader = BufReader::new(file);
        let mut line = String::new();
        reader.read_line(&mut line).map_err(StoreError::Io)?;

        let record = line.trim_end_matches(['\n', '\r']);
        serde_json::from_str(record)
            .map_err(|e| {
                StoreError::Corrupt {
                    path: self.path.display().to_string(),
                    message: format!("offset {}: {}", offset, e),
                }
                .into()
            })
    }

    fn lock_index(&self) -> Result<std::sync::MutexGuard<'_, StoreIndex>> {
        self.index.lock().map_err(|_| {
            StoreError::Io(std::io::Error::other("snapshot store lock poisoned")).into()
        })
    }
}

impl SnapshotRepositoryTrait for SnapshotStore {
    fn append(&self, data: Table, coin_tag: &str) -> Result<Snapshot> {
        let snapshot = Snapshot::new(coin_tag, data);

        let mut record = serde_json::to_string(&snapshot).map_err(StoreError::Serialize)?;
        record.push('\n');

        let mut index = self.lock_index()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(StoreError::Io)?;
        file.write_all(record.as_bytes()).map_err(StoreError::Io)?;
        file.flush().map_err(StoreError::Io)?;

        let offset = index.end;
        index.record(&snapshot.coin, offset);
        index.end = offset + record.len() as u64;

        debug!(
            "Appended snapshot for {} ({} total records)",
            snapshot.coin,
            index.offsets.len()
        );

        Ok(snapshot)
    }

    fn load_all(&self) -> Result<Vec<Snapshot>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e).into()),
        };

        let mut snapshots = Vec::new();
        let mut reader = BufReader::new(file);
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer).map_err(StoreError::Io)?;

        for (line_number, record) in buffer.lines().enumerate() {
            if record.trim().is_empty() {
                continue;
            }
            snapshots.push(Self::parse_record(&self.path, line_number + 1, record)?);
        }

        Ok(snapshots)
    }

    fn latest(&self, coin_tag: Option<&str>) -> Result<Option<Snapshot>> {
        let offset = {
            let index = self.lock_index()?;
            match coin_tag {
                Some(tag) => index.by_tag.get(tag).and_then(|offsets| offsets.last()).copied(),
                None => index.offsets.last().copied(),
            }
        };

        match offset {
            Some(offset) => Ok(Some(self.read_at(offset)?)),
            None => Ok(None),
        }
    }
}
