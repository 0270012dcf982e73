//! Directory entries as a record source.
//!
//! [`scan_dir`] reads a directory lazily, one entry per pull, so a bounded
//! query stops touching the filesystem once it has enough matches. Each
//! pull can fail; use the result with [`try_evaluate`](crate::try_evaluate)
//! so I/O errors reach the caller. An entry removed between being listed
//! and being read is skipped rather than reported.
//!
//! ```no_run
//! use qaul_query::{fs, Query};
//!
//! let query = Query::builder().ends_with(".jpg").max_count(10).build()?;
//! let photos = query.try_evaluate(fs::scan_dir("/srv/share")?)?;
//! for photo in &photos {
//!     println!("{}", photo.path().display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::{DirEntry, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::record::Record;
use crate::timestamp::Timestamp;

/// A directory entry with its name and last-modified time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    name: String,
    modified: Timestamp,
    path: PathBuf,
}

impl FileRecord {
    /// Reads the record for a directory entry.
    ///
    /// Names that are not valid UTF-8 are converted lossily.
    pub fn from_entry(entry: &DirEntry) -> io::Result<Self> {
        let modified = entry.metadata()?.modified()?;
        Ok(FileRecord {
            name: entry.file_name().to_string_lossy().into_owned(),
            modified: modified.into(),
            path: entry.path(),
        })
    }

    /// The entry's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's last-modified time.
    pub fn modified(&self) -> Timestamp {
        self.modified
    }

    /// Full path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Record for FileRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn timestamp(&self) -> Timestamp {
        self.modified
    }
}

/// Lazy iterator over the entries of one directory.
///
/// Entries come in the order the operating system returns them; nothing is
/// sorted. Call [`scan_dir`] again to restart.
#[derive(Debug)]
pub struct DirRecords {
    entries: ReadDir,
}

impl Iterator for DirRecords {
    type Item = io::Result<FileRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };
            match FileRecord::from_entry(&entry) {
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %entry.path().display(), "entry vanished during scan");
                }
                result => return Some(result),
            }
        }
    }
}

/// Starts a lazy scan of the entries directly inside `dir`.
///
/// Entries deleted while the scan is running are skipped.
pub fn scan_dir(dir: impl AsRef<Path>) -> io::Result<DirRecords> {
    Ok(DirRecords {
        entries: std::fs::read_dir(dir)?,
    })
}
