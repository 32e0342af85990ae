//! Flat-file persistence for the room store.
//!
//! The store lives in a single delimited text file: a fixed header row, then
//! one row per room. See [`codec`] for the row layout.

pub mod codec;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::store::RoomStore;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Bookings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Bookings file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn from_io(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Handle on the bookings file at a fixed path.
#[derive(Debug, Clone)]
pub struct BookingsFile {
    path: PathBuf,
}

impl BookingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and decodes the whole file.
    pub fn load(&self) -> Result<RoomStore, PersistError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| PersistError::from_io(&self.path, e))?;
        let store = codec::decode(&text)?;
        tracing::info!(path = %self.path.display(), rooms = store.len(), "Loaded bookings");
        Ok(store)
    }

    /// Writes the header plus one row per room, creating missing parent
    /// directories first.
    ///
    /// The rows go to a temporary file next to the target which is then
    /// renamed over it, so a failed write never truncates the previous copy.
    pub fn save(&self, store: &RoomStore) -> Result<(), PersistError> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(|e| PersistError::from_io(parent, e))?;
                parent
            }
            None => Path::new("."),
        };

        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| PersistError::from_io(parent, e))?;
        let written = staged.write_all(codec::encode(store).as_bytes());
        if let Err(e) = written.and_then(|()| staged.as_file().sync_all()) {
            return Err(PersistError::from_io(staged.path(), e));
        }
        staged
            .persist(&self.path)
            .map_err(|e| PersistError::from_io(&self.path, e.error))?;

        tracing::info!(path = %self.path.display(), rooms = store.len(), "Saved bookings");
        Ok(())
    }

    /// Writes an empty store. An existing file is only replaced when `force`
    /// is set.
    pub fn init(&self, force: bool) -> Result<(), PersistError> {
        if self.exists() && !force {
            return Err(PersistError::AlreadyExists(self.path.clone()));
        }
        self.save(&RoomStore::new())
    }
}
