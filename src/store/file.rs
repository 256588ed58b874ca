//! File-backed booking store
//!
//! The whole collection lives in one JSON document. Every mutation is applied
//! to a copy, the copy is written to `<file>.tmp`, fsynced and renamed over
//! the data file, and only then published in memory. A failed write leaves
//! both the file and the in-memory view untouched.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Utc;
use tracing::{debug, info};

use crate::booking::{Booking, BookingId, BookingPatch, NewBooking};

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::query::BookingQuery;
use super::BookingStore;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: RwLock<Collection>,
}

impl FileStore {
    /// Open the data file, creating an empty collection if it does not exist
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let collection = if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| StoreError::io("failed to read data file", &path, e))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                Collection::new()
            } else {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
                    path: path.clone(),
                    source: e,
                })?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::io("failed to create data directory", parent, e))?;
            }
            let empty = Collection::new();
            persist(&path, &empty)?;
            empty
        };

        info!(path = %path.display(), bookings = collection.len(), "opened booking data file");

        Ok(Self {
            path,
            data: RwLock::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against a copy of the collection and commit it if it succeeds
    fn mutate<T>(&self, op: impl FnOnce(&mut Collection) -> StoreResult<T>) -> StoreResult<T> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let mut next = data.clone();
        let out = op(&mut next)?;
        persist(&self.path, &next)?;
        *data = next;

        Ok(out)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Atomically replace the data file with `collection`
fn persist(path: &Path, collection: &Collection) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(collection).map_err(|e| StoreError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tmp = temp_path(path);
    let mut file =
        File::create(&tmp).map_err(|e| StoreError::io("failed to create temp file", &tmp, e))?;
    file.write_all(&json)
        .map_err(|e| StoreError::io("failed to write temp file", &tmp, e))?;
    file.sync_all()
        .map_err(|e| StoreError::io("failed to fsync temp file", &tmp, e))?;

    fs::rename(&tmp, path).map_err(|e| StoreError::io("failed to replace data file", path, e))?;

    sync_parent(path)?;

    debug!(path = %path.display(), bookings = collection.len(), "persisted bookings");
    Ok(())
}

/// fsync the directory so the rename itself is durable
#[cfg(unix)]
fn sync_parent(path: &Path) -> StoreResult<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => File::open(parent)
            .and_then(|dir| dir.sync_all())
            .map_err(|e| StoreError::io("failed to fsync data directory", parent, e)),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> StoreResult<()> {
    Ok(())
}

impl BookingStore for FileStore {
    fn insert(&self, booking: NewBooking) -> StoreResult<Booking> {
        self.mutate(|c| c.insert(booking, Utc::now()))
    }

    fn find_by_id(&self, id: &BookingId) -> StoreResult<Booking> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        data.get(id)
    }

    fn find_many(&self, query: &BookingQuery) -> StoreResult<Vec<Booking>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.query(query))
    }

    fn update_partial(&self, id: &BookingId, patch: BookingPatch) -> StoreResult<Booking> {
        self.mutate(|c| c.update(id, patch))
    }

    fn delete_by_id(&self, id: &BookingId) -> StoreResult<Booking> {
        self.mutate(|c| c.remove(id))
    }
}
