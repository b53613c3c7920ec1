//! Booking store backed by a single JSON document on disk.
//!
//! File access runs on the blocking pool. A missing file or directory loads
//! as an empty document; saving creates the directory when needed and
//! replaces the file atomically.

use std::io;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use chrono::Utc;
use tracing::debug;

use super::atomic_write::replace_file;
use super::document::StoredDocument;
use crate::domain::ports::{BookingStore, BookingStoreError};
use crate::domain::{BookingSnapshot, FacilityZone};

/// JSON document store rooted at `path`.
#[derive(Debug, Clone)]
pub struct JsonFileBookingStore {
    path: Utf8PathBuf,
    zone: FacilityZone,
}

impl JsonFileBookingStore {
    /// `zone` completes legacy reservations that lack a stored zone.
    pub fn new(path: impl Into<Utf8PathBuf>, zone: FacilityZone) -> Self {
        Self {
            path: path.into(),
            zone,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

fn split_path(path: &Utf8Path) -> Result<(&Utf8Path, &Utf8Path), BookingStoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(Utf8Path::new)
        .ok_or_else(|| BookingStoreError::unavailable(format!("{path} must name a file")))?;
    Ok((parent, file_name))
}

fn read_document(path: &Utf8Path) -> Result<Option<StoredDocument>, BookingStoreError> {
    let (parent, file_name) = split_path(path)?;
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(BookingStoreError::unavailable(format!("open {parent}: {err}")));
        }
    };
    let raw = match dir.read_to_string(file_name) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(BookingStoreError::unavailable(format!("read {path}: {err}")));
        }
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| BookingStoreError::corrupt(format!("{path}: {err}")))
}

fn write_document(
    path: &Utf8Path,
    zone: FacilityZone,
    snapshot: &BookingSnapshot,
) -> Result<(), BookingStoreError> {
    let previous = read_document(path)?;
    let document = StoredDocument::from_snapshot(snapshot, zone, previous, Utc::now());
    let payload = serde_json::to_vec_pretty(&document)
        .map_err(|err| BookingStoreError::unavailable(format!("encode document: {err}")))?;

    let (parent, file_name) = split_path(path)?;
    Dir::create_ambient_dir_all(parent, ambient_authority())
        .map_err(|err| BookingStoreError::unavailable(format!("create {parent}: {err}")))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| BookingStoreError::unavailable(format!("open {parent}: {err}")))?;
    replace_file(&dir, file_name, &payload)
}

async fn blocking<T, F>(task: F) -> Result<T, BookingStoreError>
where
    F: FnOnce() -> Result<T, BookingStoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| BookingStoreError::unavailable(format!("file task failed: {err}")))?
}

#[async_trait]
impl BookingStore for JsonFileBookingStore {
    async fn load(&self) -> Result<BookingSnapshot, BookingStoreError> {
        let path = self.path.clone();
        let zone = self.zone;
        let document = blocking(move || read_document(&path)).await?;
        if document.is_none() {
            debug!(path = %self.path, "no booking document yet; starting empty");
        }
        Ok(document.unwrap_or_default().into_snapshot(zone))
    }

    async fn save(&self, snapshot: &BookingSnapshot) -> Result<(), BookingStoreError> {
        let path = self.path.clone();
        let zone = self.zone;
        let snapshot = snapshot.clone();
        blocking(move || write_document(&path, zone, &snapshot)).await
    }
}
