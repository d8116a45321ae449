// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local content store
//!
//! Stores downloaded resources under `<storage>/DataCache`, mirroring the
//! namespace-prefixed layout of the bundled content. Writes are atomic so a
//! crash or a concurrent writer never leaves a truncated file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::path::ResourcePath;

/// Name of the cache root directory inside the storage path.
pub const CACHE_DIR_NAME: &str = "DataCache";

/// Durable path → bytes store
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store under the given storage path.
    ///
    /// Creates the storage directory but not the cache root: the root
    /// appears with the first write, and its absence marks a first launch.
    pub fn open(storage_path: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(storage_path)?;
        Ok(Self {
            root: storage_path.join(CACHE_DIR_NAME),
        })
    }

    /// Cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether anything has ever been cached.
    pub fn root_exists(&self) -> bool {
        self.root.is_dir()
    }

    /// On-disk location for `path`. Performs no I/O.
    pub fn path_for(&self, path: &ResourcePath) -> PathBuf {
        self.root.join(path.to_relative_path())
    }

    /// Whether a cache entry exists for `path`.
    pub fn exists(&self, path: &ResourcePath) -> bool {
        self.path_for(path).is_file()
    }

    /// Read the cache entry for `path`.
    pub fn read(&self, path: &ResourcePath) -> Result<Vec<u8>, StoreError> {
        let file = self.path_for(path);
        fs::read(&file).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(file),
            _ => StoreError::Io(e),
        })
    }

    /// Replace the cache entry for `path` with `data`.
    pub fn write_atomic(&self, path: &ResourcePath, data: &[u8]) -> Result<(), StoreError> {
        atomic_write(&self.path_for(path), data)
    }
}

/// Atomic file write (unique temp sibling, then rename)
///
/// Either the old content remains or the new content is fully written.
/// The rename replaces an existing destination and moves into place
/// otherwise.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .ok_or_else(|| StoreError::InvalidPath(path.to_path_buf()))?;
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    // Dropping an unpersisted temp file deletes it.
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    Ok(())
}

/// Errors that can occur with the content store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No cache entry at the given location
    #[error("No cache entry at {}", .0.display())]
    NotFound(PathBuf),

    /// Destination has no parent directory
    #[error("Invalid cache path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
