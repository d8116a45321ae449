// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bundled content
//!
//! Read-only resources shipped with the application. They are the final
//! fallback of every fetch and the only source in offline mode.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::SyncError;
use super::path::ResourcePath;

/// Source of packaged resources, addressed by namespace-prefixed path.
pub trait Bundle: Send + Sync {
    /// Loads the bundled bytes for `path`.
    ///
    /// Fails with [`SyncError::NotFound`] when the resource is not bundled.
    fn load(&self, path: &ResourcePath) -> Result<Vec<u8>, SyncError>;
}

/// Bundle backed by the application's assets directory.
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Bundle for DirBundle {
    fn load(&self, path: &ResourcePath) -> Result<Vec<u8>, SyncError> {
        let file = self.root.join(path.to_relative_path());
        fs::read(&file).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                SyncError::NotFound(format!("bundled file not found: {path}"))
            }
            _ => SyncError::Storage(format!("{}: {e}", file.display())),
        })
    }
}

/// Bundle held in memory (compiled-in resources, tests).
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    resources: HashMap<ResourcePath, Vec<u8>>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource. The path is normalized like any fetch path.
    pub fn with_resource(
        mut self,
        path: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self, SyncError> {
        self.insert(path, data)?;
        Ok(self)
    }

    pub fn insert(&mut self, path: &str, data: impl Into<Vec<u8>>) -> Result<(), SyncError> {
        self.resources.insert(ResourcePath::parse(path)?, data.into());
        Ok(())
    }
}

impl Bundle for MemoryBundle {
    fn load(&self, path: &ResourcePath) -> Result<Vec<u8>, SyncError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(format!("bundled file not found: {path}")))
    }
}
