// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use std::path::PathBuf;

use anyhow::Result;
use island_core::{DataLogic, DataSync, SyncConfig};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory for cache and tag storage.
    pub data_dir: PathBuf,
    /// Branch override.
    pub branch: Option<String>,
    /// Force bundled content.
    pub bundled_only: bool,
    /// Bundled content directory override.
    pub bundle_dir: Option<PathBuf>,
    /// Content host override.
    pub host: Option<String>,
}

impl CliConfig {
    /// Sync configuration from the environment with flags layered on top.
    pub fn sync_config(&self) -> SyncConfig {
        self.sync_config_from(SyncConfig::from_env())
    }

    fn sync_config_from(&self, base: SyncConfig) -> SyncConfig {
        let mut config = base.with_storage_path(&self.data_dir);
        if let Some(branch) = &self.branch {
            config = config.with_branch(branch);
        }
        if let Some(host) = &self.host {
            config = config.with_content_host(host);
        }
        if let Some(dir) = &self.bundle_dir {
            config = config.with_bundle_path(dir);
        }
        if self.bundled_only {
            config = config.bundled_only();
        }
        config
    }

    /// Builds the synchronizer for this configuration.
    pub fn open_sync(&self) -> Result<DataSync> {
        Ok(DataSync::new(self.sync_config())?)
    }

    /// Builds the data facade for this configuration.
    pub fn open_data(&self) -> Result<DataLogic> {
        Ok(DataLogic::new(self.open_sync()?))
    }
}
