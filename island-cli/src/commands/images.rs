// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Images Command
//!
//! Downloads images into the local cache.

use anyhow::{bail, Result};
use island_core::RemoteImage;

use crate::config::CliConfig;
use crate::display;

/// Downloads each of `paths` unless it is already cached.
pub async fn run(config: &CliConfig, paths: &[String]) -> Result<()> {
    let data = config.open_data()?;
    let images: Vec<RemoteImage> = paths
        .iter()
        .map(|path| RemoteImage {
            url: path.clone(),
            name: path.clone(),
            kind: "file".to_string(),
            original_url: None,
            url_expires_at: None,
        })
        .collect();

    let report = data.download_images(&images).await;
    display::display_image_report(&report);
    data.sync().settle().await;

    if !report.failed.is_empty() {
        bail!("{} image(s) failed to download", report.failed.len());
    }
    Ok(())
}
