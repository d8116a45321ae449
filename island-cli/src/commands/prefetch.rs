// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Prefetch Command
//!
//! Warms the cache with every conference resource.

use anyhow::{bail, Result};
use island_core::Resource;

use crate::config::CliConfig;
use crate::display;

/// Fetches every [`Resource`] and reports where each came from.
pub async fn run(config: &CliConfig) -> Result<()> {
    let sync = config.open_sync()?;
    let mut failures = 0;

    for resource in Resource::ALL {
        match sync.fetch_detailed(resource.file_name()).await {
            Ok(fetched) => {
                let items = serde_json::from_slice::<serde_json::Value>(&fetched.bytes)
                    .ok()
                    .and_then(|value| value.as_array().map(Vec::len));
                let detail = match items {
                    Some(count) => format!("{} items", count),
                    None => format!("{} bytes", fetched.bytes.len()),
                };
                display::success(&format!(
                    "{:20} {:>10}  {}",
                    resource.file_name(),
                    detail,
                    display::source_label(fetched.source)
                ));
            }
            Err(err) => {
                failures += 1;
                display::error(&format!("{}: {}", resource, err));
            }
        }
    }

    let pending = sync.pending_background();
    if pending > 0 {
        display::info(&format!("Waiting for {} background sync(s)", pending));
    }
    sync.settle().await;

    if failures > 0 {
        bail!("{} of {} resources unavailable", failures, Resource::ALL.len());
    }
    Ok(())
}
