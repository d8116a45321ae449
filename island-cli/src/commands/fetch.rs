// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetch Command
//!
//! Resolves a single resource through the sync tiers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::CliConfig;
use crate::display;

/// Fetches `path` and writes its bytes to `output` or stdout.
pub async fn run(config: &CliConfig, path: &str, output: Option<&Path>) -> Result<()> {
    let sync = config.open_sync()?;
    let fetched = sync
        .fetch_detailed(path)
        .await
        .with_context(|| format!("failed to fetch {}", path))?;

    match output {
        Some(output) => {
            fs::write(output, &fetched.bytes)
                .with_context(|| format!("failed to write {:?}", output))?;
            display::success(&format!(
                "{} ({} bytes from {}) -> {:?}",
                path,
                fetched.bytes.len(),
                display::source_label(fetched.source),
                output
            ));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&fetched.bytes)?;
            stdout.flush()?;
            tracing::info!(path, source = %fetched.source, "fetched");
        }
    }

    if sync.pending_background() > 0 {
        tracing::info!("waiting for background sync");
    }
    sync.settle().await;

    Ok(())
}
