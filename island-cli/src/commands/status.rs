// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status Command
//!
//! Shows what the local stores know about a resource without fetching it.

use anyhow::Result;
use island_core::ResourcePath;

use crate::config::CliConfig;
use crate::display;

/// Prints the resolved URL, cache entry and validation tag of `path`.
pub fn run(config: &CliConfig, path: &str) -> Result<()> {
    let sync = config.open_sync()?;
    let resource = ResourcePath::parse(path)?;
    let cached = sync.store().exists(&resource);

    println!("{}", resource);
    display::field("url", sync.resource_url(path)?.as_str());
    display::field(
        "cache file",
        &sync.store().path_for(&resource).display().to_string(),
    );
    display::field("cached", if cached { "yes" } else { "no" });
    display::field(
        "etag",
        sync.known_tag(path)?.as_deref().unwrap_or("(none)"),
    );
    display::field("branch", &sync.config().branch);
    println!();

    if sync.config().bundled_only {
        display::warning("Bundled-only mode: the network will not be contacted");
    } else if sync.is_first_launch() {
        display::info("First launch: the next fetch serves bundled content and syncs in the background");
    }

    Ok(())
}
