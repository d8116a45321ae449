// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Swift Island CLI
//!
//! Command-line front end for the conference content sync: fetch resources,
//! inspect their cache state, and warm the local cache.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "island")]
#[command(version, about = "Swift Island conference content sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data dir + /swiftisland)
    #[arg(long, global = true, env = "SWIFTISLAND_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Content branch to sync from
    #[arg(long, global = true)]
    branch: Option<String>,

    /// Serve bundled content only, never touch the network
    #[arg(long, global = true)]
    bundled_only: bool,

    /// Directory holding the bundled `api/` tree
    #[arg(long, global = true)]
    bundle_dir: Option<PathBuf>,

    /// Content host base URL
    #[arg(long, global = true)]
    host: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a resource and print or save its bytes
    Fetch {
        /// Resource path (e.g., "faq.json" or "api/images/alice.jpg")
        path: String,

        /// Write the bytes to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show URL, cache entry and validation tag of a resource
    Status {
        /// Resource path
        path: String,
    },

    /// Fetch every conference resource into the cache
    Prefetch,

    /// Download images that are not cached yet
    Images {
        /// Image resource paths
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("island=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "island", &mut io::stdout());
        return Ok(());
    }

    // Resolve data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swiftisland")
    });

    let config = CliConfig {
        data_dir,
        branch: cli.branch,
        bundled_only: cli.bundled_only,
        bundle_dir: cli.bundle_dir,
        host: cli.host,
    };

    match cli.command {
        Commands::Fetch { path, output } => {
            commands::fetch::run(&config, &path, output.as_deref()).await?;
        }
        Commands::Status { path } => commands::status::run(&config, &path)?,
        Commands::Prefetch => commands::prefetch::run(&config).await?,
        Commands::Images { paths } => commands::images::run(&config, &paths).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
