// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for remote data synchronization

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable selecting the content branch.
pub const BRANCH_ENV: &str = "SWIFTISLAND_BRANCH";
/// Environment variable forcing bundle-only resolution.
pub const BUNDLED_ONLY_ENV: &str = "SWIFTISLAND_USE_BUNDLED_DATA";
/// Environment variable overriding the content host.
pub const CONTENT_HOST_ENV: &str = "SWIFTISLAND_CONTENT_HOST";
/// Environment variable pointing at the packaged assets directory.
pub const BUNDLE_DIR_ENV: &str = "SWIFTISLAND_BUNDLE_DIR";

/// How concurrent fetches of the same path are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InFlightPolicy {
    /// Every call runs the full fetch policy on its own. Concurrent calls
    /// for one path may each hit the network; the last cache write wins.
    #[default]
    Independent,
    /// At most one fetch per normalized path is in flight; concurrent
    /// callers await and share its result.
    Coalesce,
}

/// Configuration for the synchronization layer
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// App-private storage directory (cache root and tag database live here)
    pub storage_path: PathBuf,

    /// Raw-content host (e.g., "https://raw.githubusercontent.com")
    pub content_host: String,

    /// Repository owner on the content host
    pub org: String,

    /// Repository name on the content host
    pub repo: String,

    /// Branch to pull content from
    pub branch: String,

    /// Serve bundled content only, never touch the network
    pub bundled_only: bool,

    /// Directory holding the packaged assets, if any
    pub bundle_path: Option<PathBuf>,

    /// HTTP timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,

    /// Maximum accepted response body size (bytes)
    pub max_content_size: u64,

    /// Proxy URL (e.g., "socks5://127.0.0.1:9050")
    pub proxy_url: Option<String>,

    /// Scheduling of concurrent same-path fetches
    pub in_flight: InFlightPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("."),
            content_host: "https://raw.githubusercontent.com".to_string(),
            org: "SwiftIsland".to_string(),
            repo: "app".to_string(),
            branch: "main".to_string(),
            bundled_only: false,
            bundle_path: None,
            timeout: None,
            max_content_size: 20 * 1024 * 1024, // 20 MB, images included
            proxy_url: None,
            in_flight: InFlightPolicy::Independent,
        }
    }
}

impl SyncConfig {
    /// Default configuration with the process environment applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default configuration with overrides taken from `lookup`.
    ///
    /// Reads the branch, offline override, content host and bundle
    /// directory variables. Unset or empty values keep the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(branch) = get(BRANCH_ENV) {
            config.branch = branch;
        }
        if let Some(flag) = get(BUNDLED_ONLY_ENV) {
            config.bundled_only = parse_flag(&flag);
        }
        if let Some(host) = get(CONTENT_HOST_ENV) {
            config.content_host = host;
        }
        if let Some(dir) = get(BUNDLE_DIR_ENV) {
            config.bundle_path = Some(PathBuf::from(dir));
        }

        config
    }

    /// Set the storage directory
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Pull content from a different branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Point at a different content host
    pub fn with_content_host(mut self, host: impl Into<String>) -> Self {
        self.content_host = host.into();
        self
    }

    /// Configure with custom proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }

    /// Use bundled content only
    pub fn bundled_only(mut self) -> Self {
        self.bundled_only = true;
        self
    }

    /// Set the packaged assets directory
    pub fn with_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bundle_path = Some(path.into());
        self
    }

    /// Select how concurrent same-path fetches are scheduled
    pub fn with_in_flight(mut self, policy: InFlightPolicy) -> Self {
        self.in_flight = policy;
        self
    }

    /// Base URL every resource path is appended to, with a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/{}/refs/heads/{}/",
            self.content_host.trim_end_matches('/'),
            self.org,
            self.repo,
            self.branch
        )
    }
}

/// Accepts "YES", "1", "true" and "on" in any case.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "1" | "true" | "on"
    )
}
