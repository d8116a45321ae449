// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logical resource paths
//!
//! Every store is keyed by the namespace-prefixed form of a path, so
//! `"sponsors.json"` and `"api/sponsors.json"` address the same bundled
//! file, cache entry and remote URL.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use super::config::SyncConfig;
use super::error::SyncError;

/// Namespace segment every resource lives under.
pub const NAMESPACE: &str = "api/";

/// Characters that would change the meaning of a path once joined to a URL.
const RESERVED: &[char] = &['\\', '#', '?', '%'];

/// A normalized, namespace-prefixed resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Normalize a logical path.
    ///
    /// Strips leading slashes and adds the `api/` prefix when absent.
    /// Rejects paths that are empty or contain empty, `.` or `..`
    /// segments, and segments with characters the URL parser would
    /// reinterpret (`\`, `#`, `?`, `%`).
    pub fn parse(path: &str) -> Result<Self, SyncError> {
        let trimmed = path.trim_start_matches('/');
        let normalized = if trimmed.starts_with(NAMESPACE) {
            trimmed.to_string()
        } else {
            format!("{NAMESPACE}{trimmed}")
        };

        let relative = &normalized[NAMESPACE.len()..];
        let valid = !relative.is_empty()
            && relative
                .split('/')
                .all(|segment| {
                    !segment.is_empty()
                        && segment != "."
                        && segment != ".."
                        && !segment.contains(RESERVED)
                });
        if !valid {
            return Err(SyncError::BadUrl(format!("invalid resource path: {path:?}")));
        }

        Ok(Self(normalized))
    }

    /// The normalized path, e.g. `api/sponsors.json`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative filesystem path mirroring the normalized path.
    pub fn to_relative_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }

    /// Resolve against the configured content base URL.
    pub fn url(&self, config: &SyncConfig) -> Result<Url, SyncError> {
        let base = config.base_url();
        let parsed = Url::parse(&base).map_err(|e| SyncError::BadUrl(format!("{base}: {e}")))?;
        let url = parsed
            .join(&self.0)
            .map_err(|e| SyncError::BadUrl(format!("{}: {e}", self.0)))?;

        // Must stay under the base with no query or fragment split off
        let contained = url.as_str().starts_with(parsed.as_str())
            && url.query().is_none()
            && url.fragment().is_none();
        if !contained {
            return Err(SyncError::BadUrl(format!(
                "{} resolves outside {base}: {url}",
                self.0
            )));
        }
        Ok(url)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
