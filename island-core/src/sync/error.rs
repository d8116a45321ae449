// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronization error types.

use thiserror::Error;

use super::etag::TagStoreError;
use super::fetcher::FetchError;
use super::store::StoreError;

/// Errors surfaced by [`DataSync`](super::DataSync).
///
/// Cloneable so that coalesced fetches can hand the same outcome to every
/// waiting caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Content is absent (bundle missing the resource, or no cache entry).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network-layer failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Status other than 2xx/304, or a body that could not be read.
    #[error("Bad response: {0}")]
    BadResponse(String),

    /// The resource path could not be resolved to a URL or cache location.
    #[error("Bad URL: {0}")]
    BadUrl(String),

    /// Local storage failure other than absence.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SyncError {
    /// True for errors caused by missing content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound(_))
    }
}

impl From<FetchError> for SyncError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NetworkError(e) => SyncError::Transport(e.to_string()),
            other => SyncError::BadResponse(other.to_string()),
        }
    }
}

impl From<TagStoreError> for SyncError {
    fn from(err: TagStoreError) -> Self {
        SyncError::Storage(err.to_string())
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => SyncError::NotFound(path.display().to_string()),
            other => SyncError::Storage(other.to_string()),
        }
    }
}
