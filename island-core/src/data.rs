// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Data facade
//!
//! Names the conference's JSON resources and decodes them on top of
//! [`DataSync`]. Entity types belong to the caller; this module only knows
//! where each list lives and how images are referenced.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::sync::{ContentSource, DataSync, SyncError};

/// Logical JSON resources served by the content repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Venue and point-of-interest locations
    Locations,
    /// Mentors and presenters
    Mentors,
    /// Informational pages
    Pages,
    /// Activities (workshops, talks) independent of schedule
    Activities,
    /// Scheduled events referencing activities
    Events,
    /// Default packing list
    PackingItems,
    /// Frequently asked questions
    Faq,
    /// Puzzle hunt entries
    Puzzles,
    /// Sponsors
    Sponsors,
}

impl Resource {
    /// Every resource, in prefetch order.
    pub const ALL: [Resource; 9] = [
        Resource::Locations,
        Resource::Mentors,
        Resource::Pages,
        Resource::Activities,
        Resource::Events,
        Resource::PackingItems,
        Resource::Faq,
        Resource::Puzzles,
        Resource::Sponsors,
    ];

    /// File name relative to the `api/` namespace.
    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Locations => "locations.json",
            Resource::Mentors => "presenters.json",
            Resource::Pages => "pages.json",
            Resource::Activities => "activities.json",
            Resource::Events => "events.json",
            Resource::PackingItems => "packing-items.json",
            Resource::Faq => "faq.json",
            Resource::Puzzles => "puzzles.json",
            Resource::Sponsors => "sponsors.json",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Reference to an image stored alongside the JSON content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteImage {
    /// Resource path of the image
    pub url: String,
    /// Display name
    pub name: String,
    /// Kind of reference (e.g., "file")
    #[serde(rename = "type")]
    pub kind: String,
    /// Upstream location the image was copied from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    /// Expiry of the upstream location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_expires_at: Option<String>,
}

/// Result of downloading a batch of images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDownloadReport {
    /// Paths fetched by this call
    pub downloaded: Vec<String>,
    /// Paths already cached locally
    pub skipped: Vec<String>,
    /// Paths served from bundled content, not cached
    pub bundled: Vec<String>,
    /// Paths that failed with error messages
    pub failed: Vec<(String, String)>,
}

/// Typed access to the conference data.
#[derive(Clone)]
pub struct DataLogic {
    sync: DataSync,
}

impl DataLogic {
    pub fn new(sync: DataSync) -> Self {
        Self { sync }
    }

    /// The underlying synchronizer.
    pub fn sync(&self) -> &DataSync {
        &self.sync
    }

    /// Fetch and decode a resource list.
    pub async fn fetch<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, DataError> {
        let data = self.sync.fetch(resource.file_name()).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Fetch and decode a resource list, logging failures and returning an
    /// empty list instead.
    pub async fn fetch_or_empty<T: DeserializeOwned>(&self, resource: Resource) -> Vec<T> {
        match self.fetch(resource).await {
            Ok(items) => items,
            Err(err) => {
                warn!(%resource, error = %err, "failed to load resource");
                Vec::new()
            }
        }
    }

    /// Download every image that is not cached yet, concurrently.
    ///
    /// Images answered by the bundle (offline mode, first launch, network
    /// failure) are reported as `bundled` since nothing was cached.
    pub async fn download_images(&self, images: &[RemoteImage]) -> ImageDownloadReport {
        let mut report = ImageDownloadReport::default();
        let mut pending = Vec::new();

        for image in images {
            if self.sync.has_local_image(&image.url) {
                report.skipped.push(image.url.clone());
            } else if !pending.contains(&image.url.as_str()) {
                pending.push(image.url.as_str());
            }
        }

        let results = join_all(pending.iter().map(|path| self.sync.fetch_detailed(path))).await;

        for (path, result) in pending.into_iter().zip(results) {
            match result {
                Ok(fetched) if fetched.source == ContentSource::Bundle => {
                    debug!(path, "image served from bundle");
                    report.bundled.push(path.to_string());
                }
                Ok(fetched) => {
                    debug!(path, source = %fetched.source, "downloaded image");
                    report.downloaded.push(path.to_string());
                }
                Err(err) => {
                    warn!(path, error = %err, "failed to download image");
                    report.failed.push((path.to_string(), err.to_string()));
                }
            }
        }

        report
    }
}

/// Errors from the data facade
#[derive(Debug, Error)]
pub enum DataError {
    /// Every source failed
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Content did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
