// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test fixtures
//!
//! A [`Harness`] owns a temporary storage directory, a mock content host
//! and an in-memory tag store, and records background sync events.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use island_core::sync::{CallbackHandler, CACHE_DIR_NAME};
use island_core::{
    DataSync, FileStore, MemoryBundle, MemoryTagStore, ResourcePath, SyncConfig, SyncEvent,
    TagStore,
};
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

/// Request path of a resource on the mock host (default branch).
pub fn remote_path(resource: &str) -> String {
    format!("/SwiftIsland/app/refs/heads/main/api/{resource}")
}

pub struct Harness {
    pub temp: TempDir,
    pub server: MockServer,
    pub tags: Arc<MemoryTagStore>,
    pub events: Arc<Mutex<Vec<SyncEvent>>>,
}

impl Harness {
    pub async fn start() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            server: MockServer::start().await,
            tags: Arc::new(MemoryTagStore::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.temp.path().join("storage")
    }

    pub fn config(&self) -> SyncConfig {
        SyncConfig::default()
            .with_storage_path(self.storage_path())
            .with_content_host(self.server.uri())
    }

    pub fn build(&self, config: SyncConfig, bundle: MemoryBundle) -> DataSync {
        let events = Arc::clone(&self.events);
        DataSync::builder(config)
            .tag_store(self.tags.clone())
            .bundle(Arc::new(bundle))
            .event_handler(Arc::new(CallbackHandler::new(move |event| {
                events.lock().unwrap().push(event);
            })))
            .build()
            .unwrap()
    }

    /// Store `data` in the cache, which also ends the first launch.
    pub fn seed_cache(&self, path: &str, data: &[u8]) {
        let store = FileStore::open(&self.storage_path()).unwrap();
        store
            .write_atomic(&ResourcePath::parse(path).unwrap(), data)
            .unwrap();
    }

    /// Create an empty cache root so the first-launch tier is skipped.
    pub fn mark_launched(&self) {
        fs::create_dir_all(self.storage_path().join(CACHE_DIR_NAME)).unwrap();
    }

    pub fn cached(&self, path: &str) -> Option<Vec<u8>> {
        let store = FileStore::open(&self.storage_path()).unwrap();
        store.read(&ResourcePath::parse(path).unwrap()).ok()
    }

    pub fn url(&self, path: &str) -> Url {
        ResourcePath::parse(path).unwrap().url(&self.config()).unwrap()
    }

    pub fn tag(&self, path: &str) -> Option<String> {
        self.tags.get(&self.url(path)).unwrap()
    }

    pub fn set_tag(&self, path: &str, tag: &str) {
        self.tags.set(Some(tag), &self.url(path)).unwrap();
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().unwrap().clone()
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap().len()
    }
}

pub fn bundle_with(path: &str, data: &[u8]) -> MemoryBundle {
    MemoryBundle::new().with_resource(path, data.to_vec()).unwrap()
}
