// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! DataSync - resolves resource paths to bytes
//!
//! The DataSync is the main entry point for the synchronization layer.
//! For every fetch it evaluates, in order:
//! 1. Offline override: bundled content only
//! 2. First launch (no cache root yet): bundled content now, network in
//!    the background
//! 3. Conditional GET validated by the stored ETag, falling back to
//!    bundled content on any failure

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use super::bundle::{Bundle, DirBundle, MemoryBundle};
use super::config::{InFlightPolicy, SyncConfig};
use super::error::SyncError;
use super::etag::{SqliteTagStore, TagStore};
use super::events::{EventDispatcher, EventHandler, SyncEvent};
use super::fetcher::{Conditional, HttpFetcher};
use super::path::ResourcePath;
use super::store::FileStore;

/// File name of the tag database inside the storage path.
pub const TAG_DB_NAME: &str = "preferences.db";

/// Where the bytes of a fetch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Packaged with the application
    Bundle,
    /// Local cache, confirmed current by a 304
    Cache,
    /// Downloaded by this fetch
    Network,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentSource::Bundle => "bundle",
            ContentSource::Cache => "cache",
            ContentSource::Network => "network",
        };
        f.write_str(name)
    }
}

/// Bytes of a resource and their source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub source: ContentSource,
}

type SharedFetch = Shared<BoxFuture<'static, Result<Fetched, SyncError>>>;

/// Resolves logical resource paths through bundle, cache and network.
///
/// Cheap to clone; clones share stores, HTTP client and background tasks.
#[derive(Clone)]
pub struct DataSync {
    inner: Arc<Inner>,
}

struct Inner {
    config: SyncConfig,
    store: FileStore,
    tags: Arc<dyn TagStore>,
    bundle: Arc<dyn Bundle>,
    fetcher: HttpFetcher,
    events: EventDispatcher,
    background: Mutex<Vec<JoinHandle<()>>>,
    in_flight: Mutex<HashMap<ResourcePath, SharedFetch>>,
}

impl DataSync {
    /// Create a DataSync with default collaborators.
    ///
    /// Tags go to `<storage>/preferences.db`; bundled content comes from
    /// `config.bundle_path` when set.
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        DataSyncBuilder::new(config).build()
    }

    pub fn builder(config: SyncConfig) -> DataSyncBuilder {
        DataSyncBuilder::new(config)
    }

    /// Fetch the bytes for `path`.
    ///
    /// Fails only when every tier is exhausted; the error is the bundled
    /// tier's.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, SyncError> {
        self.fetch_detailed(path).await.map(|fetched| fetched.bytes)
    }

    /// Like [`fetch`](Self::fetch), also reporting where the bytes came from.
    pub async fn fetch_detailed(&self, path: &str) -> Result<Fetched, SyncError> {
        let path = ResourcePath::parse(path)?;
        match self.inner.config.in_flight {
            InFlightPolicy::Independent => self.inner.resolve(&path).await,
            InFlightPolicy::Coalesce => self.coalesced(path).await,
        }
    }

    /// Fetch binary image content.
    pub async fn fetch_image(&self, path: &str) -> Result<Vec<u8>, SyncError> {
        self.fetch(path).await
    }

    /// Cache location of an image. Performs no I/O.
    pub fn local_image_path(&self, path: &str) -> Result<PathBuf, SyncError> {
        Ok(self.inner.store.path_for(&ResourcePath::parse(path)?))
    }

    /// Whether an image is already cached locally.
    pub fn has_local_image(&self, path: &str) -> bool {
        ResourcePath::parse(path)
            .map(|p| self.inner.store.exists(&p))
            .unwrap_or(false)
    }

    /// Remote URL for `path`.
    pub fn resource_url(&self, path: &str) -> Result<Url, SyncError> {
        ResourcePath::parse(path)?.url(&self.inner.config)
    }

    /// Stored validation tag for `path`'s URL.
    pub fn known_tag(&self, path: &str) -> Result<Option<String>, SyncError> {
        let url = self.resource_url(path)?;
        Ok(self.inner.tags.get(&url)?)
    }

    /// True until the first cache write creates the cache root.
    pub fn is_first_launch(&self) -> bool {
        !self.inner.store.root_exists()
    }

    /// Number of background syncs not yet finished.
    pub fn pending_background(&self) -> usize {
        self.inner
            .background
            .lock()
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Wait for every background sync spawned so far.
    ///
    /// Background results are still only reported through events.
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.inner.background.lock());
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(err) = handle.await {
                    warn!(error = %err, "background sync task aborted");
                }
            }
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &FileStore {
        &self.inner.store
    }

    fn coalesced(&self, path: ResourcePath) -> SharedFetch {
        let mut in_flight = self.inner.in_flight.lock();
        if let Some(pending) = in_flight.get(&path) {
            debug!(%path, "joining in-flight fetch");
            return pending.clone();
        }

        let inner = Arc::clone(&self.inner);
        let key = path.clone();
        let fetch = async move {
            let result = inner.resolve(&path).await;
            inner.in_flight.lock().remove(&path);
            result
        }
        .boxed()
        .shared();

        in_flight.insert(key, fetch.clone());
        fetch
    }
}

impl Inner {
    async fn resolve(self: &Arc<Self>, path: &ResourcePath) -> Result<Fetched, SyncError> {
        if self.config.bundled_only {
            debug!(%path, "using bundled data only");
            return self.load_bundled(path);
        }

        if !self.store.root_exists() {
            match self.load_bundled(path) {
                Ok(fetched) => {
                    debug!(%path, "first launch: using bundled data");
                    self.spawn_background_sync(path.clone());
                    return Ok(fetched);
                }
                Err(err) => {
                    debug!(%path, error = %err, "first launch: bundled data not available, using network");
                }
            }
        }

        match self.fetch_validated(path).await {
            Ok(fetched) => Ok(fetched),
            Err(err) => {
                warn!(%path, error = %err, "network fetch failed, falling back to bundled data");
                self.load_bundled(path)
            }
        }
    }

    async fn fetch_validated(&self, path: &ResourcePath) -> Result<Fetched, SyncError> {
        let url = path.url(&self.config)?;
        let etag = self.stored_tag(&url);
        debug!(%url, etag = etag.as_deref(), "fetching");

        match self.fetcher.get_with_etag(&url, etag.as_deref()).await? {
            Conditional::NotModified => {
                let bytes = self.store.read(path)?;
                Ok(Fetched {
                    bytes,
                    source: ContentSource::Cache,
                })
            }
            Conditional::Fresh { body, etag } => {
                self.persist(path, &url, &body, etag.as_deref())?;
                Ok(Fetched {
                    bytes: body,
                    source: ContentSource::Network,
                })
            }
        }
    }

    fn spawn_background_sync(self: &Arc<Self>, path: ResourcePath) {
        let inner = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let event = match inner.background_sync(&path).await {
                Ok(etag) => {
                    info!(%path, "background sync completed");
                    SyncEvent::BackgroundSyncCompleted {
                        path: path.to_string(),
                        etag,
                    }
                }
                Err(err) => {
                    warn!(%path, error = %err, "background sync failed");
                    SyncEvent::BackgroundSyncFailed {
                        path: path.to_string(),
                        error: err.to_string(),
                    }
                }
            };
            inner.events.dispatch(event);
        });

        let mut background = self.background.lock();
        background.retain(|handle| !handle.is_finished());
        background.push(handle);
    }

    /// One unconditional fetch; stores content then tag.
    async fn background_sync(&self, path: &ResourcePath) -> Result<Option<String>, SyncError> {
        let url = path.url(&self.config)?;
        match self.fetcher.get_with_etag(&url, None).await? {
            Conditional::Fresh { body, etag } => {
                self.persist(path, &url, &body, etag.as_deref())?;
                Ok(etag)
            }
            Conditional::NotModified => Err(SyncError::BadResponse(
                "304 for a request without a validation tag".to_string(),
            )),
        }
    }

    /// Cache write first; the tag follows only a successful write.
    fn persist(
        &self,
        path: &ResourcePath,
        url: &Url,
        body: &[u8],
        etag: Option<&str>,
    ) -> Result<(), SyncError> {
        self.store.write_atomic(path, body)?;
        if let Err(err) = self.tags.set(etag, url) {
            warn!(%url, error = %err, "failed to store validation tag");
        }
        Ok(())
    }

    fn stored_tag(&self, url: &Url) -> Option<String> {
        self.tags.get(url).unwrap_or_else(|err| {
            warn!(%url, error = %err, "failed to read validation tag");
            None
        })
    }

    fn load_bundled(&self, path: &ResourcePath) -> Result<Fetched, SyncError> {
        let bytes = self.bundle.load(path)?;
        Ok(Fetched {
            bytes,
            source: ContentSource::Bundle,
        })
    }
}

/// Builder for [`DataSync`] with injectable collaborators.
pub struct DataSyncBuilder {
    config: SyncConfig,
    tags: Option<Arc<dyn TagStore>>,
    bundle: Option<Arc<dyn Bundle>>,
    events: EventDispatcher,
}

impl DataSyncBuilder {
    pub fn new(config: SyncConfig) -> Self {
        DataSyncBuilder {
            config,
            tags: None,
            bundle: None,
            events: EventDispatcher::new(),
        }
    }

    /// Sets the tag store.
    pub fn tag_store(mut self, tags: Arc<dyn TagStore>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the bundled content source.
    pub fn bundle(mut self, bundle: Arc<dyn Bundle>) -> Self {
        self.bundle = Some(bundle);
        self
    }

    /// Adds a handler for background sync events.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.events.add_handler(handler);
        self
    }

    /// Builds the DataSync, creating the storage directory.
    pub fn build(self) -> Result<DataSync, SyncError> {
        let store = FileStore::open(&self.config.storage_path)?;

        let tags: Arc<dyn TagStore> = match self.tags {
            Some(tags) => tags,
            None => {
                let db = self.config.storage_path.join(TAG_DB_NAME);
                Arc::new(SqliteTagStore::open(&db)?)
            }
        };

        let bundle: Arc<dyn Bundle> = match (self.bundle, &self.config.bundle_path) {
            (Some(bundle), _) => bundle,
            (None, Some(dir)) => Arc::new(DirBundle::new(dir.clone())),
            (None, None) => Arc::new(MemoryBundle::new()),
        };

        let fetcher = HttpFetcher::new(&self.config)?;

        Ok(DataSync {
            inner: Arc::new(Inner {
                config: self.config,
                store,
                tags,
                bundle,
                fetcher,
                events: self.events,
                background: Mutex::new(Vec::new()),
                in_flight: Mutex::new(HashMap::new()),
            }),
        })
    }
}
