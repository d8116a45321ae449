// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote data synchronization module
//!
//! Decides, for every piece of remote JSON or image content, whether to
//! serve it from the application bundle, the local disk cache, or the
//! network:
//! - Bundled content is the ultimate fallback and the only source when
//!   offline mode is forced
//! - On first launch bundled content is served immediately while a
//!   background fetch seeds the cache
//! - Otherwise a conditional GET (`If-None-Match`) validates the cache
//!
//! Cache writes are atomic; validation tags are stored per resolved URL.

mod bundle;
mod config;
mod error;
mod etag;
mod events;
mod fetcher;
mod manager;
mod path;
mod store;

pub use bundle::{Bundle, DirBundle, MemoryBundle};
pub use config::{InFlightPolicy, SyncConfig};
pub use error::SyncError;
pub use etag::{MemoryTagStore, SqliteTagStore, TagStore, TagStoreError, TAG_KEY_PREFIX};
pub use events::{CallbackHandler, EventDispatcher, EventHandler, SyncEvent};
pub use fetcher::{Conditional, FetchError, HttpFetcher};
pub use manager::{ContentSource, DataSync, DataSyncBuilder, Fetched};
pub use path::{ResourcePath, NAMESPACE};
pub use store::{FileStore, StoreError, CACHE_DIR_NAME};
