// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Swift Island Core Library
//!
//! Remote data synchronization for the Swift Island conference app.
//! Resolves logical resource paths to bytes from bundled content, a local
//! disk cache, or the network, using ETag-validated conditional requests.

pub mod data;
pub mod sync;

pub use data::{DataError, DataLogic, ImageDownloadReport, RemoteImage, Resource};
pub use sync::{
    Bundle, ContentSource, DataSync, DataSyncBuilder, DirBundle, EventHandler, FileStore,
    Fetched, InFlightPolicy, MemoryBundle, MemoryTagStore, ResourcePath, SqliteTagStore,
    SyncConfig, SyncError, SyncEvent, TagStore,
};
