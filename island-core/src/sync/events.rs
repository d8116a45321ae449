// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Events
//!
//! Completion hooks for background synchronization.

use std::sync::Arc;

/// Events emitted by [`DataSync`](super::DataSync).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A first-launch background sync stored fresh content.
    BackgroundSyncCompleted {
        /// The normalized resource path.
        path: String,
        /// The tag stored alongside the content.
        etag: Option<String>,
    },

    /// A first-launch background sync failed; the error went nowhere else.
    BackgroundSyncFailed {
        /// The normalized resource path.
        path: String,
        /// Error description.
        error: String,
    },
}

impl SyncEvent {
    /// The resource path the event refers to.
    pub fn path(&self) -> &str {
        match self {
            SyncEvent::BackgroundSyncCompleted { path, .. }
            | SyncEvent::BackgroundSyncFailed { path, .. } => path,
        }
    }
}

/// Event handler trait.
///
/// Handlers run on the background task and must not block.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: SyncEvent);
}

/// Simple callback-based event handler.
pub struct CallbackHandler<F>
where
    F: Fn(SyncEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(SyncEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(SyncEvent) + Send + Sync,
{
    fn on_event(&self, event: SyncEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: SyncEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
