// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Data handlers notified as captured text arrives.

use crate::channel::Contents;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback receiving each piece of captured text.
pub type Handler = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`Handlers::add`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Handlers keyed by the buffer they observe.
#[derive(Default)]
pub struct Handlers {
    entries: Mutex<Vec<(HandlerId, Contents, Handler)>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to text appended to `contents`.
    pub fn add(&self, contents: Contents, handler: Handler) -> HandlerId {
        let id = HandlerId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().push((id, contents, handler));
        id
    }

    /// Unsubscribe. Returns whether the handler was registered.
    pub fn remove(&self, id: HandlerId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(entry, _, _)| *entry != id);
        entries.len() != before
    }

    /// Number of handlers subscribed to `contents`.
    pub fn count(&self, contents: Contents) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(_, c, _)| *c == contents)
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Call every handler subscribed to `contents`, in registration order.
    pub fn emit(&self, contents: Contents, text: &str) {
        let matching: Vec<Handler> = self
            .entries
            .lock()
            .iter()
            .filter(|(_, c, _)| *c == contents)
            .map(|(_, _, h)| Arc::clone(h))
            .collect();

        for handler in matching {
            handler(text);
        }
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
