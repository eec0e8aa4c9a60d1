// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory destination.

use crate::channel::Stream;
use crate::console::Destination;
use parking_lot::Mutex;
use std::sync::Arc;

/// Destination that keeps every write in memory, in arrival order.
///
/// Clones share the same record.
#[derive(Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<(Stream, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Destination`] appending to this sink.
    pub fn destination(&self) -> Destination {
        let writes = Arc::clone(&self.writes);
        Arc::new(move |stream: Stream, bytes: &[u8]| {
            writes.lock().push((stream, bytes.to_vec()));
        })
    }

    /// Every write received, as text.
    pub fn writes(&self) -> Vec<(Stream, String)> {
        self.writes
            .lock()
            .iter()
            .map(|(stream, bytes)| (*stream, String::from_utf8_lossy(bytes).into_owned()))
            .collect()
    }

    /// Concatenation of everything written to `stream`.
    pub fn text(&self, stream: Stream) -> String {
        self.writes
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, bytes)| String::from_utf8_lossy(bytes))
            .collect()
    }

    pub fn stdout(&self) -> String {
        self.text(Stream::Stdout)
    }

    pub fn stderr(&self) -> String {
        self.text(Stream::Stderr)
    }

    /// Number of writes received.
    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}
