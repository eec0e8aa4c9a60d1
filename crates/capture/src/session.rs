// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture session state.
//!
//! A [`Session`] is the data side of one capture attempt: three text buffers
//! and a capture flag per channel. Flags are read on every event, so
//! changing them takes effect at the next channel call even while the
//! session is active. Clones share the same state; equality is identity.

use crate::channel::{Channel, Contents, Stream, CHANNEL_COUNT};
use crate::handlers::{Handler, HandlerId, Handlers};
use crate::opts::{ChannelFlags, Opts};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Captured text, per buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffers {
    pub stdout: String,
    pub stderr: String,
    /// Everything captured on either stream, in call order.
    pub output: String,
}

impl Buffers {
    pub fn get(&self, contents: Contents) -> &str {
        match contents {
            Contents::Stdout => &self.stdout,
            Contents::Stderr => &self.stderr,
            Contents::Output => &self.output,
        }
    }

    fn get_mut(&mut self, contents: Contents) -> &mut String {
        match contents {
            Contents::Stdout => &mut self.stdout,
            Contents::Stderr => &mut self.stderr,
            Contents::Output => &mut self.output,
        }
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct Inner {
    id: u64,
    flags: [AtomicBool; CHANNEL_COUNT],
    buffers: Mutex<Buffers>,
    handlers: Handlers,
}

/// Buffers and channel flags of one capture attempt.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    pub fn new(opts: &Opts) -> Self {
        let flags = opts.flags();
        Self {
            inner: Arc::new(Inner {
                id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
                flags: Channel::ALL.map(|c| AtomicBool::new(flags[c])),
                buffers: Mutex::new(Buffers::default()),
                handlers: Handlers::new(),
            }),
        }
    }

    /// Process-unique identifier, for diagnostics.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Whether this session claims events on `channel`.
    pub fn captures(&self, channel: Channel) -> bool {
        self.inner.flags[channel.index()].load(Ordering::SeqCst)
    }

    pub fn set_flag(&self, channel: Channel, enabled: bool) {
        self.inner.flags[channel.index()].store(enabled, Ordering::SeqCst);
    }

    /// Replace every flag; unset options fall back to channel defaults.
    pub fn set_opts(&self, opts: &Opts) {
        for channel in Channel::ALL {
            self.set_flag(channel, opts.resolve(channel));
        }
    }

    /// Snapshot of the current flags.
    pub fn flags(&self) -> ChannelFlags {
        ChannelFlags::new(Channel::ALL.map(|c| self.captures(c)))
    }

    pub fn stdout(&self) -> String {
        self.contents(Contents::Stdout)
    }

    pub fn stderr(&self) -> String {
        self.contents(Contents::Stderr)
    }

    pub fn output(&self) -> String {
        self.contents(Contents::Output)
    }

    pub fn contents(&self, contents: Contents) -> String {
        self.inner.buffers.lock().get(contents).to_string()
    }

    /// Snapshot of all three buffers.
    pub fn buffers(&self) -> Buffers {
        self.inner.buffers.lock().clone()
    }

    /// Empty the named buffers, or all of them when `contents` is empty.
    pub fn clear(&self, contents: &[Contents]) {
        let targets = if contents.is_empty() {
            &Contents::ALL[..]
        } else {
            contents
        };
        let mut buffers = self.inner.buffers.lock();
        for target in targets {
            buffers.get_mut(*target).clear();
        }
    }

    pub fn handlers(&self) -> &Handlers {
        &self.inner.handlers
    }

    /// Subscribe to text as it is appended to `contents`.
    pub fn on_data(&self, contents: Contents, handler: Handler) -> HandlerId {
        self.inner.handlers.add(contents, handler)
    }

    pub fn off_data(&self, id: HandlerId) -> bool {
        self.inner.handlers.remove(id)
    }

    /// Append captured text to the stream's buffer and to `output`.
    pub(crate) fn record(&self, stream: Stream, text: &str) {
        {
            let mut buffers = self.inner.buffers.lock();
            buffers.get_mut(stream.contents()).push_str(text);
            buffers.output.push_str(text);
        }
        self.inner.handlers.emit(stream.contents(), text);
        self.inner.handlers.emit(Contents::Output, text);
    }

    pub fn ptr_eq(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Opts::default())
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Session {}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.inner.id)
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
