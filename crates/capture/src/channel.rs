// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Static channel table.
//!
//! Every interceptable output path is a [`Channel`]. Its primary stream and
//! default capture policy come from a fixed table rather than being looked
//! up by name at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of interceptable channels.
pub const CHANNEL_COUNT: usize = 8;

/// Real output stream a channel ultimately writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Buffer a captured event on this stream is appended to (besides `Output`).
    pub fn contents(self) -> Contents {
        match self {
            Stream::Stdout => Contents::Stdout,
            Stream::Stderr => Contents::Stderr,
        }
    }

    /// Raw-stream channel for this stream.
    pub fn channel(self) -> Channel {
        match self {
            Stream::Stdout => Channel::Stdout,
            Stream::Stderr => Channel::Stderr,
        }
    }
}

/// One of the three per-session text buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contents {
    Stdout,
    Stderr,
    /// Interleaving of everything captured on either stream.
    Output,
}

impl Contents {
    pub const ALL: [Contents; 3] = [Contents::Stdout, Contents::Stderr, Contents::Output];
}

/// How a channel receives its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    /// Variadic log-style call, formatted as a space-joined line.
    Named,
    /// Raw write of bytes, passed through unmodified.
    Raw,
}

/// An interceptable output path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Log,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Stdout,
    Stderr,
}

struct Spec {
    name: &'static str,
    kind: ChannelKind,
    stream: Stream,
    captured_by_default: bool,
}

const fn spec(name: &'static str, kind: ChannelKind, stream: Stream, default: bool) -> Spec {
    Spec {
        name,
        kind,
        stream,
        captured_by_default: default,
    }
}

static TABLE: [Spec; CHANNEL_COUNT] = [
    spec("log", ChannelKind::Named, Stream::Stdout, true),
    spec("error", ChannelKind::Named, Stream::Stderr, true),
    spec("warn", ChannelKind::Named, Stream::Stderr, true),
    spec("info", ChannelKind::Named, Stream::Stdout, true),
    spec("debug", ChannelKind::Named, Stream::Stdout, true),
    spec("trace", ChannelKind::Named, Stream::Stdout, true),
    spec("stdout", ChannelKind::Raw, Stream::Stdout, false),
    spec("stderr", ChannelKind::Raw, Stream::Stderr, false),
];

impl Channel {
    /// All channels, in table order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Log,
        Channel::Error,
        Channel::Warn,
        Channel::Info,
        Channel::Debug,
        Channel::Trace,
        Channel::Stdout,
        Channel::Stderr,
    ];

    /// Position of this channel in [`Channel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    fn spec(self) -> &'static Spec {
        &TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> ChannelKind {
        self.spec().kind
    }

    /// Primary destination of the channel.
    pub fn stream(self) -> Stream {
        self.spec().stream
    }

    /// Whether a session captures this channel when its options say nothing.
    pub fn captured_by_default(self) -> bool {
        self.spec().captured_by_default
    }

    pub fn is_raw(self) -> bool {
        self.kind() == ChannelKind::Raw
    }

    /// Parse a channel from its table name.
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
