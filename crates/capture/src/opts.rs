// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture options.

use crate::channel::{Channel, CHANNEL_COUNT};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Which channels a capture session intercepts.
///
/// Every field is optional; an unset field falls back to the channel's
/// default (named-log channels on, raw stream writes off).
///
/// Setting `stdout` or `stderr` also observes named-log calls that no
/// session claims, since those end up as raw writes on their stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Opts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<bool>,
}

impl Opts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every channel set to `enabled`.
    pub fn all(enabled: bool) -> Self {
        let mut opts = Self::default();
        for channel in Channel::ALL {
            *opts.field_mut(channel) = Some(enabled);
        }
        opts
    }

    /// Options capturing only the raw stream writes.
    pub fn streams_only() -> Self {
        Self::all(false)
            .with(Channel::Stdout, true)
            .with(Channel::Stderr, true)
    }

    /// Explicit setting for a channel, if any.
    pub fn get(&self, channel: Channel) -> Option<bool> {
        match channel {
            Channel::Log => self.log,
            Channel::Error => self.error,
            Channel::Warn => self.warn,
            Channel::Info => self.info,
            Channel::Debug => self.debug,
            Channel::Trace => self.trace,
            Channel::Stdout => self.stdout,
            Channel::Stderr => self.stderr,
        }
    }

    /// Setting for a channel with the default applied.
    pub fn resolve(&self, channel: Channel) -> bool {
        self.get(channel).unwrap_or_else(|| channel.captured_by_default())
    }

    /// Set one channel.
    pub fn with(mut self, channel: Channel, enabled: bool) -> Self {
        *self.field_mut(channel) = Some(enabled);
        self
    }

    pub fn log(self, enabled: bool) -> Self {
        self.with(Channel::Log, enabled)
    }

    pub fn error(self, enabled: bool) -> Self {
        self.with(Channel::Error, enabled)
    }

    pub fn warn(self, enabled: bool) -> Self {
        self.with(Channel::Warn, enabled)
    }

    pub fn info(self, enabled: bool) -> Self {
        self.with(Channel::Info, enabled)
    }

    pub fn debug(self, enabled: bool) -> Self {
        self.with(Channel::Debug, enabled)
    }

    pub fn trace(self, enabled: bool) -> Self {
        self.with(Channel::Trace, enabled)
    }

    pub fn stdout(self, enabled: bool) -> Self {
        self.with(Channel::Stdout, enabled)
    }

    pub fn stderr(self, enabled: bool) -> Self {
        self.with(Channel::Stderr, enabled)
    }

    /// Resolve every channel.
    pub fn flags(&self) -> ChannelFlags {
        ChannelFlags(Channel::ALL.map(|c| self.resolve(c)))
    }

    fn field_mut(&mut self, channel: Channel) -> &mut Option<bool> {
        match channel {
            Channel::Log => &mut self.log,
            Channel::Error => &mut self.error,
            Channel::Warn => &mut self.warn,
            Channel::Info => &mut self.info,
            Channel::Debug => &mut self.debug,
            Channel::Trace => &mut self.trace,
            Channel::Stdout => &mut self.stdout,
            Channel::Stderr => &mut self.stderr,
        }
    }
}

/// Resolved capture flag for every channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelFlags([bool; CHANNEL_COUNT]);

impl ChannelFlags {
    pub fn new(flags: [bool; CHANNEL_COUNT]) -> Self {
        Self(flags)
    }

    pub fn get(&self, channel: Channel) -> bool {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, enabled: bool) {
        self.0[channel.index()] = enabled;
    }

    /// Channels whose flag is set.
    pub fn enabled(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL.into_iter().filter(|c| self.get(*c))
    }

    /// Fully explicit options equivalent to these flags.
    pub fn to_opts(&self) -> Opts {
        Channel::ALL
            .into_iter()
            .fold(Opts::new(), |opts, c| opts.with(c, self.get(c)))
    }
}

impl Default for ChannelFlags {
    fn default() -> Self {
        Opts::default().flags()
    }
}

impl Index<Channel> for ChannelFlags {
    type Output = bool;

    fn index(&self, channel: Channel) -> &bool {
        &self.0[channel.index()]
    }
}

impl From<&Opts> for ChannelFlags {
    fn from(opts: &Opts) -> Self {
        opts.flags()
    }
}

impl Serialize for ChannelFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_opts().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChannelFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Opts::deserialize(deserializer).map(|opts| opts.flags())
    }
}

#[cfg(test)]
#[path = "opts_tests.rs"]
mod tests;
