// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture handle with start/stop and method chaining.

use crate::channel::{Channel, Contents};
use crate::error::Result;
use crate::handlers::HandlerId;
use crate::multiplexer::{self, Activation, Multiplexer};
use crate::opts::{ChannelFlags, Opts};
use crate::persist::{self, WriteOptions};
use crate::session::{Buffers, Session};
use std::path::Path;
use std::sync::Arc;

/// One capture of console output.
///
/// Several captures may run at the same time; each sees the calls made
/// while it is started, filtered by its own options. A capture still
/// running when dropped is stopped.
///
/// ```
/// use console_capture::{console_log, Capture, Opts};
///
/// let capture = Capture::new(Opts::default());
/// capture.exec(|| console_log!("foo"));
/// assert_eq!(capture.output(), "foo\n");
/// ```
pub struct Capture {
    session: Session,
    multiplexer: Multiplexer,
}

impl Capture {
    /// Capture over the process-wide console.
    pub fn new(opts: Opts) -> Self {
        Self::with_multiplexer(opts, multiplexer::global().clone())
    }

    pub fn with_multiplexer(opts: Opts, multiplexer: Multiplexer) -> Self {
        Self {
            session: Session::new(&opts),
            multiplexer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start capturing according to the current options.
    pub fn start(&self) -> &Self {
        self.multiplexer.activate(&self.session);
        self
    }

    /// Stop capturing. Captured text is kept.
    pub fn stop(&self) -> &Self {
        self.multiplexer.deactivate(&self.session);
        self
    }

    pub fn is_capturing(&self) -> bool {
        self.multiplexer.is_active(&self.session)
    }

    /// Capture while the returned guard is alive.
    pub fn guard(&self) -> Activation {
        self.multiplexer.scope(&self.session)
    }

    /// Capture everything `f` writes. Capturing stops even if `f` panics.
    pub fn exec<F: FnOnce()>(&self, f: F) -> &Self {
        let _active = self.guard();
        f();
        self
    }

    pub fn stdout(&self) -> String {
        self.session.stdout()
    }

    pub fn stderr(&self) -> String {
        self.session.stderr()
    }

    /// Combined stdout and stderr, in call order.
    pub fn output(&self) -> String {
        self.session.output()
    }

    pub fn buffers(&self) -> Buffers {
        self.session.buffers()
    }

    /// Pass a snapshot of the captured text to `f`.
    pub fn handle<F: FnOnce(&Buffers)>(&self, f: F) -> &Self {
        f(&self.session.buffers());
        self
    }

    /// Empty the named buffers, or all of them when `contents` is empty.
    pub fn clear(&self, contents: &[Contents]) -> &Self {
        self.session.clear(contents);
        self
    }

    /// Empty every buffer.
    pub fn reset(&self) -> &Self {
        self.clear(&[])
    }

    pub fn opts(&self) -> ChannelFlags {
        self.session.flags()
    }

    /// Replace the options. Takes effect at the next call, even mid-capture.
    pub fn set_opts(&self, opts: &Opts) -> &Self {
        self.session.set_opts(opts);
        self
    }

    pub fn set_flag(&self, channel: Channel, enabled: bool) -> &Self {
        self.session.set_flag(channel, enabled);
        self
    }

    /// Call `handler` with each piece of text appended to `contents`.
    pub fn on_data<F>(&self, contents: Contents, handler: F) -> HandlerId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.session.on_data(contents, Arc::new(handler))
    }

    pub fn off_data(&self, id: HandlerId) -> bool {
        self.session.off_data(id)
    }

    /// Write a buffer to `path`, newline-terminated.
    pub fn write(&self, path: impl AsRef<Path>, opts: WriteOptions) -> Result<&Self> {
        let text = persist::terminated(&self.session.contents(opts.contents));
        persist::write_file(path.as_ref(), &text, opts.append)?;
        Ok(self)
    }

    /// Async variant of [`Capture::write`].
    pub async fn write_async(&self, path: impl AsRef<Path>, opts: WriteOptions) -> Result<&Self> {
        let text = persist::terminated(&self.session.contents(opts.contents));
        persist::write_file_async(path.as_ref(), &text, opts.append).await?;
        Ok(self)
    }
}

impl Default for Capture {
    fn default() -> Self {
        Self::new(Opts::default())
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        self.multiplexer.deactivate(&self.session);
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
