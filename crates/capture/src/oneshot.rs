// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-call capture of everything a closure writes.

use crate::channel::Contents;
use crate::error::Result;
use crate::multiplexer::{self, Multiplexer};
use crate::opts::Opts;
use crate::persist::{self, WriteOptions};
use crate::session::Session;
use std::path::Path;

/// Output captured by [`capture`], with one trailing newline trimmed from
/// each buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
    pub output: String,
}

impl Captured {
    pub fn get(&self, contents: Contents) -> &str {
        match contents {
            Contents::Stdout => &self.stdout,
            Contents::Stderr => &self.stderr,
            Contents::Output => &self.output,
        }
    }

    /// Write a buffer to `path`, newline-terminated.
    pub fn write(&self, path: impl AsRef<Path>, opts: WriteOptions) -> Result<&Self> {
        let text = persist::terminated(self.get(opts.contents));
        persist::write_file(path.as_ref(), &text, opts.append)?;
        Ok(self)
    }

    /// Async variant of [`Captured::write`].
    pub async fn write_async(&self, path: impl AsRef<Path>, opts: WriteOptions) -> Result<&Self> {
        let text = persist::terminated(self.get(opts.contents));
        persist::write_file_async(path.as_ref(), &text, opts.append).await?;
        Ok(self)
    }
}

/// Options for [`redirect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedirectOptions {
    /// Append to the file instead of truncating it. Defaults to `true`.
    pub append: bool,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self { append: true }
    }
}

/// Capture the raw stdout and stderr writes made by `f`.
///
/// Named-log calls no other session claims reach the raw streams, so they
/// are captured too. If `f` panics, capturing stops and the panic
/// continues.
///
/// ```
/// use console_capture::{capture, console_error, console_log};
///
/// let captured = capture(|| {
///     console_log!("foo");
///     console_error!("bar", "baz");
/// });
/// assert_eq!(captured.output, "foo\nbar baz");
/// assert_eq!(captured.stderr, "bar baz");
/// ```
pub fn capture<F: FnOnce()>(f: F) -> Captured {
    capture_with(multiplexer::global(), f)
}

/// [`capture`] over a specific multiplexer.
pub fn capture_with<F: FnOnce()>(multiplexer: &Multiplexer, f: F) -> Captured {
    let session = Session::new(&Opts::streams_only());
    {
        let _active = multiplexer.scope(&session);
        f();
    }
    let buffers = session.buffers();
    Captured {
        stdout: trim_newline(buffers.stdout),
        stderr: trim_newline(buffers.stderr),
        output: trim_newline(buffers.output),
    }
}

/// Capture everything `f` writes and save it to `path`.
pub fn redirect<F: FnOnce()>(path: impl AsRef<Path>, f: F, opts: RedirectOptions) -> Result<()> {
    redirect_with(multiplexer::global(), path, f, opts)
}

/// [`redirect`] over a specific multiplexer.
pub fn redirect_with<F: FnOnce()>(
    multiplexer: &Multiplexer,
    path: impl AsRef<Path>,
    f: F,
    opts: RedirectOptions,
) -> Result<()> {
    let captured = capture_with(multiplexer, f);
    persist::write_file(
        path.as_ref(),
        &format!("{}\n", captured.output),
        opts.append,
    )
}

fn trim_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

#[cfg(test)]
#[path = "oneshot_tests.rs"]
mod tests;
