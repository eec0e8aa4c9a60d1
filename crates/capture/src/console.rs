// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process output channels.
//!
//! A [`Console`] holds one replaceable implementation per [`Channel`]. Code
//! that wants its output to be capturable writes through these channels
//! (the free functions and `console_*!` macros use the process-wide
//! console) instead of printing directly.
//!
//! Named-log channels format their arguments as one space-joined line and
//! hand the bytes to the raw channel of their stream; raw channels write to
//! the console's [`Destination`].

use crate::channel::{Channel, Stream, CHANNEL_COUNT};
use crate::multiplexer;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Weak};

/// Arguments of one channel call.
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    /// Variadic arguments of a named-log call.
    Args(&'a [&'a dyn fmt::Display]),
    /// Bytes handed to a raw stream write.
    Raw(&'a [u8]),
}

impl Payload<'_> {
    /// Text a capture session records for this payload.
    pub fn text(&self) -> String {
        match self {
            Payload::Args(args) => format_line(args),
            Payload::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Bytes a stream write of this payload produces.
    pub fn bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Payload::Args(args) => Cow::Owned(format_line(args).into_bytes()),
            Payload::Raw(bytes) => Cow::Borrowed(bytes),
        }
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Args(args) => f.debug_tuple("Args").field(&format_line(args)).finish(),
            Payload::Raw(bytes) => f
                .debug_tuple("Raw")
                .field(&String::from_utf8_lossy(bytes))
                .finish(),
        }
    }
}

/// Join arguments with single spaces and terminate the line.
///
/// An argument whose `Display` impl fails ends the line: whatever it wrote
/// before failing is kept and the remaining arguments are dropped.
pub fn format_line(args: &[&dyn fmt::Display]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        if write!(line, "{arg}").is_err() {
            break;
        }
    }
    line.push('\n');
    line
}

/// Behaviour currently bound to a channel.
pub type Implementation = Arc<dyn Fn(&Payload<'_>) + Send + Sync>;

/// Real sink behind the raw channels.
pub type Destination = Arc<dyn Fn(Stream, &[u8]) + Send + Sync>;

/// The process's stdout and stderr. Write errors are dropped.
pub fn std_destination() -> Destination {
    Arc::new(|stream: Stream, bytes: &[u8]| {
        let _ = match stream {
            Stream::Stdout => write_flush(&mut io::stdout().lock(), bytes),
            Stream::Stderr => write_flush(&mut io::stderr().lock(), bytes),
        };
    })
}

fn write_flush(out: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    out.flush()
}

/// A set of channel implementations over one destination.
pub struct Console {
    slots: [RwLock<Option<Implementation>>; CHANNEL_COUNT],
    destination: Destination,
    multiplexer: multiplexer::Shared,
}

impl Console {
    /// Console writing to the process's stdout and stderr.
    pub fn new() -> Arc<Self> {
        Self::with_destination(std_destination())
    }

    /// Console whose raw channels write to `destination`.
    pub fn with_destination(destination: Destination) -> Arc<Self> {
        Arc::new_cyclic(|console| Console {
            slots: Channel::ALL.map(|c| RwLock::new(Some(default_implementation(c, console)))),
            destination,
            multiplexer: multiplexer::Shared::default(),
        })
    }

    /// Current implementation of a channel, `None` if the channel is absent.
    pub fn get(&self, channel: Channel) -> Option<Implementation> {
        self.slots[channel.index()].read().clone()
    }

    /// Whether the channel exists on this console.
    pub fn contains(&self, channel: Channel) -> bool {
        self.slots[channel.index()].read().is_some()
    }

    /// Rebind a channel, returning the previous implementation.
    ///
    /// Hosts use this to describe their environment before any capture
    /// starts. While a capture session is active, only the multiplexer
    /// rebinds channels.
    pub fn replace(
        &self,
        channel: Channel,
        implementation: Option<Implementation>,
    ) -> Option<Implementation> {
        std::mem::replace(&mut *self.slots[channel.index()].write(), implementation)
    }

    /// Make a channel absent.
    pub fn remove(&self, channel: Channel) -> Option<Implementation> {
        self.replace(channel, None)
    }

    /// Call the channel's current implementation.
    ///
    /// Returns `false` when the channel is absent, in which case nothing
    /// happens.
    pub fn invoke(&self, channel: Channel, payload: &Payload<'_>) -> bool {
        // Clone out of the slot so the implementation may rebind channels
        // or write to other channels.
        let Some(implementation) = self.get(channel) else {
            return false;
        };
        implementation(payload);
        true
    }

    pub fn log(&self, args: &[&dyn fmt::Display]) {
        self.invoke(Channel::Log, &Payload::Args(args));
    }

    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.invoke(Channel::Error, &Payload::Args(args));
    }

    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.invoke(Channel::Warn, &Payload::Args(args));
    }

    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.invoke(Channel::Info, &Payload::Args(args));
    }

    pub fn debug(&self, args: &[&dyn fmt::Display]) {
        self.invoke(Channel::Debug, &Payload::Args(args));
    }

    pub fn trace(&self, args: &[&dyn fmt::Display]) {
        self.invoke(Channel::Trace, &Payload::Args(args));
    }

    /// Raw write to a stream's channel.
    pub fn write(&self, stream: Stream, bytes: impl AsRef<[u8]>) {
        self.invoke(stream.channel(), &Payload::Raw(bytes.as_ref()));
    }

    /// `io::Write` handle over a raw channel.
    pub fn writer(self: &Arc<Self>, stream: Stream) -> RawWriter {
        RawWriter {
            console: Arc::clone(self),
            stream,
        }
    }

    /// Active-set state of the multiplexers over this console.
    pub(crate) fn multiplexer_state(&self) -> multiplexer::Shared {
        Arc::clone(&self.multiplexer)
    }

    fn emit(&self, stream: Stream, bytes: &[u8]) {
        (self.destination)(stream, bytes);
    }
}

fn default_implementation(channel: Channel, console: &Weak<Console>) -> Implementation {
    let console = Weak::clone(console);
    let stream = channel.stream();
    if channel.is_raw() {
        Arc::new(move |payload: &Payload<'_>| {
            if let Some(console) = console.upgrade() {
                console.emit(stream, &payload.bytes());
            }
        })
    } else {
        Arc::new(move |payload: &Payload<'_>| {
            let Some(console) = console.upgrade() else {
                return;
            };
            let bytes = payload.bytes();
            if !console.invoke(stream.channel(), &Payload::Raw(&bytes)) {
                console.emit(stream, &bytes);
            }
        })
    }
}

/// Writer that sends every write through a raw channel.
pub struct RawWriter {
    console: Arc<Console>,
    stream: Stream,
}

impl Write for RawWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write(self.stream, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

static GLOBAL: Lazy<Arc<Console>> = Lazy::new(Console::new);

/// The process-wide console.
pub fn global() -> &'static Arc<Console> {
    &GLOBAL
}

pub fn log(args: &[&dyn fmt::Display]) {
    GLOBAL.log(args);
}

pub fn error(args: &[&dyn fmt::Display]) {
    GLOBAL.error(args);
}

pub fn warn(args: &[&dyn fmt::Display]) {
    GLOBAL.warn(args);
}

pub fn info(args: &[&dyn fmt::Display]) {
    GLOBAL.info(args);
}

pub fn debug(args: &[&dyn fmt::Display]) {
    GLOBAL.debug(args);
}

pub fn trace(args: &[&dyn fmt::Display]) {
    GLOBAL.trace(args);
}

/// Raw write through the process-wide console.
pub fn write(stream: Stream, bytes: impl AsRef<[u8]>) {
    GLOBAL.write(stream, bytes);
}

pub fn stdout() -> RawWriter {
    GLOBAL.writer(Stream::Stdout)
}

pub fn stderr() -> RawWriter {
    GLOBAL.writer(Stream::Stderr)
}

#[doc(hidden)]
#[macro_export]
macro_rules! __console_call {
    ($f:ident; $($arg:expr),*) => {
        $crate::console::$f(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log-style call on the `log` channel: arguments are joined with spaces.
///
/// ```
/// console_capture::console_log!("answer:", 42);
/// ```
#[macro_export]
macro_rules! console_log {
    ($($arg:expr),* $(,)?) => {
        $crate::__console_call!(log; $($arg),*)
    };
}

#[macro_export]
macro_rules! console_error {
    ($($arg:expr),* $(,)?) => {
        $crate::__console_call!(error; $($arg),*)
    };
}

#[macro_export]
macro_rules! console_warn {
    ($($arg:expr),* $(,)?) => {
        $crate::__console_call!(warn; $($arg),*)
    };
}

#[macro_export]
macro_rules! console_info {
    ($($arg:expr),* $(,)?) => {
        $crate::__console_call!(info; $($arg),*)
    };
}

#[macro_export]
macro_rules! console_debug {
    ($($arg:expr),* $(,)?) => {
        $crate::__console_call!(debug; $($arg),*)
    };
}

#[macro_export]
macro_rules! console_trace {
    ($($arg:expr),* $(,)?) => {
        $crate::__console_call!(trace; $($arg),*)
    };
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
