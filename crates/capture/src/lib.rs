// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture console output for test assertions.
//!
//! Code writes through the process console's channels: six log-style calls
//! (`log`, `error`, `warn`, `info`, `debug`, `trace`) and raw writes to
//! stdout and stderr. A [`Capture`] intercepts those calls while it runs,
//! and several captures may run at once without losing or duplicating
//! output: a call nobody captures still reaches the real stream exactly
//! once.
//!
//! ```
//! use console_capture::{console_error, console_log, Capture, Opts};
//!
//! let errors = Capture::new(Opts::all(false).error(true));
//! errors.start();
//! console_error!("disk", "full");
//! console_log!("not captured, printed as usual");
//! errors.stop();
//!
//! assert_eq!(errors.stderr(), "disk full\n");
//! ```

mod capture;
pub mod channel;
pub mod console;
mod error;
pub mod handlers;
pub mod logger;
pub mod multiplexer;
mod oneshot;
mod opts;
mod persist;
pub mod session;
mod sink;

pub use capture::Capture;
pub use channel::{Channel, Contents, Stream};
pub use console::{Console, Payload, RawWriter};
pub use error::{CaptureError, Result};
pub use handlers::{Handler, HandlerId};
pub use multiplexer::{Activation, Multiplexer};
pub use oneshot::{capture, capture_with, redirect, redirect_with, Captured, RedirectOptions};
pub use opts::{ChannelFlags, Opts};
pub use persist::WriteOptions;
pub use session::{Buffers, Session};
pub use sink::MemorySink;
