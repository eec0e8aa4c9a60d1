// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bridge from the `log` facade to the console channels.
//!
//! With [`init`] installed, `log::warn!` and friends become named-log calls
//! on the process-wide console and can be captured like any other output.

use crate::channel::Channel;
use crate::console::{self, Console, Payload};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Arc;

/// Named-log channel a record of `level` is written to.
pub fn channel_for(level: Level) -> Channel {
    match level {
        Level::Error => Channel::Error,
        Level::Warn => Channel::Warn,
        Level::Info => Channel::Info,
        Level::Debug => Channel::Debug,
        Level::Trace => Channel::Trace,
    }
}

/// `log::Log` implementation writing each record's message to a console.
pub struct ConsoleLogger {
    console: Arc<Console>,
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(console: Arc<Console>, level: LevelFilter) -> Self {
        Self { console, level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.console
            .invoke(channel_for(record.level()), &Payload::Args(&[record.args()]));
    }

    fn flush(&self) {}
}

/// Install a [`ConsoleLogger`] over the process-wide console.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = ConsoleLogger::new(Arc::clone(console::global()), level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
