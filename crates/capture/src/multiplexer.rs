// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output-interception multiplexer.
//!
//! Several capture sessions may be active at once over the same
//! [`Console`]. The multiplexer owns every rebinding of the console's
//! channels: while at least one session is active each present channel is
//! bound to an interceptor that fans the call out to the active sessions.
//!
//! For a call on channel `c`:
//! - every active session whose flag for `c` is set gets the text appended
//!   to its stream buffer and to `output`;
//! - the channel's original implementation runs exactly once if no active
//!   session claimed the call, and not at all otherwise. A claim by any
//!   session suppresses the real destination for all of them.
//!
//! Interceptors always wrap the implementation recorded the first time a
//! channel was patched, never a previous interceptor, so reinstalling never
//! stacks wrappers. When the last session leaves, every channel gets that
//! recorded original back.
//!
//! The active set lives with the console, so separate [`Multiplexer`]
//! handles over one console never record each other's interceptors.

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::console::{self, Console, Implementation, Payload};
use crate::session::Session;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

#[derive(Default)]
pub(crate) struct State {
    sessions: Vec<Session>,
    originals: [Option<Implementation>; CHANNEL_COUNT],
    installed: Vec<Channel>,
}

/// Active-set state shared by every multiplexer over one console.
pub(crate) type Shared = Arc<Mutex<State>>;

/// Fans channel calls out to the active capture sessions.
///
/// A console has exactly one active set: every multiplexer built over the
/// same console, and every clone, shares it.
#[derive(Clone)]
pub struct Multiplexer {
    console: Arc<Console>,
    state: Shared,
}

impl Multiplexer {
    pub fn new(console: Arc<Console>) -> Self {
        let state = console.multiplexer_state();
        Self { console, state }
    }

    /// Console whose channels this multiplexer intercepts.
    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    /// Add a session to the active set and reinstall interceptors.
    ///
    /// Activating an already active session only reinstalls.
    pub fn activate(&self, session: &Session) {
        let mut state = self.state.lock();
        if !state.sessions.contains(session) {
            state.sessions.push(session.clone());
        }
        let installed = self.install(&mut state);
        let active = state.sessions.len();
        drop(state);

        trace!(channels = installed, "interceptors installed");
        debug!(session = session.id(), active, "capture session activated");
    }

    /// Remove a session from the active set.
    ///
    /// Interceptors are reinstalled while other sessions remain; removing
    /// the last one restores every channel. Unknown sessions are ignored.
    pub fn deactivate(&self, session: &Session) {
        let mut state = self.state.lock();
        let Some(position) = state.sessions.iter().position(|s| s == session) else {
            return;
        };
        state.sessions.remove(position);

        let active = state.sessions.len();
        if active == 0 {
            let restored = self.uninstall(&mut state);
            drop(state);
            trace!(channels = restored, "original channels restored");
        } else {
            let installed = self.install(&mut state);
            drop(state);
            trace!(channels = installed, "interceptors installed");
        }
        debug!(session = session.id(), active, "capture session deactivated");
    }

    /// Activate `session` until the returned guard is dropped.
    pub fn scope(&self, session: &Session) -> Activation {
        self.activate(session);
        Activation {
            multiplexer: self.clone(),
            session: session.clone(),
        }
    }

    pub fn is_active(&self, session: &Session) -> bool {
        self.state.lock().sessions.contains(session)
    }

    pub fn active_count(&self) -> usize {
        self.state.lock().sessions.len()
    }

    /// Sessions currently active, in activation order.
    pub fn active_sessions(&self) -> Vec<Session> {
        self.state.lock().sessions.clone()
    }

    /// Whether interceptors are currently bound.
    pub fn is_installed(&self) -> bool {
        !self.state.lock().installed.is_empty()
    }

    // Runs under the state lock: rebinds slots but never calls into them,
    // and emits nothing.
    fn install(&self, state: &mut State) -> usize {
        state.installed.clear();

        for channel in Channel::ALL {
            if !self.console.contains(channel) {
                continue;
            }
            let original = match &state.originals[channel.index()] {
                Some(original) => Arc::clone(original),
                None => {
                    let Some(current) = self.console.get(channel) else {
                        continue;
                    };
                    state.originals[channel.index()] = Some(Arc::clone(&current));
                    current
                }
            };

            let interceptor = interceptor(channel, Arc::downgrade(&self.state), original);
            self.console.replace(channel, Some(interceptor));
            state.installed.push(channel);
        }
        state.installed.len()
    }

    fn uninstall(&self, state: &mut State) -> usize {
        let installed = std::mem::take(&mut state.installed);
        for &channel in &installed {
            self.console.replace(channel, state.originals[channel.index()].clone());
        }
        installed.len()
    }
}

/// Guard returned by [`Multiplexer::scope`]; deactivates on drop.
#[must_use = "the session is deactivated when the guard is dropped"]
pub struct Activation {
    multiplexer: Multiplexer,
    session: Session,
}

impl Activation {
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.multiplexer.deactivate(&self.session);
    }
}

fn interceptor(
    channel: Channel,
    state: Weak<Mutex<State>>,
    original: Implementation,
) -> Implementation {
    Arc::new(move |payload: &Payload<'_>| {
        // Snapshot the active set so sessions and handlers run unlocked.
        let sessions = match state.upgrade() {
            Some(state) => state.lock().sessions.clone(),
            None => Vec::new(),
        };
        if !dispatch(channel, payload, &sessions) {
            original(payload);
        }
    })
}

/// Append the call's text to every session claiming `channel`.
///
/// Returns whether any session claimed it.
fn dispatch(channel: Channel, payload: &Payload<'_>, sessions: &[Session]) -> bool {
    let mut text = None;
    let mut claimed = false;
    for session in sessions {
        if !session.captures(channel) {
            continue;
        }
        let text = text.get_or_insert_with(|| payload.text());
        session.record(channel.stream(), text);
        claimed = true;
    }
    claimed
}

static GLOBAL: Lazy<Multiplexer> =
    Lazy::new(|| Multiplexer::new(Arc::clone(console::global())));

/// The process-wide multiplexer over [`console::global`].
pub fn global() -> &'static Multiplexer {
    &GLOBAL
}

#[cfg(test)]
#[path = "multiplexer_tests.rs"]
mod tests;
