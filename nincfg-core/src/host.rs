//! Host seams and the cooperative edit loop.
//!
//! The core does no I/O. The host supplies input, a render target and process
//! lifecycle through the traits below and calls [`EditLoop::tick`] once per
//! host tick. Persisting committed bytes is left to the host.

use crate::error::{DecodeError, SessionError};
use crate::record::ConfigRecord;
use crate::session::{Action, EditSession, EditorEvent, SessionState};

/// Foreground state reported by the host each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStatus {
    Running,
    /// In the background; the loop idles without touching the record.
    Suspended,
    Exiting,
}

/// Source of abstract input events. Returns at most one event per tick.
pub trait InputSource {
    fn poll_event(&mut self) -> Option<EditorEvent>;
}

/// Receives full screens of text.
pub trait RenderSink {
    fn draw(&mut self, lines: &[String]);
}

/// Reports the host's foreground state.
pub trait LifecycleSource {
    fn poll(&mut self) -> LifecycleStatus;
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    /// The user committed; these bytes should be persisted.
    Committed(Vec<u8>),
    /// The user cancelled.
    Discarded,
    /// The host is shutting down; nothing was persisted.
    Exited,
}

/// Drives an [`EditSession`] from host input, one event per tick.
pub struct EditLoop {
    session: EditSession,
    redraw: bool,
    suspended: bool,
}

impl EditLoop {
    pub fn new(session: EditSession) -> Self {
        Self {
            session,
            redraw: true,
            suspended: false,
        }
    }

    /// Decode the record and start a loop on it.
    pub fn open(bytes: &[u8]) -> Result<Self, DecodeError> {
        EditSession::load(bytes).map(Self::new)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn tick(
        &mut self,
        lifecycle: &mut dyn LifecycleSource,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Result<LoopStatus, SessionError> {
        match lifecycle.poll() {
            LifecycleStatus::Exiting => {
                if self.session.state() == SessionState::Editing {
                    self.session.discard()?;
                }
                return Ok(LoopStatus::Exited);
            }
            LifecycleStatus::Suspended => {
                if !self.suspended {
                    log::debug!("Edit loop suspended");
                    self.suspended = true;
                }
                return Ok(LoopStatus::Continue);
            }
            LifecycleStatus::Running => {
                if self.suspended {
                    log::debug!("Edit loop resumed");
                    self.suspended = false;
                    self.redraw = true;
                }
            }
        }

        if let Some(event) = input.poll_event() {
            match self.session.handle(event)? {
                Action::Redraw => self.redraw = true,
                Action::CommitAndExit(bytes) => return Ok(LoopStatus::Committed(bytes)),
                Action::DiscardAndExit => return Ok(LoopStatus::Discarded),
                Action::None => {}
            }
        }

        if self.redraw {
            self.redraw = false;
            sink.draw(&self.session.render()?);
        }

        Ok(LoopStatus::Continue)
    }
}

/// Decode a record read by the host, logging any fixups.
pub fn load(bytes: &[u8]) -> Result<ConfigRecord, DecodeError> {
    ConfigRecord::decode(bytes)
}

/// Bytes for the host to persist.
pub fn store(record: &ConfigRecord) -> Vec<u8> {
    record.encode()
}

/// Screen shown when the record could not be loaded.
pub fn decode_error_screen(err: &DecodeError) -> Vec<String> {
    vec![err.to_string(), String::new(), "Press HOME to exit".to_string()]
}
