//! Input events and the actions the host should take in response.

use crate::record::Step;

/// One abstract input, already decoded from whatever device the host polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

/// Cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
}

/// Field adjustment direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Left,
    Right,
}

impl From<Adjust> for Step {
    fn from(adjust: Adjust) -> Self {
        match adjust {
            Adjust::Left => Step::Back,
            Adjust::Right => Step::Forward,
        }
    }
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The screen changed.
    Redraw,
    /// The user committed; persist these bytes and leave.
    CommitAndExit(Vec<u8>),
    /// The user cancelled; leave without persisting.
    DiscardAndExit,
    None,
}
