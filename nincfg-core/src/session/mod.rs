//! Edit Session
//!
//! Cursor-driven editing of a single [`ConfigRecord`].
//!
//! # State Machine
//! - `Editing` (initial): cursor moves, field adjustments and snapshots are allowed.
//! - `Closed` (terminal): reached through [`EditSession::commit`] or
//!   [`EditSession::discard`]. Every further operation fails with
//!   [`SessionError::Closed`].
//!
//! The session owns its record exclusively for its whole lifetime.

pub mod event;
pub mod field;

pub use event::{Action, Adjust, CursorMove, EditorEvent};
pub use field::{Field, FIELD_COUNT};

use crate::error::{DecodeError, SessionError};
use crate::record::ConfigRecord;
use serde::Serialize;

/// Width of the label column, colon included.
const LABEL_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Closed,
}

/// One row of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub selected: bool,
    pub help: &'static str,
}

/// An interactive editing session over one record.
#[derive(Debug)]
pub struct EditSession {
    record: ConfigRecord,
    cursor: usize,
    state: SessionState,
}

impl EditSession {
    pub fn new(record: ConfigRecord) -> Self {
        Self {
            record,
            cursor: 0,
            state: SessionState::Editing,
        }
    }

    /// Decode `bytes` and open a session on the result.
    pub fn load(bytes: &[u8]) -> Result<Self, DecodeError> {
        ConfigRecord::decode(bytes).map(Self::new)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.cursor]
    }

    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    /// Move the cursor with wraparound. The record is not touched.
    pub fn move_cursor(&mut self, direction: CursorMove) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.cursor = match direction {
            CursorMove::Down => (self.cursor + 1) % FIELD_COUNT,
            CursorMove::Up => (self.cursor + FIELD_COUNT - 1) % FIELD_COUNT,
        };
        Ok(())
    }

    /// Change the selected field by one step.
    pub fn adjust_field(&mut self, direction: Adjust) -> Result<(), SessionError> {
        self.ensure_editing()?;
        let field = self.selected_field();
        field.adjust(&mut self.record, direction.into());
        log::debug!(
            "{} -> {}",
            field.label(),
            field.format_value(&self.record)
        );
        Ok(())
    }

    /// Every field in display order, with its formatted value.
    pub fn snapshot(&self) -> Result<Vec<FieldView>, SessionError> {
        self.ensure_editing()?;
        Ok(Field::ALL
            .iter()
            .enumerate()
            .map(|(index, &field)| FieldView {
                field,
                label: field.label(),
                value: field.format_value(&self.record),
                selected: index == self.cursor,
                help: field.help(),
            })
            .collect())
    }

    /// Screen lines: one per field, a blank line, then the selected field's help.
    pub fn render(&self) -> Result<Vec<String>, SessionError> {
        let rows = self.snapshot()?;
        let mut lines: Vec<String> = rows.iter().map(format_row).collect();
        lines.push(String::new());
        lines.push(self.selected_field().help().to_string());
        Ok(lines)
    }

    /// Encode the record and close the session.
    pub fn commit(&mut self) -> Result<Vec<u8>, SessionError> {
        self.ensure_editing()?;
        self.state = SessionState::Closed;
        log::info!("Edit session committed");
        Ok(self.record.encode())
    }

    /// Close the session without encoding.
    pub fn discard(&mut self) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.state = SessionState::Closed;
        log::info!("Edit session discarded");
        Ok(())
    }

    /// Map one input event to its operation.
    pub fn handle(&mut self, event: EditorEvent) -> Result<Action, SessionError> {
        match event {
            EditorEvent::Up => self.move_cursor(CursorMove::Up).map(|()| Action::Redraw),
            EditorEvent::Down => self.move_cursor(CursorMove::Down).map(|()| Action::Redraw),
            EditorEvent::Left => self.adjust_field(Adjust::Left).map(|()| Action::Redraw),
            EditorEvent::Right => self.adjust_field(Adjust::Right).map(|()| Action::Redraw),
            EditorEvent::Confirm => self.commit().map(Action::CommitAndExit),
            EditorEvent::Cancel => self.discard().map(|()| Action::DiscardAndExit),
        }
    }
}

fn format_row(row: &FieldView) -> String {
    let marker = if row.selected { "->" } else { "  " };
    let label = format!("{}:", row.label);
    format!("{} {:<width$}<{}>", marker, label, row.value, width = LABEL_WIDTH)
}
