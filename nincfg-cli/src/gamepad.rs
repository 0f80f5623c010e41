// Gilrs backend for gamepad input
use crate::terminal::ExitSignal;
use anyhow::Result;
use gilrs::{Button, EventType, Gilrs};
use nincfg_core::host::InputSource;
use nincfg_core::session::EditorEvent;
use std::collections::VecDeque;

pub struct GamepadInput {
    gilrs: Gilrs,
    pending: VecDeque<EditorEvent>,
    exit: ExitSignal,
}

impl GamepadInput {
    pub fn new(exit: ExitSignal) -> Result<Self> {
        let gilrs =
            Gilrs::new().map_err(|e| anyhow::anyhow!("Failed to initialize gilrs: {}", e))?;

        for (id, gamepad) in gilrs.gamepads() {
            log::info!("Gamepad {}: {}", usize::from(id), gamepad.name());
        }

        Ok(Self {
            gilrs,
            pending: VecDeque::new(),
            exit,
        })
    }
}

/// Button to editor event. Mode is handled separately as the home button.
fn map_button(button: Button) -> Option<EditorEvent> {
    match button {
        Button::DPadUp => Some(EditorEvent::Up),
        Button::DPadDown => Some(EditorEvent::Down),
        Button::DPadLeft => Some(EditorEvent::Left),
        Button::DPadRight => Some(EditorEvent::Right),
        Button::Start => Some(EditorEvent::Confirm),
        Button::Select => Some(EditorEvent::Cancel),
        _ => None,
    }
}

impl InputSource for GamepadInput {
    fn poll_event(&mut self) -> Option<EditorEvent> {
        while let Some(gilrs::Event { event, .. }) = self.gilrs.next_event() {
            if let EventType::ButtonPressed(button, _) = event {
                if button == Button::Mode {
                    self.exit.raise();
                } else if let Some(mapped) = map_button(button) {
                    self.pending.push_back(mapped);
                }
            }
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(map_button(Button::DPadUp), Some(EditorEvent::Up));
        assert_eq!(map_button(Button::DPadRight), Some(EditorEvent::Right));
        assert_eq!(map_button(Button::Start), Some(EditorEvent::Confirm));
        assert_eq!(map_button(Button::Select), Some(EditorEvent::Cancel));
        assert_eq!(map_button(Button::South), None);
        assert_eq!(map_button(Button::Mode), None);
    }
}
