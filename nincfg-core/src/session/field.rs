//! Editable fields, in display order.

use crate::record::{ConfigRecord, Step, ToggleFlag};
use serde::Serialize;

/// Number of editable fields.
pub const FIELD_COUNT: usize = 13;

/// One row of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    MemCardMode,
    MemCardSize,
    Widescreen,
    Progressive,
    RemoveReadLimit,
    ArcadeMode,
    CcRumble,
    SkipIpl,
    Language,
    VideoMode,
    VideoScale,
    VideoOffset,
    GamepadSlot,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Self::MemCardMode,
        Self::MemCardSize,
        Self::Widescreen,
        Self::Progressive,
        Self::RemoveReadLimit,
        Self::ArcadeMode,
        Self::CcRumble,
        Self::SkipIpl,
        Self::Language,
        Self::VideoMode,
        Self::VideoScale,
        Self::VideoOffset,
        Self::GamepadSlot,
    ];

    pub fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MemCardMode => "Memcard emulation",
            Self::MemCardSize => "Memcard size",
            Self::Widescreen => "Force widescreen",
            Self::Progressive => "Force progressive",
            Self::RemoveReadLimit => "Remove read limit",
            Self::ArcadeMode => "Arcade mode",
            Self::CcRumble => "Wiimote CC rumble",
            Self::SkipIpl => "Skip IPL",
            Self::Language => "Language",
            Self::VideoMode => "Video mode",
            Self::VideoScale => "Video scale",
            Self::VideoOffset => "Video offset",
            Self::GamepadSlot => "Wii U gamepad slot",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::MemCardMode => "Emulate memory card (you want this to be \"Single\")",
            Self::MemCardSize => "Size of the emulated memory card",
            Self::Widescreen => "Force 16:9 widescreen for 4:3 games",
            Self::Progressive => "Force progressive for interlaced games",
            Self::RemoveReadLimit => "Allows to read faster than a GCN disc drive",
            Self::ArcadeMode => "Move the C stick to insert coins",
            Self::CcRumble => "Rumble the wiimote with classic or pro controller",
            Self::SkipIpl => "Skip loading the IPL",
            Self::Language => "Game language (only for PAL)",
            Self::VideoMode => "The video mode the game renders",
            Self::VideoScale => "Video scaling. Set to \"Auto\" or \"104\"",
            Self::VideoOffset => "The offset. You want this to be 0",
            Self::GamepadSlot => "The controller the gamepad replaces",
        }
    }

    /// Apply this field's mutation. Toggles ignore the direction.
    pub fn adjust(self, record: &mut ConfigRecord, step: Step) {
        match self {
            Self::MemCardMode => record.cycle_memcard_mode(step),
            Self::MemCardSize => record.cycle_memcard_size(step),
            Self::Widescreen => record.toggle(ToggleFlag::Widescreen),
            Self::Progressive => record.toggle(ToggleFlag::Progressive),
            Self::RemoveReadLimit => record.toggle(ToggleFlag::RemoveReadLimit),
            Self::ArcadeMode => record.toggle(ToggleFlag::ArcadeMode),
            Self::CcRumble => record.toggle(ToggleFlag::CcRumble),
            Self::SkipIpl => record.toggle(ToggleFlag::SkipIpl),
            Self::Language => record.cycle_language(step),
            Self::VideoMode => record.cycle_video_mode(step),
            Self::VideoScale => record.cycle_video_scale(step),
            Self::VideoOffset => record.cycle_video_offset(step),
            Self::GamepadSlot => record.cycle_gamepad_slot(step),
        }
    }

    /// The field's current value as shown to the user.
    pub fn format_value(self, record: &ConfigRecord) -> String {
        match self {
            Self::MemCardMode => record.memcard_mode().label().to_string(),
            Self::MemCardSize => record.memcard_size().to_string(),
            Self::Widescreen => on_off(record.is_flag_set(ToggleFlag::Widescreen)),
            Self::Progressive => on_off(record.is_flag_set(ToggleFlag::Progressive)),
            Self::RemoveReadLimit => on_off(record.is_flag_set(ToggleFlag::RemoveReadLimit)),
            Self::ArcadeMode => on_off(record.is_flag_set(ToggleFlag::ArcadeMode)),
            Self::CcRumble => on_off(record.is_flag_set(ToggleFlag::CcRumble)),
            Self::SkipIpl => on_off(record.is_flag_set(ToggleFlag::SkipIpl)),
            Self::Language => record.language().to_string(),
            Self::VideoMode => record.video_mode().to_string(),
            Self::VideoScale => match record.video_scale() {
                0 => "Auto".to_string(),
                scale => scale.to_string(),
            },
            Self::VideoOffset => record.video_offset().to_string(),
            Self::GamepadSlot => match record.gamepad_slot() {
                Some(slot) => (slot + 1).to_string(),
                None => "None".to_string(),
            },
        }
    }
}

fn on_off(set: bool) -> String {
    let label = if set { "On" } else { "Off" };
    label.to_string()
}
