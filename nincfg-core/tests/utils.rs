//! Test Utilities
//!
//! Builders for raw `nincfg.bin` images, including ones no well-behaved
//! writer would produce, and helpers for driving sessions.

#![allow(dead_code)]

use nincfg_core::record::layout::{self, flag_bits, video_bits, PATH_LEN, RECORD_SIZE};
use nincfg_core::session::{CursorMove, EditSession, Field};
use nincfg_core::ConfigRecord;

/// Pack a display code and a 1-based standard slot the way the loader does.
pub fn video_raw(display_code: u16, slot: u32) -> u32 {
    (u32::from(display_code + 1) << video_bits::DISPLAY_SHIFT) | slot
}

/// Raw record image with setters for every field.
#[derive(Clone)]
pub struct RawRecord {
    data: [u8; RECORD_SIZE],
}

impl RawRecord {
    /// A record that decodes without any fixup: memory card emulation on,
    /// video Auto, language Auto, gamepad in slot 1.
    pub fn new() -> Self {
        Self { data: [0u8; RECORD_SIZE] }
            .u32_at(layout::OFFSET_MAGIC, layout::MAGIC)
            .u32_at(layout::OFFSET_VERSION, layout::SUPPORTED_VERSION)
            .config(flag_bits::MEMCARD_EMU)
            .video_mode(video_raw(video_bits::DISPLAY_CODE_AUTO, 0))
            .language(layout::LANGUAGE_AUTO_RAW)
    }

    fn u32_at(mut self, offset: usize, value: u32) -> Self {
        self.data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        self
    }

    pub fn magic(self, value: u32) -> Self {
        self.u32_at(layout::OFFSET_MAGIC, value)
    }

    pub fn version(self, value: u32) -> Self {
        self.u32_at(layout::OFFSET_VERSION, value)
    }

    pub fn config(self, bits: u32) -> Self {
        self.u32_at(layout::OFFSET_CONFIG, bits)
    }

    pub fn video_mode(self, raw: u32) -> Self {
        self.u32_at(layout::OFFSET_VIDEO_MODE, raw)
    }

    pub fn language(self, raw: u32) -> Self {
        self.u32_at(layout::OFFSET_LANGUAGE, raw)
    }

    pub fn game_path(mut self, path: &str) -> Self {
        let len = path.len().min(PATH_LEN);
        self.data[layout::OFFSET_GAME_PATH..layout::OFFSET_GAME_PATH + len]
            .copy_from_slice(&path.as_bytes()[..len]);
        self
    }

    pub fn cheat_path(mut self, path: &str) -> Self {
        let len = path.len().min(PATH_LEN);
        self.data[layout::OFFSET_CHEAT_PATH..layout::OFFSET_CHEAT_PATH + len]
            .copy_from_slice(&path.as_bytes()[..len]);
        self
    }

    pub fn padding(mut self, bytes: [u8; 2]) -> Self {
        self.data[layout::OFFSET_PADDING..layout::OFFSET_PADDING + 2].copy_from_slice(&bytes);
        self
    }

    pub fn max_pads(self, value: u32) -> Self {
        self.u32_at(layout::OFFSET_MAX_PADS, value)
    }

    pub fn game_id(self, value: u32) -> Self {
        self.u32_at(layout::OFFSET_GAME_ID, value)
    }

    pub fn memcard(mut self, code: u8) -> Self {
        self.data[layout::OFFSET_MEM_CARD] = code;
        self
    }

    pub fn video_scale(mut self, scale: u8) -> Self {
        self.data[layout::OFFSET_VIDEO_SCALE] = scale;
        self
    }

    pub fn video_offset(mut self, offset: i8) -> Self {
        self.data[layout::OFFSET_VIDEO_OFFSET] = offset as u8;
        self
    }

    pub fn network_profile(mut self, profile: u8) -> Self {
        self.data[layout::OFFSET_NETWORK_PROFILE] = profile;
        self
    }

    pub fn gamepad_slot(self, slot: u32) -> Self {
        self.u32_at(layout::OFFSET_GAMEPAD_SLOT, slot)
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    pub fn decode(&self) -> ConfigRecord {
        ConfigRecord::decode(&self.data).expect("test record should decode")
    }
}

/// Read a big-endian u32 out of encoded bytes.
pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(buf)
}

/// Open a session with the cursor on `field`.
pub fn session_at(record: ConfigRecord, field: Field) -> EditSession {
    let mut session = EditSession::new(record);
    while session.selected_field() != field {
        session.move_cursor(CursorMove::Down).unwrap();
    }
    session
}

/// Assert the cross-field invariants hold.
pub fn assert_invariants(record: &ConfigRecord, message: &str) {
    let flags = record.flags();
    assert!(
        !flags.memcard_multi || flags.memcard_emu,
        "{}: multi-card set without memory card emulation",
        message
    );
    assert_eq!(
        flags.force_wide, flags.wiiu_wide,
        "{}: widescreen flags differ",
        message
    );
    assert_eq!(
        flags.force_progressive,
        record.video_mode().is_progressive(),
        "{}: progressive flag and video bit differ",
        message
    );
}
