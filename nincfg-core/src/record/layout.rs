//! Byte layout of `nincfg.bin`
//!
//! The record is written by the loader's own menu as a raw big-endian C
//! struct, so every offset here has to match it bit for bit.
//!
//! # Record Layout (version 10)
//! - `0x000` magic, `0x004` version, `0x008` config flags
//! - `0x00C` packed video mode, `0x010` language
//! - `0x014` game path, `0x113` cheat path (255 bytes each)
//! - `0x212` two bytes of struct padding
//! - `0x214` max pads, `0x218` game id
//! - `0x21C` memory card code, `0x21D` video scale, `0x21E` video offset,
//!   `0x21F` network profile
//! - `0x220` Wii U gamepad slot

/// Magic bytes identifying the record.
pub const MAGIC: u32 = 0x0107_0CF6;

/// The only record version this editor understands.
pub const SUPPORTED_VERSION: u32 = 10;

/// Total size of the record in bytes.
pub const RECORD_SIZE: usize = 0x224;

/// Length of the game and cheat path buffers.
pub const PATH_LEN: usize = 255;

/// Highest controller slot index; the value itself means "no slot".
pub const MAX_PAD: u32 = 4;

/// On-disk language value meaning "pick from the disc region".
pub const LANGUAGE_AUTO_RAW: u32 = 0xFFFF_FFFF;

pub const OFFSET_MAGIC: usize = 0x000;
pub const OFFSET_VERSION: usize = 0x004;
pub const OFFSET_CONFIG: usize = 0x008;
pub const OFFSET_VIDEO_MODE: usize = 0x00C;
pub const OFFSET_LANGUAGE: usize = 0x010;
pub const OFFSET_GAME_PATH: usize = 0x014;
pub const OFFSET_CHEAT_PATH: usize = OFFSET_GAME_PATH + PATH_LEN;
pub const OFFSET_PADDING: usize = OFFSET_CHEAT_PATH + PATH_LEN;
pub const OFFSET_MAX_PADS: usize = 0x214;
pub const OFFSET_GAME_ID: usize = 0x218;
pub const OFFSET_MEM_CARD: usize = 0x21C;
pub const OFFSET_VIDEO_SCALE: usize = 0x21D;
pub const OFFSET_VIDEO_OFFSET: usize = 0x21E;
pub const OFFSET_NETWORK_PROFILE: usize = 0x21F;
pub const OFFSET_GAMEPAD_SLOT: usize = 0x220;

/// Config flag bits.
pub mod flag_bits {
    pub const CHEATS: u32 = 1 << 0;
    pub const DEBUGGER: u32 = 1 << 1;
    pub const DEBUG_WAIT: u32 = 1 << 2;
    pub const MEMCARD_EMU: u32 = 1 << 3;
    pub const CHEAT_PATH: u32 = 1 << 4;
    pub const FORCE_WIDE: u32 = 1 << 5;
    pub const FORCE_PROG: u32 = 1 << 6;
    pub const AUTO_BOOT: u32 = 1 << 7;
    pub const REMOVE_READ_LIMIT: u32 = 1 << 8;
    pub const OS_REPORT: u32 = 1 << 9;
    pub const USB: u32 = 1 << 10;
    pub const LED: u32 = 1 << 11;
    pub const LOG: u32 = 1 << 12;
    pub const MC_MULTI: u32 = 1 << 13;
    pub const NATIVE_SI: u32 = 1 << 14;
    pub const WIIU_WIDE: u32 = 1 << 15;
    pub const ARCADE_MODE: u32 = 1 << 16;
    pub const CC_RUMBLE: u32 = 1 << 17;
    pub const SKIP_IPL: u32 = 1 << 18;
    pub const BBA_EMU: u32 = 1 << 19;

    /// Every bit this editor gives a name to.
    pub const KNOWN: u32 = CHEATS
        | DEBUGGER
        | DEBUG_WAIT
        | MEMCARD_EMU
        | FORCE_WIDE
        | FORCE_PROG
        | AUTO_BOOT
        | REMOVE_READ_LIMIT
        | OS_REPORT
        | USB
        | LED
        | LOG
        | MC_MULTI
        | NATIVE_SI
        | WIIU_WIDE
        | ARCADE_MODE
        | CC_RUMBLE
        | SKIP_IPL
        | BBA_EMU;
}

/// Packed video mode bits.
pub mod video_bits {
    /// Low-half nibble holding the 1-based force standard.
    pub const FORCE_MASK: u32 = 0x0000_000F;
    /// Progressive output requested.
    pub const PROG: u32 = 1 << 4;
    /// High half holding the 1-based display code.
    pub const DISPLAY_SHIFT: u32 = 16;

    pub const DISPLAY_CODE_AUTO: u16 = 0;
    pub const DISPLAY_CODE_FORCE: u16 = 1;
    pub const DISPLAY_CODE_NONE: u16 = 2;
    pub const DISPLAY_CODE_FORCE_DF: u16 = 4;
}

/// Read a big-endian u32 at a fixed offset of the record.
#[inline]
pub fn read_u32_be(data: &[u8; RECORD_SIZE], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&data[offset..offset + 4]);
    u32::from_be_bytes(buf)
}

/// Write a big-endian u32 at a fixed offset of the record.
#[inline]
pub fn write_u32_be(data: &mut [u8; RECORD_SIZE], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

/// Copy one of the fixed path buffers out of the record.
pub fn read_path(data: &[u8; RECORD_SIZE], offset: usize) -> [u8; PATH_LEN] {
    let mut path = [0u8; PATH_LEN];
    path.copy_from_slice(&data[offset..offset + PATH_LEN]);
    path
}
