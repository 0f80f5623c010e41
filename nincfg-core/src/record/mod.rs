//! Config Record
//!
//! Decoded, normalized form of the loader's `nincfg.bin` record.
//!
//! # Lifecycle
//! A record is decoded once from host-supplied bytes, mutated in place by an
//! edit session and encoded back only when the user commits.
//!
//! # Normalization
//! Decoding never rejects a record for illegal field combinations. Instead:
//! 1. Options this host cannot use are cleared (see [`HostDisabledFlag`], the
//!    cheat and game paths, game id, network profile and max pads).
//! 2. Out-of-range values of editable fields are pulled back into range.
//! 3. Cross-field invariants are restored ([`ConfigRecord::enforce_invariants`]).
//!
//! Every change is reported as a [`Fixup`]. Normalizing a normalized record is a no-op.

pub mod flags;
pub mod language;
pub mod layout;
pub mod memcard;
pub mod video;

pub use flags::{ConfigFlags, HostDisabledFlag};
pub use language::Language;
pub use memcard::{MemCardSize, MEM_CARD_MAX};
pub use video::{DisplayMode, ForceStandard, VideoFixup, VideoMode};

use crate::error::DecodeError;
use layout::{flag_bits, read_path, read_u32_be, write_u32_be, PATH_LEN, RECORD_SIZE};
use serde::Serialize;
use std::fmt;

/// Direction of a selector step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Back,
    Forward,
}

/// Video scale meaning "let the loader decide".
pub const VIDEO_SCALE_AUTO: u8 = 0;
pub const VIDEO_SCALE_MIN: u8 = 40;
pub const VIDEO_SCALE_MAX: u8 = 120;
const VIDEO_SCALE_STEP: u8 = 2;

/// Video offset range is `-VIDEO_OFFSET_LIMIT..=VIDEO_OFFSET_LIMIT`.
pub const VIDEO_OFFSET_LIMIT: i8 = 20;

/// Memory card emulation, a three-state view over two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemCardMode {
    Off,
    Single,
    Multi,
}

impl MemCardMode {
    pub fn step(self, step: Step) -> Self {
        match (self, step) {
            (Self::Off, Step::Forward) => Self::Single,
            (Self::Single, Step::Forward) => Self::Multi,
            (Self::Multi, Step::Forward) => Self::Off,
            (Self::Off, Step::Back) => Self::Multi,
            (Self::Multi, Step::Back) => Self::Single,
            (Self::Single, Step::Back) => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Single => "Single",
            Self::Multi => "Multi",
        }
    }
}

/// Simple on/off options, toggled by XOR-ing their mask into the flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleFlag {
    /// Toggles the force-wide flag and its Wii U twin together.
    Widescreen,
    Progressive,
    RemoveReadLimit,
    ArcadeMode,
    CcRumble,
    SkipIpl,
}

impl ToggleFlag {
    pub fn mask(self) -> u32 {
        match self {
            Self::Widescreen => flag_bits::FORCE_WIDE | flag_bits::WIIU_WIDE,
            Self::Progressive => flag_bits::FORCE_PROG,
            Self::RemoveReadLimit => flag_bits::REMOVE_READ_LIMIT,
            Self::ArcadeMode => flag_bits::ARCADE_MODE,
            Self::CcRumble => flag_bits::CC_RUMBLE,
            Self::SkipIpl => flag_bits::SKIP_IPL,
        }
    }
}

/// A change made while normalizing a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixup {
    HostFlagCleared(HostDisabledFlag),
    CheatPathCleared,
    GamePathCleared,
    GameIdCleared,
    NetworkProfileCleared,
    MaxPadsCleared,
    WidescreenSynced,
    MultiCardDropped,
    ProgressiveSynced,
    Video(VideoFixup),
    LanguageReset { raw: u32 },
    MemCardClamped { raw: u8 },
    VideoScaleAdjusted { raw: u8, value: u8 },
    VideoOffsetClamped { raw: i8, value: i8 },
    GamepadSlotReset { raw: u32 },
}

impl Fixup {
    /// True for repairs of an illegal on-disk state, false for routine host clears.
    pub fn is_repair(&self) -> bool {
        !matches!(
            self,
            Self::HostFlagCleared(_)
                | Self::CheatPathCleared
                | Self::GamePathCleared
                | Self::GameIdCleared
                | Self::NetworkProfileCleared
                | Self::MaxPadsCleared
        )
    }
}

impl fmt::Display for Fixup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostFlagCleared(flag) => write!(f, "cleared {} flag (unavailable on this host)", flag.name()),
            Self::CheatPathCleared => write!(f, "cleared cheat path"),
            Self::GamePathCleared => write!(f, "cleared auto-boot game path"),
            Self::GameIdCleared => write!(f, "cleared auto-boot game id"),
            Self::NetworkProfileCleared => write!(f, "cleared network profile"),
            Self::MaxPadsCleared => write!(f, "cleared max pads"),
            Self::WidescreenSynced => write!(f, "synchronized the two widescreen flags"),
            Self::MultiCardDropped => write!(f, "dropped multi-card mode without memory card emulation"),
            Self::ProgressiveSynced => write!(f, "synchronized progressive video bit with the progressive flag"),
            Self::Video(fixup) => write!(f, "{}", fixup),
            Self::LanguageReset { raw } => write!(f, "unknown language 0x{:08X} reset to Auto", raw),
            Self::MemCardClamped { raw } => write!(f, "memory card size code {} clamped to {}", raw, MEM_CARD_MAX),
            Self::VideoScaleAdjusted { raw, value } => write!(f, "video scale {} adjusted to {}", raw, value),
            Self::VideoOffsetClamped { raw, value } => write!(f, "video offset {} clamped to {}", raw, value),
            Self::GamepadSlotReset { raw } => write!(f, "gamepad slot {} reset to none", raw),
        }
    }
}

/// The loader configuration record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    flags: ConfigFlags,
    video_mode: VideoMode,
    language: Language,
    game_path: [u8; PATH_LEN],
    cheat_path: [u8; PATH_LEN],
    padding: [u8; 2],
    max_pads: u32,
    game_id: u32,
    memcard_size: MemCardSize,
    video_scale: u8,
    video_offset: i8,
    network_profile: u8,
    gamepad_slot: u32,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            flags: ConfigFlags {
                memcard_emu: true,
                ..ConfigFlags::default()
            },
            video_mode: VideoMode::default(),
            language: Language::Auto,
            game_path: [0; PATH_LEN],
            cheat_path: [0; PATH_LEN],
            padding: [0; 2],
            max_pads: 0,
            game_id: 0,
            memcard_size: MemCardSize::default(),
            video_scale: VIDEO_SCALE_AUTO,
            video_offset: 0,
            network_profile: 0,
            gamepad_slot: 0,
        }
    }
}

impl ConfigRecord {
    /// Decode and normalize a record.
    ///
    /// # Errors
    /// - [`DecodeError::SizeMismatch`] if `bytes` is not exactly one record long
    /// - [`DecodeError::BadMagic`] if the magic word is wrong
    /// - [`DecodeError::UnsupportedVersion`] for any version but the supported one
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (record, fixups) = Self::decode_with_report(bytes)?;
        for fixup in &fixups {
            if fixup.is_repair() {
                log::warn!("nincfg: {}", fixup);
            } else {
                log::info!("nincfg: {}", fixup);
            }
        }
        Ok(record)
    }

    /// Like [`ConfigRecord::decode`], also returning every normalization fixup applied.
    pub fn decode_with_report(bytes: &[u8]) -> Result<(Self, Vec<Fixup>), DecodeError> {
        let data: &[u8; RECORD_SIZE] =
            bytes.try_into().map_err(|_| DecodeError::SizeMismatch {
                expected: RECORD_SIZE,
                actual: bytes.len(),
            })?;

        let magic = read_u32_be(data, layout::OFFSET_MAGIC);
        if magic != layout::MAGIC {
            return Err(DecodeError::BadMagic { found: magic });
        }

        let version = read_u32_be(data, layout::OFFSET_VERSION);
        if version != layout::SUPPORTED_VERSION {
            return Err(DecodeError::UnsupportedVersion {
                found: version,
                supported: layout::SUPPORTED_VERSION,
            });
        }

        let mut fixups = Vec::new();

        let (video_mode, video_fixups) =
            VideoMode::decode(read_u32_be(data, layout::OFFSET_VIDEO_MODE));
        fixups.extend(video_fixups.into_iter().map(Fixup::Video));

        let raw_language = read_u32_be(data, layout::OFFSET_LANGUAGE);
        let language = Language::from_raw(raw_language).unwrap_or_else(|| {
            fixups.push(Fixup::LanguageReset { raw: raw_language });
            Language::Auto
        });

        let raw_memcard = data[layout::OFFSET_MEM_CARD];
        let memcard_size = MemCardSize::new(raw_memcard).unwrap_or_else(|| {
            fixups.push(Fixup::MemCardClamped { raw: raw_memcard });
            MemCardSize::new(MEM_CARD_MAX).unwrap_or_default()
        });

        let raw_scale = data[layout::OFFSET_VIDEO_SCALE];
        let video_scale = normalize_video_scale(raw_scale);
        if video_scale != raw_scale {
            fixups.push(Fixup::VideoScaleAdjusted { raw: raw_scale, value: video_scale });
        }

        let raw_offset = data[layout::OFFSET_VIDEO_OFFSET] as i8;
        let video_offset = raw_offset.clamp(-VIDEO_OFFSET_LIMIT, VIDEO_OFFSET_LIMIT);
        if video_offset != raw_offset {
            fixups.push(Fixup::VideoOffsetClamped { raw: raw_offset, value: video_offset });
        }

        let raw_slot = read_u32_be(data, layout::OFFSET_GAMEPAD_SLOT);
        let gamepad_slot = if raw_slot > layout::MAX_PAD {
            fixups.push(Fixup::GamepadSlotReset { raw: raw_slot });
            layout::MAX_PAD
        } else {
            raw_slot
        };

        let mut record = Self {
            flags: ConfigFlags::from_bits(read_u32_be(data, layout::OFFSET_CONFIG)),
            video_mode,
            language,
            game_path: read_path(data, layout::OFFSET_GAME_PATH),
            cheat_path: read_path(data, layout::OFFSET_CHEAT_PATH),
            padding: [data[layout::OFFSET_PADDING], data[layout::OFFSET_PADDING + 1]],
            max_pads: read_u32_be(data, layout::OFFSET_MAX_PADS),
            game_id: read_u32_be(data, layout::OFFSET_GAME_ID),
            memcard_size,
            video_scale,
            video_offset,
            network_profile: data[layout::OFFSET_NETWORK_PROFILE],
            gamepad_slot,
        };

        fixups.extend(record.normalize());
        Ok((record, fixups))
    }

    /// Encode to exactly one record's worth of bytes.
    ///
    /// `Language::Auto` is written as the on-disk sentinel.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = [0u8; RECORD_SIZE];
        write_u32_be(&mut data, layout::OFFSET_MAGIC, layout::MAGIC);
        write_u32_be(&mut data, layout::OFFSET_VERSION, layout::SUPPORTED_VERSION);
        write_u32_be(&mut data, layout::OFFSET_CONFIG, self.flags.to_bits());
        write_u32_be(&mut data, layout::OFFSET_VIDEO_MODE, self.video_mode.to_raw());
        write_u32_be(&mut data, layout::OFFSET_LANGUAGE, self.language.to_raw());
        data[layout::OFFSET_GAME_PATH..layout::OFFSET_GAME_PATH + PATH_LEN]
            .copy_from_slice(&self.game_path);
        data[layout::OFFSET_CHEAT_PATH..layout::OFFSET_CHEAT_PATH + PATH_LEN]
            .copy_from_slice(&self.cheat_path);
        data[layout::OFFSET_PADDING..layout::OFFSET_PADDING + 2].copy_from_slice(&self.padding);
        write_u32_be(&mut data, layout::OFFSET_MAX_PADS, self.max_pads);
        write_u32_be(&mut data, layout::OFFSET_GAME_ID, self.game_id);
        data[layout::OFFSET_MEM_CARD] = self.memcard_size.code();
        data[layout::OFFSET_VIDEO_SCALE] = self.video_scale;
        data[layout::OFFSET_VIDEO_OFFSET] = self.video_offset as u8;
        data[layout::OFFSET_NETWORK_PROFILE] = self.network_profile;
        write_u32_be(&mut data, layout::OFFSET_GAMEPAD_SLOT, self.gamepad_slot);
        data.to_vec()
    }

    /// Clear host-disabled options and restore the cross-field invariants.
    pub fn normalize(&mut self) -> Vec<Fixup> {
        let mut fixups: Vec<Fixup> = self
            .flags
            .clear_host_disabled()
            .into_iter()
            .map(Fixup::HostFlagCleared)
            .collect();

        if self.cheat_path.iter().any(|&b| b != 0) {
            self.cheat_path = [0; PATH_LEN];
            fixups.push(Fixup::CheatPathCleared);
        }
        if self.game_path.iter().any(|&b| b != 0) {
            self.game_path = [0; PATH_LEN];
            fixups.push(Fixup::GamePathCleared);
        }
        if self.game_id != 0 {
            self.game_id = 0;
            fixups.push(Fixup::GameIdCleared);
        }
        if self.network_profile != 0 {
            self.network_profile = 0;
            fixups.push(Fixup::NetworkProfileCleared);
        }
        if self.max_pads != 0 {
            self.max_pads = 0;
            fixups.push(Fixup::MaxPadsCleared);
        }

        fixups.extend(self.enforce_invariants());
        fixups
    }

    /// Restore the invariants between dependent fields:
    /// - multi-card mode requires memory card emulation
    /// - the force-wide flag and its Wii U twin are equal (either set turns both on)
    /// - the progressive video bit mirrors the progressive flag
    pub fn enforce_invariants(&mut self) -> Vec<Fixup> {
        let mut fixups = Vec::new();

        if self.flags.force_wide != self.flags.wiiu_wide {
            self.flags.force_wide = true;
            self.flags.wiiu_wide = true;
            fixups.push(Fixup::WidescreenSynced);
        }

        if self.flags.memcard_multi && !self.flags.memcard_emu {
            self.flags.memcard_multi = false;
            fixups.push(Fixup::MultiCardDropped);
        }

        if self.video_mode.is_progressive() != self.flags.force_progressive {
            self.video_mode.set_progressive(self.flags.force_progressive);
            fixups.push(Fixup::ProgressiveSynced);
        }

        fixups
    }

    pub fn flags(&self) -> &ConfigFlags {
        &self.flags
    }

    pub fn is_flag_set(&self, flag: ToggleFlag) -> bool {
        self.flags.to_bits() & flag.mask() != 0
    }

    pub fn toggle(&mut self, flag: ToggleFlag) {
        self.flags = ConfigFlags::from_bits(self.flags.to_bits() ^ flag.mask());
        self.enforce_invariants();
    }

    pub fn memcard_mode(&self) -> MemCardMode {
        match (self.flags.memcard_emu, self.flags.memcard_multi) {
            (false, _) => MemCardMode::Off,
            (true, false) => MemCardMode::Single,
            (true, true) => MemCardMode::Multi,
        }
    }

    pub fn set_memcard_mode(&mut self, mode: MemCardMode) {
        self.flags.memcard_emu = mode != MemCardMode::Off;
        self.flags.memcard_multi = mode == MemCardMode::Multi;
        self.enforce_invariants();
    }

    pub fn cycle_memcard_mode(&mut self, step: Step) {
        self.set_memcard_mode(self.memcard_mode().step(step));
    }

    pub fn memcard_size(&self) -> MemCardSize {
        self.memcard_size
    }

    pub fn cycle_memcard_size(&mut self, step: Step) {
        self.memcard_size = match step {
            Step::Forward => self.memcard_size.next(),
            Step::Back => self.memcard_size.prev(),
        };
        self.enforce_invariants();
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cycle_language(&mut self, step: Step) {
        self.language = match step {
            Step::Forward => self.language.next(),
            Step::Back => self.language.prev(),
        };
        self.enforce_invariants();
    }

    pub fn video_mode(&self) -> &VideoMode {
        &self.video_mode
    }

    pub fn cycle_video_mode(&mut self, step: Step) {
        self.video_mode.cycle(step);
        self.enforce_invariants();
    }

    /// Raw scale; 0 is Auto.
    pub fn video_scale(&self) -> u8 {
        self.video_scale
    }

    pub fn cycle_video_scale(&mut self, step: Step) {
        self.video_scale = match (step, self.video_scale) {
            (Step::Forward, VIDEO_SCALE_AUTO) => VIDEO_SCALE_MIN,
            (Step::Forward, VIDEO_SCALE_MAX) => VIDEO_SCALE_AUTO,
            (Step::Forward, scale) => scale + VIDEO_SCALE_STEP,
            (Step::Back, VIDEO_SCALE_AUTO) => VIDEO_SCALE_MAX,
            (Step::Back, VIDEO_SCALE_MIN) => VIDEO_SCALE_AUTO,
            (Step::Back, scale) => scale - VIDEO_SCALE_STEP,
        };
        self.enforce_invariants();
    }

    pub fn video_offset(&self) -> i8 {
        self.video_offset
    }

    pub fn cycle_video_offset(&mut self, step: Step) {
        self.video_offset = match (step, self.video_offset) {
            (Step::Forward, VIDEO_OFFSET_LIMIT) => -VIDEO_OFFSET_LIMIT,
            (Step::Forward, offset) => offset + 1,
            (Step::Back, offset) if offset == -VIDEO_OFFSET_LIMIT => VIDEO_OFFSET_LIMIT,
            (Step::Back, offset) => offset - 1,
        };
        self.enforce_invariants();
    }

    /// Zero-based controller slot replaced by the gamepad, `None` when unassigned.
    pub fn gamepad_slot(&self) -> Option<u32> {
        (self.gamepad_slot < layout::MAX_PAD).then_some(self.gamepad_slot)
    }

    pub fn cycle_gamepad_slot(&mut self, step: Step) {
        self.gamepad_slot = match (step, self.gamepad_slot) {
            (Step::Forward, slot) if slot >= layout::MAX_PAD => 0,
            (Step::Forward, slot) => slot + 1,
            (Step::Back, 0) => layout::MAX_PAD,
            (Step::Back, slot) => slot - 1,
        };
        self.enforce_invariants();
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn network_profile(&self) -> u8 {
        self.network_profile
    }

    pub fn max_pads(&self) -> u32 {
        self.max_pads
    }

    pub fn cheat_path(&self) -> &[u8; PATH_LEN] {
        &self.cheat_path
    }

    pub fn game_path(&self) -> &[u8; PATH_LEN] {
        &self.game_path
    }
}

/// Pull a raw scale into `{0} ∪ [40, 120]`, rounding odd values down.
fn normalize_video_scale(raw: u8) -> u8 {
    if raw == VIDEO_SCALE_AUTO {
        VIDEO_SCALE_AUTO
    } else {
        raw.clamp(VIDEO_SCALE_MIN, VIDEO_SCALE_MAX) & !1
    }
}
