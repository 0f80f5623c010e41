//! Packed video mode.
//!
//! The loader stores two selectors in one 32-bit word:
//! - high half: display code + 1, picking how the loader treats the game's video setup
//! - low nibble: force standard index + 1, only consulted by the two force display modes
//! - bit 4: progressive output
//!
//! Display codes are the loader's index values (Auto 0, Force 1, None 2,
//! Force-DF 4), not positions in the selector order.

use super::layout::video_bits;
use super::Step;
use serde::Serialize;
use std::fmt;

/// How the loader handles the game's video mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayMode {
    Auto,
    Force,
    None,
    /// Force, with the deflicker filter disabled.
    ForceDisableFiltering,
}

impl DisplayMode {
    /// Selector order. Stepping forward from `Auto` visits `Force` first.
    pub const CYCLE: [DisplayMode; 4] = [
        Self::Auto,
        Self::Force,
        Self::None,
        Self::ForceDisableFiltering,
    ];

    fn code(self) -> u16 {
        match self {
            Self::Auto => video_bits::DISPLAY_CODE_AUTO,
            Self::Force => video_bits::DISPLAY_CODE_FORCE,
            Self::None => video_bits::DISPLAY_CODE_NONE,
            Self::ForceDisableFiltering => video_bits::DISPLAY_CODE_FORCE_DF,
        }
    }

    fn from_code(code: u16) -> Option<Self> {
        Self::CYCLE.into_iter().find(|mode| mode.code() == code)
    }

    /// Whether the force standard applies in this mode.
    pub fn is_forced(self) -> bool {
        matches!(self, Self::Force | Self::ForceDisableFiltering)
    }

    fn position(self) -> usize {
        match self {
            Self::Auto => 0,
            Self::Force => 1,
            Self::None => 2,
            Self::ForceDisableFiltering => 3,
        }
    }

    pub fn step(self, step: Step) -> Self {
        let len = Self::CYCLE.len();
        let position = match step {
            Step::Forward => (self.position() + 1) % len,
            Step::Back => (self.position() + len - 1) % len,
        };
        Self::CYCLE[position]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Force => "Force",
            Self::None => "None",
            Self::ForceDisableFiltering => "Force DF",
        }
    }
}

/// Video standard applied by the force display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForceStandard {
    Pal50,
    Pal60,
    Ntsc,
    Mpal,
}

impl ForceStandard {
    pub const ALL: [ForceStandard; 4] = [Self::Pal50, Self::Pal60, Self::Ntsc, Self::Mpal];

    /// Decode the 1-based nibble stored in the low half.
    fn from_slot(slot: u8) -> Option<Self> {
        slot.checked_sub(1)
            .and_then(|index| Self::ALL.get(usize::from(index)))
            .copied()
    }

    fn slot(self) -> u8 {
        self as u8 + 1
    }

    /// Standard at the end of the range entered when travelling in `step`'s direction.
    fn boundary(step: Step) -> Self {
        match step {
            Step::Forward => Self::Pal50,
            Step::Back => Self::Mpal,
        }
    }

    /// Step with wraparound. The flag reports whether the range wrapped.
    pub fn step(self, step: Step) -> (Self, bool) {
        match (self, step) {
            (Self::Mpal, Step::Forward) | (Self::Pal50, Step::Back) => (Self::boundary(step), true),
            (current, Step::Forward) => (Self::ALL[current as usize + 1], false),
            (current, Step::Back) => (Self::ALL[current as usize - 1], false),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pal50 => "PAL50",
            Self::Pal60 => "PAL60",
            Self::Ntsc => "NTSC",
            Self::Mpal => "MPAL",
        }
    }
}

/// Something in the raw video word that had to be repaired on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFixup {
    /// High half held a display code the loader does not define.
    UnknownDisplay { raw: u16 },
    /// Both force codes were set at once; the plain force code was dropped.
    CollapsedForceModes,
    /// A force display mode had no valid standard; PAL50 was selected.
    MissingForceStandard,
}

impl fmt::Display for VideoFixup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDisplay { raw } => {
                write!(f, "unknown video display value 0x{:04X} reset to Auto", raw)
            }
            Self::CollapsedForceModes => {
                write!(f, "video mode had both force modes set, kept Force DF")
            }
            Self::MissingForceStandard => {
                write!(f, "forced video mode had no standard, selected PAL50")
            }
        }
    }
}

/// Decoded form of the packed video word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode {
    display: DisplayMode,
    /// 1-based standard nibble, kept while not forced so it can be re-entered.
    force_slot: u8,
    progressive: bool,
    /// Low-half bits not interpreted here.
    passthrough: u16,
}

impl Default for VideoMode {
    fn default() -> Self {
        Self {
            display: DisplayMode::Auto,
            force_slot: 0,
            progressive: false,
            passthrough: 0,
        }
    }
}

impl VideoMode {
    /// Split the raw word, repairing illegal selector combinations.
    pub fn decode(raw: u32) -> (Self, Vec<VideoFixup>) {
        let mut fixups = Vec::new();

        let high = (raw >> video_bits::DISPLAY_SHIFT) as u16;
        let code = high.wrapping_sub(1);
        let display = match DisplayMode::from_code(code) {
            Some(display) => display,
            None if code == video_bits::DISPLAY_CODE_FORCE | video_bits::DISPLAY_CODE_FORCE_DF => {
                fixups.push(VideoFixup::CollapsedForceModes);
                DisplayMode::ForceDisableFiltering
            }
            None => {
                fixups.push(VideoFixup::UnknownDisplay { raw: high });
                DisplayMode::Auto
            }
        };

        let low = raw as u16;
        let mut mode = Self {
            display,
            force_slot: (u32::from(low) & video_bits::FORCE_MASK) as u8,
            progressive: u32::from(low) & video_bits::PROG != 0,
            passthrough: low & !((video_bits::FORCE_MASK | video_bits::PROG) as u16),
        };

        if display.is_forced() && ForceStandard::from_slot(mode.force_slot).is_none() {
            mode.force_slot = ForceStandard::Pal50.slot();
            fixups.push(VideoFixup::MissingForceStandard);
        }

        (mode, fixups)
    }

    pub fn to_raw(&self) -> u32 {
        let high = u32::from(self.display.code() + 1) << video_bits::DISPLAY_SHIFT;
        let progressive = if self.progressive { video_bits::PROG } else { 0 };
        high | u32::from(self.passthrough) | progressive | u32::from(self.force_slot)
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// The forced standard, present only in the force display modes.
    pub fn force_standard(&self) -> Option<ForceStandard> {
        if self.display.is_forced() {
            ForceStandard::from_slot(self.force_slot)
        } else {
            None
        }
    }

    pub fn is_progressive(&self) -> bool {
        self.progressive
    }

    pub fn set_progressive(&mut self, progressive: bool) {
        self.progressive = progressive;
    }

    /// One selector step.
    ///
    /// In a force mode the standard moves first; only when it wraps past either
    /// end does the display mode move too. Outside the force modes only the
    /// display mode moves.
    pub fn cycle(&mut self, step: Step) {
        if let Some(standard) = self.force_standard() {
            let (next, wrapped) = standard.step(step);
            self.force_slot = next.slot();
            if !wrapped {
                return;
            }
        }

        self.display = self.display.step(step);
        if self.display.is_forced() && ForceStandard::from_slot(self.force_slot).is_none() {
            self.force_slot = ForceStandard::boundary(step).slot();
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.force_standard() {
            Some(standard) => write!(f, "{} {}", self.display.label(), standard.label()),
            None => f.write_str(self.display.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(code: u16, slot: u32) -> u32 {
        (u32::from(code + 1) << 16) | slot
    }

    #[test]
    fn test_decode_force_ntsc() {
        let (mode, fixups) = VideoMode::decode(packed(video_bits::DISPLAY_CODE_FORCE, 3));
        assert!(fixups.is_empty());
        assert_eq!(mode.display(), DisplayMode::Force);
        assert_eq!(mode.force_standard(), Some(ForceStandard::Ntsc));
        assert_eq!(mode.to_string(), "Force NTSC");
    }

    #[test]
    fn test_standard_hidden_outside_force() {
        let (mode, _) = VideoMode::decode(packed(video_bits::DISPLAY_CODE_NONE, 2));
        assert_eq!(mode.force_standard(), None);
        assert_eq!(mode.to_string(), "None");
        assert_eq!(mode.to_raw(), packed(video_bits::DISPLAY_CODE_NONE, 2));
    }

    #[test]
    fn test_collapse_both_force_codes() {
        let (mode, fixups) = VideoMode::decode(packed(5, 1));
        assert_eq!(fixups, vec![VideoFixup::CollapsedForceModes]);
        assert_eq!(mode.display(), DisplayMode::ForceDisableFiltering);
    }

    #[test]
    fn test_unknown_display_resets() {
        let (mode, fixups) = VideoMode::decode(0);
        assert_eq!(fixups, vec![VideoFixup::UnknownDisplay { raw: 0 }]);
        assert_eq!(mode.display(), DisplayMode::Auto);
    }

    #[test]
    fn test_missing_standard_gets_pal50() {
        let (mode, fixups) = VideoMode::decode(packed(video_bits::DISPLAY_CODE_FORCE, 0));
        assert_eq!(fixups, vec![VideoFixup::MissingForceStandard]);
        assert_eq!(mode.force_standard(), Some(ForceStandard::Pal50));
    }

    #[test]
    fn test_passthrough_bits_kept() {
        let raw = packed(video_bits::DISPLAY_CODE_AUTO, 0) | video_bits::PROG | (1 << 5);
        let (mode, _) = VideoMode::decode(raw);
        assert!(mode.is_progressive());
        assert_eq!(mode.to_raw(), raw);
    }

    #[test]
    fn test_display_cycle_order() {
        assert_eq!(DisplayMode::Auto.step(Step::Forward), DisplayMode::Force);
        assert_eq!(DisplayMode::Force.step(Step::Forward), DisplayMode::None);
        assert_eq!(DisplayMode::None.step(Step::Forward), DisplayMode::ForceDisableFiltering);
        assert_eq!(DisplayMode::ForceDisableFiltering.step(Step::Forward), DisplayMode::Auto);
        assert_eq!(DisplayMode::Auto.step(Step::Back), DisplayMode::ForceDisableFiltering);
    }

    #[test]
    fn test_standard_wraps() {
        assert_eq!(ForceStandard::Mpal.step(Step::Forward), (ForceStandard::Pal50, true));
        assert_eq!(ForceStandard::Pal50.step(Step::Back), (ForceStandard::Mpal, true));
        assert_eq!(ForceStandard::Pal60.step(Step::Forward), (ForceStandard::Ntsc, false));
    }
}
