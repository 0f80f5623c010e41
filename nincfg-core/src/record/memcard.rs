//! Emulated memory card sizes.

use serde::Serialize;
use std::fmt;

/// Largest valid size code.
pub const MEM_CARD_MAX: u8 = 5;

/// A validated memory card size code in `0..=MEM_CARD_MAX`.
///
/// Code `c` selects a card of `1 << (c + 19)` bytes holding `(1 << (c + 6)) - 5`
/// usable blocks (59 blocks for the smallest, 2043 for the largest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemCardSize(u8);

impl MemCardSize {
    /// `None` if the code is beyond the table.
    pub fn new(code: u8) -> Option<Self> {
        (code <= MEM_CARD_MAX).then_some(Self(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn byte_size(self) -> u32 {
        1 << (u32::from(self.0) + 19)
    }

    pub fn block_count(self) -> u32 {
        (1 << (u32::from(self.0) + 6)) - 5
    }

    pub fn next(self) -> Self {
        if self.0 == MEM_CARD_MAX {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    pub fn prev(self) -> Self {
        if self.0 == 0 {
            Self(MEM_CARD_MAX)
        } else {
            Self(self.0 - 1)
        }
    }
}

impl Default for MemCardSize {
    fn default() -> Self {
        Self(0)
    }
}

impl fmt::Display for MemCardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} blocks)", format_byte_size(self.byte_size()), self.block_count())
    }
}

/// Human-readable size with a B/KB/MB suffix, truncating like the loader's menu.
pub fn format_byte_size(size: u32) -> String {
    if size >= 1024 * 1024 {
        format!("{}MB", size >> 20)
    } else if size >= 1024 {
        format!("{}KB", size >> 10)
    } else {
        format!("{}B", size)
    }
}
