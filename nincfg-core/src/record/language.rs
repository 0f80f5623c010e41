//! Game language selection.

use super::layout::LANGUAGE_AUTO_RAW;
use serde::Serialize;
use std::fmt;

/// Language the loader patches into PAL games.
///
/// `Auto` is the last entry so the selector can cycle over a contiguous range;
/// on disk it is stored as the all-ones sentinel instead of its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    English,
    German,
    French,
    Spanish,
    Italian,
    Dutch,
    Auto,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Self::English,
        Self::German,
        Self::French,
        Self::Spanish,
        Self::Italian,
        Self::Dutch,
        Self::Auto,
    ];

    /// Index in the selector order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Decode the on-disk value. `None` for values outside the table.
    ///
    /// Both the sentinel and the in-memory index of `Auto` are accepted.
    pub fn from_raw(raw: u32) -> Option<Self> {
        if raw == LANGUAGE_AUTO_RAW {
            return Some(Self::Auto);
        }
        Self::ALL.get(raw as usize).copied()
    }

    /// On-disk value, with `Auto` mapped back to the sentinel.
    pub fn to_raw(self) -> u32 {
        match self {
            Self::Auto => LANGUAGE_AUTO_RAW,
            other => other.index() as u32,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::German => "German",
            Self::French => "French",
            Self::Spanish => "Spanish",
            Self::Italian => "Italian",
            Self::Dutch => "Dutch",
            Self::Auto => "Auto",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
