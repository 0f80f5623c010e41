//! Error Handling
//!
//! Error types for the record codec and the edit session, built on `thiserror`.
//!
//! # Error Categories
//! - **Decode errors**: the supplied bytes are not a record this editor can
//!   load. Fatal to the session; nothing is ever partially decoded.
//! - **Session errors**: an operation was attempted after the session closed.
//!
//! Editing itself never fails: every mutation is total over the valid state space.

use thiserror::Error;

/// Reasons a byte buffer was rejected by `ConfigRecord::decode`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer length differs from the fixed record size.
    #[error("Record size mismatch: {actual} vs {expected} bytes")]
    SizeMismatch { expected: usize, actual: usize },

    /// The first word is not the record magic.
    #[error("Magic bytes wrong! (found 0x{found:08X})")]
    BadMagic { found: u32 },

    /// Magic matched but the version is not the single supported one.
    #[error("Wrong version (got {found} but we support {supported} only)")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl DecodeError {
    /// Stable machine-readable code for the failure, for hosts that branch on it.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SizeMismatch { .. } => "size_mismatch",
            Self::BadMagic { .. } => "bad_magic",
            Self::UnsupportedVersion { .. } => "unsupported_version",
        }
    }
}

/// Misuse of an `EditSession`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The session was already committed or discarded.
    #[error("Edit session is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_message() {
        let err = DecodeError::UnsupportedVersion { found: 9, supported: 10 };
        assert_eq!(err.to_string(), "Wrong version (got 9 but we support 10 only)");
        assert_eq!(err.code(), "unsupported_version");
    }

    #[test]
    fn test_size_message() {
        let err = DecodeError::SizeMismatch { expected: 548, actual: 12 };
        assert_eq!(err.to_string(), "Record size mismatch: 12 vs 548 bytes");
    }
}
