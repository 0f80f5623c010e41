//! nincfg-core
//!
//! Data model and interactive edit logic for the Nintendont `nincfg.bin`
//! configuration record.
//!
//! - [`record`]: decode, normalize and encode the fixed 548-byte record
//! - [`session`]: cursor-driven edit state machine over one record
//! - [`host`]: traits the host implements and the per-tick edit loop

pub mod error;
pub mod host;
pub mod record;
pub mod session;

pub use error::{DecodeError, SessionError};
pub use record::ConfigRecord;
pub use session::EditSession;
