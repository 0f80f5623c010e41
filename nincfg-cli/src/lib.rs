//! nincfg-cli
//!
//! Host side of the editor: file I/O, persisted settings and input backends
//! that drive `nincfg_core::host::EditLoop`.

pub mod commands;
#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod settings;
pub mod terminal;
