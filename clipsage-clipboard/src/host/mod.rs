//! Host backends for clipboard strategies.
//!
//! - [`system`] - Native clipboard through `arboard`
//! - [`emulated`] - Platform clipboard utilities
//! - [`process`] - Subprocess execution for those utilities

pub mod emulated;
pub mod process;
pub mod system;

pub use emulated::{ClipboardCommand, EmulatedClipboard, PASTE_GRACE_PERIOD};
pub use process::{ProcessOutput, ProcessRunner};
pub use system::{ActiveContextClipboard, ModernClipboard, SELECTION_HANDOFF};
