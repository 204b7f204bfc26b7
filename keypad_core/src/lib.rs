//! Hardware-independent half of the calculator keypad firmware.
//!
//! The matrix scanner, per-key debouncing, the keymap and the translation
//! of characters into HID keyboard reports all live here, generic over
//! `embedded-hal` pins and a small report sink, so they can be exercised
//! on the host.

#![cfg_attr(not(test), no_std)]

pub mod debouncer;
pub mod keymap;
pub mod keypad;
pub mod matrix;
pub mod translation;

#[cfg(test)]
mod sim;

pub use debouncer::{Debouncer, Edge};
pub use keymap::{Command, KeyAction};
pub use keypad::{dispatch, Keyboard, Keypad};
pub use matrix::{Matrix, RawMatrix, RowLine};
pub use translation::{deliver, Endpoint, ReportKeyboard, ReportSink};

/// Milliseconds from a free-running counter. Differences are taken with
/// `wrapping_sub`, so the counter may roll over.
pub type Millis = u32;

/// Number of row lines in the matrix.
pub const ROWS: usize = 5;
/// Number of column lines in the matrix.
pub const COLS: usize = 7;

/// A raw reading has to hold for longer than this before it is trusted.
pub const DEBOUNCE_MS: Millis = 15;
/// Minimum time between two matrix scans.
pub const SCAN_INTERVAL_MS: Millis = 3;
/// How long a driven row is given to settle before the columns are read.
pub const ROW_SETTLE_US: u32 = 80;
