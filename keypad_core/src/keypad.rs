//! Scan gate, debouncing of the whole matrix, and dispatch of key presses.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::InputPin;
use log::{debug, trace};

use crate::debouncer::{Debouncer, Edge};
use crate::keymap::{self, Command, KeyAction};
use crate::matrix::{Matrix, RowLine};
use crate::{Millis, COLS, DEBOUNCE_MS, ROWS, SCAN_INTERVAL_MS};

/// The HID side of the keypad. Every call is one keystroke, sent in order.
pub trait Keyboard {
    fn write(&mut self, ch: char);
    fn command(&mut self, cmd: Command);
}

/// Perform `action` on `keyboard`.
pub fn dispatch<K: Keyboard + ?Sized>(action: KeyAction, keyboard: &mut K) {
    match action {
        KeyAction::Literal(text) => {
            for ch in text.chars() {
                keyboard.write(ch);
            }
        }
        other => {
            if let Some(cmd) = other.command() {
                keyboard.command(cmd);
            }
        }
    }
}

pub struct Keypad<R, C> {
    matrix: Matrix<R, C>,
    keys: [[Debouncer; COLS]; ROWS],
    last_scan: Millis,
}

impl<R: RowLine, C: InputPin> Keypad<R, C> {
    pub fn new(matrix: Matrix<R, C>) -> Self {
        Keypad {
            matrix,
            keys: [[Debouncer::new(DEBOUNCE_MS); COLS]; ROWS],
            last_scan: 0,
        }
    }

    /// Run one pass of the main loop at time `now`.
    ///
    /// Does nothing and returns `false` if the previous scan was less than
    /// [`SCAN_INTERVAL_MS`] ago. Otherwise the matrix is scanned, every
    /// switch is debounced, and the action of each newly pressed key is
    /// sent to `keyboard` in row-major order.
    pub fn poll<D, K>(&mut self, now: Millis, delay: &mut D, keyboard: &mut K) -> bool
    where
        D: DelayUs<u32>,
        K: Keyboard + ?Sized,
    {
        if now.wrapping_sub(self.last_scan) < SCAN_INTERVAL_MS {
            return false;
        }
        self.last_scan = now;

        let raw = self.matrix.scan(delay);

        for (row, (keys, samples)) in self.keys.iter_mut().zip(raw.iter()).enumerate() {
            for (col, (key, &closed)) in keys.iter_mut().zip(samples.iter()).enumerate() {
                match key.update(closed, now) {
                    Some(Edge::Pressed) => {
                        if let Some(action) = keymap::lookup(row, col) {
                            debug!("key ({}, {}) pressed: {:?}", row, col, action);
                            dispatch(action, keyboard);
                        }
                    }
                    Some(Edge::Released) => trace!("key ({}, {}) released", row, col),
                    None => {}
                }
            }
        }

        true
    }

    /// Whether any key is currently (debounced) down.
    pub fn any_pressed(&self) -> bool {
        self.keys.iter().flatten().any(Debouncer::is_pressed)
    }

    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        self.keys
            .get(row)
            .and_then(|keys| keys.get(col))
            .map_or(false, Debouncer::is_pressed)
    }
}
