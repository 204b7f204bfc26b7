//! The calculator keymap.
//!
//! One fixed layer, one action per switch. The literals are what the
//! desktop calculator expects to be typed: `/`, `*` and `-` stand in for
//! the division, multiplication and minus signs, `Enter` evaluates,
//! `Escape` clears.

use crate::{COLS, ROWS};

/// Keys that are sent as a named HID command rather than as text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Enter,
    Backspace,
    Escape,
}

/// What pressing a key does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Type the characters one by one, in order.
    Literal(&'static str),
    Enter,
    Backspace,
    Escape,
}

impl KeyAction {
    /// The command this action sends, if it is not text.
    pub fn command(self) -> Option<Command> {
        match self {
            KeyAction::Literal(_) => None,
            KeyAction::Enter => Some(Command::Enter),
            KeyAction::Backspace => Some(Command::Backspace),
            KeyAction::Escape => Some(Command::Escape),
        }
    }
}

const fn lit(text: &'static str) -> KeyAction {
    KeyAction::Literal(text)
}

const ENT: KeyAction = KeyAction::Enter;
const BSP: KeyAction = KeyAction::Backspace;
const ESC: KeyAction = KeyAction::Escape;

pub static KEYMAP: [[KeyAction; COLS]; ROWS] = [
    [lit("7"), lit("8"), lit("9"), lit("/"), lit("sin("), lit("cos("), lit("tan(")],
    [lit("4"), lit("5"), lit("6"), lit("*"), lit("asin("), lit("acos("), lit("atan(")],
    [lit("1"), lit("2"), lit("3"), lit("-"), lit("ln("), lit("log("), lit("exp(")],
    [lit("0"), lit("."), lit("("), lit(")"), lit("sqrt("), lit("^"), lit("pi")],
    [lit("ANS"), BSP, ESC, ENT, lit("nCr("), lit("nPr("), lit("fact(")],
];

/// Action for the switch at (`row`, `col`), `None` outside the matrix.
pub fn lookup(row: usize, col: usize) -> Option<KeyAction> {
    KEYMAP.get(row).and_then(|r| r.get(col)).copied()
}
