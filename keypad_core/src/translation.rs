//! Turning characters and commands into USB HID boot keyboard reports.
//!
//! Usage IDs are for a US layout host; anything above the number row is
//! typed with left shift held.

use log::warn;
use usbd_hid::descriptor::KeyboardReport;

use crate::keymap::Command;
use crate::keypad::Keyboard;

/// Left shift in the modifier byte.
pub const LEFT_SHIFT: u8 = 0x02;

const ENTER: u8 = 0x28;
const ESCAPE: u8 = 0x29;
const BACKSPACE: u8 = 0x2a;

pub fn simple_kr(modifier: u8, keycodes: [u8; 6]) -> KeyboardReport {
    KeyboardReport {
        modifier,
        reserved: 0,
        leds: 0,
        keycodes,
    }
}

/// A report with a single key down (or nothing, for code 0).
pub fn simple_kr1(modifier: u8, code: u8) -> KeyboardReport {
    simple_kr(modifier, [code, 0, 0, 0, 0, 0])
}

/// All keys up.
pub fn released() -> KeyboardReport {
    simple_kr1(0, 0)
}

pub fn translate_char(ch: char) -> Option<KeyboardReport> {
    let (modifier, code) = match ch {
        'a'..='z' => (0, (ch as u8) - b'a' + 0x04),
        'A'..='Z' => (LEFT_SHIFT, (ch as u8) - b'A' + 0x04),
        '1'..='9' => (0, (ch as u8) - b'1' + 0x1e),
        '0' => (0, 0x27),
        '!' => (LEFT_SHIFT, 0x1e),
        '@' => (LEFT_SHIFT, 0x1f),
        '#' => (LEFT_SHIFT, 0x20),
        '$' => (LEFT_SHIFT, 0x21),
        '%' => (LEFT_SHIFT, 0x22),
        '^' => (LEFT_SHIFT, 0x23),
        '&' => (LEFT_SHIFT, 0x24),
        '*' => (LEFT_SHIFT, 0x25),
        '(' => (LEFT_SHIFT, 0x26),
        ')' => (LEFT_SHIFT, 0x27),
        '\n' => (0, ENTER),
        ' ' => (0, 0x2c),
        '-' => (0, 0x2d),
        '_' => (LEFT_SHIFT, 0x2d),
        '=' => (0, 0x2e),
        '+' => (LEFT_SHIFT, 0x2e),
        ';' => (0, 0x33),
        ':' => (LEFT_SHIFT, 0x33),
        ',' => (0, 0x36),
        '.' => (0, 0x37),
        '/' => (0, 0x38),
        '?' => (LEFT_SHIFT, 0x38),
        _ => return None,
    };
    Some(simple_kr1(modifier, code))
}

pub fn command_report(cmd: Command) -> KeyboardReport {
    let code = match cmd {
        Command::Enter => ENTER,
        Command::Backspace => BACKSPACE,
        Command::Escape => ESCAPE,
    };
    simple_kr1(0, code)
}

/// Where finished reports go. Implementations send the report to the
/// host, waiting for the endpoint if they have to.
pub trait ReportSink {
    fn push(&mut self, report: &KeyboardReport);
}

/// A HID interrupt IN endpoint that can still be holding the last report.
pub trait Endpoint {
    type Error: core::fmt::Debug;

    /// Offer `report`. `Ok(false)` means the endpoint is busy.
    fn try_push(&mut self, report: &KeyboardReport) -> Result<bool, Self::Error>;

    /// Service the bus. `false` once the host no longer has us configured.
    fn service(&mut self) -> bool;
}

/// Offer `report` until the endpoint takes it. Gives up, dropping the
/// report, on an error or once the host stops listening (suspend, bus
/// reset), so a stalled host cannot stop the scan loop.
pub fn deliver<E: Endpoint + ?Sized>(endpoint: &mut E, report: &KeyboardReport) -> bool {
    loop {
        match endpoint.try_push(report) {
            Ok(true) => return true,
            Ok(false) => {
                if !endpoint.service() {
                    warn!("host not listening, dropping keyboard report");
                    return false;
                }
            }
            Err(err) => {
                warn!("dropping keyboard report: {:?}", err);
                return false;
            }
        }
    }
}

/// A [`Keyboard`] that types each keystroke as a key-down report followed
/// by an all-keys-up report, so repeated characters register as separate
/// presses.
pub struct ReportKeyboard<S> {
    sink: S,
}

impl<S: ReportSink> ReportKeyboard<S> {
    pub fn new(sink: S) -> Self {
        ReportKeyboard { sink }
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn stroke(&mut self, report: &KeyboardReport) {
        self.sink.push(report);
        self.sink.push(&released());
    }
}

impl<S: ReportSink> Keyboard for ReportKeyboard<S> {
    fn write(&mut self, ch: char) {
        match translate_char(ch) {
            Some(report) => self.stroke(&report),
            None => warn!("no key for {:?}, skipped", ch),
        }
    }

    fn command(&mut self, cmd: Command) {
        self.stroke(&command_report(cmd));
    }
}
