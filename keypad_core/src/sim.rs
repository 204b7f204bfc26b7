//! A simulated switch matrix and HID sinks for the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::InputPin;
use usbd_hid::descriptor::KeyboardReport;

use crate::keymap::Command;
use crate::keypad::Keyboard;
use crate::matrix::{Matrix, RowLine};
use crate::translation::ReportSink;
use crate::{COLS, ROWS};

#[derive(Default)]
struct Board {
    pressed: [[bool; COLS]; ROWS],
    driven: [bool; ROWS],
    failing: [bool; COLS],
    drive_order: Vec<usize>,
    max_driven: usize,
    releases: usize,
    reads: usize,
    reads_with_driven_rows: usize,
}

impl Board {
    fn driven_count(&self) -> usize {
        self.driven.iter().filter(|&&d| d).count()
    }
}

/// Switches wired between rows and pulled-up columns. Driving a row while
/// another one is still driven panics.
#[derive(Clone, Default)]
pub struct SimBoard {
    board: Rc<RefCell<Board>>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, row: usize, col: usize) {
        self.board.borrow_mut().pressed[row][col] = true;
    }

    pub fn lift(&self, row: usize, col: usize) {
        self.board.borrow_mut().pressed[row][col] = false;
    }

    pub fn set(&self, row: usize, col: usize, closed: bool) {
        self.board.borrow_mut().pressed[row][col] = closed;
    }

    pub fn fail_column(&self, col: usize) {
        self.board.borrow_mut().failing[col] = true;
    }

    pub fn matrix(&self) -> Matrix<SimRow, SimColumn> {
        let rows = [0, 1, 2, 3, 4].map(|index| SimRow { index, board: self.clone() });
        let cols = [0, 1, 2, 3, 4, 5, 6].map(|index| SimColumn { index, board: self.clone() });
        Matrix::new(rows, cols)
    }

    pub fn drive_order(&self) -> Vec<usize> {
        self.board.borrow().drive_order.clone()
    }

    pub fn max_driven(&self) -> usize {
        self.board.borrow().max_driven
    }

    pub fn driven_rows(&self) -> usize {
        self.board.borrow().driven_count()
    }

    pub fn release_count(&self) -> usize {
        self.board.borrow().releases
    }

    /// Number of column reads so far.
    pub fn reads(&self) -> usize {
        self.board.borrow().reads
    }

    /// Column reads that happened while exactly one row was driven.
    pub fn reads_with_driven_rows(&self) -> usize {
        self.board.borrow().reads_with_driven_rows
    }
}

pub struct SimRow {
    index: usize,
    board: SimBoard,
}

impl RowLine for SimRow {
    fn drive(&mut self) {
        let mut board = self.board.board.borrow_mut();
        assert_eq!(board.driven_count(), 0, "row {} driven while another row is active", self.index);
        board.driven[self.index] = true;
        board.drive_order.push(self.index);
        board.max_driven = board.max_driven.max(board.driven_count());
    }

    fn release(&mut self) {
        let mut board = self.board.board.borrow_mut();
        board.driven[self.index] = false;
        board.releases += 1;
    }
}

pub struct SimColumn {
    index: usize,
    board: SimBoard,
}

impl InputPin for SimColumn {
    type Error = ();

    fn is_high(&self) -> Result<bool, ()> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&self) -> Result<bool, ()> {
        let mut board = self.board.board.borrow_mut();
        board.reads += 1;
        if board.driven_count() == 1 {
            board.reads_with_driven_rows += 1;
        }
        if board.failing[self.index] {
            return Err(());
        }
        let col = self.index;
        Ok((0..ROWS).any(|row| board.driven[row] && board.pressed[row][col]))
    }
}

#[derive(Default)]
pub struct SimDelay {
    pub waits: Vec<u32>,
}

impl DelayUs<u32> for SimDelay {
    fn delay_us(&mut self, us: u32) {
        self.waits.push(us);
    }
}

/// What a [`Keyboard`] was asked to send.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Char(char),
    Command(Command),
}

#[derive(Default)]
pub struct RecordingKeyboard {
    pub sent: Vec<Sent>,
}

impl RecordingKeyboard {
    pub fn text(&self) -> String {
        self.sent
            .iter()
            .filter_map(|s| match s {
                Sent::Char(ch) => Some(*ch),
                Sent::Command(_) => None,
            })
            .collect()
    }
}

impl Keyboard for RecordingKeyboard {
    fn write(&mut self, ch: char) {
        self.sent.push(Sent::Char(ch));
    }

    fn command(&mut self, cmd: Command) {
        self.sent.push(Sent::Command(cmd));
    }
}

/// Keeps `(modifier, keycodes)` of every pushed report.
#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<(u8, [u8; 6])>,
}

impl ReportSink for RecordingSink {
    fn push(&mut self, report: &KeyboardReport) {
        self.reports.push((report.modifier, report.keycodes));
    }
}
