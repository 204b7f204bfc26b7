//! Row-by-row scanning of the switch matrix.
//!
//! Rows are driven low one at a time; the columns carry pull-ups, so a
//! closed switch on the driven row pulls its column low. A row that is not
//! being scanned is left floating, never driven high, so two rows are
//! never fighting each other through a pair of closed switches.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::InputPin;

use crate::{COLS, ROWS, ROW_SETTLE_US};

/// One full scan: `true` means the switch was closed.
pub type RawMatrix = [[bool; COLS]; ROWS];

/// A row line of the matrix.
pub trait RowLine {
    /// Pull the row to its active (low) level.
    fn drive(&mut self);
    /// Stop driving the row and leave it high-impedance.
    fn release(&mut self);
}

pub struct Matrix<R, C> {
    rows: [R; ROWS],
    cols: [C; COLS],
}

impl<R: RowLine, C: InputPin> Matrix<R, C> {
    pub fn new(mut rows: [R; ROWS], cols: [C; COLS]) -> Self {
        for row in rows.iter_mut() {
            row.release();
        }
        Matrix { rows, cols }
    }

    /// Sample every switch once.
    pub fn scan<D: DelayUs<u32>>(&mut self, delay: &mut D) -> RawMatrix {
        let mut state: RawMatrix = [[false; COLS]; ROWS];

        for (row, sampled) in self.rows.iter_mut().zip(state.iter_mut()) {
            row.drive();
            delay.delay_us(ROW_SETTLE_US);

            for (col, closed) in self.cols.iter().zip(sampled.iter_mut()) {
                // A failed read counts as an open switch.
                *closed = matches!(col.is_low(), Ok(true));
            }

            row.release();
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimBoard, SimDelay};

    #[test]
    fn reads_pressed_switches() {
        let board = SimBoard::new();
        board.press(2, 1);
        board.press(4, 6);
        let mut matrix = board.matrix();
        let mut delay = SimDelay::default();

        let state = matrix.scan(&mut delay);
        for row in 0..ROWS {
            for col in 0..COLS {
                let expected = (row, col) == (2, 1) || (row, col) == (4, 6);
                assert_eq!(state[row][col], expected, "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn one_row_at_a_time_in_order() {
        let board = SimBoard::new();
        // a full column and a full row, which would ghost if two rows were driven together
        for row in 0..ROWS {
            board.press(row, 3);
        }
        for col in 0..COLS {
            board.press(1, col);
        }
        let mut matrix = board.matrix();
        let mut delay = SimDelay::default();

        let state = matrix.scan(&mut delay);

        assert_eq!(board.drive_order(), vec![0, 1, 2, 3, 4]);
        assert_eq!(board.max_driven(), 1);
        assert_eq!(board.driven_rows(), 0);
        assert_eq!(board.reads_with_driven_rows(), ROWS * COLS);
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(state[row][col], row == 1 || col == 3, "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn settles_each_row() {
        let board = SimBoard::new();
        let mut matrix = board.matrix();
        let mut delay = SimDelay::default();

        matrix.scan(&mut delay);
        assert_eq!(delay.waits, vec![ROW_SETTLE_US; ROWS]);
    }

    #[test]
    fn failed_read_is_open() {
        let board = SimBoard::new();
        board.press(0, 0);
        board.fail_column(0);
        let mut matrix = board.matrix();

        let state = matrix.scan(&mut SimDelay::default());
        assert!(!state[0][0]);
    }

    #[test]
    fn construction_releases_rows() {
        let board = SimBoard::new();
        let _matrix = board.matrix();
        assert_eq!(board.release_count(), ROWS);
        assert_eq!(board.driven_rows(), 0);
    }
}
