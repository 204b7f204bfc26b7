use crate::Millis;

/// A change of the debounced state of a switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Time-based debouncer for one switch.
///
/// Every change of the raw reading restarts the stability window, so a
/// switch that keeps chattering never settles.
#[derive(Copy, Clone, Debug)]
pub struct Debouncer {
    stabilized_state: bool,
    curr_state: bool,
    timestamp_last_transition: Millis,
    ticks_for_stability: Millis,
}

impl Debouncer {
    /// A released switch whose raw reading must hold for more than
    /// `ticks_for_stability` milliseconds before it is believed.
    pub const fn new(ticks_for_stability: Millis) -> Self {
        Debouncer {
            stabilized_state: false,
            curr_state: false,
            timestamp_last_transition: 0,
            ticks_for_stability,
        }
    }

    /// Feed one raw sample taken at `timestamp`. Returns the edge when the
    /// debounced state flips.
    pub fn update(&mut self, raw_value: bool, timestamp: Millis) -> Option<Edge> {
        if raw_value != self.curr_state {
            self.curr_state = raw_value;
            self.timestamp_last_transition = timestamp;
        }

        let n = timestamp.wrapping_sub(self.timestamp_last_transition);
        if n > self.ticks_for_stability && self.stabilized_state != self.curr_state {
            self.stabilized_state = self.curr_state;
            return Some(if self.stabilized_state {
                Edge::Pressed
            } else {
                Edge::Released
            });
        }

        None
    }

    pub fn is_pressed(&self) -> bool {
        self.stabilized_state
    }
}
