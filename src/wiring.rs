use imxrt_hal::gpio::{Output, GPIO};
use imxrt_hal::iomuxc::gpio::Pin;
use keypad_core::RowLine;

use crate::MyLED;

/// A matrix row on an open-drain pad. Clearing the pin sinks the columns of
/// any closed switch on this row; setting it lets the pad float.
pub struct OpenDrainRow<P> {
    pin: GPIO<P, Output>,
}

impl<P: Pin> OpenDrainRow<P> {
    pub fn new(mut pin: GPIO<P, Output>) -> Self {
        pin.set();
        OpenDrainRow { pin }
    }
}

impl<P: Pin> RowLine for OpenDrainRow<P> {
    fn drive(&mut self) {
        self.pin.clear();
    }

    fn release(&mut self) {
        self.pin.set();
    }
}

/// The Teensy's on-board LED, anode on the signal pin and cathode to ground.
pub struct StatusLed {
    led: MyLED,
}

impl StatusLed {
    pub fn new(led: MyLED) -> Self {
        StatusLed { led }
    }

    pub fn shine(&mut self, on: bool) {
        if on {
            self.led.set()
        } else {
            self.led.clear()
        }
    }
}
