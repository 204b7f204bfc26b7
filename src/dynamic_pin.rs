//! Type-erased pins, so rows and columns on different pads fit in one array.

use alloc::boxed::Box;
use core::convert::Infallible;
use embedded_hal::digital::v2::InputPin;
use imxrt_hal::gpio::GPIO;
use imxrt_hal::gpio::{Input, Output};
use imxrt_hal::iomuxc::gpio::Pin;
use keypad_core::RowLine;

use crate::wiring::OpenDrainRow;

pub trait DynamicPinTrait {
    fn is_set(&self) -> bool;
}

//

pub struct DynamicPinCore<P> {
    base: GPIO<P, Input>,
}

impl<P> DynamicPinCore<P> {
    pub fn new(base: GPIO<P, Input>) -> Self {
        DynamicPinCore { base }
    }
}

impl<P: Pin> DynamicPinTrait for DynamicPinCore<P> {
    fn is_set(&self) -> bool {
        self.base.is_set()
    }
}

pub struct DynamicPin<'a> {
    base: Box<dyn DynamicPinTrait + 'a>,
}

impl<'a> DynamicPin<'a> {
    pub fn new<P: Pin + 'a>(p0: GPIO<P, Input>) -> DynamicPin<'a> {
        DynamicPin {
            base: Box::new(DynamicPinCore::new(p0)),
        }
    }
}

impl<'a> InputPin for DynamicPin<'a> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.base.is_set())
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(!self.base.is_set())
    }
}

//

pub struct DynamicRow<'a> {
    base: Box<dyn RowLine + 'a>,
}

impl<'a> DynamicRow<'a> {
    pub fn new<P: Pin + 'a>(p0: GPIO<P, Output>) -> DynamicRow<'a> {
        DynamicRow {
            base: Box::new(OpenDrainRow::new(p0)),
        }
    }
}

impl<'a> RowLine for DynamicRow<'a> {
    fn drive(&mut self) {
        self.base.drive()
    }

    fn release(&mut self) {
        self.base.release()
    }
}
