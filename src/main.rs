//! Scientific calculator keypad for the Teensy 4.0.
//!
//! Scans a 5x7 switch matrix, debounces every switch and types the key's
//! text (or Enter / Backspace / Escape) over a USB HID keyboard.

#![no_std]
#![no_main]
#![feature(default_alloc_error_handler)]

extern crate alloc;

use crate::dynamic_pin::{DynamicPin, DynamicRow};
use crate::timekeeper::CycleDelay;
use crate::usb_keyboard::UsbKeyboard;
use crate::wiring::StatusLed;
use alloc_cortex_m::CortexMHeap;
use imxrt_hal::gpio::{Output, GPIO};
use imxrt_hal::iomuxc::gpio::Pin;
use imxrt_usbd::full_speed::BusAdapter;
use keypad_core::{Keypad, Matrix, ReportKeyboard};
use log::info;
use teensy4_bsp as bsp;
use teensy4_bsp::hal;
use teensy4_panic as _;
use usb_device::bus::UsbBusAllocator;

mod dynamic_pin;
mod support;
mod timekeeper;
mod usb_keyboard;
mod wiring;

#[global_allocator]
static ALLOCATOR: CortexMHeap = CortexMHeap::empty();

const HEAP_SIZE: usize = 1024; // in bytes
const LOGGING_BAUD: u32 = 115_200;

//

pub type MyLED = GPIO<teensy4_bsp::common::P13, Output>;

type KeypadMatrix<'a> = Matrix<DynamicRow<'a>, DynamicPin<'a>>;

//

struct HardwareParts<'a> {
    led: StatusLed,
    matrix: KeypadMatrix<'a>,
    core_hz: u32,
}

fn column<'a, P: Pin + 'a>(pin: P) -> DynamicPin<'a> {
    DynamicPin::new(GPIO::new(support::rigged_pull_up_switch(pin)))
}

fn row<'a, P: Pin + 'a>(pin: P) -> DynamicRow<'a> {
    DynamicRow::new(GPIO::new(support::rigged_open_drain_row(pin)).output())
}

impl<'a> HardwareParts<'a> {
    /// Rows on pins 2-6, columns on pins 7-12 and 17.
    /// Pin 13 is the on-board LED, pins 14/15 carry the log UART.
    pub fn start_up(peripherals: hal::Peripherals) -> HardwareParts<'a> {
        let hal::Peripherals {
            iomuxc,
            mut ccm,
            dma,
            uart,
            mut dcdc,
            ..
        } = peripherals;

        let pins = bsp::t40::into_pins(iomuxc);
        let led = {
            let mut led = GPIO::new(pins.p13);
            led.set_fast(true);
            led.output()
        };

        let matrix = Matrix::new(
            [row(pins.p2), row(pins.p3), row(pins.p4), row(pins.p5), row(pins.p6)],
            [
                column(pins.p7),
                column(pins.p8),
                column(pins.p9),
                column(pins.p10),
                column(pins.p11),
                column(pins.p12),
                column(pins.p17),
            ],
        );

        support::initialize_uart(LOGGING_BAUD, dma, uart, &mut ccm.handle, pins.p14, pins.p15);

        let core_hz = support::rig_arm_clock(&mut dcdc, &mut ccm.pll1, &mut ccm.handle);

        let mut ccm = ccm.handle;
        let (ccm_i, ccm_analog) = ccm.raw();
        support::ccm::initialize(ccm_i, ccm_analog);

        HardwareParts {
            led: StatusLed::new(led),
            matrix,
            core_hz,
        }
    }
}

//

#[cortex_m_rt::entry]
fn main() -> ! {
    {
        // Initialize the allocator BEFORE you use it
        let start = cortex_m_rt::heap_start() as usize;
        unsafe { ALLOCATOR.init(start, HEAP_SIZE) }
    }

    let HardwareParts {
        mut led,
        matrix,
        core_hz,
    } = HardwareParts::start_up(hal::Peripherals::take().unwrap());

    let mut core_peripherals = cortex_m::Peripherals::take().unwrap();
    timekeeper::start(&mut core_peripherals.SYST, core_hz);

    //

    let bus: UsbBusAllocator<BusAdapter> = UsbBusAllocator::new(support::new_bus_adapter());
    let mut usb = UsbKeyboard::new(&bus);
    usb.wait_for_configuration();
    info!("USB configured, scanning");

    led.shine(false);

    let mut keypad = Keypad::new(matrix);
    let mut keyboard = ReportKeyboard::new(usb);
    let mut delay = CycleDelay::new(core_hz);

    loop {
        support::poll_logger();
        keyboard.sink_mut().poll();

        if keypad.poll(timekeeper::millis(), &mut delay, &mut keyboard) {
            led.shine(keypad.any_pressed());
        }
    }
}
