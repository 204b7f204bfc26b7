//! The USB end of the HID keyboard: boot keyboard reports on an interrupt
//! endpoint.

use imxrt_usbd::full_speed::BusAdapter;
use keypad_core::{deliver, Endpoint, ReportSink};
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{UsbDevice, UsbDeviceState};
use usb_device::prelude::{UsbDeviceBuilder, UsbVidPid};
use usb_device::UsbError;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};
use usbd_hid::hid_class::HIDClass;

use crate::support;

const VID_PID: UsbVidPid = UsbVidPid(0x5824, 0x27dd);
const POLL_MS: u8 = 10;

pub struct UsbKeyboard<'a> {
    hid: HIDClass<'a, BusAdapter>,
    device: UsbDevice<'a, BusAdapter>,
}

impl<'a> UsbKeyboard<'a> {
    pub fn new(bus: &'a UsbBusAllocator<BusAdapter>) -> Self {
        let hid = HIDClass::new(bus, KeyboardReport::desc(), POLL_MS);
        let device = UsbDeviceBuilder::new(bus, VID_PID)
            .product("calc-keypad")
            .build();

        UsbKeyboard { hid, device }
    }

    /// Service the device; returns true if the host has configured it.
    pub fn poll(&mut self) -> bool {
        self.device.poll(&mut [&mut self.hid]);
        self.device.state() == UsbDeviceState::Configured
    }

    /// Block until the host has enumerated and configured us.
    pub fn wait_for_configuration(&mut self) {
        loop {
            support::poll_logger();
            if self.poll() {
                break;
            }
        }
        self.device.bus().configure();
    }
}

impl<'a> Endpoint for UsbKeyboard<'a> {
    type Error = UsbError;

    fn try_push(&mut self, report: &KeyboardReport) -> Result<bool, UsbError> {
        match self.hid.push_input(report) {
            Ok(_) => Ok(true),
            // endpoint still holds the previous report
            Err(UsbError::WouldBlock) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn service(&mut self) -> bool {
        support::poll_logger();
        self.poll()
    }
}

impl<'a> ReportSink for UsbKeyboard<'a> {
    fn push(&mut self, report: &KeyboardReport) {
        deliver(self, report);
    }
}
