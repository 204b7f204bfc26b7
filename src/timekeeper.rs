//! Millisecond clock driven by the SysTick exception, and a busy-wait
//! microsecond delay for row settling.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use embedded_hal::blocking::delay::DelayUs;
use keypad_core::Millis;

static TIMESTAMP_MILLIS: AtomicU32 = AtomicU32::new(0);

pub fn millis() -> Millis {
    TIMESTAMP_MILLIS.load(Ordering::Relaxed)
}

fn incr_timestamp(plus: Millis) {
    TIMESTAMP_MILLIS.fetch_add(plus, Ordering::Relaxed);
}

/// Fire SysTick once per millisecond. `core_hz` is the processor clock.
pub fn start(syst: &mut SYST, core_hz: u32) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(core_hz / 1_000 - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();
}

#[exception]
fn SysTick() {
    incr_timestamp(1);
}

/// Spins the core; accurate enough for the few tens of microseconds a
/// driven row needs to settle.
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    pub fn new(core_hz: u32) -> Self {
        CycleDelay {
            cycles_per_us: core_hz / 1_000_000,
        }
    }
}

impl DelayUs<u32> for CycleDelay {
    fn delay_us(&mut self, us: u32) {
        cortex_m::asm::delay(us.saturating_mul(self.cycles_per_us));
    }
}
