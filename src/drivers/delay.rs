//! Busy-wait delay primitives.
//!
//! The trigger pulse (10 µs) and the Danger-band blink phases (200 ms) are
//! timed by blocking the foreground task — there is no other work for it
//! to do mid-cycle.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `esp_rom_delay_us`, a calibrated busy loop.
//! On host/test: `std::thread::sleep` (coarse, but tests only rely on
//! ordering, not wall-clock precision).

/// Block the calling context for `us` microseconds.
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: esp_rom_delay_us is a ROM busy loop with no side effects.
    unsafe {
        esp_idf_svc::sys::esp_rom_delay_us(us);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(us: u32) {
    std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
}

/// Block the calling context for `ms` milliseconds.
pub fn delay_ms(ms: u32) {
    delay_us(ms.saturating_mul(1_000));
}

/// Zero-sized handle implementing the embedded-hal delay trait, for code
/// that takes `impl DelayNs` at the seam.
#[derive(Debug, Default, Clone, Copy)]
pub struct Delay;

impl embedded_hal::delay::DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        // Sub-microsecond resolution is below what the busy loop provides;
        // round up so contracts like "at least 10 µs" hold.
        delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        delay_ms(ms);
    }
}
