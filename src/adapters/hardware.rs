//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the ultrasonic sensor and all output drivers, exposing them
//! through [`RangerPort`] and [`AlertPort`].  This is the only module in
//! the system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{AlertPort, RangerPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::delay;
use crate::drivers::display::Display;
use crate::drivers::indicator::IndicatorLeds;
use crate::error::SensorError;
use crate::sensors::ultrasonic::{UltrasonicReading, UltrasonicSensor};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    ranger: UltrasonicSensor,
    display: Display,
    leds: IndicatorLeds,
    buzzer: Buzzer,
}

impl HardwareAdapter {
    pub fn new(
        ranger: UltrasonicSensor,
        display: Display,
        leds: IndicatorLeds,
        buzzer: Buzzer,
    ) -> Self {
        Self {
            ranger,
            display,
            leds,
            buzzer,
        }
    }

    /// The rendered display line (host builds only, for assertions).
    #[cfg(not(target_os = "espidf"))]
    pub fn display_line(&self) -> &str {
        self.display.line()
    }
}

// ── RangerPort implementation ─────────────────────────────────

impl RangerPort for HardwareAdapter {
    fn measure(&mut self) -> Result<UltrasonicReading, SensorError> {
        self.ranger.measure()
    }
}

// ── AlertPort implementation ──────────────────────────────────

impl AlertPort for HardwareAdapter {
    fn display_home(&mut self) {
        self.display.home();
    }

    fn display_text(&mut self, s: &str) {
        self.display.write_str(s);
    }

    fn display_uint(&mut self, value: u16) {
        self.display.write_uint(value);
    }

    fn set_indicators(&mut self, r: bool, g: bool, b: bool) {
        self.leds.set(r, g, b);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn delay_ms(&mut self, ms: u32) {
        delay::delay_ms(ms);
    }

    fn all_off(&mut self) {
        self.leds.off();
        self.buzzer.off();
    }
}
