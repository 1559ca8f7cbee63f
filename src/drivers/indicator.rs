//! Tri-colour indicator driver — three discrete LEDs on separate GPIOs.
//!
//! Level-driven: each channel is simply on or off.  The Danger-band blink
//! is sequenced by the alert controller, not here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct IndicatorLeds {
    current: (bool, bool, bool),
}

impl IndicatorLeds {
    pub fn new() -> Self {
        Self {
            current: (false, false, false),
        }
    }

    /// Set all three channels in one pass.
    pub fn set(&mut self, r: bool, g: bool, b: bool) {
        hw_init::gpio_write(pins::LED_R_GPIO, r);
        hw_init::gpio_write(pins::LED_G_GPIO, g);
        hw_init::gpio_write(pins::LED_B_GPIO, b);
        self.current = (r, g, b);
    }

    pub fn off(&mut self) {
        self.set(false, false, false);
    }

    pub fn current(&self) -> (bool, bool, bool) {
        self.current
    }
}
