//! Alert controller — renders a classified band onto the alert hardware.
//!
//! Each band maps to a fixed display line, indicator pattern, and buzzer
//! level.  The Danger band is the exception: it sequences one full
//! on/off blink phase pair per render, with the buzzer pulsed in step
//! with the indicators, so a sustained Danger reading produces a steady
//! blink at the configured phase length.
//!
//! All output flows through [`AlertPort`], so the controller is pure
//! sequencing logic and fully testable with a mock.

use crate::app::ports::AlertPort;
use crate::band::{indicator_levels, AlertBand};

/// Shown on the Danger band, padded to fill the 16-column line so the
/// longer normal readout underneath is fully overwritten.
const DANGER_TEXT: &str = "      STOP      ";

pub struct AlertController {
    blink_phase_ms: u32,
}

impl AlertController {
    pub fn new(blink_phase_ms: u32) -> Self {
        Self { blink_phase_ms }
    }

    /// Render one measurement onto the hardware.
    ///
    /// Blocks for two blink phases on the Danger band; returns
    /// immediately on every other band.
    pub fn render(&self, distance_cm: u16, band: AlertBand, hw: &mut impl AlertPort) {
        if band == AlertBand::Danger {
            self.render_danger(hw);
        } else {
            self.render_readout(distance_cm, band, hw);
        }
    }

    /// Danger: STOP banner, everything lit, then everything dark, one
    /// blink phase each.
    fn render_danger(&self, hw: &mut impl AlertPort) {
        hw.display_home();
        hw.display_text(DANGER_TEXT);

        hw.set_indicators(true, true, true);
        hw.set_buzzer(true);
        hw.delay_ms(self.blink_phase_ms);

        hw.set_indicators(false, false, false);
        hw.set_buzzer(false);
        hw.delay_ms(self.blink_phase_ms);
    }

    /// Every non-Danger band: numeric readout, steady indicator pattern,
    /// buzzer off.
    fn render_readout(&self, distance_cm: u16, band: AlertBand, hw: &mut impl AlertPort) {
        hw.display_home();
        hw.display_text("Distance= ");
        hw.display_uint(distance_cm);
        hw.display_text("cm");

        let (r, g, b) = indicator_levels(band);
        hw.set_indicators(r, g, b);
        hw.set_buzzer(false);
    }
}
