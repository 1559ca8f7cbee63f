//! System configuration parameters
//!
//! All tunable parameters for the ProxAlarm system.  Defaults carry the
//! calibrated values for the reference board; the trigger pulse width and
//! the tick-to-centimetre divisor are compile-time constants in the sensor
//! module, not configuration.

use serde::{Deserialize, Serialize};

/// Distance thresholds (cm) for the five alert bands.
///
/// Each field is the inclusive upper bound of its band; anything above
/// `detected_max_cm` is Idle.  Must be strictly ascending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandThresholds {
    /// Danger band: distance <= this.
    pub danger_max_cm: u16,
    /// Warning band upper bound.
    pub warning_max_cm: u16,
    /// Safe band upper bound.
    pub safe_max_cm: u16,
    /// Detected band upper bound.
    pub detected_max_cm: u16,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            danger_max_cm: 5,
            warning_max_cm: 10,
            safe_max_cm: 15,
            detected_max_cm: 20,
        }
    }
}

impl BandThresholds {
    /// `true` if the bounds are strictly ascending (the partition is
    /// well-formed).
    pub fn is_valid(&self) -> bool {
        self.danger_max_cm < self.warning_max_cm
            && self.warning_max_cm < self.safe_max_cm
            && self.safe_max_cm < self.detected_max_cm
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Classification ---
    /// Alert band distance thresholds.
    pub thresholds: BandThresholds,

    // --- Ranging ---
    /// Maximum wait for the echo pulse before a cycle is abandoned (ms).
    /// The HC-SR04 echo saturates around 38 ms; 60 ms is past any valid echo.
    pub echo_timeout_ms: u32,
    /// Minimum interval between trigger pulses (ms).  The sensor datasheet
    /// recommends >= 60 ms so residual echoes from the previous cycle die out.
    pub measurement_interval_ms: u32,

    // --- Alerting ---
    /// Length of each blink phase (all-on / all-off) in the Danger band (ms).
    pub blink_phase_ms: u32,

    // --- Telemetry ---
    /// Emit a telemetry event every N measurement cycles.
    pub telemetry_interval_cycles: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: BandThresholds::default(),

            // Ranging
            echo_timeout_ms: 60,
            measurement_interval_ms: 60,

            // Alerting
            blink_phase_ms: 200,

            // Telemetry
            telemetry_interval_cycles: 50,
        }
    }
}
