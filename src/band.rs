//! Distance classification into alert bands.
//!
//! Five ordered, mutually exclusive bands partition the whole non-negative
//! distance range:
//!
//! ```text
//!  0 ──── 5 ──── 10 ──── 15 ──── 20 ────▶ cm
//!  Danger  Warning  Safe  Detected  Idle
//! ```
//!
//! Classification is an ascending cascade — Danger is tested first and Idle
//! is the fall-through — so no distance can match two bands.

use crate::config::BandThresholds;

/// One of the five alert bands, ordered by severity (most severe first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertBand {
    Danger = 0,
    Warning = 1,
    Safe = 2,
    Detected = 3,
    Idle = 4,
}

impl AlertBand {
    /// Total number of bands.
    pub const COUNT: usize = 5;

    /// Human-readable name for logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Danger => "Danger",
            Self::Warning => "Warning",
            Self::Safe => "Safe",
            Self::Detected => "Detected",
            Self::Idle => "Idle",
        }
    }
}

/// Map a distance to its alert band.  Pure, total, deterministic.
pub fn classify(distance_cm: u16, th: &BandThresholds) -> AlertBand {
    if distance_cm <= th.danger_max_cm {
        AlertBand::Danger
    } else if distance_cm <= th.warning_max_cm {
        AlertBand::Warning
    } else if distance_cm <= th.safe_max_cm {
        AlertBand::Safe
    } else if distance_cm <= th.detected_max_cm {
        AlertBand::Detected
    } else {
        AlertBand::Idle
    }
}

/// Indicator channel levels (R, G, B) for a band.  Danger returns all-on —
/// the on-phase of its blink cycle; the off-phase is the alert controller's
/// concern.
pub fn indicator_levels(band: AlertBand) -> (bool, bool, bool) {
    match band {
        AlertBand::Danger => (true, true, true),
        AlertBand::Warning => (true, true, true),
        AlertBand::Safe => (true, true, false),
        AlertBand::Detected => (true, false, false),
        AlertBand::Idle => (false, false, false),
    }
}
