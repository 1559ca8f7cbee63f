//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the ranger, the alert hardware, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::SensorError;
use crate::sensors::ultrasonic::UltrasonicReading;

// ───────────────────────────────────────────────────────────────
// Ranger port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain a distance measurement.
pub trait RangerPort {
    /// Perform one trigger-and-capture measurement cycle.
    ///
    /// Blocks until an echo arrives or the timeout elapses, and returns
    /// [`SensorError::NoEcho`] in the latter case.
    fn measure(&mut self) -> Result<UltrasonicReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Alert port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the alert hardware.
///
/// The display calls model the character LCD: `display_home` rewinds to
/// the start of the line, then text and digits overwrite it in place.
pub trait AlertPort {
    /// Rewind the display cursor to the home position.
    fn display_home(&mut self);

    /// Write a string at the current display cursor.
    fn display_text(&mut self, s: &str);

    /// Write an unsigned integer as decimal digits.
    fn display_uint(&mut self, value: u16);

    /// Set the three indicator channels (red, green, blue).
    fn set_indicators(&mut self, r: bool, g: bool, b: bool);

    /// Switch the buzzer on or off.
    fn set_buzzer(&mut self, on: bool);

    /// Block for `ms` milliseconds (blink-phase pacing).
    fn delay_ms(&mut self, ms: u32);

    /// Kill indicators and buzzer — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a
/// recording buffer in tests, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
