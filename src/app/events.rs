//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, record in a test
//! buffer, etc.

use crate::band::AlertBand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// A measurement cycle completed with a valid echo.
    MeasurementCompleted { distance_cm: u16, band: AlertBand },

    /// The classified band changed between consecutive measurements.
    BandChanged { from: AlertBand, to: AlertBand },

    /// No echo arrived within the configured timeout.
    EchoTimeout,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryData {
    pub distance_cm: u16,
    pub band: AlertBand,
    pub cycle_count: u64,
    pub timeouts: u32,
    pub uptime_secs: u64,
}
