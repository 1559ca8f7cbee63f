//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | dist={}cm band={} | cycles={} timeouts={} | up={}s",
                    t.distance_cm,
                    t.band.name(),
                    t.cycle_count,
                    t.timeouts,
                    t.uptime_secs,
                );
            }
            AppEvent::MeasurementCompleted { distance_cm, band } => {
                info!("RANGE | {}cm -> {}", distance_cm, band.name());
            }
            AppEvent::BandChanged { from, to } => {
                info!("BAND  | {} -> {}", from.name(), to.name());
            }
            AppEvent::EchoTimeout => {
                warn!("RANGE | no echo within timeout");
            }
            AppEvent::Started => {
                info!("START | proximity alarm running");
            }
        }
    }
}
