//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the alert controller and per-cycle bookkeeping.
//! It exposes a clean, hardware-agnostic API.  All I/O flows through
//! port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  RangerPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//!   AlertPort ◀── │  classify · render      │
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::alert::AlertController;
use crate::band::{classify, AlertBand};
use crate::config::SystemConfig;

use super::events::{AppEvent, TelemetryData};
use super::ports::{AlertPort, EventSink, RangerPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    alert: AlertController,
    /// Band from the previous successful measurement; `None` until the
    /// first echo arrives.
    last_band: Option<AlertBand>,
    cycle_count: u64,
    timeout_count: u32,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        let alert = AlertController::new(config.blink_phase_ms);
        Self {
            config,
            alert,
            last_band: None,
            cycle_count: 0,
            timeout_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full measurement cycle: measure → classify → render.
    ///
    /// The `hw` parameter satisfies **both** [`RangerPort`] and
    /// [`AlertPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    ///
    /// On echo timeout the previous output state is left untouched, so
    /// a transient dropout never blanks an active alert.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl RangerPort + AlertPort),
        sink: &mut impl EventSink,
        uptime_secs: u64,
    ) {
        self.cycle_count += 1;

        // 1. Measure via RangerPort
        let reading = match hw.measure() {
            Ok(r) => r,
            Err(e) => {
                self.timeout_count += 1;
                warn!("measurement failed: {} (total {})", e, self.timeout_count);
                sink.emit(&AppEvent::EchoTimeout);
                return;
            }
        };

        // 2. Classify
        let band = classify(reading.distance_cm, &self.config.thresholds);

        // 3. Emit a transition event if the band moved
        if let Some(prev) = self.last_band {
            if prev != band {
                info!("band changed: {} -> {}", prev.name(), band.name());
                sink.emit(&AppEvent::BandChanged {
                    from: prev,
                    to: band,
                });
            }
        }
        self.last_band = Some(band);

        // 4. Render via AlertPort
        self.alert.render(reading.distance_cm, band, hw);

        sink.emit(&AppEvent::MeasurementCompleted {
            distance_cm: reading.distance_cm,
            band,
        });

        // 5. Periodic telemetry
        if self.config.telemetry_interval_cycles > 0
            && self.cycle_count % u64::from(self.config.telemetry_interval_cycles) == 0
        {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry(
                reading.distance_cm,
                band,
                uptime_secs,
            )));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    fn build_telemetry(&self, distance_cm: u16, band: AlertBand, uptime_secs: u64) -> TelemetryData {
        TelemetryData {
            distance_cm,
            band,
            cycle_count: self.cycle_count,
            timeouts: self.timeout_count,
            uptime_secs,
        }
    }

    /// Band from the most recent successful measurement.
    pub fn last_band(&self) -> Option<AlertBand> {
        self.last_band
    }

    /// Total measurement cycles attempted since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Total echo timeouts observed since startup.
    pub fn timeout_count(&self) -> u32 {
        self.timeout_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }
}
