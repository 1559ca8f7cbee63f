//! Proximity Alarm Firmware — Main Entry Point
//!
//! Hexagonal architecture around a blocking measurement loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter          LogEventSink    Esp32Time      │
//! │  (Ranger+Alert)           (EventSink)     (uptime)       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  measure · classify · render                   │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
mod alert;
mod band;
mod config;
mod error;
mod pins;

mod app;
mod adapters;
mod drivers;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::Esp32TimeAdapter;
use app::service::AppService;
use config::SystemConfig;
use drivers::buzzer::Buzzer;
use drivers::delay;
use drivers::display::Display;
use drivers::indicator::IndicatorLeds;
use sensors::ultrasonic::UltrasonicSensor;

/// TWDT timeout.  One cycle worst case is echo timeout plus a full
/// Danger blink pair, well under a second.
const WATCHDOG_TIMEOUT_MS: u32 = 5_000;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ProxAlarm v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = drivers::watchdog::Watchdog::new(WATCHDOG_TIMEOUT_MS);

    // ── 3. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    if !config.thresholds.is_valid() {
        return Err(anyhow::anyhow!(error::Error::Config(
            "band thresholds not strictly ascending"
        )));
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let ranger = UltrasonicSensor::new(pins::TRIGGER_GPIO, config.echo_timeout_ms);
    let mut display = Display::new();
    display.init();

    let mut hw = HardwareAdapter::new(ranger, display, IndicatorLeds::new(), Buzzer::new());
    let mut log_sink = LogEventSink::new();
    let time_adapter = Esp32TimeAdapter::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = AppService::new(config.clone());
    app.start(&mut log_sink);

    info!("System ready. Entering measurement loop.");

    // ── 6. Measurement loop ───────────────────────────────────
    loop {
        app.run_cycle(&mut hw, &mut log_sink, time_adapter.uptime_secs());
        watchdog.feed();
        delay::delay_ms(config.measurement_interval_ms);
    }
}
