//! End-to-end measurement-to-alert flow tests.
//!
//! Drives [`AppService::run_cycle`] against the recording mock hardware
//! and asserts on the full ordered command history each band produces.

use proxalarm::adapters::hardware::HardwareAdapter;
use proxalarm::app::events::AppEvent;
use proxalarm::app::service::AppService;
use proxalarm::band::AlertBand;
use proxalarm::config::SystemConfig;
use proxalarm::drivers::buzzer::Buzzer;
use proxalarm::drivers::display::Display;
use proxalarm::drivers::indicator::IndicatorLeds;
use proxalarm::error::SensorError;
use proxalarm::sensors::ultrasonic::{sim_set_echo_ticks, UltrasonicSensor};
use std::sync::{Mutex, MutexGuard};

use crate::mock_hw::{AlertCall, MockHardware, RecordingSink};

#[test]
fn danger_reading_renders_the_full_blink_sequence() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    hw.push_distance(5);

    app.run_cycle(&mut hw, &mut sink, 0);

    assert_eq!(
        hw.calls,
        vec![
            AlertCall::Home,
            AlertCall::WriteStr("      STOP      ".to_string()),
            AlertCall::SetIndicators {
                r: true,
                g: true,
                b: true
            },
            AlertCall::SetBuzzer(true),
            AlertCall::DelayMs(200),
            AlertCall::SetIndicators {
                r: false,
                g: false,
                b: false
            },
            AlertCall::SetBuzzer(false),
            AlertCall::DelayMs(200),
        ]
    );
    assert!(sink.events.contains(&AppEvent::MeasurementCompleted {
        distance_cm: 5,
        band: AlertBand::Danger,
    }));
}

#[test]
fn detected_reading_renders_readout_with_red_only() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    hw.push_distance(20);

    app.run_cycle(&mut hw, &mut sink, 0);

    assert_eq!(
        hw.calls,
        vec![
            AlertCall::Home,
            AlertCall::WriteStr("Distance= ".to_string()),
            AlertCall::WriteUint(20),
            AlertCall::WriteStr("cm".to_string()),
            AlertCall::SetIndicators {
                r: true,
                g: false,
                b: false
            },
            AlertCall::SetBuzzer(false),
        ]
    );
    assert!(!hw.buzzer_on());
}

#[test]
fn timeout_leaves_outputs_untouched_and_loop_recovers() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    hw.push_distance(3);
    hw.push_reading(Err(SensorError::NoEcho));
    hw.push_distance(13);

    app.run_cycle(&mut hw, &mut sink, 0);
    let calls_after_danger = hw.calls.len();

    app.run_cycle(&mut hw, &mut sink, 0);
    assert_eq!(
        hw.calls.len(),
        calls_after_danger,
        "a timed-out cycle must not drive any output"
    );
    assert!(sink.events.contains(&AppEvent::EchoTimeout));

    app.run_cycle(&mut hw, &mut sink, 0);
    assert!(sink.events.contains(&AppEvent::BandChanged {
        from: AlertBand::Danger,
        to: AlertBand::Safe,
    }));
    assert_eq!(hw.indicators(), Some((true, true, false)));
}

#[test]
fn band_sweep_follows_the_indicator_table() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    // (distance, expected indicator levels) across all five bands.
    let sweep = [
        (25, (false, false, false)),
        (18, (true, false, false)),
        (13, (true, true, false)),
        (8, (true, true, true)),
        (2, (false, false, false)), // Danger ends its render dark
    ];
    for (distance, expected) in sweep {
        hw.push_distance(distance);
        app.run_cycle(&mut hw, &mut sink, 0);
        assert_eq!(hw.indicators(), Some(expected), "distance {}", distance);
    }

    // Four transitions for five distinct bands.
    let transitions = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::BandChanged { .. }))
        .count();
    assert_eq!(transitions, 4);
}

// ── Full pipeline through the real drivers ────────────────────
//
// These go through UltrasonicSensor's capture cell, which is process
// global, so they serialise on a lock.

static CAPTURE_LOCK: Mutex<()> = Mutex::new(());

fn capture_lock() -> MutexGuard<'static, ()> {
    CAPTURE_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn simulated_echo_flows_through_real_drivers_to_the_display() {
    let _g = capture_lock();
    let config = SystemConfig::default();
    let ranger = UltrasonicSensor::new(proxalarm::pins::TRIGGER_GPIO, config.echo_timeout_ms);
    let mut hw = HardwareAdapter::new(ranger, Display::new(), IndicatorLeds::new(), Buzzer::new());
    let mut app = AppService::new(config);
    let mut sink = RecordingSink::default();

    // 2340 ticks / 117 = 20 cm: outer edge of the Detected band.
    sim_set_echo_ticks(Some(2340));
    app.run_cycle(&mut hw, &mut sink, 0);
    sim_set_echo_ticks(None);

    assert_eq!(hw.display_line(), "Distance= 20cm");
    assert!(sink.events.contains(&AppEvent::MeasurementCompleted {
        distance_cm: 20,
        band: AlertBand::Detected,
    }));
}

#[test]
fn missing_echo_surfaces_as_timeout_through_real_drivers() {
    let _g = capture_lock();
    let mut config = SystemConfig::default();
    config.echo_timeout_ms = 1; // keep the test fast
    let ranger = UltrasonicSensor::new(proxalarm::pins::TRIGGER_GPIO, config.echo_timeout_ms);
    let mut hw = HardwareAdapter::new(ranger, Display::new(), IndicatorLeds::new(), Buzzer::new());
    let mut app = AppService::new(config);
    let mut sink = RecordingSink::default();

    sim_set_echo_ticks(None);
    app.run_cycle(&mut hw, &mut sink, 0);

    assert_eq!(sink.events, vec![AppEvent::EchoTimeout]);
    assert_eq!(hw.display_line(), "");
}
