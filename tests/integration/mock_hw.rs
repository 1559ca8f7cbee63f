//! Mock hardware adapter for integration tests.
//!
//! Records every alert-output call so tests can assert on the full
//! command history without touching real GPIO registers, and plays back
//! a scripted list of ranger readings.

use proxalarm::app::events::AppEvent;
use proxalarm::app::ports::{AlertPort, EventSink, RangerPort};
use proxalarm::error::SensorError;
use proxalarm::sensors::ultrasonic::UltrasonicReading;
use std::collections::VecDeque;

// ── Alert call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum AlertCall {
    Home,
    WriteStr(String),
    WriteUint(u16),
    SetIndicators { r: bool, g: bool, b: bool },
    SetBuzzer(bool),
    DelayMs(u32),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<AlertCall>,
    readings: VecDeque<Result<UltrasonicReading, SensorError>>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            readings: VecDeque::new(),
        }
    }

    /// Queue the next reading `measure()` will return.
    pub fn push_reading(&mut self, r: Result<UltrasonicReading, SensorError>) {
        self.readings.push_back(r);
    }

    /// Queue a successful reading derived from a distance in centimetres.
    pub fn push_distance(&mut self, distance_cm: u16) {
        self.push_reading(Ok(UltrasonicReading {
            ticks: u32::from(distance_cm) * 117,
            distance_cm,
        }));
    }

    pub fn last_call(&self) -> Option<&AlertCall> {
        self.calls.last()
    }

    /// The most recently commanded indicator levels.
    pub fn indicators(&self) -> Option<(bool, bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            AlertCall::SetIndicators { r, g, b } => Some((*r, *g, *b)),
            AlertCall::AllOff => Some((false, false, false)),
            _ => None,
        })
    }

    /// The most recently commanded buzzer level.
    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                AlertCall::SetBuzzer(on) => Some(*on),
                AlertCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl RangerPort for MockHardware {
    fn measure(&mut self) -> Result<UltrasonicReading, SensorError> {
        self.readings.pop_front().unwrap_or(Err(SensorError::NoEcho))
    }
}

impl AlertPort for MockHardware {
    fn display_home(&mut self) {
        self.calls.push(AlertCall::Home);
    }

    fn display_text(&mut self, s: &str) {
        self.calls.push(AlertCall::WriteStr(s.to_string()));
    }

    fn display_uint(&mut self, value: u16) {
        self.calls.push(AlertCall::WriteUint(value));
    }

    fn set_indicators(&mut self, r: bool, g: bool, b: bool) {
        self.calls.push(AlertCall::SetIndicators { r, g, b });
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(AlertCall::SetBuzzer(on));
    }

    fn delay_ms(&mut self, ms: u32) {
        // Recorded, not slept — tests assert on the pacing calls instead
        // of waiting them out.
        self.calls.push(AlertCall::DelayMs(ms));
    }

    fn all_off(&mut self) {
        self.calls.push(AlertCall::AllOff);
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
