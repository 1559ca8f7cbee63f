//! HC-SR04 ultrasonic ranging sensor driver.
//!
//! One measurement cycle:
//!
//! ```text
//!  foreground                         GPIO ISR
//!  ──────────                         ────────
//!  arm_capture()
//!  trigger high, 10 µs, low
//!  echo_intr_enable()
//!  poll sample-ready ──┐
//!                      │   rising edge  → record rise time,
//!                      │                  switch polarity to falling
//!                      │   falling edge → ticks = now − rise,
//!                      │                  set sample-ready
//!  ◀───────────────────┘
//!  echo_intr_disable()
//!  clear sample-ready, read ticks
//!  distance = ticks / 117
//! ```
//!
//! The ISR and the foreground share a single-slot cell (phase, rise time,
//! ticks, ready flag) of module-level atomics: the ISR is the only writer
//! of the result, the foreground the only consumer.  Release/Acquire pairs
//! order the ticks store before the ready store; the foreground disables
//! the echo interrupt before consuming, so no edge can interleave with the
//! read.  A second echo pulse arriving while a sample sits unconsumed
//! simply overwrites it — last edge pair wins, nothing already observed is
//! lost.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real GPIO edges drive [`echo_isr_handler`] via hw_init.
//! On host/test: [`sim_set_echo_ticks`] injects a synthetic echo through
//! the same handler, or forces the no-echo timeout path.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::drivers::{delay, hw_init};
use crate::error::SensorError;

/// Capture-clock ticks per centimetre of obstacle distance.
///
/// Encodes the sensor's round-trip time-to-distance ratio at the 2 MHz
/// capture clock (58 µs/cm × 2 ticks/µs).  Re-derive if the tick rate
/// changes.
pub const TICKS_PER_CM: u32 = 117;

/// Capture-clock rate relative to the microsecond timer.
pub const CAPTURE_TICKS_PER_US: u32 = 2;

/// Trigger pulse width.  Shorter pulses may fail to start the sensor;
/// longer ones are wasted latency.
pub const TRIGGER_PULSE_US: u32 = 10;

/// Sample-ready polling granularity while waiting for the echo.
const POLL_INTERVAL_US: u32 = 50;

// ── Capture state machine ─────────────────────────────────────

/// Which edge of the echo pulse the capture is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EdgePhase {
    AwaitingRising = 0,
    AwaitingFalling = 1,
}

/// Current capture phase.  Written by `arm_capture()` and the ISR.
static ECHO_PHASE: AtomicU8 = AtomicU8::new(EdgePhase::AwaitingRising as u8);
/// Capture-clock timestamp of the last rising edge.
static ECHO_RISE_TICKS: AtomicU32 = AtomicU32::new(0);
/// Elapsed ticks of the last completed echo pulse.
static ECHO_TICKS: AtomicU32 = AtomicU32::new(0);
/// Set by the ISR when a full edge pair has been captured; cleared by the
/// foreground after consuming the result.
static SAMPLE_READY: AtomicBool = AtomicBool::new(false);

/// The capture phase as seen from the foreground.
pub fn edge_phase() -> EdgePhase {
    if ECHO_PHASE.load(Ordering::Acquire) == EdgePhase::AwaitingFalling as u8 {
        EdgePhase::AwaitingFalling
    } else {
        EdgePhase::AwaitingRising
    }
}

/// Whether a captured sample is waiting to be consumed.
pub fn sample_ready() -> bool {
    SAMPLE_READY.load(Ordering::Acquire)
}

/// Reset the capture for a new measurement: phase back to AwaitingRising,
/// stale sample discarded, edge polarity back to rising.  Must be called
/// before each trigger pulse; edges arriving before `arm_capture()` have
/// no defined meaning.
pub fn arm_capture() {
    SAMPLE_READY.store(false, Ordering::Release);
    ECHO_PHASE.store(EdgePhase::AwaitingRising as u8, Ordering::Release);
    hw_init::echo_set_polarity(true);
}

/// Called from the GPIO ISR on each echo edge.  `now_ticks` is the current
/// capture-clock value (free-running, wrapping).
///
/// Lock-free; safe in interrupt context.
pub fn echo_isr_handler(now_ticks: u32) {
    if ECHO_PHASE.load(Ordering::Relaxed) == EdgePhase::AwaitingRising as u8 {
        // Rising edge: start the elapsed-time clock, wait for the fall.
        ECHO_RISE_TICKS.store(now_ticks, Ordering::Relaxed);
        hw_init::echo_set_polarity(false);
        ECHO_PHASE.store(EdgePhase::AwaitingFalling as u8, Ordering::Release);
    } else {
        // Falling edge: echo complete.  Publish ticks before the ready flag
        // so the foreground's Acquire load of the flag orders the data.
        let elapsed = now_ticks.wrapping_sub(ECHO_RISE_TICKS.load(Ordering::Relaxed));
        ECHO_TICKS.store(elapsed, Ordering::Release);
        hw_init::echo_set_polarity(true);
        ECHO_PHASE.store(EdgePhase::AwaitingRising as u8, Ordering::Release);
        SAMPLE_READY.store(true, Ordering::Release);
    }
}

/// Convert captured ticks to centimetres.  Integer division, truncating
/// toward zero; saturates at `u16::MAX` so an absurdly long pulse can
/// never wrap back into a nearby band.
pub fn ticks_to_distance(ticks: u32) -> u16 {
    (ticks / TICKS_PER_CM).min(u32::from(u16::MAX)) as u16
}

// ── Host simulation hook ──────────────────────────────────────

/// `u32::MAX` = no simulated echo (measure() times out).
#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_TICKS: AtomicU32 = AtomicU32::new(u32::MAX);

/// Configure the simulated echo for host builds.  `Some(ticks)` makes the
/// next `measure()` observe an echo of that width (injected through the
/// real ISR handler); `None` makes it time out.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_ticks(ticks: Option<u32>) {
    SIM_ECHO_TICKS.store(ticks.unwrap_or(u32::MAX), Ordering::Relaxed);
}

// ── Ranging session ───────────────────────────────────────────

/// One completed measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UltrasonicReading {
    /// Raw echo pulse width in capture ticks.
    pub ticks: u32,
    /// Derived obstacle distance in centimetres.
    pub distance_cm: u16,
}

/// Ultrasonic sensor driver.  Owns the trigger line and the measurement
/// sequencing; the echo side lives in the ISR-facing statics above.
pub struct UltrasonicSensor {
    trigger_gpio: i32,
    echo_timeout_us: u32,
}

impl UltrasonicSensor {
    pub fn new(trigger_gpio: i32, echo_timeout_ms: u32) -> Self {
        Self {
            trigger_gpio,
            echo_timeout_us: echo_timeout_ms.saturating_mul(1_000),
        }
    }

    /// Run one full ranging cycle and return the measured distance.
    ///
    /// Not reentrant — the strictly sequential measurement loop is the
    /// only caller.  Blocks the calling context for up to the echo
    /// timeout.
    pub fn measure(&mut self) -> Result<UltrasonicReading, SensorError> {
        arm_capture();

        // 10 µs trigger pulse starts the sensor's ranging cycle.
        hw_init::gpio_write(self.trigger_gpio, true);
        delay::delay_us(TRIGGER_PULSE_US);
        hw_init::gpio_write(self.trigger_gpio, false);

        hw_init::echo_intr_enable();

        #[cfg(not(target_os = "espidf"))]
        self.sim_inject_echo();

        // Bounded busy-wait on the ready flag.  The original hardware this
        // was calibrated against waited unconditionally; the timeout turns
        // a disconnected sensor into a reported error instead of a hang.
        let mut waited_us: u32 = 0;
        while !SAMPLE_READY.load(Ordering::Acquire) {
            if waited_us >= self.echo_timeout_us {
                hw_init::echo_intr_disable();
                return Err(SensorError::NoEcho);
            }
            delay::delay_us(POLL_INTERVAL_US);
            waited_us += POLL_INTERVAL_US;
        }

        // Gate the interrupt before consuming so no new edge can land
        // between clearing the flag and reading the ticks.
        hw_init::echo_intr_disable();
        SAMPLE_READY.store(false, Ordering::Release);
        let ticks = ECHO_TICKS.load(Ordering::Acquire);

        Ok(UltrasonicReading {
            ticks,
            distance_cm: ticks_to_distance(ticks),
        })
    }

    /// Feed the configured simulated echo through the real capture path.
    #[cfg(not(target_os = "espidf"))]
    fn sim_inject_echo(&self) {
        let ticks = SIM_ECHO_TICKS.load(Ordering::Relaxed);
        if ticks != u32::MAX {
            echo_isr_handler(1_000);
            echo_isr_handler(1_000u32.wrapping_add(ticks));
        }
    }
}
