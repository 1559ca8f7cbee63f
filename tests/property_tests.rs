//! Property and fuzz-style tests for robustness of the core logic.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;
use proxalarm::band::{classify, indicator_levels, AlertBand};
use proxalarm::config::BandThresholds;
use proxalarm::sensors::ultrasonic::{
    arm_capture, echo_isr_handler, sample_ready, ticks_to_distance, EdgePhase, edge_phase,
    TICKS_PER_CM,
};
use std::sync::{Mutex, MutexGuard};

// ── Classifier invariants ─────────────────────────────────────

fn arb_thresholds() -> impl Strategy<Value = BandThresholds> {
    // Four strictly ascending cut-offs.
    (0u16..100, 1u16..100, 1u16..100, 1u16..100).prop_map(|(a, b, c, d)| BandThresholds {
        danger_max_cm: a,
        warning_max_cm: a + b,
        safe_max_cm: a + b + c,
        detected_max_cm: a + b + c + d,
    })
}

proptest! {
    /// Every distance classifies into exactly the band whose interval
    /// contains it — the five bands partition the distance axis.
    #[test]
    fn classify_matches_interval_definition(
        distance in 0u16..=u16::MAX,
        th in arb_thresholds(),
    ) {
        prop_assume!(th.is_valid());
        let band = classify(distance, &th);
        let expected = if distance <= th.danger_max_cm {
            AlertBand::Danger
        } else if distance <= th.warning_max_cm {
            AlertBand::Warning
        } else if distance <= th.safe_max_cm {
            AlertBand::Safe
        } else if distance <= th.detected_max_cm {
            AlertBand::Detected
        } else {
            AlertBand::Idle
        };
        prop_assert_eq!(band, expected);
    }

    /// Moving the obstacle further away never increases severity.
    #[test]
    fn classify_is_monotonic_in_distance(
        near in 0u16..=u16::MAX,
        delta in 0u16..=1000,
        th in arb_thresholds(),
    ) {
        prop_assume!(th.is_valid());
        let far = near.saturating_add(delta);
        let near_band = classify(near, &th) as u8;
        let far_band = classify(far, &th) as u8;
        prop_assert!(far_band >= near_band);
    }

    /// Only the Idle band darkens the red channel, and lit channels are
    /// always a prefix of (red, green, blue).
    #[test]
    fn indicator_levels_light_a_prefix(distance in 0u16..=u16::MAX, th in arb_thresholds()) {
        prop_assume!(th.is_valid());
        let band = classify(distance, &th);
        let (r, g, b) = indicator_levels(band);
        prop_assert!(!(g && !r));
        prop_assert!(!(b && !g));
        prop_assert_eq!(r, band != AlertBand::Idle);
    }
}

// ── Tick conversion invariants ────────────────────────────────

proptest! {
    /// The conversion truncates: below the saturation point the result
    /// is never an overestimate and is off by less than one full
    /// centimetre of ticks.
    #[test]
    fn conversion_truncates_toward_zero(ticks in 0u32..TICKS_PER_CM * 65_536) {
        let cm = u32::from(ticks_to_distance(ticks));
        prop_assert!(cm * TICKS_PER_CM <= ticks);
        prop_assert!(ticks - cm * TICKS_PER_CM < TICKS_PER_CM);
    }

    /// Beyond the saturation point everything reads as `u16::MAX`.
    #[test]
    fn conversion_saturates(ticks in TICKS_PER_CM * 65_536..=u32::MAX) {
        prop_assert_eq!(ticks_to_distance(ticks), u16::MAX);
    }

    /// Longer echoes never read as shorter distances.
    #[test]
    fn conversion_is_monotonic(a in 0u32..=u32::MAX, b in 0u32..=u32::MAX) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ticks_to_distance(lo) <= ticks_to_distance(hi));
    }
}

// ── Capture state machine invariants ──────────────────────────
//
// The capture cell is process-global, so these serialise on a lock.

static CAPTURE_LOCK: Mutex<()> = Mutex::new(());

fn capture_lock() -> MutexGuard<'static, ()> {
    CAPTURE_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

proptest! {
    /// No sequence of edge timestamps can wedge the capture: re-arming
    /// always restores a state from which one clean edge pair yields
    /// exactly one ready sample.
    #[test]
    fn arbitrary_edges_never_wedge_the_capture(
        edges in proptest::collection::vec(0u32..=u32::MAX, 0..32),
        rise in 0u32..=u32::MAX,
        width in 1u32..=1_000_000,
    ) {
        let _g = capture_lock();

        arm_capture();
        for t in edges {
            echo_isr_handler(t);
        }

        arm_capture();
        prop_assert_eq!(edge_phase(), EdgePhase::AwaitingRising);
        prop_assert!(!sample_ready());

        echo_isr_handler(rise);
        prop_assert!(!sample_ready());
        echo_isr_handler(rise.wrapping_add(width));
        prop_assert!(sample_ready());
    }

    /// An edge pair always measures the pulse width, independent of where
    /// in the wrapping capture clock it starts.
    #[test]
    fn pulse_width_is_wrap_independent(
        rise in 0u32..=u32::MAX,
        width in 0u32..=10_000_000,
    ) {
        let _g = capture_lock();

        arm_capture();
        echo_isr_handler(rise);
        echo_isr_handler(rise.wrapping_add(width));
        prop_assert!(sample_ready());
        prop_assert_eq!(
            u32::from(ticks_to_distance(width)),
            (width / TICKS_PER_CM).min(u32::from(u16::MAX))
        );
    }
}
