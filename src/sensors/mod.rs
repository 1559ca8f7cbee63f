//! Sensor subsystem.
//!
//! One sensor on this board: the HC-SR04 ultrasonic ranger.  Its edge
//! capture runs in ISR context and hands results to the foreground through
//! lock-free atomics — see [`ultrasonic`] for the full contract.

pub mod ultrasonic;
