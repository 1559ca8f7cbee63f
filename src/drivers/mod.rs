//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod buzzer;
pub mod delay;
pub mod display;
pub mod hw_init;
pub mod indicator;
pub mod watchdog;
