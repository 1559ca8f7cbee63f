//! GPIO pin assignments for the ProxAlarm main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Ultrasonic ranging sensor (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs trigger pulse starts one ranging cycle.
pub const TRIGGER_GPIO: i32 = 5;
/// Digital input: echo pulse whose width encodes round-trip time.
/// Edge interrupts on this pin drive the capture state machine.
pub const ECHO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicator LEDs (three discrete channels)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Buzzer (active buzzer module, on/off via transistor)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Character LCD (HD44780-class, 4-bit parallel mode)
// ---------------------------------------------------------------------------

/// Register select: LOW = command, HIGH = data.
pub const LCD_RS_GPIO: i32 = 15;
/// Enable strobe — data is latched on the falling edge.
pub const LCD_EN_GPIO: i32 = 16;
/// Upper data nibble, D4..D7.
pub const LCD_D4_GPIO: i32 = 17;
pub const LCD_D5_GPIO: i32 = 18;
pub const LCD_D6_GPIO: i32 = 8;
pub const LCD_D7_GPIO: i32 = 3;
