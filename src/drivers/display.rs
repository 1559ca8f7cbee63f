//! HD44780-class 16×2 character LCD driver (4-bit parallel mode).
//!
//! The alert pipeline only ever rewrites the first line from the home
//! position, so the driver exposes exactly `home()`, `write_str()`, and
//! `write_uint()` — no cursor addressing beyond home, no glyph handling.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the 4-bit HD44780 protocol via hw_init GPIO
//! writes and busy-wait delays.
//! On host/test: mirrors the written line into a fixed-capacity buffer so
//! tests can assert on the rendered text.

use core::fmt::Write as _;

#[cfg(target_os = "espidf")]
use crate::drivers::{delay, hw_init};
#[cfg(target_os = "espidf")]
use crate::pins;

/// Visible columns per line.
pub const LCD_COLS: usize = 16;

// HD44780 command bytes.
#[cfg(target_os = "espidf")]
const CMD_CLEAR: u8 = 0x01;
#[cfg(target_os = "espidf")]
const CMD_HOME: u8 = 0x02;
#[cfg(target_os = "espidf")]
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
#[cfg(target_os = "espidf")]
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off
#[cfg(target_os = "espidf")]
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit, 2 lines, 5x8 font

pub struct Display {
    #[cfg(not(target_os = "espidf"))]
    line: heapless::String<32>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            line: heapless::String::new(),
        }
    }

    /// Run the HD44780 power-on initialisation sequence.  Call once from
    /// main() after hw_init; further calls are harmless.
    #[cfg(target_os = "espidf")]
    pub fn init(&mut self) {
        // Datasheet 4-bit init: >40 ms after power, three 0x3 nibbles,
        // then 0x2 to enter 4-bit mode.
        delay::delay_ms(50);
        hw_init::gpio_write(pins::LCD_RS_GPIO, false);
        for _ in 0..3 {
            self.write_nibble(0x3);
            delay::delay_ms(5);
        }
        self.write_nibble(0x2);
        delay::delay_us(150);

        self.command(CMD_FUNCTION_SET);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_ENTRY_MODE);
        self.command(CMD_CLEAR);
        log::info!("display: HD44780 initialised (4-bit mode)");
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn init(&mut self) {
        self.line.clear();
        log::info!("display(sim): init");
    }

    /// Return the cursor to the home position.  Each render pass starts
    /// here and overwrites the line in place.
    #[cfg(target_os = "espidf")]
    pub fn home(&mut self) {
        self.command(CMD_HOME);
        delay::delay_ms(2); // home needs 1.52 ms
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn home(&mut self) {
        // The sim models the single overwritten line: homing starts a
        // fresh render of it.
        self.line.clear();
    }

    /// Write a string at the current cursor position.
    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_data(byte);
        }
    }

    /// Write an unsigned integer as decimal digits.
    pub fn write_uint(&mut self, value: u16) {
        let mut digits: heapless::String<5> = heapless::String::new();
        let _ = write!(digits, "{value}");
        self.write_str(&digits);
    }

    /// The currently rendered line (host builds only, for assertions).
    #[cfg(not(target_os = "espidf"))]
    pub fn line(&self) -> &str {
        &self.line
    }

    // ── Low-level protocol ────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn write_data(&mut self, byte: u8) {
        hw_init::gpio_write(pins::LCD_RS_GPIO, true);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_data(&mut self, byte: u8) {
        // Capacity overflow just drops characters, like walking off the
        // edge of the physical line.
        let _ = self.line.push(byte as char);
    }

    #[cfg(target_os = "espidf")]
    fn command(&mut self, cmd: u8) {
        hw_init::gpio_write(pins::LCD_RS_GPIO, false);
        self.write_nibble(cmd >> 4);
        self.write_nibble(cmd & 0x0F);
        if cmd <= CMD_HOME {
            delay::delay_ms(2); // clear/home are slow commands
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_nibble(&mut self, nibble: u8) {
        hw_init::gpio_write(pins::LCD_D4_GPIO, nibble & 0x1 != 0);
        hw_init::gpio_write(pins::LCD_D5_GPIO, nibble & 0x2 != 0);
        hw_init::gpio_write(pins::LCD_D6_GPIO, nibble & 0x4 != 0);
        hw_init::gpio_write(pins::LCD_D7_GPIO, nibble & 0x8 != 0);

        // Latch on the enable strobe's falling edge; >37 µs execution time.
        hw_init::gpio_write(pins::LCD_EN_GPIO, true);
        delay::delay_us(1);
        hw_init::gpio_write(pins::LCD_EN_GPIO, false);
        delay::delay_us(50);
    }
}
