//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and installs the echo-edge ISR using raw
//! ESP-IDF sys calls.  Called once from `main()` before the measurement
//! loop starts.  Global interrupts come up with the ISR service and stay
//! up; only the echo edge source is gated around each measurement.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

// ── Peripheral init ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the measurement loop;
    // single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_echo_input()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::TRIGGER_GPIO,
        pins::BUZZER_GPIO,
        pins::LED_R_GPIO,
        pins::LED_G_GPIO,
        pins::LED_B_GPIO,
        pins::LCD_RS_GPIO,
        pins::LCD_EN_GPIO,
        pins::LCD_D4_GPIO,
        pins::LCD_D5_GPIO,
        pins::LCD_D6_GPIO,
        pins::LCD_D7_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_echo_input() -> Result<(), HwInitError> {
    // Interrupts stay disabled here; the ranging cycle enables the edge
    // source only while a measurement is in flight.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::ECHO_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: echo input configured");
    Ok(())
}

// ── GPIO write ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Echo edge interrupt ───────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn echo_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is an RTC counter read; safe in ISR
    // context.  Scale microseconds to the 2 MHz capture clock.
    let now_us = (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u32;
    crate::sensors::ultrasonic::echo_isr_handler(
        now_us.wrapping_mul(crate::sensors::ultrasonic::CAPTURE_TICKS_PER_US),
    );
}

/// Install the GPIO ISR service and register the echo edge handler.
/// Call after init_peripherals() and before the measurement loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The registered handler
    // only touches the lock-free capture cell in sensors::ultrasonic.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        gpio_set_intr_type(pins::ECHO_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE);
        gpio_isr_handler_add(pins::ECHO_GPIO, Some(echo_gpio_isr), core::ptr::null_mut());
        // Edge source stays gated; echo_intr_enable() opens it per cycle.
        gpio_intr_disable(pins::ECHO_GPIO);

        info!("hw_init: ISR service installed (echo edge capture)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

/// Open the echo edge interrupt source for one measurement.
#[cfg(target_os = "espidf")]
pub fn echo_intr_enable() {
    // SAFETY: pin configured and handler registered during init; register
    // write is race-free from the single foreground task.
    unsafe {
        gpio_intr_enable(pins::ECHO_GPIO);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn echo_intr_enable() {}

/// Gate the echo edge interrupt source after a measurement completes or
/// times out.
#[cfg(target_os = "espidf")]
pub fn echo_intr_disable() {
    // SAFETY: see echo_intr_enable().
    unsafe {
        gpio_intr_disable(pins::ECHO_GPIO);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn echo_intr_disable() {}

/// Switch the echo edge detection polarity.  Called by the capture state
/// machine: rising while idle/armed, falling between the two edges of a
/// pulse.
#[cfg(target_os = "espidf")]
pub fn echo_set_polarity(rising: bool) {
    let intr = if rising {
        gpio_int_type_t_GPIO_INTR_POSEDGE
    } else {
        gpio_int_type_t_GPIO_INTR_NEGEDGE
    };
    // SAFETY: gpio_set_intr_type is a register write the IDF documents as
    // callable from ISR context; the echo pin was configured during init.
    unsafe {
        gpio_set_intr_type(pins::ECHO_GPIO, intr);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn echo_set_polarity(_rising: bool) {}
