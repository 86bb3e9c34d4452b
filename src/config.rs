//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and translator
//! policy switches live here so they can be tuned in one place.

use crate::translator::ModifierStrategy;

// Translator

/// How the modifier byte is maintained.
///
/// `Level` re-reads the held state of all eight modifier keys after every
/// processed event and recovers from missed or duplicated transitions.
pub const MODIFIER_STRATEGY: ModifierStrategy = ModifierStrategy::Level;

/// Clear modifier and pressed-key state whenever the link (re)connects,
/// so keys released while disconnected are never reported as held.
pub const RESET_ON_RECONNECT: bool = true;

/// Fall back to the input channel's character conversion for keys that
/// have no entry in the keycode table. Only 7-bit results are accepted.
pub const LEGACY_ASCII_FALLBACK: bool = false;

/// Translator tick period (ms). One key event is serviced per tick.
pub const TRANSLATOR_TICK_MS: u64 = 1;

// PS/2

/// Maximum number of decoded key events waiting for the translator.
pub const KEY_EVENT_QUEUE_DEPTH: usize = 32;

/// Maximum number of simultaneously held keys tracked by the decoder.
pub const HELD_KEY_CAPACITY: usize = 16;

/// A clock gap longer than this (µs) abandons a half-received frame.
/// Devices clock at 10–16.7 kHz, so a whole frame takes under 1.1 ms.
pub const PS2_FRAME_TIMEOUT_US: u64 = 2_000;

// BLE

/// Advertised device name.
pub const BLE_DEVICE_NAME: &str = "PS2 Keyboard";

/// GAP appearance: HID keyboard (0x03C1).
pub const BLE_APPEARANCE_KEYBOARD: u16 = 0x03C1;

/// Advertising interval (in 0.625 ms units). 48 = 30 ms, fast reconnect.
pub const BLE_ADV_INTERVAL: u32 = 48;

/// Pause before advertising again after a failed attempt (ms).
pub const BLE_ADV_RETRY_MS: u64 = 1_000;

/// BLE connection interval range (in 1.25 ms units).
/// 6 = 7.5 ms (lowest latency for HID).
pub const BLE_CONN_INTERVAL_MIN: u16 = 6;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Depth of the translator → BLE notify channel.
pub const REPORT_QUEUE_DEPTH: usize = 16;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are picked in `main.rs`.  Adjust for your custom PCB.
//
//   PS/2 CLOCK   → P0.03  (open-drain, external 4.7k pull-up to 5 V via level shifter)
//   PS/2 DATA    → P0.04
//   Status LED   → P0.13  (LED1 on the DK, active-low)
