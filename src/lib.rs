//! Hardware-independent core of ps2ble.
//!
//! Everything here builds for the host as well as the nRF52840, so the
//! translator and the PS/2 decoding can be unit-tested without a board.
//!
//! Usage: `cargo test`
//!
//! The firmware (`src/main.rs`, feature `embedded`) links this library
//! and adds the BLE transport and the GPIO side of the PS/2 port.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod hid;
pub mod keymap;
pub mod ps2;
pub mod translator;

pub use hid::KeyboardReport;
pub use keymap::VirtualKey;
pub use translator::{InputSource, KeyEvent, ReportSink, Translator, TranslatorOptions};

// BLE payload helpers live next to the firmware's BLE code but are pure
// logic, so they are compiled here for host tests as well.
#[path = "ble/adv_data.rs"]
mod ble_adv_data_impl;

pub mod ble {
    pub mod adv_data {
        pub use crate::ble_adv_data_impl::{
            advertising_data, scan_response, AdPayload, AD_MAX_LEN, HID_SERVICE_UUID16,
        };
    }
}
