//! HID keyboard report types and usage tables.

pub mod keyboard;
pub mod usage;

pub use keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};
