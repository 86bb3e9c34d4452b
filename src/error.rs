//! Firmware error type.
//!
//! All variants carry only fixed-size data and implement
//! `defmt::Format` for on-target logging.

use defmt::Format;
use ps2ble::ps2::FrameError;

/// Top-level error type used by the firmware tasks.
#[derive(Debug, Clone, Copy, Format)]
pub enum Error {
    /// The SoftDevice rejected a BLE operation.
    Ble(BleError),

    /// A PS/2 frame failed validation and was discarded.
    Ps2(FrameError),
}

/// BLE failures the peripheral task can recover from.
#[derive(Debug, Clone, Copy, Format)]
pub enum BleError {
    /// Registering the HID service or one of its attributes failed.
    GattRegister,
    /// Advertising could not start or ended without a connection.
    AdvertiseFailed,
    /// An input report notification was refused.
    NotifyFailed,
}

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Error::Ps2(e)
    }
}
