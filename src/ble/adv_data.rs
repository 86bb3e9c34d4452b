//! Legacy advertising payloads for the HID peripheral.
//!
//! Each AD structure is `[len, type, data...]` where `len` counts the
//! type byte plus data. A legacy payload holds at most 31 bytes.

use heapless::Vec;

/// Maximum legacy advertising / scan-response payload length.
pub const AD_MAX_LEN: usize = 31;

pub type AdPayload = Vec<u8, AD_MAX_LEN>;

const AD_FLAGS: u8 = 0x01;
const AD_UUID16_COMPLETE: u8 = 0x03;
const AD_NAME_SHORTENED: u8 = 0x08;
const AD_NAME_COMPLETE: u8 = 0x09;
const AD_APPEARANCE: u8 = 0x19;

/// LE General Discoverable, BR/EDR not supported.
const FLAGS_GENERAL_LE_ONLY: u8 = 0x06;

/// HID service UUID (0x1812).
pub const HID_SERVICE_UUID16: u16 = 0x1812;

/// Advertising data: flags, HID service UUID and GAP appearance.
pub fn advertising_data(appearance: u16) -> AdPayload {
    let mut ad = AdPayload::new();
    let uuid = HID_SERVICE_UUID16.to_le_bytes();
    let appearance = appearance.to_le_bytes();
    // 11 bytes, always fits.
    let _ = ad.extend_from_slice(&[
        0x02,
        AD_FLAGS,
        FLAGS_GENERAL_LE_ONLY,
        0x03,
        AD_UUID16_COMPLETE,
        uuid[0],
        uuid[1],
        0x03,
        AD_APPEARANCE,
        appearance[0],
        appearance[1],
    ]);
    ad
}

/// Scan response carrying the device name, shortened if it does not fit.
pub fn scan_response(name: &str) -> AdPayload {
    let mut ad = AdPayload::new();
    let room = AD_MAX_LEN - 2;

    let (ad_type, name) = if name.len() > room {
        // Never split a UTF-8 sequence.
        let mut cut = room;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        (AD_NAME_SHORTENED, &name[..cut])
    } else {
        (AD_NAME_COMPLETE, name)
    };

    let _ = ad.push(name.len() as u8 + 1);
    let _ = ad.push(ad_type);
    let _ = ad.extend_from_slice(name.as_bytes());
    ad
}
