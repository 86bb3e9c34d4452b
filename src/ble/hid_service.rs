//! HID-over-GATT keyboard service (HOGP device role).
//!
//! Attribute layout:
//! ```text
//! HID Service            0x1812
//!   HID Information      0x2A4A  read          bcdHID 1.11, country 0, flags
//!   Report Map           0x2A4B  read          KEYBOARD_REPORT_DESCRIPTOR
//!   HID Control Point    0x2A4C  write w/o rsp suspend / exit suspend
//!   Protocol Mode        0x2A4E  read, write   report protocol only
//!   Report (input)       0x2A4D  read, notify  7-byte keyboard report
//!     Report Reference   0x2908                [report id 1, input]
//! ```

use defmt::{debug, info};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;
use ps2ble::ble::adv_data::HID_SERVICE_UUID16;
use ps2ble::hid::keyboard::KEYBOARD_REPORT_ID;
use ps2ble::hid::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};

const HID_SERVICE: Uuid = Uuid::new_16(HID_SERVICE_UUID16);
const HID_INFORMATION: Uuid = Uuid::new_16(0x2A4A);
const REPORT_MAP: Uuid = Uuid::new_16(0x2A4B);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2A4C);
const REPORT: Uuid = Uuid::new_16(0x2A4D);
const PROTOCOL_MODE: Uuid = Uuid::new_16(0x2A4E);
const REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);

/// bcdHID 1.11, country code 0, flags: remote wake + normally connectable.
const HID_INFO_VALUE: [u8; 4] = [0x11, 0x01, 0x00, 0x03];

const REPORT_TYPE_INPUT: u8 = 0x01;
const PROTOCOL_MODE_REPORT: u8 = 0x01;

const CONTROL_SUSPEND: u8 = 0x00;
const CONTROL_EXIT_SUSPEND: u8 = 0x01;

pub struct HidService {
    control_point: u16,
    protocol_mode: u16,
    input_report: u16,
    input_report_cccd: u16,
}

impl HidService {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut service = ServiceBuilder::new(sd, HID_SERVICE)?;

        service
            .add_characteristic(
                HID_INFORMATION,
                Attribute::new(HID_INFO_VALUE).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        service
            .add_characteristic(
                REPORT_MAP,
                Attribute::new(KEYBOARD_REPORT_DESCRIPTOR).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let control_point = service
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        let protocol_mode = service
            .add_characteristic(
                PROTOCOL_MODE,
                Attribute::new([PROTOCOL_MODE_REPORT]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read().write_without_response()),
            )?
            .build();

        let mut input = service.add_characteristic(
            REPORT,
            Attribute::new([0u8; KEYBOARD_REPORT_SIZE]).security(SecurityMode::JustWorks),
            Metadata::new(Properties::new().read().notify()),
        )?;
        input.add_descriptor(
            REPORT_REFERENCE,
            Attribute::new([KEYBOARD_REPORT_ID, REPORT_TYPE_INPUT])
                .security(SecurityMode::JustWorks),
        )?;
        let input = input.build();

        let _ = service.build();

        Ok(Self {
            control_point: control_point.value_handle,
            protocol_mode: protocol_mode.value_handle,
            input_report: input.value_handle,
            input_report_cccd: input.cccd_handle,
        })
    }

    /// Notify the host of a new input report.
    pub fn send_report(
        &self,
        conn: &Connection,
        report: &KeyboardReport,
    ) -> Result<(), NotifyValueError> {
        gatt_server::notify_value(conn, self.input_report, &report.to_bytes())
    }

    fn on_write(&self, handle: u16, data: &[u8]) {
        if handle == self.input_report_cccd {
            let notify = data.first().map_or(false, |b| b & 0x01 != 0);
            info!("HID: input report notifications {}", notify);
        } else if handle == self.control_point {
            match data.first() {
                Some(&CONTROL_SUSPEND) => debug!("HID: host suspend"),
                Some(&CONTROL_EXIT_SUSPEND) => debug!("HID: host exit suspend"),
                _ => {}
            }
        } else if handle == self.protocol_mode {
            // Boot protocol is not offered; the report layout never changes.
            debug!("HID: protocol mode write {}", data);
        }
    }
}

/// GATT server exposing the HID service.
pub struct Server {
    pub hid: HidService,
}

impl Server {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        Ok(Self {
            hid: HidService::new(sd)?,
        })
    }
}

impl gatt_server::Server for Server {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        self.hid.on_write(handle, data);
        None
    }
}
