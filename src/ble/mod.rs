//! Bluetooth Low Energy subsystem.
//!
//! Drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertising** - connectable, scannable advertising of the HID
//!    service until a host connects.
//! 2. **HID service** - the HOGP GATT server in [`hid_service`].
//! 3. **Transport** - [`BleLink`], the translator's [`ReportSink`]. It
//!    reads a shared connection flag and queues reports on a channel
//!    that the connection loop drains into notifications.

pub mod bonder;
pub mod hid_service;

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::{BleError, Error};
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Timer};
use hid_service::Server;
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError};
use nrf_softdevice::ble::{peripheral, Connection};
use nrf_softdevice::{raw, Softdevice};
use ps2ble::ble::adv_data;
use ps2ble::config;
use ps2ble::{KeyboardReport, ReportSink};

/// Set while a host is connected.
static CONNECTED: AtomicBool = AtomicBool::new(false);

/// Translator → connection loop.
static REPORTS: Channel<CriticalSectionRawMutex, KeyboardReport, { config::REPORT_QUEUE_DEPTH }> =
    Channel::new();

pub fn is_connected() -> bool {
    CONNECTED.load(Ordering::Acquire)
}

/// Report sink handed to the translator.
pub struct BleLink;

impl ReportSink for BleLink {
    fn is_connected(&self) -> bool {
        is_connected()
    }

    fn send_report(&mut self, report: &KeyboardReport) {
        if REPORTS.try_send(*report).is_err() {
            warn!("BLE: report queue full, dropping {}", report);
        }
    }
}

pub async fn peripheral_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let ad_payload = adv_data::advertising_data(config::BLE_APPEARANCE_KEYBOARD);
    let scan_payload = adv_data::scan_response(config::BLE_DEVICE_NAME);
    let bonder = bonder::bonder();

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ad_payload,
            scan_data: &scan_payload,
        };
        let adv_config = peripheral::Config {
            interval: config::BLE_ADV_INTERVAL,
            ..Default::default()
        };

        info!("BLE: advertising as \"{}\"", config::BLE_DEVICE_NAME);
        let conn = match peripheral::advertise_pairable(sd, adv, &adv_config, bonder).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("{}: {}", Error::from(BleError::AdvertiseFailed), e);
                Timer::after(Duration::from_millis(config::BLE_ADV_RETRY_MS)).await;
                continue;
            }
        };

        info!("BLE: host connected");
        request_conn_params(&conn);

        // Anything still queued belongs to the previous link.
        while REPORTS.try_receive().is_ok() {}
        CONNECTED.store(true, Ordering::Release);

        match select(gatt_server::run(&conn, server, |_| {}), notify_reports(&conn, server)).await {
            Either::First(_) => info!("BLE: host disconnected"),
            Either::Second(e) => warn!("BLE: link lost: {}", e),
        }

        CONNECTED.store(false, Ordering::Release);
    }
}

/// Forward queued reports as input report notifications until the link
/// drops.
async fn notify_reports(conn: &Connection, server: &Server) -> Error {
    loop {
        let report = REPORTS.receive().await;
        match server.hid.send_report(conn, &report) {
            Ok(()) => {}
            Err(NotifyValueError::Disconnected) => return BleError::NotifyFailed.into(),
            // Host has not enabled notifications yet; the report is stale
            // by the time it would.
            Err(e) => warn!("BLE: notify failed: {}", e),
        }
    }
}

fn request_conn_params(conn: &Connection) {
    let params = raw::ble_gap_conn_params_t {
        min_conn_interval: config::BLE_CONN_INTERVAL_MIN,
        max_conn_interval: config::BLE_CONN_INTERVAL_MAX,
        slave_latency: config::BLE_SLAVE_LATENCY,
        conn_sup_timeout: config::BLE_SUP_TIMEOUT,
    };
    if let Err(e) = conn.set_conn_params(params) {
        warn!("BLE: connection parameter request failed: {}", e);
    }
}
