//! ps2ble firmware - PS/2 keyboard to BLE HID bridge on nRF52840.
//!
//! Task layout:
//!
//! - **softdevice**: runs the SoftDevice event loop
//! - **ble**: advertising, GATT server, report notifications
//! - **ps2**: clock/data GPIO → shared [`Ps2Keyboard`]
//! - **translator**: one translator poll per tick, reports → BLE channel
//! - **status_led**: on while connected, blinking while advertising

#![no_std]
#![no_main]

mod ble;
mod error;
mod ps2_port;

use core::cell::RefCell;
use core::mem;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker};
use nrf_softdevice::{raw, Softdevice};
use ps2ble::ps2::Ps2Keyboard;
use ps2ble::{config, Translator, TranslatorOptions};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::ble::hid_service::Server;
use crate::ble::BleLink;
use crate::error::{BleError, Error};
use crate::ps2_port::{KeyboardInput, SharedKeyboard};

static KEYBOARD: SharedKeyboard = Mutex::new(RefCell::new(Ps2Keyboard::new()));

/// Blink period of the status LED while no host is connected (ms).
const STATUS_BLINK_MS: u64 = 250;

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    ble::peripheral_task(sd, server).await
}

#[embassy_executor::task]
async fn ps2_task(clock: AnyPin, data: AnyPin) -> ! {
    let clock = Input::new(clock, Pull::Up);
    let data = Input::new(data, Pull::Up);
    ps2_port::run(clock, data, &KEYBOARD).await
}

#[embassy_executor::task]
async fn translator_task() -> ! {
    let mut input = KeyboardInput::new(&KEYBOARD);
    let mut link = BleLink;
    let mut translator = Translator::new(&input, TranslatorOptions::default());
    let mut ticker = Ticker::every(Duration::from_millis(config::TRANSLATOR_TICK_MS));

    loop {
        translator.poll(&mut input, &mut link);
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn status_led_task(mut led: Output<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(STATUS_BLINK_MS));
    loop {
        if ble::is_connected() {
            // Active-low.
            led.set_low();
        } else {
            led.toggle();
        }
        ticker.next().await;
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    let name = config::BLE_DEVICE_NAME;
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: name.as_ptr() as _,
            current_len: name.len() as u16,
            max_len: name.len() as u16,
            // SAFETY: an all-zero security mode means "no write access".
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ps2ble starting");

    // The SoftDevice reserves interrupt priorities 0, 1 and 4.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    let sd = Softdevice::enable(&softdevice_config());

    static SERVER: StaticCell<Server> = StaticCell::new();
    let server: &'static Server = SERVER.init(unwrap!(
        Server::new(sd).map_err(|_| Error::from(BleError::GattRegister))
    ));
    let sd: &'static Softdevice = sd;

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));

    // PS/2 CLOCK → P0.03, DATA → P0.04 (see config.rs)
    unwrap!(spawner.spawn(ps2_task(p.P0_03.degrade(), p.P0_04.degrade())));
    unwrap!(spawner.spawn(translator_task()));

    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);
    unwrap!(spawner.spawn(status_led_task(led)));

    info!("All tasks spawned");
}
