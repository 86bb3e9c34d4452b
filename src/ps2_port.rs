//! PS/2 port: GPIO clock/data lines feeding the shared decoder.
//!
//! The device drives the clock; data is valid on each falling edge.
//! A gap longer than [`PS2_FRAME_TIMEOUT_US`] abandons a partial frame
//! so a glitch cannot shift every following byte.

use core::cell::RefCell;

use crate::error::Error;
use defmt::debug;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{with_timeout, Duration};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use ps2ble::config::PS2_FRAME_TIMEOUT_US;
use ps2ble::keymap::VirtualKey;
use ps2ble::ps2::{layout, Ps2Keyboard};
use ps2ble::{InputSource, KeyEvent};

/// Decoder state shared between the port task and the translator task.
pub type SharedKeyboard = Mutex<CriticalSectionRawMutex, RefCell<Ps2Keyboard>>;

/// Receive bits forever.
pub async fn run<C, D>(mut clock: C, mut data: D, keyboard: &'static SharedKeyboard) -> !
where
    C: Wait,
    D: InputPin,
{
    let timeout = Duration::from_micros(PS2_FRAME_TIMEOUT_US);

    loop {
        match with_timeout(timeout, clock.wait_for_falling_edge()).await {
            Ok(Ok(())) => {
                // Data stays valid for the whole clock-low half period.
                let level = data.is_high().unwrap_or(true);
                if let Err(e) = keyboard.lock(|kb| kb.borrow_mut().push_bit(level)) {
                    debug!("PS/2: {}", Error::from(e));
                }
            }
            Ok(Err(_)) => debug!("PS/2: clock pin error"),
            Err(_) => keyboard.lock(|kb| kb.borrow_mut().frame_timeout()),
        }
    }
}

/// Translator-side view of the [`SharedKeyboard`].
pub struct KeyboardInput {
    keyboard: &'static SharedKeyboard,
}

impl KeyboardInput {
    pub fn new(keyboard: &'static SharedKeyboard) -> Self {
        Self { keyboard }
    }
}

impl InputSource for KeyboardInput {
    fn event_available(&self) -> bool {
        self.keyboard.lock(|kb| kb.borrow().event_available())
    }

    fn next_event(&mut self) -> Option<KeyEvent> {
        self.keyboard.lock(|kb| kb.borrow_mut().next_event())
    }

    fn is_key_held(&self, key: VirtualKey) -> bool {
        self.keyboard.lock(|kb| kb.borrow().is_key_held(key))
    }

    fn alternate_keys(&self) -> &[(VirtualKey, VirtualKey)] {
        layout::US_ALTERNATES
    }

    fn character_for(&self, key: VirtualKey) -> Option<u8> {
        layout::character_for(key)
    }
}
