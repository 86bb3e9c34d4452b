//! Scancode Set 2 decoding.
//!
//! Turns the byte stream of a PS/2 keyboard into press/release events
//! for *physical* keys, named by their unshifted `VirtualKey` (keypad
//! keys by their NumLock-on form). Layout handling happens later.

use crate::keymap::VirtualKey;

const PREFIX_EXTENDED: u8 = 0xE0;
const PREFIX_PAUSE: u8 = 0xE1;
const PREFIX_RELEASE: u8 = 0xF0;

/// Bytes following `E1` in the Pause make sequence.
const PAUSE_TAIL: [u8; 7] = [0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];

/// Decoded scancode sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanEvent {
    Key { key: VirtualKey, pressed: bool },
    /// Pause has no break code; the keyboard only sends the make sequence.
    Pause,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Extended,
    Release,
    ExtendedRelease,
    /// Inside the `E1` sequence, number of tail bytes already seen.
    Pause(u8),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScancodeDecoder {
    state: State,
}

impl ScancodeDecoder {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Feed one received byte.
    pub fn feed(&mut self, byte: u8) -> Option<ScanEvent> {
        match self.state {
            State::Idle => match byte {
                PREFIX_EXTENDED => self.enter(State::Extended),
                PREFIX_RELEASE => self.enter(State::Release),
                PREFIX_PAUSE => self.enter(State::Pause(0)),
                0xAA => {
                    info!("PS/2: keyboard self-test passed");
                    None
                }
                0xFA | 0xEE => None,
                0x00 | 0xFF | 0xFC | 0xFD | 0xFE => {
                    warn!("PS/2: controller byte {=u8:#x}", byte);
                    None
                }
                code => self.key(base_key(code), code, false, true),
            },
            State::Extended => match byte {
                PREFIX_RELEASE => self.enter(State::ExtendedRelease),
                code => {
                    self.state = State::Idle;
                    self.key(extended_key(code), code, true, true)
                }
            },
            State::Release => {
                self.state = State::Idle;
                self.key(base_key(byte), byte, false, false)
            }
            State::ExtendedRelease => {
                self.state = State::Idle;
                self.key(extended_key(byte), byte, true, false)
            }
            State::Pause(seen) => {
                if PAUSE_TAIL.get(seen as usize) != Some(&byte) {
                    warn!("PS/2: broken pause sequence at {=u8:#x}", byte);
                    self.state = State::Idle;
                    return None;
                }
                if seen as usize + 1 == PAUSE_TAIL.len() {
                    self.state = State::Idle;
                    Some(ScanEvent::Pause)
                } else {
                    self.state = State::Pause(seen + 1);
                    None
                }
            }
        }
    }

    fn enter(&mut self, state: State) -> Option<ScanEvent> {
        self.state = state;
        None
    }

    fn key(
        &mut self,
        key: Option<VirtualKey>,
        code: u8,
        extended: bool,
        pressed: bool,
    ) -> Option<ScanEvent> {
        self.state = State::Idle;
        match key {
            Some(key) => Some(ScanEvent::Key { key, pressed }),
            None => {
                // E0 12 / E0 59 are the fake shifts around PrintScreen and
                // the extended navigation keys; drop them quietly.
                if !(extended && (code == 0x12 || code == 0x59)) {
                    debug!("PS/2: unknown scancode {=u8:#x} (extended={})", code, extended);
                }
                None
            }
        }
    }
}

/// Physical key for a non-prefixed Set 2 code.
pub fn base_key(code: u8) -> Option<VirtualKey> {
    use VirtualKey::*;

    let key = match code {
        0x76 => Escape,
        0x05 => F1,
        0x06 => F2,
        0x04 => F3,
        0x0C => F4,
        0x03 => F5,
        0x0B => F6,
        0x83 => F7,
        0x0A => F8,
        0x01 => F9,
        0x09 => F10,
        0x78 => F11,
        0x07 => F12,
        0x84 => SysReq,

        0x0E => Grave,
        0x16 => Digit1,
        0x1E => Digit2,
        0x26 => Digit3,
        0x25 => Digit4,
        0x2E => Digit5,
        0x36 => Digit6,
        0x3D => Digit7,
        0x3E => Digit8,
        0x46 => Digit9,
        0x45 => Digit0,
        0x4E => Minus,
        0x55 => Equals,
        0x66 => Backspace,

        0x0D => Tab,
        0x15 => LetterQ,
        0x1D => LetterW,
        0x24 => LetterE,
        0x2D => LetterR,
        0x2C => LetterT,
        0x35 => LetterY,
        0x3C => LetterU,
        0x43 => LetterI,
        0x44 => LetterO,
        0x4D => LetterP,
        0x54 => LeftBracket,
        0x5B => RightBracket,
        0x5D => Backslash,

        0x58 => CapsLock,
        0x1C => LetterA,
        0x1B => LetterS,
        0x23 => LetterD,
        0x2B => LetterF,
        0x34 => LetterG,
        0x33 => LetterH,
        0x3B => LetterJ,
        0x42 => LetterK,
        0x4B => LetterL,
        0x4C => Semicolon,
        0x52 => Quote,
        0x5A => Return,

        0x12 => LeftShift,
        0x1A => LetterZ,
        0x22 => LetterX,
        0x21 => LetterC,
        0x2A => LetterV,
        0x32 => LetterB,
        0x31 => LetterN,
        0x3A => LetterM,
        0x41 => Comma,
        0x49 => Period,
        0x4A => Slash,
        0x59 => RightShift,

        0x14 => LeftCtrl,
        0x11 => LeftAlt,
        0x29 => Space,

        0x7E => ScrollLock,
        0x77 => NumLock,
        0x7C => KpMultiply,
        0x7B => KpMinus,
        0x79 => KpPlus,
        0x71 => KpPeriod,
        0x70 => Kp0,
        0x69 => Kp1,
        0x72 => Kp2,
        0x7A => Kp3,
        0x6B => Kp4,
        0x73 => Kp5,
        0x74 => Kp6,
        0x6C => Kp7,
        0x75 => Kp8,
        0x7D => Kp9,

        _ => return None,
    };
    Some(key)
}

/// Physical key for an `E0`-prefixed Set 2 code.
pub fn extended_key(code: u8) -> Option<VirtualKey> {
    use VirtualKey::*;

    let key = match code {
        0x1F => LeftGui,
        0x14 => RightCtrl,
        0x27 => RightGui,
        0x11 => RightAlt,
        0x2F => Application,
        0x7C => PrintScreen,
        0x7E => Break,
        0x70 => Insert,
        0x6C => Home,
        0x7D => PageUp,
        0x71 => Delete,
        0x69 => End,
        0x7A => PageDown,
        0x75 => Up,
        0x6B => Left,
        0x72 => Down,
        0x74 => Right,
        0x4A => KpDivide,
        0x5A => KpEnter,
        _ => return None,
    };
    Some(key)
}
