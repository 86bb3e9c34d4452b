//! HID Keyboard/Keypad page (0x07) usage IDs used by the keycode table.
//!
//! Values from the USB HID Usage Tables, section 10. Only anchors and
//! single-purpose keys are listed; contiguous ranges are derived from
//! their first member.

/// Reserved / no event.
pub const NONE: u8 = 0x00;

pub const LETTER_A: u8 = 0x04;
pub const DIGIT_1: u8 = 0x1E;
pub const DIGIT_0: u8 = 0x27;

pub const ENTER: u8 = 0x28;
pub const ESCAPE: u8 = 0x29;
pub const BACKSPACE: u8 = 0x2A;
pub const TAB: u8 = 0x2B;
pub const SPACE: u8 = 0x2C;
pub const MINUS: u8 = 0x2D;
pub const EQUALS: u8 = 0x2E;
pub const LEFT_BRACKET: u8 = 0x2F;
pub const RIGHT_BRACKET: u8 = 0x30;
pub const BACKSLASH: u8 = 0x31;
pub const SEMICOLON: u8 = 0x33;
pub const QUOTE: u8 = 0x34;
pub const GRAVE: u8 = 0x35;
pub const COMMA: u8 = 0x36;
pub const PERIOD: u8 = 0x37;
pub const SLASH: u8 = 0x38;
pub const CAPS_LOCK: u8 = 0x39;

pub const F1: u8 = 0x3A;

pub const PRINT_SCREEN: u8 = 0x46;
pub const SCROLL_LOCK: u8 = 0x47;
pub const PAUSE: u8 = 0x48;
pub const INSERT: u8 = 0x49;
pub const HOME: u8 = 0x4A;
pub const PAGE_UP: u8 = 0x4B;
pub const DELETE: u8 = 0x4C;
pub const END: u8 = 0x4D;
pub const PAGE_DOWN: u8 = 0x4E;
pub const RIGHT_ARROW: u8 = 0x4F;
pub const LEFT_ARROW: u8 = 0x50;
pub const DOWN_ARROW: u8 = 0x51;
pub const UP_ARROW: u8 = 0x52;

pub const NUM_LOCK: u8 = 0x53;
pub const KP_DIVIDE: u8 = 0x54;
pub const KP_MULTIPLY: u8 = 0x55;
pub const KP_MINUS: u8 = 0x56;
pub const KP_PLUS: u8 = 0x57;
pub const KP_ENTER: u8 = 0x58;
pub const KP_1: u8 = 0x59;
pub const KP_0: u8 = 0x62;
pub const KP_PERIOD: u8 = 0x63;

pub const APPLICATION: u8 = 0x65;
