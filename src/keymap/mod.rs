//! Virtual key → HID usage translation.
//!
//! The table is a literal `match` rather than arithmetic on the
//! `VirtualKey` discriminant; ranges (letters, digits, F-keys, keypad
//! digits) are written as offsets from their first HID usage.

pub mod alternate;
pub mod virtual_key;

pub use alternate::AlternateKeyTable;
pub use virtual_key::VirtualKey;

use crate::hid::usage;

/// Map a base virtual key to its HID usage code.
///
/// Total: unknown keys and the eight modifiers yield `usage::NONE`
/// (modifiers are carried in the modifier byte, never in a key slot).
pub fn usage_for(key: VirtualKey) -> u8 {
    use VirtualKey::*;

    match key {
        LetterA | CapitalA => usage::LETTER_A,
        LetterB | CapitalB => usage::LETTER_A + 1,
        LetterC | CapitalC => usage::LETTER_A + 2,
        LetterD | CapitalD => usage::LETTER_A + 3,
        LetterE | CapitalE => usage::LETTER_A + 4,
        LetterF | CapitalF => usage::LETTER_A + 5,
        LetterG | CapitalG => usage::LETTER_A + 6,
        LetterH | CapitalH => usage::LETTER_A + 7,
        LetterI | CapitalI => usage::LETTER_A + 8,
        LetterJ | CapitalJ => usage::LETTER_A + 9,
        LetterK | CapitalK => usage::LETTER_A + 10,
        LetterL | CapitalL => usage::LETTER_A + 11,
        LetterM | CapitalM => usage::LETTER_A + 12,
        LetterN | CapitalN => usage::LETTER_A + 13,
        LetterO | CapitalO => usage::LETTER_A + 14,
        LetterP | CapitalP => usage::LETTER_A + 15,
        LetterQ | CapitalQ => usage::LETTER_A + 16,
        LetterR | CapitalR => usage::LETTER_A + 17,
        LetterS | CapitalS => usage::LETTER_A + 18,
        LetterT | CapitalT => usage::LETTER_A + 19,
        LetterU | CapitalU => usage::LETTER_A + 20,
        LetterV | CapitalV => usage::LETTER_A + 21,
        LetterW | CapitalW => usage::LETTER_A + 22,
        LetterX | CapitalX => usage::LETTER_A + 23,
        LetterY | CapitalY => usage::LETTER_A + 24,
        LetterZ | CapitalZ => usage::LETTER_A + 25,

        Digit1 => usage::DIGIT_1,
        Digit2 => usage::DIGIT_1 + 1,
        Digit3 => usage::DIGIT_1 + 2,
        Digit4 => usage::DIGIT_1 + 3,
        Digit5 => usage::DIGIT_1 + 4,
        Digit6 => usage::DIGIT_1 + 5,
        Digit7 => usage::DIGIT_1 + 6,
        Digit8 => usage::DIGIT_1 + 7,
        Digit9 => usage::DIGIT_1 + 8,
        Digit0 => usage::DIGIT_0,

        Return => usage::ENTER,
        Escape => usage::ESCAPE,
        Backspace => usage::BACKSPACE,
        Tab => usage::TAB,
        Space => usage::SPACE,

        Minus | Underscore => usage::MINUS,
        Equals | Plus => usage::EQUALS,
        LeftBracket | LeftBrace => usage::LEFT_BRACKET,
        RightBracket | RightBrace => usage::RIGHT_BRACKET,
        Backslash | Pipe => usage::BACKSLASH,
        Semicolon | Colon => usage::SEMICOLON,
        Quote | DoubleQuote => usage::QUOTE,
        Grave | Tilde => usage::GRAVE,
        Comma | Less => usage::COMMA,
        Period | Greater => usage::PERIOD,
        Slash | Question => usage::SLASH,

        CapsLock => usage::CAPS_LOCK,
        ScrollLock => usage::SCROLL_LOCK,
        NumLock => usage::NUM_LOCK,

        F1 => usage::F1,
        F2 => usage::F1 + 1,
        F3 => usage::F1 + 2,
        F4 => usage::F1 + 3,
        F5 => usage::F1 + 4,
        F6 => usage::F1 + 5,
        F7 => usage::F1 + 6,
        F8 => usage::F1 + 7,
        F9 => usage::F1 + 8,
        F10 => usage::F1 + 9,
        F11 => usage::F1 + 10,
        F12 => usage::F1 + 11,

        PrintScreen | SysReq => usage::PRINT_SCREEN,
        Pause | Break => usage::PAUSE,
        Application => usage::APPLICATION,

        Insert | KpInsert => usage::INSERT,
        Delete | KpDelete => usage::DELETE,
        Home | KpHome => usage::HOME,
        End | KpEnd => usage::END,
        PageUp | KpPageUp => usage::PAGE_UP,
        PageDown | KpPageDown => usage::PAGE_DOWN,
        Up | KpUp => usage::UP_ARROW,
        Down | KpDown => usage::DOWN_ARROW,
        Left | KpLeft => usage::LEFT_ARROW,
        Right | KpRight => usage::RIGHT_ARROW,

        Kp1 => usage::KP_1,
        Kp2 => usage::KP_1 + 1,
        Kp3 => usage::KP_1 + 2,
        Kp4 => usage::KP_1 + 3,
        Kp5 | KpCenter => usage::KP_1 + 4,
        Kp6 => usage::KP_1 + 5,
        Kp7 => usage::KP_1 + 6,
        Kp8 => usage::KP_1 + 7,
        Kp9 => usage::KP_1 + 8,
        Kp0 => usage::KP_0,
        KpPeriod => usage::KP_PERIOD,
        KpEnter => usage::KP_ENTER,
        KpPlus => usage::KP_PLUS,
        KpMinus => usage::KP_MINUS,
        KpMultiply => usage::KP_MULTIPLY,
        KpDivide => usage::KP_DIVIDE,

        LeftCtrl | LeftShift | LeftAlt | LeftGui | RightCtrl | RightShift | RightAlt
        | RightGui => usage::NONE,

        // Shifted digits only exist in a layout; they resolve through the
        // alternate-key table before reaching this map.
        Exclaim | At | Hash | Dollar | Percent | Caret | Ampersand | Asterisk | LeftParen
        | RightParen => usage::NONE,
    }
}

/// Like [`usage_for`], but consults a character conversion for keys the
/// table leaves unmapped.
///
/// This reproduces an early firmware behaviour where the printable
/// character was sent as if it were a usage code. Only non-zero 7-bit
/// values are accepted, and modifiers are never routed through it.
pub fn usage_with_fallback(
    key: VirtualKey,
    character_for: impl FnOnce(VirtualKey) -> Option<u8>,
) -> u8 {
    let code = usage_for(key);
    if code != usage::NONE || key.is_modifier() {
        return code;
    }

    match character_for(key) {
        Some(c) if c != 0 && c < 0x80 => {
            debug!("Keymap: fallback {} -> {}", key, c);
            c
        }
        _ => usage::NONE,
    }
}
