//! US QWERTY layout: shifted forms, NumLock keypad forms and characters.

use crate::hid::usage;
use crate::keymap::{self, VirtualKey};

use VirtualKey::*;

/// `(alternate, base)` pairs published to the translator.
pub const US_ALTERNATES: &[(VirtualKey, VirtualKey)] = &[
    (CapitalA, LetterA),
    (CapitalB, LetterB),
    (CapitalC, LetterC),
    (CapitalD, LetterD),
    (CapitalE, LetterE),
    (CapitalF, LetterF),
    (CapitalG, LetterG),
    (CapitalH, LetterH),
    (CapitalI, LetterI),
    (CapitalJ, LetterJ),
    (CapitalK, LetterK),
    (CapitalL, LetterL),
    (CapitalM, LetterM),
    (CapitalN, LetterN),
    (CapitalO, LetterO),
    (CapitalP, LetterP),
    (CapitalQ, LetterQ),
    (CapitalR, LetterR),
    (CapitalS, LetterS),
    (CapitalT, LetterT),
    (CapitalU, LetterU),
    (CapitalV, LetterV),
    (CapitalW, LetterW),
    (CapitalX, LetterX),
    (CapitalY, LetterY),
    (CapitalZ, LetterZ),
    (Exclaim, Digit1),
    (At, Digit2),
    (Hash, Digit3),
    (Dollar, Digit4),
    (Percent, Digit5),
    (Caret, Digit6),
    (Ampersand, Digit7),
    (Asterisk, Digit8),
    (LeftParen, Digit9),
    (RightParen, Digit0),
    (Underscore, Minus),
    (Plus, Equals),
    (LeftBrace, LeftBracket),
    (RightBrace, RightBracket),
    (Pipe, Backslash),
    (Colon, Semicolon),
    (DoubleQuote, Quote),
    (Tilde, Grave),
    (Less, Comma),
    (Greater, Period),
    (Question, Slash),
];

/// Lock and shift state that selects which form a key produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub shift: bool,
    pub caps_lock: bool,
    pub num_lock: bool,
}

fn is_letter(key: VirtualKey) -> bool {
    (usage::LETTER_A..=usage::LETTER_A + 25).contains(&keymap::usage_for(key))
}

/// Form of physical key `key` under `state`.
pub fn apply(key: VirtualKey, state: LayoutState) -> VirtualKey {
    if let Some(nav) = keypad_navigation(key) {
        return if state.num_lock { key } else { nav };
    }

    let shifted = if is_letter(key) {
        state.shift != state.caps_lock
    } else {
        state.shift
    };
    if !shifted {
        return key;
    }

    US_ALTERNATES
        .iter()
        .find(|(_, base)| *base == key)
        .map(|(alternate, _)| *alternate)
        .unwrap_or(key)
}

/// Keypad key as it behaves with NumLock off.
fn keypad_navigation(key: VirtualKey) -> Option<VirtualKey> {
    let nav = match key {
        Kp0 => KpInsert,
        Kp1 => KpEnd,
        Kp2 => KpDown,
        Kp3 => KpPageDown,
        Kp4 => KpLeft,
        Kp5 => KpCenter,
        Kp6 => KpRight,
        Kp7 => KpHome,
        Kp8 => KpUp,
        Kp9 => KpPageUp,
        KpPeriod => KpDelete,
        _ => return None,
    };
    Some(nav)
}

/// ASCII character a key produces, if printable or a control character.
pub fn character_for(key: VirtualKey) -> Option<u8> {
    const LOWER: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
    const UPPER: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let code = keymap::usage_for(key);
    if is_letter(key) {
        let index = (code - usage::LETTER_A) as usize;
        let upper = US_ALTERNATES.iter().any(|(alternate, _)| *alternate == key);
        return Some(if upper { UPPER[index] } else { LOWER[index] });
    }

    let c = match key {
        Digit0 | Kp0 => b'0',
        Digit1 | Kp1 => b'1',
        Digit2 | Kp2 => b'2',
        Digit3 | Kp3 => b'3',
        Digit4 | Kp4 => b'4',
        Digit5 | Kp5 => b'5',
        Digit6 | Kp6 => b'6',
        Digit7 | Kp7 => b'7',
        Digit8 | Kp8 => b'8',
        Digit9 | Kp9 => b'9',
        Exclaim => b'!',
        At => b'@',
        Hash => b'#',
        Dollar => b'$',
        Percent => b'%',
        Caret => b'^',
        Ampersand => b'&',
        Asterisk | KpMultiply => b'*',
        LeftParen => b'(',
        RightParen => b')',
        Minus | KpMinus => b'-',
        Underscore => b'_',
        Equals => b'=',
        Plus | KpPlus => b'+',
        LeftBracket => b'[',
        LeftBrace => b'{',
        RightBracket => b']',
        RightBrace => b'}',
        Backslash => b'\\',
        Pipe => b'|',
        Semicolon => b';',
        Colon => b':',
        Quote => b'\'',
        DoubleQuote => b'"',
        Grave => b'`',
        Tilde => b'~',
        Comma => b',',
        Less => b'<',
        Period | KpPeriod => b'.',
        Greater => b'>',
        Slash | KpDivide => b'/',
        Question => b'?',
        Space => b' ',
        Return | KpEnter => b'\r',
        Tab => b'\t',
        Backspace => 0x08,
        Escape => 0x1B,
        Delete => 0x7F,
        _ => return None,
    };
    Some(c)
}
