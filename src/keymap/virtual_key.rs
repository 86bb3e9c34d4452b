//! Device-native virtual key identifiers.
//!
//! A `VirtualKey` names what the input channel reported, not a HID usage.
//! Layout-dependent variants (upper-case letters, shifted symbols, keypad
//! navigation with NumLock off) are distinct keys; the alternate-key table
//! folds them back onto base keys before usage lookup.

/// Virtual key as produced by the keyboard input channel.
///
/// No numeric ordering is implied; compare and look up only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VirtualKey {
    // Letters, lower case (base form)
    LetterA,
    LetterB,
    LetterC,
    LetterD,
    LetterE,
    LetterF,
    LetterG,
    LetterH,
    LetterI,
    LetterJ,
    LetterK,
    LetterL,
    LetterM,
    LetterN,
    LetterO,
    LetterP,
    LetterQ,
    LetterR,
    LetterS,
    LetterT,
    LetterU,
    LetterV,
    LetterW,
    LetterX,
    LetterY,
    LetterZ,

    // Letters, upper case (alternate form)
    CapitalA,
    CapitalB,
    CapitalC,
    CapitalD,
    CapitalE,
    CapitalF,
    CapitalG,
    CapitalH,
    CapitalI,
    CapitalJ,
    CapitalK,
    CapitalL,
    CapitalM,
    CapitalN,
    CapitalO,
    CapitalP,
    CapitalQ,
    CapitalR,
    CapitalS,
    CapitalT,
    CapitalU,
    CapitalV,
    CapitalW,
    CapitalX,
    CapitalY,
    CapitalZ,

    // Digit row
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Shifted digit row
    RightParen,
    Exclaim,
    At,
    Hash,
    Dollar,
    Percent,
    Caret,
    Ampersand,
    Asterisk,
    LeftParen,

    // Punctuation and their shifted synonyms
    Minus,
    Underscore,
    Equals,
    Plus,
    LeftBracket,
    LeftBrace,
    RightBracket,
    RightBrace,
    Backslash,
    Pipe,
    Semicolon,
    Colon,
    Quote,
    DoubleQuote,
    Grave,
    Tilde,
    Comma,
    Less,
    Period,
    Greater,
    Slash,
    Question,

    // Editing and whitespace
    Space,
    Return,
    Escape,
    Backspace,
    Tab,

    // Locks
    CapsLock,
    NumLock,
    ScrollLock,

    // System
    PrintScreen,
    SysReq,
    Pause,
    Break,
    Application,

    // Navigation cluster
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Keypad, NumLock on
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpPeriod,
    KpEnter,
    KpPlus,
    KpMinus,
    KpMultiply,
    KpDivide,

    // Keypad, NumLock off
    KpInsert,
    KpDelete,
    KpHome,
    KpEnd,
    KpPageUp,
    KpPageDown,
    KpUp,
    KpDown,
    KpLeft,
    KpRight,
    KpCenter,

    // Modifiers
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftGui,
    RightCtrl,
    RightShift,
    RightAlt,
    RightGui,
}

impl VirtualKey {
    /// The eight modifier keys, in HID modifier-bit order.
    pub const MODIFIERS: [VirtualKey; 8] = [
        VirtualKey::LeftCtrl,
        VirtualKey::LeftShift,
        VirtualKey::LeftAlt,
        VirtualKey::LeftGui,
        VirtualKey::RightCtrl,
        VirtualKey::RightShift,
        VirtualKey::RightAlt,
        VirtualKey::RightGui,
    ];

    /// Returns `true` for the eight Ctrl/Shift/Alt/GUI keys.
    pub fn is_modifier(self) -> bool {
        Self::MODIFIERS.contains(&self)
    }
}
