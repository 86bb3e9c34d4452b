//! Modifier byte tracking.

use crate::keymap::VirtualKey;

/// How the modifier byte is kept up to date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModifierStrategy {
    /// Flip one bit per modifier key transition.
    Edge,
    /// Recompute the whole byte from the held state of every modifier
    /// after each processed event.
    Level,
}

/// Bitmask of the eight HID modifier keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModifierState(u8);

impl ModifierState {
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const LEFT_GUI: u8 = 0x08;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
    pub const RIGHT_GUI: u8 = 0x80;

    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Edge-driven update. Returns `false` (and changes nothing) when
    /// `key` is not a modifier.
    pub fn apply(&mut self, key: VirtualKey, pressed: bool) -> bool {
        let Some(bit) = modifier_bit(key) else {
            return false;
        };
        if pressed {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
        true
    }

    /// Level-driven update: rebuild the byte from `is_held`.
    pub fn refresh(&mut self, mut is_held: impl FnMut(VirtualKey) -> bool) {
        self.0 = VirtualKey::MODIFIERS
            .iter()
            .filter(|key| is_held(**key))
            .filter_map(|key| modifier_bit(*key))
            .fold(0, |mask, bit| mask | bit);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// HID modifier bit for `key`, or `None` for non-modifier keys.
pub fn modifier_bit(key: VirtualKey) -> Option<u8> {
    match key {
        VirtualKey::LeftCtrl => Some(ModifierState::LEFT_CTRL),
        VirtualKey::LeftShift => Some(ModifierState::LEFT_SHIFT),
        VirtualKey::LeftAlt => Some(ModifierState::LEFT_ALT),
        VirtualKey::LeftGui => Some(ModifierState::LEFT_GUI),
        VirtualKey::RightCtrl => Some(ModifierState::RIGHT_CTRL),
        VirtualKey::RightShift => Some(ModifierState::RIGHT_SHIFT),
        VirtualKey::RightAlt => Some(ModifierState::RIGHT_ALT),
        VirtualKey::RightGui => Some(ModifierState::RIGHT_GUI),
        _ => None,
    }
}
