//! Held non-modifier keys, capped at the report's six slots.

use crate::hid::keyboard::KEY_SLOTS;
use heapless::Vec;

/// What an insertion did to the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Insert {
    Added,
    AlreadyHeld,
    /// Usage code 0; nothing to hold.
    Ignored,
    /// A seventh key arrived: the whole set was cleared.
    RolloverLockout,
}

/// Insertion-ordered, duplicate-free set of up to six usage codes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PressedKeySet {
    keys: Vec<u8, KEY_SLOTS>,
}

impl PressedKeySet {
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn insert(&mut self, code: u8) -> Insert {
        if code == 0 {
            return Insert::Ignored;
        }
        if self.keys.contains(&code) {
            return Insert::AlreadyHeld;
        }
        if self.keys.push(code).is_err() {
            self.keys.clear();
            return Insert::RolloverLockout;
        }
        Insert::Added
    }

    /// Remove `code` if held. Returns whether anything was removed.
    ///
    /// The set holds usage codes, not keys. Two keys with the same code
    /// (`Left` and `KpLeft` are both 0x50) share one slot, and releasing
    /// either frees it while the other is still down.
    pub fn remove(&mut self, code: u8) -> bool {
        match self.keys.iter().position(|&k| k == code) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, code: u8) -> bool {
        self.keys.contains(&code)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Slot contents in insertion order, zero padded.
    pub fn slots(&self) -> [u8; KEY_SLOTS] {
        let mut slots = [0u8; KEY_SLOTS];
        slots[..self.keys.len()].copy_from_slice(&self.keys);
        slots
    }
}
