//! PS/2 keyboard as a translator input source.
//!
//! Owns the whole receive path (frame → scancode → layout) and the queue
//! of decoded key events. The firmware feeds it bits from the clock
//! interrupt side; the translator drains it through [`InputSource`].
//!
//! Two held-key views exist. `held` follows the decoder and picks the
//! form of each new press. `delivered` follows the events the translator
//! has popped, so `is_key_held` never runs ahead of the queue.

use super::frame::{FrameError, FrameReceiver};
use super::layout::{self, LayoutState};
use super::scancode::{ScanEvent, ScancodeDecoder};
use crate::config::{HELD_KEY_CAPACITY, KEY_EVENT_QUEUE_DEPTH};
use crate::keymap::VirtualKey;
use crate::translator::{InputSource, KeyEvent};
use heapless::{Deque, LinearMap, Vec};

pub struct Ps2Keyboard {
    frame: FrameReceiver,
    decoder: ScancodeDecoder,
    /// Physical key → form it was pressed as, so its release matches.
    held: LinearMap<VirtualKey, VirtualKey, HELD_KEY_CAPACITY>,
    /// Forms whose press has been popped and whose release has not.
    delivered: Vec<VirtualKey, HELD_KEY_CAPACITY>,
    caps_lock: bool,
    num_lock: bool,
    queue: Deque<KeyEvent, KEY_EVENT_QUEUE_DEPTH>,
    dropped: u32,
}

impl Default for Ps2Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Ps2Keyboard {
    pub const fn new() -> Self {
        Self {
            frame: FrameReceiver::new(),
            decoder: ScancodeDecoder::new(),
            held: LinearMap::new(),
            delivered: Vec::new(),
            caps_lock: false,
            num_lock: false,
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Feed the data line level sampled on a falling clock edge.
    pub fn push_bit(&mut self, level: bool) -> Result<(), FrameError> {
        match self.frame.push_bit(level) {
            Ok(Some(byte)) => {
                self.push_byte(byte);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                warn!("PS/2: frame error {}", e);
                Err(e)
            }
        }
    }

    /// Abandon a half-received frame after a clock timeout.
    pub fn frame_timeout(&mut self) {
        if self.frame.in_progress() {
            debug!("PS/2: frame timeout");
            self.frame.reset();
        }
    }

    /// Feed one complete scancode byte.
    pub fn push_byte(&mut self, byte: u8) {
        match self.decoder.feed(byte) {
            Some(ScanEvent::Key { key, pressed }) => self.key(key, pressed),
            Some(ScanEvent::Pause) => {
                self.key(VirtualKey::Pause, true);
                self.key(VirtualKey::Pause, false);
            }
            None => {}
        }
    }

    /// Number of events lost to a full queue since start-up.
    pub fn dropped_events(&self) -> u32 {
        self.dropped
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn layout_state(&self) -> LayoutState {
        LayoutState {
            shift: self.held.contains_key(&VirtualKey::LeftShift)
                || self.held.contains_key(&VirtualKey::RightShift),
            caps_lock: self.caps_lock,
            num_lock: self.num_lock,
        }
    }

    fn key(&mut self, physical: VirtualKey, pressed: bool) {
        let emitted = if pressed {
            match self.held.get(&physical).copied() {
                // Typematic repeat: the press is already queued or delivered.
                Some(_) => return,
                None => {
                    match physical {
                        VirtualKey::CapsLock => self.caps_lock = !self.caps_lock,
                        VirtualKey::NumLock => self.num_lock = !self.num_lock,
                        _ => {}
                    }
                    let form = layout::apply(physical, self.layout_state());
                    if self.held.insert(physical, form).is_err() {
                        warn!("PS/2: held-key table full, {} untracked", physical);
                    }
                    form
                }
            }
        } else {
            self.held
                .remove(&physical)
                .unwrap_or_else(|| layout::apply(physical, self.layout_state()))
        };

        let event = KeyEvent {
            key: emitted,
            pressed,
        };
        if self.queue.is_full() && (pressed || !self.evict_oldest_press()) {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("PS/2: event queue full, dropping {}", event);
            return;
        }
        let _ = self.queue.push_back(event);
    }

    /// Make room for a release by discarding the oldest queued press.
    /// A lost release would leave its key held on the host.
    fn evict_oldest_press(&mut self) -> bool {
        let Some(index) = self.queue.iter().position(|e| e.pressed) else {
            return false;
        };

        let mut kept = Deque::new();
        for (i, event) in self.queue.iter().enumerate() {
            if i != index {
                let _ = kept.push_back(*event);
            }
        }
        self.queue = kept;
        self.dropped = self.dropped.wrapping_add(1);
        warn!("PS/2: event queue full, evicted oldest press");
        true
    }

    fn deliver(&mut self, event: KeyEvent) {
        if event.pressed {
            if !self.delivered.contains(&event.key) && self.delivered.push(event.key).is_err() {
                warn!("PS/2: delivered-key table full, {} untracked", event.key);
            }
        } else if let Some(index) = self.delivered.iter().position(|k| *k == event.key) {
            self.delivered.swap_remove(index);
        }
    }
}

impl InputSource for Ps2Keyboard {
    fn event_available(&self) -> bool {
        !self.queue.is_empty()
    }

    fn next_event(&mut self) -> Option<KeyEvent> {
        let event = self.queue.pop_front()?;
        self.deliver(event);
        Some(event)
    }

    fn is_key_held(&self, key: VirtualKey) -> bool {
        self.delivered.contains(&key)
    }

    fn alternate_keys(&self) -> &[(VirtualKey, VirtualKey)] {
        layout::US_ALTERNATES
    }

    fn character_for(&self, key: VirtualKey) -> Option<u8> {
        layout::character_for(key)
    }
}

#[cfg(test)]
mod tests {
    use super::super::frame::encode_frame;
    use super::*;
    use std::vec::Vec;
    use VirtualKey::*;

    fn feed(kb: &mut Ps2Keyboard, bytes: &[u8]) {
        for &b in bytes {
            kb.push_byte(b);
        }
    }

    fn drain(kb: &mut Ps2Keyboard) -> Vec<KeyEvent> {
        core::iter::from_fn(|| kb.next_event()).collect()
    }

    #[test]
    fn bits_become_events() {
        let mut kb = Ps2Keyboard::new();
        for byte in [0x1C, 0xF0, 0x1C] {
            for bit in encode_frame(byte) {
                kb.push_bit(bit).unwrap();
            }
        }
        assert_eq!(drain(&mut kb), [KeyEvent::down(LetterA), KeyEvent::up(LetterA)]);
    }

    #[test]
    fn frame_error_is_reported_and_recovered() {
        let mut kb = Ps2Keyboard::new();
        let mut bits = encode_frame(0x1C);
        bits[9] = !bits[9];
        let result: Result<(), FrameError> = bits.iter().try_for_each(|&b| kb.push_bit(b));
        assert_eq!(result, Err(FrameError::BadParity));
        assert!(!kb.event_available());

        for bit in encode_frame(0x29) {
            kb.push_bit(bit).unwrap();
        }
        assert_eq!(drain(&mut kb), [KeyEvent::down(Space)]);
    }

    #[test]
    fn timeout_drops_partial_frame() {
        let mut kb = Ps2Keyboard::new();
        for bit in &encode_frame(0x1C)[..4] {
            kb.push_bit(*bit).unwrap();
        }
        kb.frame_timeout();
        for bit in encode_frame(0x1B) {
            kb.push_bit(bit).unwrap();
        }
        assert_eq!(drain(&mut kb), [KeyEvent::down(LetterS)]);
    }

    #[test]
    fn shifted_press_releases_same_form() {
        let mut kb = Ps2Keyboard::new();
        // Shift down, '1' down, Shift up, '1' up
        feed(&mut kb, &[0x12, 0x16, 0xF0, 0x12, 0xF0, 0x16]);
        assert_eq!(
            drain(&mut kb),
            [
                KeyEvent::down(LeftShift),
                KeyEvent::down(Exclaim),
                KeyEvent::up(LeftShift),
                KeyEvent::up(Exclaim),
            ]
        );
    }

    #[test]
    fn caps_lock_toggles_on_press_only() {
        let mut kb = Ps2Keyboard::new();
        feed(&mut kb, &[0x58, 0x58, 0xF0, 0x58, 0x1C]);
        let events = drain(&mut kb);
        assert_eq!(events.last(), Some(&KeyEvent::down(CapitalA)));
    }

    #[test]
    fn num_lock_switches_keypad() {
        let mut kb = Ps2Keyboard::new();
        feed(&mut kb, &[0x6C, 0xF0, 0x6C]);
        assert_eq!(drain(&mut kb), [KeyEvent::down(KpHome), KeyEvent::up(KpHome)]);

        feed(&mut kb, &[0x77, 0xF0, 0x77, 0x6C]);
        assert_eq!(drain(&mut kb).last(), Some(&KeyEvent::down(Kp7)));
    }

    #[test]
    fn typematic_repeat_is_not_queued() {
        let mut kb = Ps2Keyboard::new();
        feed(&mut kb, &[0x29, 0x29, 0x29]);
        assert_eq!(drain(&mut kb), [KeyEvent::down(Space)]);
        assert!(kb.is_key_held(Space));

        feed(&mut kb, &[0xF0, 0x29, 0x29]);
        assert_eq!(drain(&mut kb), [KeyEvent::up(Space), KeyEvent::down(Space)]);
    }

    #[test]
    fn held_state_tracks_modifiers() {
        let mut kb = Ps2Keyboard::new();
        feed(&mut kb, &[0xE0, 0x14, 0x11]);
        drain(&mut kb);
        assert!(kb.is_key_held(RightCtrl));
        assert!(kb.is_key_held(LeftAlt));
        feed(&mut kb, &[0xE0, 0xF0, 0x14]);
        drain(&mut kb);
        assert!(!kb.is_key_held(RightCtrl));
    }

    #[test]
    fn held_state_follows_delivered_events() {
        let mut kb = Ps2Keyboard::new();
        // Shift down, '1' down, Shift up, '1' up, all queued
        feed(&mut kb, &[0x12, 0x16, 0xF0, 0x12, 0xF0, 0x16]);
        assert!(!kb.is_key_held(LeftShift));

        assert_eq!(kb.next_event(), Some(KeyEvent::down(LeftShift)));
        assert!(kb.is_key_held(LeftShift));
        assert_eq!(kb.next_event(), Some(KeyEvent::down(Exclaim)));
        assert!(kb.is_key_held(LeftShift));
        assert!(kb.is_key_held(Exclaim));
        assert_eq!(kb.next_event(), Some(KeyEvent::up(LeftShift)));
        assert!(!kb.is_key_held(LeftShift));
        assert_eq!(kb.next_event(), Some(KeyEvent::up(Exclaim)));
        assert!(!kb.is_key_held(Exclaim));
    }

    #[test]
    fn pause_emits_press_and_release() {
        let mut kb = Ps2Keyboard::new();
        feed(&mut kb, &[0xE1, 0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77]);
        assert_eq!(drain(&mut kb), [KeyEvent::down(Pause), KeyEvent::up(Pause)]);
        assert!(!kb.is_key_held(Pause));
    }

    fn fill_queue(kb: &mut Ps2Keyboard) {
        // Space down/up pairs
        for _ in 0..KEY_EVENT_QUEUE_DEPTH / 2 {
            feed(kb, &[0x29, 0xF0, 0x29]);
        }
        assert_eq!(kb.pending(), KEY_EVENT_QUEUE_DEPTH);
    }

    #[test]
    fn full_queue_drops_newest_press() {
        let mut kb = Ps2Keyboard::new();
        fill_queue(&mut kb);

        feed(&mut kb, &[0x1C]);
        assert_eq!(kb.pending(), KEY_EVENT_QUEUE_DEPTH);
        assert_eq!(kb.dropped_events(), 1);
        assert!(!drain(&mut kb).contains(&KeyEvent::down(LetterA)));
    }

    #[test]
    fn release_evicts_oldest_press_when_full() {
        let mut kb = Ps2Keyboard::new();
        fill_queue(&mut kb);

        // 'a' down is dropped, 'a' up must still arrive
        feed(&mut kb, &[0x1C, 0xF0, 0x1C]);
        assert_eq!(kb.pending(), KEY_EVENT_QUEUE_DEPTH);
        assert_eq!(kb.dropped_events(), 2);

        let events = drain(&mut kb);
        assert_eq!(events.first(), Some(&KeyEvent::up(Space)));
        assert_eq!(events.last(), Some(&KeyEvent::up(LetterA)));
    }
}
