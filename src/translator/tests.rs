//! Translator tests against in-memory input and transport fakes.

use super::*;
use std::collections::VecDeque;
use std::vec::Vec;
use VirtualKey::*;

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

/// Queue of events plus the physical held state as of the last read.
#[derive(Default)]
struct FakeKeyboard {
    queue: VecDeque<KeyEvent>,
    held: Vec<VirtualKey>,
    alternates: Vec<(VirtualKey, VirtualKey)>,
}

impl FakeKeyboard {
    fn with_alternates(pairs: &[(VirtualKey, VirtualKey)]) -> Self {
        Self {
            alternates: pairs.to_vec(),
            ..Self::default()
        }
    }

    fn push(&mut self, event: KeyEvent) {
        self.queue.push_back(event);
    }
}

impl InputSource for FakeKeyboard {
    fn event_available(&self) -> bool {
        !self.queue.is_empty()
    }

    fn next_event(&mut self) -> Option<KeyEvent> {
        let event = self.queue.pop_front()?;
        if event.pressed {
            if !self.held.contains(&event.key) {
                self.held.push(event.key);
            }
        } else {
            self.held.retain(|k| *k != event.key);
        }
        Some(event)
    }

    fn is_key_held(&self, key: VirtualKey) -> bool {
        self.held.contains(&key)
    }

    fn alternate_keys(&self) -> &[(VirtualKey, VirtualKey)] {
        &self.alternates
    }

    fn character_for(&self, key: VirtualKey) -> Option<u8> {
        match key {
            Exclaim => Some(b'!'),
            _ => None,
        }
    }
}

struct FakeLink {
    connected: bool,
    sent: Vec<KeyboardReport>,
}

impl FakeLink {
    fn connected() -> Self {
        Self {
            connected: true,
            sent: Vec::new(),
        }
    }

    fn disconnected() -> Self {
        Self {
            connected: false,
            sent: Vec::new(),
        }
    }
}

impl ReportSink for FakeLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send_report(&mut self, report: &KeyboardReport) {
        self.sent.push(*report);
    }
}

fn options(strategy: ModifierStrategy) -> TranslatorOptions {
    TranslatorOptions {
        modifier_strategy: strategy,
        reset_on_reconnect: true,
        ascii_fallback: false,
    }
}

fn report(modifier: u8, keycodes: [u8; 6]) -> KeyboardReport {
    KeyboardReport { modifier, keycodes }
}

/// Poll until the input queue is drained.
fn drain(translator: &mut Translator, kb: &mut FakeKeyboard, link: &mut FakeLink) {
    while kb.event_available() {
        if translator.poll(kb, link) == Poll::Disconnected {
            break;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// End-to-end sequences
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn press_press_release_sequence() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, options(ModifierStrategy::Level));

    kb.push(KeyEvent::down(LetterA));
    kb.push(KeyEvent::down(LetterB));
    kb.push(KeyEvent::up(LetterA));
    drain(&mut translator, &mut kb, &mut link);

    assert_eq!(
        link.sent,
        [
            report(0, [0x04, 0, 0, 0, 0, 0]),
            report(0, [0x04, 0x05, 0, 0, 0, 0]),
            report(0, [0x05, 0, 0, 0, 0, 0]),
        ]
    );
}

#[test]
fn one_event_per_poll() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(LetterA));
    kb.push(KeyEvent::up(LetterA));

    assert!(matches!(translator.poll(&mut kb, &mut link), Poll::Sent(_)));
    assert_eq!(kb.queue.len(), 1);
    assert_eq!(link.sent.len(), 1);
    assert!(matches!(translator.poll(&mut kb, &mut link), Poll::Sent(_)));
    assert_eq!(translator.poll(&mut kb, &mut link), Poll::Idle);
    assert_eq!(link.sent.len(), 2);
}

#[test]
fn repeated_press_sends_identical_reports() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(Space));
    kb.push(KeyEvent::down(Space));
    drain(&mut translator, &mut kb, &mut link);

    assert_eq!(link.sent.len(), 2);
    assert_eq!(link.sent[0], link.sent[1]);
    assert_eq!(translator.state().pressed.len(), 1);
}

#[test]
fn unmapped_key_still_sends_unchanged_report() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(LetterQ));
    kb.push(KeyEvent::down(Caret));
    drain(&mut translator, &mut kb, &mut link);

    assert_eq!(link.sent.len(), 2);
    assert_eq!(link.sent[1], report(0, [0x14, 0, 0, 0, 0, 0]));
}

// ═══════════════════════════════════════════════════════════════════════════
// Rollover
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn six_keys_fill_slots_in_order_and_seventh_locks_out() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    for key in [LetterF, LetterA, LetterE, LetterB, LetterD, LetterC] {
        kb.push(KeyEvent::down(key));
    }
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(
        link.sent.last(),
        Some(&report(0, [0x09, 0x04, 0x08, 0x05, 0x07, 0x06]))
    );

    kb.push(KeyEvent::down(LetterG));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0; 6])));
    assert!(translator.state().pressed.is_empty());

    // Releases of keys the host no longer sees are harmless.
    kb.push(KeyEvent::up(LetterF));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0; 6])));
}

#[test]
fn lockout_keeps_modifiers() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, options(ModifierStrategy::Edge));

    kb.push(KeyEvent::down(LeftShift));
    for key in [Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7] {
        kb.push(KeyEvent::down(key));
    }
    drain(&mut translator, &mut kb, &mut link);

    assert_eq!(link.sent.last(), Some(&report(0x02, [0; 6])));
}

// ═══════════════════════════════════════════════════════════════════════════
// Modifiers
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn modifier_independence_both_strategies() {
    for strategy in [ModifierStrategy::Edge, ModifierStrategy::Level] {
        let mut kb = FakeKeyboard::default();
        let mut link = FakeLink::connected();
        let mut translator = Translator::new(&kb, options(strategy));

        kb.push(KeyEvent::down(LeftShift));
        kb.push(KeyEvent::down(LeftCtrl));
        kb.push(KeyEvent::up(LeftShift));
        drain(&mut translator, &mut kb, &mut link);

        assert_eq!(translator.state().modifiers.bits(), 0x01);
        assert_eq!(link.sent.last(), Some(&report(0x01, [0; 6])));
    }
}

#[test]
fn all_modifiers_set_every_bit() {
    for strategy in [ModifierStrategy::Edge, ModifierStrategy::Level] {
        let mut kb = FakeKeyboard::default();
        let mut link = FakeLink::connected();
        let mut translator = Translator::new(&kb, options(strategy));

        for key in VirtualKey::MODIFIERS {
            kb.push(KeyEvent::down(key));
        }
        drain(&mut translator, &mut kb, &mut link);

        assert_eq!(link.sent.last(), Some(&report(0xFF, [0; 6])));
    }
}

#[test]
fn modifiers_never_occupy_key_slots() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(RightAlt));
    kb.push(KeyEvent::down(LetterE));
    drain(&mut translator, &mut kb, &mut link);

    assert_eq!(link.sent.last(), Some(&report(0x40, [0x08, 0, 0, 0, 0, 0])));
}

#[test]
fn level_strategy_recovers_missed_release() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, options(ModifierStrategy::Level));

    kb.push(KeyEvent::down(LeftCtrl));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(translator.state().modifiers.bits(), 0x01);

    // The release transition is lost, but the key is no longer held.
    kb.held.clear();
    kb.push(KeyEvent::down(LetterC));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0x06, 0, 0, 0, 0, 0])));
}

// ═══════════════════════════════════════════════════════════════════════════
// Alternate keys and fallback
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn alternate_keys_resolve_before_lookup() {
    let mut kb = FakeKeyboard::with_alternates(&[(Exclaim, Digit1), (CapitalA, LetterA)]);
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(Exclaim));
    kb.push(KeyEvent::down(CapitalA));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0x1E, 0x04, 0, 0, 0, 0])));

    // Press as shifted form, release as base form: same slot.
    kb.push(KeyEvent::up(Digit1));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0x04, 0, 0, 0, 0, 0])));
}

#[test]
fn fallback_disabled_by_default() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(
        &kb,
        TranslatorOptions {
            ascii_fallback: false,
            ..TranslatorOptions::default()
        },
    );

    kb.push(KeyEvent::down(Exclaim));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0; 6])));
}

#[test]
fn fallback_uses_character_when_enabled() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(
        &kb,
        TranslatorOptions {
            ascii_fallback: true,
            ..TranslatorOptions::default()
        },
    );

    kb.push(KeyEvent::down(Exclaim));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [b'!', 0, 0, 0, 0, 0])));
}

// ═══════════════════════════════════════════════════════════════════════════
// Connection gating
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn disconnected_sends_nothing_and_leaves_queue() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::disconnected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(LetterA));
    kb.push(KeyEvent::up(LetterA));
    for _ in 0..5 {
        assert_eq!(translator.poll(&mut kb, &mut link), Poll::Disconnected);
    }

    assert!(link.sent.is_empty());
    assert_eq!(kb.queue.len(), 2);
    assert_eq!(translator.connection(), ConnectionState::Disconnected);
}

#[test]
fn processing_resumes_after_connect() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::disconnected();
    let mut translator = Translator::new(&kb, TranslatorOptions::default());

    kb.push(KeyEvent::down(LetterA));
    assert_eq!(translator.poll(&mut kb, &mut link), Poll::Disconnected);

    link.connected = true;
    assert_eq!(
        translator.poll(&mut kb, &mut link),
        Poll::Sent(report(0, [0x04, 0, 0, 0, 0, 0]))
    );
    assert_eq!(translator.connection(), ConnectionState::Connected);
}

#[test]
fn reconnect_clears_stale_keys() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(&kb, options(ModifierStrategy::Edge));

    kb.push(KeyEvent::down(LeftGui));
    kb.push(KeyEvent::down(LetterL));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0x08, [0x0F, 0, 0, 0, 0, 0])));

    link.connected = false;
    assert_eq!(translator.poll(&mut kb, &mut link), Poll::Disconnected);
    link.connected = true;

    kb.push(KeyEvent::down(LetterM));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0x10, 0, 0, 0, 0, 0])));
}

#[test]
fn reconnect_reset_can_be_disabled() {
    let mut kb = FakeKeyboard::default();
    let mut link = FakeLink::connected();
    let mut translator = Translator::new(
        &kb,
        TranslatorOptions {
            modifier_strategy: ModifierStrategy::Edge,
            reset_on_reconnect: false,
            ascii_fallback: false,
        },
    );

    kb.push(KeyEvent::down(LetterL));
    drain(&mut translator, &mut kb, &mut link);

    link.connected = false;
    translator.poll(&mut kb, &mut link);
    link.connected = true;

    kb.push(KeyEvent::down(LetterM));
    drain(&mut translator, &mut kb, &mut link);
    assert_eq!(link.sent.last(), Some(&report(0, [0x0F, 0x10, 0, 0, 0, 0])));
}

#[test]
fn build_report_is_a_projection() {
    let mut modifiers = ModifierState::new();
    modifiers.apply(RightShift, true);
    let mut pressed = PressedKeySet::new();
    pressed.insert(0x2C);

    let first = build_report(&modifiers, &pressed);
    let second = build_report(&modifiers, &pressed);
    assert_eq!(first, second);
    assert_eq!(first.to_bytes(), [0x20, 0x2C, 0, 0, 0, 0, 0]);
}
