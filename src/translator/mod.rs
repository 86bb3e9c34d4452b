//! Key-event translator and report builder.
//!
//! One [`Translator::poll`] call is one loop iteration:
//!
//! 1. Ask the transport whether it is connected; while it is not, leave
//!    the input queue untouched and send nothing.
//! 2. If an event is queued, read exactly one.
//! 3. Resolve alternate keys, then route modifiers to the modifier byte
//!    and everything else through the keycode map into the pressed set.
//! 4. Rebuild the report from scratch and send it, even if unchanged.
//!
//! The core depends on hardware only through [`InputSource`] and
//! [`ReportSink`].

pub mod gate;
pub mod modifiers;
pub mod pressed;

#[cfg(test)]
mod tests;

pub use gate::{ConnectionGate, ConnectionState, Transition};
pub use modifiers::{ModifierState, ModifierStrategy};
pub use pressed::{Insert, PressedKeySet};

use crate::config;
use crate::hid::KeyboardReport;
use crate::keymap::{self, AlternateKeyTable, VirtualKey};

/// One key transition from the input channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub key: VirtualKey,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn down(key: VirtualKey) -> Self {
        Self { key, pressed: true }
    }

    pub const fn up(key: VirtualKey) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// The physical keyboard side.
pub trait InputSource {
    /// `true` if [`next_event`](Self::next_event) would return an event.
    fn event_available(&self) -> bool;

    /// Pop the oldest pending key transition.
    fn next_event(&mut self) -> Option<KeyEvent>;

    /// Whether `key` is physically held right now.
    fn is_key_held(&self, key: VirtualKey) -> bool;

    /// `(alternate, base)` pairs of the active layout. Read once at start-up.
    fn alternate_keys(&self) -> &[(VirtualKey, VirtualKey)];

    /// Printable character for `key`, if the layout has one.
    fn character_for(&self, _key: VirtualKey) -> Option<u8> {
        None
    }
}

/// The wireless transport side.
pub trait ReportSink {
    fn is_connected(&self) -> bool;

    /// Hand a report over for transmission. No acknowledgement.
    fn send_report(&mut self, report: &KeyboardReport);
}

/// Policy switches; defaults come from [`config`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TranslatorOptions {
    pub modifier_strategy: ModifierStrategy,
    pub reset_on_reconnect: bool,
    pub ascii_fallback: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            modifier_strategy: config::MODIFIER_STRATEGY,
            reset_on_reconnect: config::RESET_ON_RECONNECT,
            ascii_fallback: config::LEGACY_ASCII_FALLBACK,
        }
    }
}

/// Result of one [`Translator::poll`] iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// Link down; input left queued.
    Disconnected,
    /// Connected, nothing queued.
    Idle,
    /// One event processed and this report sent.
    Sent(KeyboardReport),
}

/// Everything the translator remembers between events.
#[derive(Clone, Debug, Default)]
pub struct TranslatorState {
    pub alternates: AlternateKeyTable,
    pub modifiers: ModifierState,
    pub pressed: PressedKeySet,
}

impl TranslatorState {
    pub fn new(alternates: AlternateKeyTable) -> Self {
        Self {
            alternates,
            modifiers: ModifierState::new(),
            pressed: PressedKeySet::new(),
        }
    }

    /// Forget all held keys and modifiers; the layout table stays.
    pub fn reset(&mut self) {
        self.modifiers.clear();
        self.pressed.clear();
    }

    /// Project the current state onto a report.
    pub fn report(&self) -> KeyboardReport {
        build_report(&self.modifiers, &self.pressed)
    }
}

/// Assemble a report from modifier byte and pressed set.
pub fn build_report(modifiers: &ModifierState, pressed: &PressedKeySet) -> KeyboardReport {
    KeyboardReport {
        modifier: modifiers.bits(),
        keycodes: pressed.slots(),
    }
}

pub struct Translator {
    state: TranslatorState,
    gate: ConnectionGate,
    options: TranslatorOptions,
}

impl Translator {
    /// Create a translator, loading the alternate-key table from `input`.
    pub fn new<I: InputSource>(input: &I, options: TranslatorOptions) -> Self {
        let alternates = AlternateKeyTable::from_pairs(input.alternate_keys());
        info!(
            "Translator ready: {} alternate keys, {}",
            alternates.len(),
            options
        );
        Self {
            state: TranslatorState::new(alternates),
            gate: ConnectionGate::new(),
            options,
        }
    }

    pub fn state(&self) -> &TranslatorState {
        &self.state
    }

    pub fn connection(&self) -> ConnectionState {
        self.gate.state()
    }

    /// Run one loop iteration.
    pub fn poll<I, S>(&mut self, input: &mut I, sink: &mut S) -> Poll
    where
        I: InputSource,
        S: ReportSink,
    {
        if self.gate.observe(sink.is_connected()) == Some(Transition::Connected)
            && self.options.reset_on_reconnect
        {
            self.state.reset();
        }

        if !self.gate.is_open() {
            return Poll::Disconnected;
        }

        if !input.event_available() {
            return Poll::Idle;
        }
        let Some(event) = input.next_event() else {
            return Poll::Idle;
        };

        let report = self.process(event, input);
        sink.send_report(&report);
        Poll::Sent(report)
    }

    /// Apply one event to the state and return the resulting report.
    ///
    /// Does not consult the gate; [`poll`](Self::poll) does that.
    pub fn process<I: InputSource>(&mut self, event: KeyEvent, input: &I) -> KeyboardReport {
        let key = self.state.alternates.resolve(event.key);

        if key.is_modifier() {
            if self.options.modifier_strategy == ModifierStrategy::Edge {
                self.state.modifiers.apply(key, event.pressed);
            }
        } else {
            let code = if self.options.ascii_fallback {
                keymap::usage_with_fallback(key, |k| input.character_for(k))
            } else {
                keymap::usage_for(key)
            };
            self.update_pressed(key, code, event.pressed);
        }

        if self.options.modifier_strategy == ModifierStrategy::Level {
            self.state.modifiers.refresh(|k| input.is_key_held(k));
        }

        let report = self.state.report();
        trace!("{} -> {}", event, report);
        report
    }

    fn update_pressed(&mut self, key: VirtualKey, code: u8, pressed: bool) {
        if code == 0 {
            debug!("No usage for {}", key);
            return;
        }

        if pressed {
            if self.state.pressed.insert(code) == Insert::RolloverLockout {
                warn!("More than 6 keys held, rollover lockout on {}", key);
            }
        } else {
            self.state.pressed.remove(code);
        }
    }
}
