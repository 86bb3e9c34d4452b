//! Transport connection gate.

/// Link state as last observed by the gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Edge reported by [`ConnectionGate::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    Connected,
    Disconnected,
}

/// Two-state machine fed once per loop iteration from the transport's
/// connection query.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectionGate {
    state: ConnectionState,
}

impl ConnectionGate {
    pub const fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Record the current link state; returns the edge, if any.
    pub fn observe(&mut self, connected: bool) -> Option<Transition> {
        match (self.state, connected) {
            (ConnectionState::Disconnected, true) => {
                self.state = ConnectionState::Connected;
                info!("Connected");
                Some(Transition::Connected)
            }
            (ConnectionState::Connected, false) => {
                self.state = ConnectionState::Disconnected;
                info!("Disconnected");
                Some(Transition::Disconnected)
            }
            _ => None,
        }
    }
}
