//! Autoplay unlock state.
//!
//! Some mobile browsers keep a page silent until it starts a sound from inside a real
//! user input handler. Until that happens, a play request is parked here instead. Only
//! one is kept: a later request replaces an earlier one.

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingPlay {
    pub name: String,
    pub looped: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum UnlockState {
    /// No interaction yet.
    Locked { pending: Option<PendingPlay> },
    Unlocked,
}

impl Default for UnlockState {
    fn default() -> Self {
        UnlockState::Locked { pending: None }
    }
}

impl UnlockState {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, UnlockState::Unlocked)
    }

    /// Park a play request if still locked. Returns true if it was parked.
    pub fn defer(&mut self, name: &str, looped: bool) -> bool {
        match self {
            UnlockState::Locked { pending } => {
                *pending = Some(PendingPlay {
                    name: name.to_string(),
                    looped,
                });
                true
            }
            UnlockState::Unlocked => false,
        }
    }

    /// Move to [UnlockState::Unlocked]. Returns the parked request the first time,
    /// [`None`] on every later call.
    pub fn unlock(&mut self) -> Option<PendingPlay> {
        match std::mem::replace(self, UnlockState::Unlocked) {
            UnlockState::Locked { pending } => pending,
            UnlockState::Unlocked => None,
        }
    }
}
