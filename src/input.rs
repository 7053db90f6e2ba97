//! User input that counts as a gesture for autoplay purposes.

/// An input event that mobile browsers accept as "the user interacted with the page".
///
/// Audio started synchronously inside one of these handlers unlocks audio output for
/// the rest of the page's lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum UnlockTrigger {
    Click,
    KeyDown,
    TouchStart,
}

impl UnlockTrigger {
    /// Every trigger the unlock listener subscribes to.
    pub const ALL: [UnlockTrigger; 3] = [
        UnlockTrigger::Click,
        UnlockTrigger::KeyDown,
        UnlockTrigger::TouchStart,
    ];

    /// DOM event type name.
    pub fn event_name(self) -> &'static str {
        match self {
            UnlockTrigger::Click => "click",
            UnlockTrigger::KeyDown => "keydown",
            UnlockTrigger::TouchStart => "touchstart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            UnlockTrigger::ALL.iter().map(|t| t.event_name()).collect();
        assert_eq!(names.len(), UnlockTrigger::ALL.len());
        assert!(names.contains("touchstart"));
    }
}
