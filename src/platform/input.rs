//! Input mapping
//!
//! Every user gesture becomes exactly one discrete `Action`. Nothing is
//! sampled continuously.

/// A discrete user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pointer press or Space
    Flap,
    /// `p` key
    TogglePause,
    /// Play button on the start screen
    Play,
    /// Again button on the game-over screen
    Restart,
    /// Sound button
    ToggleMute,
    /// Share button
    Share,
}

/// Map a keyboard event to an action.
///
/// `code` is the physical key (`KeyboardEvent.code`), `key` the produced
/// character (`KeyboardEvent.key`).
pub fn action_for_key(code: &str, key: &str) -> Option<Action> {
    match (code, key) {
        ("Space", _) => Some(Action::Flap),
        (_, "p" | "P") => Some(Action::TogglePause),
        _ => None,
    }
}

/// Pointer presses on the play surface always flap
pub fn action_for_pointer() -> Action {
    Action::Flap
}
