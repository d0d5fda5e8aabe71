//! Best score persistence
//!
//! Stored as a textual integer under a single key, read once at startup and
//! written whenever a session beats it.

use crate::platform::KeyValueStore;

/// Highest score across all sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappyqor_best";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Parse a stored value. Anything non-numeric counts as zero.
    pub fn parse(text: &str) -> Self {
        Self::new(text.trim().parse().unwrap_or(0))
    }

    /// Raise to `score` if it is higher. Returns true if the best changed.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load from storage, defaulting to zero
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(text) => {
                let best = Self::parse(&text);
                log::info!("Loaded best score {}", best.value);
                best
            }
            None => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Save to storage
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            log::info!("Best score saved ({})", self.value);
        } else {
            log::warn!("Could not save best score");
        }
    }
}
