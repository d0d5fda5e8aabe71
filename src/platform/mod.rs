//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory natively)
//! - Frame timing
//! - Input events
//! - Asset loading

pub mod asset;
pub mod input;
pub mod storage;
pub mod time;

pub use asset::AssetState;
pub use input::{Action, action_for_key};
pub use storage::{KeyValueStore, MemoryStore};
pub use time::FrameClock;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
