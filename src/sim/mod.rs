//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - The driver supplies elapsed time; nothing here reads a clock
//! - Seeded RNG only
//! - No rendering, storage or audio dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collision, Rect, detect, hitbox};
pub use spawn::{ensure_lookahead, evict_passed, spawn_obstacle};
pub use state::{GameEvent, Obstacle, Phase, Session, Sprite, World};
pub use tick::{TickInput, end_session, flap, restart, start_session, tick, toggle_pause};
