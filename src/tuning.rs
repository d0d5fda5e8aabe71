//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! re-tuned from JSON without touching code. Vertical values are per nominal
//! 60 Hz frame; horizontal values are per tick.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to velocity each nominal frame
    pub gravity: f32,
    /// Velocity set (not added) on flap; negative is upward
    pub flap_impulse: f32,
    /// Maximum downward velocity
    pub max_drop: f32,

    /// Leftward obstacle displacement per tick
    pub pipe_speed: f32,
    /// Vertical height of each obstacle gap
    pub pipe_gap: f32,
    /// Horizontal width of each obstacle
    pub pipe_width: f32,
    /// Minimum distance between consecutive obstacles
    pub pipe_spacing_min: f32,
    /// Maximum distance between consecutive obstacles
    pub pipe_spacing_max: f32,
    /// Smallest allowed gap top
    pub gap_top_margin: f32,
    /// Space kept free between the gap bottom and the surface bottom
    pub gap_bottom_margin: f32,
    /// Offset past the right edge used to anchor the first obstacle
    pub first_pipe_offset: f32,
    /// How far past the left edge an obstacle's right edge travels before eviction
    pub evict_margin: f32,
    /// Fraction of `pipe_spacing_min` the tail may scroll inside the right edge
    /// before another obstacle is generated
    pub lookahead_factor: f32,

    /// Scale applied to the sprite image's natural size
    pub sprite_scale: f32,
    /// Hitbox size as a fraction of the displayed sprite size
    pub hitbox_shrink: f32,
    /// Hitbox offset from the sprite's top-left corner
    pub hitbox_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.35,
            flap_impulse: -6.2,
            max_drop: 8.5,

            pipe_speed: 2.4,
            pipe_gap: 150.0,
            pipe_width: 64.0,
            pipe_spacing_min: 260.0,
            pipe_spacing_max: 330.0,
            gap_top_margin: 110.0,
            gap_bottom_margin: 110.0,
            first_pipe_offset: 60.0,
            evict_margin: 40.0,
            lookahead_factor: 0.6,

            sprite_scale: 0.38,
            hitbox_shrink: 0.85,
            hitbox_offset: 4.0,
        }
    }
}

impl Tuning {
    /// Storage key for an optional tuning override
    pub const STORAGE_KEY: &'static str = "flappyqor_tuning";

    /// Parse tuning from JSON, falling back to defaults for missing fields.
    /// Values the simulation cannot run with are rejected.
    pub fn from_json(json: &str) -> Option<Self> {
        let tuning: Self = match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning: {}", e);
                return None;
            }
        };
        if let Err(reason) = tuning.check() {
            log::warn!("Ignoring invalid tuning: {}", reason);
            return None;
        }
        Some(tuning)
    }

    /// Tuning override from storage, or the defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => Self::from_json(&json).unwrap_or_else(|| {
                log::info!("Using default tuning");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    fn check(&self) -> Result<(), &'static str> {
        let values = [
            self.gravity,
            self.flap_impulse,
            self.max_drop,
            self.pipe_speed,
            self.pipe_gap,
            self.pipe_width,
            self.pipe_spacing_min,
            self.pipe_spacing_max,
            self.gap_top_margin,
            self.gap_bottom_margin,
            self.first_pipe_offset,
            self.evict_margin,
            self.lookahead_factor,
            self.sprite_scale,
            self.hitbox_shrink,
            self.hitbox_offset,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err("non-finite value");
        }
        if self.pipe_gap <= 0.0 || self.pipe_width <= 0.0 {
            return Err("pipe gap and width must be positive");
        }
        if self.pipe_spacing_min <= 0.0 || self.pipe_spacing_min > self.pipe_spacing_max {
            return Err("pipe spacing range is empty");
        }
        if self.sprite_scale <= 0.0 || self.hitbox_shrink <= 0.0 {
            return Err("sprite scale and hitbox shrink must be positive");
        }
        Ok(())
    }

    /// Distance inside the right edge at which the tail triggers a new obstacle
    pub fn lookahead_margin(&self) -> f32 {
        self.pipe_spacing_min * self.lookahead_factor
    }
}
