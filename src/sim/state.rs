//! World state and core simulation types
//!
//! The `World` aggregate owns everything a frame mutates. Components receive
//! it explicitly; nothing here touches the platform.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the first flap
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    Over,
}

/// Something that happened during a tick or an input transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new session began
    Started,
    /// Upward impulse applied
    Flapped,
    /// An obstacle was passed
    Scored { score: u32 },
    /// Session ended by a collision
    Crashed { score: u32, best: u32, new_best: bool },
}

/// The player-controlled sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Top-left corner; x stays fixed during a session
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Displayed size
    pub size: Vec2,
}

impl Sprite {
    pub fn new(scale: f32) -> Self {
        Self {
            pos: Vec2::new(SPRITE_X, VIEW_HEIGHT / 2.0),
            vy: 0.0,
            size: Vec2::splat(DEFAULT_SPRITE_SOURCE * scale),
        }
    }

    /// Re-centre for a new session
    pub fn reset(&mut self) {
        self.pos = Vec2::new(SPRITE_X, VIEW_HEIGHT / 2.0);
        self.vy = 0.0;
    }

    /// Resize from the natural size of the sprite image
    pub fn set_source_size(&mut self, width: f32, height: f32, scale: f32) {
        self.size = Vec2::new(width, height) * scale;
    }

    /// Full display bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Render tilt in radians, derived linearly from velocity
    pub fn tilt(&self) -> f32 {
        (self.vy / 10.0).clamp(-0.35, 0.5)
    }
}

/// One obstacle: a column with a gap
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    width: f32,
    gap_top: f32,
    gap_height: f32,
    scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_height,
            scored: false,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Upper boundary of the gap
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    /// Lower boundary of the gap
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_height / 2.0
    }

    /// Blocking region from the surface top down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::from_xywh(self.x, 0.0, self.width, self.gap_top)
    }

    /// Blocking region from the gap down to the surface bottom
    pub fn bottom_rect(&self) -> Rect {
        let y = self.gap_bottom();
        Rect::from_xywh(self.x, y, self.width, VIEW_HEIGHT - y)
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Flag as scored. Returns true only on the first call.
    pub fn mark_scored(&mut self) -> bool {
        !std::mem::replace(&mut self.scored, true)
    }
}

/// Score and state machine for the current and past sessions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub score: u32,
    pub best: u32,
    pub phase: Phase,
    /// Only meaningful while playing
    pub paused: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub sprite: Sprite,
    /// Sorted by x ascending; generator appends, eviction pops the front
    pub obstacles: VecDeque<Obstacle>,
    pub session: Session,
    /// Events since the driver last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create a world waiting on the start screen
    pub fn new(seed: u64, tuning: Tuning, best: u32) -> Self {
        let sprite = Sprite::new(tuning.sprite_scale);
        Self {
            tuning,
            sprite,
            obstacles: VecDeque::new(),
            session: Session {
                best,
                ..Default::default()
            },
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// True while the simulation should advance
    pub fn is_running(&self) -> bool {
        self.session.phase == Phase::Playing && !self.session.paused
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
