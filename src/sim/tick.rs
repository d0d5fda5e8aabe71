//! Per-frame simulation step and session transitions
//!
//! Frame order while playing: physics, obstacle scroll, eviction, lookahead
//! supply, scoring, collision. Vertical motion is scaled by the frame time
//! clamped to `[MIN_FRAME_MS, MAX_FRAME_MS]`; horizontal scroll is a fixed
//! displacement per tick, so observed game speed follows the display refresh
//! rate.

use super::collision::{self, Collision};
use super::spawn::{ensure_lookahead, evict_passed, spawn_obstacle};
use super::state::{GameEvent, Phase, World};
use crate::consts::*;

/// One-shot input commands gathered between ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (also starts a session from the start screen)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the game-over screen
    pub restart: bool,
}

/// Apply queued input, then advance the world by one frame of `dt_ms`
pub fn tick(world: &mut World, input: &TickInput, dt_ms: f32) {
    if input.restart {
        restart(world);
    }
    if input.pause {
        toggle_pause(world);
    }
    if input.flap {
        flap(world);
    }

    if !world.is_running() {
        return;
    }

    step_physics(world, dt_ms);

    for obstacle in world.obstacles.iter_mut() {
        obstacle.x -= world.tuning.pipe_speed;
    }
    evict_passed(world);
    ensure_lookahead(world);

    score_passed(world);

    if let Some(hit) = collision::detect(world) {
        log::debug!("Collision: {:?}", hit);
        end_session(world, hit);
    }
}

/// Gravity, terminal-velocity clamp and vertical integration
pub fn step_physics(world: &mut World, dt_ms: f32) {
    let scale = dt_ms.clamp(MIN_FRAME_MS, MAX_FRAME_MS) / NOMINAL_FRAME_MS;
    let tuning = &world.tuning;
    let sprite = &mut world.sprite;

    sprite.vy = (sprite.vy + tuning.gravity * scale).min(tuning.max_drop);
    sprite.pos.y += sprite.vy * scale;
}

/// Score every obstacle whose right edge has passed the sprite
pub fn score_passed(world: &mut World) {
    let sprite_x = world.sprite.pos.x;
    for obstacle in world.obstacles.iter_mut() {
        if obstacle.right_edge() < sprite_x && obstacle.mark_scored() {
            world.session.score += 1;
            world.events.push(GameEvent::Scored {
                score: world.session.score,
            });
        }
    }
}

/// START -> PLAYING: fresh sprite, fresh obstacle pipeline
pub fn start_session(world: &mut World) {
    world.session.score = 0;
    world.session.paused = false;
    world.session.phase = Phase::Playing;
    world.sprite.reset();
    world.obstacles.clear();
    spawn_obstacle(world);
    spawn_obstacle(world);

    world.events.push(GameEvent::Started);
    log::info!("Session started (best {})", world.session.best);
}

/// Flap input: starts from START, impulses while playing, otherwise ignored
pub fn flap(world: &mut World) {
    match world.session.phase {
        Phase::Start => start_session(world),
        Phase::Playing if !world.session.paused => {
            world.sprite.vy = world.tuning.flap_impulse;
            world.events.push(GameEvent::Flapped);
        }
        _ => {}
    }
}

/// Pause toggle, only while playing
pub fn toggle_pause(world: &mut World) {
    if world.session.phase == Phase::Playing {
        world.session.paused = !world.session.paused;
        log::info!("Paused: {}", world.session.paused);
    }
}

/// OVER -> START
pub fn restart(world: &mut World) {
    if world.session.phase == Phase::Over {
        world.session.phase = Phase::Start;
    }
}

/// PLAYING -> OVER: settle the best score and freeze the simulation
pub fn end_session(world: &mut World, cause: Collision) {
    let score = world.session.score;
    let new_best = score > world.session.best;
    world.session.best = world.session.best.max(score);
    world.session.phase = Phase::Over;
    world.session.paused = false;

    world.events.push(GameEvent::Crashed {
        score,
        best: world.session.best,
        new_best,
    });
    log::info!(
        "Game over ({:?}): score {} best {}{}",
        cause,
        score,
        world.session.best,
        if new_best { " (new best)" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn playing_world(seed: u64) -> World {
        let mut world = World::new(seed, Tuning::default(), 0);
        tick(
            &mut world,
            &TickInput {
                flap: true,
                ..Default::default()
            },
            0.0,
        );
        world
    }

    fn flap_input() -> TickInput {
        TickInput {
            flap: true,
            ..Default::default()
        }
    }

    fn pause_input() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_flap_starts_session() {
        let mut world = World::new(12345, Tuning::default(), 4);
        assert_eq!(world.phase(), Phase::Start);

        // Tick without input - should stay on the start screen
        tick(&mut world, &TickInput::default(), NOMINAL_FRAME_MS);
        assert_eq!(world.phase(), Phase::Start);
        assert!(world.obstacles.is_empty());

        flap(&mut world);
        assert_eq!(world.phase(), Phase::Playing);
        assert_eq!(world.session.score, 0);
        assert_eq!(world.obstacles.len(), 2);
        assert_eq!(world.sprite.pos.y, VIEW_HEIGHT / 2.0);
        assert_eq!(world.sprite.vy, 0.0);
        assert_eq!(world.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_flap_then_minimal_frame_rises() {
        let mut world = playing_world(1);
        flap(&mut world);
        assert_eq!(world.sprite.vy, -6.2);

        let center = VIEW_HEIGHT / 2.0;
        tick(&mut world, &TickInput::default(), 1.0);
        assert!(world.sprite.pos.y < center);
        assert_eq!(world.phase(), Phase::Playing);
    }

    #[test]
    fn test_zero_length_frame_still_moves_sprite() {
        let mut world = playing_world(1);
        flap(&mut world);
        let y = world.sprite.pos.y;
        let x = world.obstacles[0].x;

        tick(&mut world, &TickInput::default(), 0.0);
        assert!(world.sprite.pos.y < y);
        assert_eq!(world.obstacles[0].x, x - world.tuning.pipe_speed);

        // Same as the shortest integrated frame
        let mut a = playing_world(1);
        let mut b = playing_world(1);
        step_physics(&mut a, 0.0);
        step_physics(&mut b, MIN_FRAME_MS);
        assert_eq!(a.sprite, b.sprite);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut world = playing_world(1);
        world.sprite.vy = 7.0;
        flap(&mut world);
        assert_eq!(world.sprite.vy, world.tuning.flap_impulse);
        flap(&mut world);
        assert_eq!(world.sprite.vy, world.tuning.flap_impulse);
    }

    #[test]
    fn test_nominal_frame_matches_per_frame_constants() {
        let mut world = playing_world(1);
        world.sprite.vy = 1.0;
        let y = world.sprite.pos.y;
        step_physics(&mut world, NOMINAL_FRAME_MS);
        assert!((world.sprite.vy - 1.35).abs() < 1e-5);
        assert!((world.sprite.pos.y - (y + 1.35)).abs() < 1e-4);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut a = playing_world(1);
        let mut b = playing_world(1);
        step_physics(&mut a, MAX_FRAME_MS);
        step_physics(&mut b, 5000.0);
        assert_eq!(a.sprite.vy, b.sprite.vy);
        assert_eq!(a.sprite.pos, b.sprite.pos);
    }

    #[test]
    fn test_velocity_capped_at_max_drop() {
        let mut world = playing_world(1);
        world.sprite.vy = 8.4;
        step_physics(&mut world, MAX_FRAME_MS);
        assert_eq!(world.sprite.vy, world.tuning.max_drop);
    }

    #[test]
    fn test_horizontal_scroll_ignores_dt() {
        let mut a = playing_world(2);
        let mut b = playing_world(2);
        let x0 = a.obstacles[0].x;
        tick(&mut a, &TickInput::default(), 1.0);
        tick(&mut b, &TickInput::default(), 30.0);
        assert_eq!(a.obstacles[0].x, x0 - 2.4);
        assert_eq!(a.obstacles[0].x, b.obstacles[0].x);
    }

    #[test]
    fn test_ceiling_ends_session() {
        let mut world = playing_world(1);
        world.sprite.pos.y = 0.0;
        world.sprite.vy = -1.0;
        tick(&mut world, &TickInput::default(), NOMINAL_FRAME_MS);
        assert_eq!(world.phase(), Phase::Over);
    }

    #[test]
    fn test_floor_ends_session() {
        let mut world = playing_world(1);
        world.sprite.pos.y = VIEW_HEIGHT - FLOOR_HEIGHT - world.sprite.size.y - 1.0;
        world.sprite.vy = 8.5;
        tick(&mut world, &TickInput::default(), NOMINAL_FRAME_MS);
        assert_eq!(world.phase(), Phase::Over);
    }

    #[test]
    fn test_scores_once_per_obstacle() {
        let mut world = playing_world(1);
        world.obstacles.clear();
        world
            .obstacles
            .push_back(Obstacle::new(100.0, 64.0, 0.0, VIEW_HEIGHT));
        world.sprite.pos.x = 70.0;

        score_passed(&mut world);
        assert_eq!(world.session.score, 0);

        world.obstacles[0].x = 5.9; // right edge 69.9 < 70
        score_passed(&mut world);
        assert_eq!(world.session.score, 1);
        assert!(world.obstacles[0].is_scored());

        for _ in 0..5 {
            score_passed(&mut world);
        }
        assert_eq!(world.session.score, 1);
        let scored: Vec<_> = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .collect();
        assert_eq!(scored, vec![GameEvent::Scored { score: 1 }]);
    }

    #[test]
    fn test_right_edge_level_with_sprite_does_not_score() {
        let mut world = playing_world(1);
        world.obstacles.clear();
        world
            .obstacles
            .push_back(Obstacle::new(6.0, 64.0, 0.0, VIEW_HEIGHT));
        score_passed(&mut world);
        assert_eq!(world.session.score, 0);
    }

    #[test]
    fn test_overlap_ends_session_in_same_frame() {
        let mut world = playing_world(1);
        world.sprite.vy = 0.0;
        let hit = collision::hitbox(&world.sprite, &world.tuning);
        world.obstacles.clear();
        // Gap sits entirely below the hitbox, so the top rect overlaps it
        world.obstacles.push_back(Obstacle::new(
            hit.min.x + 2.4,
            64.0,
            hit.max().y + 20.0,
            150.0,
        ));
        tick(&mut world, &TickInput::default(), 1.0);
        assert_eq!(world.phase(), Phase::Over);
    }

    #[test]
    fn test_edge_touch_keeps_playing() {
        let mut world = playing_world(1);
        world.tuning.pipe_speed = 2.0;
        world.sprite.size = glam::Vec2::splat(40.0);
        world.sprite.vy = 0.0;
        world.obstacles.clear();
        let hit = collision::hitbox(&world.sprite, &world.tuning);
        assert_eq!(hit.max().x, 108.0);
        // After this frame's scroll the obstacle's left edge lands on the hitbox's right edge
        world
            .obstacles
            .push_back(Obstacle::new(110.0, 64.0, hit.max().y + 20.0, 150.0));
        tick(&mut world, &TickInput::default(), 1.0);
        assert_eq!(world.obstacles[0].x, 108.0);
        assert_eq!(world.phase(), Phase::Playing);

        // One more tick and the rectangles overlap
        tick(&mut world, &TickInput::default(), 1.0);
        assert_eq!(world.phase(), Phase::Over);
    }

    #[test]
    fn test_game_over_updates_best() {
        let mut world = playing_world(1);
        world.session.best = 3;
        world.session.score = 5;
        end_session(&mut world, Collision::Floor);
        assert_eq!(world.phase(), Phase::Over);
        assert_eq!(world.session.best, 5);
        assert!(world.drain_events().contains(&GameEvent::Crashed {
            score: 5,
            best: 5,
            new_best: true
        }));

        // A worse run leaves best alone
        restart(&mut world);
        flap(&mut world);
        world.session.score = 2;
        end_session(&mut world, Collision::Ceiling);
        assert_eq!(world.session.best, 5);
    }

    #[test]
    fn test_over_freezes_simulation() {
        let mut world = playing_world(1);
        end_session(&mut world, Collision::Floor);
        let sprite = world.sprite.clone();
        let obstacles = world.obstacles.clone();

        tick(&mut world, &flap_input(), NOMINAL_FRAME_MS);
        assert_eq!(world.phase(), Phase::Over);
        assert_eq!(world.sprite, sprite);
        assert_eq!(world.obstacles, obstacles);
    }

    #[test]
    fn test_restart_returns_to_start() {
        let mut world = playing_world(1);
        restart(&mut world);
        assert_eq!(world.phase(), Phase::Playing);

        end_session(&mut world, Collision::Floor);
        tick(
            &mut world,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            NOMINAL_FRAME_MS,
        );
        assert_eq!(world.phase(), Phase::Start);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut world = playing_world(7);
        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), NOMINAL_FRAME_MS);
        }

        tick(&mut world, &pause_input(), NOMINAL_FRAME_MS);
        assert!(world.session.paused);
        let sprite = world.sprite.clone();
        let obstacles = world.obstacles.clone();
        let score = world.session.score;

        for _ in 0..30 {
            tick(&mut world, &flap_input(), NOMINAL_FRAME_MS);
        }
        assert_eq!(world.sprite, sprite);
        assert_eq!(world.obstacles, obstacles);
        assert_eq!(world.session.score, score);

        tick(&mut world, &pause_input(), NOMINAL_FRAME_MS);
        assert!(!world.session.paused);
        assert_ne!(world.obstacles, obstacles);
    }

    #[test]
    fn test_pause_ignored_outside_playing() {
        let mut world = World::new(1, Tuning::default(), 0);
        toggle_pause(&mut world);
        assert!(!world.session.paused);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_world(99999);
        let mut b = playing_world(99999);
        for i in 0..300 {
            let input = if i % 20 == 0 { flap_input() } else { TickInput::default() };
            tick(&mut a, &input, NOMINAL_FRAME_MS);
            tick(&mut b, &input, NOMINAL_FRAME_MS);
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.sprite, b.sprite);
        assert_eq!(a.session, b.session);
    }

    /// Flap whenever the sprite drifts below the next gap's centre
    fn autopilot(world: &World) -> TickInput {
        let target = world
            .obstacles
            .iter()
            .find(|o| o.right_edge() >= world.sprite.pos.x)
            .map(|o| o.gap_center())
            .unwrap_or(VIEW_HEIGHT / 2.0);
        TickInput {
            flap: world.sprite.pos.y + world.sprite.size.y / 2.0 > target + 10.0
                && world.sprite.vy > 0.0,
            ..Default::default()
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_every_frame(
            seed in any::<u64>(),
            frames in prop::collection::vec((any::<bool>(), 0.0f32..80.0), 1..400),
        ) {
            let mut world = playing_world(seed);
            let max_drop = world.tuning.max_drop;
            let (spacing_min, spacing_max) =
                (world.tuning.pipe_spacing_min, world.tuning.pipe_spacing_max);
            let lookahead = VIEW_WIDTH - world.tuning.lookahead_margin();

            for (random_flap, dt) in frames {
                let mut input = autopilot(&world);
                input.flap |= random_flap && world.sprite.pos.y > 200.0;
                let score_before = world.session.score;

                tick(&mut world, &input, dt);

                prop_assert!(world.sprite.vy <= max_drop);
                let xs: Vec<f32> = world.obstacles.iter().map(|o| o.x).collect();
                for pair in xs.windows(2) {
                    let spacing = pair[1] - pair[0];
                    prop_assert!(spacing >= spacing_min - 0.01 && spacing <= spacing_max + 0.01);
                }
                // Spacing is far wider than one tick's scroll, so at most one pass per frame
                prop_assert!(world.session.score >= score_before);
                prop_assert!(world.session.score - score_before <= 1);
                if world.phase() == Phase::Playing {
                    prop_assert!(world.obstacles.iter().any(|o| o.x >= lookahead));
                } else {
                    break;
                }
            }
        }

        #[test]
        fn prop_best_never_decreases(scores in prop::collection::vec(0u32..50, 1..20)) {
            let mut world = World::new(1, Tuning::default(), 0);
            let mut previous_best = 0;
            for score in scores {
                flap(&mut world);
                world.session.score = score;
                end_session(&mut world, Collision::Floor);
                prop_assert!(world.session.best >= previous_best);
                prop_assert!(world.session.best >= score);
                previous_best = world.session.best;
                restart(&mut world);
            }
        }
    }
}
