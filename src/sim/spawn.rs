//! Obstacle supply
//!
//! Obstacles are produced lazily: the generator appends at the tail and the
//! scroll evicts from the head, so the sequence stays sorted by x.

use rand::Rng;

use super::state::{Obstacle, World};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Append one obstacle after the current tail
pub fn spawn_obstacle(world: &mut World) {
    let tuning = &world.tuning;

    // Gap top range keeps both margins clear of the gap
    let gap_min = tuning.gap_top_margin;
    let gap_max = (VIEW_HEIGHT - tuning.gap_bottom_margin - tuning.pipe_gap).max(gap_min);
    let gap_top = if gap_max > gap_min {
        world.rng.random_range(gap_min..gap_max)
    } else {
        gap_min
    };

    let anchor = world
        .obstacles
        .back()
        .map(|tail| tail.x)
        .unwrap_or(VIEW_WIDTH + tuning.first_pipe_offset);
    let spacing = world
        .rng
        .random_range(tuning.pipe_spacing_min..=tuning.pipe_spacing_max);

    let obstacle = Obstacle::new(anchor + spacing, tuning.pipe_width, gap_top, tuning.pipe_gap);
    log::debug!(
        "Spawned obstacle at x={:.1} gap_top={:.1}",
        obstacle.x,
        obstacle.gap_top()
    );
    world.obstacles.push_back(obstacle);
}

/// Generate another obstacle once the tail has scrolled within the lookahead margin
pub fn ensure_lookahead(world: &mut World) {
    let threshold = VIEW_WIDTH - world.tuning.lookahead_margin();
    let needs_more = world
        .obstacles
        .back()
        .map(|tail| tail.x < threshold)
        .unwrap_or(true);
    if needs_more {
        spawn_obstacle(world);
    }
}

/// Drop the head obstacle once it is fully past the left edge
pub fn evict_passed(world: &mut World) {
    let margin = world.tuning.evict_margin;
    if world
        .obstacles
        .front()
        .is_some_and(|head| head.right_edge() < -margin)
    {
        world.obstacles.pop_front();
    }
}
