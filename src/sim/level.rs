//! Procedural level generation
//!
//! Islands are placed by rejection sampling so they never crowd each other,
//! then given an irregular outline and a scattering of trees. Whirlpools are
//! dropped uniformly with an independent teleport target.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Island, Tree, TreeKind, Whirlpool};
use crate::consts::WRAP_MARGIN;

/// Islands requested per level
pub const ISLAND_COUNT: usize = 6;
/// Placement attempts per island before the slot is given up
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;
/// Clear water required between island bounding circles
pub const MIN_ISLAND_GAP: f32 = 200.0;
pub const ISLAND_MARGIN_X: f32 = 150.0;
pub const ISLAND_MIN_Y: f32 = 100.0;
pub const ISLAND_Y_RANGE: f32 = 400.0;
pub const ISLAND_MIN_WIDTH: f32 = 80.0;
pub const ISLAND_WIDTH_RANGE: f32 = 120.0;
pub const ISLAND_MIN_HEIGHT: f32 = 60.0;
pub const ISLAND_HEIGHT_RANGE: f32 = 80.0;

/// Outline point count is MIN..MIN+RANGE
pub const OUTLINE_MIN_POINTS: usize = 8;
pub const OUTLINE_POINT_RANGE: usize = 8;
pub const OUTLINE_MIN_SCALE: f32 = 0.7;
pub const OUTLINE_SCALE_RANGE: f32 = 0.6;

/// One tree per this many pixels of (width + height)
pub const TREE_DENSITY: f32 = 30.0;
/// Keep trees this far in from the inscribed radius
pub const TREE_INSET: f32 = 15.0;
pub const PALM_CHANCE: f64 = 0.7;
pub const TREE_MIN_SIZE: f32 = 10.0;
pub const TREE_SIZE_RANGE: f32 = 15.0;

pub const WHIRLPOOL_COUNT: usize = 4;
pub const WHIRLPOOL_MARGIN_X: f32 = 50.0;
pub const WHIRLPOOL_MIN_Y: f32 = 200.0;
pub const WHIRLPOOL_Y_RANGE: f32 = 200.0;

/// `min + U[0,1) * range`. Stays well defined when `range` is negative.
#[inline]
fn sample<R: Rng>(rng: &mut R, min: f32, range: f32) -> f32 {
    min + rng.random::<f32>() * range
}

/// Candidate island x for the given viewport width
fn sample_island_x<R: Rng>(rng: &mut R, screen_width: f32) -> f32 {
    sample(rng, ISLAND_MARGIN_X, screen_width - 2.0 * ISLAND_MARGIN_X)
}

fn sample_island_size<R: Rng>(rng: &mut R) -> (f32, f32) {
    let width = sample(rng, ISLAND_MIN_WIDTH, ISLAND_WIDTH_RANGE);
    let height = sample(rng, ISLAND_MIN_HEIGHT, ISLAND_HEIGHT_RANGE);
    (width, height)
}

/// True if an island at `center` with the given size would crowd any placed island
pub fn is_too_close(islands: &[Island], center: Vec2, width: f32, height: f32) -> bool {
    let radius = width.max(height) / 2.0;
    islands.iter().any(|island| {
        center.distance(island.pos) < MIN_ISLAND_GAP + radius + island.bounding_radius()
    })
}

/// Build one fully decorated island
pub fn build_island<R: Rng>(rng: &mut R, center: Vec2, width: f32, height: f32) -> Island {
    Island {
        pos: center,
        width,
        height,
        points: generate_island_shape(rng, center, width, height),
        trees: generate_trees(rng, center, width, height),
        active: true,
    }
}

/// Place up to [`ISLAND_COUNT`] islands. Slots whose placement keeps failing
/// are left out, so fewer islands is a normal result.
pub fn generate_islands<R: Rng>(rng: &mut R, screen_width: f32) -> Vec<Island> {
    let mut islands: Vec<Island> = Vec::with_capacity(ISLAND_COUNT);

    for slot in 0..ISLAND_COUNT {
        let placed = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let center = Vec2::new(
                sample_island_x(rng, screen_width),
                sample(rng, ISLAND_MIN_Y, ISLAND_Y_RANGE),
            );
            let (width, height) = sample_island_size(rng);
            (!is_too_close(&islands, center, width, height)).then_some((center, width, height))
        });

        match placed {
            Some((center, width, height)) => {
                let island = build_island(rng, center, width, height);
                islands.push(island);
            }
            None => {
                log::debug!("Island slot {} omitted after {} attempts", slot, MAX_PLACEMENT_ATTEMPTS);
            }
        }
    }

    islands
}

/// Irregular closed outline around an ellipse.
///
/// Points sit at evenly spaced angles; each one scales both ellipse radii by
/// its own factor so the outline wobbles instead of tracing the ellipse.
pub fn generate_island_shape<R: Rng>(
    rng: &mut R,
    center: Vec2,
    width: f32,
    height: f32,
) -> Vec<Vec2> {
    let num_points = OUTLINE_MIN_POINTS + rng.random_range(0..OUTLINE_POINT_RANGE);
    let base_radius = Vec2::new(width / 2.0, height / 2.0);

    (0..num_points)
        .map(|i| {
            let angle = i as f32 / num_points as f32 * TAU;
            let scale = sample(rng, OUTLINE_MIN_SCALE, OUTLINE_SCALE_RANGE);
            center + Vec2::new(angle.cos(), angle.sin()) * base_radius * scale
        })
        .collect()
}

/// Scatter decorative trees inside the island's inscribed circle
pub fn generate_trees<R: Rng>(rng: &mut R, center: Vec2, width: f32, height: f32) -> Vec<Tree> {
    let count = ((width + height) / TREE_DENSITY).floor() as usize;
    let max_distance = (width.min(height) / 2.0 - TREE_INSET).max(0.0);

    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let distance = rng.random::<f32>() * max_distance;
            let kind = if rng.random_bool(PALM_CHANCE) {
                TreeKind::Palm
            } else {
                TreeKind::Bush
            };
            Tree {
                pos: center + Vec2::new(angle.cos(), angle.sin()) * distance,
                kind,
                size: sample(rng, TREE_MIN_SIZE, TREE_SIZE_RANGE),
            }
        })
        .collect()
}

fn sample_whirlpool_point<R: Rng>(rng: &mut R, screen_width: f32) -> Vec2 {
    Vec2::new(
        sample(rng, WHIRLPOOL_MARGIN_X, screen_width - 2.0 * WHIRLPOOL_MARGIN_X),
        sample(rng, WHIRLPOOL_MIN_Y, WHIRLPOOL_Y_RANGE),
    )
}

/// Exactly [`WHIRLPOOL_COUNT`] whirlpools with independent targets
pub fn generate_whirlpools<R: Rng>(rng: &mut R, screen_width: f32) -> Vec<Whirlpool> {
    (0..WHIRLPOOL_COUNT)
        .map(|_| Whirlpool {
            pos: sample_whirlpool_point(rng, screen_width),
            target: sample_whirlpool_point(rng, screen_width),
            active: true,
        })
        .collect()
}

/// Re-enter an island above the top edge with a fresh shape.
/// No spacing check here; the island is alone off-screen.
pub fn respawn_island<R: Rng>(rng: &mut R, island: &mut Island, screen_width: f32) {
    let center = Vec2::new(sample_island_x(rng, screen_width), -WRAP_MARGIN);
    let (width, height) = sample_island_size(rng);
    *island = build_island(rng, center, width, height);
}

/// Re-enter a whirlpool above the top edge with a fresh x and target
pub fn respawn_whirlpool<R: Rng>(rng: &mut R, whirlpool: &mut Whirlpool, screen_width: f32) {
    whirlpool.pos = Vec2::new(
        sample(rng, WHIRLPOOL_MARGIN_X, screen_width - 2.0 * WHIRLPOOL_MARGIN_X),
        -WRAP_MARGIN,
    );
    whirlpool.target = sample_whirlpool_point(rng, screen_width);
}
