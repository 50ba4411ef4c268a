//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per update, counters in frames
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod pool;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{boxes_overlap, point_in_polygon};
pub use pool::{Pool, Slot};
pub use snapshot::RenderState;
pub use state::{
    Bullet, Enemy, EnemyKind, Explosion, GameEvent, GamePhase, Island, MenuItem, PhaseKind, Player,
    Tree, TreeKind, Whirlpool, World,
};
pub use tick::{TickInput, spawn_interval_for_score, tick};
