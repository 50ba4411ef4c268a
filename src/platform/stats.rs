//! Frame timing and entity statistics
//!
//! Hosts time each frame however they can and feed the result in here.

use std::fmt;

use serde::Serialize;

use crate::sim::World;

/// Frames slower than this count as slow
pub const SLOW_FRAME_MS: f32 = 20.0;
/// Weight of the newest sample in the moving average
const AVERAGE_WEIGHT: f32 = 0.05;

/// Live entities in the world at the last sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub enemies: usize,
    /// Player and enemy bullets together
    pub projectiles: usize,
    pub islands: usize,
    pub whirlpools: usize,
}

impl EntityCounts {
    pub fn of(world: &World) -> Self {
        Self {
            enemies: world.enemies.active_count(),
            projectiles: world.bullets.active_count() + world.enemy_bullets.active_count(),
            islands: world.islands.iter().filter(|i| i.active).count(),
            whirlpools: world.whirlpools.iter().filter(|w| w.active).count(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameStats {
    pub last_frame_ms: f32,
    /// Exponential moving average of frame time
    pub avg_frame_ms: f32,
    pub max_frame_ms: f32,
    pub total_frames: u64,
    pub slow_frames: u64,
    pub entities: EntityCounts,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one host frame that took `frame_ms` milliseconds
    pub fn record(&mut self, frame_ms: f32, world: &World) {
        let frame_ms = frame_ms.max(0.0);
        self.last_frame_ms = frame_ms;
        self.max_frame_ms = self.max_frame_ms.max(frame_ms);
        if frame_ms > SLOW_FRAME_MS {
            self.slow_frames += 1;
        }

        // The first sample seeds the average
        self.avg_frame_ms = if self.total_frames == 0 {
            frame_ms
        } else {
            self.avg_frame_ms * (1.0 - AVERAGE_WEIGHT) + frame_ms * AVERAGE_WEIGHT
        };
        self.total_frames += 1;
        self.entities = EntityCounts::of(world);
    }

    /// Frames per second implied by the moving average (0 before any sample)
    pub fn fps(&self) -> f32 {
        if self.avg_frame_ms > 0.0 {
            1000.0 / self.avg_frame_ms
        } else {
            0.0
        }
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FPS:{:.0} E:{} P:{} T:{:.3}ms max:{:.3}ms slow:{}/{}",
            self.fps(),
            self.entities.enemies,
            self.entities.projectiles,
            self.avg_frame_ms,
            self.max_frame_ms,
            self.slow_frames,
            self.total_frames
        )
    }
}
