//! Read-only view of the world for the renderer
//!
//! Pools are filtered down to live entities so the renderer never sees a
//! stale slot.

use serde::Serialize;

use super::state::{Bullet, Enemy, Explosion, Island, PhaseKind, Player, Whirlpool, World};

#[derive(Debug, Clone, Serialize)]
pub struct RenderState {
    pub state: PhaseKind,
    /// Highlighted menu entry (0 while playing)
    pub selected_item: usize,
    /// Labels for the current phase's menu, empty while playing
    pub menu_items: Vec<&'static str>,
    pub score: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub islands: Vec<Island>,
    pub whirlpools: Vec<Whirlpool>,
    pub scroll_offset: f32,
}

impl World {
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            state: self.phase.kind(),
            selected_item: self.phase.selected().unwrap_or(0),
            menu_items: self.phase.menu_items().iter().map(|item| item.label()).collect(),
            score: self.score,
            player: self.player.clone(),
            enemies: self.enemies.collect_active(),
            bullets: self.bullets.collect_active(),
            enemy_bullets: self.enemy_bullets.collect_active(),
            explosions: self.explosions.collect_active(),
            islands: self.islands.iter().filter(|i| i.active).cloned().collect(),
            whirlpools: self.whirlpools.iter().filter(|w| w.active).cloned().collect(),
            scroll_offset: self.scroll_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{EnemyKind, GamePhase};

    #[test]
    fn test_snapshot_filters_inactive() {
        let mut world = World::new(1280.0, 720.0, 5);
        world.start_game();
        world.enemies.spawn(Enemy::new(EnemyKind::Light, Vec2::new(1.0, 2.0), Vec2::ZERO));
        let second = world
            .enemies
            .spawn(Enemy::new(EnemyKind::Heavy, Vec2::new(3.0, 4.0), Vec2::ZERO))
            .expect("slot");
        world.enemies.slots_mut()[second].active = false;
        world.islands[0].active = false;

        let snap = world.snapshot();
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].kind, EnemyKind::Light);
        assert_eq!(snap.islands.len(), world.islands.len() - 1);
        assert_eq!(snap.whirlpools.len(), 4);
        assert_eq!(snap.state, PhaseKind::Playing);
        assert!(snap.menu_items.is_empty());
    }

    #[test]
    fn test_snapshot_menu_labels() {
        let mut world = World::new(1280.0, 720.0, 5);
        world.phase = GamePhase::Paused { selected: 2 };
        let snap = world.snapshot();
        assert_eq!(snap.state, PhaseKind::Paused);
        assert_eq!(snap.selected_item, 2);
        assert_eq!(snap.menu_items, vec!["RESUME", "RESTART", "EXIT"]);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let world = World::new(800.0, 600.0, 5);
        let json = serde_json::to_value(world.snapshot()).expect("serialize");
        assert_eq!(json["state"], "MENU");
        assert_eq!(json["score"], 0);
        assert_eq!(json["player"]["hp"], 100);
        assert!(json["whirlpools"].as_array().is_some_and(|w| w.len() == 4));
        // Liveness is implied by presence
        assert!(json["whirlpools"][0].get("active").is_none());
    }
}
