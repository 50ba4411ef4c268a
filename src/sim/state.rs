//! Game state and core simulation types
//!
//! Everything a session needs lives in [`World`]; the host owns it and threads
//! it through every call.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::point_in_polygon;
use super::level;
use super::pool::{Pool, Slot};
use super::tick::TickInput;
use crate::consts::*;
use crate::soft_clamp;

/// Top-level screen, carrying the menu cursor where a menu is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu (initial)
    Menu { selected: usize },
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused { selected: usize },
    /// Player ran out of hit points
    GameOver { selected: usize },
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::Menu { selected: 0 }
    }
}

impl GamePhase {
    /// Items shown for this phase, in cursor order
    pub fn menu_items(&self) -> &'static [MenuItem] {
        match self {
            GamePhase::Menu { .. } => &[MenuItem::StartGame, MenuItem::Quit],
            GamePhase::Playing => &[],
            GamePhase::Paused { .. } => {
                &[MenuItem::Resume, MenuItem::Restart, MenuItem::ExitToMenu]
            }
            GamePhase::GameOver { .. } => &[MenuItem::Restart, MenuItem::ExitToMenu],
        }
    }

    /// Menu cursor, if this phase shows a menu
    pub fn selected(&self) -> Option<usize> {
        match *self {
            GamePhase::Menu { selected }
            | GamePhase::Paused { selected }
            | GamePhase::GameOver { selected } => Some(selected),
            GamePhase::Playing => None,
        }
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut usize> {
        match self {
            GamePhase::Menu { selected }
            | GamePhase::Paused { selected }
            | GamePhase::GameOver { selected } => Some(selected),
            GamePhase::Playing => None,
        }
    }

    pub fn kind(&self) -> PhaseKind {
        match self {
            GamePhase::Menu { .. } => PhaseKind::Menu,
            GamePhase::Playing => PhaseKind::Playing,
            GamePhase::Paused { .. } => PhaseKind::Paused,
            GamePhase::GameOver { .. } => PhaseKind::GameOver,
        }
    }
}

/// Phase tag without per-phase data (what the renderer switches on)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// A selectable menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    StartGame,
    /// Leaving the application is up to the host
    Quit,
    Resume,
    Restart,
    ExitToMenu,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::StartGame => "START GAME",
            MenuItem::Quit => "QUIT",
            MenuItem::Resume => "RESUME",
            MenuItem::Restart => "RESTART",
            MenuItem::ExitToMenu => "EXIT",
        }
    }
}

/// Something that happened during the last update, for host-side audio/effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    PlayerFired { pos: Vec2 },
    EnemyFired { pos: Vec2 },
    EnemyDestroyed { pos: Vec2, kind: EnemyKind, score: u32 },
    EnemyRammed { pos: Vec2 },
    PlayerDamaged { amount: i32, hp: i32 },
    Teleported { from: Vec2, to: Vec2 },
    GameOver { score: u32 },
    QuitRequested,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Heading in degrees, negative = turned left
    pub angle: f32,
    pub hp: i32,
    /// Frames until the guns are ready
    pub shoot_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            hp: PLAYER_MAX_HP,
            shoot_cooldown: 0,
        }
    }

    /// Apply damage, flooring hp at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).clamp(0, PLAYER_MAX_HP);
    }

    /// Keep the ship inside the playfield
    pub fn clamp_to_screen(&mut self, width: f32, height: f32) {
        self.pos.x = soft_clamp(self.pos.x, PLAYER_MARGIN_X, width - PLAYER_MARGIN_X);
        self.pos.y = soft_clamp(self.pos.y, PLAYER_MARGIN_Y, height - PLAYER_MARGIN_Y);
    }

    /// Velocity of a shot fired at the current heading.
    ///
    /// Guns fire opposite to the turn: turned left fires right and vice
    /// versa. Straight ahead has no firing solution.
    pub fn shot_velocity(&self) -> Option<Vec2> {
        if self.angle <= -FIRE_ANGLE_THRESHOLD {
            Some(Vec2::new(BULLET_SPEED, -BULLET_SPEED))
        } else if self.angle >= FIRE_ANGLE_THRESHOLD {
            Some(Vec2::new(-BULLET_SPEED, -BULLET_SPEED))
        } else {
            None
        }
    }
}

/// A projectile (player and enemy shots use separate pools)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    #[serde(skip)]
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            active: true,
        }
    }
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Enemy hull types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast rowboat, no guns
    #[default]
    Light,
    /// Galleon that fires downward periodically
    Heavy,
}

impl EnemyKind {
    pub fn max_hp(&self) -> i32 {
        match self {
            EnemyKind::Light => LIGHT_ENEMY_HP,
            EnemyKind::Heavy => HEAVY_ENEMY_HP,
        }
    }

    /// Points for sinking one with gunfire
    pub fn score_value(&self) -> u32 {
        match self {
            EnemyKind::Light => LIGHT_ENEMY_SCORE,
            EnemyKind::Heavy => HEAVY_ENEMY_SCORE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: EnemyKind,
    pub hp: i32,
    pub max_hp: i32,
    /// Frames until the next shot (heavy only)
    pub shoot_cooldown: u32,
    #[serde(skip)]
    pub active: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            kind,
            hp: kind.max_hp(),
            max_hp: kind.max_hp(),
            shoot_cooldown: match kind {
                EnemyKind::Light => 0,
                EnemyKind::Heavy => HEAVY_FIRST_SHOT_DELAY,
            },
            active: true,
        }
    }
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Visual-only explosion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub frame: u32,
    #[serde(skip)]
    pub active: bool,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            frame: 0,
            active: true,
        }
    }
}

impl Slot for Explosion {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Island decoration types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeKind {
    Palm,
    Bush,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub pos: Vec2,
    pub kind: TreeKind,
    pub size: f32,
}

/// An irregular island; damages the ship while it sits inside the outline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Island {
    /// Anchor (center of the generating ellipse)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Closed outline, first point not repeated
    pub points: Vec<Vec2>,
    pub trees: Vec<Tree>,
    #[serde(skip)]
    pub active: bool,
}

impl Island {
    /// Radius used for spacing and the degenerate-outline fallback
    #[inline]
    pub fn bounding_radius(&self) -> f32 {
        self.width.max(self.height) / 2.0
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        if self.points.len() < 3 {
            return p.distance(self.pos) < self.bounding_radius();
        }
        point_in_polygon(&self.points, p)
    }

    /// Rigidly move the island, its outline and its trees
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
        for point in &mut self.points {
            *point += delta;
        }
        for tree in &mut self.trees {
            tree.pos += delta;
        }
    }
}

/// Teleports the ship to `target` on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Whirlpool {
    pub pos: Vec2,
    pub target: Vec2,
    #[serde(skip)]
    pub active: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    /// Background parallax only, entities do not use it
    pub scroll_offset: f32,
    pub bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub explosions: Pool<Explosion>,
    pub islands: Vec<Island>,
    pub whirlpools: Vec<Whirlpool>,
    /// Frames since the last enemy batch
    pub spawn_timer: u32,
    /// Frames between enemy batches
    pub spawn_interval: u32,
    /// Simulation frame counter (all phases)
    pub frame: u64,
    pub(crate) previous_input: TickInput,
    pub(crate) events: Vec<GameEvent>,
}

impl World {
    /// Create a session sitting on the title menu with a backdrop level
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen_width: width,
            screen_height: height,
            phase: GamePhase::default(),
            score: 0,
            player: Player::new(Self::spawn_point(width, height)),
            scroll_offset: 0.0,
            bullets: Pool::new(MAX_BULLETS),
            enemy_bullets: Pool::new(MAX_ENEMY_BULLETS),
            enemies: Pool::new(MAX_ENEMIES),
            explosions: Pool::new(MAX_EXPLOSIONS),
            islands: Vec::new(),
            whirlpools: Vec::new(),
            spawn_timer: 0,
            spawn_interval: BASE_SPAWN_INTERVAL,
            frame: 0,
            previous_input: TickInput::default(),
            events: Vec::new(),
        };
        world.init_level();
        world
    }

    fn spawn_point(width: f32, height: f32) -> Vec2 {
        Vec2::new(width / 2.0, height - PLAYER_SPAWN_OFFSET)
    }

    /// Regenerate islands and whirlpools
    pub fn init_level(&mut self) {
        self.islands = level::generate_islands(&mut self.rng, self.screen_width);
        self.whirlpools = level::generate_whirlpools(&mut self.rng, self.screen_width);
        log::info!(
            "Level generated: {} islands, {} whirlpools",
            self.islands.len(),
            self.whirlpools.len()
        );
    }

    /// Begin a fresh run (also used by restart)
    pub fn start_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.player = Player::new(Self::spawn_point(self.screen_width, self.screen_height));
        self.score = 0;
        self.scroll_offset = 0.0;
        self.spawn_timer = 0;
        self.spawn_interval = BASE_SPAWN_INTERVAL;

        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.explosions.clear();

        self.init_level();
        self.events.push(GameEvent::GameStarted);
        log::info!("Game started (seed {})", self.seed);
    }

    /// Pause a running game; no effect in other phases
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused { selected: 0 };
            log::info!("Game paused");
        }
    }

    /// Push a new viewport size. The level is kept as is.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        self.player.clamp_to_screen(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Events emitted by the most recent update
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn spawn_explosion(&mut self, pos: Vec2) {
        if self.explosions.spawn(Explosion::new(pos)).is_none() {
            log::debug!("Explosion pool full, dropping explosion");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_starts_on_menu() {
        let world = World::new(1280.0, 720.0, 7);
        assert_eq!(world.phase, GamePhase::Menu { selected: 0 });
        assert_eq!(world.whirlpools.len(), level::WHIRLPOOL_COUNT);
        assert!(!world.islands.is_empty());
        assert_eq!(world.bullets.capacity(), MAX_BULLETS);
        assert_eq!(world.explosions.capacity(), MAX_EXPLOSIONS);
    }

    #[test]
    fn test_start_game_resets_run() {
        let mut world = World::new(1280.0, 720.0, 7);
        world.score = 340;
        world.player.hp = 5;
        world.player.angle = 30.0;
        world.scroll_offset = 99.0;
        world.enemies.spawn(Enemy::new(EnemyKind::Heavy, Vec2::ZERO, Vec2::ZERO));
        world.bullets.spawn(Bullet::new(Vec2::ZERO, Vec2::ZERO));

        world.start_game();

        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.score, 0);
        assert_eq!(world.player.hp, PLAYER_MAX_HP);
        assert_eq!(world.player.angle, 0.0);
        assert_eq!(world.player.pos, Vec2::new(640.0, 620.0));
        assert_eq!(world.scroll_offset, 0.0);
        assert_eq!(world.enemies.active_count(), 0);
        assert_eq!(world.bullets.active_count(), 0);
        assert!(!world.islands.is_empty());
    }

    #[test]
    fn test_start_game_islands_respect_spacing() {
        for seed in 0..20 {
            let mut world = World::new(1600.0, 900.0, seed);
            world.start_game();
            for (i, a) in world.islands.iter().enumerate() {
                for b in world.islands.iter().skip(i + 1) {
                    let min = level::MIN_ISLAND_GAP + a.bounding_radius() + b.bounding_radius();
                    assert!(a.pos.distance(b.pos) >= min);
                }
            }
        }
    }

    #[test]
    fn test_player_damage_floors_at_zero() {
        let mut player = Player::new(Vec2::ZERO);
        player.take_damage(95);
        assert_eq!(player.hp, 5);
        player.take_damage(20);
        assert_eq!(player.hp, 0);
    }

    #[test]
    fn test_shot_velocity_is_mirrored() {
        let mut player = Player::new(Vec2::ZERO);
        player.angle = -20.0;
        assert_eq!(player.shot_velocity(), Some(Vec2::new(6.0, -6.0)));
        player.angle = 15.0;
        assert_eq!(player.shot_velocity(), Some(Vec2::new(-6.0, -6.0)));
        player.angle = -15.0;
        assert_eq!(player.shot_velocity(), Some(Vec2::new(6.0, -6.0)));
        player.angle = 14.9;
        assert_eq!(player.shot_velocity(), None);
        player.angle = 0.0;
        assert_eq!(player.shot_velocity(), None);
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut world = World::new(800.0, 600.0, 1);
        world.pause();
        assert_eq!(world.phase, GamePhase::Menu { selected: 0 });

        world.start_game();
        world.pause();
        assert_eq!(world.phase, GamePhase::Paused { selected: 0 });
    }

    #[test]
    fn test_resize_reclamps_without_regenerating() {
        let mut world = World::new(1280.0, 720.0, 3);
        world.start_game();
        world.player.pos = Vec2::new(1200.0, 650.0);
        let islands_before: Vec<Vec2> = world.islands.iter().map(|i| i.pos).collect();

        world.set_viewport(800.0, 600.0);

        assert_eq!(world.player.pos, Vec2::new(770.0, 550.0));
        let islands_after: Vec<Vec2> = world.islands.iter().map(|i| i.pos).collect();
        assert_eq!(islands_before, islands_after);
    }

    #[test]
    fn test_island_fallback_containment() {
        let island = Island {
            pos: Vec2::new(100.0, 100.0),
            width: 80.0,
            height: 60.0,
            points: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)],
            trees: Vec::new(),
            active: true,
        };
        assert!(island.contains_point(Vec2::new(130.0, 100.0)));
        assert!(!island.contains_point(Vec2::new(141.0, 100.0)));
    }

    #[test]
    fn test_island_translate_is_rigid() {
        let mut island = Island {
            pos: Vec2::new(10.0, 10.0),
            width: 80.0,
            height: 60.0,
            points: vec![Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(10.0, 20.0)],
            trees: vec![Tree {
                pos: Vec2::new(10.0, 5.0),
                kind: TreeKind::Palm,
                size: 12.0,
            }],
            active: true,
        };
        island.translate(Vec2::new(0.0, 2.0));
        assert_eq!(island.pos, Vec2::new(10.0, 12.0));
        assert_eq!(island.points[2], Vec2::new(10.0, 22.0));
        assert_eq!(island.trees[0].pos, Vec2::new(10.0, 7.0));
    }
}
