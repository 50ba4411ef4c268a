//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by exactly one frame. Every
//! counter (cooldowns, spawn pacing, explosion frames) is in frames, so the
//! `dt` handed in by the host is accepted but never scales anything.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{
    BULLET_ENEMY_EXTENTS, BULLET_PLAYER_EXTENTS, RAM_EXTENTS, WHIRLPOOL_EXTENTS, boxes_overlap,
};
use super::level;
use super::state::{Bullet, Enemy, EnemyKind, GameEvent, GamePhase, MenuItem, World};
use crate::consts::*;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Turn left / move left / menu cursor left
    pub left: bool,
    /// Turn right / move right / menu cursor right
    pub right: bool,
    /// Fire / menu select
    pub fire: bool,
}

impl TickInput {
    /// Buttons that went down this frame
    pub fn pressed_since(&self, previous: &TickInput) -> TickInput {
        TickInput {
            left: self.left && !previous.left,
            right: self.right && !previous.right,
            fire: self.fire && !previous.fire,
        }
    }
}

/// Spawn interval for a given score: 3 frames faster per 50 points, floored
pub fn spawn_interval_for_score(score: u32) -> u32 {
    let reduction = (score / SCORE_PER_SPAWN_STEP).saturating_mul(SPAWN_INTERVAL_STEP);
    BASE_SPAWN_INTERVAL
        .saturating_sub(reduction)
        .max(MIN_SPAWN_INTERVAL)
}

impl World {
    /// Advance one frame (see [`tick`])
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, _dt: f32) {
    world.events.clear();
    world.frame += 1;

    let pressed = input.pressed_since(&world.previous_input);
    world.previous_input = *input;

    match world.phase {
        GamePhase::Playing => update_game(world, input),
        GamePhase::Menu { .. } | GamePhase::Paused { .. } | GamePhase::GameOver { .. } => {
            update_menu(world, &pressed)
        }
    }
}

/// Cursor movement and selection, driven by rising edges only
fn update_menu(world: &mut World, pressed: &TickInput) {
    let item_count = world.phase.menu_items().len();
    if let Some(selected) = world.phase.selected_mut() {
        if pressed.left {
            *selected = selected.saturating_sub(1);
        }
        if pressed.right {
            *selected = (*selected + 1).min(item_count.saturating_sub(1));
        }
    }

    if pressed.fire {
        select_menu_item(world);
    }
}

/// Run the action behind the highlighted menu entry
pub fn select_menu_item(world: &mut World) {
    let Some(selected) = world.phase.selected() else {
        return;
    };
    let Some(&item) = world.phase.menu_items().get(selected) else {
        return;
    };

    log::debug!("Menu select: {:?}", item);
    match item {
        MenuItem::StartGame | MenuItem::Restart => world.start_game(),
        MenuItem::Quit => world.events.push(GameEvent::QuitRequested),
        MenuItem::Resume => {
            world.phase = GamePhase::Playing;
            log::info!("Game resumed");
        }
        MenuItem::ExitToMenu => {
            world.phase = GamePhase::Menu { selected: 0 };
            log::info!("Returned to menu");
        }
    }
}

/// One frame of gameplay. Step order matters: later steps see earlier results.
fn update_game(world: &mut World, input: &TickInput) {
    world.scroll_offset += SCROLL_SPEED;

    update_player(world, input);
    update_bullets(world);
    update_enemies(world);
    update_explosions(world);
    update_scenery(world);
    update_enemy_spawning(world);
    check_collisions(world);

    if world.player.hp <= 0 {
        world.phase = GamePhase::GameOver { selected: 0 };
        world.events.push(GameEvent::GameOver { score: world.score });
        log::info!("Game over, final score {}", world.score);
    }
}

fn update_player(world: &mut World, input: &TickInput) {
    let player = &mut world.player;

    if player.shoot_cooldown > 0 {
        player.shoot_cooldown -= 1;
    }

    // Both directions apply independently when held together
    if input.left {
        player.pos.x -= PLAYER_SPEED;
        player.angle = (player.angle - ANGLE_STEP).max(-MAX_SHIP_ANGLE);
    }
    if input.right {
        player.pos.x += PLAYER_SPEED;
        player.angle = (player.angle + ANGLE_STEP).min(MAX_SHIP_ANGLE);
    }
    if !input.left && !input.right {
        if player.angle > 0.0 {
            player.angle = (player.angle - ANGLE_RETURN_SPEED).max(0.0);
        } else if player.angle < 0.0 {
            player.angle = (player.angle + ANGLE_RETURN_SPEED).min(0.0);
        }
    }

    player.clamp_to_screen(world.screen_width, world.screen_height);

    if input.fire && player.shoot_cooldown == 0 {
        player_shoot(world);
    }
}

/// Pull the trigger. The cooldown restarts even if no bullet leaves the
/// barrel (heading too straight, or the bullet pool is full).
fn player_shoot(world: &mut World) {
    world.player.shoot_cooldown = FIRE_COOLDOWN;

    let Some(vel) = world.player.shot_velocity() else {
        return;
    };
    let pos = world.player.pos - Vec2::new(0.0, BULLET_MUZZLE_OFFSET);
    if world.bullets.spawn(Bullet::new(pos, vel)).is_some() {
        world.events.push(GameEvent::PlayerFired { pos });
    }
}

fn update_bullets(world: &mut World) {
    let max_x = world.screen_width + BULLET_CULL_MARGIN;
    let max_y = world.screen_height + BULLET_CULL_MARGIN;
    let pools = [&mut world.bullets, &mut world.enemy_bullets];
    for pool in pools {
        for bullet in pool.iter_active_mut() {
            bullet.pos += bullet.vel;
            if bullet.pos.y < -BULLET_CULL_MARGIN
                || bullet.pos.y > max_y
                || bullet.pos.x < -BULLET_CULL_MARGIN
                || bullet.pos.x > max_x
            {
                bullet.active = false;
            }
        }
    }
}

fn update_enemies(world: &mut World) {
    let max_y = world.screen_height + ENEMY_CULL_MARGIN;
    let mut shots = Vec::new();

    for enemy in world.enemies.iter_active_mut() {
        enemy.pos += enemy.vel;
        if enemy.pos.y > max_y {
            enemy.active = false;
            continue;
        }

        if enemy.kind == EnemyKind::Heavy {
            if enemy.shoot_cooldown > 0 {
                enemy.shoot_cooldown -= 1;
            } else {
                shots.push(enemy.pos + Vec2::new(0.0, BULLET_MUZZLE_OFFSET));
                enemy.shoot_cooldown = HEAVY_FIRE_COOLDOWN;
            }
        }
    }

    for pos in shots {
        let bullet = Bullet::new(pos, Vec2::new(0.0, ENEMY_BULLET_SPEED));
        if world.enemy_bullets.spawn(bullet).is_some() {
            world.events.push(GameEvent::EnemyFired { pos });
        }
    }
}

fn update_explosions(world: &mut World) {
    for explosion in world.explosions.iter_active_mut() {
        explosion.frame += 1;
        if explosion.frame >= EXPLOSION_FRAMES {
            explosion.active = false;
        }
    }
}

/// Drift islands and whirlpools down with the sea, wrapping them to the top
fn update_scenery(world: &mut World) {
    let delta = Vec2::new(0.0, SCROLL_SPEED);
    let wrap_y = world.screen_height + WRAP_MARGIN;

    for island in world.islands.iter_mut().filter(|i| i.active) {
        island.translate(delta);
        if island.pos.y > wrap_y {
            level::respawn_island(&mut world.rng, island, world.screen_width);
            log::debug!("Island wrapped to x={:.0}", island.pos.x);
        }
    }

    for whirlpool in world.whirlpools.iter_mut().filter(|w| w.active) {
        whirlpool.pos += delta;
        if whirlpool.pos.y > wrap_y {
            level::respawn_whirlpool(&mut world.rng, whirlpool, world.screen_width);
        }
    }
}

fn update_enemy_spawning(world: &mut World) {
    world.spawn_timer += 1;
    if world.spawn_timer >= world.spawn_interval {
        spawn_enemy_batch(world);
        world.spawn_timer = 0;
        world.spawn_interval = spawn_interval_for_score(world.score);
    }
}

/// One enemy, or two stacked 30px apart
fn spawn_enemy_batch(world: &mut World) {
    let count = if world.rng.random_bool(DOUBLE_SPAWN_CHANCE) {
        2
    } else {
        1
    };

    for row in 0..count {
        let kind = if world.rng.random_bool(LIGHT_ENEMY_CHANCE) {
            EnemyKind::Light
        } else {
            EnemyKind::Heavy
        };
        let x = ENEMY_CULL_MARGIN
            + world.rng.random::<f32>() * (world.screen_width - 2.0 * ENEMY_CULL_MARGIN);
        let y = -ENEMY_CULL_MARGIN - row as f32 * SPAWN_ROW_SPACING;
        let vel = Vec2::new(
            (world.rng.random::<f32>() - 0.5) * 6.0,
            1.0 + world.rng.random::<f32>() * 3.0,
        );

        if world.enemies.spawn(Enemy::new(kind, Vec2::new(x, y), vel)).is_none() {
            log::debug!("Enemy pool full, dropping spawn");
        }
    }
}

/// Resolve every contact for this frame, in fixed order
pub fn check_collisions(world: &mut World) {
    // Player bullets vs enemies: a bullet is spent on the first hull it touches
    let mut kills = Vec::new();
    for bullet in world.bullets.iter_active_mut() {
        let hit = world
            .enemies
            .iter_active_mut()
            .find(|enemy| boxes_overlap(bullet.pos, enemy.pos, BULLET_ENEMY_EXTENTS));
        if let Some(enemy) = hit {
            bullet.active = false;
            enemy.hp -= BULLET_DAMAGE;
            if enemy.hp <= 0 {
                enemy.active = false;
                kills.push((enemy.pos, enemy.kind));
            }
        }
    }
    for (pos, kind) in kills {
        world.spawn_explosion(pos);
        let score = kind.score_value();
        world.score += score;
        world.events.push(GameEvent::EnemyDestroyed { pos, kind, score });
    }

    // Enemy bullets vs player
    for bullet in world.enemy_bullets.iter_active_mut() {
        if boxes_overlap(bullet.pos, world.player.pos, BULLET_PLAYER_EXTENTS) {
            bullet.active = false;
            world.player.take_damage(ENEMY_BULLET_DAMAGE);
            world.events.push(GameEvent::PlayerDamaged {
                amount: ENEMY_BULLET_DAMAGE,
                hp: world.player.hp,
            });
        }
    }

    // Enemies ramming the player (no score)
    let mut rams = Vec::new();
    for enemy in world.enemies.iter_active_mut() {
        if boxes_overlap(enemy.pos, world.player.pos, RAM_EXTENTS) {
            enemy.active = false;
            rams.push(enemy.pos);
        }
    }
    for pos in rams {
        world.spawn_explosion(pos);
        world.player.take_damage(RAM_DAMAGE);
        world.events.push(GameEvent::EnemyRammed { pos });
        world.events.push(GameEvent::PlayerDamaged {
            amount: RAM_DAMAGE,
            hp: world.player.hp,
        });
    }

    // Islands hurt every frame the ship stays aground
    let aground = world
        .islands
        .iter()
        .filter(|island| island.active && island.contains_point(world.player.pos))
        .count();
    for _ in 0..aground {
        world.player.take_damage(ISLAND_DAMAGE);
        world.events.push(GameEvent::PlayerDamaged {
            amount: ISLAND_DAMAGE,
            hp: world.player.hp,
        });
    }

    // Whirlpools teleport unconditionally, checked against the updated position
    for whirlpool in world.whirlpools.iter().filter(|w| w.active) {
        if boxes_overlap(whirlpool.pos, world.player.pos, WHIRLPOOL_EXTENTS) {
            let from = world.player.pos;
            world.player.pos = whirlpool.target;
            world.events.push(GameEvent::Teleported {
                from,
                to: whirlpool.target,
            });
        }
    }
}
