//! Per-frame combat step
//!
//! Advances every entity in a fixed order, then resolves hits. The order is
//! part of the contract: tests and replays depend on it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::hook::HookStep;
use super::soul::SoulState;
use super::state::{GameEvent, GamePhase, GameState};
use super::world::WorldBounds;

/// Player intents for a single frame, already mapped from devices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement axes, each in -1..1
    pub move_axis: Vec2,
    /// Fire button held
    pub fire: bool,
    /// Hook button pressed this frame
    pub hook: bool,
    /// Ultimate button pressed this frame
    pub ultimate: bool,
    /// Aim target in world space (cursor or stick target)
    pub aim: Vec2,
}

/// Advance the combat state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, world: &dyn WorldBounds, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.frame += 1;
    state.time += dt;

    advance_entities(state, input, world, dt);
    resolve_enemy_bolts(state);
    resolve_melee(state);

    if state.player.is_dead() {
        log::info!("Player died after {:.1}s, {} kills", state.time, state.kills);
        state.events.push(GameEvent::PlayerDied);
        state.phase = GamePhase::GameOver;
        state.enemies.clear();
        state.player.hook = None;
        return;
    }

    resolve_player_bolts(state);
    run_spawner(state, world, dt);
    credit_souls(state);
    prune(state);
}

fn advance_entities(state: &mut GameState, input: &TickInput, world: &dyn WorldBounds, dt: f32) {
    // Player
    let actions = state.player.advance(dt, input);
    state.player.pos = world.clamp(state.player.pos);
    if actions.fired {
        state.events.push(GameEvent::BoltFired);
    }
    if actions.threw_hook {
        state.events.push(GameEvent::HookThrown);
    }
    if input.ultimate {
        let center = state.player.pos;
        if let Some(frozen) = state.player.ultimate.try_activate(center, &mut state.enemies) {
            state.ultimates_used += 1;
            state.events.push(GameEvent::UltimateActivated { frozen });
        }
    }

    // Enemies
    let target = state.player.pos;
    for enemy in state.enemies.iter_mut() {
        enemy.advance(dt, target);
        enemy.pos = world.clamp(enemy.pos);
        for bolt in enemy.projectiles.iter_mut() {
            if !world.contains(bolt.pos) {
                bolt.alive = false;
            }
        }
    }
    for bolt in state.player.projectiles.iter_mut() {
        if !world.contains(bolt.pos) {
            bolt.alive = false;
        }
    }

    // Hook
    if let Some(hook) = state.player.hook.as_mut() {
        match hook.advance(dt, state.player.pos, &mut state.souls) {
            HookStep::Moved => {}
            HookStep::Snagged(soul) => state.events.push(GameEvent::HookSnagged { soul }),
            HookStep::Released(soul) => state.events.push(GameEvent::HookReleased { soul }),
            HookStep::Retracted => state.events.push(GameEvent::HookRetracted),
        }
        if !hook.active {
            state.player.hook = None;
        }
    }

    // Souls
    let soul_tuning = state.tuning.soul;
    for soul in state.souls.iter_mut() {
        let was_alive = soul.alive;
        soul.advance(dt, target, &soul_tuning);
        if was_alive && !soul.alive && soul.state == SoulState::Orbiting {
            state.events.push(GameEvent::SoulExpired { id: soul.id });
        }
    }

    // Ultimate
    if state.player.ultimate.advance(dt, &mut state.enemies) {
        state.events.push(GameEvent::UltimateExpired);
    }
}

/// Enemy bolts against the player's swept circle
fn resolve_enemy_bolts(state: &mut GameState) {
    let player = &mut state.player;
    let (from, to, radius) = (player.prev_pos, player.pos, player.radius);
    for enemy in state.enemies.iter_mut() {
        for bolt in enemy.projectiles.iter_mut() {
            if !bolt.alive || !bolt.sweep_hits(from, to, radius) {
                continue;
            }
            bolt.alive = false;
            if player.apply_damage(bolt.damage) {
                state.events.push(GameEvent::PlayerHit {
                    damage: bolt.damage,
                    health: player.health,
                });
            }
        }
    }
}

/// Melee enemies bite when in reach and off cooldown
fn resolve_melee(state: &mut GameState) {
    let player = &mut state.player;
    for enemy in state.enemies.iter_mut() {
        if !enemy.alive || enemy.kind != EnemyKind::Melee {
            continue;
        }
        if !enemy.in_melee_reach(player.pos, player.radius) {
            continue;
        }
        if enemy.attack_timer > 0.0 || player.is_invulnerable() {
            continue;
        }
        if player.apply_damage(enemy.contact_damage) {
            enemy.attack_timer = enemy.attack_cooldown;
            state.events.push(GameEvent::PlayerHit {
                damage: enemy.contact_damage,
                health: player.health,
            });
        }
    }
}

/// Player bolts against each enemy's swept circle; kills leave souls
fn resolve_player_bolts(state: &mut GameState) {
    let mut fallen: Vec<(u32, Vec2)> = Vec::new();
    for bolt in state.player.projectiles.iter_mut() {
        if !bolt.alive {
            continue;
        }
        let hit = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && bolt.sweep_hits(e.prev_pos, e.pos, e.radius));
        if let Some(enemy) = hit {
            bolt.alive = false;
            if enemy.apply_damage(bolt.damage) {
                fallen.push((enemy.id, enemy.pos));
            }
        }
    }

    for (id, pos) in fallen {
        state.kills += 1;
        state.events.push(GameEvent::EnemyKilled { id, pos });
        log::debug!("Enemy {id} killed at {pos}");
        state.add_soul(pos);
    }
}

fn run_spawner(state: &mut GameState, world: &dyn WorldBounds, dt: f32) {
    state.spawn_timer -= dt;
    if state.spawn_timer <= 0.0 {
        state.spawn_enemy(world);
        state.spawn_timer = state.tuning.spawn.period;
    }
}

/// Each absorbed soul charges the ultimate exactly once
fn credit_souls(state: &mut GameState) {
    for soul in state.souls.iter_mut().filter(|s| s.ready_to_credit()) {
        soul.credited = true;
        soul.alive = false;
        state.player.ultimate.add_souls(1);
        state.player.soul_count += 1;
        state.events.push(GameEvent::SoulCollected { id: soul.id });
    }
}

fn prune(state: &mut GameState) {
    for enemy in state.enemies.iter_mut() {
        super::projectile::prune(&mut enemy.projectiles);
    }
    super::projectile::prune(&mut state.player.projectiles);
    state.enemies.retain(|e| e.alive);
    state.souls.retain(|s| s.alive);
}

/// Simple bot input: kite around the nearest enemy, shoot it, hook loose
/// souls, and pop the ultimate when enemies crowd in
pub fn autopilot(state: &GameState) -> TickInput {
    let me = state.player.pos;
    let nearest_enemy = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| a.pos.distance_squared(me).total_cmp(&b.pos.distance_squared(me)));
    let hook_reach = state.player.hook_tuning.max_distance;
    let loose_soul = state
        .souls
        .iter()
        .filter(|s| s.is_catchable() && s.pos.distance(me) < hook_reach)
        .min_by(|a, b| a.pos.distance_squared(me).total_cmp(&b.pos.distance_squared(me)));

    let mut input = TickInput::default();

    if let Some(enemy) = nearest_enemy {
        let away = me - enemy.pos;
        let dist = away.length();
        // Circle-strafe, backing off when too close
        let tangent = away.perp().normalize_or_zero();
        let retreat = if dist < 200.0 {
            away.normalize_or_zero()
        } else {
            Vec2::ZERO
        };
        input.move_axis = (tangent + retreat).clamp(Vec2::NEG_ONE, Vec2::ONE);
        input.fire = true;
        input.aim = enemy.pos;
    }

    if let Some(soul) = loose_soul {
        if state.player.hook.is_none() {
            input.hook = true;
            input.aim = soul.pos;
        }
    }

    let crowd = state
        .enemies
        .iter()
        .filter(|e| e.alive && e.pos.distance(me) < 250.0)
        .count();
    input.ultimate = state.player.ultimate.is_charged() && crowd >= 3;
    input
}
