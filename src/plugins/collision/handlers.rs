//! Per-category responses to a confirmed overlap.
//!
//! Handlers hold no state. Every side effect goes through the world (removal, enemy health)
//! or through a collaborator (player damage, enemy destruction, notifications).

use bevy::prelude::*;

use super::collaborators::{Collaborators, DamageOutcome};
use super::components::Health;

/// Result of a player projectile hitting an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyHit {
    Wounded { remaining: i32 },
    Destroyed { points: u32 },
}

/// Remove the projectile, wound the enemy, and destroy it at zero health.
///
/// An enemy without `Health` is destroyed by the first hit.
pub fn projectile_hits_enemy(
    world: &mut World,
    collab: &mut Collaborators,
    projectile: Entity,
    enemy: Entity,
    damage: i32,
) -> EnemyHit {
    world.despawn(projectile);

    let remaining = world
        .get_mut::<Health>(enemy)
        .map_or(0, |mut hp| hp.apply_damage(damage));

    if remaining > 0 {
        return EnemyHit::Wounded { remaining };
    }

    let points = collab.enemies.destroy_enemy(world, enemy);
    if let Err(err) = collab.events.emit_enemy_destroyed(world, enemy, points) {
        warn!("enemy {enemy} destroyed but notification failed: {err}");
    }
    EnemyHit::Destroyed { points }
}

/// Remove the enemy projectile and ask for player damage.
pub fn enemy_projectile_hits_player(
    world: &mut World,
    collab: &mut Collaborators,
    projectile: Entity,
    player: Entity,
    damage: i32,
) -> DamageOutcome {
    world.despawn(projectile);
    damage_player(world, collab, player, damage)
}

/// Ramming is always fatal to the enemy, whatever its health. No points are awarded.
pub fn enemy_rams_player(
    world: &mut World,
    collab: &mut Collaborators,
    enemy: Entity,
    player: Entity,
    damage: i32,
) -> DamageOutcome {
    world.despawn(enemy);
    damage_player(world, collab, player, damage)
}

fn damage_player(world: &mut World, collab: &mut Collaborators, player: Entity, amount: i32) -> DamageOutcome {
    if collab.health.is_player_invincible(world, player) {
        trace!("player {player} invincible; damage request will be ignored");
    }

    let outcome = collab.health.damage_player(world, player, amount);
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Damaged { remaining } => {
            collab.events.emit_player_damaged(world, player, amount, remaining);
        }
        DamageOutcome::Defeated => {
            collab.events.emit_player_damaged(world, player, amount, 0);
            collab.events.emit_game_over(world);
        }
    }
    outcome
}
