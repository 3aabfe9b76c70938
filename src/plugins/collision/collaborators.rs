//! Narrow interfaces to the subsystems the collision pass drives.
//!
//! Implementations are injected into `CollisionSystem::new`. The in-crate ones live in the
//! `health`, `enemies` and `events` plugins; tests substitute recording stubs.

use bevy::prelude::*;

use super::error::EventError;

/// What a damage request did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible, or the entity has no health to take.
    Ignored,
    Damaged { remaining: i32 },
    /// Health reached zero.
    Defeated,
}

pub trait HealthCollaborator: Send + Sync + 'static {
    /// Owns invincibility gating: callers always issue the request.
    fn damage_player(&mut self, world: &mut World, player: Entity, amount: i32) -> DamageOutcome;

    fn is_player_invincible(&self, world: &World, player: Entity) -> bool;
}

pub trait EnemyCollaborator: Send + Sync + 'static {
    /// Remove a defeated enemy and return the points it awarded.
    fn destroy_enemy(&mut self, world: &mut World, enemy: Entity) -> u32;
}

pub trait EventCollaborator: Send + Sync + 'static {
    fn emit_player_damaged(&mut self, world: &mut World, player: Entity, damage: i32, remaining: i32);

    fn emit_game_over(&mut self, world: &mut World);

    fn emit_enemy_destroyed(&mut self, world: &mut World, enemy: Entity, points: u32) -> Result<(), EventError>;
}

/// The three collaborators, grouped so handlers can borrow them together.
pub struct Collaborators {
    pub health: Box<dyn HealthCollaborator>,
    pub enemies: Box<dyn EnemyCollaborator>,
    pub events: Box<dyn EventCollaborator>,
}

impl Collaborators {
    pub fn new(
        health: impl HealthCollaborator,
        enemies: impl EnemyCollaborator,
        events: impl EventCollaborator,
    ) -> Self {
        Self {
            health: Box::new(health),
            enemies: Box::new(enemies),
            events: Box::new(events),
        }
    }
}
