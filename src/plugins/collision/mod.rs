//! Collision plugin: broad phase, narrow phase, and category responses for one fixed tick.
//!
//! # Data flow
//! ```text
//!   World (Role + Position + Size)
//!        │  snapshot per category
//!        v
//!   SpatialHash (only when side B is large) ──► overlap::overlaps (strict AABB)
//!        │
//!        v
//!   handlers ──► World (despawn, enemy Health)
//!            ──► HealthCollaborator / EnemyCollaborator / EventCollaborator
//! ```
//!
//! The pass runs once per `FixedPostUpdate` as an exclusive system with a deadline of
//! `frame_budget_fraction` of the fixed timestep. If the deadline trips or the caller
//! cancels, the pass stops where it is. Nothing is rolled back. Pairs that were missed
//! are re-derived on the next tick.
//!
//! Callers that want their own collaborators insert a `CollisionSystem` before adding
//! the plugin. Otherwise the plugin wires in the health, enemies and events plugins.

pub mod collaborators;
pub mod components;
pub mod deadline;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod overlap;
pub mod spatial_hash;

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::{enemies::ScoringEnemies, events::MessageEvents, health::InvincibilityHealth};

use collaborators::Collaborators;
use deadline::{CancelToken, Deadline, frame_budget};
use orchestrator::{CollisionSystem, PassSettings};

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        let tunables = app.world().resource::<Tunables>().clone();

        if !app.world().contains_resource::<CollisionSystem>() {
            app.insert_resource(default_collision_system(&tunables));
        }

        app.init_resource::<CancelToken>();

        app.add_systems(
            FixedPostUpdate,
            run_collision_pass.run_if(in_state(GameState::InGame)),
        );
    }
}

/// Collision system wired to the in-crate collaborators.
pub fn default_collision_system(tunables: &Tunables) -> CollisionSystem {
    CollisionSystem::new(
        PassSettings::from(tunables),
        Collaborators::new(
            InvincibilityHealth::new(tunables.invincibility_secs),
            ScoringEnemies::new(tunables.enemy_points),
            MessageEvents::new(tunables.event_queue_capacity),
        ),
    )
}

/// Exclusive system: one bounded pass per fixed tick.
///
/// Aborted passes are logged, not returned.
pub fn run_collision_pass(world: &mut World) {
    let fraction = world
        .get_resource::<Tunables>()
        .map_or(Tunables::default().frame_budget_fraction, |t| t.frame_budget_fraction);
    let timestep = world.resource::<Time<Fixed>>().timestep();

    let mut deadline = Deadline::after(frame_budget(timestep, fraction));
    if let Some(token) = world.get_resource::<CancelToken>() {
        deadline = deadline.with_cancel(token.clone());
    }

    world.resource_scope(|world, mut system: Mut<CollisionSystem>| {
        match system.check_collisions(world, &deadline) {
            Ok(report) if !report.is_empty() => debug!("collision pass: {report:?}"),
            Ok(_) => {}
            Err(err) => warn!("collision pass aborted: {err}"),
        }
    });
}
