//! Health plugin: player damage gating and the invincibility window.
//!
//! The collision pass always asks for damage; this module alone decides whether it lands.
//! A landed hit opens an invincibility window that `tick_invincibility` counts down on the
//! fixed clock.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::collision::collaborators::{DamageOutcome, HealthCollaborator};
use crate::plugins::collision::components::{Health, Role};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        tick_invincibility.run_if(in_state(GameState::InGame)),
    );
}

/// `HealthCollaborator` backed by the `Health` component.
#[derive(Debug, Clone)]
pub struct InvincibilityHealth {
    invincibility_secs: f32,
}

impl InvincibilityHealth {
    pub fn new(invincibility_secs: f32) -> Self {
        Self {
            invincibility_secs: invincibility_secs.max(0.0),
        }
    }
}

impl HealthCollaborator for InvincibilityHealth {
    fn damage_player(&mut self, world: &mut World, player: Entity, amount: i32) -> DamageOutcome {
        let Some(mut hp) = world.get_mut::<Health>(player) else {
            debug!("damage request for {player} without Health");
            return DamageOutcome::Ignored;
        };

        if hp.invincible || hp.is_defeated() {
            trace!("damage to {player} ignored (invincible: {})", hp.invincible);
            return DamageOutcome::Ignored;
        }

        let remaining = hp.apply_damage(amount);
        if remaining == 0 {
            return DamageOutcome::Defeated;
        }

        if self.invincibility_secs > 0.0 {
            hp.invincible = true;
            hp.invincibility_remaining = self.invincibility_secs;
        }
        DamageOutcome::Damaged { remaining }
    }

    fn is_player_invincible(&self, world: &World, player: Entity) -> bool {
        world.get::<Health>(player).is_some_and(|hp| hp.invincible)
    }
}

/// Count the invincibility window down and close it at zero.
pub fn tick_invincibility(time: Res<Time<Fixed>>, mut q: Query<(&Role, &mut Health)>) {
    let dt = time.delta_secs();

    for (role, mut hp) in &mut q {
        if *role != Role::Player || !hp.invincible {
            continue;
        }

        hp.invincibility_remaining = (hp.invincibility_remaining - dt).max(0.0);
        if hp.invincibility_remaining == 0.0 {
            hp.invincible = false;
        }
    }
}

#[cfg(test)]
mod tests;
