//! Events plugin: gameplay notifications as buffered Bevy messages.
//!
//! Producers write intent; UI, audio and scene flow read it later in the frame.
//! `EnemyDestroyed` is bounded: past `capacity` buffered messages, emission fails with
//! `EventError::QueueSaturated` and the caller logs it. The kill itself already happened.

use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::collision::collaborators::EventCollaborator;
use crate::plugins::collision::error::EventError;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamaged {
    pub player: Entity,
    pub damage: i32,
    pub remaining: i32,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDestroyed {
    pub enemy: Entity,
    pub points: u32,
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlayerDamaged>()
        .add_message::<GameOver>()
        .add_message::<EnemyDestroyed>()
        .add_systems(Update, enter_game_over.run_if(in_state(GameState::InGame)));
}

/// Leave `InGame` once any `GameOver` arrives.
pub fn enter_game_over(mut reader: MessageReader<GameOver>, mut next: ResMut<NextState<GameState>>) {
    if reader.read().count() > 0 {
        info!("game over");
        next.set(GameState::GameOver);
    }
}

/// `EventCollaborator` that writes into the world's message queues.
#[derive(Debug, Clone)]
pub struct MessageEvents {
    capacity: usize,
}

impl MessageEvents {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl EventCollaborator for MessageEvents {
    fn emit_player_damaged(&mut self, world: &mut World, player: Entity, damage: i32, remaining: i32) {
        if world
            .write_message(PlayerDamaged { player, damage, remaining })
            .is_none()
        {
            warn!("PlayerDamaged for {player} dropped: message type not registered");
        }
    }

    fn emit_game_over(&mut self, world: &mut World) {
        if world.write_message(GameOver).is_none() {
            warn!("GameOver dropped: message type not registered");
        }
    }

    fn emit_enemy_destroyed(&mut self, world: &mut World, enemy: Entity, points: u32) -> Result<(), EventError> {
        let Some(mut messages) = world.get_resource_mut::<Messages<EnemyDestroyed>>() else {
            return Err(EventError::Unregistered("EnemyDestroyed"));
        };

        let pending = messages.len();
        if pending >= self.capacity {
            return Err(EventError::QueueSaturated {
                pending,
                capacity: self.capacity,
            });
        }

        messages.write(EnemyDestroyed { enemy, points });
        Ok(())
    }
}
