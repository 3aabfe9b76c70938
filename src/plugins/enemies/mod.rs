//! Enemies plugin: destruction and scoring for enemies shot down by the player.
//!
//! Spawning and formations belong to the wave generator; this module only decides what a
//! defeated enemy is worth and removes it.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::collision::collaborators::EnemyCollaborator;
use crate::plugins::collision::components::PointValue;

/// Running score for the current game.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points: u64,
    pub enemies_destroyed: u32,
}

impl Score {
    #[inline]
    fn award(&mut self, points: u32) {
        self.points += u64::from(points);
        self.enemies_destroyed += 1;
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Score>();
    app.add_systems(OnEnter(GameState::InGame), reset_score);
}

fn reset_score(mut score: ResMut<Score>) {
    *score = Score::default();
}

/// `EnemyCollaborator` that despawns the enemy and banks its `PointValue`.
#[derive(Debug, Clone)]
pub struct ScoringEnemies {
    default_points: u32,
}

impl ScoringEnemies {
    pub fn new(default_points: u32) -> Self {
        Self { default_points }
    }
}

impl EnemyCollaborator for ScoringEnemies {
    fn destroy_enemy(&mut self, world: &mut World, enemy: Entity) -> u32 {
        let points = world
            .get::<PointValue>(enemy)
            .map_or(self.default_points, |p| p.0);

        world.despawn(enemy);

        match world.get_resource_mut::<Score>() {
            Some(mut score) => score.award(points),
            None => warn!("no Score resource; {points} points for {enemy} dropped"),
        }
        points
    }
}
