//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Spatial hash cell size in world units.
    pub cell_size: f32,
    /// Share of the fixed timestep one collision pass may spend.
    pub frame_budget_fraction: f32,
    /// B-side candidate count above which a category uses the spatial hash.
    pub broad_phase_threshold: usize,
    pub projectile_damage: i32,
    pub contact_damage: i32,
    pub invincibility_secs: f32,
    /// Score for enemies without a `PointValue`.
    pub enemy_points: u32,
    pub event_queue_capacity: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            cell_size: 64.0,
            frame_budget_fraction: 0.5,
            broad_phase_threshold: 32,
            projectile_damage: 1,
            contact_damage: 1,
            invincibility_secs: 2.0,
            enemy_points: 100,
            event_queue_capacity: 256,
        }
    }
}
