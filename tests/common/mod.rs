//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime + time.
//! - `StatesPlugin` drives `GameState`.
//! - we then call `orbital_collision::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use orbital_collision::plugins::collision::components::{Health, Position, Role, Size};

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    orbital_collision::game::configure_headless(&mut app);
    // First update applies the initial state.
    app.update();
    app
}

pub fn spawn_actor(app: &mut App, role: Role, x: f32, y: f32, side: u32) -> Entity {
    app.world_mut()
        .spawn((role, Position::new(x, y), Size::splat(side)))
        .id()
}

pub fn spawn_actor_with_health(app: &mut App, role: Role, x: f32, y: f32, side: u32, hp: i32) -> Entity {
    app.world_mut()
        .spawn((role, Position::new(x, y), Size::splat(side), Health::new(hp)))
        .id()
}

/// Run exactly one collision tick, independent of wall-clock accumulation.
pub fn collision_tick(app: &mut App) {
    app.world_mut().run_schedule(FixedPostUpdate);
}

pub fn is_live(app: &App, e: Entity) -> bool {
    app.world().get_entity(e).is_ok()
}
