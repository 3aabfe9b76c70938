//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::collision::CollisionPlugin;

pub mod collision;
pub mod core;
pub mod enemies;
pub mod events;
pub mod health;

/// Register gameplay plugins. All of them run headless.
///
/// Order matters: `core` inserts `Tunables`, which `CollisionPlugin` reads at build time.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    events::plugin(app);
    health::plugin(app);
    enemies::plugin(app);
    app.add_plugins(CollisionPlugin);
}
