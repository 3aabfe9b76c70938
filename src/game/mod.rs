//! Game composition root.
//!
//! Rendering, input and menus live in the host application. This crate only wires the
//! collision core and its collaborators into an `App`:
//! - `configure_headless`: states + gameplay plugins, for integration tests and hosts that
//!   bring their own `DefaultPlugins`.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins;

/// Headless configuration.
///
/// Notes:
/// - Expects `MinimalPlugins` (or `DefaultPlugins`) and `StatesPlugin` to be present.
/// - A `CollisionSystem` or `Tunables` inserted beforehand is kept.
pub fn configure_headless(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
