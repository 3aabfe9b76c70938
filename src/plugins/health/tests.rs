use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::collision::components::{Position, Size};

fn fixed_time_with_delta(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

fn spawn_player(world: &mut World, hp: Health) -> Entity {
    world
        .spawn((Role::Player, Position::new(0.0, 0.0), Size::splat(16), hp))
        .id()
}

#[test]
fn damage_lands_and_opens_invincibility_window() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Health::new(3));
    let mut health = InvincibilityHealth::new(1.5);

    let outcome = health.damage_player(&mut world, player, 1);

    assert_eq!(outcome, DamageOutcome::Damaged { remaining: 2 });
    let hp = world.get::<Health>(player).unwrap();
    assert_eq!(hp.current, 2);
    assert!(hp.invincible);
    assert_eq!(hp.invincibility_remaining, 1.5);
    assert!(health.is_player_invincible(&world, player));
}

#[test]
fn repeated_requests_during_window_are_ignored() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Health::new(5));
    let mut health = InvincibilityHealth::new(2.0);

    health.damage_player(&mut world, player, 1);
    for _ in 0..10 {
        assert_eq!(health.damage_player(&mut world, player, 1), DamageOutcome::Ignored);
    }

    assert_eq!(world.get::<Health>(player).unwrap().current, 4);
}

#[test]
fn lethal_damage_reports_defeat_and_clamps_at_zero() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Health::new(2));
    let mut health = InvincibilityHealth::new(2.0);

    assert_eq!(health.damage_player(&mut world, player, 5), DamageOutcome::Defeated);
    assert_eq!(world.get::<Health>(player).unwrap().current, 0);

    // Already defeated: further requests change nothing.
    assert_eq!(health.damage_player(&mut world, player, 1), DamageOutcome::Ignored);
    assert_eq!(world.get::<Health>(player).unwrap().current, 0);
}

#[test]
fn missing_health_is_ignored() {
    let mut world = World::new();
    let ghost = world.spawn(Role::Player).id();
    let mut health = InvincibilityHealth::new(1.0);

    assert_eq!(health.damage_player(&mut world, ghost, 1), DamageOutcome::Ignored);
    assert!(!health.is_player_invincible(&world, ghost));
}

#[test]
fn zero_window_never_grants_invincibility() {
    let mut world = World::new();
    let player = spawn_player(&mut world, Health::new(3));
    let mut health = InvincibilityHealth::new(0.0);

    health.damage_player(&mut world, player, 1);
    health.damage_player(&mut world, player, 1);

    assert_eq!(world.get::<Health>(player).unwrap().current, 1);
}

#[test]
fn tick_invincibility_counts_down_and_expires() {
    let mut world = World::new();
    let mut hp = Health::new(3);
    hp.invincible = true;
    hp.invincibility_remaining = 0.25;
    let player = spawn_player(&mut world, hp);

    world.insert_resource(fixed_time_with_delta(0.1));
    run_system_once(&mut world, tick_invincibility);
    let hp = world.get::<Health>(player).unwrap();
    assert!(hp.invincible);
    assert!((hp.invincibility_remaining - 0.15).abs() < 1e-5);

    world.insert_resource(fixed_time_with_delta(0.2));
    run_system_once(&mut world, tick_invincibility);
    let hp = world.get::<Health>(player).unwrap();
    assert!(!hp.invincible);
    assert_eq!(hp.invincibility_remaining, 0.0);
}

#[test]
fn tick_invincibility_leaves_non_players_alone() {
    let mut world = World::new();
    let mut hp = Health::new(3);
    hp.invincible = true;
    hp.invincibility_remaining = 0.05;
    let enemy = world
        .spawn((Role::Enemy, Position::new(0.0, 0.0), Size::splat(8), hp))
        .id();

    world.insert_resource(fixed_time_with_delta(1.0));
    run_system_once(&mut world, tick_invincibility);

    assert!(world.get::<Health>(enemy).unwrap().invincible);
}
