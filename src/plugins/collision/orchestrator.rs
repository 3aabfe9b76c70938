//! Per-tick collision driver.
//!
//! One pass runs three category sweeps in a fixed order:
//! 1. player projectile -> enemy   (one hit per projectile)
//! 2. enemy projectile  -> player  (one hit per projectile)
//! 3. player           <-> enemy   (no cap; invincibility is the health collaborator's job)
//!
//! The order matters: an enemy killed by a projectile in (1) is already gone when (3) looks
//! at it.
//!
//! Each sweep snapshots its candidates up front, so no query iterator is alive while a
//! handler mutates the world. Entities removed earlier in the pass are skipped when their
//! handle no longer resolves. The deadline is checked before each sweep and before each pair.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::collaborators::{Collaborators, DamageOutcome};
use super::components::{Position, Role, Size};
use super::deadline::Deadline;
use super::error::CollisionError;
use super::handlers::{self, EnemyHit};
use super::overlap::overlaps;
use super::spatial_hash::{QueryScratch, SpatialHash};

/// Snapshot of one collidable taken at the start of a sweep.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    entity: Entity,
    pos: Vec2,
    size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSettings {
    pub cell_size: f32,
    pub broad_phase_threshold: usize,
    pub projectile_damage: i32,
    pub contact_damage: i32,
}

impl From<&Tunables> for PassSettings {
    fn from(t: &Tunables) -> Self {
        Self {
            cell_size: t.cell_size,
            broad_phase_threshold: t.broad_phase_threshold,
            projectile_damage: t.projectile_damage,
            contact_damage: t.contact_damage,
        }
    }
}

impl Default for PassSettings {
    fn default() -> Self {
        Self::from(&Tunables::default())
    }
}

/// What one completed pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub projectile_hits: u32,
    pub enemies_destroyed: u32,
    pub points_awarded: u32,
    /// Enemy projectiles that reached the player.
    pub player_hits: u32,
    /// Enemies that rammed the player.
    pub enemy_contacts: u32,
    /// At least one sweep went through the spatial hash.
    pub used_broad_phase: bool,
}

impl PassReport {
    pub fn is_empty(&self) -> bool {
        self.projectile_hits == 0 && self.player_hits == 0 && self.enemy_contacts == 0
    }
}

#[derive(Resource)]
pub struct CollisionSystem {
    settings: PassSettings,
    grid: SpatialHash,
    scratch: QueryScratch,
    side_a: Vec<Candidate>,
    side_b: Vec<Candidate>,
    /// Entity -> slot in `side_b`, filled when the grid is in use.
    side_b_slots: HashMap<Entity, usize>,
    hits: Vec<Candidate>,
    collab: Collaborators,
}

impl CollisionSystem {
    pub fn new(settings: PassSettings, collab: Collaborators) -> Self {
        Self {
            grid: SpatialHash::new(settings.cell_size),
            settings,
            scratch: QueryScratch::default(),
            side_a: Vec::new(),
            side_b: Vec::new(),
            side_b_slots: HashMap::default(),
            hits: Vec::new(),
            collab,
        }
    }

    /// Grid contents from the most recent broad-phase sweep.
    pub fn grid(&self) -> &SpatialHash {
        &self.grid
    }

    /// Run all three sweeps. On cancellation, responses already applied stand.
    pub fn check_collisions(&mut self, world: &mut World, deadline: &Deadline) -> Result<PassReport, CollisionError> {
        let mut report = PassReport::default();

        self.projectiles_vs_enemies(world, deadline, &mut report)?;
        self.enemy_projectiles_vs_player(world, deadline, &mut report)?;
        self.player_vs_enemies(world, deadline, &mut report)?;

        Ok(report)
    }

    fn projectiles_vs_enemies(
        &mut self,
        world: &mut World,
        deadline: &Deadline,
        report: &mut PassReport,
    ) -> Result<(), CollisionError> {
        deadline.check()?;
        if !self.prepare(world, Role::Projectile, Role::Enemy, report) {
            return Ok(());
        }

        for i in 0..self.side_a.len() {
            let shot = self.side_a[i];
            deadline.check()?;
            if !is_live(world, shot.entity) {
                continue;
            }

            self.collect_overlaps(world, deadline, shot)?;
            let Some(target) = nearest(&self.hits, shot.pos) else {
                continue;
            };

            report.projectile_hits += 1;
            let hit = handlers::projectile_hits_enemy(
                world,
                &mut self.collab,
                shot.entity,
                target.entity,
                self.settings.projectile_damage,
            );
            if let EnemyHit::Destroyed { points } = hit {
                report.enemies_destroyed += 1;
                report.points_awarded += points;
            }
        }
        Ok(())
    }

    fn enemy_projectiles_vs_player(
        &mut self,
        world: &mut World,
        deadline: &Deadline,
        report: &mut PassReport,
    ) -> Result<(), CollisionError> {
        deadline.check()?;
        if !self.prepare(world, Role::EnemyProjectile, Role::Player, report) {
            return Ok(());
        }

        for i in 0..self.side_a.len() {
            let shot = self.side_a[i];
            deadline.check()?;
            if !is_live(world, shot.entity) {
                continue;
            }

            self.collect_overlaps(world, deadline, shot)?;
            let Some(player) = nearest(&self.hits, shot.pos) else {
                continue;
            };

            report.player_hits += 1;
            handlers::enemy_projectile_hits_player(
                world,
                &mut self.collab,
                shot.entity,
                player.entity,
                self.settings.contact_damage,
            );
        }
        Ok(())
    }

    fn player_vs_enemies(
        &mut self,
        world: &mut World,
        deadline: &Deadline,
        report: &mut PassReport,
    ) -> Result<(), CollisionError> {
        deadline.check()?;
        if !self.prepare(world, Role::Player, Role::Enemy, report) {
            return Ok(());
        }

        for i in 0..self.side_a.len() {
            let player = self.side_a[i];
            deadline.check()?;
            if !is_live(world, player.entity) {
                continue;
            }

            self.collect_overlaps(world, deadline, player)?;
            self.hits.sort_by(|a, b| by_distance(player.pos, a, b));

            for k in 0..self.hits.len() {
                let enemy = self.hits[k];
                deadline.check()?;
                if !is_live(world, player.entity) {
                    break;
                }
                if !is_live(world, enemy.entity) {
                    continue;
                }

                report.enemy_contacts += 1;
                let outcome = handlers::enemy_rams_player(
                    world,
                    &mut self.collab,
                    enemy.entity,
                    player.entity,
                    self.settings.contact_damage,
                );
                if outcome == DamageOutcome::Ignored {
                    trace!("enemy {} rammed invincible player {}", enemy.entity, player.entity);
                }
            }
        }
        Ok(())
    }

    /// Snapshot both sides and index side B when it is large. Returns false when either
    /// side is empty and the sweep has nothing to do.
    fn prepare(&mut self, world: &mut World, a: Role, b: Role, report: &mut PassReport) -> bool {
        gather(world, a, &mut self.side_a);
        if self.side_a.is_empty() {
            return false;
        }
        gather(world, b, &mut self.side_b);
        if self.side_b.is_empty() {
            return false;
        }

        self.grid.clear();
        self.side_b_slots.clear();
        if self.uses_broad_phase() {
            report.used_broad_phase = true;
            for (slot, c) in self.side_b.iter().enumerate() {
                self.grid.insert(c.entity, c.pos, c.size);
                self.side_b_slots.insert(c.entity, slot);
            }
        }
        true
    }

    #[inline]
    fn uses_broad_phase(&self) -> bool {
        self.side_b.len() > self.settings.broad_phase_threshold
    }

    /// Fill `self.hits` with live side-B candidates whose boxes overlap `a`. Both paths
    /// test against the sweep's snapshot.
    fn collect_overlaps(&mut self, world: &World, deadline: &Deadline, a: Candidate) -> Result<(), CollisionError> {
        self.hits.clear();

        if self.uses_broad_phase() {
            self.grid.query_into(a.pos, a.size, &mut self.scratch);
            for entity in &self.scratch.results {
                deadline.check()?;
                let Some(&slot) = self.side_b_slots.get(entity) else {
                    continue;
                };
                let b = self.side_b[slot];
                if is_live(world, b.entity) && overlaps(a.pos, a.size, b.pos, b.size) {
                    self.hits.push(b);
                }
            }
        } else {
            for b in &self.side_b {
                deadline.check()?;
                if is_live(world, b.entity) && overlaps(a.pos, a.size, b.pos, b.size) {
                    self.hits.push(*b);
                }
            }
        }
        Ok(())
    }
}

fn gather(world: &mut World, role: Role, out: &mut Vec<Candidate>) {
    out.clear();
    let mut q = world.query::<(Entity, &Role, &Position, &Size)>();
    out.extend(
        q.iter(world)
            .filter(|(_, r, _, _)| **r == role)
            .map(|(entity, _, pos, size)| Candidate { entity, pos: pos.0, size: *size }),
    );
}

#[inline]
fn is_live(world: &World, entity: Entity) -> bool {
    let live = world.get_entity(entity).is_ok();
    if !live {
        trace!("skipping stale handle {entity}");
    }
    live
}

/// Nearest center first; equal distances fall back to entity order so the choice is stable.
#[inline]
fn by_distance(from: Vec2, a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    a.pos
        .distance_squared(from)
        .total_cmp(&b.pos.distance_squared(from))
        .then_with(|| a.entity.cmp(&b.entity))
}

fn nearest(hits: &[Candidate], from: Vec2) -> Option<Candidate> {
    hits.iter().copied().min_by(|a, b| by_distance(from, a, b))
}
