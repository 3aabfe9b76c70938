//! Components the collision pass reads (and, for `Health`, writes).

use bevy::prelude::*;

/// Gameplay category. Every collidable entity carries exactly one.
///
/// Role changes never happen by mutation: a dead enemy is despawned, not re-tagged.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Enemy,
    /// Player-fired.
    Projectile,
    EnemyProjectile,
}

/// Box center in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct Position(pub Vec2);

impl Position {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Box extents. Both dimensions are positive.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "Size must be positive, got {width}x{height}");
        Self { width, height }
    }

    #[inline]
    pub fn splat(side: u32) -> Self {
        Self::new(side, side)
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn half_extents(self) -> Vec2 {
        self.as_vec2() * 0.5
    }
}

/// Hit points plus the invincibility window.
///
/// Invariant: `0 <= current <= max`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    pub invincible: bool,
    /// Seconds left in the invincibility window.
    pub invincibility_remaining: f32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: max,
            max,
            invincible: false,
            invincibility_remaining: 0.0,
        }
    }

    /// Subtract `amount` and clamp into `[0, max]`. Returns the new value.
    #[inline]
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        self.current = (self.current - amount).clamp(0, self.max);
        self.current
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.current == 0
    }
}

/// Score awarded when the enemy is destroyed by a projectile.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointValue(pub u32);
