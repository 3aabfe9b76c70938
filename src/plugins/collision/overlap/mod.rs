//! Narrow phase: exact axis-aligned box overlap.
//!
//! `Position` is the box center for every caller (spatial hash included), so a box spans
//! `[pos - size/2, pos + size/2]` on each axis.
//!
//! We don't use `IntersectsVolume` from `bevy::math::bounding` because it treats touching
//! edges as intersecting. Here they must not.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use super::components::Size;

/// Box centered on `pos`.
#[inline]
pub fn aabb(pos: Vec2, size: Size) -> Aabb2d {
    Aabb2d::new(pos, size.half_extents())
}

/// Strict overlap: boxes that only share an edge do not overlap.
#[inline]
pub fn boxes_overlap(a: &Aabb2d, b: &Aabb2d) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

pub fn overlaps(pos1: Vec2, size1: Size, pos2: Vec2, size2: Size) -> bool {
    boxes_overlap(&aabb(pos1, size1), &aabb(pos2, size2))
}

#[cfg(test)]
mod tests;
