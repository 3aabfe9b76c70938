//! Broad phase: uniform grid mapping cells to the entities whose boxes touch them.
//!
//! The grid is per-tick scratch: the orchestrator clears it, bulk-inserts the current frame's
//! candidates, queries it, and discards the contents on the next clear. Nothing persists
//! across ticks except bucket storage.
//!
//! Cell coordinates saturate at the `i32` range, so any finite or infinite position maps to
//! some cell. Boxes that would cover more than [`MAX_SPAN_CELLS`] cells are kept on a side
//! list with their cell range instead of being copied into every bucket.

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use super::components::Size;
use super::overlap::aabb;

pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Largest cell footprint a single box is bucketed into.
pub const MAX_SPAN_CELLS: u64 = 1024;

/// Reusable buffers for the non-allocating query variants.
#[derive(Debug, Default)]
pub struct QueryScratch {
    seen: HashSet<Entity>,
    pub results: Vec<Entity>,
}

impl QueryScratch {
    fn reset(&mut self) {
        self.seen.clear();
        self.results.clear();
    }

    #[inline]
    fn push_unique(&mut self, e: Entity) {
        if self.seen.insert(e) {
            self.results.push(e);
        }
    }
}

/// Inclusive range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRange {
    min: IVec2,
    max: IVec2,
}

impl CellRange {
    /// Number of cells covered, saturating.
    fn cell_count(&self) -> u64 {
        let w = (i64::from(self.max.x) - i64::from(self.min.x) + 1).max(0) as u64;
        let h = (i64::from(self.max.y) - i64::from(self.min.y) + 1).max(0) as u64;
        w.saturating_mul(h)
    }

    #[inline]
    fn contains(&self, cell: IVec2) -> bool {
        cell.cmpge(self.min).all() && cell.cmple(self.max).all()
    }

    #[inline]
    fn touches(&self, other: &CellRange) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

#[derive(Debug)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<IVec2, Vec<Entity>>,
    oversized: Vec<(Entity, CellRange)>,
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::default(),
            oversized: Vec::new(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `p`. Saturates at the `i32` range.
    #[inline]
    pub fn cell_of(&self, p: Vec2) -> IVec2 {
        (p / self.cell_size).floor().as_ivec2()
    }

    /// Cells covered by the box centered on `pos`.
    #[inline]
    fn span(&self, pos: Vec2, size: Size) -> CellRange {
        let b = aabb(pos, size);
        CellRange {
            min: self.cell_of(b.min),
            max: self.cell_of(b.max),
        }
    }

    /// Empty every bucket.
    ///
    /// Buckets populated since the last clear keep their allocation. Buckets that stayed
    /// empty are dropped, which bounds the map by one tick's footprint.
    pub fn clear(&mut self) {
        self.cells.retain(|_, bucket| {
            let was_used = !bucket.is_empty();
            bucket.clear();
            was_used
        });
        self.oversized.clear();
    }

    pub fn insert(&mut self, entity: Entity, pos: Vec2, size: Size) {
        let range = self.span(pos, size);
        if range.cell_count() > MAX_SPAN_CELLS {
            self.oversized.push((entity, range));
            return;
        }
        for y in range.min.y..=range.max.y {
            for x in range.min.x..=range.max.x {
                self.cells.entry(IVec2::new(x, y)).or_default().push(entity);
            }
        }
    }

    /// Union of every bucket the box touches, each entity once, in no particular order.
    pub fn query(&self, pos: Vec2, size: Size) -> Vec<Entity> {
        let mut scratch = QueryScratch::default();
        self.query_into(pos, size, &mut scratch);
        scratch.results
    }

    pub fn query_into(&self, pos: Vec2, size: Size, scratch: &mut QueryScratch) {
        self.collect_range(self.span(pos, size), scratch);
    }

    /// Union of the 3x3 block of buckets around the cell containing `pos`.
    pub fn query_nearby(&self, pos: Vec2) -> Vec<Entity> {
        let mut scratch = QueryScratch::default();
        self.query_nearby_into(pos, &mut scratch);
        scratch.results
    }

    pub fn query_nearby_into(&self, pos: Vec2, scratch: &mut QueryScratch) {
        let c = self.cell_of(pos);
        let range = CellRange {
            min: c.saturating_sub(IVec2::ONE),
            max: c.saturating_add(IVec2::ONE),
        };
        self.collect_range(range, scratch);
    }

    fn collect_range(&self, range: CellRange, scratch: &mut QueryScratch) {
        scratch.reset();

        for (e, covered) in &self.oversized {
            if covered.touches(&range) {
                scratch.push_unique(*e);
            }
        }

        // Walk whichever is smaller: the requested cells or the allocated buckets.
        if range.cell_count() > self.cells.len() as u64 {
            for (cell, bucket) in &self.cells {
                if range.contains(*cell) {
                    bucket.iter().for_each(|&e| scratch.push_unique(e));
                }
            }
            return;
        }

        for y in range.min.y..=range.max.y {
            for x in range.min.x..=range.max.x {
                let Some(bucket) = self.cells.get(&IVec2::new(x, y)) else {
                    continue;
                };
                for &e in bucket {
                    scratch.push_unique(e);
                }
            }
        }
    }

    /// Entities bucketed in one cell, in insertion order. Oversized boxes are not listed.
    pub fn bucket(&self, cell: IVec2) -> &[Entity] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|b| !b.is_empty()).count()
    }

    /// Buckets currently allocated, empty or not.
    pub fn allocated_cells(&self) -> usize {
        self.cells.len()
    }

    /// Boxes held on the oversized list since the last clear.
    pub fn oversized_len(&self) -> usize {
        self.oversized.len()
    }
}
