//! Collision checks and placement search on one breakpoint.
//!
//! # Placement heuristic
//!
//! `find_placement` is greedy skyline (shelf) packing: it tracks the lowest
//! free row under every column and drops the new brick onto that skyline.
//! Widths are tried from the preferred width down to the minimum; within a
//! width the top-most, then left-most, position wins. It never moves
//! existing bricks to make room, so the result is not an optimal packing.
//!
//! Every function here terminates and returns a rect inside the column
//! bounds, including for constraints the manifest layer should have
//! rejected (`min_w > columns`), which fall through to bottom-append.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{BreakpointId, BrickConstraints, GridRect};

/// Caller-selected relaxations of the validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementOptions {
    /// Free-placement mode: skip the overlap test, keep the bounds test.
    #[serde(default)]
    pub allow_overlap: bool,
}

impl PlacementOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn overlapping() -> Self {
        Self {
            allow_overlap: true,
        }
    }
}

/// Whether `rect` can sit on a grid of `columns` columns next to `existing`.
pub fn is_valid(
    rect: &GridRect,
    existing: &[GridRect],
    columns: u32,
    options: PlacementOptions,
) -> bool {
    if !rect.fits_columns(columns) {
        return false;
    }
    options.allow_overlap || !existing.iter().any(|other| other.intersects(rect))
}

/// Lowest free row starting at each column.
fn skyline(existing: &[GridRect], columns: u32) -> Vec<u32> {
    let mut heights = vec![0u32; columns as usize];
    for rect in existing {
        let end = rect.right().min(columns);
        for col in rect.x.min(end)..end {
            let slot = &mut heights[col as usize];
            *slot = (*slot).max(rect.bottom());
        }
    }
    heights
}

/// Find a collision-free rect for a new brick.
pub fn find_placement(
    existing: &[GridRect],
    constraints: &BrickConstraints,
    columns: u32,
) -> GridRect {
    let columns = columns.max(1);
    let preferred_w = constraints.preferred_w.clamp(1, columns);
    let h = constraints.preferred_h.max(1);

    if existing.is_empty() {
        return GridRect::new(0, 0, preferred_w, h);
    }

    let heights = skyline(existing, columns);
    let min_w = constraints.min_w.max(1);

    for w in (min_w..=preferred_w).rev() {
        let mut best: Option<GridRect> = None;
        for x in 0..=(columns - w) {
            let start = x as usize;
            let y = heights[start..start + w as usize]
                .iter()
                .copied()
                .max()
                .unwrap_or(0);
            let candidate = GridRect::new(x, y, w, h);
            if !is_valid(&candidate, existing, columns, PlacementOptions::strict()) {
                continue;
            }
            if best.map_or(true, |b| (y, x) < (b.y, b.x)) {
                best = Some(candidate);
            }
        }
        if let Some(rect) = best {
            return rect;
        }
    }

    let bottom = heights.iter().copied().max().unwrap_or(0);
    debug!(
        min_w,
        preferred_w, columns, "No skyline slot fits, appending at the bottom"
    );
    GridRect::new(0, bottom, preferred_w, h)
}

/// Offset applied to a duplicated brick, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Nudge {
    #[serde(default)]
    pub dx: u32,
    #[serde(default)]
    pub dy: u32,
}

impl Nudge {
    pub fn new(dx: u32, dy: u32) -> Self {
        Self { dx, dy }
    }
}

/// Which axes a duplicate is nudged along, per breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePolicy {
    /// Nudge for breakpoints without an override.
    #[serde(default = "default_nudge")]
    pub default: Nudge,

    #[serde(default)]
    pub overrides: BTreeMap<BreakpointId, Nudge>,
}

fn default_nudge() -> Nudge {
    Nudge::new(0, 1)
}

impl Default for DuplicatePolicy {
    /// One row down everywhere, plus one column right on desktop.
    fn default() -> Self {
        let mut overrides = BTreeMap::new();
        overrides.insert(BreakpointId::from("desktop"), Nudge::new(1, 1));
        Self {
            default: default_nudge(),
            overrides,
        }
    }
}

impl DuplicatePolicy {
    /// One row down on every breakpoint.
    pub fn symmetric() -> Self {
        Self {
            default: default_nudge(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, breakpoint: impl Into<BreakpointId>, nudge: Nudge) -> Self {
        self.overrides.insert(breakpoint.into(), nudge);
        self
    }

    pub fn nudge_for(&self, breakpoint: &BreakpointId) -> Nudge {
        self.overrides
            .get(breakpoint)
            .copied()
            .unwrap_or(self.default)
    }
}

/// Rect for a copy of `original` on `breakpoint`, kept inside `columns`.
pub fn find_duplicate_placement(
    original: &GridRect,
    breakpoint: &BreakpointId,
    policy: &DuplicatePolicy,
    columns: u32,
) -> GridRect {
    let nudge = policy.nudge_for(breakpoint);
    GridRect {
        x: original.x.saturating_add(nudge.dx),
        y: original.y.saturating_add(nudge.dy),
        ..*original
    }
    .clamp_to_columns(columns)
}
