//! Bricks, their per-breakpoint positions and size constraints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{BreakpointId, BreakpointSet, GridRect};

/// Per-breakpoint position record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrickPosition {
    /// Explicit rect. `None` means "inherit through the fallback chain".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<GridRect>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,

    /// User override of the row span. `rect.h` keeps the natural height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_height: Option<u32>,
}

/// A positioned content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub id: String,

    /// Content-kind tag; the engine only uses it to look up constraints.
    #[serde(rename = "type")]
    pub brick_type: String,

    #[serde(default)]
    pub positions: BTreeMap<BreakpointId, BrickPosition>,
}

impl Brick {
    pub fn new(id: impl Into<String>, brick_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brick_type: brick_type.into(),
            positions: BTreeMap::new(),
        }
    }

    /// Builder-style explicit rect.
    pub fn with_rect(mut self, breakpoint: impl Into<BreakpointId>, rect: GridRect) -> Self {
        self.set_rect(&breakpoint.into(), rect);
        self
    }

    pub fn position(&self, breakpoint: &BreakpointId) -> Option<&BrickPosition> {
        self.positions.get(breakpoint)
    }

    /// Rect stored on exactly this breakpoint, without fallback.
    pub fn explicit_rect(&self, breakpoint: &BreakpointId) -> Option<GridRect> {
        self.positions.get(breakpoint).and_then(|pos| pos.rect)
    }

    pub fn has_any_rect(&self) -> bool {
        self.positions.values().any(|pos| pos.rect.is_some())
    }

    /// Rect on `breakpoint`, inherited through its fallback chain when not
    /// explicit, clamped to the breakpoint's columns.
    pub fn resolved_rect(&self, set: &BreakpointSet, breakpoint: &BreakpointId) -> Option<GridRect> {
        let columns = set.columns(breakpoint)?;
        let (_, rect) = set.resolve(breakpoint, |bp| self.explicit_rect(bp))?;
        Some(rect.clamp_to_columns(columns))
    }

    /// Resolved rect with the manual height override applied. This is the
    /// footprint used for collision checks and stacking.
    pub fn effective_rect(&self, set: &BreakpointSet, breakpoint: &BreakpointId) -> Option<GridRect> {
        let mut rect = self.resolved_rect(set, breakpoint)?;
        if let Some(manual) = self.manual_height(breakpoint) {
            rect.h = manual.max(1);
        }
        Some(rect)
    }

    pub fn manual_height(&self, breakpoint: &BreakpointId) -> Option<u32> {
        self.positions.get(breakpoint).and_then(|pos| pos.manual_height)
    }

    pub fn is_hidden(&self, breakpoint: &BreakpointId) -> bool {
        self.positions
            .get(breakpoint)
            .map(|pos| pos.hidden)
            .unwrap_or(false)
    }

    pub fn set_rect(&mut self, breakpoint: &BreakpointId, rect: GridRect) {
        self.positions.entry(breakpoint.clone()).or_default().rect = Some(rect);
    }

    pub fn set_hidden(&mut self, breakpoint: &BreakpointId, hidden: bool) {
        self.positions.entry(breakpoint.clone()).or_default().hidden = hidden;
    }

    /// Flip visibility on `breakpoint`, returning the new hidden state.
    pub fn toggle_hidden(&mut self, breakpoint: &BreakpointId) -> bool {
        let pos = self.positions.entry(breakpoint.clone()).or_default();
        pos.hidden = !pos.hidden;
        pos.hidden
    }

    pub fn set_manual_height(&mut self, breakpoint: &BreakpointId, height: Option<u32>) {
        self.positions.entry(breakpoint.clone()).or_default().manual_height = height;
    }
}

/// Size constraints for one brick type on one breakpoint.
///
/// There is no `max_h`: bricks grow downward without limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickConstraints {
    pub preferred_w: u32,
    pub preferred_h: u32,
    #[serde(default = "one")]
    pub min_w: u32,
    #[serde(default = "one")]
    pub min_h: u32,
    /// Widest span allowed; `None` means the full column count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
}

fn one() -> u32 {
    1
}

impl Default for BrickConstraints {
    fn default() -> Self {
        Self::new(6, 3)
    }
}

impl BrickConstraints {
    pub fn new(preferred_w: u32, preferred_h: u32) -> Self {
        Self {
            preferred_w,
            preferred_h,
            min_w: 1,
            min_h: 1,
            max_w: None,
        }
    }

    pub fn with_min(mut self, min_w: u32, min_h: u32) -> Self {
        self.min_w = min_w;
        self.min_h = min_h;
        self
    }

    pub fn with_max_w(mut self, max_w: u32) -> Self {
        self.max_w = Some(max_w);
        self
    }

    /// Upper width bound on a grid with `columns` columns.
    pub fn max_width(&self, columns: u32) -> u32 {
        self.max_w.unwrap_or(columns).min(columns).max(1)
    }

    /// Lower width bound, never above the grid or the upper bound.
    pub fn min_width(&self, columns: u32) -> u32 {
        self.min_w.max(1).min(self.max_width(columns))
    }

    pub fn clamp_width(&self, w: u32, columns: u32) -> u32 {
        w.clamp(self.min_width(columns), self.max_width(columns))
    }

    pub fn clamp_height(&self, h: u32) -> u32 {
        h.max(self.min_h.max(1))
    }
}

/// Read-only lookup of constraints by brick type and breakpoint.
pub trait ConstraintsSource {
    fn constraints_for(&self, brick_type: &str, breakpoint: &BreakpointId)
        -> Option<BrickConstraints>;
}

/// Source that knows no brick types.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraints;

impl ConstraintsSource for NoConstraints {
    fn constraints_for(&self, _: &str, _: &BreakpointId) -> Option<BrickConstraints> {
        None
    }
}
