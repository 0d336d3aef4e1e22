//! In-memory layout store.
//!
//! Owns the authoritative, ordered brick list and applies every mutation the
//! engine produces: gesture commits, visibility toggles, duplicates, new
//! bricks and stacked reflows. Concurrent edits are last-writer-wins.
//!
//! The interaction controller reads committed state through [`StoreView`],
//! which pairs the store with a constraints source.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use brickgrid_core::{
    derive_mobile_layout, find_duplicate_placement, find_placement, is_valid, BreakpointId,
    BreakpointSet, Brick, BrickConstraints, ConstraintsSource, DuplicatePolicy, GridCell,
    GridRect, MobileLayoutOptions, PlacementOptions, Validate,
};
use brickgrid_input::LayoutView;

use crate::error::{EngineError, EngineResult};

/// Serializable snapshot of the brick list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub bricks: Vec<Brick>,
}

impl LayoutDocument {
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Ordered brick list plus the breakpoint set it is laid out on.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    breakpoints: BreakpointSet,
    bricks: Vec<Brick>,
}

impl LayoutStore {
    pub fn new(breakpoints: BreakpointSet) -> Self {
        Self {
            breakpoints,
            bricks: Vec::new(),
        }
    }

    /// Rebuild a store from a snapshot. Every brick must be positioned
    /// somewhere and ids must be unique.
    pub fn restore(breakpoints: BreakpointSet, document: LayoutDocument) -> EngineResult<Self> {
        let mut store = Self::new(breakpoints);
        for brick in document.bricks {
            store.insert(brick)?;
        }
        Ok(store)
    }

    pub fn snapshot(&self) -> LayoutDocument {
        LayoutDocument {
            bricks: self.bricks.clone(),
        }
    }

    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.breakpoints
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn brick(&self, brick_id: &str) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == brick_id)
    }

    fn index_of(&self, brick_id: &str) -> EngineResult<usize> {
        self.bricks
            .iter()
            .position(|b| b.id == brick_id)
            .ok_or_else(|| EngineError::UnknownBrick(brick_id.to_string()))
    }

    fn columns(&self, breakpoint: &BreakpointId) -> EngineResult<u32> {
        self.breakpoints
            .columns(breakpoint)
            .ok_or_else(|| EngineError::UnknownBreakpoint(breakpoint.clone()))
    }

    /// Append a brick.
    pub fn insert(&mut self, brick: Brick) -> EngineResult<()> {
        brick.validate()?;
        if self.brick(&brick.id).is_some() {
            return Err(EngineError::DuplicateBrickId(brick.id));
        }
        for breakpoint in brick.positions.keys() {
            if !self.breakpoints.contains(breakpoint) {
                warn!(brick = %brick.id, %breakpoint, "Brick has a position on an unknown breakpoint");
            }
        }
        self.bricks.push(brick);
        Ok(())
    }

    pub fn remove(&mut self, brick_id: &str) -> Option<Brick> {
        let idx = self.bricks.iter().position(|b| b.id == brick_id)?;
        Some(self.bricks.remove(idx))
    }

    /// Footprint of a brick on `breakpoint`: resolved through fallbacks,
    /// clamped to the grid, with any manual height applied.
    pub fn resolved_rect(&self, brick_id: &str, breakpoint: &BreakpointId) -> Option<GridRect> {
        self.brick(brick_id)?
            .effective_rect(&self.breakpoints, breakpoint)
    }

    /// Footprints of every visible brick on `breakpoint` not in `exclude`.
    pub fn placed_rects(&self, breakpoint: &BreakpointId, exclude: &[String]) -> Vec<GridRect> {
        self.bricks
            .iter()
            .filter(|b| !exclude.contains(&b.id))
            .filter(|b| !b.is_hidden(breakpoint))
            .filter_map(|b| b.effective_rect(&self.breakpoints, breakpoint))
            .collect()
    }

    /// Write a brick's rect on one breakpoint.
    ///
    /// When the brick carries a manual height there, `rect.h` becomes the new
    /// manual height and the stored natural height is kept.
    pub fn commit(
        &mut self,
        brick_id: &str,
        breakpoint: &BreakpointId,
        rect: GridRect,
    ) -> EngineResult<()> {
        let columns = self.columns(breakpoint)?;
        let idx = self.index_of(brick_id)?;
        let rect = rect.clamp_to_columns(columns);
        let set = &self.breakpoints;
        let brick = &mut self.bricks[idx];

        if brick.manual_height(breakpoint).is_some() {
            let natural_h = brick
                .resolved_rect(set, breakpoint)
                .map_or(rect.h, |current| current.h);
            brick.set_rect(breakpoint, GridRect { h: natural_h, ..rect });
            brick.set_manual_height(breakpoint, Some(rect.h));
        } else {
            brick.set_rect(breakpoint, rect);
        }
        debug!(brick = brick_id, %breakpoint, ?rect, "Committed rect");
        Ok(())
    }

    /// Flip a brick's visibility on `breakpoint`, returning the new hidden state.
    pub fn toggle_visibility(&mut self, brick_id: &str, breakpoint: &BreakpointId) -> EngineResult<bool> {
        self.columns(breakpoint)?;
        let idx = self.index_of(brick_id)?;
        let hidden = self.bricks[idx].toggle_hidden(breakpoint);
        debug!(brick = brick_id, %breakpoint, hidden, "Toggled visibility");
        Ok(hidden)
    }

    pub fn set_manual_height(
        &mut self,
        brick_id: &str,
        breakpoint: &BreakpointId,
        height: Option<u32>,
    ) -> EngineResult<()> {
        self.columns(breakpoint)?;
        let idx = self.index_of(brick_id)?;
        self.bricks[idx].set_manual_height(breakpoint, height.map(|h| h.max(1)));
        Ok(())
    }

    /// Copy a brick under a fresh id, inserted right after the original.
    ///
    /// Each explicit rect is nudged per `policy` and clamped to its grid.
    /// The copy may overlap other bricks.
    pub fn duplicate(&mut self, brick_id: &str, policy: &DuplicatePolicy) -> EngineResult<String> {
        let idx = self.index_of(brick_id)?;
        let original = &self.bricks[idx];
        let mut copy = Brick::new(Uuid::new_v4().to_string(), original.brick_type.clone());

        for (breakpoint, position) in &original.positions {
            let mut position = position.clone();
            if let (Some(rect), Some(columns)) = (position.rect, self.breakpoints.columns(breakpoint)) {
                position.rect = Some(find_duplicate_placement(&rect, breakpoint, policy, columns));
            }
            copy.positions.insert(breakpoint.clone(), position);
        }

        let id = copy.id.clone();
        debug!(original = brick_id, copy = %id, "Duplicated brick");
        self.bricks.insert(idx + 1, copy);
        Ok(id)
    }

    /// Place a new brick of `brick_type`.
    ///
    /// On `breakpoint` the brick goes at `pointer` when that cell is free,
    /// otherwise wherever [`find_placement`] puts it. Every other breakpoint
    /// gets a [`find_placement`] rect of its own.
    pub fn drop_new(
        &mut self,
        brick_type: &str,
        constraints: &dyn ConstraintsSource,
        breakpoint: &BreakpointId,
        pointer: Option<GridCell>,
    ) -> EngineResult<(String, GridRect)> {
        let columns = self.columns(breakpoint)?;
        let wanted = constraints
            .constraints_for(brick_type, breakpoint)
            .unwrap_or_default();
        let existing = self.placed_rects(breakpoint, &[]);

        let rect = pointer
            .map(|cell| at_cell(cell, &wanted, columns))
            .filter(|rect| is_valid(rect, &existing, columns, PlacementOptions::strict()))
            .unwrap_or_else(|| find_placement(&existing, &wanted, columns));

        let mut brick = Brick::new(Uuid::new_v4().to_string(), brick_type);
        brick.set_rect(breakpoint, rect);
        for spec in self.breakpoints.iter().filter(|spec| &spec.id != breakpoint) {
            let wanted = constraints
                .constraints_for(brick_type, &spec.id)
                .unwrap_or_default();
            let placed = self.placed_rects(&spec.id, &[]);
            brick.set_rect(&spec.id, find_placement(&placed, &wanted, spec.columns));
        }

        let id = brick.id.clone();
        info!(brick = %id, brick_type, %breakpoint, ?rect, "Dropped new brick");
        self.bricks.push(brick);
        Ok((id, rect))
    }

    /// Replace the stacked breakpoint's rects with a fresh derivation.
    pub fn reflow_mobile(&mut self, options: &MobileLayoutOptions, constraints: &dyn ConstraintsSource) {
        self.bricks = derive_mobile_layout(&self.bricks, &self.breakpoints, options, constraints);
        info!(
            bricks = self.bricks.len(),
            target = %options.target,
            "Reflowed stacked layout"
        );
    }

    pub fn view<'a>(&'a self, constraints: &'a dyn ConstraintsSource) -> StoreView<'a> {
        StoreView { store: self, constraints }
    }
}

/// Preferred-size rect anchored at `cell`, shifted left to stay in bounds.
fn at_cell(cell: GridCell, constraints: &BrickConstraints, columns: u32) -> GridRect {
    let w = constraints.preferred_w.clamp(1, columns.max(1));
    let x = cell.col.min(columns.saturating_sub(w));
    GridRect::new(x, cell.row, w, constraints.preferred_h.max(1))
}

/// Read-only view of a store for the interaction controller.
pub struct StoreView<'a> {
    store: &'a LayoutStore,
    constraints: &'a dyn ConstraintsSource,
}

impl LayoutView for StoreView<'_> {
    fn rect_of(&self, brick_id: &str, breakpoint: &BreakpointId) -> Option<GridRect> {
        self.store.resolved_rect(brick_id, breakpoint)
    }

    fn rects_except(&self, breakpoint: &BreakpointId, exclude: &[String]) -> Vec<GridRect> {
        self.store.placed_rects(breakpoint, exclude)
    }

    fn constraints_of(&self, brick_id: &str, breakpoint: &BreakpointId) -> Option<BrickConstraints> {
        let brick = self.store.brick(brick_id)?;
        self.constraints.constraints_for(&brick.brick_type, breakpoint)
    }
}
