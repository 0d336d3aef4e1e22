//! Stacked (mobile) layout derived from the primary layout's reading order.
//!
//! Every brick becomes a full-width row on the stacked breakpoint, ordered
//! by its primary-breakpoint `(y, x)` and separated by a fixed gap. The
//! derivation is pure and idempotent: running it on its own output yields
//! the same positions as long as the primary layout did not change.

use serde::{Deserialize, Serialize};

use crate::{
    Brick, BreakpointId, BreakpointSet, ConstraintsSource, GridRect, MOBILE_STACK_SPACING,
};

/// What hidden bricks do to the vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenBrickPolicy {
    /// Hidden bricks keep their slot so un-hiding does not reshuffle rows.
    #[default]
    ReserveSpace,
    /// Hidden bricks are positioned at the current row without advancing it.
    Collapse,
}

/// Parameters for one derivation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileLayoutOptions {
    /// Breakpoint that defines reading order.
    pub source: BreakpointId,
    /// Breakpoint that receives the stacked rects.
    pub target: BreakpointId,
    pub columns: u32,
    pub spacing: u32,
    pub hidden: HiddenBrickPolicy,
}

impl MobileLayoutOptions {
    /// Options for the set's primary → stacked breakpoints.
    pub fn for_set(set: &BreakpointSet) -> Option<Self> {
        let source = set.primary()?.clone();
        let target = set.stacked()?.clone();
        let columns = set.columns(&target)?;
        Some(Self {
            source,
            target,
            columns,
            spacing: MOBILE_STACK_SPACING,
            hidden: HiddenBrickPolicy::default(),
        })
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_hidden_policy(mut self, hidden: HiddenBrickPolicy) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Running row accumulator for building a stacked column.
///
/// Passed explicitly through the build so independent documents never share
/// a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCursor {
    next_row: u32,
    spacing: u32,
}

impl RowCursor {
    pub fn new(spacing: u32) -> Self {
        Self {
            next_row: 0,
            spacing,
        }
    }

    /// Row the next brick will start on.
    pub fn row(&self) -> u32 {
        self.next_row
    }

    /// Claim `height` rows plus the gap, returning the starting row.
    pub fn advance(&mut self, height: u32) -> u32 {
        let start = self.next_row;
        self.next_row = start.saturating_add(height).saturating_add(self.spacing);
        start
    }
}

/// Rebuild the stacked breakpoint's rects from primary reading order.
///
/// The returned bricks keep the input order; only positions on
/// `options.target` change. The input is left untouched.
///
/// Each stacked rect keeps the natural height as `h`; a manual height on
/// the target only sets how many rows the brick claims in the stack.
pub fn derive_mobile_layout(
    bricks: &[Brick],
    set: &BreakpointSet,
    options: &MobileLayoutOptions,
    constraints: &dyn ConstraintsSource,
) -> Vec<Brick> {
    let mut order: Vec<(usize, Option<(u32, u32)>)> = bricks
        .iter()
        .enumerate()
        .map(|(idx, brick)| {
            let key = brick
                .resolved_rect(set, &options.source)
                .map(|rect| (rect.y, rect.x));
            (idx, key)
        })
        .collect();
    // Unpositioned bricks sort last; the sort is stable so ties keep input order.
    order.sort_by_key(|(_, key)| (key.is_none(), *key));

    let mut derived = bricks.to_vec();
    let mut cursor = RowCursor::new(options.spacing);
    let columns = options.columns.max(1);

    for (idx, _) in order {
        let brick = &mut derived[idx];
        let natural_h = natural_height(brick, set, options, constraints);
        let span = brick
            .manual_height(&options.target)
            .unwrap_or(natural_h)
            .max(1);

        let y = if brick.is_hidden(&options.target)
            && options.hidden == HiddenBrickPolicy::Collapse
        {
            cursor.row()
        } else {
            cursor.advance(span)
        };

        brick.set_rect(&options.target, GridRect::new(0, y, columns, natural_h));
    }

    derived
}

fn natural_height(
    brick: &Brick,
    set: &BreakpointSet,
    options: &MobileLayoutOptions,
    constraints: &dyn ConstraintsSource,
) -> u32 {
    brick
        .explicit_rect(&options.target)
        .map(|rect| rect.h)
        .or_else(|| {
            constraints
                .constraints_for(&brick.brick_type, &options.target)
                .map(|c| c.preferred_h)
        })
        .or_else(|| brick.resolved_rect(set, &options.target).map(|rect| rect.h))
        .unwrap_or(1)
        .max(1)
}
