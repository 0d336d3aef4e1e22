//! Clamping of pixel deltas and resized rects.
//!
//! All functions absorb out-of-range input; none of them fail.

use brickgrid_core::geometry::cells_in;
use brickgrid_core::{BrickConstraints, GridConfig, GridRect, PixelRect, Vec2};

use crate::{OriginRect, ResizeEdge};

/// Container edges in pixels. The canvas grows downward, so no bottom.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: f32,
    right: f32,
    top: f32,
}

impl Bounds {
    fn of(grid: &GridConfig) -> Self {
        Self {
            left: grid.padding_x,
            right: grid.padding_x + grid.content_width(),
            top: grid.padding_y,
        }
    }
}

/// Clamp `value` into `[lo, hi]`; an empty range collapses to `lo`.
fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        lo
    } else {
        value.max(lo).min(hi)
    }
}

/// Restrict a shared move delta so every selected brick stays inside the
/// container.
pub(crate) fn clamp_move_delta(delta: Vec2, origins: &[OriginRect], grid: &GridConfig) -> Vec2 {
    let bounds = Bounds::of(grid);
    let mut lo_x = f32::NEG_INFINITY;
    let mut hi_x = f32::INFINITY;
    let mut lo_y = f32::NEG_INFINITY;

    for origin in origins {
        lo_x = lo_x.max(bounds.left - origin.pixel.x);
        hi_x = hi_x.min(bounds.right - origin.pixel.right());
        lo_y = lo_y.max(bounds.top - origin.pixel.y);
    }

    Vec2 {
        x: clamp_span(delta.x, lo_x, hi_x),
        y: delta.y.max(lo_y),
    }
}

/// Pixel size limits for a brick on this grid.
struct PixelLimits {
    min_w: f32,
    max_w: f32,
    min_h: f32,
}

impl PixelLimits {
    fn new(constraints: Option<&BrickConstraints>, grid: &GridConfig) -> Self {
        let row_height = grid.row_height_px();
        match constraints {
            Some(c) => Self {
                min_w: c.min_width(grid.columns) as f32 * grid.col_width,
                max_w: c.max_width(grid.columns) as f32 * grid.col_width,
                min_h: c.min_h.max(1) as f32 * row_height,
            },
            None => Self {
                min_w: grid.col_width,
                max_w: grid.content_width(),
                min_h: row_height,
            },
        }
    }
}

/// Apply `delta` to the dragged edge(s) of `origin`, keeping the opposite
/// edge fixed and honouring min/max width, min height and the container.
pub(crate) fn resize_pixel_rect(
    origin: &PixelRect,
    edge: ResizeEdge,
    delta: Vec2,
    constraints: Option<&BrickConstraints>,
    grid: &GridConfig,
) -> PixelRect {
    let bounds = Bounds::of(grid);
    let limits = PixelLimits::new(constraints, grid);

    let mut left = origin.x;
    let mut right = origin.right();
    let mut top = origin.y;
    let mut bottom = origin.bottom();

    if edge.moves_right() {
        right = clamp_span(
            origin.right() + delta.x,
            left + limits.min_w,
            (left + limits.max_w).min(bounds.right),
        );
    } else if edge.moves_left() {
        left = clamp_span(
            origin.x + delta.x,
            (right - limits.max_w).max(bounds.left),
            right - limits.min_w,
        );
    }

    if edge.moves_bottom() {
        bottom = (origin.bottom() + delta.y).max(top + limits.min_h);
    } else if edge.moves_top() {
        top = clamp_span(origin.y + delta.y, bounds.top, bottom - limits.min_h);
    }

    PixelRect::new(left, top, right - left, bottom - top)
}

/// Grid rect for a finished resize. The edge opposite the handle keeps its
/// committed cell; sizes are clamped again in cell units.
pub(crate) fn resize_grid_rect(
    origin: &OriginRect,
    edge: ResizeEdge,
    resized: &PixelRect,
    grid: &GridConfig,
) -> GridRect {
    let columns = grid.columns;
    let constraints = origin.constraints.unwrap_or_else(|| {
        BrickConstraints::new(origin.grid.w.max(1), origin.grid.h.max(1))
    });
    let mut rect = origin.grid;

    if edge.moves_left() || edge.moves_right() {
        let w = constraints.clamp_width(cells_in(resized.width, grid.col_width), columns);
        if edge.moves_left() {
            let right = origin.grid.right();
            rect.w = w.min(right).max(1);
            rect.x = right.saturating_sub(rect.w);
        } else {
            rect.w = w.min(columns.saturating_sub(rect.x).max(1));
        }
    }

    if edge.moves_top() || edge.moves_bottom() {
        let h = constraints.clamp_height(cells_in(resized.height, grid.row_height_px()));
        if edge.moves_top() {
            let bottom = origin.grid.bottom();
            rect.h = h.min(bottom).max(1);
            rect.y = bottom.saturating_sub(rect.h);
        } else {
            rect.h = h;
        }
    }

    rect
}
