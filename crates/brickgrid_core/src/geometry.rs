//! Pixel ↔ grid-cell conversion.
//!
//! Pure functions over a [`GridConfig`]. Inputs are assumed finite. A config
//! whose `col_width` is zero (container not measured yet) is not rejected
//! here; the interaction controller refuses to start gestures against it.

use serde::{Deserialize, Serialize};

use crate::{BreakpointSpec, GridCell, GridRect, GridSize, PixelRect, PixelSize, Vec2};

/// Measured grid metrics for one breakpoint and one container width.
///
/// Derived data: recompute it whenever the container is resized or the
/// active breakpoint changes, never patch it in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub col_width: f32,
    pub row_height: u32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub columns: u32,
}

impl GridConfig {
    /// Derive metrics from a breakpoint and the container's measured width.
    pub fn measure(spec: &BreakpointSpec, container_width: f32, row_height: u32) -> Self {
        let columns = spec.columns.max(1);
        let inner = (container_width - 2.0 * spec.padding_x).max(0.0);
        Self {
            col_width: inner / columns as f32,
            row_height,
            padding_x: spec.padding_x,
            padding_y: spec.padding_y,
            columns,
        }
    }

    /// Placeholder used before the host has reported a container width.
    pub fn unmeasured(spec: &BreakpointSpec, row_height: u32) -> Self {
        Self::measure(spec, 0.0, row_height)
    }

    /// True once the grid has a usable column width.
    pub fn is_measured(&self) -> bool {
        self.col_width.is_finite() && self.col_width > 0.0 && self.row_height > 0
    }

    pub fn row_height_px(&self) -> f32 {
        self.row_height as f32
    }

    /// Pixel origin of cell (0, 0).
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.padding_x, self.padding_y)
    }

    /// Pixel width of the column area, padding excluded.
    pub fn content_width(&self) -> f32 {
        self.col_width * self.columns as f32
    }
}

/// Nearest grid cell to a pixel position. Both coordinates clamp at zero.
pub fn pixel_to_grid(px: Vec2, config: &GridConfig) -> GridCell {
    GridCell {
        col: cells_in(px.x - config.padding_x, config.col_width),
        row: cells_in(px.y - config.padding_y, config.row_height_px()),
    }
}

/// Rounded, non-negative number of `unit`-sized cells in `length` pixels.
pub fn cells_in(length: f32, unit: f32) -> u32 {
    let cells = (length / unit).round();
    if cells.is_nan() || cells <= 0.0 {
        0
    } else {
        cells as u32
    }
}

pub fn grid_to_pixel_size(size: GridSize, config: &GridConfig) -> PixelSize {
    PixelSize {
        width: size.w as f32 * config.col_width,
        height: size.h as f32 * config.row_height_px(),
    }
}

/// Pixel rect a grid rect occupies inside the container.
pub fn grid_to_pixel_rect(rect: &GridRect, config: &GridConfig) -> PixelRect {
    let size = grid_to_pixel_size(rect.size(), config);
    PixelRect {
        x: config.padding_x + rect.x as f32 * config.col_width,
        y: config.padding_y + rect.y as f32 * config.row_height_px(),
        width: size.width,
        height: size.height,
    }
}

/// Round a pixel position to the nearest cell corner, measured from the
/// padding origin.
pub fn snap(px: Vec2, config: &GridConfig) -> Vec2 {
    let row_height = config.row_height_px();
    Vec2 {
        x: config.padding_x + snap_axis(px.x - config.padding_x, config.col_width),
        y: config.padding_y + snap_axis(px.y - config.padding_y, row_height),
    }
}

fn snap_axis(offset: f32, unit: f32) -> f32 {
    if unit > 0.0 {
        (offset / unit).round() * unit
    } else {
        offset
    }
}
