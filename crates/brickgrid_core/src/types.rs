//! Primitive value types shared by geometry, solver and controller.

use serde::{Deserialize, Serialize};

/// 2D vector in pixel space (pointer positions, drag deltas, offsets).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Largest absolute component, used for click-vs-drag thresholds.
    pub fn max_abs(self) -> f32 {
        self.x.abs().max(self.y.abs())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Position and size of a brick in grid cells.
///
/// `x + w` must not exceed the breakpoint's column count for the rect to be
/// a valid placement; the solver enforces that, the type does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right column.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom row.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Half-open interval overlap on both axes.
    pub fn intersects(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when the rect lies inside `columns` and has a non-empty area.
    pub fn fits_columns(&self, columns: u32) -> bool {
        self.w >= 1 && self.h >= 1 && self.right() <= columns
    }

    /// Shrink and shift the rect so it fits inside `columns`.
    pub fn clamp_to_columns(self, columns: u32) -> GridRect {
        let columns = columns.max(1);
        let w = self.w.clamp(1, columns);
        let x = self.x.min(columns - w);
        GridRect {
            x,
            y: self.y,
            w,
            h: self.h.max(1),
        }
    }

    pub fn size(&self) -> GridSize {
        GridSize {
            w: self.w,
            h: self.h,
        }
    }
}

/// Size in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

/// A single grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub col: u32,
    pub row: u32,
}

impl GridCell {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle in container pixel space (origin at the container's
/// top-left corner, padding included).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> PixelSize {
        PixelSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn translate(&self, delta: Vec2) -> PixelRect {
        PixelRect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}
