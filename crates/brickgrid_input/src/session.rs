//! Per-gesture state.

use serde::{Deserialize, Serialize};

use brickgrid_core::{BreakpointId, BrickConstraints, GridRect, PixelRect, Vec2};

/// Resize handle being dragged. Corners combine two edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeEdge {
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeEdge::W | ResizeEdge::NW | ResizeEdge::SW)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, ResizeEdge::E | ResizeEdge::NE | ResizeEdge::SE)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, ResizeEdge::N | ResizeEdge::NE | ResizeEdge::NW)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeEdge::S | ResizeEdge::SE | ResizeEdge::SW)
    }
}

/// Move or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Move,
    Resize(ResizeEdge),
}

/// Snapshot of one brick taken when the gesture started.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginRect {
    pub brick_id: String,
    pub pixel: PixelRect,
    pub grid: GridRect,
    pub constraints: Option<BrickConstraints>,
}

/// One in-flight gesture. Exists only between start and end/cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub brick_ids: Vec<String>,
    pub kind: GestureKind,
    pub breakpoint: BreakpointId,
    pub origin_pointer: Vec2,
    pub origin_rects: Vec<OriginRect>,
    /// Clamped pixel delta applied to every origin rect.
    pub current_delta: Vec2,
    /// Whether the pointer travelled past the click threshold.
    pub moved: bool,
}

impl DragSession {
    /// Brick a click or resize applies to.
    pub fn primary(&self) -> Option<&OriginRect> {
        self.origin_rects.first()
    }

    pub fn is_resize(&self) -> bool {
        matches!(self.kind, GestureKind::Resize(_))
    }
}
