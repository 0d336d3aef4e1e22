//! Controller output.

use serde::{Deserialize, Serialize};

use brickgrid_core::{BreakpointId, GridRect, PixelSize, Vec2};

/// Live transform for one brick while a gesture runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualFrame {
    /// Translation of the brick's top-left corner from its committed spot.
    pub offset: Vec2,
    /// Current on-screen size.
    pub size: PixelSize,
}

/// Something the host must react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Visual feedback only; nothing is committed.
    VisualUpdate { brick_id: String, frame: VisualFrame },

    /// Final grid rect for a brick whose position changed.
    Commit {
        brick_id: String,
        breakpoint: BreakpointId,
        rect: GridRect,
    },

    /// The dragged-to rect was invalid; the committed rect stays.
    Reverted {
        brick_id: String,
        attempted: GridRect,
    },

    /// A press-and-release without movement.
    Select { brick_id: String },
}

impl GestureEvent {
    pub fn brick_id(&self) -> &str {
        match self {
            GestureEvent::VisualUpdate { brick_id, .. }
            | GestureEvent::Commit { brick_id, .. }
            | GestureEvent::Reverted { brick_id, .. }
            | GestureEvent::Select { brick_id } => brick_id,
        }
    }

    pub fn is_commit(&self) -> bool {
        matches!(self, GestureEvent::Commit { .. })
    }
}
