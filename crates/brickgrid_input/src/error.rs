//! Rejected gestures.
//!
//! Returning one of these never changes controller state. Callers inside
//! pointer handlers can drop the error; it has already been logged.

use thiserror::Error;

use crate::ControllerState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A session is already running; only one may exist at a time.
    #[error("Gesture already in progress ({0:?})")]
    GestureInProgress(ControllerState),

    /// The container has not been measured (column width is zero).
    #[error("Grid not measured yet: column width is {col_width}")]
    GridNotMeasured { col_width: f32 },

    /// Gesture started with no brick ids.
    #[error("Gesture started without a selection")]
    EmptySelection,

    /// Resize handles belong to a single brick.
    #[error("Resize needs exactly one brick, got {0}")]
    ResizeNeedsSingleBrick(usize),

    /// None of the selected bricks exist on the active breakpoint.
    #[error("No selected brick is positioned on the active breakpoint")]
    NothingToDrag,
}

impl InputError {
    /// True when the host sent events in an order the controller forbids.
    pub fn is_ordering_error(&self) -> bool {
        matches!(self, InputError::GestureInProgress(_))
    }
}
