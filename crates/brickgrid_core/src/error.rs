//! Configuration and content errors for the grid model.
//!
//! None of these are raised from the placement or geometry hot paths; they
//! come out of validating breakpoint sets and brick manifests up front.

use thiserror::Error;

use crate::BreakpointId;

/// Grid model error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A breakpoint set must declare at least one breakpoint.
    #[error("Breakpoint set is empty")]
    EmptyBreakpointSet,

    /// Two breakpoints share a name.
    #[error("Duplicate breakpoint '{0}'")]
    DuplicateBreakpoint(BreakpointId),

    /// Referenced breakpoint is not part of the set.
    #[error("Unknown breakpoint '{0}'")]
    UnknownBreakpoint(BreakpointId),

    /// Breakpoint declares zero columns.
    #[error("Breakpoint '{0}' must have at least one column")]
    ZeroColumns(BreakpointId),

    /// Row height must be at least one pixel.
    #[error("Row height must be at least 1px")]
    ZeroRowHeight,

    /// Padding must be a finite, non-negative number.
    #[error("Breakpoint '{0}' has invalid padding")]
    InvalidPadding(BreakpointId),

    /// A fallback chain names its own breakpoint.
    #[error("Breakpoint '{0}' lists itself as a fallback")]
    SelfFallback(BreakpointId),

    /// Brick constraints declare a minimum wider than the grid.
    #[error("Constraint minW {min_w} exceeds {columns} columns on '{breakpoint}'")]
    MinWidthExceedsColumns {
        breakpoint: BreakpointId,
        min_w: u32,
        columns: u32,
    },

    /// Brick constraints are internally inconsistent.
    #[error("Inconsistent constraints on '{breakpoint}': {reason}")]
    InconsistentConstraints {
        breakpoint: BreakpointId,
        reason: String,
    },

    /// A brick has no rect on any breakpoint.
    #[error("Brick '{0}' has no position on any breakpoint")]
    UnpositionedBrick(String),
}

impl LayoutError {
    /// True for errors that originate in brick manifests rather than the
    /// engine's own breakpoint configuration.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            LayoutError::MinWidthExceedsColumns { .. }
                | LayoutError::InconsistentConstraints { .. }
                | LayoutError::UnpositionedBrick(_)
        )
    }
}
