//! Read-only access to committed layout state.

use brickgrid_core::{BreakpointId, BrickConstraints, GridRect};

/// What the controller needs to know about the layout store.
///
/// Implementations answer from committed data only; the controller never
/// sees in-flight gesture state through this trait.
pub trait LayoutView {
    /// Committed footprint of a brick on `breakpoint`, or `None` if the
    /// brick no longer exists.
    fn rect_of(&self, brick_id: &str, breakpoint: &BreakpointId) -> Option<GridRect>;

    /// Footprints of every visible brick on `breakpoint` except `exclude`.
    fn rects_except(&self, breakpoint: &BreakpointId, exclude: &[String]) -> Vec<GridRect>;

    /// Size constraints of a brick on `breakpoint`.
    fn constraints_of(&self, brick_id: &str, breakpoint: &BreakpointId) -> Option<BrickConstraints>;
}
