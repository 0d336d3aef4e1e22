//! Responsive grid model for the brickgrid page builder.
//!
//! This crate holds the pure, stateless half of the layout engine: the data
//! model bricks are positioned with, the pixel ↔ cell conversions, the
//! collision/placement solver and the mobile layout derivation. Nothing here
//! owns mutable state across calls; the gesture state machine lives in
//! `brickgrid_input` and the authoritative brick list in the root crate.
//!
//! # Architecture
//!
//! ```text
//! BreakpointSet ──► GridConfig ──► geometry (px ↔ cell)
//!       │                               │
//!       ▼                               ▼
//!    Brick ──► resolved GridRect ──► solver (is_valid / find_placement)
//!       │
//!       └──► mobile (derive_mobile_layout)
//! ```
//!
//! # Example
//!
//! ```
//! use brickgrid_core::{find_placement, BrickConstraints, GridRect};
//!
//! let constraints = BrickConstraints::new(6, 3).with_min(3, 1);
//! let rect = find_placement(&[], &constraints, 12);
//! assert_eq!(rect, GridRect::new(0, 0, 6, 3));
//! ```

mod breakpoint;
mod brick;
mod error;
pub mod geometry;
pub mod mobile;
pub mod solver;
mod types;
mod validate;

pub use breakpoint::{BreakpointId, BreakpointSet, BreakpointSpec};
pub use brick::{Brick, BrickConstraints, BrickPosition, ConstraintsSource, NoConstraints};
pub use error::LayoutError;
pub use geometry::GridConfig;
pub use mobile::{derive_mobile_layout, HiddenBrickPolicy, MobileLayoutOptions, RowCursor};
pub use solver::{
    find_duplicate_placement, find_placement, is_valid, DuplicatePolicy, Nudge, PlacementOptions,
};
pub use types::{GridCell, GridRect, GridSize, PixelRect, PixelSize, Vec2};
pub use validate::Validate;

/// Row height in pixels shared by every breakpoint unless configured otherwise.
pub const DEFAULT_ROW_HEIGHT: u32 = 40;

/// Empty rows inserted between consecutive bricks in the stacked mobile layout.
pub const MOBILE_STACK_SPACING: u32 = 1;
