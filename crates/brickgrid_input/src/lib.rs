//! Pointer gesture handling for the brickgrid canvas.
//!
//! This crate turns a host's pointer events into grid commits. The host
//! adapts whatever drag library it uses to four calls:
//!
//! 1. **start** - pointer, selected brick ids, move or resize(edge)
//! 2. **move** - pointer; yields live visual frames, never grid changes
//! 3. **end** - pointer; yields commits (or reverts, or a selection click)
//! 4. **cancel** - discards the session
//!
//! # Architecture
//!
//! ```text
//! pointer ─► InteractionController ─► clamp (container, constraints)
//!                    │                          │
//!                    ▼                          ▼
//!              DragSession            geometry::pixel_to_grid
//!                    │                          │
//!                    └──────► solver::is_valid ◄┘
//!                                   │
//!                                   ▼
//!                         Vec<GestureEvent> (Commit / Reverted / Select)
//! ```
//!
//! The controller reads committed positions through [`LayoutView`] and never
//! writes them; applying `Commit` events is the layout store's job.
//!
//! # Example
//!
//! ```ignore
//! use brickgrid_input::{GestureKind, InteractionController};
//!
//! controller.on_gesture_start(pointer, &["hero".to_string()], GestureKind::Move, &store)?;
//! for event in controller.on_gesture_move(next_pointer) {
//!     ui.apply(event);
//! }
//! for event in controller.on_gesture_end(release_pointer, &store) {
//!     store.apply(event);
//! }
//! ```

mod clamp;
mod config;
mod controller;
mod error;
mod event;
mod session;
mod view;

pub use config::InteractionConfig;
pub use controller::{ControllerState, InteractionController};
pub use error::InputError;
pub use event::{GestureEvent, VisualFrame};
pub use session::{DragSession, GestureKind, OriginRect, ResizeEdge};
pub use view::LayoutView;

/// Pointer travel (px) at or below which a release counts as a click.
///
/// Zero: any movement at all turns the gesture into a drag.
pub const DEFAULT_CLICK_THRESHOLD: f32 = 0.0;
