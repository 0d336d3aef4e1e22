//! Brickgrid - responsive grid layout engine for a block-based page builder.
//!
//! Pages are made of rectangular content bricks placed on a column grid.
//! Each brick carries an independent position per breakpoint; a narrower
//! breakpoint without its own position inherits one through a fallback
//! chain, and the single-column (stacked) layout can be derived from the
//! primary layout's reading order.
//!
//! # Crates
//!
//! - `brickgrid_core`: data model, geometry, placement solver, mobile derivation
//! - `brickgrid_input`: gesture state machine turning pointer events into commits
//! - `brickgrid` (this crate): configuration, manifests, layout store, editor facade
//!
//! # Example
//!
//! ```
//! use brickgrid::{Editor, EngineConfig, ManifestRegistry, NullFeedback};
//! use brickgrid::grid::{Brick, BreakpointId, GridRect, Vec2};
//! use brickgrid::input::GestureKind;
//!
//! let mut editor = Editor::new(EngineConfig::default(), ManifestRegistry::new(), NullFeedback)?;
//! editor.insert_brick(Brick::new("hero", "text").with_rect("desktop", GridRect::new(0, 0, 4, 2)))?;
//! editor.resize_container(1000.0)?;
//!
//! editor.pointer_down(Vec2::new(50.0, 30.0), &["hero".to_string()], GestureKind::Move)?;
//! editor.pointer_move(Vec2::new(210.0, 30.0));
//! editor.pointer_up(Vec2::new(210.0, 30.0));
//!
//! let desktop = BreakpointId::from("desktop");
//! assert_eq!(editor.store().resolved_rect("hero", &desktop), Some(GridRect::new(2, 0, 4, 2)));
//! # Ok::<(), brickgrid::EngineError>(())
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod manifest;
pub mod store;
pub mod telemetry;

pub use brickgrid_core as grid;
pub use brickgrid_input as input;

pub use config::{EngineConfig, MobileConfig};
pub use editor::{Editor, FeedbackSink, NullFeedback};
pub use error::{EngineError, EngineResult};
pub use manifest::{BrickManifest, ManifestRegistry};
pub use store::{LayoutDocument, LayoutStore, StoreView};
