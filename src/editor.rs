//! Editor facade.
//!
//! Wires host UI events to the interaction controller and applies the
//! controller's commits to the layout store. Visual feedback, selection
//! clicks and reverts are forwarded to a host [`FeedbackSink`].
//!
//! ```text
//! host pointer ─► Editor ─► InteractionController ─► Vec<GestureEvent>
//!                   │                                      │
//!                   │              Commit ─► LayoutStore ◄─┤
//!                   │                                      │
//!                   └─────────── FeedbackSink ◄── visual / select / revert
//! ```

use tracing::{debug, warn};

use brickgrid_core::geometry::pixel_to_grid;
use brickgrid_core::{
    Brick, BreakpointId, BreakpointSet, GridConfig, GridRect, LayoutError, Vec2,
};
use brickgrid_input::{GestureEvent, GestureKind, InteractionController, VisualFrame};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::manifest::ManifestRegistry;
use crate::store::{LayoutDocument, LayoutStore};

/// Host callbacks for things the engine cannot render itself.
pub trait FeedbackSink {
    /// Live transform for a brick under the pointer.
    fn on_visual_update(&mut self, brick_id: &str, frame: VisualFrame);

    /// Press-and-release without movement.
    fn on_select(&mut self, brick_id: &str);

    /// A drop or resize was rejected; the brick snaps back.
    fn on_revert(&mut self, _brick_id: &str, _attempted: GridRect) {}

    /// A rect was written to the store.
    fn on_commit(&mut self, _brick_id: &str, _breakpoint: &BreakpointId, _rect: GridRect) {}
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn on_visual_update(&mut self, _: &str, _: VisualFrame) {}
    fn on_select(&mut self, _: &str) {}
}

/// A page being edited.
pub struct Editor<S: FeedbackSink = NullFeedback> {
    config: EngineConfig,
    manifests: ManifestRegistry,
    store: LayoutStore,
    controller: InteractionController,
    container_width: f32,
    sink: S,
}

impl<S: FeedbackSink> Editor<S> {
    /// Validate `config` and `manifests` and start on the primary breakpoint
    /// with an unmeasured container.
    pub fn new(config: EngineConfig, manifests: ManifestRegistry, sink: S) -> EngineResult<Self> {
        config.validate()?;
        let set = config.breakpoint_set();
        manifests.validate_for(&set)?;

        let primary = set.primary().ok_or(LayoutError::EmptyBreakpointSet)?.clone();
        let grid = measure(&set, &primary, 0.0)?;
        let controller = InteractionController::new(config.interaction, primary, grid);

        Ok(Self {
            store: LayoutStore::new(set),
            config,
            manifests,
            controller,
            container_width: 0.0,
            sink,
        })
    }

    /// Replace the page content. Rejected while a gesture is running.
    pub fn load_document(&mut self, document: LayoutDocument) -> EngineResult<()> {
        self.ensure_idle()?;
        self.store = LayoutStore::restore(self.store.breakpoints().clone(), document)?;
        Ok(())
    }

    pub fn snapshot(&self) -> LayoutDocument {
        self.store.snapshot()
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn manifests(&self) -> &ManifestRegistry {
        &self.manifests
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn active_breakpoint(&self) -> &BreakpointId {
        self.controller.breakpoint()
    }

    pub fn grid(&self) -> &GridConfig {
        self.controller.grid()
    }

    fn ensure_idle(&self) -> EngineResult<()> {
        if self.controller.is_active() {
            return Err(brickgrid_input::InputError::GestureInProgress(self.controller.state()).into());
        }
        Ok(())
    }

    // =========================================================================
    // CONTAINER / BREAKPOINT
    // =========================================================================

    /// Re-measure the grid for a new container width. A running gesture is
    /// cancelled.
    pub fn resize_container(&mut self, width: f32) -> EngineResult<()> {
        self.container_width = width.max(0.0);
        let grid = measure(self.store.breakpoints(), self.active_breakpoint(), self.container_width)?;
        let events = self.controller.set_grid(grid);
        self.dispatch(events);
        Ok(())
    }

    /// Switch the edited breakpoint. Rejected while a gesture is running.
    pub fn set_breakpoint(&mut self, breakpoint: impl Into<BreakpointId>) -> EngineResult<()> {
        let breakpoint = breakpoint.into();
        let grid = measure(self.store.breakpoints(), &breakpoint, self.container_width)?;
        self.controller.set_breakpoint(breakpoint, grid)?;
        debug!(breakpoint = %self.active_breakpoint(), "Switched breakpoint");
        Ok(())
    }

    // =========================================================================
    // POINTER
    // =========================================================================

    pub fn pointer_down(&mut self, pointer: Vec2, brick_ids: &[String], kind: GestureKind) -> EngineResult<()> {
        let view = self.store.view(&self.manifests);
        self.controller.on_gesture_start(pointer, brick_ids, kind, &view)?;
        Ok(())
    }

    pub fn pointer_move(&mut self, pointer: Vec2) {
        let events = self.controller.on_gesture_move(pointer);
        self.dispatch(events);
    }

    /// Finish the gesture. Commits are already applied to the store when
    /// this returns; the events are handed back for inspection.
    pub fn pointer_up(&mut self, pointer: Vec2) -> Vec<GestureEvent> {
        let events = {
            let view = self.store.view(&self.manifests);
            self.controller.on_gesture_end(pointer, &view)
        };
        self.dispatch(events.clone());
        events
    }

    pub fn pointer_cancel(&mut self) {
        let events = self.controller.on_gesture_cancel();
        self.dispatch(events);
    }

    fn dispatch(&mut self, events: Vec<GestureEvent>) {
        for event in events {
            match event {
                GestureEvent::VisualUpdate { brick_id, frame } => {
                    self.sink.on_visual_update(&brick_id, frame);
                }
                GestureEvent::Commit {
                    brick_id,
                    breakpoint,
                    rect,
                } => match self.store.commit(&brick_id, &breakpoint, rect) {
                    Ok(()) => self.sink.on_commit(&brick_id, &breakpoint, rect),
                    Err(err) => warn!(brick = %brick_id, %err, "Commit dropped"),
                },
                GestureEvent::Reverted { brick_id, attempted } => {
                    self.sink.on_revert(&brick_id, attempted);
                }
                GestureEvent::Select { brick_id } => self.sink.on_select(&brick_id),
            }
        }
    }

    // =========================================================================
    // CONTENT
    // =========================================================================

    pub fn insert_brick(&mut self, brick: Brick) -> EngineResult<()> {
        self.store.insert(brick)
    }

    pub fn remove_brick(&mut self, brick_id: &str) -> Option<Brick> {
        self.store.remove(brick_id)
    }

    /// Drop a new brick from the palette, at the pointer's cell if given and
    /// free. Returns the new id and its rect on the active breakpoint.
    pub fn drop_new_brick(&mut self, brick_type: &str, pointer: Option<Vec2>) -> EngineResult<(String, GridRect)> {
        let grid = *self.controller.grid();
        let cell = pointer
            .filter(|_| grid.is_measured())
            .map(|px| pixel_to_grid(px, &grid));
        let breakpoint = self.controller.breakpoint().clone();
        self.store.drop_new(brick_type, &self.manifests, &breakpoint, cell)
    }

    pub fn duplicate(&mut self, brick_id: &str) -> EngineResult<String> {
        self.store.duplicate(brick_id, &self.config.duplicate)
    }

    /// Toggle visibility on the active breakpoint.
    pub fn toggle_visibility(&mut self, brick_id: &str) -> EngineResult<bool> {
        let breakpoint = self.controller.breakpoint().clone();
        self.store.toggle_visibility(brick_id, &breakpoint)
    }

    /// Override the row span on the active breakpoint; `None` clears it.
    pub fn set_manual_height(&mut self, brick_id: &str, height: Option<u32>) -> EngineResult<()> {
        let breakpoint = self.controller.breakpoint().clone();
        self.store.set_manual_height(brick_id, &breakpoint, height)
    }

    /// Re-derive the stacked layout from the primary breakpoint.
    pub fn reflow_mobile(&mut self) -> EngineResult<()> {
        let options = self
            .config
            .mobile_options()
            .ok_or(LayoutError::EmptyBreakpointSet)?;
        self.store.reflow_mobile(&options, &self.manifests);
        Ok(())
    }
}

fn measure(set: &BreakpointSet, breakpoint: &BreakpointId, width: f32) -> EngineResult<GridConfig> {
    let spec = set
        .get(breakpoint)
        .ok_or_else(|| EngineError::UnknownBreakpoint(breakpoint.clone()))?;
    Ok(GridConfig::measure(spec, width, set.row_height))
}
