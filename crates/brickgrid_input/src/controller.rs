//! Drag/resize state machine.
//!
//! States: `Idle → Dragging → Idle` and `Idle → Resizing → Idle`. At most
//! one [`DragSession`] exists; a multi-brick move is one session with
//! several ids sharing one delta.
//!
//! Nothing in the hot path fails. Out-of-range pointers are clamped, events
//! without a session are ignored, and invalid drop targets revert to the
//! committed rect.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use brickgrid_core::geometry::{self, grid_to_pixel_rect, pixel_to_grid};
use brickgrid_core::{is_valid, BreakpointId, GridConfig, GridRect, Vec2};

use crate::clamp::{clamp_move_delta, resize_grid_rect, resize_pixel_rect};
use crate::{
    DragSession, GestureEvent, GestureKind, InputError, InteractionConfig, LayoutView, OriginRect,
    VisualFrame,
};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ControllerState {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// Turns pointer gestures into grid commits for one breakpoint.
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    breakpoint: BreakpointId,
    grid: GridConfig,
    session: Option<DragSession>,
}

impl InteractionController {
    pub fn new(config: InteractionConfig, breakpoint: BreakpointId, grid: GridConfig) -> Self {
        Self {
            config,
            breakpoint,
            grid,
            session: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        match &self.session {
            None => ControllerState::Idle,
            Some(s) if s.is_resize() => ControllerState::Resizing,
            Some(_) => ControllerState::Dragging,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn breakpoint(&self) -> &BreakpointId {
        &self.breakpoint
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Replace the measured grid (container resized). A running session was
    /// measured against the old grid and is cancelled.
    pub fn set_grid(&mut self, grid: GridConfig) -> Vec<GestureEvent> {
        if grid == self.grid {
            return Vec::new();
        }
        let events = if self.session.is_some() {
            warn!("Grid changed mid-gesture, cancelling session");
            self.on_gesture_cancel()
        } else {
            Vec::new()
        };
        self.grid = grid;
        events
    }

    /// Switch breakpoint together with its grid. Rejected mid-gesture.
    pub fn set_breakpoint(
        &mut self,
        breakpoint: BreakpointId,
        grid: GridConfig,
    ) -> Result<(), InputError> {
        if self.session.is_some() {
            warn!(%breakpoint, "Breakpoint switch rejected: gesture in progress");
            return Err(InputError::GestureInProgress(self.state()));
        }
        self.breakpoint = breakpoint;
        self.grid = grid;
        Ok(())
    }

    // =========================================================================
    // GESTURE EVENTS
    // =========================================================================

    /// Begin a move or resize of `brick_ids`.
    pub fn on_gesture_start(
        &mut self,
        pointer: Vec2,
        brick_ids: &[String],
        kind: GestureKind,
        view: &dyn LayoutView,
    ) -> Result<(), InputError> {
        if self.session.is_some() {
            let state = self.state();
            warn!(?state, "Gesture start ignored: session already active");
            return Err(InputError::GestureInProgress(state));
        }
        if !self.grid.is_measured() {
            debug!(col_width = self.grid.col_width, "Gesture start deferred: grid not measured");
            return Err(InputError::GridNotMeasured {
                col_width: self.grid.col_width,
            });
        }

        let mut ids: Vec<String> = Vec::with_capacity(brick_ids.len());
        for id in brick_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        if ids.is_empty() {
            warn!("Gesture start ignored: empty selection");
            return Err(InputError::EmptySelection);
        }
        if matches!(kind, GestureKind::Resize(_)) && ids.len() != 1 {
            warn!(count = ids.len(), "Resize ignored: needs exactly one brick");
            return Err(InputError::ResizeNeedsSingleBrick(ids.len()));
        }

        let origin_rects: Vec<OriginRect> = ids
            .iter()
            .filter_map(|id| {
                let grid = view.rect_of(id, &self.breakpoint)?;
                Some(OriginRect {
                    brick_id: id.clone(),
                    pixel: grid_to_pixel_rect(&grid, &self.grid),
                    grid,
                    constraints: view.constraints_of(id, &self.breakpoint),
                })
            })
            .collect();

        if origin_rects.is_empty() {
            warn!(?ids, "Gesture start ignored: no selected brick is positioned");
            return Err(InputError::NothingToDrag);
        }

        debug!(?kind, bricks = origin_rects.len(), "Gesture started");
        self.session = Some(DragSession {
            brick_ids: ids,
            kind,
            breakpoint: self.breakpoint.clone(),
            origin_pointer: pointer,
            origin_rects,
            current_delta: Vec2::ZERO,
            moved: false,
        });
        Ok(())
    }

    /// Track the pointer. Returns visual frames only.
    pub fn on_gesture_move(&mut self, pointer: Vec2) -> Vec<GestureEvent> {
        let Some(session) = self.session.as_mut() else {
            debug!("Gesture move ignored: no active session");
            return Vec::new();
        };

        let raw = pointer - session.origin_pointer;
        if raw.max_abs() > self.config.click_threshold {
            session.moved = true;
        }

        match session.kind {
            GestureKind::Move => {
                session.current_delta = clamp_move_delta(raw, &session.origin_rects, &self.grid);
                session
                    .origin_rects
                    .iter()
                    .map(|origin| {
                        let mut offset = session.current_delta;
                        if self.config.snap_while_dragging {
                            let target = origin.pixel.origin() + offset;
                            offset = geometry::snap(target, &self.grid) - origin.pixel.origin();
                        }
                        GestureEvent::VisualUpdate {
                            brick_id: origin.brick_id.clone(),
                            frame: VisualFrame {
                                offset,
                                size: origin.pixel.size(),
                            },
                        }
                    })
                    .collect()
            }
            GestureKind::Resize(edge) => {
                session.current_delta = raw;
                session
                    .origin_rects
                    .iter()
                    .map(|origin| {
                        let resized = resize_pixel_rect(
                            &origin.pixel,
                            edge,
                            raw,
                            origin.constraints.as_ref(),
                            &self.grid,
                        );
                        GestureEvent::VisualUpdate {
                            brick_id: origin.brick_id.clone(),
                            frame: VisualFrame {
                                offset: resized.origin() - origin.pixel.origin(),
                                size: resized.size(),
                            },
                        }
                    })
                    .collect()
            }
        }
    }

    /// Finish the gesture: commit changed rects, revert invalid ones, or
    /// synthesize a click when the pointer never moved.
    pub fn on_gesture_end(&mut self, pointer: Vec2, view: &dyn LayoutView) -> Vec<GestureEvent> {
        if self.session.is_none() {
            debug!("Gesture end ignored: no active session");
            return Vec::new();
        }
        self.on_gesture_move(pointer);
        let Some(session) = self.session.take() else {
            return Vec::new();
        };

        if !session.moved {
            return session
                .primary()
                .filter(|origin| view.rect_of(&origin.brick_id, &session.breakpoint).is_some())
                .map(|origin| {
                    debug!(brick_id = %origin.brick_id, "Zero-delta release treated as click");
                    vec![GestureEvent::Select {
                        brick_id: origin.brick_id.clone(),
                    }]
                })
                .unwrap_or_default();
        }

        // (brick id, committed rect, candidate rect) for every brick still positioned.
        let placements: Vec<(&str, GridRect, GridRect)> = session
            .origin_rects
            .iter()
            .filter_map(|origin| {
                let Some(committed) = view.rect_of(&origin.brick_id, &session.breakpoint) else {
                    debug!(brick_id = %origin.brick_id, "Brick removed mid-gesture, skipping");
                    return None;
                };
                Some((
                    origin.brick_id.as_str(),
                    committed,
                    self.candidate_rect(&session, origin),
                ))
            })
            .collect();

        // Candidates are checked against the unselected bricks and against
        // each other. One invalid candidate reverts the whole selection.
        let options = self.config.placement_options();
        let mut occupied = view.rects_except(&session.breakpoint, &session.brick_ids);
        let mut all_valid = true;
        for (brick_id, _, candidate) in &placements {
            if !is_valid(candidate, &occupied, self.grid.columns, options) {
                debug!(%brick_id, ?candidate, "Invalid placement, reverting selection");
                all_valid = false;
                break;
            }
            occupied.push(*candidate);
        }

        if !all_valid {
            return placements
                .into_iter()
                .map(|(brick_id, _, candidate)| GestureEvent::Reverted {
                    brick_id: brick_id.to_string(),
                    attempted: candidate,
                })
                .collect();
        }

        placements
            .into_iter()
            .filter(|(_, committed, candidate)| candidate != committed)
            .map(|(brick_id, _, candidate)| GestureEvent::Commit {
                brick_id: brick_id.to_string(),
                breakpoint: session.breakpoint.clone(),
                rect: candidate,
            })
            .collect()
    }

    /// Drop the session without committing. Safe to call at any time.
    pub fn on_gesture_cancel(&mut self) -> Vec<GestureEvent> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        debug!(bricks = session.origin_rects.len(), "Gesture cancelled");
        session
            .origin_rects
            .into_iter()
            .map(|origin| GestureEvent::VisualUpdate {
                frame: VisualFrame {
                    offset: Vec2::ZERO,
                    size: origin.pixel.size(),
                },
                brick_id: origin.brick_id,
            })
            .collect()
    }

    fn candidate_rect(&self, session: &DragSession, origin: &OriginRect) -> GridRect {
        match session.kind {
            GestureKind::Move => {
                let target = geometry::snap(origin.pixel.origin() + session.current_delta, &self.grid);
                let cell = pixel_to_grid(target, &self.grid);
                GridRect {
                    x: cell.col,
                    y: cell.row,
                    ..origin.grid
                }
            }
            GestureKind::Resize(edge) => {
                let resized = resize_pixel_rect(
                    &origin.pixel,
                    edge,
                    session.current_delta,
                    origin.constraints.as_ref(),
                    &self.grid,
                );
                resize_grid_rect(origin, edge, &resized, &self.grid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResizeEdge;
    use brickgrid_core::BrickConstraints;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    /// Minimal in-memory view: one breakpoint, no fallback.
    #[derive(Default)]
    struct Board {
        rects: BTreeMap<String, GridRect>,
        constraints: BTreeMap<String, BrickConstraints>,
    }

    impl Board {
        fn with(mut self, id: &str, rect: GridRect) -> Self {
            self.rects.insert(id.to_string(), rect);
            self
        }

        fn constrain(mut self, id: &str, c: BrickConstraints) -> Self {
            self.constraints.insert(id.to_string(), c);
            self
        }
    }

    impl LayoutView for Board {
        fn rect_of(&self, brick_id: &str, _: &BreakpointId) -> Option<GridRect> {
            self.rects.get(brick_id).copied()
        }

        fn rects_except(&self, _: &BreakpointId, exclude: &[String]) -> Vec<GridRect> {
            self.rects
                .iter()
                .filter(|(id, _)| !exclude.contains(id))
                .map(|(_, r)| *r)
                .collect()
        }

        fn constraints_of(&self, brick_id: &str, _: &BreakpointId) -> Option<BrickConstraints> {
            self.constraints.get(brick_id).copied()
        }
    }

    fn grid() -> GridConfig {
        GridConfig {
            col_width: 80.0,
            row_height: 40,
            padding_x: 20.0,
            padding_y: 16.0,
            columns: 12,
        }
    }

    fn controller() -> InteractionController {
        InteractionController::new(InteractionConfig::default(), "desktop".into(), grid())
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn move_commits_snapped_rect() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::new(50.0, 30.0), &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        assert_eq!(ctl.state(), ControllerState::Dragging);

        let frames = ctl.on_gesture_move(Vec2::new(210.0, 110.0));
        assert_eq!(frames.len(), 1);

        let events = ctl.on_gesture_end(Vec2::new(215.0, 105.0), &board);
        assert_eq!(
            events,
            vec![GestureEvent::Commit {
                brick_id: "a".into(),
                breakpoint: "desktop".into(),
                rect: GridRect::new(2, 2, 4, 2),
            }]
        );
        assert_eq!(ctl.state(), ControllerState::Idle);
    }

    #[test]
    fn colliding_drop_reverts() {
        let board = Board::default()
            .with("a", GridRect::new(0, 0, 4, 2))
            .with("b", GridRect::new(4, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::new(0.0, 0.0), &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(240.0, 0.0), &board);

        assert_eq!(
            events,
            vec![GestureEvent::Reverted {
                brick_id: "a".into(),
                attempted: GridRect::new(3, 0, 4, 2),
            }]
        );
    }

    #[test]
    fn overlap_allowed_in_free_placement_mode() {
        let board = Board::default()
            .with("a", GridRect::new(0, 0, 4, 2))
            .with("b", GridRect::new(4, 0, 4, 2));
        let config = InteractionConfig {
            allow_overlap: true,
            ..InteractionConfig::default()
        };
        let mut ctl = InteractionController::new(config, "desktop".into(), grid());
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(240.0, 0.0), &board);
        assert!(events[0].is_commit());
    }

    #[test]
    fn zero_delta_release_is_a_click() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::new(40.0, 40.0), &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(40.0, 40.0), &board);
        assert_eq!(events, vec![GestureEvent::Select { brick_id: "a".into() }]);
    }

    #[test]
    fn move_back_to_origin_is_a_drag_without_commit() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::new(40.0, 40.0), &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        ctl.on_gesture_move(Vec2::new(45.0, 40.0));
        let events = ctl.on_gesture_end(Vec2::new(40.0, 40.0), &board);
        assert!(events.is_empty());
    }

    #[test]
    fn second_start_is_rejected_and_session_kept() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        let err = ctl
            .on_gesture_start(
                Vec2::ZERO,
                &ids(&["a"]),
                GestureKind::Resize(ResizeEdge::E),
                &board,
            )
            .unwrap_err();
        assert!(err.is_ordering_error());
        assert_eq!(ctl.state(), ControllerState::Dragging);
    }

    #[test]
    fn unmeasured_grid_defers_start() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut unmeasured = grid();
        unmeasured.col_width = 0.0;
        let mut ctl = InteractionController::new(InteractionConfig::default(), "desktop".into(), unmeasured);
        let err = ctl
            .on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap_err();
        assert!(matches!(err, InputError::GridNotMeasured { .. }));
        assert!(!ctl.is_active());
    }

    #[test]
    fn events_without_session_are_noops() {
        let board = Board::default();
        let mut ctl = controller();
        assert!(ctl.on_gesture_move(Vec2::new(10.0, 10.0)).is_empty());
        assert!(ctl.on_gesture_end(Vec2::new(10.0, 10.0), &board).is_empty());
        assert!(ctl.on_gesture_cancel().is_empty());
    }

    #[test]
    fn cancel_is_idempotent_and_never_commits() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        ctl.on_gesture_move(Vec2::new(300.0, 0.0));

        let events = ctl.on_gesture_cancel();
        assert!(events.iter().all(|e| !e.is_commit()));
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert!(ctl.on_gesture_cancel().is_empty());
    }

    #[test]
    fn west_resize_clamps_to_min_width_keeping_right_edge() {
        let board = Board::default()
            .with("a", GridRect::new(4, 0, 4, 2))
            .constrain("a", BrickConstraints::new(4, 2).with_min(3, 1));
        let mut ctl = controller();
        ctl.on_gesture_start(
            Vec2::new(340.0, 50.0),
            &ids(&["a"]),
            GestureKind::Resize(ResizeEdge::W),
            &board,
        )
        .unwrap();
        assert_eq!(ctl.state(), ControllerState::Resizing);

        let events = ctl.on_gesture_end(Vec2::new(500.0, 50.0), &board);
        assert_eq!(
            events,
            vec![GestureEvent::Commit {
                brick_id: "a".into(),
                breakpoint: "desktop".into(),
                rect: GridRect::new(5, 0, 3, 2),
            }]
        );
    }

    #[test]
    fn resize_into_neighbour_reverts() {
        let board = Board::default()
            .with("a", GridRect::new(0, 0, 4, 2))
            .with("b", GridRect::new(4, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(
            Vec2::new(340.0, 50.0),
            &ids(&["a"]),
            GestureKind::Resize(ResizeEdge::E),
            &board,
        )
        .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(420.0, 50.0), &board);
        assert!(matches!(events.as_slice(), [GestureEvent::Reverted { .. }]));
    }

    #[test]
    fn resize_rejects_multi_selection() {
        let board = Board::default()
            .with("a", GridRect::new(0, 0, 4, 2))
            .with("b", GridRect::new(4, 0, 4, 2));
        let mut ctl = controller();
        let err = ctl
            .on_gesture_start(
                Vec2::ZERO,
                &ids(&["a", "b"]),
                GestureKind::Resize(ResizeEdge::S),
                &board,
            )
            .unwrap_err();
        assert_eq!(err, InputError::ResizeNeedsSingleBrick(2));
    }

    #[test]
    fn group_move_checks_only_unselected_bricks() {
        let board = Board::default()
            .with("a", GridRect::new(0, 0, 2, 2))
            .with("b", GridRect::new(2, 0, 2, 2))
            .with("c", GridRect::new(0, 4, 12, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a", "b"]), GestureKind::Move, &board)
            .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(160.0, 0.0), &board);

        let commits: Vec<_> = events.iter().filter(|e| e.is_commit()).collect();
        assert_eq!(commits.len(), 2);

        // Dropping the group onto `c` reverts both.
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a", "b"]), GestureKind::Move, &board)
            .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(0.0, 160.0), &board);
        assert!(events
            .iter()
            .all(|e| matches!(e, GestureEvent::Reverted { .. })));
    }

    #[test]
    fn one_blocked_brick_reverts_the_whole_group() {
        let board = Board::default()
            .with("a", GridRect::new(0, 0, 2, 2))
            .with("b", GridRect::new(2, 0, 2, 2))
            .with("c", GridRect::new(4, 0, 2, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a", "b"]), GestureKind::Move, &board)
            .unwrap();
        let events = ctl.on_gesture_end(Vec2::new(160.0, 0.0), &board);

        assert_eq!(
            events,
            vec![
                GestureEvent::Reverted {
                    brick_id: "a".into(),
                    attempted: GridRect::new(2, 0, 2, 2),
                },
                GestureEvent::Reverted {
                    brick_id: "b".into(),
                    attempted: GridRect::new(4, 0, 2, 2),
                },
            ]
        );
    }

    #[test]
    fn brick_deleted_mid_gesture_is_skipped() {
        let mut board = Board::default()
            .with("a", GridRect::new(0, 0, 2, 2))
            .with("b", GridRect::new(2, 0, 2, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a", "b"]), GestureKind::Move, &board)
            .unwrap();
        board.rects.remove("b");

        let events = ctl.on_gesture_end(Vec2::new(0.0, 80.0), &board);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].brick_id(), "a");
    }

    #[test]
    fn breakpoint_switch_rejected_mid_gesture() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        assert!(ctl.set_breakpoint("mobile".into(), grid()).is_err());
        assert_eq!(ctl.breakpoint().as_str(), "desktop");
    }

    #[test]
    fn grid_change_cancels_session() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let mut ctl = controller();
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        let mut wider = grid();
        wider.col_width = 100.0;
        let events = ctl.set_grid(wider);
        assert_eq!(events.len(), 1);
        assert!(!ctl.is_active());
    }

    #[test]
    fn live_snapping_rounds_visual_offset() {
        let board = Board::default().with("a", GridRect::new(0, 0, 4, 2));
        let config = InteractionConfig {
            snap_while_dragging: true,
            ..InteractionConfig::default()
        };
        let mut ctl = InteractionController::new(config, "desktop".into(), grid());
        ctl.on_gesture_start(Vec2::ZERO, &ids(&["a"]), GestureKind::Move, &board)
            .unwrap();
        let frames = ctl.on_gesture_move(Vec2::new(50.0, 10.0));
        match &frames[0] {
            GestureEvent::VisualUpdate { frame, .. } => {
                assert_eq!(frame.offset, Vec2::new(80.0, 0.0));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    const EDGES: [ResizeEdge; 8] = [
        ResizeEdge::N,
        ResizeEdge::S,
        ResizeEdge::E,
        ResizeEdge::W,
        ResizeEdge::NE,
        ResizeEdge::NW,
        ResizeEdge::SE,
        ResizeEdge::SW,
    ];

    /// Keep each rect that misses everything placed before it.
    fn disjoint_board(specs: Vec<(u32, u32, u32, u32)>) -> Board {
        let mut board = Board::default();
        for (i, (x, y, w, h)) in specs.into_iter().enumerate() {
            let rect = GridRect::new(x, y, w.min(12 - x), h);
            if board.rects.values().all(|r| !r.intersects(&rect)) {
                board.rects.insert(format!("b{i}"), rect);
            }
        }
        board
    }

    fn apply(board: &mut Board, events: &[GestureEvent]) {
        for event in events {
            if let GestureEvent::Commit { brick_id, rect, .. } = event {
                board.rects.insert(brick_id.clone(), *rect);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn committed_gestures_stay_in_bounds_and_disjoint(
            specs in prop::collection::vec((0u32..12, 0u32..8, 1u32..5, 1u32..4), 1..8),
            gestures in prop::collection::vec(
                (0usize..9, prop::collection::vec(0usize..8, 1..4), -1200.0f32..1200.0, -400.0f32..800.0),
                1..8,
            ),
        ) {
            let mut board = disjoint_board(specs);
            let mut ctl = controller();

            for (kind, picks, dx, dy) in gestures {
                let names: Vec<String> = board.rects.keys().cloned().collect();
                let (kind, selection): (GestureKind, Vec<String>) = match kind {
                    0 => (
                        GestureKind::Move,
                        picks.iter().map(|i| names[i % names.len()].clone()).collect(),
                    ),
                    n => (
                        GestureKind::Resize(EDGES[n - 1]),
                        vec![names[picks[0] % names.len()].clone()],
                    ),
                };

                let start = Vec2::new(500.0, 300.0);
                ctl.on_gesture_start(start, &selection, kind, &board).unwrap();
                ctl.on_gesture_move(start + Vec2::new(dx * 0.5, dy * 0.5));
                let events = ctl.on_gesture_end(start + Vec2::new(dx, dy), &board);

                let reverted = events.iter().any(|e| matches!(e, GestureEvent::Reverted { .. }));
                prop_assert!(!(reverted && events.iter().any(|e| e.is_commit())));

                apply(&mut board, &events);
                let rects: Vec<GridRect> = board.rects.values().copied().collect();
                for (i, r) in rects.iter().enumerate() {
                    prop_assert!(r.fits_columns(12), "out of bounds {:?}", r);
                    for other in &rects[i + 1..] {
                        prop_assert!(!r.intersects(other), "overlap {:?} vs {:?}", r, other);
                    }
                }
            }
        }
    }
}
