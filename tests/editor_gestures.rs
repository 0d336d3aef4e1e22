//! End-to-end editing flows: pointer gestures through the editor into the store.

use brickgrid::grid::{
    Brick, BrickConstraints, BreakpointId, GridRect, HiddenBrickPolicy, Vec2,
};
use brickgrid::input::{GestureEvent, GestureKind, InteractionConfig, ResizeEdge, VisualFrame};
use brickgrid::{
    BrickManifest, Editor, EngineConfig, FeedbackSink, ManifestRegistry, MobileConfig,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Recorder {
    frames: Vec<(String, VisualFrame)>,
    selected: Vec<String>,
    reverted: Vec<(String, GridRect)>,
    committed: Vec<(String, GridRect)>,
}

impl FeedbackSink for Recorder {
    fn on_visual_update(&mut self, brick_id: &str, frame: VisualFrame) {
        self.frames.push((brick_id.to_string(), frame));
    }

    fn on_select(&mut self, brick_id: &str) {
        self.selected.push(brick_id.to_string());
    }

    fn on_revert(&mut self, brick_id: &str, attempted: GridRect) {
        self.reverted.push((brick_id.to_string(), attempted));
    }

    fn on_commit(&mut self, brick_id: &str, _: &BreakpointId, rect: GridRect) {
        self.committed.push((brick_id.to_string(), rect));
    }
}

fn desktop() -> BreakpointId {
    BreakpointId::from("desktop")
}

fn mobile() -> BreakpointId {
    BreakpointId::from("mobile")
}

fn manifests() -> ManifestRegistry {
    let mut registry = ManifestRegistry::new();
    registry.register(
        "card",
        BrickManifest::default()
            .with_constraints("desktop", BrickConstraints::new(4, 2).with_min(3, 1))
            .with_constraints("mobile", BrickConstraints::new(4, 2)),
    );
    registry
}

/// Desktop container 1000px wide: 80px columns, 40px rows, origin (20, 16).
fn editor_with(config: EngineConfig, bricks: Vec<Brick>) -> Editor<Recorder> {
    let mut editor = Editor::new(config, manifests(), Recorder::default()).unwrap();
    for brick in bricks {
        editor.insert_brick(brick).unwrap();
    }
    editor.resize_container(1000.0).unwrap();
    editor
}

fn card(id: &str, rect: GridRect) -> Brick {
    Brick::new(id, "card").with_rect("desktop", rect)
}

fn two_cards() -> Editor<Recorder> {
    editor_with(
        EngineConfig::default(),
        vec![
            card("a", GridRect::new(0, 0, 4, 2)),
            card("b", GridRect::new(4, 0, 4, 2)),
        ],
    )
}

fn drag(editor: &mut Editor<Recorder>, ids: &[&str], from: Vec2, to: Vec2) -> Vec<GestureEvent> {
    let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    editor.pointer_down(from, &ids, GestureKind::Move).unwrap();
    editor.pointer_move(to);
    editor.pointer_up(to)
}

#[test]
fn drag_commits_snapped_position() {
    let mut editor = two_cards();
    drag(&mut editor, &["a"], Vec2::new(40.0, 30.0), Vec2::new(45.0, 115.0));

    assert_eq!(
        editor.store().resolved_rect("a", &desktop()),
        Some(GridRect::new(0, 2, 4, 2))
    );
    assert_eq!(editor.sink().committed, vec![("a".to_string(), GridRect::new(0, 2, 4, 2))]);
    assert!(!editor.sink().frames.is_empty());
    assert!(!editor.controller().is_active());
}

#[test]
fn colliding_drop_leaves_store_unchanged() {
    let mut editor = two_cards();
    let before = editor.snapshot();

    let events = drag(&mut editor, &["a"], Vec2::new(40.0, 30.0), Vec2::new(280.0, 30.0));

    assert_eq!(editor.snapshot(), before);
    assert_eq!(
        events,
        vec![GestureEvent::Reverted {
            brick_id: "a".to_string(),
            attempted: GridRect::new(3, 0, 4, 2),
        }]
    );
    assert_eq!(editor.sink().reverted.len(), 1);
    assert!(editor.sink().committed.is_empty());
}

#[test]
fn free_placement_mode_commits_overlaps() {
    let config = EngineConfig::default().with_interaction(InteractionConfig {
        allow_overlap: true,
        ..InteractionConfig::default()
    });
    let mut editor = editor_with(
        config,
        vec![
            card("a", GridRect::new(0, 0, 4, 2)),
            card("b", GridRect::new(4, 0, 4, 2)),
        ],
    );
    drag(&mut editor, &["a"], Vec2::new(40.0, 30.0), Vec2::new(280.0, 30.0));
    assert_eq!(
        editor.store().resolved_rect("a", &desktop()),
        Some(GridRect::new(3, 0, 4, 2))
    );
}

#[test]
fn click_selects_without_commit() {
    let mut editor = two_cards();
    let before = editor.snapshot();
    let events = drag(&mut editor, &["b"], Vec2::new(400.0, 30.0), Vec2::new(400.0, 30.0));

    assert_eq!(events, vec![GestureEvent::Select { brick_id: "b".to_string() }]);
    assert_eq!(editor.sink().selected, vec!["b".to_string()]);
    assert_eq!(editor.snapshot(), before);
}

#[test]
fn cancel_restores_visuals_and_commits_nothing() {
    let mut editor = two_cards();
    let before = editor.snapshot();
    editor
        .pointer_down(Vec2::new(40.0, 30.0), &["a".to_string()], GestureKind::Move)
        .unwrap();
    editor.pointer_move(Vec2::new(40.0, 300.0));
    editor.pointer_cancel();
    editor.pointer_cancel();

    assert_eq!(editor.snapshot(), before);
    let (_, last) = editor.sink().frames.last().unwrap();
    assert_eq!(last.offset, Vec2::ZERO);
    assert!(!editor.controller().is_active());
}

#[test]
fn container_resize_mid_gesture_cancels() {
    let mut editor = two_cards();
    let before = editor.snapshot();
    editor
        .pointer_down(Vec2::new(40.0, 30.0), &["a".to_string()], GestureKind::Move)
        .unwrap();
    editor.pointer_move(Vec2::new(40.0, 300.0));
    editor.resize_container(800.0).unwrap();

    assert!(!editor.controller().is_active());
    assert!(editor.pointer_up(Vec2::new(40.0, 300.0)).is_empty());
    assert_eq!(editor.snapshot(), before);
}

#[test]
fn gesture_before_measurement_is_rejected() {
    let mut editor = Editor::new(EngineConfig::default(), manifests(), Recorder::default()).unwrap();
    editor.insert_brick(card("a", GridRect::new(0, 0, 4, 2))).unwrap();
    let err = editor
        .pointer_down(Vec2::new(1.0, 1.0), &["a".to_string()], GestureKind::Move)
        .unwrap_err();
    assert!(err.to_string().contains("not measured"));
}

#[test]
fn group_move_commits_every_brick() {
    let mut editor = editor_with(
        EngineConfig::default(),
        vec![
            card("a", GridRect::new(0, 0, 4, 2)),
            card("b", GridRect::new(4, 0, 4, 2)),
            card("c", GridRect::new(0, 6, 4, 2)),
        ],
    );
    let events = drag(&mut editor, &["a", "b"], Vec2::new(40.0, 30.0), Vec2::new(40.0, 110.0));

    assert_eq!(events.iter().filter(|e| e.is_commit()).count(), 2);
    assert_eq!(
        editor.store().resolved_rect("a", &desktop()),
        Some(GridRect::new(0, 2, 4, 2))
    );
    assert_eq!(
        editor.store().resolved_rect("b", &desktop()),
        Some(GridRect::new(4, 2, 4, 2))
    );
}

#[test]
fn blocked_group_member_reverts_the_whole_group() {
    let mut editor = editor_with(
        EngineConfig::default(),
        vec![
            card("a", GridRect::new(0, 0, 2, 2)),
            card("b", GridRect::new(2, 0, 2, 2)),
            card("c", GridRect::new(4, 0, 2, 2)),
        ],
    );
    let before = editor.snapshot();

    let events = drag(&mut editor, &["a", "b"], Vec2::new(40.0, 30.0), Vec2::new(200.0, 30.0));

    assert!(events.iter().all(|e| !e.is_commit()));
    assert_eq!(editor.snapshot(), before);
    assert_eq!(
        editor.sink().reverted,
        vec![
            ("a".to_string(), GridRect::new(2, 0, 2, 2)),
            ("b".to_string(), GridRect::new(4, 0, 2, 2)),
        ]
    );
    assert!(editor.sink().committed.is_empty());
}

#[test]
fn brick_removed_mid_gesture_is_skipped() {
    let mut editor = two_cards();
    editor
        .pointer_down(Vec2::new(40.0, 30.0), &["a".to_string(), "b".to_string()], GestureKind::Move)
        .unwrap();
    editor.pointer_move(Vec2::new(40.0, 110.0));
    editor.remove_brick("b");
    let events = editor.pointer_up(Vec2::new(40.0, 110.0));

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].brick_id(), "a");
    assert!(editor.store().brick("b").is_none());
}

#[test]
fn west_resize_clamps_to_min_width() {
    let mut editor = editor_with(
        EngineConfig::default(),
        vec![card("a", GridRect::new(4, 0, 4, 2))],
    );
    editor
        .pointer_down(Vec2::new(340.0, 30.0), &["a".to_string()], GestureKind::Resize(ResizeEdge::W))
        .unwrap();
    editor.pointer_move(Vec2::new(500.0, 30.0));
    editor.pointer_up(Vec2::new(500.0, 30.0));

    assert_eq!(
        editor.store().resolved_rect("a", &desktop()),
        Some(GridRect::new(5, 0, 3, 2))
    );
}

#[test]
fn resize_of_manual_height_brick_updates_override() {
    let mut editor = two_cards();
    editor.set_manual_height("a", Some(3)).unwrap();
    editor
        .pointer_down(Vec2::new(100.0, 136.0), &["a".to_string()], GestureKind::Resize(ResizeEdge::S))
        .unwrap();
    editor.pointer_move(Vec2::new(100.0, 216.0));
    editor.pointer_up(Vec2::new(100.0, 216.0));

    let brick = editor.store().brick("a").unwrap();
    assert_eq!(brick.explicit_rect(&desktop()), Some(GridRect::new(0, 0, 4, 2)));
    assert_eq!(brick.manual_height(&desktop()), Some(5));
}

#[test]
fn editing_mobile_does_not_touch_desktop() {
    let mut editor = two_cards();
    editor.set_breakpoint("mobile").unwrap();
    assert_eq!(editor.grid().columns, 4);

    // Both cards inherit desktop rects clamped to four columns, so they overlap;
    // moving one below the other is still valid against committed data.
    drag(&mut editor, &["b"], Vec2::new(100.0, 20.0), Vec2::new(100.0, 100.0));

    assert_eq!(
        editor.store().brick("b").unwrap().explicit_rect(&mobile()),
        Some(GridRect::new(0, 2, 4, 2))
    );
    assert_eq!(
        editor.store().resolved_rect("b", &desktop()),
        Some(GridRect::new(4, 0, 4, 2))
    );
}

#[test]
fn drop_new_brick_lands_at_pointer_cell() {
    let mut editor = two_cards();
    let (id, rect) = editor
        .drop_new_brick("card", Some(Vec2::new(20.0 + 80.0 * 2.0 + 5.0, 16.0 + 40.0 * 5.0)))
        .unwrap();
    assert_eq!(rect, GridRect::new(2, 5, 4, 2));
    assert_eq!(editor.store().resolved_rect(&id, &desktop()), Some(rect));
    assert!(editor.store().brick(&id).unwrap().explicit_rect(&mobile()).is_some());
}

#[test]
fn drop_new_brick_without_pointer_uses_solver() {
    let mut editor = two_cards();
    let (_, rect) = editor.drop_new_brick("card", None).unwrap();
    assert_eq!(rect, GridRect::new(8, 0, 4, 2));
}

#[test]
fn duplicate_follows_configured_policy() {
    let mut editor = editor_with(
        EngineConfig::default(),
        vec![card("orig", GridRect::new(2, 2, 4, 3)).with_rect("mobile", GridRect::new(0, 0, 4, 3))],
    );
    let id = editor.duplicate("orig").unwrap();
    let copy = editor.store().brick(&id).unwrap();

    assert_eq!(copy.explicit_rect(&desktop()), Some(GridRect::new(3, 3, 4, 3)));
    assert_eq!(copy.explicit_rect(&mobile()), Some(GridRect::new(0, 1, 4, 3)));
    assert_eq!(editor.store().bricks()[1].id, id);
}

#[test]
fn toggle_visibility_is_per_breakpoint() {
    let mut editor = two_cards();
    editor.set_breakpoint("mobile").unwrap();
    assert!(editor.toggle_visibility("a").unwrap());

    let brick = editor.store().brick("a").unwrap();
    assert!(brick.is_hidden(&mobile()));
    assert!(!brick.is_hidden(&desktop()));
}

#[test]
fn mobile_reflow_follows_desktop_reading_order() {
    let mut editor = editor_with(
        EngineConfig::default(),
        vec![
            card("A", GridRect::new(6, 0, 4, 2)),
            card("B", GridRect::new(0, 0, 4, 2)),
            card("C", GridRect::new(0, 4, 12, 2)),
        ],
    );
    editor.reflow_mobile().unwrap();

    let rect = |id: &str| editor.store().resolved_rect(id, &mobile()).unwrap();
    assert_eq!(rect("B"), GridRect::new(0, 0, 4, 2));
    assert_eq!(rect("A"), GridRect::new(0, 3, 4, 2));
    assert_eq!(rect("C"), GridRect::new(0, 6, 4, 2));
    // Input order is preserved.
    let ids: Vec<&str> = editor.store().bricks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn mobile_reflow_respects_manual_height_and_hidden_policy() {
    let config = EngineConfig::default().with_mobile(MobileConfig {
        spacing: 1,
        hidden: HiddenBrickPolicy::Collapse,
    });
    let mut editor = editor_with(
        config,
        vec![
            card("A", GridRect::new(0, 0, 4, 2)),
            card("B", GridRect::new(0, 2, 4, 2)),
            card("C", GridRect::new(0, 4, 4, 2)),
        ],
    );
    editor.set_breakpoint("mobile").unwrap();
    editor.set_manual_height("A", Some(5)).unwrap();
    editor.toggle_visibility("B").unwrap();
    editor.reflow_mobile().unwrap();

    let brick = |id: &str| editor.store().brick(id).unwrap().clone();
    assert_eq!(brick("A").explicit_rect(&mobile()), Some(GridRect::new(0, 0, 4, 2)));
    assert_eq!(brick("B").explicit_rect(&mobile()), Some(GridRect::new(0, 6, 4, 2)));
    assert_eq!(brick("C").explicit_rect(&mobile()), Some(GridRect::new(0, 6, 4, 2)));

    // Derivation is idempotent.
    let once = editor.snapshot();
    editor.reflow_mobile().unwrap();
    assert_eq!(editor.snapshot(), once);
}

#[test]
fn document_survives_json_round_trip() {
    let mut editor = two_cards();
    editor.toggle_visibility("b").unwrap();
    let json = editor.snapshot().to_json().unwrap();

    let mut restored = Editor::new(EngineConfig::default(), manifests(), Recorder::default()).unwrap();
    restored
        .load_document(brickgrid::LayoutDocument::from_json(&json).unwrap())
        .unwrap();
    assert_eq!(restored.snapshot(), editor.snapshot());
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn committed_rects(editor: &Editor<Recorder>) -> Vec<GridRect> {
    editor.store().placed_rects(&desktop(), &[])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_drags_keep_layout_in_bounds_and_disjoint(
        moves in prop::collection::vec(
            (prop::collection::vec(0usize..3, 1..4), -1200.0f32..1200.0, -400.0f32..800.0),
            1..12,
        )
    ) {
        let mut editor = editor_with(
            EngineConfig::default(),
            vec![
                card("a", GridRect::new(0, 0, 4, 2)),
                card("b", GridRect::new(4, 0, 4, 2)),
                card("c", GridRect::new(0, 3, 6, 2)),
            ],
        );
        let ids = ["a", "b", "c"];

        for (picks, dx, dy) in moves {
            let selection: Vec<&str> = picks.iter().map(|&i| ids[i]).collect();
            let rect = editor.store().resolved_rect(selection[0], &desktop()).unwrap();
            let start = Vec2::new(
                20.0 + rect.x as f32 * 80.0 + 10.0,
                16.0 + rect.y as f32 * 40.0 + 10.0,
            );
            drag(&mut editor, &selection, start, start + Vec2::new(dx, dy));

            let rects = committed_rects(&editor);
            for (i, r) in rects.iter().enumerate() {
                prop_assert!(r.fits_columns(12));
                for other in &rects[i + 1..] {
                    prop_assert!(!r.intersects(other));
                }
            }
        }
    }
}
