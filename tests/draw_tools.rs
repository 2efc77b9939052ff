use std::sync::{Arc, Mutex};

use egui::{Color32, pos2};
use moodboard::event::DrawLayerEvent;
use moodboard::input::PointerEvent;
use moodboard::{BoardEvent, DrawObject, DrawStore, EventHandler, ToolController, ToolKind};

fn down(x: f32, y: f32) -> PointerEvent {
    PointerEvent::Down { pos: pos2(x, y) }
}

fn moved(x: f32, y: f32) -> PointerEvent {
    PointerEvent::Moved { pos: pos2(x, y) }
}

fn up(x: f32, y: f32) -> PointerEvent {
    PointerEvent::Up { pos: pos2(x, y) }
}

fn controller(tool: ToolKind) -> ToolController {
    let mut tools = ToolController::default();
    tools.settings.tool = tool;
    tools
}

#[test]
fn test_pen_commits_progressively() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Pen);

    tools.handle_pointer(down(10.0, 10.0), &mut store);
    tools.handle_pointer(moved(20.0, 15.0), &mut store);
    tools.handle_pointer(moved(30.0, 20.0), &mut store);

    // The stroke is already on the layer before release.
    let objects = &store.layer(layer).unwrap().objects;
    assert_eq!(objects.len(), 1);
    match &objects[0] {
        DrawObject::Pen { points, .. } => {
            assert_eq!(points, &[pos2(10.0, 10.0), pos2(20.0, 15.0), pos2(30.0, 20.0)]);
        }
        other => panic!("expected a pen object, got {other:?}"),
    }

    tools.handle_pointer(up(30.0, 20.0), &mut store);
    assert!(tools.is_idle());
    assert_eq!(store.layer(layer).unwrap().objects.len(), 1);
}

#[test]
fn test_shapes_commit_only_on_release() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Rectangle);

    tools.handle_pointer(down(10.0, 10.0), &mut store);
    tools.handle_pointer(moved(50.0, 40.0), &mut store);

    // Mid-drag: preview only, nothing persisted.
    assert!(store.layer(layer).unwrap().objects.is_empty());
    assert!(matches!(
        tools.preview(),
        Some(DrawObject::Rectangle { .. })
    ));

    tools.handle_pointer(up(60.0, 45.0), &mut store);
    let objects = &store.layer(layer).unwrap().objects;
    assert_eq!(objects.len(), 1);
    match &objects[0] {
        DrawObject::Rectangle { from, to, .. } => {
            assert_eq!(*from, pos2(10.0, 10.0));
            assert_eq!(*to, pos2(60.0, 45.0));
        }
        other => panic!("expected a rectangle, got {other:?}"),
    }
    assert!(tools.preview().is_none());
}

#[test]
fn test_no_editable_layer_means_no_gesture() {
    let mut store = DrawStore::new();
    let mut tools = controller(ToolKind::Pen);

    tools.handle_pointer(down(10.0, 10.0), &mut store);
    assert!(tools.is_idle());

    let layer = store.create_layer();
    store.set_visible(layer, false);
    tools.handle_pointer(down(10.0, 10.0), &mut store);
    assert!(tools.is_idle());
    assert!(store.layer(layer).unwrap().objects.is_empty());
}

#[test]
fn test_locking_mid_stroke_aborts_but_keeps_committed_points() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Pen);

    tools.handle_pointer(down(10.0, 10.0), &mut store);
    tools.handle_pointer(moved(20.0, 20.0), &mut store);
    store.set_locked(layer, true);
    tools.handle_pointer(moved(30.0, 30.0), &mut store);
    tools.handle_pointer(up(40.0, 40.0), &mut store);

    assert!(tools.is_idle());
    let objects = &store.layer(layer).unwrap().objects;
    assert_eq!(objects.len(), 1);
    match &objects[0] {
        DrawObject::Pen { points, .. } => {
            // The two points from before the lock survive; nothing after.
            assert_eq!(points, &[pos2(10.0, 10.0), pos2(20.0, 20.0)]);
        }
        other => panic!("expected a pen object, got {other:?}"),
    }
}

#[test]
fn test_locking_mid_shape_discards_the_preview() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Line);

    tools.handle_pointer(down(10.0, 10.0), &mut store);
    store.set_locked(layer, true);
    tools.handle_pointer(moved(50.0, 50.0), &mut store);
    tools.handle_pointer(up(50.0, 50.0), &mut store);

    assert!(tools.is_idle());
    assert!(store.layer(layer).unwrap().objects.is_empty());
}

#[test]
fn test_text_waits_for_the_modal() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Text);

    tools.handle_pointer(down(100.0, 80.0), &mut store);
    assert_eq!(tools.awaiting_text(), Some(pos2(100.0, 80.0)));

    // Pointer release does not cancel a pending entry.
    tools.handle_pointer(up(100.0, 80.0), &mut store);
    assert_eq!(tools.awaiting_text(), Some(pos2(100.0, 80.0)));

    tools.submit_text("hello", &mut store);
    assert!(tools.is_idle());
    let objects = &store.layer(layer).unwrap().objects;
    assert_eq!(objects.len(), 1);
    match &objects[0] {
        DrawObject::Text { anchor, text, .. } => {
            assert_eq!(*anchor, pos2(100.0, 80.0));
            assert_eq!(text, "hello");
        }
        other => panic!("expected a text object, got {other:?}"),
    }
}

#[test]
fn test_pending_text_anchor_survives_other_pointer_activity() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Text);

    tools.handle_pointer(down(100.0, 80.0), &mut store);
    assert_eq!(tools.awaiting_text(), Some(pos2(100.0, 80.0)));

    // Presses and drags while the entry is pending (e.g. reaching for a
    // button) must not restart the entry somewhere else.
    tools.handle_pointer(down(5.0, 5.0), &mut store);
    tools.handle_pointer(moved(30.0, 30.0), &mut store);
    tools.handle_pointer(up(30.0, 30.0), &mut store);
    assert_eq!(tools.awaiting_text(), Some(pos2(100.0, 80.0)));

    tools.submit_text("hello", &mut store);
    match &store.layer(layer).unwrap().objects[0] {
        DrawObject::Text { anchor, .. } => assert_eq!(*anchor, pos2(100.0, 80.0)),
        other => panic!("expected a text object, got {other:?}"),
    }
}

#[test]
fn test_empty_text_submission_creates_nothing() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Text);

    tools.handle_pointer(down(100.0, 80.0), &mut store);
    tools.submit_text("", &mut store);
    assert!(tools.is_idle());
    assert!(store.layer(layer).unwrap().objects.is_empty());

    tools.handle_pointer(down(100.0, 80.0), &mut store);
    tools.cancel_text();
    assert!(tools.is_idle());
    assert!(store.layer(layer).unwrap().objects.is_empty());
}

#[test]
fn test_eraser_removes_objects_near_any_point() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    store.push_object(
        layer,
        DrawObject::Pen {
            points: vec![pos2(10.0, 10.0), pos2(100.0, 10.0)],
            color: Color32::RED,
            width: 2.0,
        },
    );
    let mut tools = controller(ToolKind::Eraser);

    // 8 points away on one axis: outside the strict hit box.
    tools.handle_pointer(down(108.0, 10.0), &mut store);
    tools.handle_pointer(up(108.0, 10.0), &mut store);
    assert_eq!(store.layer(layer).unwrap().objects.len(), 1);

    // Just inside the box around the second point.
    tools.handle_pointer(down(107.0, 15.0), &mut store);
    tools.handle_pointer(up(107.0, 15.0), &mut store);
    assert!(store.layer(layer).unwrap().objects.is_empty());
}

#[test]
fn test_eraser_uses_the_wide_text_hit_box() {
    let mut store = DrawStore::new();
    let layer = store.create_layer();
    store.push_object(
        layer,
        DrawObject::Text {
            anchor: pos2(200.0, 200.0),
            color: Color32::BLACK,
            width: 2.0,
            text: "note".into(),
        },
    );
    let mut tools = controller(ToolKind::Eraser);

    // Well outside a pen-sized box, still inside the 50x20 half-extents.
    tools.handle_pointer(down(240.0, 215.0), &mut store);
    tools.handle_pointer(up(240.0, 215.0), &mut store);
    assert!(store.layer(layer).unwrap().objects.is_empty());
}

#[test]
fn test_object_changes_notify_after_mutation() {
    struct Recorder(Arc<Mutex<Vec<BoardEvent>>>);
    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &BoardEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    let mut store = DrawStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    store.events().subscribe(Box::new(Recorder(log.clone())));

    let layer = store.create_layer();
    let mut tools = controller(ToolKind::Pen);
    log.lock().unwrap().clear();

    tools.handle_pointer(down(10.0, 10.0), &mut store);
    let events = log.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        BoardEvent::DrawLayer(DrawLayerEvent::ObjectsChanged { id }) if *id == layer
    ));
}
