//! Change notifications and editor teardown.

use crate::helpers::{observe, RecordingObserver, TestEditor, TestEditorBuilder};
use editor_canvas::editor::EditorEvent;
use editor_canvas::input::events::{InputEvent, InputOutcome, MouseEvent};
use editor_canvas::states::StateKind;
use editor_canvas::types::{LayerId, Point, ZoomBehavior};
use editor_canvas::zoom::Zoom;
use std::rc::Rc;

#[test]
fn test_observers_receive_view_changes() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);

    t.editor.scroll_by(Point::new(5, 0));
    t.editor.set_zoom_anchored(Zoom::new(2, 1), Point::new(400, 300), ZoomBehavior::Mouse);

    let events = observer.take();
    assert_eq!(events[0], EditorEvent::ScrollChanged(Point::new(133, 128)));
    assert!(events.contains(&EditorEvent::ZoomChanged(Zoom::new(2, 1))));
}

#[test]
fn test_remove_observer() {
    let mut t = TestEditorBuilder::new().build();
    let observer = Rc::new(RecordingObserver::default());
    let id = t.editor.add_observer(observer.clone());
    assert_eq!(t.editor.observer_count(), 1);

    assert!(t.editor.remove_observer(id));
    assert!(!t.editor.remove_observer(id));
    t.editor.scroll_by(Point::new(5, 0));
    assert!(observer.take().is_empty());
}

#[test]
fn test_state_change_is_reported() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);

    t.mouse_down(400, 300);
    t.mouse_up(400, 300);

    let changes: Vec<_> = observer
        .take()
        .into_iter()
        .filter(|e| matches!(e, EditorEvent::StateChanged { .. }))
        .collect();
    assert_eq!(
        changes,
        vec![
            EditorEvent::StateChanged {
                from: StateKind::Standby,
                to: StateKind::Drawing
            },
            EditorEvent::StateChanged {
                from: StateKind::Drawing,
                to: StateKind::Standby
            },
        ]
    );
}

#[test]
fn test_layer_and_frame_changes_are_reported() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);

    t.editor.set_frame(2).unwrap();
    t.editor.set_layer(None).unwrap();
    t.editor.set_layer(Some(LayerId(1))).unwrap();

    assert_eq!(
        observer.take(),
        vec![
            EditorEvent::FrameChanged(2),
            EditorEvent::LayerChanged(None),
            EditorEvent::LayerChanged(Some(LayerId(1))),
        ]
    );
}

#[test]
fn test_destroy_is_idempotent_and_silences_editor() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);
    t.mouse_down(400, 300);
    assert_eq!(t.editor.state_kind(), StateKind::Drawing);

    t.editor.destroy();
    t.editor.destroy();

    assert!(t.editor.is_destroyed());
    assert_eq!(t.editor.observer_count(), 0);
    assert_eq!(t.editor.state_kind(), StateKind::Standby);
    assert!(t.editor.document().is_none());
    let events = observer.take();
    assert_eq!(events.iter().filter(|e| **e == EditorEvent::Destroyed).count(), 1);
    // The stroke in progress was cancelled, not committed.
    assert_eq!(t.tool_log().last().map(String::as_str), Some("cancel"));

    let outcome = t
        .editor
        .handle_input(&InputEvent::MouseDown(MouseEvent::left(Point::new(400, 300))));
    assert_eq!(outcome, InputOutcome::Propagate);
    assert!(t.editor.take_invalidated().is_empty());
}

#[test]
fn test_dropping_document_destroys_editor_on_next_event() {
    let TestEditor { mut editor, doc, .. } = TestEditorBuilder::new().build();
    let observer = observe(&mut editor);
    drop(doc);

    assert!(editor.document().is_none());
    editor.on_timer_tick();

    assert!(editor.is_destroyed());
    assert_eq!(observer.take().last(), Some(&EditorEvent::Destroyed));
}
