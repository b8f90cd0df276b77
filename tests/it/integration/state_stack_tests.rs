//! State stack transitions and their enter/leave notifications.

use crate::helpers::{entries, new_log, RecordingState, TestEditorBuilder};
use editor_canvas::input::events::{InputEvent, Key};
use editor_canvas::states::{state_ptr, StateKind};
use std::rc::Rc;

#[test]
fn test_enter_leave_pairs() {
    let mut t = TestEditorBuilder::new().build();
    let log = new_log();

    t.editor.push_state(state_ptr(RecordingState::new("a", &log)));
    t.editor.push_state(state_ptr(RecordingState::new("b", &log)));
    assert_eq!(t.editor.state_depth(), 3);
    assert_eq!(t.editor.state_kind(), StateKind::Custom("b"));

    t.editor.back_to_previous_state();
    t.editor.replace_state(state_ptr(RecordingState::new("c", &log)));
    assert_eq!(t.editor.state_depth(), 2);
    t.editor.cancel_interaction();

    assert_eq!(
        entries(&log),
        vec![
            "a enter Fresh",
            "a leave Suspended",
            "b enter Fresh",
            "b leave Popped",
            "a enter Resumed",
            "a leave Replaced",
            "c enter Fresh",
            "c leave Cancelled",
        ]
    );
    assert_eq!(t.editor.state_kind(), StateKind::Standby);
    assert_eq!(t.editor.state_depth(), 1);
}

#[test]
fn test_pop_at_bottom_is_refused() {
    let mut t = TestEditorBuilder::new().build();
    let bottom = t.editor.state();

    t.editor.back_to_previous_state();

    assert_eq!(t.editor.state_depth(), 1);
    assert!(Rc::ptr_eq(&bottom, &t.editor.state()));
    assert_eq!(t.editor.state_kind(), StateKind::Standby);
}

#[test]
fn test_pushing_active_state_again_is_ignored() {
    let mut t = TestEditorBuilder::new().build();
    let log = new_log();
    let a = state_ptr(RecordingState::new("a", &log));

    t.editor.push_state(Rc::clone(&a));
    t.editor.push_state(Rc::clone(&a));

    assert_eq!(t.editor.state_depth(), 2);
    assert!(t.editor.has_state(&a));
    assert_eq!(entries(&log), vec!["a enter Fresh"]);
}

#[test]
fn test_pop_requested_inside_callback_runs_after_it() {
    let mut t = TestEditorBuilder::new().build();
    let log = new_log();
    t.editor.push_state(state_ptr(RecordingState::new("a", &log)));

    t.key(Key::Char('p'));

    assert_eq!(
        entries(&log),
        vec!["a enter Fresh", "a still running", "a leave Popped"]
    );
    assert_eq!(t.editor.state_kind(), StateKind::Standby);
}

#[test]
fn test_focus_lost_cancels_every_state() {
    let mut t = TestEditorBuilder::new().build();
    let log = new_log();
    t.editor.push_state(state_ptr(RecordingState::new("a", &log)));
    t.editor.push_state(state_ptr(RecordingState::new("b", &log)));
    log.borrow_mut().clear();

    t.editor.handle_input(&InputEvent::FocusLost);

    assert_eq!(entries(&log), vec!["b leave Cancelled", "a leave Cancelled"]);
    assert_eq!(t.editor.state_kind(), StateKind::Standby);
}

#[test]
fn test_state_kinds_have_names() {
    assert_eq!(StateKind::MovingPixels.name(), "moving_pixels");
    assert_eq!(StateKind::Custom("lasso").name(), "lasso");
}

#[test]
fn test_state_shared_by_two_editors() {
    let mut t = TestEditorBuilder::new().build();
    let mut other = t.second_editor();
    let log = new_log();
    let shared = state_ptr(RecordingState::new("shared", &log));

    t.editor.push_state(Rc::clone(&shared));
    other.push_state(Rc::clone(&shared));
    assert_eq!(Rc::strong_count(&shared), 3);

    t.editor.back_to_previous_state();
    assert!(!t.editor.has_state(&shared));
    assert!(other.has_state(&shared));
    assert_eq!(other.state_kind(), StateKind::Custom("shared"));
    assert_eq!(Rc::strong_count(&shared), 2);

    other.destroy();
    assert_eq!(Rc::strong_count(&shared), 1);
    assert_eq!(
        entries(&log),
        vec![
            "shared enter Fresh",
            "shared enter Fresh",
            "shared leave Popped",
            "shared leave Cancelled",
        ]
    );
}
