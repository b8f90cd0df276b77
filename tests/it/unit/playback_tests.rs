//! Animation playback and timers, driven through the editor with a manual
//! clock.

use crate::helpers::{observe, TestEditor, TestEditorBuilder};
use editor_canvas::editor::EditorEvent;
use editor_canvas::error::EditorError;
use editor_canvas::playback::{Clock, PlaybackDirection, PlaybackOptions, StopBehavior};
use editor_canvas::states::StateKind;
use editor_canvas::types::{EditorFlags, Rect};
use std::time::Duration;

fn tick(t: &mut TestEditor, ms: u64) {
    t.clock.advance_ms(ms);
    t.editor.on_timer_tick();
}

fn options(direction: PlaybackDirection, play_once: bool, stop_behavior: StopBehavior) -> PlaybackOptions {
    PlaybackOptions {
        direction,
        play_once,
        stop_behavior,
    }
}

#[test]
fn test_play_loops_forward() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    let observer = observe(&mut t.editor);
    t.editor.play().unwrap();
    assert!(t.editor.is_playing());
    assert_eq!(t.editor.state_kind(), StateKind::Playing);

    let mut seen = Vec::new();
    for _ in 0..4 {
        tick(&mut t, 100);
        seen.push(t.editor.frame());
    }
    assert_eq!(seen, vec![1, 2, 0, 1]);
    assert!(observer.take().contains(&EditorEvent::PlaybackStarted));
}

#[test]
fn test_timer_deadline_tracks_current_frame() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    assert_eq!(t.editor.next_timer_deadline(), None);

    t.editor.play().unwrap();
    let now = t.clock.now();
    let deadline = t.editor.next_timer_deadline().expect("playing has a deadline");
    let wait = deadline.duration_since(now);
    assert!(wait > Duration::from_millis(99) && wait <= Duration::from_millis(101));

    t.editor.set_animation_speed_multiplier(4.0);
    let wait = t.editor.next_timer_deadline().unwrap().duration_since(now);
    assert!(wait > Duration::from_millis(24) && wait <= Duration::from_millis(26));
}

#[test]
fn test_stop_rewinds_by_default() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    let observer = observe(&mut t.editor);
    t.editor.play().unwrap();
    tick(&mut t, 100);
    tick(&mut t, 100);
    assert_eq!(t.editor.frame(), 2);

    t.editor.stop();

    assert!(!t.editor.is_playing());
    assert_eq!(t.editor.frame(), 0);
    assert!(observer.take().contains(&EditorEvent::PlaybackStopped));
}

#[test]
fn test_stop_holds_current_frame() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor
        .play_with(options(PlaybackDirection::Forward, false, StopBehavior::Hold))
        .unwrap();
    tick(&mut t, 100);

    t.editor.stop();
    assert_eq!(t.editor.frame(), 1);
}

#[test]
fn test_play_once_stops_by_itself() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor
        .play_with(options(PlaybackDirection::Forward, true, StopBehavior::Hold))
        .unwrap();

    tick(&mut t, 100);
    tick(&mut t, 100);
    assert!(t.editor.is_playing());
    tick(&mut t, 100);

    assert!(!t.editor.is_playing());
    assert_eq!(t.editor.frame(), 2);
}

#[test]
fn test_ping_pong_through_editor() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor
        .play_with(options(PlaybackDirection::PingPong, false, StopBehavior::Hold))
        .unwrap();

    let mut seen = Vec::new();
    for _ in 0..6 {
        tick(&mut t, 100);
        seen.push(t.editor.frame());
    }
    assert_eq!(seen, vec![1, 2, 1, 0, 1, 2]);
}

#[test]
fn test_speed_change_keeps_progress() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor.play().unwrap();

    t.clock.advance_ms(50);
    t.editor.set_animation_speed_multiplier(2.0);
    tick(&mut t, 30);

    assert_eq!(t.editor.frame(), 1);
    assert_eq!(t.editor.animation_speed_multiplier(), 2.0);
}

#[test]
fn test_set_frame_while_playing_stops_first() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor.play().unwrap();
    tick(&mut t, 100);

    t.editor.set_frame(2).unwrap();

    assert!(!t.editor.is_playing());
    assert_eq!(t.editor.frame(), 2);
    assert_eq!(
        t.editor.set_frame(3),
        Err(EditorError::FrameOutOfRange { frame: 3, count: 3 })
    );
}

#[test]
fn test_click_stops_playback_without_drawing() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor.play().unwrap();

    t.mouse_down(400, 300);

    assert!(!t.editor.is_playing());
    assert!(t.tool_log().is_empty());
}

#[test]
fn test_marching_ants_step_on_interval() {
    let mut t = TestEditorBuilder::new().selection(Rect::new(0, 0, 16, 16)).build();
    assert!(t.editor.next_timer_deadline().is_some());
    assert_eq!(t.editor.mask_phase(), 0);

    tick(&mut t, 50);
    assert_eq!(t.editor.mask_phase(), 0);
    tick(&mut t, 50);
    assert_eq!(t.editor.mask_phase(), 1);

    t.editor.toggle_flag(EditorFlags::SHOW_MASK);
    assert_eq!(t.editor.next_timer_deadline(), None);
}
