//! Zoom, scroll and coordinate conversion through the editor.

use crate::helpers::{TestEditorBuilder, VIEWPORT};
use editor_canvas::input::events::{Key, Modifiers};
use editor_canvas::preferences::Preferences;
use editor_canvas::types::{AutoScroll, Point, Rect, ZoomBehavior};
use editor_canvas::zoom::Zoom;

fn assert_close(actual: Point, expected: Point, tolerance: i32) {
    assert!(
        (actual.x - expected.x).abs() <= tolerance && (actual.y - expected.y).abs() <= tolerance,
        "{actual:?} is not within {tolerance}px of {expected:?}"
    );
}

// ============================================================================
// Initial view
// ============================================================================

#[test]
fn test_first_resize_centers_sprite() {
    let t = TestEditorBuilder::new().build();
    assert_eq!(t.editor.padding(), Point::new(400, 300));
    assert_eq!(t.editor.scroll(), Point::new(128, 128));
    assert_eq!(t.editor.to_viewport(Point::new(128, 128)), Point::new(400, 300));
    assert_eq!(t.editor.to_document(Point::new(400, 300)), Point::new(128, 128));
}

#[test]
fn test_first_resize_centers_selection() {
    let t = TestEditorBuilder::new().selection(Rect::new(10, 10, 20, 20)).build();
    assert_eq!(t.editor.to_viewport(Point::new(20, 20)), Point::new(400, 300));
}

#[test]
fn test_visible_sprite_bounds() {
    let t = TestEditorBuilder::new().build();
    assert_eq!(t.editor.visible_sprite_bounds(), Rect::new(0, 0, 256, 256));

    let big = TestEditorBuilder::new().sprite(4000, 4000).build();
    let visible = big.editor.visible_sprite_bounds();
    assert_eq!((visible.w, visible.h), (800, 600));
}

// ============================================================================
// Scroll
// ============================================================================

#[test]
fn test_scroll_is_clamped_to_padded_sprite() {
    let mut t = TestEditorBuilder::new().build();
    assert_eq!(t.editor.max_scroll(), Point::new(256, 256));

    assert!(t.editor.set_editor_scroll(Point::new(-50, 10_000)));
    assert_eq!(t.editor.scroll(), Point::new(0, 256));
    assert!(!t.editor.set_editor_scroll(Point::new(-1, 300)));
}

#[test]
fn test_small_scroll_records_blit_and_exposed_strip() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.take_invalidated();
    assert_eq!(t.editor.take_scroll_blit(), None);

    t.editor.scroll_by(Point::new(10, 0));

    let blit = t.editor.take_scroll_blit().expect("blit recorded");
    assert_eq!(blit.area, VIEWPORT);
    assert_eq!(blit.delta, Point::new(-10, 0));
    assert!(t.editor.take_invalidated().contains(&Rect::new(790, 0, 10, 600)));
}

#[test]
fn test_large_scroll_repaints_everything() {
    let mut t = TestEditorBuilder::new().sprite(2000, 2000).build();
    t.editor.take_invalidated();

    t.editor.scroll_by(Point::new(900, 0));

    assert_eq!(t.editor.take_scroll_blit(), None);
    assert_eq!(t.editor.take_invalidated(), vec![VIEWPORT]);
}

#[test]
fn test_resize_keeps_center_point() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.resize(Rect::new(0, 0, 400, 300));

    assert_eq!(t.editor.padding(), Point::new(200, 150));
    assert_eq!(t.editor.to_document(Point::new(200, 150)), Point::new(128, 128));
}

#[test]
fn test_empty_viewport_then_resize_applies_default_scroll() {
    let t = TestEditorBuilder::new().viewport(Rect::default()).build();
    let mut editor = t.editor;
    assert_eq!(editor.scroll(), Point::ZERO);

    editor.resize(VIEWPORT);
    assert_eq!(editor.to_viewport(Point::new(128, 128)), Point::new(400, 300));
}

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn test_mouse_zoom_keeps_point_under_pointer() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.set_editor_scroll(Point::ZERO);
    let anchor = Point::new(500, 350);
    let doc_point = t.editor.to_document(anchor);
    assert_eq!(doc_point, Point::new(100, 50));

    assert!(t.editor.set_zoom_anchored(Zoom::new(2, 1), anchor, ZoomBehavior::Mouse));

    assert_eq!(t.editor.zoom(), Zoom::new(2, 1));
    assert_close(t.editor.to_viewport(doc_point), anchor, 1);
    assert_eq!(t.editor.scroll(), Point::new(100, 50));
}

#[test]
fn test_center_zoom_keeps_viewport_center() {
    let mut t = TestEditorBuilder::new().build();
    let center = VIEWPORT.center();
    let doc_point = t.editor.to_document(center);

    // The anchor argument is ignored for center zoom.
    t.editor.set_zoom_anchored(Zoom::new(2, 1), Point::new(5, 5), ZoomBehavior::Center);

    assert_eq!(t.editor.to_viewport(doc_point), center);
}

#[test]
fn test_zoom_out_round_trip_within_one_reduced_pixel() {
    let mut t = TestEditorBuilder::new().build();
    let anchor = Point::new(400, 300);
    let zoom = Zoom::new(1, 2);

    t.editor.set_zoom_anchored(zoom, anchor, ZoomBehavior::Mouse);

    let back = t.editor.to_document(anchor);
    assert!((back.x - 128).abs() < zoom.den());
    assert!((back.y - 128).abs() < zoom.den());
}

#[test]
fn test_zoom_saturates_at_extremes() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.set_zoom_anchored(Zoom::max(), Point::ZERO, ZoomBehavior::Center);
    assert!(!t.editor.zoom_steps(1, Point::ZERO, ZoomBehavior::Center));
    assert_eq!(t.editor.zoom(), Zoom::max());

    t.editor.set_zoom_anchored(Zoom::min(), Point::ZERO, ZoomBehavior::Center);
    assert!(!t.editor.zoom_steps(-3, Point::ZERO, ZoomBehavior::Center));
}

#[test]
fn test_raw_zoom_keeps_scroll() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.set_editor_scroll(Point::new(100, 100));

    assert!(t.editor.set_zoom(Zoom::new(2, 1)));
    assert_eq!(t.editor.zoom(), Zoom::new(2, 1));
    assert_eq!(t.editor.scroll(), Point::new(100, 100));
    assert!(!t.editor.set_zoom(Zoom::new(2, 1)));
}

#[test]
fn test_raw_zoom_out_reclamps_scroll() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.set_editor_scroll(Point::new(200, 200));

    t.editor.set_zoom(Zoom::new(1, 2));

    // At 50% the sprite is 128px wide, which is also the scroll limit.
    assert_eq!(t.editor.scroll(), Point::new(128, 128));
}

#[test]
fn test_zoom_to_uses_preferred_anchor() {
    let mut t = TestEditorBuilder::new().build();
    let center = VIEWPORT.center();
    let doc_point = t.editor.to_document(center);

    t.editor.zoom_to(Zoom::new(2, 1));

    assert_eq!(t.editor.to_viewport(doc_point), center);
}

#[test]
fn test_mouse_zoom_near_padding_edge_is_clamped() {
    let mut t = TestEditorBuilder::new().build();
    let anchor = Point::new(10, 10);
    assert_eq!(t.editor.to_document(anchor), Point::new(-262, -162));

    t.editor.set_zoom_anchored(Zoom::new(2, 1), anchor, ZoomBehavior::Mouse);

    // Keeping (-262, -162) under the pointer needs a negative scroll.
    assert_eq!(t.editor.scroll(), Point::ZERO);
    assert_eq!(t.editor.to_document(anchor), Point::new(-195, -145));
}

#[test]
fn test_center_in_document_point() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.set_zoom_anchored(Zoom::new(4, 1), Point::ZERO, ZoomBehavior::Center);
    t.editor.center_in_document_point(Point::new(30, 200));

    // The center of the viewport lands inside the requested pixel.
    assert_eq!(t.editor.to_document(VIEWPORT.center()), Point::new(30, 200));
}

// ============================================================================
// Default wheel and keyboard handling
// ============================================================================

#[test]
fn test_wheel_scrolls_and_shift_swaps_axes() {
    let mut t = TestEditorBuilder::new().build();
    t.wheel(400, 300, Point::new(0, 1), Modifiers::NONE);
    assert_eq!(t.editor.scroll(), Point::new(128, 176));

    t.wheel(400, 300, Point::new(0, 1), Modifiers::shift());
    assert_eq!(t.editor.scroll(), Point::new(176, 176));
}

#[test]
fn test_ctrl_wheel_zooms_around_pointer() {
    let mut t = TestEditorBuilder::new().build();
    let anchor = Point::new(500, 350);
    let doc_point = t.editor.to_document(anchor);

    t.wheel(anchor.x, anchor.y, Point::new(0, -1), Modifiers::ctrl());

    assert_eq!(t.editor.zoom(), Zoom::new(2, 1));
    assert_close(t.editor.to_viewport(doc_point), anchor, 1);
}

#[test]
fn test_zoom_with_wheel_preference_swaps_roles() {
    let prefs = Preferences {
        zoom_with_wheel: true,
        ..Preferences::default()
    };
    let mut t = TestEditorBuilder::new().preferences(prefs).build();

    t.wheel(400, 300, Point::new(0, 1), Modifiers::NONE);
    assert_eq!(t.editor.zoom(), Zoom::new(1, 2));
    let scroll = t.editor.scroll();

    t.wheel(400, 300, Point::new(0, 1), Modifiers::ctrl());
    assert_eq!(t.editor.zoom(), Zoom::new(1, 2));
    assert_ne!(t.editor.scroll(), scroll);
}

#[test]
fn test_zoom_and_scroll_keys() {
    let mut t = TestEditorBuilder::new().build();
    t.key(Key::Char('+'));
    assert_eq!(t.editor.zoom(), Zoom::new(2, 1));
    t.key(Key::Char('-'));
    t.key(Key::Char('-'));
    assert_eq!(t.editor.zoom(), Zoom::new(1, 2));
    t.key(Key::Char('0'));
    assert_eq!(t.editor.zoom(), Zoom::default());

    let before = t.editor.scroll();
    t.key(Key::Right);
    assert_eq!(t.editor.scroll(), before + Point::new(80, 0));
}

// ============================================================================
// Autoscroll
// ============================================================================

#[test]
fn test_autoscroll_follows_pointer_outside() {
    let mut t = TestEditorBuilder::new().build();
    t.hover(790, 300);

    let applied = t.editor.autoscroll(Point::new(810, 300), AutoScroll::MouseDir);
    assert_eq!(applied, Point::new(11, 0));
    assert_eq!(t.editor.scroll(), Point::new(139, 128));

    // At the scroll limit nothing more can be applied.
    t.editor.set_editor_scroll(Point::new(256, 128));
    assert_eq!(t.editor.autoscroll(Point::new(810, 300), AutoScroll::MouseDir), Point::ZERO);
}

#[test]
fn test_autoscroll_inside_viewport_is_noop() {
    let mut t = TestEditorBuilder::new().build();
    assert_eq!(t.editor.autoscroll(Point::new(10, 10), AutoScroll::ScrollDir), Point::ZERO);
    assert_eq!(t.editor.scroll(), Point::new(128, 128));
}
