//! Editor flags and what the paint pass draws for them.

use crate::helpers::{observe, GfxOp, RecordingGraphics, TestEditorBuilder, VIEWPORT};
use editor_canvas::constants::{GRID_COLOR, MASK_COLOR_A, OUTSIDE_COLOR};
use editor_canvas::editor::EditorEvent;
use editor_canvas::preferences::Preferences;
use editor_canvas::render::EditorDecorator;
use editor_canvas::render::Graphics;
use editor_canvas::types::{EditorFlags, FlagName, Point, Rect};
use std::cell::Cell;
use std::rc::Rc;

fn grid_lines(g: &RecordingGraphics) -> usize {
    g.ops
        .iter()
        .filter(|op| matches!(op, GfxOp::Line(_, _, c) if *c == GRID_COLOR))
        .count()
}

#[test]
fn test_default_flags_come_from_preferences() {
    let t = TestEditorBuilder::new().build();
    assert_eq!(t.editor.flags(), EditorFlags::DEFAULT);

    let prefs = Preferences {
        default_flags: vec![FlagName::Grid],
        ..Preferences::default()
    };
    let t = TestEditorBuilder::new().preferences(prefs).build();
    assert_eq!(t.editor.flags(), EditorFlags::SHOW_GRID);
}

#[test]
fn test_toggle_flag_notifies_and_repaints() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);
    t.editor.take_invalidated();

    t.editor.toggle_flag(EditorFlags::SHOW_GRID);

    assert!(!t.editor.flags().contains(EditorFlags::SHOW_GRID));
    assert_eq!(t.editor.take_invalidated(), vec![VIEWPORT]);
    assert!(matches!(observer.take().as_slice(), [EditorEvent::FlagsChanged(f)] if !f.contains(EditorFlags::SHOW_GRID)));

    // Setting the same flags again is silent.
    let flags = t.editor.flags();
    t.editor.set_flags(flags);
    assert!(observer.take().is_empty());
}

#[test]
fn test_paint_renders_sprite_and_outside() {
    let mut t = TestEditorBuilder::new().build();
    let mut g = RecordingGraphics::default();

    t.editor.paint(&mut g, VIEWPORT);

    assert_eq!(g.blits(), vec![(Point::new(272, 172), 256, 256)]);
    assert_eq!(t.requests.borrow().len(), 1);
    assert_eq!(t.requests.borrow()[0].area, Rect::new(0, 0, 256, 256));
    assert!(g.ops.iter().any(|op| matches!(op, GfxOp::Fill(_, c) if *c == OUTSIDE_COLOR)));
    assert_eq!(g.ops.first(), Some(&GfxOp::Clip(Some(VIEWPORT))));
    assert_eq!(g.ops.last(), Some(&GfxOp::Clip(None)));
}

#[test]
fn test_grid_follows_flag_and_zoom() {
    let mut t = TestEditorBuilder::new().build();
    let mut g = RecordingGraphics::default();
    t.editor.paint(&mut g, VIEWPORT);
    // 256 / 16 cells plus the closing line, on both axes.
    assert_eq!(grid_lines(&g), 34);

    t.editor.toggle_flag(EditorFlags::SHOW_GRID);
    let mut g = RecordingGraphics::default();
    t.editor.paint(&mut g, VIEWPORT);
    assert_eq!(grid_lines(&g), 0);
}

#[test]
fn test_marching_ants_need_mask_flag_and_selection() {
    let mut t = TestEditorBuilder::new().selection(Rect::new(0, 0, 32, 32)).build();
    let mut g = RecordingGraphics::default();
    t.editor.paint(&mut g, VIEWPORT);
    assert!(g.ops.iter().any(|op| matches!(op, GfxOp::Line(_, _, c) if *c == MASK_COLOR_A)));

    t.editor.toggle_flag(EditorFlags::SHOW_MASK);
    let mut g = RecordingGraphics::default();
    t.editor.paint(&mut g, VIEWPORT);
    assert!(!g.ops.iter().any(|op| matches!(op, GfxOp::Line(_, _, c) if *c == MASK_COLOR_A)));
}

struct CountingDecorator {
    post: Cell<u32>,
}

impl EditorDecorator for CountingDecorator {
    fn post_render(&self, _g: &mut dyn Graphics, _viewport: Rect) {
        self.post.set(self.post.get() + 1);
    }
}

#[test]
fn test_decorators_follow_flag() {
    let mut t = TestEditorBuilder::new().build();
    let decorator = Rc::new(CountingDecorator { post: Cell::new(0) });
    t.editor.set_decorator(Some(decorator.clone()));

    t.editor.paint(&mut RecordingGraphics::default(), VIEWPORT);
    assert_eq!(decorator.post.get(), 1);

    t.editor.toggle_flag(EditorFlags::SHOW_DECORATORS);
    t.editor.paint(&mut RecordingGraphics::default(), VIEWPORT);
    assert_eq!(decorator.post.get(), 1);
}

#[test]
fn test_render_context_reset_stops_rendering() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.services().render.reset();

    let mut g = RecordingGraphics::default();
    t.editor.paint(&mut g, VIEWPORT);
    assert!(g.blits().is_empty());
    assert!(t.editor.services().render.is_shut_down());
}
