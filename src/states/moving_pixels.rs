//! Moving or scaling the selected pixels.
//!
//! Entered either by a drag (body or handle) that ends on release, or by
//! [`Editor::start_selection_transformation`], which keeps the floating
//! pixels around until Enter commits, Escape discards or a click outside
//! commits.

use super::{CursorSpec, EditorState, EnterReason, LeaveReason, StateKind, StateValidity};
use crate::constants::{HANDLE_COLOR, HANDLE_SIZE, RUBBER_BAND_COLOR};
use crate::document::{DocumentEvent, Handle, PixelsMovement};
use crate::editor::Editor;
use crate::input::events::{InputOutcome, Key, KeyEvent, MouseEvent};
use crate::render::Graphics;
use crate::types::{AutoScroll, LayerId, Point, Rect};
use tracing::{debug, warn};

#[derive(Clone, Copy)]
enum Start {
    Drag { press: MouseEvent, handle: Option<Handle> },
    Translate(Point),
}

pub struct MovingPixelsState {
    start: Start,
    movement: Option<Box<dyn PixelsMovement>>,
    layer: Option<LayerId>,
    /// Document bounds of the floating pixels.
    bounds: Rect,
    dragging: bool,
    /// Stays active after a drag ends, until committed or discarded.
    persistent: bool,
}

impl MovingPixelsState {
    /// Drag the selection body (`handle == None`) or one of its handles.
    pub fn for_drag(press: MouseEvent, handle: Option<Handle>) -> Self {
        Self::with_start(Start::Drag { press, handle }, false)
    }

    /// Float the selection, offset it by `delta` and wait for more input.
    pub fn for_translation(delta: Point) -> Self {
        Self::with_start(Start::Translate(delta), true)
    }

    fn with_start(start: Start, persistent: bool) -> Self {
        Self {
            start,
            movement: None,
            layer: None,
            bounds: Rect::default(),
            dragging: false,
            persistent,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn update_bounds(&mut self, editor: &mut Editor, bounds: Rect) {
        editor.invalidate_document_rect(self.bounds.union(&bounds));
        self.bounds = bounds;
    }

    fn screen_bounds(&self, editor: &Editor) -> Rect {
        editor.view().rect_to_viewport(self.bounds)
    }

    fn begin(&mut self, editor: &mut Editor) -> bool {
        let site = editor.site();
        let Some(layer) = site.layer else {
            return false;
        };
        let Some(doc) = editor.document() else {
            return false;
        };
        let movement = match doc.try_borrow_mut() {
            Ok(mut doc) => doc.begin_pixels_movement(layer, site.frame),
            Err(_) => {
                warn!(editor = editor.id().0, "document busy; cannot lift pixels");
                None
            }
        };
        let Some(movement) = movement else {
            return false;
        };
        self.bounds = movement.bounds();
        self.layer = Some(layer);
        self.movement = Some(movement);
        true
    }

    /// Drop (commit) or discard the floating pixels.
    fn finish(&mut self, editor: &mut Editor, commit: bool) {
        let Some(mut movement) = self.movement.take() else {
            return;
        };
        if commit {
            movement.drop_pixels();
        } else {
            movement.discard();
        }
        debug!(editor = editor.id().0, commit, bounds = ?self.bounds, "pixel movement finished");
        editor.invalidate_all();
    }

    fn catch(&mut self, editor: &Editor, pos: Point, handle: Option<Handle>) {
        let doc_pos = editor.to_document(pos);
        if let Some(movement) = self.movement.as_mut() {
            movement.catch_at(doc_pos, handle);
            self.dragging = true;
        }
    }
}

impl EditorState for MovingPixelsState {
    fn kind(&self) -> StateKind {
        StateKind::MovingPixels
    }

    fn on_enter(&mut self, editor: &mut Editor, reason: EnterReason) {
        if reason != EnterReason::Fresh {
            return;
        }
        if !self.begin(editor) {
            debug!(editor = editor.id().0, "nothing to move");
            editor.back_to_previous_state();
            return;
        }
        match self.start {
            Start::Drag { press, handle } => self.catch(editor, press.position, handle),
            Start::Translate(delta) => {
                if let Some(bounds) = self.movement.as_mut().map(|m| m.translate(delta)) {
                    self.update_bounds(editor, bounds);
                }
            }
        }
    }

    fn on_leave(&mut self, editor: &mut Editor, reason: LeaveReason) {
        match reason {
            LeaveReason::Suspended => {}
            LeaveReason::Cancelled => self.finish(editor, false),
            LeaveReason::Popped | LeaveReason::Replaced => self.finish(editor, true),
        }
    }

    fn on_mouse_down(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        let screen = self.screen_bounds(editor);
        let handle = Handle::hit_test(screen, ev.position, HANDLE_SIZE);
        if handle.is_some() || screen.contains(ev.position) {
            self.catch(editor, ev.position, handle);
        } else {
            self.finish(editor, true);
            editor.back_to_previous_state();
        }
        InputOutcome::Consumed
    }

    fn on_mouse_move(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        if !self.dragging {
            return InputOutcome::Propagate;
        }
        if editor.preferences().auto_scroll {
            editor.autoscroll(ev.position, AutoScroll::MouseDir);
        }
        let pos = editor.to_document(ev.position);
        if let Some(bounds) = self.movement.as_mut().map(|m| m.move_to(pos, ev.modifiers.shift)) {
            self.update_bounds(editor, bounds);
        }
        InputOutcome::Consumed
    }

    fn on_mouse_up(&mut self, editor: &mut Editor, _ev: &MouseEvent) -> InputOutcome {
        if !self.dragging {
            return InputOutcome::Propagate;
        }
        self.dragging = false;
        if !self.persistent {
            self.finish(editor, true);
            editor.back_to_previous_state();
        }
        InputOutcome::Consumed
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        let nudge = match ev.key {
            Key::Enter => {
                self.finish(editor, true);
                editor.back_to_previous_state();
                return InputOutcome::Consumed;
            }
            Key::Escape => {
                self.finish(editor, false);
                editor.back_to_previous_state();
                return InputOutcome::Consumed;
            }
            Key::Left => Point::new(-1, 0),
            Key::Right => Point::new(1, 0),
            Key::Up => Point::new(0, -1),
            Key::Down => Point::new(0, 1),
            _ => return InputOutcome::Propagate,
        };
        if self.dragging {
            return InputOutcome::Consumed;
        }
        if let Some(bounds) = self.movement.as_mut().map(|m| m.translate(nudge)) {
            self.update_bounds(editor, bounds);
        }
        InputOutcome::Consumed
    }

    fn on_document_event(&mut self, _editor: &mut Editor, ev: &DocumentEvent) -> StateValidity {
        match ev {
            DocumentEvent::LayerRemoved(id) if Some(*id) == self.layer => StateValidity::Invalidated,
            _ => StateValidity::Valid,
        }
    }

    fn paint_decorations(&self, editor: &Editor, g: &mut dyn Graphics) {
        if self.movement.is_none() {
            return;
        }
        let screen = self.screen_bounds(editor);
        g.draw_rect(screen, RUBBER_BAND_COLOR);
        for handle in Handle::ALL {
            g.draw_rect(handle.rect(screen, HANDLE_SIZE), HANDLE_COLOR);
        }
    }

    fn cursor(&self, editor: &Editor, pos: Point) -> Option<CursorSpec> {
        let screen = self.screen_bounds(editor);
        if let Some(handle) = Handle::hit_test(screen, pos, HANDLE_SIZE) {
            Some(CursorSpec::SizeHandle(handle))
        } else if self.dragging || screen.contains(pos) {
            Some(CursorSpec::Move)
        } else {
            Some(CursorSpec::Arrow)
        }
    }
}
