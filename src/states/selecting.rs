//! Rubber-band selection, or a hand-off to moving the selected pixels when
//! the press lands on the current selection.

use super::{state_ptr, CursorSpec, EditorState, EnterReason, MovingPixelsState, StateKind};
use crate::constants::{HANDLE_SIZE, RUBBER_BAND_COLOR};
use crate::document::Handle;
use crate::editor::Editor;
use crate::input::events::{InputOutcome, Key, KeyEvent, MouseEvent};
use crate::render::Graphics;
use crate::types::{AutoScroll, Point, Rect, SelectionMode};
use tracing::{debug, warn};

pub struct SelectingState {
    press: MouseEvent,
    anchor: Point,
    current: Point,
    mode: SelectionMode,
    /// A nested moving-pixels state is handling this press.
    delegated: bool,
}

impl SelectingState {
    pub fn new(press: MouseEvent) -> Self {
        Self {
            press,
            anchor: Point::ZERO,
            current: Point::ZERO,
            mode: SelectionMode::Replace,
            delegated: false,
        }
    }

    /// Document rectangle covered by the band so far. Empty for a click.
    pub fn band(&self) -> Rect {
        if self.anchor == self.current {
            return Rect::new(self.anchor.x, self.anchor.y, 0, 0);
        }
        let min = Point::new(self.anchor.x.min(self.current.x), self.anchor.y.min(self.current.y));
        let max = Point::new(self.anchor.x.max(self.current.x), self.anchor.y.max(self.current.y));
        Rect::from_corners(min, max + Point::new(1, 1))
    }

    fn invalidate_band(&self, editor: &mut Editor) {
        editor.invalidate_document_rect(self.band());
    }

    /// Press on a handle or inside the selection: move pixels instead.
    fn wants_transform(&self, editor: &Editor) -> Option<Option<Handle>> {
        if self.mode != SelectionMode::Replace || !editor.can_draw() {
            return None;
        }
        let pos = self.press.position;
        let bounds = editor.with_document(|doc| doc.selection_bounds()).flatten()?;
        let screen = editor.view().rect_to_viewport(bounds);
        if let Some(handle) = Handle::hit_test(screen, pos, HANDLE_SIZE) {
            return Some(Some(handle));
        }
        editor.is_inside_selection(pos).then_some(None)
    }
}

impl EditorState for SelectingState {
    fn kind(&self) -> StateKind {
        StateKind::Selecting
    }

    fn on_enter(&mut self, editor: &mut Editor, reason: EnterReason) {
        match reason {
            EnterReason::Fresh => {
                self.mode = editor.selection_mode();
                if let Some(handle) = self.wants_transform(editor) {
                    debug!(editor = editor.id().0, handle = ?handle, "press on selection; moving pixels");
                    self.delegated = true;
                    editor.push_state(state_ptr(MovingPixelsState::for_drag(self.press, handle)));
                    return;
                }
                self.anchor = editor.to_document(self.press.position);
                self.current = self.anchor;
            }
            // The nested move is done, and so is this press.
            EnterReason::Resumed => {
                if self.delegated {
                    editor.back_to_previous_state();
                }
            }
        }
    }

    fn on_mouse_move(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        if self.delegated {
            return InputOutcome::Propagate;
        }
        if editor.preferences().auto_scroll {
            editor.autoscroll(ev.position, AutoScroll::MouseDir);
        }
        let pos = editor.to_document(ev.position);
        if pos != self.current {
            self.invalidate_band(editor);
            self.current = pos;
            self.invalidate_band(editor);
        }
        InputOutcome::Consumed
    }

    fn on_mouse_up(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        if self.delegated {
            return InputOutcome::Propagate;
        }
        self.current = editor.to_document(ev.position);
        let band = self.band();
        match editor.document() {
            Some(doc) => match doc.try_borrow_mut() {
                Ok(mut doc) => doc.select(band, self.mode),
                Err(_) => warn!(editor = editor.id().0, "document busy; selection dropped"),
            },
            None => warn!(editor = editor.id().0, "document gone before selection finished"),
        }
        debug!(editor = editor.id().0, band = ?band, mode = ?self.mode, "selection applied");
        editor.invalidate_all();
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        if ev.key != Key::Escape {
            return InputOutcome::Propagate;
        }
        self.invalidate_band(editor);
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn paint_decorations(&self, editor: &Editor, g: &mut dyn Graphics) {
        if self.delegated {
            return;
        }
        let band = self.band();
        if !band.is_empty() {
            g.draw_rect(editor.view().rect_to_viewport(band), RUBBER_BAND_COLOR);
        }
    }

    fn cursor(&self, _editor: &Editor, _pos: Point) -> Option<CursorSpec> {
        Some(CursorSpec::Crosshair)
    }
}
