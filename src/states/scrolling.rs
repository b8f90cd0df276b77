//! Hand-drag panning.

use super::{CursorSpec, EditorState, StateKind};
use crate::editor::Editor;
use crate::input::events::{InputOutcome, Key, KeyEvent, MouseEvent};
use crate::types::{AutoScroll, Point};

pub struct ScrollingState {
    last: Point,
}

impl ScrollingState {
    pub fn new(press: Point) -> Self {
        Self { last: press }
    }
}

impl EditorState for ScrollingState {
    fn kind(&self) -> StateKind {
        StateKind::Scrolling
    }

    fn on_mouse_move(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        // Content follows the pointer, so scroll moves the opposite way.
        editor.scroll_by(self.last - ev.position);
        editor.autoscroll(ev.position, AutoScroll::ScrollDir);
        self.last = ev.position;
        InputOutcome::Consumed
    }

    fn on_mouse_up(&mut self, editor: &mut Editor, _ev: &MouseEvent) -> InputOutcome {
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        if ev.key == Key::Escape {
            editor.back_to_previous_state();
            return InputOutcome::Consumed;
        }
        InputOutcome::Propagate
    }

    fn cursor(&self, _editor: &Editor, _pos: Point) -> Option<CursorSpec> {
        Some(CursorSpec::Hand)
    }
}
