//! Zoom tool: click to step in (out with the secondary button), drag
//! vertically to zoom continuously around the press point.

use super::{CursorSpec, EditorState, EnterReason, StateKind};
use crate::constants::{ZOOM_CLICK_TOLERANCE, ZOOM_DRAG_STEP};
use crate::editor::Editor;
use crate::input::events::{InputOutcome, Key, KeyEvent, MouseButton, MouseEvent};
use crate::types::{Point, ZoomBehavior};
use crate::zoom::Zoom;

pub struct ZoomingState {
    press: Point,
    button: MouseButton,
    start_zoom: Zoom,
    dragged: bool,
}

impl ZoomingState {
    pub fn new(press: Point, button: MouseButton) -> Self {
        Self {
            press,
            button,
            start_zoom: Zoom::default(),
            dragged: false,
        }
    }
}

impl EditorState for ZoomingState {
    fn kind(&self) -> StateKind {
        StateKind::Zooming
    }

    fn on_enter(&mut self, editor: &mut Editor, reason: EnterReason) {
        if reason == EnterReason::Fresh {
            self.start_zoom = editor.zoom();
        }
    }

    fn on_mouse_move(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        // Dragging up zooms in.
        let travel = self.press.y - ev.position.y;
        if !self.dragged && travel.abs() <= ZOOM_CLICK_TOLERANCE {
            return InputOutcome::Consumed;
        }
        self.dragged = true;
        let target = self.start_zoom.step(travel / ZOOM_DRAG_STEP);
        editor.set_zoom_anchored(target, self.press, ZoomBehavior::Mouse);
        InputOutcome::Consumed
    }

    fn on_mouse_up(&mut self, editor: &mut Editor, _ev: &MouseEvent) -> InputOutcome {
        if !self.dragged {
            let steps = if self.button == MouseButton::Right { -1 } else { 1 };
            editor.zoom_steps(steps, self.press, ZoomBehavior::Mouse);
        }
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        if ev.key != Key::Escape {
            return InputOutcome::Propagate;
        }
        editor.set_zoom_anchored(self.start_zoom, self.press, ZoomBehavior::Mouse);
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn cursor(&self, _editor: &Editor, _pos: Point) -> Option<CursorSpec> {
        Some(CursorSpec::Zoom)
    }
}
