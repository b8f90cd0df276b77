//! Input routing - events go to the active state first, then to the
//! editor's default wheel and keyboard handling.

use crate::constants::{KEY_SCROLL_DIVISOR, WHEEL_SCROLL_STEP};
use crate::editor::Editor;
use crate::input::events::{InputEvent, InputOutcome, Key, KeyEvent, WheelEvent};
use crate::profile_scope;
use crate::tools::Gesture;
use crate::types::{Point, ZoomBehavior};
use crate::zoom::Zoom;
use tracing::trace;

impl Editor {
    /// Feed one toolkit event to the editor.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        if self.is_destroyed() {
            return InputOutcome::Propagate;
        }
        if self.document().is_none() {
            self.destroy();
            return InputOutcome::Propagate;
        }
        if let Some(modifiers) = event.modifiers() {
            self.update_tool_modifiers(modifiers);
        }

        let outcome = match event {
            InputEvent::MouseDown(ev) => {
                trace!(editor = self.id().0, x = ev.position.x, y = ev.position.y, button = ?ev.button, "mouse down");
                self.set_secondary_button(ev.button);
                self.dispatch(InputOutcome::Propagate, |state, editor| state.on_mouse_down(editor, ev))
            }
            InputEvent::MouseUp(ev) => {
                self.dispatch(InputOutcome::Propagate, |state, editor| state.on_mouse_up(editor, ev))
            }
            InputEvent::MouseMove(ev) => {
                profile_scope!("editor_mouse_move");
                self.dispatch(InputOutcome::Propagate, |state, editor| state.on_mouse_move(editor, ev))
            }
            InputEvent::Wheel(ev) => {
                let outcome = self.dispatch(InputOutcome::Propagate, |state, editor| state.on_wheel(editor, ev));
                if outcome.is_consumed() {
                    outcome
                } else {
                    self.default_wheel(ev)
                }
            }
            InputEvent::KeyDown(ev) => {
                let outcome = self.dispatch(InputOutcome::Propagate, |state, editor| state.on_key_down(editor, ev));
                if outcome.is_consumed() {
                    outcome
                } else {
                    self.default_key_down(ev)
                }
            }
            InputEvent::KeyUp(ev) => {
                self.dispatch(InputOutcome::Propagate, |state, editor| state.on_key_up(editor, ev))
            }
            InputEvent::FocusLost => {
                self.cancel_interaction();
                InputOutcome::Consumed
            }
        };

        // The pointer is recorded after the state saw the event so autoscroll
        // can compare against the previous position.
        let position = match event {
            InputEvent::MouseDown(ev) | InputEvent::MouseUp(ev) | InputEvent::MouseMove(ev) => Some(ev.position),
            InputEvent::Wheel(ev) => Some(ev.position),
            _ => None,
        };
        if let Some(pos) = position {
            self.set_last_pointer(pos);
        }
        if !self.is_destroyed() {
            let pointer = self.last_pointer();
            self.update_cursor(pointer);
        }
        outcome
    }

    /// Wheel zooms with the zoom gesture (or plain wheel when the
    /// zoom-with-wheel preference flips that), otherwise scrolls. Shift swaps
    /// the scroll axes.
    fn default_wheel(&mut self, ev: &WheelEvent) -> InputOutcome {
        let gesture_zoom = self.gesture_for(None, ev.modifiers) == Some(Gesture::Zoom);
        if gesture_zoom != self.preferences().zoom_with_wheel {
            if ev.delta.y != 0 {
                self.zoom_steps(-ev.delta.y.signum(), ev.position, ZoomBehavior::Mouse);
            }
            return InputOutcome::Consumed;
        }
        let mut delta = Point::new(
            ev.delta.x.saturating_mul(WHEEL_SCROLL_STEP),
            ev.delta.y.saturating_mul(WHEEL_SCROLL_STEP),
        );
        if ev.modifiers.shift {
            delta = Point::new(delta.y, delta.x);
        }
        self.scroll_by(delta);
        InputOutcome::Consumed
    }

    fn default_key_down(&mut self, ev: &KeyEvent) -> InputOutcome {
        let behavior = self.preferences().zoom_behavior;
        let pointer = self.last_pointer();
        let vp = self.viewport();
        let step = Point::new(vp.w / KEY_SCROLL_DIVISOR, vp.h / KEY_SCROLL_DIVISOR);
        match ev.key {
            Key::Char('+') | Key::Char('=') => {
                self.zoom_steps(1, pointer, behavior);
            }
            Key::Char('-') => {
                self.zoom_steps(-1, pointer, behavior);
            }
            Key::Char('0') | Key::Char('1') => {
                self.set_zoom_anchored(Zoom::default(), pointer, behavior);
            }
            Key::Left => {
                self.scroll_by(Point::new(-step.x, 0));
            }
            Key::Right => {
                self.scroll_by(Point::new(step.x, 0));
            }
            Key::Up => {
                self.scroll_by(Point::new(0, -step.y));
            }
            Key::Down => {
                self.scroll_by(Point::new(0, step.y));
            }
            _ => return InputOutcome::Propagate,
        }
        InputOutcome::Consumed
    }
}
