//! The default state: routes presses to the state the effective tool needs.

use super::{
    state_ptr, CursorSpec, DrawingState, EditorState, MovingPixelsState, ScrollingState, SelectingState, StateKind,
    ZoomingState,
};
use crate::constants::{HANDLE_COLOR, HANDLE_SIZE};
use crate::document::Handle;
use crate::editor::Editor;
use crate::input::events::{InputOutcome, MouseEvent};
use crate::render::Graphics;
use crate::tools::{Gesture, ToolKind};
use crate::types::{Point, Rect};
use tracing::debug;

#[derive(Debug, Default)]
pub struct StandbyState;

impl StandbyState {
    pub fn new() -> Self {
        Self
    }
}

/// Screen bounds of the selection, when the tool shows transform handles.
fn handle_bounds(editor: &Editor) -> Option<Rect> {
    let tool = editor.current_editor_tool();
    if !matches!(tool.kind, ToolKind::Selection | ToolKind::Move) {
        return None;
    }
    let bounds = editor.with_document(|doc| doc.selection_bounds()).flatten()?;
    Some(editor.view().rect_to_viewport(bounds))
}

impl EditorState for StandbyState {
    fn kind(&self) -> StateKind {
        StateKind::Standby
    }

    fn on_mouse_down(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        let Some(button) = ev.button else {
            return InputOutcome::Propagate;
        };
        if !editor.viewport().contains(ev.position) {
            return InputOutcome::Propagate;
        }

        match editor.gesture_for(Some(button), ev.modifiers) {
            Some(Gesture::Pan) => {
                editor.push_state(state_ptr(ScrollingState::new(ev.position)));
                return InputOutcome::Consumed;
            }
            Some(Gesture::Zoom) => {
                editor.push_state(state_ptr(ZoomingState::new(ev.position, button)));
                return InputOutcome::Consumed;
            }
            // The registry picks the eraser ink for the secondary button.
            Some(Gesture::Erase) | None => {}
        }

        let tool = editor.current_editor_tool();
        match tool.kind {
            ToolKind::Hand => editor.push_state(state_ptr(ScrollingState::new(ev.position))),
            ToolKind::Zoom => editor.push_state(state_ptr(ZoomingState::new(ev.position, button))),
            ToolKind::Selection => editor.push_state(state_ptr(SelectingState::new(*ev))),
            ToolKind::Move => {
                if let Some(reason) = editor.draw_refusal() {
                    debug!(editor = editor.id().0, %reason, "move refused");
                    return InputOutcome::Consumed;
                }
                let handle = handle_bounds(editor).and_then(|b| Handle::hit_test(b, ev.position, HANDLE_SIZE));
                editor.push_state(state_ptr(MovingPixelsState::for_drag(*ev, handle)));
            }
            _ => {
                if tool.kind.modifies_pixels()
                    && let Some(reason) = editor.draw_refusal()
                {
                    debug!(editor = editor.id().0, tool = %tool.id, %reason, "drawing refused");
                    return InputOutcome::Consumed;
                }
                editor.push_state(state_ptr(DrawingState::new(tool, *ev)));
            }
        }
        InputOutcome::Consumed
    }

    fn cursor(&self, editor: &Editor, pos: Point) -> Option<CursorSpec> {
        let bounds = handle_bounds(editor)?;
        if let Some(handle) = Handle::hit_test(bounds, pos, HANDLE_SIZE) {
            Some(CursorSpec::SizeHandle(handle))
        } else if bounds.contains(pos) && editor.is_inside_selection(pos) {
            Some(CursorSpec::Move)
        } else {
            None
        }
    }

    fn paint_decorations(&self, editor: &Editor, g: &mut dyn Graphics) {
        let Some(bounds) = handle_bounds(editor) else {
            return;
        };
        for handle in Handle::ALL {
            g.draw_rect(handle.rect(bounds, HANDLE_SIZE), HANDLE_COLOR);
        }
    }
}
