//! Freehand/shape/fill strokes: feeds pointer positions into a tool loop.

use super::{CursorSpec, EditorState, EnterReason, LeaveReason, StateKind, StateValidity};
use crate::document::DocumentEvent;
use crate::editor::Editor;
use crate::input::events::{InputOutcome, Key, KeyEvent, MouseButton, MouseEvent};
use crate::tools::{ToolInfo, ToolKind, ToolLoop};
use crate::types::{AutoScroll, LayerId, Point, Rect};
use std::rc::Rc;
use tracing::{debug, warn};

pub struct DrawingState {
    tool: ToolInfo,
    press: MouseEvent,
    tool_loop: Option<Box<dyn ToolLoop>>,
    layer: Option<LayerId>,
    last_pos: Point,
}

impl DrawingState {
    pub fn new(tool: ToolInfo, press: MouseEvent) -> Self {
        Self {
            tool,
            press,
            tool_loop: None,
            layer: None,
            last_pos: Point::ZERO,
        }
    }

    pub fn tool(&self) -> &ToolInfo {
        &self.tool
    }

    fn dirty(editor: &mut Editor, area: Option<Rect>) {
        if let Some(area) = area {
            editor.invalidate_document_rect(area);
        }
    }

    fn start(&mut self, editor: &mut Editor) {
        if self.tool.kind.modifies_pixels() && !editor.can_draw() {
            editor.back_to_previous_state();
            return;
        }
        let button = self.press.button.unwrap_or(MouseButton::Left);
        let Some(site) = editor.tool_site(button) else {
            editor.back_to_previous_state();
            return;
        };
        let ink = editor.current_editor_ink();
        let tools = Rc::clone(&editor.services().tools);
        let Some(mut tool_loop) = tools.create_tool_loop(&self.tool, ink, site) else {
            warn!(editor = editor.id().0, tool = %self.tool.id, "tool has no loop for this site");
            editor.back_to_previous_state();
            return;
        };
        debug!(editor = editor.id().0, tool = %self.tool.id, ink = ?ink, "stroke started");
        let pos = editor.to_document(self.press.position);
        let area = tool_loop.press(pos);
        Self::dirty(editor, area);
        self.layer = Some(site.layer);
        self.last_pos = pos;
        self.tool_loop = Some(tool_loop);
    }
}

impl EditorState for DrawingState {
    fn kind(&self) -> StateKind {
        StateKind::Drawing
    }

    fn on_enter(&mut self, editor: &mut Editor, reason: EnterReason) {
        if reason == EnterReason::Fresh {
            self.start(editor);
        }
    }

    fn on_leave(&mut self, editor: &mut Editor, reason: LeaveReason) {
        if reason == LeaveReason::Suspended {
            return;
        }
        // Still holding a loop means the stroke never got its release.
        if let Some(mut tool_loop) = self.tool_loop.take() {
            debug!(editor = editor.id().0, reason = ?reason, "stroke cancelled");
            tool_loop.cancel();
            editor.invalidate_all();
        }
    }

    fn on_mouse_move(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        if self.tool_loop.is_none() {
            return InputOutcome::Consumed;
        }
        if editor.preferences().auto_scroll {
            editor.autoscroll(ev.position, AutoScroll::MouseDir);
        }
        let pos = editor.to_document(ev.position);
        if pos != self.last_pos {
            self.last_pos = pos;
            let area = self.tool_loop.as_mut().and_then(|l| l.drag(pos));
            Self::dirty(editor, area);
        }
        InputOutcome::Consumed
    }

    fn on_mouse_up(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        if let Some(mut tool_loop) = self.tool_loop.take() {
            let pos = editor.to_document(ev.position);
            let area = tool_loop.release(pos);
            Self::dirty(editor, area);
            debug!(editor = editor.id().0, tool = %self.tool.id, "stroke finished");
        }
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        if ev.key != Key::Escape {
            return InputOutcome::Propagate;
        }
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn on_document_event(&mut self, _editor: &mut Editor, ev: &DocumentEvent) -> StateValidity {
        match ev {
            DocumentEvent::LayerRemoved(id) | DocumentEvent::LayerChanged(id) if Some(*id) == self.layer => {
                StateValidity::Invalidated
            }
            _ => StateValidity::Valid,
        }
    }

    fn cursor(&self, _editor: &Editor, _pos: Point) -> Option<CursorSpec> {
        Some(match self.tool.kind {
            ToolKind::Eyedropper => CursorSpec::Crosshair,
            _ => CursorSpec::BrushPreview,
        })
    }
}
