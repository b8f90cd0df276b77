//! Tool selection as seen by the editor: quicktools, inks, selection mode,
//! cursor and status text.

use super::{Editor, EditorEvent};
use crate::input::events::{Modifiers, MouseButton};
use crate::error::{EditorError, EditorResult};
use crate::states::{state_ptr, CursorSpec, MovingPixelsState, StateKind};
use crate::tools::{Gesture, InkKind, ToolInfo, ToolKind, ToolSite};
use crate::types::{Point, Rect, SelectionMode};
use std::rc::Rc;
use tracing::trace;

impl Editor {
    /// The quicktool when one is held, otherwise the active tool.
    pub fn current_editor_tool(&self) -> ToolInfo {
        match &self.quicktool {
            Some(tool) => tool.clone(),
            None => self.services.tools.active_tool(),
        }
    }

    pub fn current_editor_ink(&self) -> InkKind {
        let tool = self.current_editor_tool();
        self.services.tools.ink_for(&tool, self.secondary_button)
    }

    pub fn quicktool(&self) -> Option<&ToolInfo> {
        self.quicktool.as_ref()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn is_auto_select_layer(&self) -> bool {
        self.auto_select_layer
    }

    /// Whether the gesture in progress uses the secondary (right) button.
    pub fn is_secondary_button(&self) -> bool {
        self.secondary_button
    }

    pub(crate) fn set_secondary_button(&mut self, button: Option<MouseButton>) {
        self.secondary_button = button == Some(MouseButton::Right);
    }

    pub fn gesture_for(&self, button: Option<MouseButton>, modifiers: Modifiers) -> Option<Gesture> {
        self.services.customization.gesture(button, modifiers)
    }

    /// Site handed to a tool loop for a press of `button`.
    pub fn tool_site(&self, button: MouseButton) -> Option<ToolSite> {
        Some(ToolSite {
            layer: self.layer?,
            frame: self.frame,
            button,
        })
    }

    /// Re-evaluate everything derived from held modifiers. The quicktool only
    /// changes while no gesture is running, so releasing space mid-pan
    /// doesn't swap the tool under the drag; the stack returning to its
    /// bottom state runs this again with the last modifiers seen.
    pub fn update_tool_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
        let customization = Rc::clone(&self.services.customization);
        self.selection_mode = customization.selection_mode(modifiers);
        self.auto_select_layer = customization.is_auto_select_layer(modifiers);

        if !self.history.is_at_bottom() {
            return;
        }
        let active = self.services.tools.active_tool();
        let quicktool = customization.quick_tool(modifiers, &active);
        if quicktool != self.quicktool {
            trace!(editor = self.id.0, tool = ?quicktool, "quicktool changed");
            self.quicktool = quicktool.clone();
            self.update_cursor(self.last_pointer);
            self.notify(EditorEvent::QuickToolChanged(quicktool));
        }
    }

    pub fn cursor(&self) -> CursorSpec {
        self.cursor
    }

    /// Document pixel the brush preview is drawn at.
    pub fn brush_preview(&self) -> Option<Point> {
        self.brush_preview
    }

    /// Ask the active state which cursor to show at `pos`, and move the
    /// brush preview along.
    pub fn update_cursor(&mut self, pos: Point) {
        let cursor = self
            .peek_state(|state, editor| state.cursor(editor, pos))
            .flatten()
            .unwrap_or_else(|| self.default_cursor(pos));
        self.cursor = cursor;

        let preview = (cursor == CursorSpec::BrushPreview
            && self.preferences.show_brush_preview
            && self.view.viewport.contains(pos))
        .then(|| self.to_document(pos));
        if preview != self.brush_preview {
            for old_or_new in [self.brush_preview, preview].into_iter().flatten() {
                self.invalidate_document_rect(Rect::new(old_or_new.x, old_or_new.y, 1, 1));
            }
            self.brush_preview = preview;
        }
    }

    fn default_cursor(&self, pos: Point) -> CursorSpec {
        if !self.view.viewport.contains(pos) {
            return CursorSpec::Arrow;
        }
        let tool = self.current_editor_tool();
        match tool.kind {
            ToolKind::Hand => CursorSpec::Hand,
            ToolKind::Zoom => CursorSpec::Zoom,
            ToolKind::Move => CursorSpec::Move,
            ToolKind::Selection | ToolKind::Eyedropper => CursorSpec::Crosshair,
            _ if tool.kind.modifies_pixels() && !self.can_draw() => CursorSpec::Forbidden,
            _ => CursorSpec::BrushPreview,
        }
    }

    /// Float the selected pixels, offset them by `delta` and keep them
    /// floating until committed. Returns `false` when there is no selection
    /// or a transformation is already running.
    pub fn start_selection_transformation(&mut self, delta: Point) -> EditorResult<bool> {
        self.ensure_drawable()?;
        let has_selection = self
            .with_document(|doc| doc.selection_bounds().is_some())
            .ok_or(EditorError::NoDocument)?;
        if !has_selection || self.state_kind() == StateKind::MovingPixels {
            return Ok(false);
        }
        self.push_state(state_ptr(MovingPixelsState::for_translation(delta)));
        Ok(true)
    }

    /// One-line description of the pointer position for a status bar.
    pub fn status_text(&self) -> String {
        let pos = self.to_document(self.last_pointer);
        let frames = self.with_document(|doc| doc.frame_count()).unwrap_or(0);
        format!(
            "Pos {} {}  Frame {}/{}  Zoom {}%",
            pos.x,
            pos.y,
            self.frame + 1,
            frames,
            self.view.zoom.percent().round()
        )
    }
}
