//! Active layer and frame, and whether the current site can be drawn on.

use super::{Editor, EditorEvent};
use crate::error::{DrawRefusal, EditorError, EditorResult};
use crate::types::{EditorId, Frame, LayerId, Point};
use tracing::debug;

/// The editing context tools operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub editor: EditorId,
    pub layer: Option<LayerId>,
    pub frame: Frame,
}

impl Editor {
    pub fn site(&self) -> Site {
        Site {
            editor: self.id,
            layer: self.layer,
            frame: self.frame,
        }
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Make `layer` active. `None` clears the active layer.
    pub fn set_layer(&mut self, layer: Option<LayerId>) -> EditorResult<()> {
        let layers = self.with_document(|doc| doc.layers()).ok_or(EditorError::NoDocument)?;
        let index = match layer {
            Some(id) => layers
                .iter()
                .position(|l| *l == id)
                .ok_or(EditorError::UnknownLayer(id))?,
            None => self.layer_index,
        };
        self.layer_index = index;
        self.apply_layer(layer);
        Ok(())
    }

    pub(crate) fn apply_layer(&mut self, layer: Option<LayerId>) {
        if self.layer == layer {
            return;
        }
        debug!(editor = self.id.0, layer = ?layer, "active layer changed");
        self.layer = layer;
        self.invalidate_all();
        self.update_cursor(self.last_pointer);
        self.notify(EditorEvent::LayerChanged(layer));
    }

    /// Show `frame`. Stops playback first so the player doesn't jump back.
    pub fn set_frame(&mut self, frame: Frame) -> EditorResult<()> {
        let count = self.with_document(|doc| doc.frame_count()).ok_or(EditorError::NoDocument)?;
        if frame >= count {
            return Err(EditorError::FrameOutOfRange { frame, count });
        }
        if self.is_playing() {
            self.stop();
        }
        self.show_frame(frame);
        Ok(())
    }

    /// Change the frame without validation or stopping playback.
    pub(crate) fn show_frame(&mut self, frame: Frame) {
        if self.frame == frame {
            return;
        }
        self.frame = frame;
        self.invalidate_all();
        self.notify(EditorEvent::FrameChanged(frame));
    }

    /// Why the active layer/frame can't be drawn on, or `None` when it can.
    pub fn draw_refusal(&self) -> Option<DrawRefusal> {
        let Some(layer) = self.layer else {
            return Some(if self.document().is_some() {
                DrawRefusal::NoLayer
            } else {
                DrawRefusal::NoDocument
            });
        };
        let frame = self.frame;
        self.with_document(|doc| {
            let Some(info) = doc.layer_info(layer) else {
                return Some(DrawRefusal::NoLayer);
            };
            if !info.visible {
                Some(DrawRefusal::LayerHidden)
            } else if !info.editable {
                Some(DrawRefusal::LayerLocked)
            } else if !info.kind.is_image() {
                Some(DrawRefusal::NotImageLayer)
            } else if frame >= doc.frame_count() {
                Some(DrawRefusal::FrameOutOfRange)
            } else {
                None
            }
        })
        .unwrap_or(Some(DrawRefusal::NoDocument))
    }

    /// Whether drawing tools may modify the active layer/frame.
    pub fn can_draw(&self) -> bool {
        self.draw_refusal().is_none()
    }

    pub fn ensure_drawable(&self) -> EditorResult<()> {
        match self.draw_refusal() {
            None => Ok(()),
            Some(reason) => Err(EditorError::NotDrawable(reason)),
        }
    }

    /// Whether the viewport point lies on the selection mask.
    pub fn is_inside_selection(&self, pos: Point) -> bool {
        let doc_pos = self.to_document(pos);
        self.with_document(|doc| doc.selection_bounds().is_some() && doc.selection_contains(doc_pos))
            .unwrap_or(false)
    }

    /// Highlight the active cel on the next paint.
    pub fn flash_current_layer(&mut self) {
        let Some(layer) = self.layer else {
            return;
        };
        let frame = self.frame;
        if let Some(Some(bounds)) = self.with_document(|doc| doc.cel_bounds(layer, frame)) {
            self.flash_layer = true;
            self.invalidate_document_rect(bounds);
        }
    }
}
