//! Reacting to document changes made elsewhere.
//!
//! The active state sees every event first; if it depended on something the
//! event removed it reports [`StateValidity::Invalidated`] and the editor
//! cancels back to the bottom state. The editor then re-synchronizes its own
//! site (layer, frame) and schedules repaints.

use super::Editor;
use crate::document::DocumentEvent;
use crate::states::StateValidity;
use tracing::{debug, info};

impl Editor {
    pub fn on_document_event(&mut self, event: &DocumentEvent) {
        if self.destroyed {
            return;
        }
        if matches!(event, DocumentEvent::Destroyed) || self.document().is_none() {
            info!(editor = self.id.0, "document closed under the editor");
            self.destroy();
            return;
        }

        let validity = self.dispatch(StateValidity::Valid, |state, editor| state.on_document_event(editor, event));
        if validity == StateValidity::Invalidated {
            debug!(editor = self.id.0, event = ?event, "active state invalidated by document change");
            self.cancel_interaction();
        }

        match event {
            DocumentEvent::LayerRemoved(id) => {
                if self.layer == Some(*id) {
                    self.fall_back_to_nearest_layer();
                } else {
                    self.sync_layer_index();
                }
                self.invalidate_all();
            }
            DocumentEvent::LayerAdded(_) => self.sync_layer_index(),
            DocumentEvent::LayerChanged(id) => {
                if self.layer == Some(*id) {
                    self.update_cursor(self.last_pointer);
                }
                self.invalidate_all();
            }
            DocumentEvent::FrameAdded(_) | DocumentEvent::FrameRemoved(_) => {
                self.clamp_frame();
                self.invalidate_all();
            }
            DocumentEvent::FrameDurationChanged(_) => {}
            DocumentEvent::CelChanged { frame, bounds, .. } => {
                if *frame == self.frame {
                    self.invalidate_document_rect(*bounds);
                }
            }
            DocumentEvent::PixelsChanged(bounds) => self.invalidate_document_rect(*bounds),
            DocumentEvent::SpriteSizeChanged => {
                let scroll = self.view.scroll;
                self.set_editor_scroll(scroll);
                self.invalidate_all();
            }
            DocumentEvent::SelectionChanged => {
                self.last_mask_step = self.now();
                self.invalidate_all();
            }
            DocumentEvent::Destroyed => {}
        }
    }

    /// The active layer is gone: take the one below its old position, or the
    /// new bottom layer, or none.
    fn fall_back_to_nearest_layer(&mut self) {
        let layers = self.with_document(|doc| doc.layers()).unwrap_or_default();
        if layers.is_empty() {
            self.layer_index = 0;
            self.apply_layer(None);
            return;
        }
        let index = self.layer_index.saturating_sub(1).min(layers.len() - 1);
        self.layer_index = index;
        info!(editor = self.id.0, layer = ?layers[index], "active layer removed; falling back");
        self.apply_layer(Some(layers[index]));
    }

    fn sync_layer_index(&mut self) {
        let Some(layer) = self.layer else {
            return;
        };
        if let Some(Some(index)) = self.with_document(|doc| doc.layers().iter().position(|l| *l == layer)) {
            self.layer_index = index;
        }
    }

    fn clamp_frame(&mut self) {
        let Some(count) = self.with_document(|doc| doc.frame_count()) else {
            return;
        };
        let last = count.saturating_sub(1);
        if self.frame > last {
            debug!(editor = self.id.0, frame = self.frame, last, "active frame removed; clamping");
            self.show_frame(last);
        }
    }
}
