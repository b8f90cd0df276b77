//! Keeping the editor in sync with changes made to the document elsewhere.

use crate::helpers::{image_layer, observe, TestEditor, TestEditorBuilder};
use editor_canvas::document::DocumentEvent;
use editor_canvas::editor::EditorEvent;
use editor_canvas::error::DrawRefusal;
use editor_canvas::types::{LayerId, Point, Rect, Size};

fn with_layers(t: &mut TestEditor, ids: &[u32]) {
    for id in ids {
        t.doc
            .borrow_mut()
            .layers
            .push((LayerId(*id), image_layer(&format!("Layer {id}"))));
        t.editor.on_document_event(&DocumentEvent::LayerAdded(LayerId(*id)));
    }
}

fn remove_layer(t: &mut TestEditor, id: u32) {
    t.doc.borrow_mut().remove_layer(LayerId(id));
    t.editor.on_document_event(&DocumentEvent::LayerRemoved(LayerId(id)));
}

#[test]
fn test_frame_removal_clamps_active_frame() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor.set_frame(2).unwrap();
    let observer = observe(&mut t.editor);

    t.doc.borrow_mut().durations.truncate(2);
    t.editor.on_document_event(&DocumentEvent::FrameRemoved(2));

    assert_eq!(t.editor.frame(), 1);
    assert_eq!(observer.take(), vec![EditorEvent::FrameChanged(1)]);
}

#[test]
fn test_destroyed_event_shuts_editor_down() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);

    t.editor.on_document_event(&DocumentEvent::Destroyed);

    assert!(t.editor.is_destroyed());
    assert_eq!(observer.take().last(), Some(&EditorEvent::Destroyed));
    // Later events are ignored.
    t.editor.on_document_event(&DocumentEvent::SpriteSizeChanged);
    assert!(t.editor.take_invalidated().is_empty());
}

#[test]
fn test_cel_change_repaints_only_current_frame() {
    let mut t = TestEditorBuilder::new().frames(3).build();
    t.editor.take_invalidated();

    t.editor.on_document_event(&DocumentEvent::CelChanged {
        layer: LayerId(1),
        frame: 1,
        bounds: Rect::new(0, 0, 8, 8),
    });
    assert!(t.editor.take_invalidated().is_empty());

    t.editor.on_document_event(&DocumentEvent::CelChanged {
        layer: LayerId(1),
        frame: 0,
        bounds: Rect::new(0, 0, 8, 8),
    });
    let dirty = t.editor.take_invalidated();
    assert_eq!(dirty.len(), 1);
    assert!(dirty[0].contains(Point::new(272, 172)));
    assert!(dirty[0].contains(Point::new(279, 179)));
}

#[test]
fn test_sprite_resize_reclamps_scroll() {
    let mut t = TestEditorBuilder::new().build();
    assert_eq!(t.editor.scroll(), Point::new(128, 128));

    t.doc.borrow_mut().size = Size::new(64, 64);
    t.editor.on_document_event(&DocumentEvent::SpriteSizeChanged);

    assert_eq!(t.editor.scroll(), Point::new(64, 64));
}

#[test]
fn test_removing_last_layer_leaves_no_layer() {
    let mut t = TestEditorBuilder::new().build();
    let observer = observe(&mut t.editor);

    remove_layer(&mut t, 1);

    assert_eq!(t.editor.layer(), None);
    assert_eq!(t.editor.draw_refusal(), Some(DrawRefusal::NoLayer));
    assert_eq!(observer.take(), vec![EditorEvent::LayerChanged(None)]);
}

#[test]
fn test_removed_layer_falls_back_to_layer_below() {
    let mut t = TestEditorBuilder::new().build();
    with_layers(&mut t, &[2, 3]);

    t.editor.set_layer(Some(LayerId(3))).unwrap();
    remove_layer(&mut t, 3);
    assert_eq!(t.editor.layer(), Some(LayerId(2)));

    // Bottom layer removed: the new bottom takes over.
    t.editor.set_layer(Some(LayerId(1))).unwrap();
    remove_layer(&mut t, 1);
    assert_eq!(t.editor.layer(), Some(LayerId(2)));
}

#[test]
fn test_removing_other_layer_keeps_active_one() {
    let mut t = TestEditorBuilder::new().build();
    with_layers(&mut t, &[2, 3]);
    t.editor.set_layer(Some(LayerId(3))).unwrap();

    remove_layer(&mut t, 1);
    remove_layer(&mut t, 2);

    assert_eq!(t.editor.layer(), Some(LayerId(3)));
    assert!(t.editor.can_draw());
}

#[test]
fn test_pixels_changed_schedules_repaint() {
    let mut t = TestEditorBuilder::new().build();
    t.editor.take_invalidated();

    t.editor.on_document_event(&DocumentEvent::PixelsChanged(Rect::new(10, 10, 4, 4)));

    let dirty = t.editor.take_invalidated();
    assert_eq!(dirty.len(), 1);
    assert!(dirty[0].contains(Point::new(282, 182)));
}
