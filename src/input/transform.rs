//! View transformations - scroll, zoom, coordinate conversion.
//!
//! Scroll is the screen offset of the padded document: `(0, 0)` shows the
//! top-left padding corner. It is always clamped to
//! `[0, zoom(sprite) + 2 * padding - viewport]` per axis.

use crate::editor::{Editor, EditorEvent};
use crate::input::autoscroll::compute_autoscroll;
use crate::input::coords::ViewTransform;
use crate::types::{AutoScroll, Point, Rect, Size, ZoomBehavior};
use crate::zoom::Zoom;
use tracing::{debug, trace};

fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Largest scroll offset on one axis.
fn max_scroll_axis(zoom: Zoom, sprite: i32, padding: i32, viewport: i32) -> i32 {
    let span = i64::from(zoom.apply(sprite)) + 2 * i64::from(padding) - i64::from(viewport);
    saturate(span.max(0))
}

impl Editor {
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn zoom(&self) -> Zoom {
        self.view.zoom
    }

    pub fn scroll(&self) -> Point {
        self.view.scroll
    }

    pub fn padding(&self) -> Point {
        self.view.padding
    }

    pub fn viewport(&self) -> Rect {
        self.view.viewport
    }

    /// Viewport (screen) point to document point.
    pub fn to_document(&self, p: Point) -> Point {
        self.view.to_document(p)
    }

    /// Document point to viewport (screen) point.
    pub fn to_viewport(&self, p: Point) -> Point {
        self.view.to_viewport(p)
    }

    fn sprite_size(&self) -> Size {
        self.with_document(|doc| doc.sprite_size()).unwrap_or_default()
    }

    pub fn max_scroll(&self) -> Point {
        let sprite = self.sprite_size();
        let v = &self.view;
        Point::new(
            max_scroll_axis(v.zoom, sprite.w, v.padding.x, v.viewport.w),
            max_scroll_axis(v.zoom, sprite.h, v.padding.y, v.viewport.h),
        )
    }

    fn clamp_scroll(&self, scroll: Point) -> Point {
        let max = self.max_scroll();
        Point::new(scroll.x.clamp(0, max.x), scroll.y.clamp(0, max.y))
    }

    /// Set the scroll offset (clamped). Returns whether it changed.
    pub fn set_editor_scroll(&mut self, scroll: Point) -> bool {
        let scroll = self.clamp_scroll(scroll);
        let old = self.view.scroll;
        if scroll == old {
            return false;
        }
        self.view.scroll = scroll;
        trace!(editor = self.id().0, x = scroll.x, y = scroll.y, "scroll changed");
        self.invalidate_scroll(old, scroll);
        self.notify(EditorEvent::ScrollChanged(scroll));
        self.view_changed();
        true
    }

    pub fn scroll_by(&mut self, delta: Point) -> bool {
        let target = self.view.scroll + delta;
        self.set_editor_scroll(target)
    }

    /// Let the active state react to a zoom/scroll change made from outside
    /// its own callbacks.
    fn view_changed(&mut self) {
        if self.in_dispatch() {
            return;
        }
        self.dispatch((), |state, editor| state.on_view_changed(editor));
        let pointer = self.last_pointer();
        self.update_cursor(pointer);
    }

    /// Set the raw zoom level. The scroll offset is kept, apart from
    /// re-clamping it to the new limits; callers that want a fixed point
    /// use [`Editor::set_zoom_anchored`] or [`Editor::zoom_to`].
    pub fn set_zoom(&mut self, zoom: Zoom) -> bool {
        let old = self.view.zoom;
        if zoom == old {
            return false;
        }
        self.view.zoom = zoom;
        debug!(editor = self.id().0, from = old.percent(), to = zoom.percent(), "zoom set");
        self.invalidate_all();
        self.notify(EditorEvent::ZoomChanged(zoom));
        let scroll = self.view.scroll;
        if !self.set_editor_scroll(scroll) {
            self.view_changed();
        }
        true
    }

    /// Change zoom keeping the point chosen by the zoom-behavior preference
    /// fixed (viewport center, or the last pointer position).
    pub fn zoom_to(&mut self, zoom: Zoom) -> bool {
        let behavior = self.preferences().zoom_behavior;
        let anchor = self.last_pointer();
        self.set_zoom_anchored(zoom, anchor, behavior)
    }

    /// Change zoom so the document point under `anchor` (or the viewport
    /// center for [`ZoomBehavior::Center`]) stays where it is on screen.
    ///
    /// The solved scroll is still clamped: near the padding edges (an anchor
    /// far outside the sprite) the point drifts toward the sprite instead.
    pub fn set_zoom_anchored(&mut self, zoom: Zoom, anchor: Point, behavior: ZoomBehavior) -> bool {
        let old = self.view;
        if zoom == old.zoom {
            return false;
        }
        let anchor = match behavior {
            ZoomBehavior::Center => old.viewport.center(),
            ZoomBehavior::Mouse => anchor,
        };
        let (doc_x, doc_y) = old.to_document_f64(anchor);

        self.view.zoom = zoom;
        let scroll_for = |doc: f64, anchor: i32, origin: i32, padding: i32| -> i32 {
            let scaled = (doc * zoom.scale()).floor();
            saturate(i64::from(origin) + i64::from(padding) + scaled as i64 - i64::from(anchor))
        };
        let scroll = Point::new(
            scroll_for(doc_x, anchor.x, old.viewport.x, old.padding.x),
            scroll_for(doc_y, anchor.y, old.viewport.y, old.padding.y),
        );
        debug!(
            editor = self.id().0,
            from = old.zoom.percent(),
            to = zoom.percent(),
            anchor_x = anchor.x,
            anchor_y = anchor.y,
            "zoom changed"
        );
        self.invalidate_all();
        self.notify(EditorEvent::ZoomChanged(zoom));
        if !self.set_editor_scroll(scroll) {
            self.view_changed();
        }
        true
    }

    /// Move `steps` zoom levels (positive zooms in).
    pub fn zoom_steps(&mut self, steps: i32, anchor: Point, behavior: ZoomBehavior) -> bool {
        let zoom = self.view.zoom.step(steps);
        self.set_zoom_anchored(zoom, anchor, behavior)
    }

    /// Scroll so document pixel `p` sits at the viewport center.
    pub fn center_in_document_point(&mut self, p: Point) -> bool {
        let v = self.view;
        let half_pixel = v.zoom.apply(1) / 2;
        let scroll = Point::new(
            v.padding.x - v.viewport.w / 2 + half_pixel + v.zoom.apply(p.x),
            v.padding.y - v.viewport.h / 2 + half_pixel + v.zoom.apply(p.y),
        );
        self.set_editor_scroll(scroll)
    }

    /// Center the selection if there is one, the whole sprite otherwise.
    pub fn set_default_scroll(&mut self) {
        let target = self
            .with_document(|doc| doc.selection_bounds().unwrap_or_else(|| doc.sprite_bounds()))
            .unwrap_or_default();
        self.center_in_document_point(target.center());
    }

    /// Document area currently visible, limited to the sprite.
    pub fn visible_sprite_bounds(&self) -> Rect {
        let sprite = self.with_document(|doc| doc.sprite_bounds()).unwrap_or_default();
        self.view.rect_to_document(self.view.viewport).intersection(&sprite)
    }

    /// The widget moved or changed size. Keeps the document point at the
    /// viewport center; the first non-empty size gets the default scroll.
    pub fn resize(&mut self, viewport: Rect) {
        let old = self.view;
        if viewport == old.viewport {
            return;
        }
        let center = (!old.viewport.is_empty()).then(|| old.to_document(old.viewport.center()));
        self.view.viewport = viewport;
        self.view.padding = Point::new(viewport.w.max(0) / 2, viewport.h.max(0) / 2);
        debug!(editor = self.id().0, w = viewport.w, h = viewport.h, "editor resized");
        self.invalidate_all();
        if viewport.is_empty() {
            return;
        }
        match center {
            Some(p) => {
                self.center_in_document_point(p);
            }
            None => self.set_default_scroll(),
        }
    }

    /// Scroll while a drag at `pointer` is outside the viewport. Returns the
    /// scroll delta actually applied.
    pub fn autoscroll(&mut self, pointer: Point, mode: AutoScroll) -> Point {
        let delta = compute_autoscroll(pointer, self.last_pointer(), self.view.viewport, mode);
        if delta.is_zero() {
            return Point::ZERO;
        }
        let before = self.view.scroll;
        self.scroll_by(delta);
        self.view.scroll - before
    }
}
