//! Coordinate conversion between viewport and document space.
//!
//! Every tool and interaction state goes through [`ViewTransform`]; nothing
//! else in the crate re-derives the mapping formula.
//!
//! ```text
//! viewport = viewport.origin - scroll + padding + zoom.apply(document)
//! document = zoom.remove(viewport - viewport.origin + scroll - padding)
//! ```
//!
//! `padding` is the extra scrollable margin around the sprite (half the
//! viewport), so any document pixel can be brought to the viewport center.

use crate::types::{Point, Rect};
use crate::zoom::Zoom;

/// Snapshot of everything needed to map points between spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewTransform {
    pub zoom: Zoom,
    pub scroll: Point,
    pub padding: Point,
    /// Viewport bounds in screen space.
    pub viewport: Rect,
}

impl ViewTransform {
    #[inline]
    pub fn new(zoom: Zoom, scroll: Point, padding: Point, viewport: Rect) -> Self {
        Self {
            zoom,
            scroll,
            padding,
            viewport,
        }
    }

    /// Screen-space offset of the document origin.
    #[inline]
    fn origin(&self) -> Point {
        self.viewport.origin() - self.scroll + self.padding
    }

    /// Document point to viewport point.
    #[inline]
    pub fn to_viewport(&self, p: Point) -> Point {
        self.origin() + Point::new(self.zoom.apply(p.x), self.zoom.apply(p.y))
    }

    /// Viewport point to document point.
    #[inline]
    pub fn to_document(&self, p: Point) -> Point {
        let rel = p - self.origin();
        Point::new(self.zoom.remove(rel.x), self.zoom.remove(rel.y))
    }

    /// Sub-pixel document position of a viewport point.
    pub fn to_document_f64(&self, p: Point) -> (f64, f64) {
        let rel = p - self.origin();
        (
            self.zoom.remove_f64(rel.x as f64),
            self.zoom.remove_f64(rel.y as f64),
        )
    }

    /// Document rectangle to viewport rectangle, mapping both corners.
    pub fn rect_to_viewport(&self, r: Rect) -> Rect {
        Rect::from_corners(self.to_viewport(r.origin()), self.to_viewport(r.corner()))
    }

    /// Viewport rectangle to document rectangle, mapping both corners.
    pub fn rect_to_document(&self, r: Rect) -> Rect {
        Rect::from_corners(self.to_document(r.origin()), self.to_document(r.corner()))
    }

    /// Convert a screen delta (drag distance) to document units.
    #[inline]
    pub fn delta_to_document(&self, delta: Point) -> Point {
        Point::new(self.zoom.remove(delta.x), self.zoom.remove(delta.y))
    }

    /// Convert a document delta to screen units.
    #[inline]
    pub fn delta_to_viewport(&self, delta: Point) -> Point {
        Point::new(self.zoom.apply(delta.x), self.zoom.apply(delta.y))
    }
}
