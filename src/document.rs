//! Document collaborator interface.
//!
//! The editor never owns the document: it keeps a weak handle and queries it
//! through [`Document`]. Changes made elsewhere reach the editor as
//! [`DocumentEvent`]s.

use crate::types::{Frame, LayerId, Point, Rect, SelectionMode, Size};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a document, as owned by the application.
pub type DocumentRef = Rc<RefCell<dyn Document>>;

/// Frame timing queries used by animation playback.
pub trait FrameTimeline {
    fn frame_count(&self) -> Frame;
    /// Duration of `frame` in milliseconds.
    fn frame_duration_ms(&self, frame: Frame) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Image,
    Background,
    Group,
    /// Reference layers are shown but never drawn on.
    Reference,
}

impl LayerKind {
    pub fn is_image(&self) -> bool {
        matches!(self, LayerKind::Image | LayerKind::Background)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    pub editable: bool,
}

/// One of the eight scale handles around a transformed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    /// Anchor of this handle on `bounds` (screen space).
    pub fn anchor(&self, bounds: Rect) -> Point {
        let (l, t) = (bounds.x, bounds.y);
        let (r, b) = (bounds.right(), bounds.bottom());
        let (cx, cy) = (bounds.center().x, bounds.center().y);
        match self {
            Handle::TopLeft => Point::new(l, t),
            Handle::Top => Point::new(cx, t),
            Handle::TopRight => Point::new(r, t),
            Handle::Right => Point::new(r, cy),
            Handle::BottomRight => Point::new(r, b),
            Handle::Bottom => Point::new(cx, b),
            Handle::BottomLeft => Point::new(l, b),
            Handle::Left => Point::new(l, cy),
        }
    }

    /// Screen rectangle of the handle square for `bounds`.
    pub fn rect(&self, bounds: Rect, size: i32) -> Rect {
        let a = self.anchor(bounds);
        Rect::new(a.x - size / 2, a.y - size / 2, size, size)
    }

    /// Handle under `pos`, if any.
    pub fn hit_test(bounds: Rect, pos: Point, size: i32) -> Option<Handle> {
        Handle::ALL
            .into_iter()
            .find(|h| h.rect(bounds, size).enlarge(1).contains(pos))
    }
}

/// Interactive translate/scale of floating selection pixels, implemented by
/// the pixel model. All coordinates are in document space.
pub trait PixelsMovement {
    /// Start dragging from `pos`, by `handle` (scale) or by the body (move).
    fn catch_at(&mut self, pos: Point, handle: Option<Handle>);
    /// Continue the drag. `constrain` keeps aspect ratio / axis. Returns the
    /// new bounds of the floating pixels.
    fn move_to(&mut self, pos: Point, constrain: bool) -> Rect;
    /// Offset the floating pixels without a drag.
    fn translate(&mut self, delta: Point) -> Rect;
    fn bounds(&self) -> Rect;
    /// Stamp the floating pixels onto the layer.
    fn drop_pixels(&mut self);
    /// Put everything back where it was.
    fn discard(&mut self);
}

/// Read-mostly queries against the document, sprite and selection.
pub trait Document: FrameTimeline {
    fn sprite_size(&self) -> Size;

    fn sprite_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.sprite_size())
    }

    /// Layers bottom to top.
    fn layers(&self) -> Vec<LayerId>;

    fn layer_info(&self, layer: LayerId) -> Option<LayerInfo>;

    /// Bounds of the cel at `(layer, frame)`, if one exists.
    fn cel_bounds(&self, layer: LayerId, frame: Frame) -> Option<Rect>;

    /// Bounds of the active selection mask, `None` when nothing is selected.
    fn selection_bounds(&self) -> Option<Rect>;

    fn selection_contains(&self, p: Point) -> bool;

    /// Combine `rect` with the selection mask.
    fn select(&mut self, rect: Rect, mode: SelectionMode);

    /// Lift the selected pixels of `(layer, frame)` into a floating movement.
    fn begin_pixels_movement(&mut self, layer: LayerId, frame: Frame) -> Option<Box<dyn PixelsMovement>>;
}

/// Change notifications from the document to every editor viewing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    LayerAdded(LayerId),
    LayerRemoved(LayerId),
    /// Visibility, lock state or kind of a layer changed.
    LayerChanged(LayerId),
    FrameAdded(Frame),
    FrameRemoved(Frame),
    FrameDurationChanged(Frame),
    CelChanged { layer: LayerId, frame: Frame, bounds: Rect },
    /// Pixels in `bounds` (document space) changed on the current frame.
    PixelsChanged(Rect),
    SpriteSizeChanged,
    SelectionChanged,
    /// The document is being closed; every editor on it must shut down.
    Destroyed,
}
