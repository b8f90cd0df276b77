//! Rendering collaborators.
//!
//! The compositing engine and the paint surface are external. The editor owns
//! neither: a [`RenderContext`] created by the application root is injected
//! into every editor and reset once at shutdown.

use crate::document::Document;
use crate::types::{EditorFlags, Frame, LayerId, Point, Rect};
use crate::zoom::Zoom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 0xAARRGGBB color.
pub type Color = u32;

/// Pixel buffer the renderer composites into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let mut buffer = Self::default();
        buffer.resize(width, height);
        buffer
    }

    /// Resize, reusing the allocation when it is already large enough.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        let len = self.width as usize * self.height as usize;
        self.pixels.resize(len, 0);
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn capacity(&self) -> usize {
        self.pixels.capacity()
    }

    fn release(&mut self) {
        self.width = 0;
        self.height = 0;
        self.pixels = Vec::new();
    }
}

/// What the renderer should composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub layer: Option<LayerId>,
    pub frame: Frame,
    /// Area in document space.
    pub area: Rect,
    pub zoom: Zoom,
    /// Onionskin and similar renderer-side aids are read from here.
    pub flags: EditorFlags,
}

/// Compositing engine. Fills `dst` (already sized to `zoom.apply(area)`).
pub trait Renderer {
    fn render(&mut self, document: &dyn Document, request: &RenderRequest, dst: &mut ImageBuffer);
}

/// Rendering engine plus the scratch buffer shared by every editor.
pub struct RenderContext {
    renderer: RefCell<Box<dyn Renderer>>,
    buffer: RefCell<ImageBuffer>,
    shut_down: Cell<bool>,
}

impl RenderContext {
    pub fn new(renderer: Box<dyn Renderer>) -> Rc<Self> {
        Rc::new(Self {
            renderer: RefCell::new(renderer),
            buffer: RefCell::new(ImageBuffer::default()),
            shut_down: Cell::new(false),
        })
    }

    /// Render `request` into the shared buffer and hand it to `consume`.
    /// Returns `false` after shutdown or on re-entrant use.
    pub fn render_with(
        &self,
        document: &dyn Document,
        request: &RenderRequest,
        consume: impl FnOnce(&ImageBuffer),
    ) -> bool {
        if self.shut_down.get() {
            return false;
        }
        let (Ok(mut renderer), Ok(mut buffer)) = (self.renderer.try_borrow_mut(), self.buffer.try_borrow_mut())
        else {
            tracing::warn!("render context busy; skipping nested render");
            return false;
        };
        buffer.resize(request.zoom.apply(request.area.w), request.zoom.apply(request.area.h));
        renderer.render(document, request, &mut buffer);
        consume(&buffer);
        true
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer.borrow().capacity()
    }

    /// Release the shared buffer. Called once by the application at exit.
    pub fn reset(&self) {
        if let Ok(mut buffer) = self.buffer.try_borrow_mut() {
            buffer.release();
        }
        self.shut_down.set(true);
        tracing::debug!("render context reset");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.get()
    }
}

/// Paint surface supplied by the toolkit for one paint pass, in screen space.
pub trait Graphics {
    /// Restrict drawing to `clip` (`None` clears the clip).
    fn set_clip(&mut self, clip: Option<Rect>);
    fn blit(&mut self, dst: Point, image: &ImageBuffer);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Point, to: Point, color: Color);
}

/// Extra UI drawn around the sprite (symmetry guides, slices, ...).
pub trait EditorDecorator {
    fn pre_render(&self, g: &mut dyn Graphics, viewport: Rect) {
        let _ = (g, viewport);
    }
    fn post_render(&self, g: &mut dyn Graphics, viewport: Rect);
}
