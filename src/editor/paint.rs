//! Invalidation and the paint pass.
//!
//! The editor never paints on its own: it records which screen areas are
//! stale and the toolkit calls [`Editor::paint`] for them. Small scrolls
//! record a [`ScrollBlit`] so the toolkit can move the pixels that are still
//! valid and only repaint the exposed strips.

use super::Editor;
use crate::constants::{
    FLASH_COLOR, GRID_COLOR, HANDLE_COLOR, MARCHING_ANTS_DASH, MASK_COLOR_A, MASK_COLOR_B, MIN_GRID_CELL_PX, OUTSIDE_COLOR,
};
use crate::input::coords::ViewTransform;
use crate::profile_scope;
use crate::render::{Graphics, RenderRequest};
use crate::types::{EditorFlags, Point, Rect};
use tracing::warn;

/// Pixels of `area` should move by `delta` before the invalidated strips
/// are repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBlit {
    pub area: Rect,
    pub delta: Point,
}

/// More pending rectangles than this collapse into their union.
const MAX_INVALID_RECTS: usize = 32;

impl Editor {
    /// Mark a screen area for repaint.
    pub fn invalidate(&mut self, rect: Rect) {
        let rect = rect.intersection(&self.view.viewport);
        if rect.is_empty() {
            return;
        }
        if self.invalidated.iter().any(|r| r.intersection(&rect) == rect) {
            return;
        }
        self.invalidated.push(rect);
        if self.invalidated.len() > MAX_INVALID_RECTS {
            let union = self.invalidated.iter().fold(Rect::default(), |acc, r| acc.union(r));
            self.invalidated = vec![union];
        }
    }

    /// Mark a document area for repaint.
    pub fn invalidate_document_rect(&mut self, rect: Rect) {
        // Partially covered screen pixels at zoom-out need the extra margin.
        let screen = self.view.rect_to_viewport(rect).enlarge(1);
        self.invalidate(screen);
    }

    pub fn invalidate_all(&mut self) {
        self.invalidated.clear();
        self.pending_blit = None;
        let viewport = self.view.viewport;
        if !viewport.is_empty() {
            self.invalidated.push(viewport);
        }
    }

    /// Screen areas needing repaint since the last call.
    pub fn take_invalidated(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.invalidated)
    }

    /// Pending pixel move from a scroll, if the toolkit can blit.
    pub fn take_scroll_blit(&mut self) -> Option<ScrollBlit> {
        self.pending_blit.take()
    }

    /// Record the repaint needed after scroll moved from `old` to `new`.
    pub(crate) fn invalidate_scroll(&mut self, old: Point, new: Point) {
        let vp = self.view.viewport;
        let d = new - old;
        if d.is_zero() || vp.is_empty() || self.invalidated.iter().any(|r| *r == vp) {
            return;
        }
        let total = self.pending_blit.map_or(Point::ZERO, |b| b.delta) - d;
        if total.x.abs() >= vp.w || total.y.abs() >= vp.h {
            self.invalidate_all();
            return;
        }
        // Stale areas travel with the pixels being blitted.
        let moved: Vec<Rect> = self
            .invalidated
            .drain(..)
            .map(|r| r.offset(-d).intersection(&vp))
            .filter(|r| !r.is_empty())
            .collect();
        self.invalidated = moved;
        self.pending_blit = Some(ScrollBlit { area: vp, delta: total });
        if d.x > 0 {
            self.invalidate(Rect::new(vp.right() - d.x, vp.y, d.x, vp.h));
        } else if d.x < 0 {
            self.invalidate(Rect::new(vp.x, vp.y, -d.x, vp.h));
        }
        if d.y > 0 {
            self.invalidate(Rect::new(vp.x, vp.bottom() - d.y, vp.w, d.y));
        } else if d.y < 0 {
            self.invalidate(Rect::new(vp.x, vp.y, vp.w, -d.y));
        }
    }

    /// Paint `area` (screen space) onto `g`.
    pub fn paint(&mut self, g: &mut dyn Graphics, area: Rect) {
        profile_scope!("editor_paint");
        let view = self.view;
        let area = area.intersection(&view.viewport);
        if area.is_empty() || self.destroyed {
            return;
        }
        g.set_clip(Some(area));

        let Some(doc) = self.document() else {
            g.fill_rect(area, OUTSIDE_COLOR);
            g.set_clip(None);
            return;
        };
        let decorations = self.flags.contains(EditorFlags::SHOW_DECORATORS);
        if decorations && let Some(decorator) = &self.decorator {
            decorator.pre_render(g, view.viewport);
        }

        {
            let Ok(doc) = doc.try_borrow() else {
                warn!(editor = self.id.0, "document busy; skipping paint");
                g.set_clip(None);
                return;
            };
            let sprite = doc.sprite_bounds();
            let sprite_screen = view.rect_to_viewport(sprite);

            if self.flags.contains(EditorFlags::SHOW_OUTSIDE) {
                for strip in subtract(area, sprite_screen) {
                    g.fill_rect(strip, OUTSIDE_COLOR);
                }
            }

            let visible = visible_document_area(&view, area).intersection(&sprite);
            if !visible.is_empty() {
                let request = RenderRequest {
                    layer: self.layer,
                    frame: self.frame,
                    area: visible,
                    zoom: view.zoom,
                    flags: self.flags,
                };
                let dst = view.to_viewport(visible.origin());
                self.services.render.render_with(&*doc, &request, |buffer| g.blit(dst, buffer));
            }

            if self.flags.contains(EditorFlags::SHOW_GRID) {
                self.paint_grid(g, visible, sprite_screen);
            }

            if self.flash_layer
                && let Some(layer) = self.layer
                && let Some(bounds) = doc.cel_bounds(layer, self.frame)
            {
                g.fill_rect(view.rect_to_viewport(bounds), FLASH_COLOR);
            }

            if self.flags.contains(EditorFlags::SHOW_MASK)
                && let Some(bounds) = doc.selection_bounds()
            {
                marching_ants(g, view.rect_to_viewport(bounds), self.mask_phase);
            }

            if let Some(p) = self.brush_preview {
                g.draw_rect(view.rect_to_viewport(Rect::new(p.x, p.y, 1, 1)), HANDLE_COLOR);
            }
        }
        self.flash_layer = false;

        self.peek_state(|state, editor| state.paint_decorations(editor, g));

        if decorations && let Some(decorator) = &self.decorator {
            decorator.post_render(g, view.viewport);
        }
        g.set_clip(None);
    }

    fn paint_grid(&self, g: &mut dyn Graphics, visible: Rect, sprite_screen: Rect) {
        let cell = self.preferences.grid_size;
        let view = self.view;
        if cell.is_empty()
            || visible.is_empty()
            || view.zoom.apply(cell.w) < MIN_GRID_CELL_PX
            || view.zoom.apply(cell.h) < MIN_GRID_CELL_PX
        {
            return;
        }
        let first_x = visible.x.div_euclid(cell.w) * cell.w;
        for x in (first_x..=visible.right()).step_by(cell.w as usize) {
            let sx = view.to_viewport(Point::new(x, 0)).x;
            g.draw_line(
                Point::new(sx, sprite_screen.y),
                Point::new(sx, sprite_screen.bottom() - 1),
                GRID_COLOR,
            );
        }
        let first_y = visible.y.div_euclid(cell.h) * cell.h;
        for y in (first_y..=visible.bottom()).step_by(cell.h as usize) {
            let sy = view.to_viewport(Point::new(0, y)).y;
            g.draw_line(
                Point::new(sprite_screen.x, sy),
                Point::new(sprite_screen.right() - 1, sy),
                GRID_COLOR,
            );
        }
    }
}

/// Document area covering every screen pixel of `area`, partial pixels
/// included.
fn visible_document_area(view: &ViewTransform, area: Rect) -> Rect {
    let top_left = view.to_document(area.origin());
    let bottom_right = view.to_document(area.corner() - Point::new(1, 1)) + Point::new(1, 1);
    Rect::from_corners(top_left, bottom_right)
}

/// Parts of `area` not covered by `hole`.
fn subtract(area: Rect, hole: Rect) -> Vec<Rect> {
    if !area.intersects(&hole) {
        return vec![area];
    }
    let i = area.intersection(&hole);
    [
        Rect::new(area.x, area.y, area.w, i.y - area.y),
        Rect::new(area.x, i.bottom(), area.w, area.bottom() - i.bottom()),
        Rect::new(area.x, i.y, i.x - area.x, i.h),
        Rect::new(i.right(), i.y, area.right() - i.right(), i.h),
    ]
    .into_iter()
    .filter(|r| !r.is_empty())
    .collect()
}

fn marching_ants(g: &mut dyn Graphics, rect: Rect, phase: u32) {
    if rect.is_empty() {
        return;
    }
    let (l, t) = (rect.x, rect.y);
    let (r, b) = (rect.right() - 1, rect.bottom() - 1);
    dashed_line(g, Point::new(l, t), Point::new(r, t), phase);
    dashed_line(g, Point::new(r, t), Point::new(r, b), phase);
    dashed_line(g, Point::new(r, b), Point::new(l, b), phase);
    dashed_line(g, Point::new(l, b), Point::new(l, t), phase);
}

/// Axis-aligned line alternating the two mask colors every dash.
fn dashed_line(g: &mut dyn Graphics, from: Point, to: Point, phase: u32) {
    let dash = MARCHING_ANTS_DASH as i32;
    let phase = phase as i32 % (dash * 2);
    let dir = Point::new((to.x - from.x).signum(), (to.y - from.y).signum());
    let len = (to.x - from.x).abs().max((to.y - from.y).abs()) + 1;
    let at = |i: i32| Point::new(from.x + dir.x * i, from.y + dir.y * i);
    let mut i = 0;
    while i < len {
        let offset = i + phase;
        let end = (i + dash - offset % dash).min(len);
        let color = if (offset / dash) % 2 == 0 { MASK_COLOR_A } else { MASK_COLOR_B };
        g.draw_line(at(i), at(end - 1), color);
        i = end;
    }
}
