//! Autoscroll - scrolling the view while a drag leaves the viewport.
//!
//! [`compute_autoscroll`] is pure: it only reports the scroll delta to apply.
//! Interaction states call it once per pointer event while dragging and feed
//! the result to the view controller, so the view keeps moving smoothly for as
//! long as the pointer stays outside.
//!
//! Each axis is evaluated independently. A diagonal exit scrolls on both axes
//! at once, each proportional to its own overshoot; no axis takes priority.

use crate::constants::{AUTOSCROLL_GAIN, AUTOSCROLL_MAX_STEP};
use crate::types::{AutoScroll, Point, Rect};

/// Signed distance of `v` outside `[lo, hi)`; zero when inside.
#[inline]
fn overshoot(v: i32, lo: i32, hi: i32) -> i32 {
    if v < lo {
        v.saturating_sub(lo)
    } else if v >= hi {
        v.saturating_sub(hi.saturating_sub(1))
    } else {
        0
    }
}

#[inline]
fn step(over: i32) -> i32 {
    over.saturating_mul(AUTOSCROLL_GAIN)
        .clamp(-AUTOSCROLL_MAX_STEP, AUTOSCROLL_MAX_STEP)
}

/// Scroll delta for a pointer at `pointer` that was at `previous` on the
/// last call.
///
/// - `MouseDir` scrolls toward the pointer, but an axis is skipped while the
///   pointer is travelling back toward the viewport on it.
/// - `ScrollDir` scrolls against the pointer regardless of travel, the way a
///   hand-drag continues once it reaches the edge.
///
/// Returns [`Point::ZERO`] whenever `pointer` lies inside `viewport`.
pub fn compute_autoscroll(pointer: Point, previous: Point, viewport: Rect, mode: AutoScroll) -> Point {
    if viewport.is_empty() || viewport.contains(pointer) {
        return Point::ZERO;
    }

    let over = Point::new(
        overshoot(pointer.x, viewport.x, viewport.right()),
        overshoot(pointer.y, viewport.y, viewport.bottom()),
    );
    let travel = pointer - previous;

    let axis = |over: i32, travel: i32| -> i32 {
        if over == 0 {
            return 0;
        }
        match mode {
            AutoScroll::MouseDir => {
                // Moving back inside: let the pointer come home without scrolling.
                if travel != 0 && travel.signum() != over.signum() {
                    0
                } else {
                    step(over)
                }
            }
            AutoScroll::ScrollDir => -step(over),
        }
    };

    Point::new(axis(over.x, travel.x), axis(over.y, travel.y))
}
