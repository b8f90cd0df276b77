//! Core value types for the editor canvas.
//!
//! Integer geometry shared by the view transform and every interaction
//! state, the editor flag set, and the small enums that parameterise zoom
//! and autoscroll behavior.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// ============================================================================
// Geometry
// ============================================================================

/// An integer point, used both in viewport (screen) and document space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    #[inline]
    pub fn saturating_add(self, other: Point) -> Point {
        Point::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }

    #[inline]
    pub fn saturating_sub(self, other: Point) -> Point {
        Point::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        self.saturating_add(rhs)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        self.saturating_sub(rhs)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

/// An integer size. Negative components are treated as empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    #[inline]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// An integer rectangle with its origin at the top-left corner.
///
/// `contains` is half-open: the right and bottom edges are outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.w, size.h)
    }

    /// Build the normalized rectangle spanned by two corners, so the result
    /// never has a negative width or height.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x0 = a.x.min(b.x);
        let y0 = a.y.min(b.y);
        let x1 = a.x.max(b.x);
        let y1 = a.y.max(b.y);
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// The exclusive bottom-right corner.
    #[inline]
    pub fn corner(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x.saturating_add(self.w / 2), self.y.saturating_add(self.h / 2))
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            Rect::default()
        } else {
            Rect::new(x0, y0, x1 - x0, y1 - y0)
        }
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn offset(&self, delta: Point) -> Rect {
        Rect::new(
            self.x.saturating_add(delta.x),
            self.y.saturating_add(delta.y),
            self.w,
            self.h,
        )
    }

    /// Grow the rectangle by `n` pixels on every side.
    pub fn enlarge(&self, n: i32) -> Rect {
        Rect::new(
            self.x.saturating_sub(n),
            self.y.saturating_sub(n),
            self.w.saturating_add(n.saturating_mul(2)),
            self.h.saturating_add(n.saturating_mul(2)),
        )
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Index of an animation frame.
pub type Frame = u32;

/// Opaque layer identifier handed out by the document collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Identifier of one editor (controller) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

// ============================================================================
// Editor Flags
// ============================================================================

/// Independent visual aids the editor can toggle. Any subset is valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorFlags(u32);

impl EditorFlags {
    pub const NONE: EditorFlags = EditorFlags(0);
    pub const SHOW_GRID: EditorFlags = EditorFlags(1);
    pub const SHOW_MASK: EditorFlags = EditorFlags(2);
    pub const SHOW_ONIONSKIN: EditorFlags = EditorFlags(4);
    pub const SHOW_OUTSIDE: EditorFlags = EditorFlags(8);
    pub const SHOW_DECORATORS: EditorFlags = EditorFlags(16);
    pub const DEFAULT: EditorFlags = EditorFlags(1 | 2 | 4 | 8 | 16);

    const NAMED: [(EditorFlags, FlagName); 5] = [
        (Self::SHOW_GRID, FlagName::Grid),
        (Self::SHOW_MASK, FlagName::Mask),
        (Self::SHOW_ONIONSKIN, FlagName::Onionskin),
        (Self::SHOW_OUTSIDE, FlagName::Outside),
        (Self::SHOW_DECORATORS, FlagName::Decorators),
    ];

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Build from raw bits, dropping any bit that is not a known flag.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        EditorFlags(bits & Self::DEFAULT.0)
    }

    #[inline]
    pub const fn contains(&self, other: EditorFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: EditorFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: EditorFlags) {
        self.0 &= !other.0;
    }

    pub fn toggle(&mut self, other: EditorFlags) {
        self.0 ^= other.0;
    }

    pub fn set(&mut self, other: EditorFlags, enabled: bool) {
        if enabled {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    pub fn names(&self) -> Vec<FlagName> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for EditorFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Debug for EditorFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EditorFlags").field(&self.names()).finish()
    }
}

impl std::ops::BitOr for EditorFlags {
    type Output = EditorFlags;
    fn bitor(self, rhs: EditorFlags) -> EditorFlags {
        EditorFlags(self.0 | rhs.0)
    }
}

impl FromIterator<FlagName> for EditorFlags {
    fn from_iter<I: IntoIterator<Item = FlagName>>(iter: I) -> Self {
        let mut flags = EditorFlags::NONE;
        for name in iter {
            flags.insert(name.flag());
        }
        flags
    }
}

/// Serializable name of a single editor flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    Grid,
    Mask,
    Onionskin,
    Outside,
    Decorators,
}

impl FlagName {
    pub fn flag(self) -> EditorFlags {
        match self {
            FlagName::Grid => EditorFlags::SHOW_GRID,
            FlagName::Mask => EditorFlags::SHOW_MASK,
            FlagName::Onionskin => EditorFlags::SHOW_ONIONSKIN,
            FlagName::Outside => EditorFlags::SHOW_OUTSIDE,
            FlagName::Decorators => EditorFlags::SHOW_DECORATORS,
        }
    }
}

// ============================================================================
// Behavior enums
// ============================================================================

/// Which screen point stays fixed when the zoom level changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomBehavior {
    /// Keep the viewport's visual center.
    #[default]
    Center,
    /// Keep the document point under the pointer.
    Mouse,
}

/// Direction policy of autoscroll while a drag leaves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScroll {
    /// Scroll so the view follows the pointer.
    MouseDir,
    /// Scroll against the pointer, continuing a hand-drag.
    ScrollDir,
}

/// How a rubber-band selection combines with the existing mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Replace,
    Add,
    Subtract,
}
