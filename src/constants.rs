//! Editor-wide constants.
//!
//! Centralizes magic numbers for zoom, scrolling, autoscroll and timing so the
//! interaction states and the view controller agree on them.

use std::time::Duration;

// ============================================================================
// Zoom
// ============================================================================

/// Zoom levels as `(numerator, denominator)` pairs, smallest first.
pub const ZOOM_LEVELS: [(i32, i32); 25] = [
    (1, 64),
    (1, 48),
    (1, 32),
    (1, 24),
    (1, 16),
    (1, 12),
    (1, 8),
    (1, 6),
    (1, 5),
    (1, 4),
    (1, 3),
    (1, 2),
    (1, 1),
    (2, 1),
    (3, 1),
    (4, 1),
    (5, 1),
    (6, 1),
    (8, 1),
    (12, 1),
    (16, 1),
    (24, 1),
    (32, 1),
    (48, 1),
    (64, 1),
];

/// Index of 100% in [`ZOOM_LEVELS`].
pub const DEFAULT_ZOOM_LEVEL: usize = 12;

/// Vertical pointer travel (screen pixels) per zoom level in the zoom-drag state.
pub const ZOOM_DRAG_STEP: i32 = 16;

/// Pointer travel below which a zoom-drag counts as a click.
pub const ZOOM_CLICK_TOLERANCE: i32 = 2;

// ============================================================================
// Scrolling
// ============================================================================

/// Screen pixels scrolled per wheel notch.
pub const WHEEL_SCROLL_STEP: i32 = 48;

/// Fraction of the viewport scrolled by an arrow key (1 / N).
pub const KEY_SCROLL_DIVISOR: i32 = 10;

/// Autoscroll gain: scroll pixels per pixel of overshoot.
pub const AUTOSCROLL_GAIN: i32 = 1;

/// Upper bound of one autoscroll step so a far-away pointer cannot fling the view.
pub const AUTOSCROLL_MAX_STEP: i32 = 64;

// ============================================================================
// Decorations
// ============================================================================

/// Side of a transform handle square, in screen pixels.
pub const HANDLE_SIZE: i32 = 7;

/// Minimum on-screen grid cell size before grid lines are drawn.
pub const MIN_GRID_CELL_PX: i32 = 3;

/// Dash length of the marching-ants outline, in screen pixels.
pub const MARCHING_ANTS_DASH: u32 = 4;

// ============================================================================
// Animation & Timing
// ============================================================================

/// Interval between marching-ants steps.
pub const DEFAULT_MARCHING_ANTS_INTERVAL: Duration = Duration::from_millis(100);

/// Frame duration used when the document reports zero.
pub const MIN_FRAME_DURATION_MS: u32 = 1;

/// Bounds of the animation speed multiplier.
pub const MIN_ANIMATION_SPEED: f64 = 0.01;
pub const MAX_ANIMATION_SPEED: f64 = 100.0;

// ============================================================================
// Colors (0xAARRGGBB)
// ============================================================================

pub const OUTSIDE_COLOR: u32 = 0xFF_60_60_60;
pub const GRID_COLOR: u32 = 0x80_00_00_FF;
pub const MASK_COLOR_A: u32 = 0xFF_00_00_00;
pub const MASK_COLOR_B: u32 = 0xFF_FF_FF_FF;
pub const HANDLE_COLOR: u32 = 0xFF_FF_FF_FF;
pub const RUBBER_BAND_COLOR: u32 = 0xFF_00_78_D7;
pub const FLASH_COLOR: u32 = 0x80_FF_FF_FF;
