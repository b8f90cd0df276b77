//! Discrete zoom value.
//!
//! A zoom is a reduced fraction `num / den` taken from [`ZOOM_LEVELS`].
//! Integer conversions floor toward negative infinity in both directions so
//! `remove(apply(x)) == x` for every magnifying level and differs by less than
//! `den` document pixels for reducing levels.

use crate::constants::{DEFAULT_ZOOM_LEVEL, ZOOM_LEVELS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zoom {
    num: i32,
    den: i32,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::from_level(DEFAULT_ZOOM_LEVEL)
    }
}

impl Zoom {
    /// Build a zoom from a fraction. The result is snapped to the nearest
    /// supported level, which also clamps it into range.
    pub fn new(num: i32, den: i32) -> Self {
        if num <= 0 || den <= 0 {
            return Self::min();
        }
        Self::from_scale(num as f64 / den as f64)
    }

    pub fn from_level(index: usize) -> Self {
        let (num, den) = ZOOM_LEVELS[index.min(ZOOM_LEVELS.len() - 1)];
        Self { num, den }
    }

    pub fn min() -> Self {
        Self::from_level(0)
    }

    pub fn max() -> Self {
        Self::from_level(ZOOM_LEVELS.len() - 1)
    }

    /// Nearest level to a linear scale, measured in log space.
    pub fn from_scale(scale: f64) -> Self {
        if !scale.is_finite() || scale <= 0.0 {
            return Self::min();
        }
        let target = scale.ln();
        let index = ZOOM_LEVELS
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = ((a.0 as f64 / a.1 as f64).ln() - target).abs();
                let db = ((b.0 as f64 / b.1 as f64).ln() - target).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(DEFAULT_ZOOM_LEVEL);
        Self::from_level(index)
    }

    #[inline]
    pub fn num(&self) -> i32 {
        self.num
    }

    #[inline]
    pub fn den(&self) -> i32 {
        self.den
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    pub fn percent(&self) -> f64 {
        self.scale() * 100.0
    }

    pub fn level(&self) -> usize {
        ZOOM_LEVELS
            .iter()
            .position(|&(n, d)| n == self.num && d == self.den)
            .unwrap_or(DEFAULT_ZOOM_LEVEL)
    }

    pub fn is_min(&self) -> bool {
        self.level() == 0
    }

    pub fn is_max(&self) -> bool {
        self.level() == ZOOM_LEVELS.len() - 1
    }

    /// Next magnifying level, saturating at the maximum.
    pub fn zoom_in(&self) -> Self {
        Self::from_level(self.level() + 1)
    }

    /// Next reducing level, saturating at the minimum.
    pub fn zoom_out(&self) -> Self {
        Self::from_level(self.level().saturating_sub(1))
    }

    /// Move `steps` levels (positive zooms in).
    pub fn step(&self, steps: i32) -> Self {
        let level = self.level() as i64 + steps as i64;
        Self::from_level(level.clamp(0, ZOOM_LEVELS.len() as i64 - 1) as usize)
    }

    /// Document length to screen length.
    #[inline]
    pub fn apply(&self, x: i32) -> i32 {
        saturate((x as i64 * self.num as i64).div_euclid(self.den as i64))
    }

    /// Screen length to document length.
    #[inline]
    pub fn remove(&self, x: i32) -> i32 {
        saturate((x as i64 * self.den as i64).div_euclid(self.num as i64))
    }

    #[inline]
    pub fn apply_f64(&self, x: f64) -> f64 {
        x * self.scale()
    }

    #[inline]
    pub fn remove_f64(&self, x: f64) -> f64 {
        x / self.scale()
    }
}

#[inline]
fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
