//! Single test binary entry point.
//!
//! All tests compile into one binary to keep link times down.
//!
//! Structure:
//! - helpers: fake document, tool registry, renderer and a test editor builder
//! - unit: one component at a time (preferences, view math, observers, playback)
//! - integration: full input-driven workflows through the editor

mod integration;
mod unit;
