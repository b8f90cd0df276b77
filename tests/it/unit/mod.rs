//! Unit tests: one component at a time.

mod flags_tests;
mod observer_tests;
mod playback_tests;
mod preferences_tests;
mod view_tests;
