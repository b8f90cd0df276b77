//! Animation playback timing.
//!
//! [`AnimationPlayer`] is a frame cursor driven by wall-clock time. It
//! accumulates elapsed time scaled by the speed multiplier and advances one
//! frame each time the accumulated progress covers the current frame's
//! duration. Changing the speed first banks the progress made at the old
//! speed, so the cursor never jumps.
//!
//! Time comes from a [`Clock`] so tests can drive playback deterministically
//! with a [`ManualClock`].

use crate::constants::{MAX_ANIMATION_SPEED, MIN_ANIMATION_SPEED, MIN_FRAME_DURATION_MS};
use crate::document::FrameTimeline;
use crate::types::Frame;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::{Duration, Instant};

// ============================================================================
// Clocks
// ============================================================================

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDirection {
    #[default]
    Forward,
    Reverse,
    PingPong,
}

/// Frame shown once playback stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBehavior {
    /// Go back to the frame playback started from.
    #[default]
    Rewind,
    /// Stay on the frame being shown.
    Hold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    pub direction: PlaybackDirection,
    /// Stop after one pass instead of looping.
    pub play_once: bool,
    pub stop_behavior: StopBehavior,
}

/// Clamp a requested speed multiplier into the supported range.
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED)
    }
}

fn duration_ms<T: FrameTimeline + ?Sized>(timeline: &T, frame: Frame) -> f64 {
    f64::from(timeline.frame_duration_ms(frame).max(MIN_FRAME_DURATION_MS))
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    options: PlaybackOptions,
    start_frame: Frame,
    frame: Frame,
    speed: f64,
    /// Scaled milliseconds spent on `frame` so far.
    progress_ms: f64,
    last_update: Instant,
    /// Ping-pong travel direction.
    forward: bool,
    finished: bool,
}

impl AnimationPlayer {
    pub fn new(start_frame: Frame, options: PlaybackOptions, speed: f64, now: Instant) -> Self {
        Self {
            options,
            start_frame,
            frame: start_frame,
            speed: clamp_speed(speed),
            progress_ms: 0.0,
            last_update: now,
            forward: options.direction != PlaybackDirection::Reverse,
            finished: false,
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn start_frame(&self) -> Frame {
        self.start_frame
    }

    pub fn options(&self) -> PlaybackOptions {
        self.options
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// A play-once run reached its end.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frame to show after stopping.
    pub fn stop_frame(&self) -> Frame {
        match self.options.stop_behavior {
            StopBehavior::Rewind => self.start_frame,
            StopBehavior::Hold => self.frame,
        }
    }

    fn accumulate(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_update);
        self.progress_ms += elapsed.as_micros() as f64 / 1000.0 * self.speed;
        self.last_update = now;
    }

    /// Change the multiplier. Progress made so far at the old speed is kept.
    pub fn set_speed(&mut self, speed: f64, now: Instant) {
        self.accumulate(now);
        self.speed = clamp_speed(speed);
    }

    /// Forget time spent while playback was suspended.
    pub fn reset_time_base(&mut self, now: Instant) {
        self.last_update = now;
    }

    /// Advance to `now`. Returns the new frame when it changed.
    pub fn tick<T: FrameTimeline + ?Sized>(&mut self, timeline: &T, now: Instant) -> Option<Frame> {
        if self.finished {
            return None;
        }
        self.accumulate(now);

        let count = timeline.frame_count();
        if count == 0 {
            self.finished = true;
            return None;
        }
        if self.frame >= count {
            self.frame = count - 1;
        }

        // A long stall on a looping animation would otherwise walk every lap.
        if !self.options.play_once {
            let lap: f64 = (0..count).map(|f| duration_ms(timeline, f)).sum();
            if self.progress_ms > lap * 2.0 {
                self.progress_ms %= lap;
            }
        }

        let before = self.frame;
        while !self.finished && self.progress_ms >= duration_ms(timeline, self.frame) {
            self.progress_ms -= duration_ms(timeline, self.frame);
            self.advance(count);
        }
        if self.finished {
            self.progress_ms = 0.0;
        }
        (self.frame != before).then_some(self.frame)
    }

    fn advance(&mut self, count: Frame) {
        let last = count - 1;
        match self.options.direction {
            PlaybackDirection::Forward => {
                if self.frame < last {
                    self.frame += 1;
                } else if self.options.play_once {
                    self.finished = true;
                } else {
                    self.frame = 0;
                }
            }
            PlaybackDirection::Reverse => {
                if self.frame > 0 {
                    self.frame -= 1;
                } else if self.options.play_once {
                    self.finished = true;
                } else {
                    self.frame = last;
                }
            }
            PlaybackDirection::PingPong => {
                if last == 0 {
                    self.finished = self.options.play_once;
                } else if self.forward {
                    if self.frame < last {
                        self.frame += 1;
                    } else {
                        self.forward = false;
                        self.frame -= 1;
                    }
                } else if self.frame > 0 {
                    self.frame -= 1;
                } else if self.options.play_once {
                    self.finished = true;
                } else {
                    self.forward = true;
                    self.frame += 1;
                }
            }
        }
    }

    /// When the current frame's duration will have elapsed at the current
    /// speed. `None` once finished.
    pub fn next_deadline<T: FrameTimeline + ?Sized>(&self, timeline: &T) -> Option<Instant> {
        if self.finished || timeline.frame_count() == 0 {
            return None;
        }
        let frame = self.frame.min(timeline.frame_count() - 1);
        let remaining = (duration_ms(timeline, frame) - self.progress_ms).max(0.0) / self.speed;
        Some(self.last_update + Duration::from_secs_f64(remaining / 1000.0))
    }
}
