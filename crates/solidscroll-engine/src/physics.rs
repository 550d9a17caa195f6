#![forbid(unsafe_code)]

//! Deceleration physics: velocity projection, rubber banding, and per-axis
//! animation tracks.
//!
//! # Model
//!
//! A released drag loses a fixed fraction of its velocity every millisecond.
//! Summing that geometric series gives the distance the content travels
//! before stopping:
//!
//! ```text
//! distance = (v / 1000) * r / (1 - r)
//! ```
//!
//! with `v` in points per second and `r` the per-millisecond rate. The
//! trajectory itself is a [`Decay`] towards the projected point.
//!
//! Past the content bounds, displacement is compressed by a rubber band:
//!
//! ```text
//! f(x) = M * (1 - 1 / (x * c / M + 1))
//! ```
//!
//! which is monotonic, starts with slope `c`, and saturates below `M`.
//!
//! # Invariants
//!
//! 1. `RubberBand::apply` is odd, monotonic, and `|apply(x)| < limit`.
//! 2. `RubberBand::invert(apply(x)) == x` up to float error.
//! 3. A planned track always ends exactly on the clamped target.

use std::time::Duration;

use solidscroll_core::animation::{Animation, Decay, Sequence, sequence};
use solidscroll_core::event::Velocity;
use solidscroll_core::geometry::{Axis, Point};

/// Release speeds below this (points/second) count as "at rest".
pub const VELOCITY_EPSILON: f64 = 1.0;

/// Per-millisecond rate used for both segments of a bounce.
pub const BOUNCE_RATE: f64 = 0.99;

/// Distance travelled by a decaying velocity before it stops.
#[inline]
pub fn projected_distance(velocity: f64, rate: f64) -> f64 {
    if !velocity.is_finite() {
        return 0.0;
    }
    (velocity / 1000.0) * rate / (1.0 - rate)
}

/// Where `offset` ends up after `velocity` decays at `rate`.
pub fn project(offset: Point, velocity: Velocity, rate: f64) -> Point {
    Point::new(
        offset.x + projected_distance(velocity.x, rate),
        offset.y + projected_distance(velocity.y, rate),
    )
}

// ---------------------------------------------------------------------------
// Rubber band
// ---------------------------------------------------------------------------

/// Resistance curve applied to over-scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberBand {
    /// Initial slope of the curve.
    pub coefficient: f64,
    /// Asymptote: displacement never reaches this value.
    pub limit: f64,
}

impl RubberBand {
    /// Slope used by platform scroll views.
    pub const DEFAULT_COEFFICIENT: f64 = 0.55;

    /// A band saturating at `limit` (usually the viewport extent).
    pub fn new(limit: f64) -> Self {
        Self {
            coefficient: Self::DEFAULT_COEFFICIENT,
            limit: limit.max(0.0),
        }
    }

    /// Replace the slope.
    #[must_use]
    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        if coefficient.is_finite() && coefficient > 0.0 {
            self.coefficient = coefficient;
        }
        self
    }

    /// Compressed displacement for a raw over-scroll `x` (sign preserved).
    pub fn apply(&self, x: f64) -> f64 {
        let m = self.limit;
        if m <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        let magnitude = m * (1.0 - 1.0 / (x.abs() * self.coefficient / m + 1.0));
        magnitude.copysign(x)
    }

    /// Raw over-scroll that compresses to `f`.
    ///
    /// Values at or past the limit map to the largest representable finite
    /// over-scroll.
    pub fn invert(&self, f: f64) -> f64 {
        let m = self.limit;
        if m <= 0.0 || !f.is_finite() {
            return 0.0;
        }
        let f_abs = f.abs();
        if f_abs >= m {
            return (m * 1e9).copysign(f);
        }
        ((m / self.coefficient) * f_abs / (m - f_abs)).copysign(f)
    }

    /// Visual position for an unconstrained `raw` position on an axis with
    /// bounds `[min, max]`.
    pub fn band(&self, raw: f64, min: f64, max: f64) -> f64 {
        if raw < min {
            min + self.apply(raw - min)
        } else if raw > max {
            max + self.apply(raw - max)
        } else {
            raw
        }
    }

    /// Inverse of [`band`](Self::band).
    pub fn unband(&self, visual: f64, min: f64, max: f64) -> f64 {
        if visual < min {
            min + self.invert(visual - min)
        } else if visual > max {
            max + self.invert(visual - max)
        } else {
            visual
        }
    }
}

// ---------------------------------------------------------------------------
// Axis tracks
// ---------------------------------------------------------------------------

/// The animation driving one axis of the content offset.
#[derive(Debug, Clone, Copy, Default)]
pub enum AxisTrack {
    /// Nothing to animate.
    #[default]
    Idle,
    /// Single decay to the final position.
    Decay(Decay),
    /// Out to an overshoot point, then back to the edge.
    Bounce(Sequence<Decay, Decay>),
}

impl AxisTrack {
    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        match self {
            AxisTrack::Idle => {}
            AxisTrack::Decay(d) => d.tick(dt),
            AxisTrack::Bounce(s) => s.tick(dt),
        }
    }

    /// Current value, if animating.
    pub fn value(&self) -> Option<f64> {
        match self {
            AxisTrack::Idle => None,
            AxisTrack::Decay(d) => Some(d.value()),
            AxisTrack::Bounce(s) => Some(s.value()),
        }
    }

    /// Final resting position, if animating.
    pub fn target(&self) -> Option<f64> {
        match self {
            AxisTrack::Idle => None,
            AxisTrack::Decay(d) => Some(d.target()),
            AxisTrack::Bounce(s) => Some(s.second().target()),
        }
    }

    /// Whether the track has nothing left to do.
    pub fn is_settled(&self) -> bool {
        match self {
            AxisTrack::Idle => true,
            AxisTrack::Decay(d) => d.is_complete(),
            AxisTrack::Bounce(s) => s.is_complete(),
        }
    }

    /// Instantaneous speed in points per second.
    pub fn velocity(&self) -> f64 {
        match self {
            AxisTrack::Idle => 0.0,
            AxisTrack::Decay(d) => d.velocity(),
            AxisTrack::Bounce(s) if s.in_second() => s.second().velocity(),
            AxisTrack::Bounce(s) => s.first().velocity(),
        }
    }
}

/// Inputs for planning one axis of a deceleration.
#[derive(Debug, Clone, Copy)]
pub struct AxisPlan {
    /// Position when the deceleration starts.
    pub start: f64,
    /// Unclamped destination (projected or provider-supplied).
    pub raw_target: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound (never below `min`).
    pub max: f64,
    /// Whether this axis may bounce past its bounds.
    pub bounces: bool,
    /// Deceleration rate for the in-bounds decay.
    pub rate: f64,
    /// Resistance used to size the overshoot.
    pub band: RubberBand,
}

impl AxisPlan {
    /// Build the track that carries `start` to the clamped target.
    pub fn track(&self) -> AxisTrack {
        let max = self.max.max(self.min);
        let target = self.raw_target.clamp(self.min, max);
        if !self.bounces || target == self.raw_target {
            if (target - self.start).abs() == 0.0 {
                return AxisTrack::Idle;
            }
            return AxisTrack::Decay(Decay::new(self.start, target, self.rate));
        }

        let overshoot = target + self.band.apply(self.raw_target - target);
        let direction = (self.raw_target - target).signum();
        // Already at or beyond the overshoot point: just come back.
        if (self.start - overshoot) * direction >= 0.0 {
            return AxisTrack::Decay(Decay::new(self.start, target, BOUNCE_RATE));
        }
        AxisTrack::Bounce(sequence(
            Decay::new(self.start, overshoot, BOUNCE_RATE),
            Decay::new(overshoot, target, BOUNCE_RATE),
        ))
    }
}

/// Axis-indexed pair of tracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracks {
    pub horizontal: AxisTrack,
    pub vertical: AxisTrack,
}

impl Tracks {
    /// Track for `axis`.
    pub fn get(&self, axis: Axis) -> &AxisTrack {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Mutable track for `axis`.
    pub fn get_mut(&mut self, axis: Axis) -> &mut AxisTrack {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Advance both tracks.
    pub fn tick(&mut self, dt: Duration) {
        self.horizontal.tick(dt);
        self.vertical.tick(dt);
    }

    /// Whether both tracks have settled.
    pub fn is_settled(&self) -> bool {
        self.horizontal.is_settled() && self.vertical.is_settled()
    }

    /// Apply current track values to `offset`, leaving idle axes untouched.
    pub fn apply(&self, mut offset: Point) -> Point {
        for axis in Axis::BOTH {
            if let Some(v) = self.get(axis).value() {
                offset.set(axis, v);
            }
        }
        offset
    }

    /// Current velocity estimate.
    pub fn velocity(&self) -> Velocity {
        Velocity::per_second(self.horizontal.velocity(), self.vertical.velocity())
    }
}
