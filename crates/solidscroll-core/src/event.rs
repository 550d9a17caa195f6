#![forbid(unsafe_code)]

//! Gesture input types.
//!
//! The host's gesture recognizer delivers a stream of [`GestureEvent`]s for a
//! single drag: one `Began`, zero or more `Changed`, then `Ended` or
//! `Cancelled`. Deltas and velocities are already expressed in content-offset
//! space (a finger moving down produces a negative `y` delta).
//!
//! # Design Notes
//!
//! - Velocities are points per second.
//! - [`EventDirections`] and [`GestureMask`] use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::{Axis, Vector};

/// A velocity in content-offset points per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    /// At rest.
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    /// Create a velocity from per-second components.
    #[inline]
    pub const fn per_second(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy with the component along `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
        self
    }

    /// Euclidean magnitude.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Displacement covered in `seconds` at this velocity.
    #[inline]
    pub fn over(&self, seconds: f64) -> Vector {
        Vector::new(self.x * seconds, self.y * seconds)
    }
}

/// One event in a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A touch went down and the recognizer started tracking.
    Began,
    /// The drag moved.
    Changed {
        /// Offset-space displacement since the previous sample.
        delta: Vector,
        /// Instantaneous velocity estimate.
        velocity: Velocity,
    },
    /// The touch lifted.
    Ended {
        /// Release velocity.
        velocity: Velocity,
    },
    /// The recognizer gave up; handled like `Ended` at rest.
    Cancelled,
}

impl GestureEvent {
    /// Convenience constructor for a `Changed` sample.
    pub fn changed(dx: f64, dy: f64, velocity: Velocity) -> Self {
        Self::Changed {
            delta: Vector::new(dx, dy),
            velocity,
        }
    }

    /// Convenience constructor for an `Ended` event.
    pub fn ended(velocity: Velocity) -> Self {
        Self::Ended { velocity }
    }

    /// The phase this event represents.
    pub fn phase(&self) -> GesturePhase {
        match self {
            Self::Began => GesturePhase::Began,
            Self::Changed { .. } => GesturePhase::Changed,
            Self::Ended { .. } => GesturePhase::Ended,
            Self::Cancelled => GesturePhase::Cancelled,
        }
    }
}

/// Phase of a gesture event, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

bitflags! {
    /// Directions in which content may be dragged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventDirections: u8 {
        /// Towards smaller x offsets.
        const LEFT  = 0b0001;
        /// Towards larger x offsets.
        const RIGHT = 0b0010;
        /// Towards smaller y offsets.
        const UP    = 0b0100;
        /// Towards larger y offsets.
        const DOWN  = 0b1000;
        /// Both horizontal directions.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Both vertical directions.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
    }
}

impl Default for EventDirections {
    fn default() -> Self {
        Self::empty()
    }
}

impl EventDirections {
    /// Both directions along `axis`.
    pub const fn along(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::HORIZONTAL,
            Axis::Vertical => Self::VERTICAL,
        }
    }

    /// Whether any direction along `axis` is present.
    pub fn allows(&self, axis: Axis) -> bool {
        self.intersects(Self::along(axis))
    }

    /// Signed unit step along `axis`: `-1` for left/up, `1` for right/down,
    /// `0` if neither or both are requested.
    pub fn step(&self, axis: Axis) -> f64 {
        let (back, forward) = match axis {
            Axis::Horizontal => (Self::LEFT, Self::RIGHT),
            Axis::Vertical => (Self::UP, Self::DOWN),
        };
        match (self.contains(back), self.contains(forward)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

bitflags! {
    /// Simultaneous-recognition policy requested from the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GestureMask: u8 {
        /// The scroll gesture itself.
        const GESTURE  = 0b01;
        /// Gestures attached to the scrolled content.
        const SUBVIEWS = 0b10;
        /// Everything.
        const ALL = Self::GESTURE.bits() | Self::SUBVIEWS.bits();
    }
}

impl Default for GestureMask {
    fn default() -> Self {
        Self::ALL
    }
}
