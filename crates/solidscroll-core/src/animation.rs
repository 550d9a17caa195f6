#![forbid(unsafe_code)]

//! Composable scalar animation primitives.
//!
//! Time-based animations that produce an `f64` position along one axis.
//! Ticks are driven by the host frame callback; nothing here sleeps or
//! allocates during `tick`.
//!
//! The workhorse is [`Decay`]: an exponential ease-out towards a target, the
//! same curve that a released drag follows when friction is applied every
//! millisecond. [`Sequence`] chains two animations so a bounce can run as
//! "decay out to the overshoot point, then decay back to the edge".

pub mod completion;

use std::time::Duration;

/// Remaining distance (in points) below which a decay counts as settled.
pub const SETTLE_THRESHOLD: f64 = 0.1;

/// Smallest accepted per-millisecond decay rate.
pub const MIN_DECAY_RATE: f64 = 0.001;

/// Largest accepted per-millisecond decay rate.
pub const MAX_DECAY_RATE: f64 = 0.9999;

/// Clamp a decay rate into the open interval (0, 1).
///
/// NaN maps to `0.998`, the normal scrolling rate.
#[inline]
pub fn clamp_decay_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        return 0.998;
    }
    rate.clamp(MIN_DECAY_RATE, MAX_DECAY_RATE)
}

#[inline]
fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing a scalar value.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current animated value.
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion. Used by composition types to forward
    /// remaining time (e.g., [`Sequence`] forwards overshoot from first to second).
    /// Returns [`Duration::ZERO`] for animations that never complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Decay
// ---------------------------------------------------------------------------

/// Exponential approach from `from` to `to`.
///
/// After `t` milliseconds the value is `to - (to - from) * rate^t`. The
/// animation completes when the remaining distance drops below
/// [`SETTLE_THRESHOLD`], at which point [`value`](Animation::value) snaps to
/// `to` exactly.
///
/// Releasing a drag with velocity `v` (points/second) and following this
/// curve towards `from + v / 1000 * rate / (1 - rate)` reproduces the
/// velocity-decay trajectory exactly, so the same type serves deceleration and
/// programmatic scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    from: f64,
    to: f64,
    rate: f64,
    elapsed: Duration,
    settle_ms: f64,
}

impl Decay {
    /// Create a decay from `from` to `to` with a per-millisecond `rate`.
    ///
    /// `rate` is clamped into (0, 1).
    pub fn new(from: f64, to: f64, rate: f64) -> Self {
        let rate = clamp_decay_rate(rate);
        Self {
            from,
            to,
            rate,
            elapsed: Duration::ZERO,
            settle_ms: settle_millis(to - from, rate),
        }
    }

    /// A decay that is already settled at `value`.
    pub fn settled(value: f64) -> Self {
        Self::new(value, value, 0.5)
    }

    /// Starting value.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Target value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Per-millisecond decay rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Total time until the decay settles.
    pub fn settle_duration(&self) -> Duration {
        Duration::from_secs_f64(self.settle_ms / 1000.0)
    }

    /// Instantaneous rate of change in units per second.
    pub fn velocity(&self) -> f64 {
        if self.is_complete() {
            return 0.0;
        }
        let remaining = (self.to - self.from) * self.rate.powf(millis(self.elapsed));
        -remaining * self.rate.ln() * 1000.0
    }
}

/// Milliseconds for a decay over `distance` to get within the settle threshold.
fn settle_millis(distance: f64, rate: f64) -> f64 {
    let distance = distance.abs();
    if !distance.is_finite() || distance <= SETTLE_THRESHOLD {
        return 0.0;
    }
    (SETTLE_THRESHOLD / distance).ln() / rate.ln()
}

#[cfg(feature = "tracing")]
fn trace_settled(was_complete: bool, decay: &Decay) {
    if !was_complete && decay.is_complete() {
        tracing::trace!(
            from = decay.from,
            target = decay.to,
            settle_ms = decay.settle_ms,
            "decay settled"
        );
    }
}

impl Animation for Decay {
    fn tick(&mut self, dt: Duration) {
        #[cfg(feature = "tracing")]
        let was_complete = self.is_complete();
        self.elapsed = self.elapsed.saturating_add(dt);
        #[cfg(feature = "tracing")]
        trace_settled(was_complete, self);
    }

    fn is_complete(&self) -> bool {
        millis(self.elapsed) >= self.settle_ms
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        self.to - (self.to - self.from) * self.rate.powf(millis(self.elapsed))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        let settle = Duration::from_secs_f64(self.settle_ms / 1000.0);
        self.elapsed.saturating_sub(settle)
    }
}

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// Play animation `A`, then animation `B`.
///
/// `value()` returns A's value while A is running, then B's value.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<A, B> {
    first: A,
    second: B,
    first_done: bool,
}

impl<A: Animation, B: Animation> Sequence<A, B> {
    /// Create a new sequence that plays `first` then `second`.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            first_done: false,
        }
    }

    /// Access the first animation.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Access the second animation.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Whether playback has moved on to the second animation.
    pub fn in_second(&self) -> bool {
        self.first_done
    }
}

impl<A: Animation, B: Animation> Animation for Sequence<A, B> {
    fn tick(&mut self, dt: Duration) {
        if !self.first_done {
            self.first.tick(dt);
            if self.first.is_complete() {
                self.first_done = true;
                // Forward any overshoot into the second animation.
                let os = self.first.overshoot();
                if !os.is_zero() {
                    self.second.tick(os);
                }
            }
        } else {
            self.second.tick(dt);
        }
    }

    fn is_complete(&self) -> bool {
        self.first_done && self.second.is_complete()
    }

    fn value(&self) -> f64 {
        if self.first_done {
            self.second.value()
        } else {
            self.first.value()
        }
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.first_done = false;
    }

    fn overshoot(&self) -> Duration {
        if self.first_done {
            self.second.overshoot()
        } else {
            Duration::ZERO
        }
    }
}

/// Create a [`Sequence`] from two animations.
pub fn sequence<A: Animation, B: Animation>(a: A, b: B) -> Sequence<A, B> {
    Sequence::new(a, b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);
    const SEC_1: Duration = Duration::from_secs(1);

    #[test]
    fn decay_starts_at_from() {
        let d = Decay::new(0.0, 100.0, 0.99);
        assert_eq!(d.value(), 0.0);
        assert!(!d.is_complete());
    }

    #[test]
    fn decay_follows_exponential_curve() {
        let mut d = Decay::new(0.0, 100.0, 0.99);
        d.tick(Duration::from_millis(100));
        let expected = 100.0 - 100.0 * 0.99f64.powf(100.0);
        assert!((d.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn decay_is_ease_out() {
        // More distance is covered in the first half than in the second.
        let mut d = Decay::new(0.0, 100.0, 0.99);
        let half = d.settle_duration() / 2;
        d.tick(half);
        assert!(d.value() > 50.0);
    }

    #[test]
    fn decay_settles_and_snaps_to_target() {
        let mut d = Decay::new(0.0, 100.0, 0.99);
        let settle = d.settle_duration();
        d.tick(settle + Duration::from_millis(1));
        assert!(d.is_complete());
        assert_eq!(d.value(), 100.0);
    }

    #[test]
    fn decay_settle_time_matches_threshold() {
        let d = Decay::new(0.0, 600.0, 0.99);
        // ln(0.1 / 600) / ln(0.99) ms
        let expected = (0.1f64 / 600.0).ln() / 0.99f64.ln();
        assert!((d.settle_duration().as_secs_f64() * 1000.0 - expected).abs() < 1e-6);
    }

    #[test]
    fn decay_tiny_distance_is_complete_immediately() {
        let d = Decay::new(10.0, 10.05, 0.998);
        assert!(d.is_complete());
        assert_eq!(d.value(), 10.05);
        assert_eq!(Decay::settled(3.0).value(), 3.0);
    }

    #[test]
    fn decay_negative_direction() {
        let mut d = Decay::new(100.0, 0.0, 0.99);
        d.tick(MS_16);
        assert!(d.value() < 100.0 && d.value() > 0.0);
        assert!(d.velocity() < 0.0);
    }

    #[test]
    fn decay_velocity_matches_projection() {
        // A decay towards v/1000 * r/(1-r) starts with velocity v.
        let rate = 0.998;
        let v = 1500.0;
        let distance = v / 1000.0 * rate / (1.0 - rate);
        let d = Decay::new(0.0, distance, rate);
        let start_velocity = d.velocity();
        // Continuous-time derivative differs from the discrete sum by a factor
        // of -ln(r) * r / (1 - r), which is ~1 for rates near one.
        assert!((start_velocity - v).abs() / v < 0.01);
    }

    #[test]
    fn decay_rate_is_clamped() {
        assert_eq!(Decay::new(0.0, 1.0, 1.5).rate(), MAX_DECAY_RATE);
        assert_eq!(Decay::new(0.0, 1.0, -2.0).rate(), MIN_DECAY_RATE);
        assert_eq!(Decay::new(0.0, 1.0, f64::NAN).rate(), 0.998);
    }

    #[test]
    fn decay_reset() {
        let mut d = Decay::new(0.0, 10.0, 0.9);
        d.tick(SEC_1);
        assert!(d.is_complete());
        d.reset();
        assert!(!d.is_complete());
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn decay_overshoot_after_settle() {
        let mut d = Decay::new(0.0, 10.0, 0.9);
        let settle = d.settle_duration();
        d.tick(settle + Duration::from_millis(40));
        let os = d.overshoot();
        assert!(os >= Duration::from_millis(39) && os <= Duration::from_millis(41));
    }

    #[test]
    fn sequence_plays_first_then_second() {
        let out = Decay::new(0.0, 20.0, 0.95);
        let back = Decay::new(20.0, 0.0, 0.95);
        let mut seq = sequence(out, back);

        seq.tick(MS_16);
        assert!(!seq.in_second());
        assert!(seq.value() > 0.0);

        seq.tick(out.settle_duration());
        assert!(seq.in_second());
        assert!(!seq.is_complete());

        seq.tick(back.settle_duration());
        assert!(seq.is_complete());
        assert_eq!(seq.value(), 0.0);
    }

    #[test]
    fn sequence_forwards_overshoot() {
        let out = Decay::new(0.0, 20.0, 0.9);
        let back = Decay::new(20.0, 0.0, 0.9);
        let mut seq = sequence(out, back);
        seq.tick(out.settle_duration() + back.settle_duration() + MS_16);
        assert!(seq.is_complete());
    }

    #[test]
    fn sequence_reset() {
        let mut seq = sequence(Decay::new(0.0, 5.0, 0.9), Decay::new(5.0, 0.0, 0.9));
        seq.tick(SEC_1);
        assert!(seq.is_complete());
        seq.reset();
        assert!(!seq.is_complete());
        assert_eq!(seq.value(), 0.0);
    }

    #[test]
    fn zero_dt_is_noop() {
        let mut d = Decay::new(0.0, 100.0, 0.99);
        d.tick(Duration::ZERO);
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn tick_after_complete_is_safe() {
        let mut d = Decay::new(0.0, 100.0, 0.99);
        d.tick(Duration::from_secs(3600));
        d.tick(Duration::from_secs(3600));
        assert_eq!(d.value(), 100.0);
    }
}
