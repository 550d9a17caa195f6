#![forbid(unsafe_code)]

//! Scroll region configuration.
//!
//! [`ScrollConfig`] is plain data with builder methods. Values that would
//! break the physics (a deceleration rate outside (0, 1), negative insets)
//! are clamped by [`ScrollConfig::sanitized`], which the engine applies on
//! every configuration change.
//!
//! # Example
//!
//! ```
//! use solidscroll_engine::config::{Axes, DecelerationRate, ScrollConfig};
//!
//! let config = ScrollConfig::for_axes(Axes::HORIZONTAL, true)
//!     .with_deceleration_rate(DecelerationRate::FAST);
//! assert!(config.always_bounce_horizontal);
//! assert!(!config.shows_vertical_indicator);
//! ```

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use solidscroll_core::binding::Source;
use solidscroll_core::geometry::{Axis, EdgeInsets, Point};

use crate::eligibility::{DefaultGestureProvider, GestureProvider};

/// Where the content offset comes from: an initial value or a two-way binding.
pub type ContentOffset = Source<Point>;

// ---------------------------------------------------------------------------
// DecelerationRate
// ---------------------------------------------------------------------------

/// Fraction of velocity retained per millisecond after a drag ends.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct DecelerationRate(f64);

impl DecelerationRate {
    /// Long, gliding deceleration.
    pub const NORMAL: DecelerationRate = DecelerationRate(0.998);
    /// Short deceleration, also used for programmatic scrolling.
    pub const FAST: DecelerationRate = DecelerationRate(0.99);

    /// A custom rate, clamped into (0, 1). NaN becomes [`NORMAL`](Self::NORMAL).
    pub fn custom(rate: f64) -> Self {
        Self(solidscroll_core::animation::clamp_decay_rate(rate))
    }

    /// The per-millisecond rate.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    fn sanitized(self) -> Self {
        Self::custom(self.0)
    }
}

impl Default for DecelerationRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

bitflags! {
    /// A set of scroll axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
        const BOTH = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Axes {
    /// Whether `axis` is in the set.
    pub fn has(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.contains(Self::HORIZONTAL),
            Axis::Vertical => self.contains(Self::VERTICAL),
        }
    }
}

// ---------------------------------------------------------------------------
// ScrollConfig
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
fn default_gesture_provider() -> Rc<dyn GestureProvider> {
    Rc::new(DefaultGestureProvider)
}

/// Configuration for one scroll region.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScrollConfig {
    /// Initial offset or a binding kept in sync with the live offset.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub content_offset: ContentOffset,
    /// Padding around the content inside the scrollable area.
    pub content_insets: EdgeInsets,
    /// Rate applied after a drag ends.
    pub deceleration_rate: DecelerationRate,
    /// Allow horizontal bounce even when content fits.
    pub always_bounce_horizontal: bool,
    /// Allow vertical bounce even when content fits.
    pub always_bounce_vertical: bool,
    /// Decides which drags the region claims.
    #[cfg_attr(feature = "serde", serde(skip, default = "default_gesture_provider"))]
    pub gesture_provider: Rc<dyn GestureProvider>,
    /// A touch during deceleration stops the content at once.
    pub stop_dragging_immediately: bool,
    /// When false, no gesture is ever claimed.
    pub is_scroll_enabled: bool,
    pub shows_horizontal_indicator: bool,
    pub shows_vertical_indicator: bool,
    /// Extra padding for indicator tracks.
    pub indicator_insets: EdgeInsets,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            content_offset: ContentOffset::Initially(Point::ZERO),
            content_insets: EdgeInsets::ZERO,
            deceleration_rate: DecelerationRate::NORMAL,
            always_bounce_horizontal: false,
            always_bounce_vertical: true,
            gesture_provider: Rc::new(DefaultGestureProvider),
            stop_dragging_immediately: true,
            is_scroll_enabled: true,
            shows_horizontal_indicator: true,
            shows_vertical_indicator: true,
            indicator_insets: EdgeInsets::ZERO,
        }
    }
}

impl fmt::Debug for ScrollConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollConfig")
            .field("content_offset", &self.content_offset)
            .field("content_insets", &self.content_insets)
            .field("deceleration_rate", &self.deceleration_rate)
            .field("always_bounce_horizontal", &self.always_bounce_horizontal)
            .field("always_bounce_vertical", &self.always_bounce_vertical)
            .field("stop_dragging_immediately", &self.stop_dragging_immediately)
            .field("is_scroll_enabled", &self.is_scroll_enabled)
            .field("shows_horizontal_indicator", &self.shows_horizontal_indicator)
            .field("shows_vertical_indicator", &self.shows_vertical_indicator)
            .field("indicator_insets", &self.indicator_insets)
            .finish_non_exhaustive()
    }
}

impl ScrollConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounce and indicators only along `axes`.
    pub fn for_axes(axes: Axes, shows_indicators: bool) -> Self {
        Self {
            always_bounce_horizontal: axes.contains(Axes::HORIZONTAL),
            always_bounce_vertical: axes.contains(Axes::VERTICAL),
            shows_horizontal_indicator: shows_indicators && axes.contains(Axes::HORIZONTAL),
            shows_vertical_indicator: shows_indicators && axes.contains(Axes::VERTICAL),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON and sanitize it.
    ///
    /// The content offset and gesture provider cannot be expressed in JSON
    /// and take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::error::ScrollResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp every field into its valid range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.deceleration_rate = self.deceleration_rate.sanitized();
        self.content_insets = self.content_insets.sanitized();
        self.indicator_insets = self.indicator_insets.sanitized();
        self
    }

    /// Whether `axis` may bounce.
    pub fn bounces(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.always_bounce_horizontal,
            Axis::Vertical => self.always_bounce_vertical,
        }
    }

    /// Whether indicators are shown on `axis`.
    pub fn shows_indicator(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.shows_horizontal_indicator,
            Axis::Vertical => self.shows_vertical_indicator,
        }
    }

    /// Set the content offset source.
    #[must_use]
    pub fn with_content_offset(mut self, content_offset: impl Into<ContentOffset>) -> Self {
        self.content_offset = content_offset.into();
        self
    }

    /// Start at `offset` without binding it.
    #[must_use]
    pub fn with_initial_offset(mut self, offset: Point) -> Self {
        self.content_offset = ContentOffset::Initially(offset);
        self
    }

    #[must_use]
    pub fn with_content_insets(mut self, insets: impl Into<EdgeInsets>) -> Self {
        self.content_insets = insets.into();
        self
    }

    #[must_use]
    pub fn with_deceleration_rate(mut self, rate: DecelerationRate) -> Self {
        self.deceleration_rate = rate;
        self
    }

    /// Set bounce for both axes.
    #[must_use]
    pub fn with_bounce(mut self, horizontal: bool, vertical: bool) -> Self {
        self.always_bounce_horizontal = horizontal;
        self.always_bounce_vertical = vertical;
        self
    }

    #[must_use]
    pub fn with_gesture_provider(mut self, provider: impl GestureProvider + 'static) -> Self {
        self.gesture_provider = Rc::new(provider);
        self
    }

    #[must_use]
    pub fn with_stop_dragging_immediately(mut self, stop: bool) -> Self {
        self.stop_dragging_immediately = stop;
        self
    }

    #[must_use]
    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.is_scroll_enabled = enabled;
        self
    }

    /// Set indicator visibility for both axes.
    #[must_use]
    pub fn with_indicators(mut self, horizontal: bool, vertical: bool) -> Self {
        self.shows_horizontal_indicator = horizontal;
        self.shows_vertical_indicator = vertical;
        self
    }

    #[must_use]
    pub fn with_indicator_insets(mut self, insets: impl Into<EdgeInsets>) -> Self {
        self.indicator_insets = insets.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidscroll_core::binding::Binding;

    #[test]
    fn defaults() {
        let c = ScrollConfig::default();
        assert_eq!(c.deceleration_rate, DecelerationRate::NORMAL);
        assert!(!c.always_bounce_horizontal);
        assert!(c.always_bounce_vertical);
        assert!(c.stop_dragging_immediately);
        assert!(c.is_scroll_enabled);
        assert!(c.shows_horizontal_indicator && c.shows_vertical_indicator);
        assert_eq!(c.content_offset.value(), Point::ZERO);
    }

    #[test]
    fn rate_constants() {
        assert_eq!(DecelerationRate::NORMAL.value(), 0.998);
        assert_eq!(DecelerationRate::FAST.value(), 0.99);
        assert_eq!(DecelerationRate::custom(0.5).value(), 0.5);
    }

    #[test]
    fn custom_rate_clamped() {
        assert!(DecelerationRate::custom(1.0).value() < 1.0);
        assert!(DecelerationRate::custom(0.0).value() > 0.0);
        assert_eq!(DecelerationRate::custom(f64::NAN), DecelerationRate::NORMAL);
    }

    #[test]
    fn sanitized_clamps_insets() {
        let c = ScrollConfig::default()
            .with_content_insets(EdgeInsets::new(-4.0, 2.0, 0.0, -1.0))
            .sanitized();
        assert_eq!(c.content_insets, EdgeInsets::new(0.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn for_axes_vertical_only() {
        let c = ScrollConfig::for_axes(Axes::VERTICAL, true);
        assert!(c.always_bounce_vertical);
        assert!(!c.always_bounce_horizontal);
        assert!(c.shows_vertical_indicator);
        assert!(!c.shows_horizontal_indicator);

        let hidden = ScrollConfig::for_axes(Axes::BOTH, false);
        assert!(hidden.bounces(Axis::Horizontal) && hidden.bounces(Axis::Vertical));
        assert!(!hidden.shows_indicator(Axis::Vertical));
    }

    #[test]
    fn binding_offset_source() {
        let binding = Binding::new(Point::new(0.0, 40.0));
        let c = ScrollConfig::default().with_content_offset(binding.clone());
        assert!(c.content_offset.binding().is_some());
        binding.set(Point::new(0.0, 80.0));
        assert_eq!(c.content_offset.value(), Point::new(0.0, 80.0));
    }

    #[test]
    fn debug_omits_provider() {
        let text = format!("{:?}", ScrollConfig::default());
        assert!(text.contains("deceleration_rate"));
        assert!(!text.contains("gesture_provider"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_sanitizes() {
        let c = ScrollConfig::from_json_str(
            r#"{"deceleration_rate": 3.0, "always_bounce_horizontal": true}"#,
        )
        .unwrap();
        assert!(c.deceleration_rate.value() < 1.0);
        assert!(c.always_bounce_horizontal);
        assert!(c.always_bounce_vertical);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_rejects_garbage() {
        let err = ScrollConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, crate::error::ScrollError::InvalidConfig(_)));
    }
}
