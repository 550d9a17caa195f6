#![forbid(unsafe_code)]

//! Gesture eligibility: which drag directions a region claims.
//!
//! An axis is scrollable when its content (plus insets) overflows the
//! viewport, or when bounce is forced on for that axis. Disabling scrolling
//! turns every direction off. A [`GestureProvider`] may replace either rule;
//! its default methods delegate to [`default_scrollable_directions`] and
//! [`default_gesture_mask`].

use solidscroll_core::event::{EventDirections, GestureMask};
use solidscroll_core::geometry::{Axis, EdgeInsets, Point, Size};

/// Snapshot of a region's state handed to a [`GestureProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub content_offset: Point,
    pub content_size: Size,
    pub viewport_size: Size,
    pub content_insets: EdgeInsets,
    pub min_content_offset: Point,
    pub max_content_offset: Point,
    pub always_bounce_horizontal: bool,
    pub always_bounce_vertical: bool,
    pub is_scroll_enabled: bool,
}

impl ScrollMetrics {
    /// Whether content plus insets exceeds the viewport along `axis`.
    pub fn overflows(&self, axis: Axis) -> bool {
        self.content_size.get(axis) + self.content_insets.sum(axis) > self.viewport_size.get(axis)
    }

    /// Whether bounce is forced on along `axis`.
    pub fn bounces(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.always_bounce_horizontal,
            Axis::Vertical => self.always_bounce_vertical,
        }
    }
}

/// Directions the default rule allows.
pub fn default_scrollable_directions(metrics: &ScrollMetrics) -> EventDirections {
    if !metrics.is_scroll_enabled {
        return EventDirections::empty();
    }
    Axis::BOTH
        .into_iter()
        .filter(|&axis| metrics.overflows(axis) || metrics.bounces(axis))
        .fold(EventDirections::empty(), |acc, axis| {
            acc | EventDirections::along(axis)
        })
}

/// Recognition mask the default rule requests.
pub fn default_gesture_mask(_metrics: &ScrollMetrics) -> GestureMask {
    GestureMask::ALL
}

/// Outcome of an eligibility query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub directions: EventDirections,
    pub mask: GestureMask,
}

impl Eligibility {
    /// Whether the region would claim a drag.
    pub fn claims(&self) -> bool {
        !self.directions.is_empty()
    }
}

/// Strategy deciding which gestures a region claims.
pub trait GestureProvider {
    /// Directions the region may scroll in.
    fn scrollable_directions(&self, metrics: &ScrollMetrics) -> EventDirections {
        default_scrollable_directions(metrics)
    }

    /// Simultaneous-recognition policy.
    fn gesture_mask(&self, metrics: &ScrollMetrics) -> GestureMask {
        default_gesture_mask(metrics)
    }

    /// Both answers together.
    fn eligibility(&self, metrics: &ScrollMetrics) -> Eligibility {
        Eligibility {
            directions: self.scrollable_directions(metrics),
            mask: self.gesture_mask(metrics),
        }
    }
}

/// Provider that uses the default rules unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGestureProvider;

impl GestureProvider for DefaultGestureProvider {}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(content: Size, viewport: Size) -> ScrollMetrics {
        ScrollMetrics {
            content_size: content,
            viewport_size: viewport,
            is_scroll_enabled: true,
            ..ScrollMetrics::default()
        }
    }

    #[test]
    fn overflowing_axis_is_scrollable() {
        let m = metrics(Size::new(100.0, 800.0), Size::new(100.0, 200.0));
        assert_eq!(default_scrollable_directions(&m), EventDirections::VERTICAL);
    }

    #[test]
    fn fitting_content_without_bounce_is_not_scrollable() {
        let m = metrics(Size::new(100.0, 100.0), Size::new(100.0, 200.0));
        assert!(default_scrollable_directions(&m).is_empty());
    }

    #[test]
    fn bounce_makes_axis_scrollable() {
        let mut m = metrics(Size::new(100.0, 100.0), Size::new(100.0, 200.0));
        m.always_bounce_horizontal = true;
        assert_eq!(default_scrollable_directions(&m), EventDirections::HORIZONTAL);
    }

    #[test]
    fn insets_count_towards_overflow() {
        let mut m = metrics(Size::new(100.0, 190.0), Size::new(100.0, 200.0));
        m.content_insets = EdgeInsets::new(20.0, 0.0, 0.0, 0.0);
        assert!(m.overflows(Axis::Vertical));
    }

    #[test]
    fn disabled_scrolling_claims_nothing() {
        let mut m = metrics(Size::new(800.0, 800.0), Size::new(100.0, 200.0));
        m.always_bounce_vertical = true;
        m.is_scroll_enabled = false;
        let e = DefaultGestureProvider.eligibility(&m);
        assert!(!e.claims());
        assert_eq!(e.mask, GestureMask::ALL);
    }

    #[test]
    fn custom_provider_overrides_directions() {
        struct VerticalOnly;
        impl GestureProvider for VerticalOnly {
            fn scrollable_directions(&self, metrics: &ScrollMetrics) -> EventDirections {
                default_scrollable_directions(metrics) & EventDirections::VERTICAL
            }
            fn gesture_mask(&self, _: &ScrollMetrics) -> GestureMask {
                GestureMask::GESTURE
            }
        }
        let m = metrics(Size::new(800.0, 800.0), Size::new(100.0, 200.0));
        let e = VerticalOnly.eligibility(&m);
        assert_eq!(e.directions, EventDirections::VERTICAL);
        assert_eq!(e.mask, GestureMask::GESTURE);
    }
}
