#![forbid(unsafe_code)]

//! Scroll indicator geometry.
//!
//! Indicators are thin bars along the trailing edges of the viewport. The
//! thumb length is proportional to the visible fraction of the content, and
//! its position to the offset within `[min, max]`. While over-scrolled the
//! thumb shrinks by the over-scroll distance, never below
//! [`MIN_THUMB_LENGTH`].
//!
//! All rectangles are in viewport coordinates (origin at the top-left of the
//! visible area).

use solidscroll_core::geometry::{Axis, Rect};

use crate::config::ScrollConfig;
use crate::eligibility::ScrollMetrics;

/// Bar thickness across the scroll axis.
pub const INDICATOR_THICKNESS: f64 = 3.0;

/// Shortest thumb ever drawn.
pub const MIN_THUMB_LENGTH: f64 = 8.0;

/// Track and thumb rectangles for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    pub track: Rect,
    pub thumb: Rect,
}

/// Indicators for both axes; `None` where hidden or not needed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollIndicators {
    pub horizontal: Option<IndicatorGeometry>,
    pub vertical: Option<IndicatorGeometry>,
}

impl ScrollIndicators {
    /// Compute indicator geometry for a region.
    pub fn compute(config: &ScrollConfig, metrics: &ScrollMetrics) -> Self {
        Self {
            horizontal: axis_indicator(Axis::Horizontal, config, metrics),
            vertical: axis_indicator(Axis::Vertical, config, metrics),
        }
    }

    /// Indicator along `axis`.
    pub fn get(&self, axis: Axis) -> Option<IndicatorGeometry> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

fn axis_indicator(
    axis: Axis,
    config: &ScrollConfig,
    metrics: &ScrollMetrics,
) -> Option<IndicatorGeometry> {
    if !config.shows_indicator(axis) || !metrics.overflows(axis) {
        return None;
    }
    let viewport = metrics.viewport_size;
    let insets = config.indicator_insets;

    let track = match axis {
        Axis::Vertical => Rect::new(
            (viewport.width - insets.right - INDICATOR_THICKNESS).max(0.0),
            insets.top,
            INDICATOR_THICKNESS,
            (viewport.height - insets.top - insets.bottom).max(0.0),
        ),
        Axis::Horizontal => Rect::new(
            insets.left,
            (viewport.height - insets.bottom - INDICATOR_THICKNESS).max(0.0),
            (viewport.width - insets.left - insets.right).max(0.0),
            INDICATOR_THICKNESS,
        ),
    };
    let track_len = track.size.get(axis);
    if track_len <= 0.0 {
        return None;
    }

    let total = metrics.content_size.get(axis) + metrics.content_insets.sum(axis);
    let ratio = if total > 0.0 {
        (viewport.get(axis) / total).min(1.0)
    } else {
        1.0
    };

    let offset = metrics.content_offset.get(axis);
    let min = metrics.min_content_offset.get(axis);
    let max = metrics.max_content_offset.get(axis);
    let overscroll = (min - offset).max(offset - max).max(0.0);

    let length = (track_len * ratio - overscroll)
        .max(MIN_THUMB_LENGTH)
        .min(track_len);
    let range = max - min;
    let progress = if range > 0.0 {
        ((offset - min) / range).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let start = track.min(axis) + progress * (track_len - length);

    let mut thumb = track;
    thumb.origin.set(axis, start);
    thumb.size = thumb.size.with(axis, length);
    Some(IndicatorGeometry { track, thumb })
}
