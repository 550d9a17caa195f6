#![forbid(unsafe_code)]

//! Content providers: pluggable content layout and deceleration targets.
//!
//! A [`ContentProvider`] turns the host's measured content size into the
//! scrollable content size, and may override where a released drag comes to
//! rest. [`AligningProvider`] is the default: it grows small content to fill
//! the viewport and positions it by alignment. Paging lives in
//! [`crate::paging::PagingProvider`].

use solidscroll_core::event::{EventDirections, Velocity};
use solidscroll_core::geometry::{Axis, EdgeInsets, Point, Size};

/// Result of laying out content inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentLayout {
    /// Scrollable content size.
    pub size: Size,
    /// Where the measured content sits inside `size`.
    pub origin: Point,
}

/// Capability trait for content layout and snapping.
pub trait ContentProvider {
    /// Compute the scrollable content size from the measured size.
    fn layout(&self, measured: Size, viewport: Size, insets: EdgeInsets) -> ContentLayout {
        let _ = (viewport, insets);
        ContentLayout {
            size: measured.sanitized(),
            origin: Point::ZERO,
        }
    }

    /// Where a drag released at `content_offset` should come to rest.
    ///
    /// `original_content_offset` is the offset when the gesture began and
    /// `viewport` the visible size. `None` means "use the projected target".
    fn deceleration_target(
        &self,
        content_offset: Point,
        original_content_offset: Point,
        velocity: Velocity,
        viewport: Size,
    ) -> Option<Point> {
        let _ = (content_offset, original_content_offset, velocity, viewport);
        None
    }

    /// Offset one "page" away from `offset` in `directions`, before clamping.
    ///
    /// `None` means "one viewport extent".
    fn next_page_offset(
        &self,
        offset: Point,
        directions: EventDirections,
        viewport: Size,
    ) -> Option<Point> {
        let _ = (offset, directions, viewport);
        None
    }
}

// ---------------------------------------------------------------------------
// AligningProvider
// ---------------------------------------------------------------------------

/// Placement of content smaller than the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left or top.
    Leading,
    #[default]
    Center,
    /// Right or bottom.
    Trailing,
}

impl Alignment {
    /// Offset of an item of length `inner` inside `outer`.
    pub fn position(self, inner: f64, outer: f64) -> f64 {
        let free = (outer - inner).max(0.0);
        match self {
            Alignment::Leading => 0.0,
            Alignment::Center => free / 2.0,
            Alignment::Trailing => free,
        }
    }
}

/// Grows content to the viewport along aligned axes.
///
/// An axis with `None` alignment keeps its measured extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AligningProvider {
    pub horizontal: Option<Alignment>,
    pub vertical: Option<Alignment>,
}

impl Default for AligningProvider {
    fn default() -> Self {
        Self::centered()
    }
}

impl AligningProvider {
    /// Center on both axes.
    pub fn centered() -> Self {
        Self {
            horizontal: Some(Alignment::Center),
            vertical: Some(Alignment::Center),
        }
    }

    /// No alignment: content keeps its measured size.
    pub fn unaligned() -> Self {
        Self {
            horizontal: None,
            vertical: None,
        }
    }

    /// Alignment along `axis`.
    pub fn alignment(&self, axis: Axis) -> Option<Alignment> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    #[must_use]
    pub fn with_horizontal(mut self, alignment: Option<Alignment>) -> Self {
        self.horizontal = alignment;
        self
    }

    #[must_use]
    pub fn with_vertical(mut self, alignment: Option<Alignment>) -> Self {
        self.vertical = alignment;
        self
    }
}

impl ContentProvider for AligningProvider {
    fn layout(&self, measured: Size, viewport: Size, insets: EdgeInsets) -> ContentLayout {
        let measured = measured.sanitized();
        let mut layout = ContentLayout {
            size: measured,
            origin: Point::ZERO,
        };
        for axis in Axis::BOTH {
            let Some(alignment) = self.alignment(axis) else {
                continue;
            };
            let available = (viewport.get(axis) - insets.sum(axis)).max(0.0);
            let extent = measured.get(axis).max(available);
            layout.size = layout.size.with(axis, extent);
            layout
                .origin
                .set(axis, alignment.position(measured.get(axis), extent));
        }
        layout
    }
}
