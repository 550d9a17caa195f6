#![forbid(unsafe_code)]

//! Pagination on top of the scroll engine.
//!
//! Pages are laid out in a row (or column) of equal extent `p`, separated by
//! `spacing` and surrounded by `margin`:
//!
//! ```text
//! content = 2·margin + n·p + (n − 1)·spacing
//! stride  = p + spacing
//! offset(i) = clamp(i · stride, 0, content − viewport)
//! ```
//!
//! [`PagingProvider`] snaps deceleration to page boundaries; [`PagingEngine`]
//! wraps a [`ScrollView`] with that provider and keeps the current page index
//! in sync with an optional binding.
//!
//! # Snapping
//!
//! | Release speed | Target |
//! |---------------|--------|
//! | below [`PAGE_ADVANCE_VELOCITY`] | page nearest the release offset |
//! | above | next boundary past the projected offset, in the direction of travel |
//!
//! With `constrained_deceleration`, the result never moves more than one page
//! away from the page nearest the gesture's starting offset.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use solidscroll_core::animation::completion::Completion;
use solidscroll_core::binding::{BindingSync, Source};
use solidscroll_core::event::{EventDirections, GestureEvent, Velocity};
use solidscroll_core::geometry::{Axis, EdgeInsets, Point, Size};
use tracing::debug;

use crate::config::{Axes, ScrollConfig};
use crate::engine::{GestureResponse, ScrollLayout, ScrollPhase};
use crate::physics::projected_distance;
use crate::provider::{ContentLayout, ContentProvider};
use crate::proxy::ScrollProxy;
use crate::view::ScrollView;

/// Release speed (points/second) above which a swipe advances a page.
pub const PAGE_ADVANCE_VELOCITY: f64 = 250.0;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Axis along which pages are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum PagingDirection {
    Vertical,
    #[default]
    Horizontal,
}

impl PagingDirection {
    /// The scroll axis pages follow.
    pub fn axis(self) -> Axis {
        match self {
            PagingDirection::Vertical => Axis::Vertical,
            PagingDirection::Horizontal => Axis::Horizontal,
        }
    }
}

/// Page geometry and snapping behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PagingConfig {
    pub direction: PagingDirection,
    /// Page extent along the paging axis; `None` uses the viewport extent
    /// minus both margins.
    pub size: Option<f64>,
    /// Space before the first and after the last page.
    pub margin: f64,
    /// Space between pages.
    pub spacing: f64,
    /// Limit a swipe to the neighbouring pages.
    pub constrained_deceleration: bool,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            direction: PagingDirection::Horizontal,
            size: None,
            margin: 0.0,
            spacing: 0.0,
            constrained_deceleration: true,
        }
    }
}

impl PagingConfig {
    /// Default configuration along `direction`.
    pub fn new(direction: PagingDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Parse from JSON and sanitize.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::error::ScrollResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Drop non-positive page sizes and negative spacing.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.size = self.size.filter(|s| s.is_finite() && *s > 0.0);
        self.margin = finite_non_negative(self.margin);
        self.spacing = finite_non_negative(self.spacing);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: Option<f64>) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_constrained_deceleration(mut self, constrained: bool) -> Self {
        self.constrained_deceleration = constrained;
        self
    }
}

fn finite_non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Layout math
// ---------------------------------------------------------------------------

/// Page geometry for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingLayout {
    pub config: PagingConfig,
    pub page_count: usize,
    pub viewport: Size,
}

impl PagingLayout {
    pub fn new(config: PagingConfig, page_count: usize, viewport: Size) -> Self {
        Self {
            config: config.sanitized(),
            page_count,
            viewport: viewport.sanitized(),
        }
    }

    fn axis(&self) -> Axis {
        self.config.direction.axis()
    }

    /// Extent of one page along the paging axis.
    ///
    /// Without an explicit size a page fills the viewport less both margins,
    /// so a page shown at `offset_of_page` sits exactly between them.
    pub fn page_extent(&self) -> f64 {
        self.config.size.unwrap_or_else(|| {
            (self.viewport.get(self.axis()) - 2.0 * self.config.margin).max(0.0)
        })
    }

    /// Distance between the starts of consecutive pages.
    pub fn stride(&self) -> f64 {
        self.page_extent() + self.config.spacing
    }

    /// Total content extent along the paging axis.
    pub fn content_extent(&self) -> f64 {
        let n = self.page_count as f64;
        let gaps = self.page_count.saturating_sub(1) as f64;
        2.0 * self.config.margin + n * self.page_extent() + gaps * self.config.spacing
    }

    /// Largest offset along the paging axis.
    pub fn max_offset(&self) -> f64 {
        (self.content_extent() - self.viewport.get(self.axis())).max(0.0)
    }

    /// Offset along the paging axis that shows page `index`.
    pub fn offset_of_page(&self, index: usize) -> f64 {
        (index as f64 * self.stride()).clamp(0.0, self.max_offset())
    }

    /// Last valid page index.
    pub fn last_page(&self) -> usize {
        self.page_count.saturating_sub(1)
    }

    /// Page whose offset is closest to `offset`.
    pub fn nearest_page(&self, offset: f64) -> usize {
        let stride = self.stride();
        if stride <= 0.0 || self.page_count == 0 {
            return 0;
        }
        let page = (offset / stride).round().max(0.0);
        (page as usize).min(self.last_page())
    }
}

// ---------------------------------------------------------------------------
// PagingProvider
// ---------------------------------------------------------------------------

/// Content provider that lays out pages and snaps to them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingProvider {
    config: PagingConfig,
    page_count: usize,
    rate: f64,
}

impl PagingProvider {
    /// `rate` is the deceleration rate used to project fast swipes.
    pub fn new(config: PagingConfig, page_count: usize, rate: f64) -> Self {
        Self {
            config: config.sanitized(),
            page_count,
            rate,
        }
    }

    pub fn layout_for(&self, viewport: Size) -> PagingLayout {
        PagingLayout::new(self.config, self.page_count, viewport)
    }

    /// Page index a release at `offset` snaps to.
    pub fn target_page(
        &self,
        offset: f64,
        original_offset: f64,
        velocity: f64,
        layout: &PagingLayout,
    ) -> usize {
        let stride = layout.stride();
        let page = if velocity.abs() < PAGE_ADVANCE_VELOCITY || stride <= 0.0 {
            layout.nearest_page(offset)
        } else {
            let projected = (offset + projected_distance(velocity, self.rate)) / stride;
            let snapped = if velocity > 0.0 {
                projected.ceil()
            } else {
                projected.floor()
            };
            (snapped.max(0.0) as usize).min(layout.last_page())
        };
        if !self.config.constrained_deceleration {
            return page;
        }
        let start = layout.nearest_page(original_offset);
        page.clamp(start.saturating_sub(1), (start + 1).min(layout.last_page()))
    }
}

impl ContentProvider for PagingProvider {
    fn layout(&self, measured: Size, viewport: Size, _insets: EdgeInsets) -> ContentLayout {
        let layout = self.layout_for(viewport);
        let axis = layout.axis();
        let cross = axis.cross();
        let size = Size::ZERO
            .with(axis, layout.content_extent())
            .with(cross, measured.get(cross).max(viewport.get(cross)));
        ContentLayout {
            size,
            origin: Point::ZERO,
        }
    }

    fn deceleration_target(
        &self,
        content_offset: Point,
        original_content_offset: Point,
        velocity: Velocity,
        viewport: Size,
    ) -> Option<Point> {
        if self.page_count == 0 {
            return None;
        }
        let layout = self.layout_for(viewport);
        let axis = layout.axis();
        let page = self.target_page(
            content_offset.get(axis),
            original_content_offset.get(axis),
            velocity.get(axis),
            &layout,
        );
        Some(content_offset.with(axis, layout.offset_of_page(page)))
    }

    fn next_page_offset(
        &self,
        offset: Point,
        directions: EventDirections,
        viewport: Size,
    ) -> Option<Point> {
        let layout = self.layout_for(viewport);
        let axis = layout.axis();
        let step = directions.step(axis);
        if step == 0.0 {
            return None;
        }
        let current = layout.nearest_page(offset.get(axis));
        let next = if step > 0.0 {
            (current + 1).min(layout.last_page())
        } else {
            current.saturating_sub(1)
        };
        Some(offset.with(axis, layout.offset_of_page(next)))
    }
}

// ---------------------------------------------------------------------------
// PagingEngine
// ---------------------------------------------------------------------------

/// A paged scroll region with a current page index.
#[derive(Debug)]
pub struct PagingEngine {
    view: ScrollView,
    config: PagingConfig,
    rate: f64,
    page_count: usize,
    current_page: usize,
    page_sync: BindingSync<usize>,
    viewport: Size,
    laid_out: bool,
}

impl PagingEngine {
    /// Pages along `config.direction`, bouncing only on that axis.
    pub fn new(config: PagingConfig, page_count: usize, page: impl Into<Source<usize>>) -> Self {
        let axes = match config.direction {
            PagingDirection::Horizontal => Axes::HORIZONTAL,
            PagingDirection::Vertical => Axes::VERTICAL,
        };
        Self::with_scroll_config(config, ScrollConfig::for_axes(axes, false), page_count, page)
    }

    /// Pages with an explicit scroll configuration.
    ///
    /// Content insets are ignored; pages supply their own margin.
    pub fn with_scroll_config(
        config: PagingConfig,
        scroll_config: ScrollConfig,
        page_count: usize,
        page: impl Into<Source<usize>>,
    ) -> Self {
        let config = config.sanitized();
        let scroll_config = scroll_config.with_content_insets(EdgeInsets::ZERO).sanitized();
        let rate = scroll_config.deceleration_rate.value();
        let page = page.into();
        let current_page = page.value().min(page_count.saturating_sub(1));
        let provider = PagingProvider::new(config, page_count, rate);
        Self {
            view: ScrollView::with_provider(scroll_config, provider),
            config,
            rate,
            page_count,
            current_page,
            page_sync: BindingSync::new(&page),
            viewport: Size::ZERO,
            laid_out: false,
        }
    }

    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// The underlying scroll region.
    pub fn view(&self) -> &ScrollView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ScrollView {
        &mut self.view
    }

    pub fn proxy(&self) -> ScrollProxy {
        self.view.proxy()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn paging_layout(&self) -> PagingLayout {
        PagingLayout::new(self.config, self.page_count, self.viewport)
    }

    /// Lay out pages in `viewport`.
    ///
    /// The current page is first resynced from wherever the offset was left,
    /// so a direct offset change through the proxy survives the pass. When the
    /// viewport changes while idle, the offset is re-aligned so the same page
    /// stays in view.
    pub fn layout(&mut self, viewport: Size) -> ScrollLayout {
        let viewport = viewport.sanitized();
        let realign = !self.laid_out || viewport != self.viewport;
        self.sync_page_from_offset();
        self.viewport = viewport;
        self.relayout(realign)
    }

    fn relayout(&mut self, realign: bool) -> ScrollLayout {
        let layout = self.view.layout(Size::ZERO, self.viewport);
        let idle = self.view.with_engine(|e| e.phase() == ScrollPhase::Idle);
        let first = !self.laid_out;
        self.laid_out = true;
        if first || (realign && idle) {
            let target = self.offset_of_page(self.current_page);
            if target != layout.content_offset {
                self.view.set_content_offset(target, false, Completion::none());
                return self.view.with_engine(|e| e.scroll_layout());
            }
        }
        layout
    }

    /// Change the number of pages, keeping the current page in range.
    pub fn set_page_count(&mut self, page_count: usize) {
        if page_count == self.page_count {
            return;
        }
        self.sync_page_from_offset();
        self.page_count = page_count;
        self.view
            .set_content_provider(PagingProvider::new(self.config, page_count, self.rate));
        let clamped = self.current_page.min(page_count.saturating_sub(1));
        if clamped != self.current_page {
            self.set_current_page(clamped);
        }
        if self.laid_out {
            self.relayout(true);
        }
    }

    /// Content offset that shows page `index` (clamped to the last page).
    pub fn offset_of_page(&self, index: usize) -> Point {
        let layout = self.paging_layout();
        let index = index.min(layout.last_page());
        let current = self.view.content_offset();
        current.with(layout.axis(), layout.offset_of_page(index))
    }

    /// Scroll to page `index`.
    ///
    /// The current page updates when the scroll settles.
    pub fn scroll_to_page(&mut self, index: usize, animated: bool, completion: Completion) {
        let index = index.min(self.page_count.saturating_sub(1));
        debug!(page = index, animated, "scroll to page");
        let target = self.offset_of_page(index);
        self.view.set_content_offset(target, animated, completion);
        self.sync_page_from_offset();
    }

    /// Offset of the neighbouring page in `directions`.
    pub fn content_offset_of_next_page(&self, directions: EventDirections) -> Point {
        self.view
            .with_engine(|e| e.content_offset_of_next_page(directions))
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureResponse {
        self.view.handle_gesture(event)
    }

    /// Advance one frame. Returns `true` while animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(page) = self.page_sync.poll_external() {
            let page = page.min(self.page_count.saturating_sub(1));
            debug!(page, "page changed externally");
            self.current_page = page;
            let target = self.offset_of_page(page);
            self.view.set_content_offset(target, false, Completion::none());
        }
        let animating = self.view.tick(dt);
        self.sync_page_from_offset();
        animating
    }

    fn sync_page_from_offset(&mut self) {
        let (idle, offset) = self
            .view
            .with_engine(|e| (e.phase() == ScrollPhase::Idle, e.content_offset()));
        if !idle || !self.laid_out {
            return;
        }
        let layout = self.paging_layout();
        let page = layout.nearest_page(offset.get(layout.axis()));
        if page != self.current_page {
            self.set_current_page(page);
        }
    }

    fn set_current_page(&mut self, page: usize) {
        debug!(from = self.current_page, to = page, "current page");
        self.current_page = page;
        self.page_sync.publish(page);
    }
}
