#![forbid(unsafe_code)]

//! The scroll state machine.
//!
//! [`ScrollEngine`] owns the content offset of one scrollable region and
//! moves it through four phases:
//!
//! ```text
//!            began (eligible)           ended / cancelled
//!   Idle ───────────────────▶ Dragging ─────────────────▶ Decelerating
//!    ▲                           │   ▲                         │
//!    │      ended at rest        │   │ began                   │ settled
//!    ├───────────────────────────┘   └─────────────────────────┤
//!    │                                                         │
//!    └──────── settled ── ProgrammaticAnimating ◀── set_content_offset(animated)
//! ```
//!
//! The host drives it with [`layout`](ScrollEngine::layout) once per layout
//! pass, [`handle_gesture`](ScrollEngine::handle_gesture) for every drag
//! sample, and [`tick`](ScrollEngine::tick) once per frame.
//!
//! # Invariants
//!
//! 1. `min_content_offset <= max_content_offset` on both axes.
//! 2. Outside `Dragging` and `Decelerating` the offset lies within
//!    `[min, max]`; settling always clamps.
//! 3. At most one animation is active; starting another, or a drag,
//!    finishes the previous completion with `false` first.
//! 4. Every completion handed to the engine finishes exactly once.
//!
//! # Completions
//!
//! The engine never runs user closures itself. Finished completions are
//! queued and handed out by [`drain_finished`](ScrollEngine::drain_finished);
//! [`crate::view::ScrollView`] fires them after releasing its borrow.

use std::time::Duration;

use solidscroll_core::animation::completion::{Completion, FinishedCompletion};
use solidscroll_core::animation::Decay;
use solidscroll_core::binding::BindingSync;
use solidscroll_core::event::{EventDirections, GestureEvent, GestureMask, Velocity};
use solidscroll_core::geometry::{Axis, Point, Rect, Size, Vector};
use tracing::{debug, trace};

use crate::config::{DecelerationRate, ScrollConfig};
use crate::eligibility::{Eligibility, ScrollMetrics};
use crate::indicator::ScrollIndicators;
use crate::physics::{self, AxisPlan, AxisTrack, RubberBand, Tracks, VELOCITY_EPSILON};
use crate::provider::{AligningProvider, ContentLayout, ContentProvider};

/// Distance under which an animated command is treated as already there.
const ARRIVAL_EPSILON: f64 = 0.1;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// What the engine is doing with the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// Following a finger.
    Dragging,
    /// Coasting after release, possibly bouncing or snapping.
    Decelerating,
    /// Running an animated `set_content_offset` or `scroll_rect_to_visible`.
    ProgrammaticAnimating,
}

/// How the engine treated a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureResponse {
    /// A drag began and the region took it.
    Claimed {
        directions: EventDirections,
        mask: GestureMask,
    },
    /// The event belonged to a claimed drag.
    Handled,
    /// The region cannot scroll; the host should route the drag elsewhere.
    NotClaimed,
    /// No drag is in progress for this event.
    Ignored,
}

impl GestureResponse {
    /// Whether the region consumed the event.
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Claimed { .. } | Self::Handled)
    }
}

/// Geometry reported after each layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollLayout {
    pub content_offset: Point,
    /// Viewport size.
    pub size: Size,
    /// The offset rectangle clipped to the content bounds.
    pub visible_rect: Rect,
}

/// Everything a proxy compares for equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub layout: ScrollLayout,
    pub min_content_offset: Point,
    pub max_content_offset: Point,
    pub content_size: Size,
    pub is_dragging: bool,
    pub is_decelerating: bool,
    pub is_scrolling_horizontally: bool,
    pub is_scrolling_vertically: bool,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct DragSession {
    /// Unconstrained offset; the visual offset is its rubber-banded image.
    raw: Point,
    /// Offset when the drag took over.
    origin: Point,
    directions: EventDirections,
    /// False while an interrupted animation is still allowed to run.
    active: bool,
}

#[derive(Debug)]
struct ActiveAnimation {
    tracks: Tracks,
    completion: Completion,
    /// Outcome reported if the animation runs to the end.
    reaches_target: bool,
}

// ---------------------------------------------------------------------------
// ScrollEngine
// ---------------------------------------------------------------------------

/// Scroll state for one region.
pub struct ScrollEngine {
    config: ScrollConfig,
    provider: Box<dyn ContentProvider>,
    phase: ScrollPhase,
    offset: Point,
    velocity: Velocity,
    measured: Size,
    viewport: Size,
    content: ContentLayout,
    laid_out: bool,
    drag: Option<DragSession>,
    animation: Option<ActiveAnimation>,
    frame_origin: Point,
    finished: Vec<FinishedCompletion>,
    offset_sync: BindingSync<Point>,
}

impl std::fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("viewport", &self.viewport)
            .field("content", &self.content)
            .field("drag", &self.drag)
            .field("animating", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}

impl ScrollEngine {
    /// Create an engine that centers small content.
    pub fn new(config: ScrollConfig) -> Self {
        Self::with_provider(config, Box::new(AligningProvider::default()))
    }

    /// Create an engine with a custom content provider.
    pub fn with_provider(config: ScrollConfig, provider: Box<dyn ContentProvider>) -> Self {
        let config = config.sanitized();
        let offset = config.content_offset.value();
        let offset_sync = BindingSync::new(&config.content_offset);
        Self {
            config,
            provider,
            phase: ScrollPhase::Idle,
            offset,
            velocity: Velocity::ZERO,
            measured: Size::ZERO,
            viewport: Size::ZERO,
            content: ContentLayout::default(),
            laid_out: false,
            drag: None,
            animation: None,
            frame_origin: offset,
            finished: Vec::new(),
            offset_sync,
        }
    }

    // -- configuration ------------------------------------------------------

    /// Current configuration.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Replace the configuration and re-clamp.
    pub fn set_config(&mut self, config: ScrollConfig) {
        let config = config.sanitized();
        let rebinding = match (config.content_offset.binding(), self.config.content_offset.binding()) {
            (Some(new), Some(old)) => !new.ptr_eq(old),
            (None, None) => false,
            _ => true,
        };
        self.config = config;
        if rebinding {
            self.offset_sync = BindingSync::new(&self.config.content_offset);
            if self.offset_sync.is_bound() {
                let offset = self.config.content_offset.value();
                self.apply_external_offset(offset);
            }
        }
        self.relayout();
    }

    /// Replace the content provider.
    pub fn set_content_provider(&mut self, provider: Box<dyn ContentProvider>) {
        self.provider = provider;
        self.relayout();
    }

    // -- geometry -----------------------------------------------------------

    /// Lay out `measured` content in a `viewport`.
    ///
    /// The first call applies the configured initial offset. While idle, the
    /// offset is re-clamped to the new bounds.
    pub fn layout(&mut self, measured: Size, viewport: Size) -> ScrollLayout {
        self.measured = measured.sanitized();
        self.viewport = viewport.sanitized();
        if !self.laid_out {
            self.laid_out = true;
            self.offset = self.config.content_offset.value();
            self.frame_origin = self.offset;
        }
        self.relayout();
        self.scroll_layout()
    }

    fn relayout(&mut self) {
        self.content = self
            .provider
            .layout(self.measured, self.viewport, self.config.content_insets);
        if self.laid_out && self.phase == ScrollPhase::Idle {
            let clamped = self.clamp(self.offset);
            if clamped != self.offset {
                self.offset = clamped;
                self.offset_sync.publish(clamped);
            }
        }
    }

    /// Smallest settled offset: the negated leading insets.
    pub fn min_content_offset(&self) -> Point {
        let insets = self.config.content_insets;
        Point::new(-insets.left, -insets.top)
    }

    /// Largest settled offset, never below the minimum.
    pub fn max_content_offset(&self) -> Point {
        let min = self.min_content_offset();
        let insets = self.config.content_insets;
        let mut max = Point::ZERO;
        for axis in Axis::BOTH {
            let end = self.content.size.get(axis) + insets.trailing(axis) - self.viewport.get(axis);
            max.set(axis, end.max(min.get(axis)));
        }
        max
    }

    /// Clamp `offset` into the settled range.
    pub fn clamp(&self, offset: Point) -> Point {
        offset.clamp(self.min_content_offset(), self.max_content_offset())
    }

    pub fn content_offset(&self) -> Point {
        self.offset
    }

    /// Scrollable content size after provider layout.
    pub fn content_size(&self) -> Size {
        self.content.size
    }

    /// Provider layout, including where the measured content sits.
    pub fn content_layout(&self) -> ContentLayout {
        self.content
    }

    /// Viewport size.
    pub fn page_size(&self) -> Size {
        self.viewport
    }

    /// The viewport rectangle in content coordinates, clipped to the content.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.viewport)
            .intersection(&Rect::from_size(self.content.size))
    }

    pub fn scroll_layout(&self) -> ScrollLayout {
        ScrollLayout {
            content_offset: self.offset,
            size: self.viewport,
            visible_rect: self.visible_rect(),
        }
    }

    /// State handed to gesture providers.
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            content_offset: self.offset,
            content_size: self.content.size,
            viewport_size: self.viewport,
            content_insets: self.config.content_insets,
            min_content_offset: self.min_content_offset(),
            max_content_offset: self.max_content_offset(),
            always_bounce_horizontal: self.config.always_bounce_horizontal,
            always_bounce_vertical: self.config.always_bounce_vertical,
            is_scroll_enabled: self.config.is_scroll_enabled,
        }
    }

    /// Directions and mask the gesture provider reports right now.
    ///
    /// With scrolling disabled no direction is eligible, whatever the
    /// provider says.
    pub fn eligibility(&self) -> Eligibility {
        let metrics = self.metrics();
        let mut eligibility = self.config.gesture_provider.eligibility(&metrics);
        if !metrics.is_scroll_enabled {
            eligibility.directions = EventDirections::empty();
        }
        eligibility
    }

    /// Indicator geometry for the current state.
    pub fn indicators(&self) -> ScrollIndicators {
        ScrollIndicators::compute(&self.config, &self.metrics())
    }

    // -- status -------------------------------------------------------------

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Latest velocity estimate in points per second.
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == ScrollPhase::Dragging
    }

    pub fn is_decelerating(&self) -> bool {
        self.phase == ScrollPhase::Decelerating
    }

    /// Whether the offset is being driven by anything.
    pub fn is_scrolling(&self) -> bool {
        self.phase != ScrollPhase::Idle
    }

    /// Whether the offset moved horizontally since the current frame began.
    pub fn is_scrolling_horizontally(&self) -> bool {
        self.offset.x != self.frame_origin.x
    }

    /// Whether the offset moved vertically since the current frame began.
    pub fn is_scrolling_vertically(&self) -> bool {
        self.offset.y != self.frame_origin.y
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            layout: self.scroll_layout(),
            min_content_offset: self.min_content_offset(),
            max_content_offset: self.max_content_offset(),
            content_size: self.content.size,
            is_dragging: self.is_dragging(),
            is_decelerating: self.is_decelerating(),
            is_scrolling_horizontally: self.is_scrolling_horizontally(),
            is_scrolling_vertically: self.is_scrolling_vertically(),
        }
    }

    /// Take completions that finished since the last call.
    pub fn drain_finished(&mut self) -> Vec<FinishedCompletion> {
        std::mem::take(&mut self.finished)
    }

    // -- transitions --------------------------------------------------------

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, offset = ?self.offset, "scroll phase");
            self.phase = phase;
        }
    }

    /// Stop the running animation, finishing its completion with `false`.
    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            debug!(offset = ?self.offset, "animation interrupted");
            self.finished.push(animation.completion.finish(false));
            self.velocity = Velocity::ZERO;
        }
    }

    fn settle(&mut self) {
        self.offset = self.clamp(self.offset);
        self.velocity = Velocity::ZERO;
        self.set_phase(ScrollPhase::Idle);
        self.offset_sync.publish(self.offset);
    }

    fn rubber_band(&self, axis: Axis) -> RubberBand {
        RubberBand::new(self.viewport.get(axis))
    }

    // -- gestures -----------------------------------------------------------

    /// Feed one gesture event.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureResponse {
        let _span = tracing::debug_span!("scroll_gesture", phase = ?event.phase()).entered();
        match event {
            GestureEvent::Began => self.drag_began(),
            GestureEvent::Changed { delta, velocity } => self.drag_changed(delta, velocity),
            GestureEvent::Ended { velocity } => self.drag_ended(velocity),
            GestureEvent::Cancelled => self.drag_ended(Velocity::ZERO),
        }
    }

    fn drag_began(&mut self) -> GestureResponse {
        let eligibility = self.eligibility();
        if !eligibility.claims() {
            debug!("gesture not claimed");
            return GestureResponse::NotClaimed;
        }
        let animating = self.animation.is_some();
        let mut session = DragSession {
            raw: self.offset,
            origin: self.offset,
            directions: eligibility.directions,
            active: false,
        };
        if !animating || self.config.stop_dragging_immediately {
            self.activate(&mut session);
        }
        self.drag = Some(session);
        GestureResponse::Claimed {
            directions: eligibility.directions,
            mask: eligibility.mask,
        }
    }

    /// Take over from whatever was moving the offset.
    fn activate(&mut self, session: &mut DragSession) {
        self.cancel_animation();
        let min = self.min_content_offset();
        let max = self.max_content_offset();
        for axis in Axis::BOTH {
            let visual = self.offset.get(axis);
            let raw = if self.config.bounces(axis) {
                self.rubber_band(axis)
                    .unband(visual, min.get(axis), max.get(axis))
            } else {
                visual
            };
            session.raw.set(axis, raw);
        }
        session.origin = self.offset;
        session.active = true;
        self.velocity = Velocity::ZERO;
        self.set_phase(ScrollPhase::Dragging);
    }

    fn drag_changed(&mut self, delta: Vector, velocity: Velocity) -> GestureResponse {
        let Some(mut session) = self.drag else {
            return GestureResponse::Ignored;
        };
        if !session.active {
            self.activate(&mut session);
        }
        let min = self.min_content_offset();
        let max = self.max_content_offset();
        let mut velocity_out = Velocity::ZERO;
        for axis in Axis::BOTH {
            if !session.directions.allows(axis) {
                continue;
            }
            let raw = session.raw.get(axis) + delta.get(axis);
            session.raw.set(axis, raw);
            let (lo, hi) = (min.get(axis), max.get(axis));
            let visual = if self.config.bounces(axis) {
                self.rubber_band(axis).band(raw, lo, hi)
            } else {
                raw.clamp(lo, hi)
            };
            self.offset.set(axis, visual);
            velocity_out = velocity_out.with(axis, velocity.get(axis));
        }
        self.velocity = velocity_out;
        self.drag = Some(session);
        trace!(offset = ?self.offset, "drag moved");
        GestureResponse::Handled
    }

    fn drag_ended(&mut self, velocity: Velocity) -> GestureResponse {
        let Some(session) = self.drag.take() else {
            return GestureResponse::Ignored;
        };
        if !session.active {
            // Touched and released without moving: the animation carries on.
            return GestureResponse::Handled;
        }
        let mut release_velocity = Velocity::ZERO;
        for axis in Axis::BOTH {
            if session.directions.allows(axis) {
                release_velocity = release_velocity.with(axis, velocity.get(axis));
            }
        }
        self.decelerate(session.origin, release_velocity);
        GestureResponse::Handled
    }

    fn decelerate(&mut self, origin: Point, velocity: Velocity) {
        let release = self.offset;
        let rate = self.config.deceleration_rate.value();
        let at_rest = velocity.magnitude() < VELOCITY_EPSILON;
        let provider_target =
            self.provider
                .deceleration_target(release, origin, velocity, self.viewport);
        let raw_target = match provider_target {
            Some(target) => target,
            None if at_rest => release,
            None => physics::project(release, velocity, rate),
        };

        let in_bounds = self.clamp(release) == release;
        if at_rest && in_bounds && raw_target == release {
            self.settle();
            return;
        }

        let min = self.min_content_offset();
        let max = self.max_content_offset();
        let mut tracks = Tracks::default();
        for axis in Axis::BOTH {
            *tracks.get_mut(axis) = AxisPlan {
                start: release.get(axis),
                raw_target: raw_target.get(axis),
                min: min.get(axis),
                max: max.get(axis),
                bounces: self.config.bounces(axis),
                rate,
                band: self.rubber_band(axis),
            }
            .track();
        }
        debug!(
            release = ?release,
            target = ?raw_target,
            velocity = ?velocity,
            "decelerating"
        );
        self.velocity = velocity;
        self.animation = Some(ActiveAnimation {
            tracks,
            completion: Completion::none(),
            reaches_target: true,
        });
        self.set_phase(ScrollPhase::Decelerating);
    }

    // -- programmatic -------------------------------------------------------

    /// Move to `target` (clamped), optionally animating.
    ///
    /// `completion` finishes with `true` once the offset arrives, or `false`
    /// if interrupted or if the target lies on an axis with no scroll range.
    pub fn set_content_offset(&mut self, target: Point, animated: bool, completion: Completion) {
        if self.drag.take().is_some() {
            debug!("programmatic scroll ended the drag");
        }
        self.cancel_animation();

        let clamped = self.clamp(target);
        let min = self.min_content_offset();
        let max = self.max_content_offset();
        let reaches_target = Axis::BOTH.into_iter().all(|axis| {
            min.get(axis) < max.get(axis) || clamped.get(axis) == target.get(axis)
        });
        debug!(target = ?target, clamped = ?clamped, animated, "set content offset");

        if !animated || self.offset.approx_eq(clamped, ARRIVAL_EPSILON) {
            self.offset = clamped;
            self.settle();
            self.finished.push(completion.finish(reaches_target));
            return;
        }

        let rate = DecelerationRate::FAST.value();
        let mut tracks = Tracks::default();
        for axis in Axis::BOTH {
            let (from, to) = (self.offset.get(axis), clamped.get(axis));
            if from != to {
                *tracks.get_mut(axis) = AxisTrack::Decay(Decay::new(from, to, rate));
            }
        }
        self.animation = Some(ActiveAnimation {
            tracks,
            completion,
            reaches_target,
        });
        self.set_phase(ScrollPhase::ProgrammaticAnimating);
    }

    /// Scroll the minimum distance that makes `rect` visible.
    ///
    /// A rectangle larger than the viewport aligns its leading edge.
    pub fn scroll_rect_to_visible(&mut self, rect: Rect, animated: bool, completion: Completion) {
        let target = self.offset_revealing(rect);
        self.set_content_offset(target, animated, completion);
    }

    fn offset_revealing(&self, rect: Rect) -> Point {
        let mut target = self.offset;
        for axis in Axis::BOTH {
            let extent = self.viewport.get(axis);
            let start = self.offset.get(axis);
            let (lo, hi) = (rect.min(axis), rect.max(axis));
            let value = if hi - lo > extent || lo < start {
                lo
            } else if hi > start + extent {
                hi - extent
            } else {
                start
            };
            target.set(axis, value);
        }
        target
    }

    /// Offset one page away in `directions`, clamped to bounds.
    pub fn content_offset_of_next_page(&self, directions: EventDirections) -> Point {
        let next = self
            .provider
            .next_page_offset(self.offset, directions, self.viewport)
            .unwrap_or_else(|| {
                let mut next = self.offset;
                for axis in Axis::BOTH {
                    let step = directions.step(axis) * self.viewport.get(axis);
                    next.set(axis, next.get(axis) + step);
                }
                next
            });
        self.clamp(next)
    }

    // -- external bindings --------------------------------------------------

    fn apply_external_offset(&mut self, offset: Point) {
        self.drag = None;
        self.cancel_animation();
        let clamped = if self.laid_out { self.clamp(offset) } else { offset };
        debug!(offset = ?offset, "content offset changed externally");
        self.offset = clamped;
        self.velocity = Velocity::ZERO;
        self.set_phase(ScrollPhase::Idle);
        if clamped != offset {
            self.offset_sync.publish(clamped);
        }
    }

    // -- frames -------------------------------------------------------------

    /// Advance animations by `dt`.
    ///
    /// Returns `true` if an animation moved the offset this frame.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(offset) = self.offset_sync.poll_external() {
            self.apply_external_offset(offset);
        }
        self.frame_origin = self.offset;

        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        animation.tracks.tick(dt);
        self.offset = animation.tracks.apply(self.offset);
        self.velocity = animation.tracks.velocity();
        trace!(offset = ?self.offset, dt_ms = dt.as_secs_f64() * 1000.0, "scroll tick");

        if animation.tracks.is_settled() {
            if let Some(done) = self.animation.take() {
                self.settle();
                self.finished.push(done.completion.finish(done.reaches_target));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidscroll_core::binding::Binding;
    use solidscroll_core::geometry::EdgeInsets;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    fn vertical_engine(config: ScrollConfig) -> ScrollEngine {
        let mut engine = ScrollEngine::with_provider(config, Box::new(AligningProvider::unaligned()));
        engine.layout(Size::new(100.0, 800.0), Size::new(100.0, 200.0));
        engine
    }

    fn run_to_idle(engine: &mut ScrollEngine) -> usize {
        let mut frames = 0;
        while engine.is_animating() {
            engine.tick(FRAME);
            frames += 1;
            assert!(frames < 2000, "animation never settled");
        }
        frames
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, Completion) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, Completion::new(move |done| sink.borrow_mut().push(done)))
    }

    fn fire_all(engine: &mut ScrollEngine) {
        for finished in engine.drain_finished() {
            finished.fire();
        }
    }

    #[test]
    fn bounds_follow_content_viewport_and_insets() {
        let config = ScrollConfig::default().with_content_insets(EdgeInsets::new(10.0, 5.0, 20.0, 0.0));
        let engine = vertical_engine(config);
        assert_eq!(engine.min_content_offset(), Point::new(-5.0, -10.0));
        assert_eq!(engine.max_content_offset(), Point::new(0.0, 620.0));
    }

    #[test]
    fn initial_offset_applied_on_first_layout_and_clamped() {
        let config = ScrollConfig::default().with_initial_offset(Point::new(0.0, 5000.0));
        let engine = vertical_engine(config);
        assert_eq!(engine.content_offset(), Point::new(0.0, 600.0));
    }

    #[test]
    fn not_claimed_when_nothing_scrolls() {
        let config = ScrollConfig::default().with_bounce(false, false);
        let mut engine = ScrollEngine::with_provider(config, Box::new(AligningProvider::unaligned()));
        engine.layout(Size::new(100.0, 100.0), Size::new(100.0, 200.0));
        assert_eq!(engine.handle_gesture(GestureEvent::Began), GestureResponse::NotClaimed);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
    }

    struct EveryDirection;

    impl crate::eligibility::GestureProvider for EveryDirection {
        fn scrollable_directions(&self, _metrics: &ScrollMetrics) -> EventDirections {
            EventDirections::all()
        }
    }

    #[test]
    fn disabled_scrolling_overrides_custom_gesture_provider() {
        let config = ScrollConfig::default()
            .with_gesture_provider(EveryDirection)
            .with_scroll_enabled(false);
        let mut engine = vertical_engine(config);
        assert!(!engine.eligibility().claims());
        assert_eq!(engine.handle_gesture(GestureEvent::Began), GestureResponse::NotClaimed);
        engine.handle_gesture(GestureEvent::changed(0.0, 50.0, Velocity::ZERO));
        engine.handle_gesture(GestureEvent::ended(Velocity::ZERO));
        assert_eq!(engine.content_offset(), Point::ZERO);
        assert_eq!(engine.phase(), ScrollPhase::Idle);

        engine.set_config(engine.config().clone().with_scroll_enabled(true));
        assert_eq!(engine.eligibility().directions, EventDirections::all());
    }

    #[test]
    fn changed_without_began_is_ignored() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let r = engine.handle_gesture(GestureEvent::changed(0.0, 10.0, Velocity::ZERO));
        assert_eq!(r, GestureResponse::Ignored);
        assert_eq!(
            engine.handle_gesture(GestureEvent::ended(Velocity::ZERO)),
            GestureResponse::Ignored
        );
    }

    #[test]
    fn drag_moves_only_eligible_axes() {
        let mut engine = vertical_engine(ScrollConfig::default());
        assert!(engine.handle_gesture(GestureEvent::Began).is_consumed());
        assert!(engine.is_dragging());
        engine.handle_gesture(GestureEvent::changed(30.0, 50.0, Velocity::ZERO));
        assert_eq!(engine.content_offset(), Point::new(0.0, 50.0));
        assert!(engine.is_scrolling_vertically());
        assert!(!engine.is_scrolling_horizontally());
    }

    #[test]
    fn drag_release_at_rest_goes_idle() {
        let mut engine = vertical_engine(ScrollConfig::default());
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, 120.0, Velocity::ZERO));
        engine.handle_gesture(GestureEvent::ended(Velocity::per_second(0.0, 0.5)));
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.content_offset(), Point::new(0.0, 120.0));
    }

    #[test]
    fn overscroll_is_rubber_banded_and_bounces_back() {
        let mut engine = vertical_engine(ScrollConfig::default());
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, -100.0, Velocity::ZERO));
        let y = engine.content_offset().y;
        assert!(y < 0.0 && y > -100.0, "rubber band should compress, got {y}");
        engine.handle_gesture(GestureEvent::Cancelled);
        assert!(engine.is_decelerating());
        run_to_idle(&mut engine);
        assert_eq!(engine.content_offset(), Point::new(0.0, 0.0));
    }

    #[test]
    fn overscroll_hard_clamped_without_bounce() {
        let mut engine = vertical_engine(ScrollConfig::default().with_bounce(false, false));
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, -100.0, Velocity::ZERO));
        assert_eq!(engine.content_offset().y, 0.0);
    }

    #[test]
    fn fling_without_bounce_lands_on_max() {
        let config = ScrollConfig::default().with_bounce(false, false);
        let mut engine = vertical_engine(config);
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, 100.0, Velocity::ZERO));
        engine.handle_gesture(GestureEvent::ended(Velocity::per_second(0.0, 3000.0)));
        assert!(engine.is_decelerating());
        run_to_idle(&mut engine);
        assert_eq!(engine.content_offset().y, 600.0);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn programmatic_without_animation_is_immediate() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (log, completion) = recorder();
        engine.set_content_offset(Point::new(0.0, 900.0), false, completion);
        assert_eq!(engine.content_offset(), Point::new(0.0, 600.0));
        fire_all(&mut engine);
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn programmatic_animation_completes_true() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (log, completion) = recorder();
        engine.set_content_offset(Point::new(0.0, 300.0), true, completion);
        assert_eq!(engine.phase(), ScrollPhase::ProgrammaticAnimating);
        run_to_idle(&mut engine);
        fire_all(&mut engine);
        assert_eq!(engine.content_offset(), Point::new(0.0, 300.0));
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn interrupting_animation_reports_false_once() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (first, c1) = recorder();
        let (second, c2) = recorder();
        engine.set_content_offset(Point::new(0.0, 300.0), true, c1);
        engine.tick(FRAME);
        engine.set_content_offset(Point::new(0.0, 100.0), true, c2);
        run_to_idle(&mut engine);
        fire_all(&mut engine);
        assert_eq!(*first.borrow(), vec![false]);
        assert_eq!(*second.borrow(), vec![true]);
    }

    #[test]
    fn drag_cancels_programmatic_animation() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (log, completion) = recorder();
        engine.set_content_offset(Point::new(0.0, 500.0), true, completion);
        engine.tick(FRAME);
        let mid = engine.content_offset();
        engine.handle_gesture(GestureEvent::Began);
        fire_all(&mut engine);
        assert_eq!(*log.borrow(), vec![false]);
        assert!(engine.is_dragging());
        assert_eq!(engine.content_offset(), mid);
    }

    #[test]
    fn lazy_stop_keeps_animation_until_first_sample() {
        let config = ScrollConfig::default().with_stop_dragging_immediately(false);
        let mut engine = vertical_engine(config);
        let (log, completion) = recorder();
        engine.set_content_offset(Point::new(0.0, 500.0), true, completion);
        engine.handle_gesture(GestureEvent::Began);
        assert_eq!(engine.phase(), ScrollPhase::ProgrammaticAnimating);
        engine.handle_gesture(GestureEvent::ended(Velocity::ZERO));
        run_to_idle(&mut engine);
        fire_all(&mut engine);
        assert_eq!(*log.borrow(), vec![true]);

        let (log, completion) = recorder();
        engine.set_content_offset(Point::new(0.0, 0.0), true, completion);
        engine.tick(FRAME);
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, 1.0, Velocity::ZERO));
        assert!(engine.is_dragging());
        fire_all(&mut engine);
        assert_eq!(*log.borrow(), vec![false]);
    }

    #[test]
    fn programmatic_call_ends_drag() {
        let mut engine = vertical_engine(ScrollConfig::default());
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, 40.0, Velocity::ZERO));
        engine.set_content_offset(Point::new(0.0, 200.0), false, Completion::none());
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        let r = engine.handle_gesture(GestureEvent::changed(0.0, 40.0, Velocity::ZERO));
        assert_eq!(r, GestureResponse::Ignored);
        assert_eq!(engine.content_offset(), Point::new(0.0, 200.0));
    }

    #[test]
    fn collapsed_axis_reports_unreachable() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (log, completion) = recorder();
        // Horizontal range is collapsed: content width equals the viewport.
        engine.set_content_offset(Point::new(50.0, 100.0), true, completion);
        run_to_idle(&mut engine);
        fire_all(&mut engine);
        assert_eq!(engine.content_offset(), Point::new(0.0, 100.0));
        assert_eq!(*log.borrow(), vec![false]);
    }

    #[test]
    fn animated_call_at_target_completes_immediately() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (log, completion) = recorder();
        engine.set_content_offset(Point::ZERO, true, completion);
        assert!(!engine.is_animating());
        fire_all(&mut engine);
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn scroll_rect_to_visible_minimal_delta() {
        let mut engine = vertical_engine(ScrollConfig::default());
        engine.scroll_rect_to_visible(Rect::new(0.0, 300.0, 100.0, 50.0), false, Completion::none());
        assert_eq!(engine.content_offset().y, 150.0);
        // Already visible: no move.
        engine.scroll_rect_to_visible(Rect::new(0.0, 200.0, 100.0, 50.0), false, Completion::none());
        assert_eq!(engine.content_offset().y, 150.0);
        // Above the viewport: align leading edge.
        engine.scroll_rect_to_visible(Rect::new(0.0, 20.0, 100.0, 10.0), false, Completion::none());
        assert_eq!(engine.content_offset().y, 20.0);
        // Taller than the viewport: leading edge.
        engine.scroll_rect_to_visible(Rect::new(0.0, 400.0, 100.0, 300.0), false, Completion::none());
        assert_eq!(engine.content_offset().y, 400.0);
    }

    #[test]
    fn next_page_uses_viewport_and_clamps() {
        let mut engine = vertical_engine(ScrollConfig::default());
        assert_eq!(
            engine.content_offset_of_next_page(EventDirections::DOWN),
            Point::new(0.0, 200.0)
        );
        engine.set_content_offset(Point::new(0.0, 600.0), false, Completion::none());
        assert_eq!(
            engine.content_offset_of_next_page(EventDirections::DOWN),
            Point::new(0.0, 600.0)
        );
        assert_eq!(
            engine.content_offset_of_next_page(EventDirections::UP),
            Point::new(0.0, 400.0)
        );
    }

    #[test]
    fn visible_rect_clipped_to_content() {
        let mut engine = vertical_engine(ScrollConfig::default());
        engine.handle_gesture(GestureEvent::Began);
        engine.handle_gesture(GestureEvent::changed(0.0, -50.0, Velocity::ZERO));
        let visible = engine.visible_rect();
        assert_eq!(visible.origin.y, 0.0);
        assert!(visible.size.height < 200.0);
    }

    #[test]
    fn binding_round_trip() {
        let binding = Binding::new(Point::new(0.0, 100.0));
        let config = ScrollConfig::default().with_content_offset(binding.clone());
        let mut engine = vertical_engine(config);
        assert_eq!(engine.content_offset(), Point::new(0.0, 100.0));

        binding.set(Point::new(0.0, 250.0));
        engine.tick(FRAME);
        assert_eq!(engine.content_offset(), Point::new(0.0, 250.0));

        engine.set_content_offset(Point::new(0.0, 400.0), false, Completion::none());
        assert_eq!(binding.get(), Point::new(0.0, 400.0));
    }

    #[test]
    fn dropped_engine_reports_false() {
        let mut engine = vertical_engine(ScrollConfig::default());
        let (log, completion) = recorder();
        engine.set_content_offset(Point::new(0.0, 300.0), true, completion);
        drop(engine);
        assert_eq!(*log.borrow(), vec![false]);
    }
}
