#![forbid(unsafe_code)]

//! [`ScrollProxy`]: live state and programmatic control from outside a region.
//!
//! A proxy holds a weak reference to its region's engine. Reads on a
//! destroyed region return zero values; commands do nothing and report
//! `false` to their completion.
//!
//! Two proxies are equal when their snapshots (layout, bounds, content size,
//! and the dragging/scrolling flags) are equal, regardless of which region
//! they point at. Two detached proxies are equal.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use solidscroll_core::animation::completion::Completion;
use solidscroll_core::event::EventDirections;
use solidscroll_core::geometry::{Point, Rect, Size};

use crate::config::ScrollConfig;
use crate::engine::{ScrollEngine, ScrollLayout, ScrollSnapshot};
use crate::error::{ScrollError, ScrollResult};
use crate::view::drive;

/// Weak handle to a scroll region.
#[derive(Clone, Default)]
pub struct ScrollProxy {
    engine: Weak<RefCell<ScrollEngine>>,
}

impl ScrollProxy {
    pub(crate) fn new(engine: &Rc<RefCell<ScrollEngine>>) -> Self {
        Self {
            engine: Rc::downgrade(engine),
        }
    }

    /// A proxy that is not attached to any region.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Whether the region is still alive.
    pub fn is_attached(&self) -> bool {
        self.engine.strong_count() > 0
    }

    /// Whether both handles point at the same region.
    pub fn same_region(&self, other: &Self) -> bool {
        self.engine.ptr_eq(&other.engine)
    }

    fn read<T: Default>(&self, f: impl FnOnce(&ScrollEngine) -> T) -> T {
        let Some(engine) = self.engine.upgrade() else {
            return T::default();
        };
        engine.try_borrow().map(|e| f(&e)).unwrap_or_default()
    }

    fn command<R>(&self, f: impl FnOnce(&mut ScrollEngine) -> R) -> Option<R> {
        let engine = self.engine.upgrade()?;
        drive(&engine, f)
    }

    // -- reads --------------------------------------------------------------

    /// Snapshot used for equality; `None` when detached.
    pub fn snapshot(&self) -> Option<ScrollSnapshot> {
        self.read(|e| Some(e.snapshot()))
    }

    pub fn config(&self) -> ScrollConfig {
        self.read(|e| e.config().clone())
    }

    pub fn layout(&self) -> ScrollLayout {
        self.read(ScrollEngine::scroll_layout)
    }

    pub fn content_offset(&self) -> Point {
        self.read(ScrollEngine::content_offset)
    }

    pub fn min_content_offset(&self) -> Point {
        self.read(ScrollEngine::min_content_offset)
    }

    pub fn max_content_offset(&self) -> Point {
        self.read(ScrollEngine::max_content_offset)
    }

    pub fn content_size(&self) -> Size {
        self.read(ScrollEngine::content_size)
    }

    /// Viewport size.
    pub fn page_size(&self) -> Size {
        self.read(ScrollEngine::page_size)
    }

    pub fn visible_rect(&self) -> Rect {
        self.read(ScrollEngine::visible_rect)
    }

    pub fn is_dragging(&self) -> bool {
        self.read(ScrollEngine::is_dragging)
    }

    pub fn is_decelerating(&self) -> bool {
        self.read(ScrollEngine::is_decelerating)
    }

    pub fn is_scrolling(&self) -> bool {
        self.read(ScrollEngine::is_scrolling)
    }

    pub fn is_scrolling_horizontally(&self) -> bool {
        self.read(ScrollEngine::is_scrolling_horizontally)
    }

    pub fn is_scrolling_vertically(&self) -> bool {
        self.read(ScrollEngine::is_scrolling_vertically)
    }

    /// Offset one page away in `directions`; zero when detached.
    pub fn content_offset_of_next_page(&self, directions: EventDirections) -> Point {
        self.read(|e| e.content_offset_of_next_page(directions))
    }

    // -- commands -----------------------------------------------------------

    /// Move the region to `target`. On a detached proxy the completion
    /// reports `false`.
    pub fn set_content_offset(&self, target: Point, animated: bool, completion: Completion) {
        self.command(|e| e.set_content_offset(target, animated, completion));
    }

    /// Like [`set_content_offset`](Self::set_content_offset), but reports a
    /// detached region as an error.
    pub fn try_set_content_offset(
        &self,
        target: Point,
        animated: bool,
        completion: Completion,
    ) -> ScrollResult<()> {
        self.command(|e| e.set_content_offset(target, animated, completion))
            .ok_or(ScrollError::Detached)
    }

    /// Scroll the minimum distance that makes `rect` visible.
    pub fn scroll_rect_to_visible(&self, rect: Rect, animated: bool, completion: Completion) {
        self.command(|e| e.scroll_rect_to_visible(rect, animated, completion));
    }
}

impl PartialEq for ScrollProxy {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl fmt::Debug for ScrollProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollProxy")
            .field("attached", &self.is_attached())
            .field("content_offset", &self.content_offset())
            .finish()
    }
}
