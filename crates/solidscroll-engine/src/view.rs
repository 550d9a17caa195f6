#![forbid(unsafe_code)]

//! [`ScrollView`]: the owner of one scrollable region.
//!
//! The view holds the region's [`ScrollEngine`] behind `Rc<RefCell<_>>` so
//! that [`ScrollProxy`] handles can reach it weakly. Every entry point borrows
//! the engine, runs the operation, releases the borrow, and only then fires
//! completions that finished during the operation. A completion may therefore
//! call straight back into a proxy.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use solidscroll_core::animation::completion::Completion;
use solidscroll_core::event::GestureEvent;
use solidscroll_core::geometry::{Point, Rect, Size};

use crate::broadcast::{ProxyRegistry, Publication, TreePath};
use crate::config::ScrollConfig;
use crate::engine::{GestureResponse, ScrollEngine, ScrollLayout};
use crate::indicator::ScrollIndicators;
use crate::provider::ContentProvider;
use crate::proxy::ScrollProxy;

/// Run `f` on the engine, then fire completions it finished.
///
/// Returns `None` if the engine is already borrowed; `f` is dropped unrun.
pub(crate) fn drive<R>(
    engine: &RefCell<ScrollEngine>,
    f: impl FnOnce(&mut ScrollEngine) -> R,
) -> Option<R> {
    let (result, finished) = {
        let mut engine = engine.try_borrow_mut().ok()?;
        let result = f(&mut engine);
        (result, engine.drain_finished())
    };
    for completion in finished {
        completion.fire();
    }
    Some(result)
}

/// A scrollable region.
#[derive(Debug)]
pub struct ScrollView {
    engine: Rc<RefCell<ScrollEngine>>,
    publication: Option<Publication>,
}

impl ScrollView {
    /// Create a region that centers content smaller than the viewport.
    pub fn new(config: ScrollConfig) -> Self {
        Self::from_engine(ScrollEngine::new(config))
    }

    /// Create a region with a custom content provider.
    pub fn with_provider(config: ScrollConfig, provider: impl ContentProvider + 'static) -> Self {
        Self::from_engine(ScrollEngine::with_provider(config, Box::new(provider)))
    }

    fn from_engine(engine: ScrollEngine) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
            publication: None,
        }
    }

    /// A weak handle to this region.
    pub fn proxy(&self) -> ScrollProxy {
        ScrollProxy::new(&self.engine)
    }

    /// Publish this region's proxy at `path` in `registry`.
    ///
    /// Replaces any earlier publication of this view.
    pub fn attach_to(&mut self, registry: &ProxyRegistry, path: TreePath) {
        self.publication = Some(registry.publish(path, self.proxy()));
    }

    /// Withdraw the published proxy.
    pub fn detach(&mut self) {
        self.publication = None;
    }

    /// Where this view is published, if anywhere.
    pub fn path(&self) -> Option<&TreePath> {
        self.publication.as_ref().map(Publication::path)
    }

    /// Lay out content and re-publish the proxy.
    pub fn layout(&mut self, measured: Size, viewport: Size) -> ScrollLayout {
        let layout = drive(&self.engine, |e| e.layout(measured, viewport)).unwrap_or_default();
        if let Some(publication) = &self.publication {
            publication.refresh(self.proxy());
        }
        layout
    }

    /// Feed one gesture event.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureResponse {
        drive(&self.engine, |e| e.handle_gesture(event)).unwrap_or(GestureResponse::Ignored)
    }

    /// Advance one frame. Returns `true` while the offset is animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        drive(&self.engine, |e| e.tick(dt)).unwrap_or(false)
    }

    /// See [`ScrollEngine::set_content_offset`].
    pub fn set_content_offset(&mut self, target: Point, animated: bool, completion: Completion) {
        drive(&self.engine, |e| e.set_content_offset(target, animated, completion));
    }

    /// See [`ScrollEngine::scroll_rect_to_visible`].
    pub fn scroll_rect_to_visible(&mut self, rect: Rect, animated: bool, completion: Completion) {
        drive(&self.engine, |e| e.scroll_rect_to_visible(rect, animated, completion));
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        drive(&self.engine, |e| e.set_config(config));
    }

    pub fn set_content_provider(&mut self, provider: impl ContentProvider + 'static) {
        drive(&self.engine, |e| e.set_content_provider(Box::new(provider)));
    }

    pub fn content_offset(&self) -> Point {
        self.engine.borrow().content_offset()
    }

    pub fn indicators(&self) -> ScrollIndicators {
        self.engine.borrow().indicators()
    }

    /// Read engine state.
    pub fn with_engine<R>(&self, f: impl FnOnce(&ScrollEngine) -> R) -> R {
        f(&self.engine.borrow())
    }
}
