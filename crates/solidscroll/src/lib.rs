#![forbid(unsafe_code)]

//! SolidScroll public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! common types from the internal crates and offers a prelude for day-to-day
//! usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use solidscroll_core::animation::completion::Completion;
pub use solidscroll_core::animation::{Animation, Decay, Sequence, sequence};
pub use solidscroll_core::binding::{Binding, Source};
pub use solidscroll_core::event::{
    EventDirections, GestureEvent, GestureMask, GesturePhase, Velocity,
};
pub use solidscroll_core::geometry::{Axis, EdgeInsets, Point, Rect, Size, Vector};

// --- Engine re-exports -----------------------------------------------------

pub use solidscroll_engine::{
    AligningProvider, Alignment, Axes, ContainedScrollKey, ContentLayout, ContentOffset,
    ContentProvider, DecelerationRate, DefaultGestureProvider, Eligibility, GestureProvider,
    GestureResponse, IndicatorGeometry, PagingConfig, PagingDirection, PagingEngine,
    PagingLayout, PagingProvider, PreferenceKey, ProxyRegistry, Publication, ScrollConfig,
    ScrollEngine, ScrollError, ScrollIndicators, ScrollLayout, ScrollMetrics, ScrollPhase,
    ScrollProxy, ScrollSnapshot, ScrollView, TreePath,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for SolidScroll.
#[derive(Debug)]
pub enum Error {
    /// A scroll region rejected a command or configuration.
    Scroll(ScrollError),
    /// Any other failure, with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scroll(err) => write!(f, "{err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scroll(err) => Some(err),
            Self::Other(_) => None,
        }
    }
}

impl From<ScrollError> for Error {
    fn from(err: ScrollError) -> Self {
        Self::Scroll(err)
    }
}

/// Standard result type for SolidScroll APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Completion, EdgeInsets, Error, EventDirections, GestureEvent, PagingConfig,
        PagingEngine, Point, ProxyRegistry, Rect, Result, ScrollConfig, ScrollProxy, ScrollView,
        Size, TreePath, Velocity,
    };

    pub use crate::{core, engine};
}

pub use solidscroll_core as core;
pub use solidscroll_engine as engine;
