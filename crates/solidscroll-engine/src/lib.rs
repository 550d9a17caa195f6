#![forbid(unsafe_code)]

//! Engine: scroll state machine, deceleration and paging physics, gesture
//! eligibility, content providers, indicators, proxies, and the broadcast
//! registry.
//!
//! Everything here is single-threaded. A [`view::ScrollView`] owns one
//! [`engine::ScrollEngine`] behind `Rc<RefCell<_>>`; [`proxy::ScrollProxy`]
//! handles reach it weakly, and [`broadcast::ProxyRegistry`] carries those
//! handles up to ancestors of the region in the host's view tree.

pub mod broadcast;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod paging;
pub mod physics;
pub mod provider;
pub mod proxy;
pub mod view;

pub use broadcast::{ContainedScrollKey, PreferenceKey, ProxyRegistry, Publication, TreePath};
pub use config::{Axes, ContentOffset, DecelerationRate, ScrollConfig};
pub use eligibility::{DefaultGestureProvider, Eligibility, GestureProvider, ScrollMetrics};
pub use engine::{GestureResponse, ScrollEngine, ScrollLayout, ScrollPhase, ScrollSnapshot};
pub use error::{ScrollError, ScrollResult};
pub use indicator::{IndicatorGeometry, ScrollIndicators};
pub use paging::{PagingConfig, PagingDirection, PagingEngine, PagingLayout, PagingProvider};
pub use provider::{AligningProvider, Alignment, ContentLayout, ContentProvider};
pub use proxy::ScrollProxy;
pub use view::ScrollView;
