#![forbid(unsafe_code)]

//! Cross-tree broadcast of scroll proxies.
//!
//! Scroll regions publish their [`ScrollProxy`] into a [`ProxyRegistry`]
//! under a [`TreePath`], the list of child indices from the root of the host's
//! view tree. An ancestor asks for the proxy of its descendants with
//! [`ProxyRegistry::nearest_descendant_proxy`], which folds the
//! [`ContainedScrollKey`] reduction over every live strict descendant in
//! traversal order.
//!
//! # Invariants
//!
//! 1. `TreePath` ordering is pre-order: a parent sorts before its children,
//!    and siblings sort by index.
//! 2. The registry holds proxies only, which are weak; it never keeps a
//!    region alive.
//! 3. Dropping a [`Publication`] removes exactly the entry it created, even
//!    if the same path has since been re-published by someone else.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::proxy::ScrollProxy;

// ---------------------------------------------------------------------------
// Preference keys
// ---------------------------------------------------------------------------

/// A value merged upward through a view tree.
///
/// `reduce` must be associative with [`default_value`](Self::default_value)
/// as its identity.
pub trait PreferenceKey {
    type Value;

    /// Identity element.
    fn default_value() -> Self::Value;

    /// Merge `next` (a later sibling's value) into `value`.
    fn reduce(value: &mut Self::Value, next: Self::Value);
}

/// Key carrying the proxy of a contained scroll region. Last value wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainedScrollKey;

impl PreferenceKey for ContainedScrollKey {
    type Value = Option<ScrollProxy>;

    fn default_value() -> Self::Value {
        None
    }

    fn reduce(value: &mut Self::Value, next: Self::Value) {
        if next.is_some() {
            *value = next;
        }
    }
}

// ---------------------------------------------------------------------------
// TreePath
// ---------------------------------------------------------------------------

/// Position of a node in the host's view tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TreePath(Vec<u32>);

impl TreePath {
    /// The root node.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path from child indices.
    pub fn new(indices: impl IntoIterator<Item = u32>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// The `index`-th child of this node.
    #[must_use]
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The parent node; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Whether `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &TreePath) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Entries {
    by_path: BTreeMap<TreePath, (u64, ScrollProxy)>,
    next_id: Cell<u64>,
}

impl Entries {
    fn allocate(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        id
    }
}

/// Registry of published scroll proxies.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct ProxyRegistry {
    entries: Rc<RefCell<Entries>>,
}

thread_local! {
    static GLOBAL_REGISTRY: ProxyRegistry = ProxyRegistry::new();
}

impl ProxyRegistry {
    /// Create an empty, independent registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by everything on this thread.
    pub fn global() -> Self {
        GLOBAL_REGISTRY.with(Clone::clone)
    }

    /// Publish `proxy` at `path`, replacing any previous entry there.
    #[must_use = "the entry is removed when the publication is dropped"]
    pub fn publish(&self, path: TreePath, proxy: ScrollProxy) -> Publication {
        let mut entries = self.entries.borrow_mut();
        let id = entries.allocate();
        debug!(path = %path, "publish scroll proxy");
        entries.by_path.insert(path.clone(), (id, proxy));
        Publication {
            registry: Rc::downgrade(&self.entries),
            path,
            id,
        }
    }

    /// Remove whatever is published at `path`.
    pub fn unpublish(&self, path: &TreePath) -> Option<ScrollProxy> {
        let removed = self.entries.borrow_mut().by_path.remove(path);
        if removed.is_some() {
            debug!(path = %path, "unpublish scroll proxy");
        }
        removed.map(|(_, proxy)| proxy)
    }

    /// The proxy published exactly at `path`.
    pub fn get(&self, path: &TreePath) -> Option<ScrollProxy> {
        self.entries
            .borrow()
            .by_path
            .get(path)
            .map(|(_, proxy)| proxy.clone())
    }

    /// Number of entries, including ones whose region has been destroyed.
    pub fn len(&self) -> usize {
        self.entries.borrow().by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fold [`ContainedScrollKey`] over the live strict descendants of
    /// `ancestor`, in traversal order.
    pub fn nearest_descendant_proxy(&self, ancestor: &TreePath) -> Option<ScrollProxy> {
        self.collect::<ContainedScrollKey>(ancestor, |proxy| Some(proxy.clone()))
    }

    /// Fold any [`PreferenceKey`] over the live strict descendants of
    /// `ancestor`, mapping each proxy to a key value with `value_of`.
    pub fn collect<K: PreferenceKey>(
        &self,
        ancestor: &TreePath,
        mut value_of: impl FnMut(&ScrollProxy) -> K::Value,
    ) -> K::Value {
        let entries = self.entries.borrow();
        let mut value = K::default_value();
        let range = entries
            .by_path
            .range((Bound::Excluded(ancestor.clone()), Bound::Unbounded));
        for (path, (_, proxy)) in range {
            if !path.is_descendant_of(ancestor) {
                break;
            }
            if proxy.is_attached() {
                K::reduce(&mut value, value_of(proxy));
            }
        }
        value
    }

    /// Drop entries whose region has been destroyed.
    pub fn prune(&self) {
        self.entries
            .borrow_mut()
            .by_path
            .retain(|_, (_, proxy)| proxy.is_attached());
    }
}

/// RAII handle for a published proxy.
pub struct Publication {
    registry: Weak<RefCell<Entries>>,
    path: TreePath,
    id: u64,
}

impl Publication {
    /// Where the proxy is published.
    pub fn path(&self) -> &TreePath {
        &self.path
    }

    /// Store `proxy` in this publication's entry, re-inserting it if the
    /// entry was unpublished.
    ///
    /// A newer publication at the same path is left alone.
    pub fn refresh(&self, proxy: ScrollProxy) {
        let Some(entries) = self.registry.upgrade() else {
            return;
        };
        let mut entries = entries.borrow_mut();
        match entries.by_path.get_mut(&self.path) {
            Some((id, slot)) if *id == self.id => *slot = proxy,
            Some(_) => {}
            None => {
                entries.by_path.insert(self.path.clone(), (self.id, proxy));
            }
        }
    }
}

impl fmt::Debug for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publication")
            .field("path", &self.path)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Publication {
    fn drop(&mut self) {
        let Some(entries) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut entries) = entries.try_borrow_mut() else {
            return;
        };
        if entries.by_path.get(&self.path).is_some_and(|(id, _)| *id == self.id) {
            entries.by_path.remove(&self.path);
            debug!(path = %self.path, "scroll proxy withdrawn");
        }
    }
}
