#![forbid(unsafe_code)]

//! Two-way value bindings.
//!
//! A [`Binding`] is a shared, single-threaded cell that both the host and a
//! scroll engine may write. Every write bumps a version counter, which lets
//! the engine tell its own write-backs apart from writes made by someone
//! else: [`BindingSync`] remembers the last version it saw and only reports
//! a change when the counter moved without it.
//!
//! Bindings are `Rc`-based and therefore `!Send`; they live on the UI thread
//! alongside the engine that observes them.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

struct Slot<T> {
    value: Cell<T>,
    version: Cell<u64>,
}

/// A shared, versioned value.
pub struct Binding<T: Copy> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy> Binding<T> {
    /// Create a binding holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: Cell::new(value),
                version: Cell::new(0),
            }),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// Replace the value and bump the version.
    pub fn set(&self, value: T) {
        self.slot.value.set(value);
        self.slot.version.set(self.slot.version.get().wrapping_add(1));
    }

    /// Monotonic write counter.
    #[inline]
    pub fn version(&self) -> u64 {
        self.slot.version.get()
    }

    /// Whether two handles refer to the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T: Copy> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .field("version", &self.version())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Where a value comes from: a fixed initial value or a live binding.
#[derive(Debug, Clone)]
pub enum Source<T: Copy> {
    /// Read once; the engine owns the value afterwards.
    Initially(T),
    /// Kept in sync in both directions.
    Binding(Binding<T>),
}

impl<T: Copy> Source<T> {
    /// The value the source currently provides.
    pub fn value(&self) -> T {
        match self {
            Self::Initially(v) => *v,
            Self::Binding(b) => b.get(),
        }
    }

    /// The binding, if any.
    pub fn binding(&self) -> Option<&Binding<T>> {
        match self {
            Self::Initially(_) => None,
            Self::Binding(b) => Some(b),
        }
    }
}

impl<T: Copy + Default> Default for Source<T> {
    fn default() -> Self {
        Self::Initially(T::default())
    }
}

impl<T: Copy> From<Binding<T>> for Source<T> {
    fn from(binding: Binding<T>) -> Self {
        Self::Binding(binding)
    }
}

// ---------------------------------------------------------------------------
// BindingSync
// ---------------------------------------------------------------------------

/// Observer side of a [`Source`].
///
/// # Invariants
///
/// 1. [`poll_external`](Self::poll_external) never reports a value written
///    through [`publish`](Self::publish).
/// 2. An `Initially` source never reports an external change.
#[derive(Debug, Clone)]
pub struct BindingSync<T: Copy> {
    binding: Option<Binding<T>>,
    seen: u64,
}

impl<T: Copy> BindingSync<T> {
    /// Start observing `source` at its current version.
    pub fn new(source: &Source<T>) -> Self {
        let binding = source.binding().cloned();
        let seen = binding.as_ref().map_or(0, Binding::version);
        Self { binding, seen }
    }

    /// Whether a binding is attached.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Returns the bound value if someone else wrote it since the last poll
    /// or publish.
    pub fn poll_external(&mut self) -> Option<T> {
        let binding = self.binding.as_ref()?;
        let version = binding.version();
        if version == self.seen {
            return None;
        }
        self.seen = version;
        Some(binding.get())
    }

    /// Write `value` back to the binding, if bound.
    pub fn publish(&mut self, value: T) {
        if let Some(binding) = &self.binding {
            binding.set(value);
            self.seen = binding.version();
        }
    }
}
