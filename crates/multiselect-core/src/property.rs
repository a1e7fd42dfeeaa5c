//! Reactive properties with change detection.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it, so the owner can emit a notification only on real changes:
//!
//! ```
//! use multiselect_core::{Property, Signal};
//!
//! struct Dropdown {
//!     open: Property<bool>,
//!     visibility_changed: Signal<bool>,
//! }
//!
//! impl Dropdown {
//!     fn set_open(&self, open: bool) {
//!         if self.open.set(open) {
//!             self.visibility_changed.emit(open);
//!         }
//!     }
//! }
//!
//! let dropdown = Dropdown {
//!     open: Property::new(false),
//!     visibility_changed: Signal::new(),
//! };
//! dropdown.set_open(true);
//! assert!(dropdown.open.get());
//! ```

use std::fmt;

use parking_lot::RwLock;
use static_assertions::assert_impl_all;

/// A value with change detection.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it changed.
    ///
    /// The caller emits the associated notification when this returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

assert_impl_all!(Property<String>: Send, Sync);
