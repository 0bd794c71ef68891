//! Shared callback handles.
//!
//! ## Usage
//!
//! Component args store change listeners, validators and button actions as
//! [`Callback`] or [`CallbackWith`]. Both accept plain closures via `Into`.

use std::{fmt, sync::Arc};

type Handler = dyn Fn() + Send + Sync;
type HandlerWith<T, R> = dyn Fn(T) -> R + Send + Sync;

/// Shared `Fn()` handle. Clones compare equal; separately created callbacks
/// never do.
#[derive(Clone)]
pub struct Callback(Arc<Handler>);

impl Callback {
    /// Wraps a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Invokes the callback.
    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Callback {}

impl<F> From<F> for Callback
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Shared `Fn(T) -> R` handle, compared by identity like [`Callback`].
pub struct CallbackWith<T, R = ()>(Arc<HandlerWith<T, R>>);

impl<T, R> CallbackWith<T, R> {
    /// Wraps a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Invokes the callback with `value`.
    pub fn call(&self, value: T) -> R {
        (self.0)(value)
    }
}

impl<T: 'static> CallbackWith<T, bool> {
    /// A predicate that accepts every value.
    pub fn always() -> Self {
        Self::new(|_| true)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

// Manual impls: deriving would require `T: Clone` / `T: PartialEq`.
impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackWith<{}>(..)", std::any::type_name::<T>())
    }
}
