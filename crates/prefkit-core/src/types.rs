//! Type aliases for commonly used complex types.
//!
//! Complex types like `Rc<RefCell<Option<Box<dyn Fn()>>>>` are hard to read
//! at a glance. These aliases give the recurring shared-state and callback
//! shapes of the workspace a single spelling, so the underlying type can be
//! changed in one place.

use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when mutable state is shared within a single thread, which is where
/// all registry and surface state lives.
pub type Shared<T> = Rc<RefCell<T>>;

/// An optional shared reference, for lazily-initialized shared state.
pub type SharedOption<T> = Rc<RefCell<Option<T>>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// A shared hash map for single-threaded key-value storage.
pub type SharedHashMap<K, V> = Rc<RefCell<HashMap<K, V>>>;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
/// The log buffer uses this so a `tracing` layer can write from any thread.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe optional wrapper for lazily-initialized cross-thread state.
pub type ThreadSafeOption<T> = Arc<Mutex<Option<T>>>;

/// A thread-safe vector for cross-thread collection management.
pub type ThreadSafeVec<T> = Arc<Mutex<Vec<T>>>;

/// A simple callback with no parameters or return value.
pub type Callback = Box<dyn Fn()>;

/// A callback that receives a single parameter.
pub type DataCallback<T> = Box<dyn Fn(T)>;

/// A UI callback stored in RefCell for host signal handlers.
pub type UiCallback = Rc<RefCell<Option<Box<dyn Fn()>>>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new `SharedOption<T>` initialized to `None`.
#[inline]
pub fn shared_none<T>() -> SharedOption<T> {
    Rc::new(RefCell::new(None))
}

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
