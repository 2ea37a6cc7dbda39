//! # PrefKit Core
//!
//! Shared building blocks for the PrefKit crates: type aliases for the
//! shared-state and callback patterns used throughout the workspace, and the
//! in-memory log ring buffer that captures recent `tracing` events for
//! in-application display.

pub mod logbuf;
pub mod types;

pub use logbuf::{BufferLayer, LogBuffer, LogEntry};

// Re-export type aliases for convenience
pub use types::{
    shared, shared_none, thread_safe, Callback, DataCallback, Shared, SharedHashMap, SharedOption,
    SharedVec, ThreadSafe, ThreadSafeOption, ThreadSafeVec, UiCallback,
};
