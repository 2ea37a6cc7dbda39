//! In-memory log ring buffer.
//!
//! Keeps the most recent log entries in a bounded buffer so they can be shown
//! inside the application (e.g. a diagnostics pane) without re-reading any
//! log file. Entries flow in from the normal `tracing` macros through
//! [`BufferLayer`]; nothing in the workspace writes to the buffer directly.
//!
//! The buffer is an explicitly constructed instance handed to whoever needs
//! to read it. There is no global static.

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::VecDeque;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::types::{thread_safe, ThreadSafe};

/// Default number of entries retained.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// One captured log event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Severity of the event.
    pub level: Level,
    /// The `tracing` target that emitted the event.
    pub scope: String,
    /// Rendered message, including any non-message fields.
    pub message: String,
}

impl LogEntry {
    /// Render as `ISO timestamp [LEVEL] scope | message`.
    pub fn format(&self) -> String {
        format!(
            "{} [{}] {} | {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level,
            self.scope,
            self.message
        )
    }
}

/// Bounded buffer of recent log entries.
///
/// Pushing beyond capacity evicts the oldest entry. Entries below the
/// configured minimum severity are dropped on push.
#[derive(Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    min_level: Level,
}

impl LogBuffer {
    /// Create a buffer with [`DEFAULT_LOG_CAPACITY`], capturing all levels.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create a buffer retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            min_level: Level::TRACE,
        }
    }

    /// Drop entries less severe than `level` at push time.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, entry: LogEntry) {
        // tracing orders levels with ERROR smallest
        if entry.level > self.min_level {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all retained entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// All retained entries rendered with [`LogEntry::format`], oldest first.
    pub fn formatted(&self) -> Vec<String> {
        self.entries.iter().map(LogEntry::format).collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `tracing` layer that copies events into a shared [`LogBuffer`].
///
/// Attach alongside the usual fmt layer; the application keeps a clone of the
/// buffer handle for reading.
pub struct BufferLayer {
    buffer: ThreadSafe<LogBuffer>,
}

impl BufferLayer {
    /// Create a layer writing into a fresh buffer of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: thread_safe(LogBuffer::with_capacity(capacity)),
        }
    }

    /// Create a layer writing into an existing shared buffer.
    pub fn with_buffer(buffer: ThreadSafe<LogBuffer>) -> Self {
        Self { buffer }
    }

    /// Handle for reading captured entries.
    pub fn buffer(&self) -> ThreadSafe<LogBuffer> {
        self.buffer.clone()
    }
}

impl<S: Subscriber> Layer<S> for BufferLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            timestamp: Utc::now(),
            level: *event.metadata().level(),
            scope: event.metadata().target().to_string(),
            message: visitor.render(),
        };
        self.buffer.lock().push(entry);
    }
}

/// Collects the `message` field plus any structured fields of an event.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<String>,
}

impl EventVisitor {
    fn render(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}
