//! Observability subsystem for typebind
//!
//! - Structured logging (JSON lines)
//! - Typed events
//! - Binder counters
//!
//! Observability is read-only: nothing here influences normalization or
//! resolution results.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{BinderMetrics, MetricsSnapshot};
