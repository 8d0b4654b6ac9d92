//! Binder metrics for typebind
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, relaxed ordering

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one namespace
///
/// Shared between the namespace and every alias slot it owns, so lookups
/// through detached accessors are still counted.
#[derive(Debug, Default)]
pub struct BinderMetrics {
    /// Placeholders inserted
    forward_declarations: AtomicU64,
    /// Real definitions bound (plain and function)
    bindings: AtomicU64,
    /// Plain alias literals normalized
    normalizations: AtomicU64,
    /// Plain alias lookups served from cache
    cache_hits: AtomicU64,
    /// Type function bodies run
    function_invocations: AtomicU64,
    /// Type function calls served from the argument memo
    memo_hits: AtomicU64,
    /// Errors surfaced by binder operations
    errors: AtomicU64,
}

impl BinderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_forward_declarations(&self) {
        self.forward_declarations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_bindings(&self) {
        self.bindings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_normalizations(&self) {
        self.normalizations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_function_invocations(&self) {
        self.function_invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_memo_hits(&self) {
        self.memo_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current values as JSON
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"forward_declarations":{},"bindings":{},"normalizations":{},"cache_hits":{},"function_invocations":{},"memo_hits":{},"errors":{}}}"#,
            s.forward_declarations,
            s.bindings,
            s.normalizations,
            s.cache_hits,
            s.function_invocations,
            s.memo_hits,
            s.errors,
        )
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            forward_declarations: self.forward_declarations.load(Ordering::Relaxed),
            bindings: self.bindings.load(Ordering::Relaxed),
            normalizations: self.normalizations.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            function_invocations: self.function_invocations.load(Ordering::Relaxed),
            memo_hits: self.memo_hits.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of binder counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub forward_declarations: u64,
    pub bindings: u64,
    pub normalizations: u64,
    pub cache_hits: u64,
    pub function_invocations: u64,
    pub memo_hits: u64,
    pub errors: u64,
}
