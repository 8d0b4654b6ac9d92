//! Observable events for typebind
//!
//! Events are explicit and typed. Each carries the severity it is logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events in a namespace's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Namespace lifecycle
    /// Namespace created
    NamespaceCreated,
    /// Namespace configuration loaded from a file
    ConfigLoaded,

    // Declarations
    /// Placeholder inserted for a name defined later
    ForwardDeclared,
    /// Plain alias bound to a literal
    AliasBound,
    /// Alias bound to a type function
    FunctionBound,
    /// Declaration rejected
    BindingRejected,

    // Resolution
    /// Plain alias normalized and cached
    AliasResolved,
    /// Plain alias served from its cache
    AliasCacheHit,
    /// Type function invoked
    FunctionInvoked,
    /// Type function result served from the argument memo
    FunctionMemoHit,
    /// Resolution or invocation failed
    ResolutionFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::NamespaceCreated => "NAMESPACE_CREATED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ForwardDeclared => "ALIAS_FORWARD_DECLARED",
            Event::AliasBound => "ALIAS_BOUND",
            Event::FunctionBound => "TYPE_FUNCTION_BOUND",
            Event::BindingRejected => "BINDING_REJECTED",
            Event::AliasResolved => "ALIAS_RESOLVED",
            Event::AliasCacheHit => "ALIAS_CACHE_HIT",
            Event::FunctionInvoked => "TYPE_FUNCTION_INVOKED",
            Event::FunctionMemoHit => "TYPE_FUNCTION_MEMO_HIT",
            Event::ResolutionFailed => "RESOLUTION_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::AliasCacheHit | Event::FunctionInvoked | Event::FunctionMemoHit => {
                Severity::Trace
            }
            Event::BindingRejected | Event::ResolutionFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
