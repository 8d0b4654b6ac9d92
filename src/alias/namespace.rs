//! Namespaces, alias slots and accessors
//!
//! A `Namespace` owns one slot per declared name. Accessors share the slot,
//! so an accessor handed out by a forward declaration sees the definition
//! bound later.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::cell::CacheCell;
use super::invoke::{ArgumentMemo, Invocation};
use crate::config::NamespaceConfig;
use crate::errors::{AliasError, AliasResult};
use crate::expr::{normalize_type, Normalized, TypeExpr, TypeFunction};
use crate::observability::{BinderMetrics, Event, Logger, MetricsSnapshot};
use crate::validator::Type;

/// Observable state of an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasState {
    /// Forward placeholder, no definition yet
    Unresolved,
    /// Plain literal bound, not normalized yet
    Bound,
    /// Plain literal normalized and cached
    Resolved,
    /// Type function bound; every call is computed independently
    GeneratorBound,
}

pub(crate) enum Definition {
    Plain {
        source: TypeExpr,
        cell: CacheCell,
    },
    Function {
        function: TypeFunction,
        memo: Option<ArgumentMemo>,
    },
}

/// Storage for one name.
pub(crate) struct AliasSlot {
    pub(crate) name: String,
    pub(crate) definition: OnceLock<Definition>,
    pub(crate) scope: Arc<Scope>,
}

/// Per-namespace context shared with every slot.
pub(crate) struct Scope {
    pub(crate) name: String,
    pub(crate) config: NamespaceConfig,
    pub(crate) metrics: BinderMetrics,
}

impl Scope {
    pub(crate) fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        let mut all = Vec::with_capacity(fields.len() + 1);
        all.push(("namespace", self.name.as_str()));
        all.extend_from_slice(fields);
        Logger::event(self.config.log_level, event, &all);
    }
}

impl AliasSlot {
    fn state(&self) -> AliasState {
        match self.definition.get() {
            None => AliasState::Unresolved,
            Some(Definition::Plain { cell, .. }) if cell.is_resolved() => AliasState::Resolved,
            Some(Definition::Plain { .. }) => AliasState::Bound,
            Some(Definition::Function { .. }) => AliasState::GeneratorBound,
        }
    }

    fn resolve(&self, args: Vec<TypeExpr>) -> AliasResult<Normalized> {
        let definition = self
            .definition
            .get()
            .ok_or_else(|| AliasError::UndefinedAlias(self.name.clone()))?;

        match definition {
            Definition::Plain { source, cell } => {
                if !args.is_empty() {
                    return Err(AliasError::usage(format!(
                        "'{}' is not a type function and takes no parameters",
                        self.name
                    )));
                }
                self.force_plain(source, cell).map(Normalized::Type)
            }
            Definition::Function { function, memo } => {
                let invocation = Invocation::from_args(args)?;
                self.invoke(function, memo.as_ref(), &invocation)
            }
        }
    }

    fn force_plain(&self, source: &TypeExpr, cell: &CacheCell) -> AliasResult<Type> {
        if let Some(ty) = cell.get() {
            self.scope.metrics.increment_cache_hits();
            self.scope.emit(Event::AliasCacheHit, &[("alias", self.name.as_str())]);
            return Ok(ty.clone());
        }

        let ty = cell.force(|| {
            self.scope.metrics.increment_normalizations();
            normalize_type(source)
        })?;

        let described = ty.describe();
        self.scope.emit(
            Event::AliasResolved,
            &[("alias", self.name.as_str()), ("type", described.as_str())],
        );
        Ok(ty)
    }

    fn invoke(
        &self,
        function: &TypeFunction,
        memo: Option<&ArgumentMemo>,
        invocation: &Invocation,
    ) -> AliasResult<Normalized> {
        let args = function.normalize_args(invocation.params())?;
        let arity = args.len().to_string();
        let memo = memo.filter(|_| invocation.has_stable_identity());

        if let Some(hit) = memo.and_then(|memo| memo.get(&args)) {
            self.scope.metrics.increment_memo_hits();
            self.scope.emit(
                Event::FunctionMemoHit,
                &[("alias", self.name.as_str()), ("arity", arity.as_str())],
            );
            return Ok(hit);
        }

        self.scope.metrics.increment_function_invocations();
        self.scope.emit(
            Event::FunctionInvoked,
            &[("alias", self.name.as_str()), ("arity", arity.as_str())],
        );

        let result = function.apply(&args)?;
        if let Some(memo) = memo {
            memo.insert(args, result.clone());
        }
        Ok(result)
    }
}

/// Handle to a named alias.
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Accessor {
    slot: Arc<AliasSlot>,
}

impl Accessor {
    pub(crate) fn new(slot: Arc<AliasSlot>) -> Self {
        Self { slot }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    pub fn state(&self) -> AliasState {
        self.slot.state()
    }

    /// Bare access: the cached type of a plain alias, or the base case of a
    /// type function.
    pub fn get(&self) -> AliasResult<Type> {
        self.call(Vec::new())
    }

    /// `Name[params...]`
    pub fn apply<I, E>(&self, params: I) -> AliasResult<Type>
    where
        I: IntoIterator<Item = E>,
        E: Into<TypeExpr>,
    {
        self.call(vec![TypeExpr::seq(params)])
    }

    /// Invokes the alias with a raw argument list and requires a type back.
    pub fn call(&self, args: Vec<TypeExpr>) -> AliasResult<Type> {
        self.tracked(|| self.slot.resolve(args).and_then(Normalized::into_type))
    }

    /// Invokes the alias with a raw argument list.
    ///
    /// A type function may legitimately return another type function;
    /// this is the only entry point that hands one back.
    pub fn resolve(&self, args: Vec<TypeExpr>) -> AliasResult<Normalized> {
        self.tracked(|| self.slot.resolve(args))
    }

    /// Runs a resolution and reports its failure, once.
    ///
    /// Accessors invoked from inside a type function body run nested on the
    /// same thread. Only the outermost one reports, so a single failure is
    /// logged and counted a single time.
    fn tracked<T>(&self, run: impl FnOnce() -> AliasResult<T>) -> AliasResult<T> {
        let depth = ResolveDepth::enter();
        match run() {
            Err(err) if depth.is_outermost() => Err(self.report(err)),
            result => result,
        }
    }

    fn report(&self, err: AliasError) -> AliasError {
        let scope = &self.slot.scope;
        let message = err.to_string();
        scope.metrics.increment_errors();
        scope.emit(
            Event::ResolutionFailed,
            &[
                ("alias", self.slot.name.as_str()),
                ("code", err.code()),
                ("error", message.as_str()),
            ],
        );
        err
    }
}

thread_local! {
    static RESOLVE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Nesting level of accessor resolutions on the current thread.
struct ResolveDepth {
    level: usize,
}

impl ResolveDepth {
    fn enter() -> Self {
        let level = RESOLVE_DEPTH.with(|depth| {
            let level = depth.get() + 1;
            depth.set(level);
            level
        });
        Self { level }
    }

    fn is_outermost(&self) -> bool {
        self.level == 1
    }
}

impl Drop for ResolveDepth {
    fn drop(&mut self) {
        RESOLVE_DEPTH.with(|depth| depth.set(self.level - 1));
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.slot.name)
            .field("state", &self.state())
            .finish()
    }
}

/// Owning scope for aliases.
pub struct Namespace {
    pub(crate) scope: Arc<Scope>,
    pub(crate) aliases: HashMap<String, Arc<AliasSlot>>,
}

impl Namespace {
    /// Creates an empty namespace with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, NamespaceConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: NamespaceConfig) -> Self {
        let scope = Arc::new(Scope {
            name: name.into(),
            config,
            metrics: BinderMetrics::new(),
        });
        let memoize = if scope.config.memoize_generators { "true" } else { "false" };
        scope.emit(Event::NamespaceCreated, &[("memoize_generators", memoize)]);

        Self {
            scope,
            aliases: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.scope.name
    }

    pub fn config(&self) -> &NamespaceConfig {
        &self.scope.config
    }

    /// Returns whether `name` was declared or bound.
    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Declared names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn state(&self, name: &str) -> Option<AliasState> {
        self.aliases.get(name).map(|slot| slot.state())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.scope.metrics.snapshot()
    }

    pub fn metrics_json(&self) -> String {
        self.scope.metrics.to_json()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.scope.name)
            .field("aliases", &self.names())
            .finish()
    }
}
