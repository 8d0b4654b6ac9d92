//! Alias binder
//!
//! Declaration-time operations on a namespace:
//!
//! - `declare_forward`: reserve a name to be defined later
//! - `bind`: attach a literal (cached) or a generator (computed per call)
//! - `lookup`: hand out the accessor for a declared name
//!
//! Binding over a real definition is a `NameCollision`. Binding over a
//! forward placeholder fills it, and accessors taken from the placeholder
//! observe the new definition.

use serde_json::Value;
use std::sync::{Arc, OnceLock};

use super::cell::CacheCell;
use super::invoke::ArgumentMemo;
use super::namespace::{Accessor, AliasSlot, Definition, Namespace};
use crate::errors::{AliasError, AliasResult};
use crate::expr::{read_literal, Prelude, TypeExpr, TypeFunction};
use crate::observability::Event;

impl Namespace {
    /// Reserves `name` for a later `bind`.
    ///
    /// Redeclaring a pending placeholder returns the same slot.
    ///
    /// # Errors
    ///
    /// `NameCollision` if `name` already has a real definition.
    pub fn declare_forward(&mut self, name: &str) -> AliasResult<Accessor> {
        if self.is_defined(name) {
            return Err(self.reject(name, AliasError::NameCollision(name.to_string())));
        }
        if let Some(slot) = self.aliases.get(name) {
            return Ok(Accessor::new(Arc::clone(slot)));
        }

        let slot = self.insert_slot(name);
        self.scope.metrics.increment_forward_declarations();
        self.scope.emit(Event::ForwardDeclared, &[("alias", name)]);

        Ok(Accessor::new(slot))
    }

    /// Binds `name` to a literal or a generator.
    ///
    /// Plain literals are not normalized here; the first access does it.
    ///
    /// # Errors
    ///
    /// `NameCollision` if `name` already has a real definition.
    pub fn bind(&mut self, name: &str, source: impl Into<TypeExpr>) -> AliasResult<Accessor> {
        if self.is_defined(name) {
            return Err(self.reject(name, AliasError::NameCollision(name.to_string())));
        }

        let (definition, event) = self.definition_for(source.into());
        let slot = match self.aliases.get(name) {
            Some(slot) => Arc::clone(slot),
            None => self.insert_slot(name),
        };
        if slot.definition.set(definition).is_err() {
            return Err(self.reject(name, AliasError::NameCollision(name.to_string())));
        }

        self.scope.metrics.increment_bindings();
        self.scope.emit(event, &[("alias", name)]);

        Ok(Accessor::new(slot))
    }

    /// Returns the accessor for `name`.
    ///
    /// Forward placeholders are returned too; invoking one before it is
    /// bound fails with `UndefinedAlias`.
    ///
    /// # Errors
    ///
    /// `UndefinedAlias` if `name` was never declared.
    pub fn lookup(&self, name: &str) -> AliasResult<Accessor> {
        self.aliases
            .get(name)
            .map(|slot| Accessor::new(Arc::clone(slot)))
            .ok_or_else(|| AliasError::UndefinedAlias(name.to_string()))
    }

    /// Reads a JSON-shaped literal, resolving names against this namespace
    /// first and `prelude` second.
    ///
    /// Names bound here are resolved eagerly with bare access, so a forward
    /// placeholder that is still pending fails with `UndefinedAlias`.
    pub fn read_literal(&self, literal: &Value, prelude: &Prelude) -> AliasResult<TypeExpr> {
        read_literal(literal, prelude, &|name| {
            self.aliases
                .get(name)
                .map(|slot| Accessor::new(Arc::clone(slot)).get())
        })
    }

    /// Reads `literal` and binds the result to `name`.
    pub fn bind_literal(
        &mut self,
        name: &str,
        literal: &Value,
        prelude: &Prelude,
    ) -> AliasResult<Accessor> {
        // Alias failures inside the literal were already reported by their accessor
        let source = self.read_literal(literal, prelude).map_err(|err| {
            if err.is_declaration_error() {
                self.reject(name, err)
            } else {
                err
            }
        })?;
        self.bind(name, source)
    }

    fn insert_slot(&mut self, name: &str) -> Arc<AliasSlot> {
        let slot = Arc::new(AliasSlot {
            name: name.to_string(),
            definition: OnceLock::new(),
            scope: Arc::clone(&self.scope),
        });
        self.aliases.insert(name.to_string(), Arc::clone(&slot));
        slot
    }

    fn is_defined(&self, name: &str) -> bool {
        self.aliases
            .get(name)
            .map_or(false, |slot| slot.definition.get().is_some())
    }

    fn definition_for(&self, source: TypeExpr) -> (Definition, Event) {
        match source {
            TypeExpr::Generator(body) => {
                let memo = self
                    .scope
                    .config
                    .memoize_generators
                    .then(ArgumentMemo::default);
                let definition = Definition::Function {
                    function: TypeFunction::new(body),
                    memo,
                };
                (definition, Event::FunctionBound)
            }
            source => {
                let definition = Definition::Plain {
                    source,
                    cell: CacheCell::new(),
                };
                (definition, Event::AliasBound)
            }
        }
    }

    fn reject(&self, name: &str, err: AliasError) -> AliasError {
        let message = err.to_string();
        self.scope.metrics.increment_errors();
        self.scope.emit(
            Event::BindingRejected,
            &[
                ("alias", name),
                ("code", err.code()),
                ("error", message.as_str()),
            ],
        );
        err
    }
}
