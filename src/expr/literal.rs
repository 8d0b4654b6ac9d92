//! Literal reader for JSON-shaped type descriptions
//!
//! Reading rules:
//! - array: `Sequence` of the elements
//! - object: `Record` of the entries
//! - string: a named validator, resolved through the caller first (bound
//!   aliases) and the prelude second
//! - anything else: `Data`, rejected later by the normalizer
//!
//! A string naming nothing fails here with `UnsupportedValidatorObject`,
//! before any normalization runs.

use serde_json::Value;
use std::collections::BTreeMap;

use super::TypeExpr;
use crate::errors::{AliasError, AliasResult};
use crate::validator::{any, boolean, float, int, string, Type};

/// Named primitive validators available to literals.
#[derive(Debug, Clone)]
pub struct Prelude {
    validators: BTreeMap<String, Type>,
}

impl Default for Prelude {
    fn default() -> Self {
        let mut prelude = Self::empty();
        prelude
            .register("Any", any())
            .register("Str", string())
            .register("Int", int())
            .register("Float", float())
            .register("Bool", boolean());
        prelude
    }
}

impl Prelude {
    /// Prelude with the standard primitives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prelude with no names at all.
    pub fn empty() -> Self {
        Self {
            validators: BTreeMap::new(),
        }
    }

    /// Adds or replaces a named validator.
    pub fn register(&mut self, name: impl Into<String>, ty: Type) -> &mut Self {
        self.validators.insert(name.into(), ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.validators.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Reads a literal using prelude names only.
    pub fn read(&self, literal: &Value) -> AliasResult<TypeExpr> {
        read_literal(literal, self, &|_| None)
    }
}

/// Reads a literal, resolving names through `resolve` before the prelude.
///
/// `resolve` returns `None` when it does not know a name.
pub(crate) fn read_literal(
    literal: &Value,
    prelude: &Prelude,
    resolve: &dyn Fn(&str) -> Option<AliasResult<Type>>,
) -> AliasResult<TypeExpr> {
    match literal {
        Value::Array(items) => items
            .iter()
            .map(|item| read_literal(item, prelude, resolve))
            .collect::<AliasResult<Vec<_>>>()
            .map(TypeExpr::Sequence),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, value)| {
                read_literal(value, prelude, resolve).map(|expr| (key.clone(), expr))
            })
            .collect::<AliasResult<Vec<_>>>()
            .map(TypeExpr::Record),
        Value::String(name) => {
            if let Some(resolved) = resolve(name) {
                return resolved.map(TypeExpr::Leaf);
            }
            prelude
                .get(name)
                .cloned()
                .map(TypeExpr::Leaf)
                .ok_or_else(|| AliasError::unsupported_validator(name.as_str()))
        }
        other => Ok(TypeExpr::Data(other.clone())),
    }
}
