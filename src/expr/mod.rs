//! Type expressions for typebind
//!
//! A `TypeExpr` is the literal description a caller writes down; the
//! normalizer compiles it into a `Type` (or a `TypeFunction` for
//! generators). Shapes:
//!
//! - `Leaf`: an existing validator, passed through unchanged
//! - `Sequence`: positional composition
//! - `Record`: keyed composition, canonicalized by key at normalization
//! - `Generator`: a type function over argument validators
//! - `Data`: a raw value where a type was expected, always rejected

mod literal;
mod normalize;

pub use literal::Prelude;
pub use normalize::{normalize, normalize_type, Normalized, TypeFunction};

pub(crate) use literal::read_literal;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::errors::AliasResult;
use crate::validator::{json_type_name, Type};

/// Signature of a type function body.
///
/// The body receives already normalized argument validators and may return
/// any literal shape, including another generator.
pub type GeneratorFn = dyn Fn(&[Type]) -> AliasResult<TypeExpr> + Send + Sync;

/// A type function literal.
#[derive(Clone)]
pub struct Generator(Arc<GeneratorFn>);

impl Generator {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&[Type]) -> AliasResult<TypeExpr> + Send + Sync + 'static,
    {
        Self(Arc::new(body))
    }

    /// Runs the body on normalized arguments. The result is still raw.
    pub fn invoke(&self, args: &[Type]) -> AliasResult<TypeExpr> {
        (self.0)(args)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Generator(..)")
    }
}

/// Literal description of a type.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    Leaf(Type),
    Sequence(Vec<TypeExpr>),
    /// Fields in literal order. Keys must be unique.
    Record(Vec<(String, TypeExpr)>),
    Generator(Generator),
    Data(Value),
}

impl TypeExpr {
    pub fn leaf(ty: Type) -> Self {
        TypeExpr::Leaf(ty)
    }

    pub fn seq<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<TypeExpr>,
    {
        TypeExpr::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn record<I, K, E>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<TypeExpr>,
    {
        TypeExpr::Record(
            fields
                .into_iter()
                .map(|(name, expr)| (name.into(), expr.into()))
                .collect(),
        )
    }

    pub fn generator<F>(body: F) -> Self
    where
        F: Fn(&[Type]) -> AliasResult<TypeExpr> + Send + Sync + 'static,
    {
        TypeExpr::Generator(Generator::new(body))
    }

    /// Short shape name for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            TypeExpr::Leaf(_) => "leaf",
            TypeExpr::Sequence(_) => "sequence",
            TypeExpr::Record(_) => "record",
            TypeExpr::Generator(_) => "generator",
            TypeExpr::Data(value) => json_type_name(value),
        }
    }
}

impl From<Type> for TypeExpr {
    fn from(ty: Type) -> Self {
        TypeExpr::Leaf(ty)
    }
}

impl From<&Type> for TypeExpr {
    fn from(ty: &Type) -> Self {
        TypeExpr::Leaf(ty.clone())
    }
}

impl From<Generator> for TypeExpr {
    fn from(generator: Generator) -> Self {
        TypeExpr::Generator(generator)
    }
}

impl From<Vec<TypeExpr>> for TypeExpr {
    fn from(items: Vec<TypeExpr>) -> Self {
        TypeExpr::Sequence(items)
    }
}
