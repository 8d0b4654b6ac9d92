//! Type expression normalizer
//!
//! Pure, recursive, deterministic. Composites are built with the validator
//! library combinators; records are sorted by key before composition so
//! that field order in the literal never affects the result.

use super::{Generator, TypeExpr};
use crate::errors::{AliasError, AliasResult};
use crate::validator::{json_type_name, record_of, tuple_of, Type};

/// Result of normalizing a type expression.
#[derive(Debug, Clone)]
pub enum Normalized {
    Type(Type),
    Function(TypeFunction),
}

impl Normalized {
    /// Returns the validator, failing if this is a type function.
    pub fn into_type(self) -> AliasResult<Type> {
        match self {
            Normalized::Type(ty) => Ok(ty),
            Normalized::Function(_) => Err(AliasError::unsupported_literal(
                "type function where a type was expected",
            )),
        }
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Normalized::Type(ty) => Some(ty),
            Normalized::Function(_) => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Normalized::Function(_))
    }
}

/// A normalized generator.
///
/// Calling it normalizes each raw argument, runs the body, then normalizes
/// whatever the body returned. Nothing is cached here.
#[derive(Debug, Clone)]
pub struct TypeFunction {
    body: Generator,
}

impl TypeFunction {
    pub(crate) fn new(body: Generator) -> Self {
        Self { body }
    }

    /// Calls the function with raw argument literals.
    pub fn call(&self, args: &[TypeExpr]) -> AliasResult<Normalized> {
        let types = self.normalize_args(args)?;
        self.apply(&types)
    }

    /// Normalizes raw arguments into validators.
    pub fn normalize_args(&self, args: &[TypeExpr]) -> AliasResult<Vec<Type>> {
        args.iter().map(normalize_type).collect()
    }

    /// Runs the body on normalized arguments and normalizes its result.
    pub fn apply(&self, args: &[Type]) -> AliasResult<Normalized> {
        let produced = self.body.invoke(args)?;
        normalize(&produced)
    }
}

impl From<TypeFunction> for TypeExpr {
    fn from(function: TypeFunction) -> Self {
        TypeExpr::Generator(function.body)
    }
}

/// Compiles a type expression.
///
/// # Errors
///
/// Returns `UnsupportedLiteral` if the expression (or anything nested in
/// it) is raw data, a record has a duplicate key, or a generator sits in a
/// position that needs a type.
pub fn normalize(expr: &TypeExpr) -> AliasResult<Normalized> {
    match expr {
        TypeExpr::Leaf(ty) => Ok(Normalized::Type(ty.clone())),
        TypeExpr::Sequence(items) => {
            let items = items
                .iter()
                .map(normalize_type)
                .collect::<AliasResult<Vec<_>>>()?;
            Ok(Normalized::Type(tuple_of(items)))
        }
        TypeExpr::Record(fields) => normalize_record(fields).map(Normalized::Type),
        TypeExpr::Generator(body) => Ok(Normalized::Function(TypeFunction::new(body.clone()))),
        TypeExpr::Data(value) => Err(AliasError::unsupported_literal(format!(
            "raw {} value",
            json_type_name(value)
        ))),
    }
}

/// Compiles a type expression that must produce a validator.
pub fn normalize_type(expr: &TypeExpr) -> AliasResult<Type> {
    normalize(expr)?.into_type()
}

fn normalize_record(fields: &[(String, TypeExpr)]) -> AliasResult<Type> {
    let mut sorted: Vec<&(String, TypeExpr)> = fields.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(AliasError::unsupported_literal(format!(
            "record with duplicate field '{}'",
            pair[0].0
        )));
    }

    let fields = sorted
        .into_iter()
        .map(|(name, expr)| normalize_type(expr).map(|ty| (name.clone(), ty)))
        .collect::<AliasResult<Vec<_>>>()?;

    Ok(record_of(fields))
}
