//! Type function invocation protocol
//!
//! Accepted call shapes:
//! - no arguments: the function's base case, body sees `&[]`
//! - one `Sequence` argument: its items are the parameter list (`Name[a, b]`)
//!
//! Anything else is a usage error.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{AliasError, AliasResult};
use crate::expr::{Normalized, TypeExpr};
use crate::validator::Type;

/// A validated call shape.
#[derive(Debug, Clone)]
pub enum Invocation {
    Bare,
    Applied(Vec<TypeExpr>),
}

impl Invocation {
    /// Classifies a raw argument list.
    pub fn from_args(args: Vec<TypeExpr>) -> AliasResult<Self> {
        let mut args = args.into_iter();
        match (args.next(), args.next()) {
            (None, _) => Ok(Invocation::Bare),
            (Some(TypeExpr::Sequence(params)), None) => Ok(Invocation::Applied(params)),
            (Some(other), None) => Err(AliasError::usage(format!(
                "expected a parameter list, got a single {} argument",
                other.shape()
            ))),
            (Some(_), Some(_)) => Err(AliasError::usage(format!(
                "expected a single parameter list, got {} bare arguments",
                2 + args.count()
            ))),
        }
    }

    /// Returns whether every parameter is a leaf, so its normalized form
    /// is the same instance on every call.
    pub fn has_stable_identity(&self) -> bool {
        self.params()
            .iter()
            .all(|param| matches!(param, TypeExpr::Leaf(_)))
    }

    /// Parameters handed to the function body.
    pub fn params(&self) -> &[TypeExpr] {
        match self {
            Invocation::Bare => &[],
            Invocation::Applied(params) => params,
        }
    }
}

/// Argument-keyed cache of type function results.
///
/// Keys are the identities of the normalized arguments, so only calls whose
/// parameters are all leaves are worth caching. The argument handles are
/// kept alongside the result so a key's addresses cannot be reused by other
/// validators while the entry lives.
#[derive(Debug, Default)]
pub(crate) struct ArgumentMemo {
    entries: Mutex<HashMap<Vec<usize>, (Vec<Type>, Normalized)>>,
}

impl ArgumentMemo {
    pub(crate) fn get(&self, args: &[Type]) -> Option<Normalized> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(&key(args)).map(|(_, result)| result.clone())
    }

    pub(crate) fn insert(&self, args: Vec<Type>, result: Normalized) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.entry(key(&args)).or_insert((args, result));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn key(args: &[Type]) -> Vec<usize> {
    args.iter().map(Type::addr).collect()
}
