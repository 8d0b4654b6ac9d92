//! Validator library for typebind
//!
//! The constraint vocabulary that type expressions compile into:
//!
//! - `Validator`: the capability set every leaf must satisfy
//! - `Type`: shared, cloneable handle over a validator
//! - primitives over `serde_json::Value` (`Any`, `Str`, `Int`, `Float`, `Bool`)
//! - combinators: ordered product, keyed product, homogeneous list, union
//!
//! Value checks are boolean only. A value failing a check is not an error.

mod combinators;
mod primitives;

pub use combinators::{array_of, record_of, tuple_of, union};
pub use primitives::{any, boolean, float, int, string};

use serde_json::Value;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// Capability set accepted as a leaf by the normalizer.
///
/// Implementations must be deterministic: the same value always checks the
/// same way, and `describe` always renders the same text.
pub trait Validator: Send + Sync {
    /// Returns whether `value` satisfies this constraint.
    fn check(&self, value: &Value) -> bool;

    /// Renders the constraint for diagnostics.
    fn describe(&self) -> String;
}

/// Shared handle to a validator.
///
/// Cloning is cheap and preserves identity; see [`Type::ptr_eq`].
#[derive(Clone)]
pub struct Type(Arc<dyn Validator>);

impl Type {
    /// Wraps a validator implementation.
    pub fn new<V: Validator + 'static>(validator: V) -> Self {
        Self(Arc::new(validator))
    }

    pub fn check(&self, value: &Value) -> bool {
        self.0.check(value)
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    /// Returns true if both handles point at the same validator instance.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns true if both validators render identically.
    ///
    /// Two normalized records with the same fields in different literal
    /// order compare equal here.
    pub fn same_structure(&self, other: &Type) -> bool {
        self.ptr_eq(other) || self.describe() == other.describe()
    }

    /// Address of the underlying validator, used as an identity key.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Composes `self | other`.
    pub fn or(&self, other: &Type) -> Type {
        union(self.clone(), other.clone())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.describe())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl BitOr for Type {
    type Output = Type;

    fn bitor(self, rhs: Type) -> Type {
        union(self, rhs)
    }
}

impl BitOr for &Type {
    type Output = Type;

    fn bitor(self, rhs: &Type) -> Type {
        self.or(rhs)
    }
}

/// Returns the JSON type name for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Even;

    impl Validator for Even {
        fn check(&self, value: &Value) -> bool {
            value.as_i64().map_or(false, |n| n % 2 == 0)
        }

        fn describe(&self) -> String {
            "Even".into()
        }
    }

    #[test]
    fn test_custom_validator_through_handle() {
        let even = Type::new(Even);
        assert!(even.check(&json!(4)));
        assert!(!even.check(&json!(3)));
        assert_eq!(even.describe(), "Even");
    }

    #[test]
    fn test_clone_preserves_identity() {
        let a = Type::new(Even);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Type::new(Even)));
        assert!(a.same_structure(&Type::new(Even)));
    }

    #[test]
    fn test_bitor_builds_union() {
        let t = int() | string();
        assert!(t.check(&json!(1)));
        assert!(t.check(&json!("one")));
        assert!(!t.check(&json!(true)));
        assert_eq!(t.describe(), "Int | Str");
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1)), "int");
        assert_eq!(json_type_name(&json!(1.5)), "float");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
