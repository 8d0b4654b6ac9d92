//! Primitive validators over JSON values
//!
//! Type matching is exact, with one exception carried over from the
//! document validator: `Float` accepts integers.

use serde_json::Value;

use super::{Type, Validator};

/// Scalar kinds known to the primitive validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Primitive {
    Any,
    Str,
    Int,
    Float,
    Bool,
}

impl Primitive {
    fn name(&self) -> &'static str {
        match self {
            Primitive::Any => "Any",
            Primitive::Str => "Str",
            Primitive::Int => "Int",
            Primitive::Float => "Float",
            Primitive::Bool => "Bool",
        }
    }
}

impl Validator for Primitive {
    fn check(&self, value: &Value) -> bool {
        match self {
            Primitive::Any => true,
            Primitive::Str => value.is_string(),
            // Must be an integer (not a float)
            Primitive::Int => value.is_i64() || value.is_u64(),
            Primitive::Float => value.is_number(),
            Primitive::Bool => value.is_boolean(),
        }
    }

    fn describe(&self) -> String {
        self.name().to_string()
    }
}

/// Accepts every value.
pub fn any() -> Type {
    Type::new(Primitive::Any)
}

/// UTF-8 string.
pub fn string() -> Type {
    Type::new(Primitive::Str)
}

/// 64-bit signed or unsigned integer.
pub fn int() -> Type {
    Type::new(Primitive::Int)
}

/// Any JSON number.
pub fn float() -> Type {
    Type::new(Primitive::Float)
}

pub fn boolean() -> Type {
    Type::new(Primitive::Bool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_rejects_floats() {
        assert!(int().check(&json!(20)));
        assert!(int().check(&json!(u64::MAX)));
        assert!(!int().check(&json!(20.5)));
        assert!(!int().check(&json!("20")));
    }

    #[test]
    fn test_float_accepts_integers() {
        assert!(float().check(&json!(100)));
        assert!(float().check(&json!(99.5)));
        assert!(!float().check(&json!(null)));
    }

    #[test]
    fn test_string_and_bool_are_exact() {
        assert!(string().check(&json!("foo")));
        assert!(!string().check(&json!(1)));
        assert!(boolean().check(&json!(false)));
        assert!(!boolean().check(&json!(0)));
    }

    #[test]
    fn test_any_accepts_everything() {
        for value in [json!(null), json!(1), json!("x"), json!([1, "a"]), json!({"k": []})] {
            assert!(any().check(&value));
        }
    }

    #[test]
    fn test_primitive_names() {
        assert_eq!(any().describe(), "Any");
        assert_eq!(string().describe(), "Str");
        assert_eq!(int().describe(), "Int");
        assert_eq!(float().describe(), "Float");
        assert_eq!(boolean().describe(), "Bool");
    }
}
