//! Composite validators
//!
//! - `tuple_of`: ordered product, same-length array matching positionally
//! - `record_of`: keyed product, exactly the listed keys, each matching
//! - `array_of`: homogeneous array
//! - `union`: either side matches
//!
//! Combinators trust their inputs. Key sorting and duplicate rejection
//! belong to the normalizer.

use serde_json::Value;

use super::{Type, Validator};

struct TupleOf {
    items: Vec<Type>,
}

impl Validator for TupleOf {
    fn check(&self, value: &Value) -> bool {
        match value.as_array() {
            Some(arr) => {
                arr.len() == self.items.len()
                    && arr.iter().zip(&self.items).all(|(elem, ty)| ty.check(elem))
            }
            None => false,
        }
    }

    fn describe(&self) -> String {
        format!("Tuple[{}]", join(self.items.iter().map(Type::describe)))
    }
}

struct RecordOf {
    fields: Vec<(String, Type)>,
}

impl Validator for RecordOf {
    fn check(&self, value: &Value) -> bool {
        let Some(obj) = value.as_object() else {
            return false;
        };

        // No undeclared fields
        if obj.len() != self.fields.len() {
            return false;
        }

        self.fields.iter().all(|(name, ty)| match obj.get(name) {
            Some(field) => ty.check(field),
            None => false,
        })
    }

    fn describe(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(name, ty)| format!("{}: {}", name, ty.describe()));
        format!("Record{{{}}}", join(fields))
    }
}

struct ArrayOf {
    element: Type,
}

impl Validator for ArrayOf {
    fn check(&self, value: &Value) -> bool {
        value
            .as_array()
            .map_or(false, |arr| arr.iter().all(|elem| self.element.check(elem)))
    }

    fn describe(&self) -> String {
        format!("List[{}]", self.element.describe())
    }
}

struct Union {
    left: Type,
    right: Type,
}

impl Validator for Union {
    fn check(&self, value: &Value) -> bool {
        self.left.check(value) || self.right.check(value)
    }

    fn describe(&self) -> String {
        format!("{} | {}", self.left.describe(), self.right.describe())
    }
}

/// Ordered product of `items`.
pub fn tuple_of(items: Vec<Type>) -> Type {
    Type::new(TupleOf { items })
}

/// Keyed product of `fields`, checked and rendered in the given order.
pub fn record_of(fields: Vec<(String, Type)>) -> Type {
    Type::new(RecordOf { fields })
}

/// Array whose every element satisfies `element`.
pub fn array_of(element: Type) -> Type {
    Type::new(ArrayOf { element })
}

/// Accepts values satisfying either side.
pub fn union(left: Type, right: Type) -> Type {
    Type::new(Union { left, right })
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}
