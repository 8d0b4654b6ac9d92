//! Alias Invariant Tests
//!
//! - A leaf normalizes to itself
//! - Record normalization is independent of literal key order
//! - Sequence normalization preserves order
//! - A plain alias is normalized exactly once and is referentially stable
//! - Forward declarations fail until bound
//! - Type functions accept only the documented call shapes

use serde_json::json;
use std::sync::Arc;
use std::thread;

use typebind::validator::{any, array_of, int, string};
use typebind::{
    normalize, normalize_type, AliasError, AliasState, Namespace, NamespaceConfig, Normalized,
    TypeExpr,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn quiet_namespace() -> Namespace {
    Namespace::with_config("invariants", NamespaceConfig::quiet())
}

fn list_generator() -> TypeExpr {
    TypeExpr::generator(|args| {
        Ok(match args.first() {
            Some(elem) => array_of(elem.clone()).into(),
            None => array_of(any()).into(),
        })
    })
}

// =============================================================================
// Normalizer Tests
// =============================================================================

/// Leaf normalization returns the very same validator.
#[test]
fn test_leaf_identity() {
    let v = string();
    let out = normalize_type(&TypeExpr::from(&v)).unwrap();
    assert!(out.ptr_eq(&v));
}

/// Records with the same fields in different order are structurally identical.
#[test]
fn test_record_key_order_independence() {
    let v1 = int();
    let v2 = string();

    let ba = normalize_type(&TypeExpr::record([("b", &v2), ("a", &v1)])).unwrap();
    let ab = normalize_type(&TypeExpr::record([("a", &v1), ("b", &v2)])).unwrap();

    assert!(ba.same_structure(&ab));
    assert_eq!(ba.describe(), ab.describe());

    let value = json!({"a": 1, "b": "x"});
    assert_eq!(ba.check(&value), ab.check(&value));
}

/// Sequence normalization renders elements in the given order.
#[test]
fn test_sequence_order_preserved() {
    let out = normalize_type(&TypeExpr::seq([int(), string()])).unwrap();
    let described = out.describe();
    assert!(described.find("Int").unwrap() < described.find("Str").unwrap());
}

/// Normalization is deterministic.
#[test]
fn test_normalization_is_deterministic() {
    let expr = TypeExpr::record([
        ("z", TypeExpr::seq([int(), string()])),
        ("a", TypeExpr::record([("k", any())])),
    ]);

    let first = normalize_type(&expr).unwrap().describe();
    for _ in 0..50 {
        assert_eq!(normalize_type(&expr).unwrap().describe(), first);
    }
}

/// A generator normalizes to a type function, not a type.
#[test]
fn test_generator_normalizes_to_function() {
    assert!(normalize(&list_generator()).unwrap().is_function());
    assert!(normalize_type(&list_generator()).is_err());
}

// =============================================================================
// Memoization Tests
// =============================================================================

/// Two lookups of a plain alias normalize once and return the same instance.
#[test]
fn test_plain_alias_normalized_once() {
    let mut ns = quiet_namespace();
    ns.bind("User", TypeExpr::record([("id", string()), ("age", int())]))
        .unwrap();

    let first = ns.lookup("User").unwrap().get().unwrap();
    let second = ns.lookup("User").unwrap().get().unwrap();

    assert!(first.ptr_eq(&second));
    let metrics = ns.metrics();
    assert_eq!(metrics.normalizations, 1);
    assert_eq!(metrics.cache_hits, 1);
}

/// Binding does not normalize; the first access does.
#[test]
fn test_binding_is_lazy() {
    let mut ns = quiet_namespace();
    let user = ns.bind("User", TypeExpr::record([("id", string())])).unwrap();

    assert_eq!(user.state(), AliasState::Bound);
    assert_eq!(ns.metrics().normalizations, 0);

    user.get().unwrap();
    assert_eq!(user.state(), AliasState::Resolved);
    assert_eq!(ns.metrics().normalizations, 1);
}

/// Concurrent first access yields one shared instance.
#[test]
fn test_concurrent_lookups_share_instance() {
    let mut ns = quiet_namespace();
    ns.bind("Pair", TypeExpr::seq([int(), int()])).unwrap();
    let ns = Arc::new(ns);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ns = Arc::clone(&ns);
            thread::spawn(move || ns.lookup("Pair").unwrap().get().unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let settled = ns.lookup("Pair").unwrap().get().unwrap();
    assert!(results.iter().all(|ty| ty.ptr_eq(&settled)));
}

// =============================================================================
// Forward Declaration Tests
// =============================================================================

/// Calling a forward declaration before binding fails; after binding it works.
#[test]
fn test_forward_declaration_lifecycle() {
    let mut ns = quiet_namespace();
    let x = ns.declare_forward("X").unwrap();

    let err = x.get().unwrap_err();
    assert_eq!(err, AliasError::UndefinedAlias("X".into()));

    let bound = int();
    ns.bind("X", &bound).unwrap();
    assert!(x.get().unwrap().ptr_eq(&bound));
}

/// A type function body may reference an alias defined after it.
#[test]
fn test_generator_body_references_forward_alias() {
    let mut ns = quiet_namespace();
    let item = ns.declare_forward("Item").unwrap();

    let body_item = item.clone();
    let bag = ns
        .bind(
            "Bag",
            TypeExpr::generator(move |_| {
                Ok(TypeExpr::record([("items", array_of(body_item.get()?))]))
            }),
        )
        .unwrap();

    assert_eq!(
        bag.get().unwrap_err(),
        AliasError::UndefinedAlias("Item".into())
    );
    // Reported by `Bag` only, not again by the nested `Item` access
    assert_eq!(ns.metrics().errors, 1);

    ns.bind("Item", string()).unwrap();
    let ty = bag.get().unwrap();
    assert!(ty.check(&json!({"items": ["a", "b"]})));
    assert!(!ty.check(&json!({"items": [1]})));
}

/// Rebinding a defined name is a collision.
#[test]
fn test_name_collision() {
    let mut ns = quiet_namespace();
    ns.bind("ID", string()).unwrap();

    assert_eq!(
        ns.bind("ID", string()).unwrap_err(),
        AliasError::NameCollision("ID".into())
    );
    assert_eq!(
        ns.declare_forward("ID").unwrap_err(),
        AliasError::NameCollision("ID".into())
    );
}

/// Lookup of a name that was never declared fails.
#[test]
fn test_lookup_undeclared() {
    let ns = quiet_namespace();
    assert_eq!(
        ns.lookup("Ghost").unwrap_err(),
        AliasError::UndefinedAlias("Ghost".into())
    );
}

// =============================================================================
// Invocation Protocol Tests
// =============================================================================

/// `List()` accepts any array, `List[Int]` only integer arrays.
#[test]
fn test_list_call_shapes() {
    let mut ns = quiet_namespace();
    let list = ns.bind("List", list_generator()).unwrap();

    let any_list = list.call(vec![]).unwrap();
    assert!(any_list.check(&json!([1, "a", null])));
    assert!(!any_list.check(&json!({"a": 1})));

    let int_list = list.call(vec![TypeExpr::seq([int()])]).unwrap();
    assert!(int_list.check(&json!([1, 2, 3])));
    assert!(!int_list.check(&json!([1, "2"])));
}

/// Two bare arguments are a usage error.
#[test]
fn test_list_bare_arguments_rejected() {
    let mut ns = quiet_namespace();
    let list = ns.bind("List", list_generator()).unwrap();

    let err = list
        .call(vec![TypeExpr::from(int()), TypeExpr::from(string())])
        .unwrap_err();
    assert!(matches!(err, AliasError::UsageError(_)));

    let err = list.call(vec![TypeExpr::from(int())]).unwrap_err();
    assert!(matches!(err, AliasError::UsageError(_)));
}

/// Type functions recompute on every call when memoization is off.
#[test]
fn test_generator_not_memoized_by_default() {
    let mut ns = quiet_namespace();
    let list = ns.bind("List", list_generator()).unwrap();
    let elem = int();

    list.apply([&elem]).unwrap();
    list.apply([&elem]).unwrap();

    let metrics = ns.metrics();
    assert_eq!(metrics.function_invocations, 2);
    assert_eq!(metrics.memo_hits, 0);
}

/// A type function may return another type function.
#[test]
fn test_curried_generator() {
    let mut ns = quiet_namespace();
    let keyed = ns
        .bind(
            "Keyed",
            TypeExpr::generator(|outer| {
                let key_type = outer.first().cloned().unwrap_or_else(any);
                Ok(TypeExpr::generator(move |inner| {
                    let value_type = inner.first().cloned().unwrap_or_else(any);
                    Ok(TypeExpr::record([
                        ("key", key_type.clone()),
                        ("value", value_type),
                    ]))
                }))
            }),
        )
        .unwrap();

    let resolved = keyed.resolve(vec![TypeExpr::seq([string()])]).unwrap();
    assert!(resolved.as_type().is_none());
    let inner = match resolved {
        Normalized::Function(f) => f,
        Normalized::Type(ty) => panic!("expected a type function, got {}", ty),
    };
    let entry = inner.call(&[TypeExpr::from(int())]).unwrap();
    let entry = entry.as_type().unwrap();
    assert!(entry.check(&json!({"key": "a", "value": 1})));

    // Requiring a type from a function-valued call fails
    let err = keyed.get().unwrap_err();
    assert_eq!(err.code(), "TYPE_UNSUPPORTED_LITERAL");
}
