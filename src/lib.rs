//! typebind - compile nested type literals into validators
//!
//! Literals (leaves, sequences, records, generators) are normalized into
//! composed `Type`s and bound to names in a `Namespace` with lazy,
//! memoized, forward-declarable resolution.
//!
//! ```ignore
//! use typebind::{validator, Namespace, TypeExpr};
//!
//! let mut ns = Namespace::new("app");
//! let user = ns.bind("User", TypeExpr::record([
//!     ("id", validator::string()),
//!     ("age", validator::int()),
//! ]))?;
//! assert!(user.get()?.check(&serde_json::json!({"id": "1", "age": 20})));
//! ```

pub mod alias;
pub mod config;
pub mod errors;
pub mod expr;
pub mod observability;
pub mod validator;

pub use alias::{Accessor, AliasState, Namespace};
pub use config::NamespaceConfig;
pub use errors::{AliasError, AliasResult};
pub use expr::{normalize, normalize_type, Normalized, Prelude, TypeExpr};
pub use validator::{Type, Validator};
