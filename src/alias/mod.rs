//! Alias binding for typebind
//!
//! Names are bound into an explicit `Namespace`:
//!
//! - plain literals are normalized on first access and cached for good
//! - generators become type functions, computed on every call
//! - forward declarations reserve a name; using it early is `UndefinedAlias`
//!
//! Declarations need `&mut Namespace`. Lookups and resolution only need
//! `&Namespace` or a cloned `Accessor`, and are safe across threads.

mod binder;
mod cell;
mod invoke;
mod namespace;

pub use cell::CacheCell;
pub use invoke::Invocation;
pub use namespace::{Accessor, AliasState, Namespace};
