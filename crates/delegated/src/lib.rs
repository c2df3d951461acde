//! Delegated — typed delegated-type associations for embedded record
//! stores.
//!
//! A base record (an `Entry`, say) stores one polymorphic reference — a
//! discriminator plus a foreign key — to exactly one of several concrete
//! delegate records (`Message`, `Comment`). Declaring the role once, at the
//! type definition, installs the whole runtime surface at compile time:
//! per-type accessors, predicates, id readers, and pluralized query scopes.
//!
//! ## Crate layout
//! - `core` (re-exported module-by-module): record traits, role metadata,
//!   the stored reference, the embedded store, scopes, and counters.
//! - `derive`: the `Record`, `Delegated` (declarator), and `Delegate`
//!   (marker) derive macros.
//!
//! The `prelude` module mirrors the surface application code uses.

pub use delegated_core::{db, error, model, obs, reference, traits, types};

pub use delegated_derive::{Delegate, Delegated, Record};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        db::{Database, DelegateScope},
        error::Error,
        model::{ConfigError, DelegateModel, RoleModel},
        reference::DelegateRef,
        traits::{Delegate, Delegated, Path, Record},
        types::{RecordKey, Timestamp},
    };
    pub use delegated_derive::{Delegate, Delegated, Record};
}
