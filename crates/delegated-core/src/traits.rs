// -----------------------------------------------------------------------------
// Standard re-exports for `traits::X` ergonomics
// -----------------------------------------------------------------------------

pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use std::fmt::Debug;

use crate::{model::RoleModel, types::{RecordKey, Timestamp}};

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================
//
// These traits define *what* something is to the runtime,
// not what data it contains.
//

///
/// Path
/// Fully-qualified type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// Record
///
/// A persistable row type.
///
/// ## Semantics
/// - Implementors store primitive key material internally
/// - `key()` reads the current primary key; `UNSAVED` until inserted
/// - `set_key` is called exactly once by the store at insert time
/// - `touch` receives the store's logical clock; the default is a no-op,
///   the derive wires it to an `updated_at` field when one is declared
///

pub trait Record: Clone + Debug + Path + Serialize + DeserializeOwned + 'static {
    const RECORD_NAME: &'static str;

    fn key(&self) -> RecordKey;

    fn set_key(&mut self, key: RecordKey);

    fn touch(&mut self, _now: Timestamp) {}
}

// ============================================================================
// DELEGATION CAPABILITIES
// ============================================================================
//
// These traits bind record types into a delegated-type role. Both are
// implemented by the derive macros, never by hand outside of tests.
//

///
/// Delegate
///
/// Marker capability for a concrete delegate type.
///
/// `TYPE_NAME` is the canonical lower-cased type name stored as the
/// discriminator; role matching is exact string equality against it.
/// `Owner` is the base record holding the role reference; the reverse
/// one-to-one accessor resolves against its table.
///

pub trait Delegate: Record {
    type Owner: Record;

    const TYPE_NAME: &'static str;
    const ROLE: &'static str;

    /// When true, saving this delegate touches the owner's timestamp.
    const TOUCH: bool = false;
}

///
/// Delegated
///
/// Declarator capability for a base record: one immutable [`RoleModel`]
/// per declared role, constructed at compile time and read-only after.
///

pub trait Delegated: Record {
    const ROLES: &'static [&'static RoleModel];

    /// Look up a declared role by name.
    #[must_use]
    fn role(name: &str) -> Option<&'static RoleModel> {
        Self::ROLES.iter().find(|role| role.role == name).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::{test_fixtures::Entry, traits::Delegated};

    #[test]
    fn role_lookup_finds_declared_roles_only() {
        let role = Entry::role("entryable").expect("declared role");
        assert_eq!(role.role, "entryable");
        assert_eq!(role.variants.len(), 2);

        assert!(Entry::role("attachable").is_none());
    }
}
