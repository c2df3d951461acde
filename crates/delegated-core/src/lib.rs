//! Core runtime for Delegated: record traits, role metadata, the stored
//! delegate reference, the embedded store, and scope execution.

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod reference;
pub mod traits;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{DelegateModel, RoleModel},
        reference::DelegateRef,
        traits::{Delegate, Delegated, Path, Record},
        types::{RecordKey, Timestamp},
    };
}
