use crate::{db::StoreError, model::ConfigError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-boundary error. Registration shape problems surface as
/// [`ConfigError`]; strict store operations surface as [`StoreError`].
/// Type-mismatched accessors are never errors; they return absent values.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
