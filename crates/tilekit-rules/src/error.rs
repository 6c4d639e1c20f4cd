//! Catalog loading errors.

use crate::LabelRegistryError;

/// Errors that can occur when loading a rule catalog.
///
/// Rule-level invariant violations are not errors; see [`validate`](crate::validate).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read rule catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse rule catalog: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// A rule definition has no label to assign.
    #[error("rule #{0} has no label")]
    MissingLabel(usize),

    /// A label could not be registered.
    #[error(transparent)]
    Label(#[from] LabelRegistryError),
}
