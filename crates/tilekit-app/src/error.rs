//! Application error type.

use tilekit_classifier::ClassifyError;
use tilekit_config::ConfigError;
use tilekit_grid::GridError;
use tilekit_rules::CatalogError;

use crate::platform::PlatformError;

/// Anything that stops a `tilekit` run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load rule catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    /// The catalog does not declare a label the demo planet needs.
    #[error("rule catalog does not declare base label {0:?}")]
    MissingBaseLabel(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The grid is too large for a PNG header.
    #[error("{rows}x{columns} grid does not fit a PNG image")]
    MapTooLarge { rows: usize, columns: usize },

    #[error("failed to encode label map: {0}")]
    Png(#[from] png::EncodingError),

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}
