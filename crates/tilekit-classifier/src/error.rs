//! Fatal classification errors.

use tilekit_grid::GridError;

/// Errors that abort a classification pass.
///
/// These come from the host side (grid or noise field); rule configuration
/// problems are reported by [`tilekit_rules::validate`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The grid rejected a read or write.
    #[error("grid access failed: {0}")]
    Grid(#[from] GridError),

    /// The noise field could not produce a usable sample.
    #[error("noise sample failed for seed {seed}: {reason}")]
    Noise {
        /// Seed the field was sampled with.
        seed: u32,
        /// What went wrong.
        reason: String,
    },
}
