//! Rule-based tile classifier.
//!
//! Applies a [`RuleCatalog`](tilekit_rules::RuleCatalog) to a
//! [`TileGrid`](tilekit_grid::TileGrid): tiers in ascending order, rules in
//! declaration order, cells in index order. Each rule sees the grid as left by
//! every rule before it, so later tiers overwrite earlier ones.

mod error;
mod evaluate;
mod noise_field;
mod pass;
mod seed;

pub use error::ClassifyError;
pub use evaluate::{EvalContext, Mutation, RejectReason, Verdict, evaluate_cell};
pub use noise_field::{FbmNoiseField, NoiseField};
pub use pass::{Classifier, PassReport, RuleOutcome, run_classification_pass};
pub use seed::{cell_rng, derive_cell_seed, derive_noise_seed, resolve_noise_seed};
