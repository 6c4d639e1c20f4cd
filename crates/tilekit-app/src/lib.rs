//! The `tilekit` demo: synthesizes a planet, classifies it with a rule
//! catalog, plans overlays, and reports what changed.

pub mod error;
pub mod map;
pub mod platform;
pub mod report;
pub mod run;
pub mod world;

pub use error::AppError;
pub use run::{RunOutput, classify_world, load_catalog};

/// Catalog used when no rules file is configured.
pub const DEFAULT_RULES: &str = include_str!("../assets/default_rules.ron");
