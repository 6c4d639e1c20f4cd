//! Classification rules: label registry, rule data model, RON catalog loading,
//! priority tiers, and the configuration lint pass.

mod catalog;
mod def;
mod error;
mod label;
mod rule;
mod tier;
mod validate;

pub use catalog::RuleCatalog;
pub use def::{CatalogDef, RuleDef};
pub use error::CatalogError;
pub use label::{LabelRegistry, LabelRegistryError};
pub use rule::{
    ClassificationRule, CullDirection, LATITUDE_UNSET, LatitudeWindows, NoiseParams,
    NoiseSettings, OverlaySettings, RuggednessDirective, RuggednessRange, ValueRange,
};
pub use tier::{Tier, group_by_tier};
pub use validate::{
    Diagnostic, MAX_FREQUENCY, OVERLAY_SELECTION_LAYER, RangeField, WarningKind,
    log_diagnostics, validate,
};
