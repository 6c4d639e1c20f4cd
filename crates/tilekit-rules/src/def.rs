//! Serialized catalog format.
//!
//! Rule definitions use flat, author-facing field names and refer to labels by
//! name. [`RuleCatalog`](crate::RuleCatalog) resolves them into
//! [`ClassificationRule`](crate::ClassificationRule)s.

use serde::{Deserialize, Serialize};
use tilekit_grid::Ruggedness;

use crate::rule::{CullDirection, LATITUDE_UNSET, NoiseParams, OverlaySettings, RuggednessDirective};

/// Top-level catalog file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogDef {
    /// Label whose cells count as water for neighbor thresholds.
    pub water_label: String,
    /// Labels the host grid uses before classification.
    pub base_labels: Vec<String>,
    /// Rules in declaration order.
    pub rules: Vec<RuleDef>,
}

impl Default for CatalogDef {
    fn default() -> Self {
        Self {
            water_label: "Ocean".to_string(),
            base_labels: Vec::new(),
            rules: Vec::new(),
        }
    }
}

/// One rule as written by a catalog author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleDef {
    /// Label assigned on match.
    pub label: String,
    /// Labels this rule may overwrite. Empty means any.
    pub source_labels: Vec<String>,
    /// Priority tier. `None` runs in tier 1.
    pub tier: Option<u32>,
    /// Coarse probability in `[0, 100]`.
    pub frequency: i32,

    pub min_temperature: f32,
    pub max_temperature: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub min_rainfall: f32,
    pub max_rainfall: f32,
    pub min_ruggedness: Ruggedness,
    pub max_ruggedness: Ruggedness,

    pub min_north_latitude: f32,
    pub max_north_latitude: f32,
    pub min_south_latitude: f32,
    pub max_south_latitude: f32,

    pub allow_on_water: bool,
    pub allow_on_land: bool,
    pub requires_river: bool,
    pub min_water_neighbors: u32,
    pub min_land_neighbors: u32,

    /// Enables the noise predicate.
    pub use_noise: bool,
    pub noise: NoiseParams,
    /// Fixed noise seed; wins over `per_cell_noise_seed`. Perlin tables are
    /// keyed on 32 bits, so wider values fail to parse.
    pub noise_seed: Option<u32>,
    /// Seed the noise field with the cell index.
    pub per_cell_noise_seed: bool,
    pub noise_culling: f64,
    pub cull_direction: CullDirection,

    pub set_ruggedness: Option<RuggednessDirective>,
    /// Deprecated spelling of `set_ruggedness`, read only when that is absent.
    pub spawn_ruggedness: Option<RuggednessDirective>,
    pub set_elevation: Option<f32>,

    pub overlay: Option<OverlaySettings>,
}

impl Default for RuleDef {
    fn default() -> Self {
        Self {
            label: String::new(),
            source_labels: Vec::new(),
            tier: None,
            frequency: 100,
            min_temperature: -999.0,
            max_temperature: 999.0,
            min_elevation: -9999.0,
            max_elevation: 9999.0,
            min_rainfall: -9999.0,
            max_rainfall: 9999.0,
            min_ruggedness: Ruggedness::Flat,
            max_ruggedness: Ruggedness::Impassable,
            min_north_latitude: LATITUDE_UNSET,
            max_north_latitude: LATITUDE_UNSET,
            min_south_latitude: LATITUDE_UNSET,
            max_south_latitude: LATITUDE_UNSET,
            allow_on_water: false,
            allow_on_land: true,
            requires_river: false,
            min_water_neighbors: 0,
            min_land_neighbors: 0,
            use_noise: false,
            noise: NoiseParams::default(),
            noise_seed: None,
            per_cell_noise_seed: false,
            noise_culling: 0.99,
            cull_direction: CullDirection::RejectAbove,
            set_ruggedness: None,
            spawn_ruggedness: None,
            set_elevation: None,
            overlay: None,
        }
    }
}
