//! Rule catalog: resolved rules plus the label registry they refer to.

use std::path::Path;

use tilekit_grid::LabelId;

use crate::def::{CatalogDef, RuleDef};
use crate::error::CatalogError;
use crate::label::LabelRegistry;
use crate::rule::{
    ClassificationRule, LatitudeWindows, NoiseSettings, RuggednessRange, ValueRange,
};

/// An immutable set of classification rules in declaration order.
#[derive(Clone, Debug)]
pub struct RuleCatalog {
    registry: LabelRegistry,
    water_label: LabelId,
    rules: Vec<ClassificationRule>,
}

impl RuleCatalog {
    /// Builds a catalog from already-resolved rules.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Label`] if the water label cannot be registered.
    pub fn from_rules(
        mut registry: LabelRegistry,
        water_label: &str,
        rules: Vec<ClassificationRule>,
    ) -> Result<Self, CatalogError> {
        let water_label = registry.intern(water_label)?;
        Ok(Self {
            registry,
            water_label,
            rules,
        })
    }

    /// Resolves a parsed catalog definition.
    ///
    /// Every label name mentioned (water, base, rule and source labels) is
    /// registered, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingLabel`] for a rule without a label, or
    /// [`CatalogError::Label`] if the registry overflows.
    pub fn from_def(def: &CatalogDef) -> Result<Self, CatalogError> {
        let mut registry = LabelRegistry::new();
        let water_label = registry.intern(&def.water_label)?;
        for name in &def.base_labels {
            registry.intern(name)?;
        }

        let mut rules = Vec::with_capacity(def.rules.len());
        for (index, rule_def) in def.rules.iter().enumerate() {
            rules.push(resolve_rule(index, rule_def, &mut registry)?);
        }

        tracing::debug!(
            rules = rules.len(),
            labels = registry.len(),
            "resolved rule catalog"
        );

        Ok(Self {
            registry,
            water_label,
            rules,
        })
    }

    /// Parses and resolves a catalog from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ParseError`] for malformed RON, or any error
    /// from [`from_def`](Self::from_def).
    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        let def: CatalogDef = ron::from_str(source).map_err(CatalogError::ParseError)?;
        Self::from_def(&def)
    }

    /// Loads a catalog from a RON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ReadError`] if the file cannot be read, or any
    /// error from [`from_ron_str`](Self::from_ron_str).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
        let catalog = Self::from_ron_str(&contents)?;
        tracing::info!(
            "Loaded {} rules from {}",
            catalog.rules.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// The label registry.
    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    /// The label counted as water by neighbor thresholds.
    pub fn water_label(&self) -> LabelId {
        self.water_label
    }

    /// Looks up a label id by name.
    pub fn label(&self, name: &str) -> Option<LabelId> {
        self.registry.lookup_by_name(name)
    }

    /// Name of a label, or `"?"` for ids outside the registry.
    pub fn label_name(&self, id: LabelId) -> &str {
        self.registry.name(id).unwrap_or("?")
    }

    /// The first rule, in declaration order, that assigns `label`.
    pub fn rule_for_label(&self, label: LabelId) -> Option<&ClassificationRule> {
        self.rules.iter().find(|r| r.label == label)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn resolve_rule(
    index: usize,
    def: &RuleDef,
    registry: &mut LabelRegistry,
) -> Result<ClassificationRule, CatalogError> {
    if def.label.trim().is_empty() {
        return Err(CatalogError::MissingLabel(index));
    }
    let label = registry.intern(&def.label)?;

    let mut source_labels = Vec::with_capacity(def.source_labels.len());
    for name in &def.source_labels {
        source_labels.push(registry.intern(name)?);
    }

    let legacy_spawn_ruggedness = def.set_ruggedness.is_none() && def.spawn_ruggedness.is_some();
    let set_ruggedness = def.set_ruggedness.or(def.spawn_ruggedness);

    Ok(ClassificationRule {
        label,
        source_labels,
        temperature: ValueRange::new(def.min_temperature, def.max_temperature),
        elevation: ValueRange::new(def.min_elevation, def.max_elevation),
        rainfall: ValueRange::new(def.min_rainfall, def.max_rainfall),
        ruggedness: RuggednessRange {
            min: def.min_ruggedness,
            max: def.max_ruggedness,
        },
        latitude: LatitudeWindows {
            min_north: def.min_north_latitude,
            max_north: def.max_north_latitude,
            min_south: def.min_south_latitude,
            max_south: def.max_south_latitude,
        },
        allow_on_water: def.allow_on_water,
        allow_on_land: def.allow_on_land,
        requires_river: def.requires_river,
        min_water_neighbors: def.min_water_neighbors,
        min_land_neighbors: def.min_land_neighbors,
        noise: NoiseSettings {
            enabled: def.use_noise,
            params: def.noise,
            fixed_seed: def.noise_seed,
            per_cell_seed: def.per_cell_noise_seed,
            culling: def.noise_culling,
            cull_direction: def.cull_direction,
        },
        frequency: def.frequency,
        tier: def.tier.unwrap_or(ClassificationRule::DEFAULT_TIER),
        set_ruggedness,
        set_elevation: def.set_elevation,
        overlay: def.overlay.clone(),
        legacy_spawn_ruggedness,
    })
}
