//! Configuration lint pass.
//!
//! Reports every rule invariant violation as a [`Diagnostic`]. Nothing here
//! fails: malformed rules are still scheduled and behave as written.

use std::fmt;

use hashbrown::HashSet;

use crate::{ClassificationRule, RuleCatalog};

/// Highest meaningful rule frequency.
pub const MAX_FREQUENCY: i32 = 100;

/// Overlay layers at or above this value draw over the host's selection marker.
pub const OVERLAY_SELECTION_LAYER: i32 = 3560;

/// A ranged predicate that can be inverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeField {
    /// `min_temperature` / `max_temperature`.
    Temperature,
    /// `min_elevation` / `max_elevation`.
    Elevation,
    /// `min_rainfall` / `max_rainfall`.
    Rainfall,
    /// `min_ruggedness` / `max_ruggedness`.
    Ruggedness,
    /// `min_north_latitude` / `max_north_latitude`.
    NorthLatitude,
    /// `min_south_latitude` / `max_south_latitude`.
    SouthLatitude,
}

impl RangeField {
    fn name(self) -> &'static str {
        match self {
            RangeField::Temperature => "temperature",
            RangeField::Elevation => "elevation",
            RangeField::Rainfall => "rainfall",
            RangeField::Ruggedness => "ruggedness",
            RangeField::NorthLatitude => "north_latitude",
            RangeField::SouthLatitude => "south_latitude",
        }
    }
}

/// The specific invariant a rule violates.
#[derive(Clone, Debug, PartialEq)]
pub enum WarningKind {
    /// `min` is above `max`, so the predicate can never pass.
    InvertedRange(RangeField),
    /// Neither water nor land is allowed.
    NeverSpawns,
    /// Frequency outside `[0, 100]`; clamped when evaluated.
    FrequencyOutOfRange(i32),
    /// Per-cell noise seeding is set while the noise predicate is disabled.
    PerCellSeedWithoutNoise,
    /// A fixed noise seed is set while the noise predicate is disabled.
    FixedSeedWithoutNoise,
    /// A source label is listed more than once.
    DuplicateSourceLabel(String),
    /// Tier 0 was declared; the rule runs in tier 1.
    NonPositiveTier(u32),
    /// The ruggedness directive was read from the deprecated field.
    DeprecatedSpawnRuggedness,
    /// The overlay layer draws above the selection marker.
    OverlayLayerAboveSelection(i32),
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::InvertedRange(field) => {
                let name = field.name();
                write!(f, "min_{name} set above max_{name}")
            }
            WarningKind::NeverSpawns => {
                write!(f, "disallowed on both land and water and will never match")
            }
            WarningKind::FrequencyOutOfRange(v) => {
                write!(f, "frequency {v} outside 0..={MAX_FREQUENCY}, clamped")
            }
            WarningKind::PerCellSeedWithoutNoise => {
                write!(f, "per_cell_noise_seed is set but use_noise is false")
            }
            WarningKind::FixedSeedWithoutNoise => {
                write!(f, "noise_seed is set but use_noise is false; it will not be read")
            }
            WarningKind::DuplicateSourceLabel(name) => {
                write!(f, "source_labels includes {name} twice")
            }
            WarningKind::NonPositiveTier(t) => write!(f, "tier {t} is not positive, using tier 1"),
            WarningKind::DeprecatedSpawnRuggedness => {
                write!(f, "spawn_ruggedness is deprecated, use set_ruggedness")
            }
            WarningKind::OverlayLayerAboveSelection(layer) => write!(
                f,
                "overlay material_layer {layer} is {OVERLAY_SELECTION_LAYER} or higher and draws over the selection marker"
            ),
        }
    }
}

/// One invariant violation of one rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Index of the rule in the catalog.
    pub rule_index: usize,
    /// Name of the label the rule assigns.
    pub label: String,
    /// What is wrong.
    pub kind: WarningKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule #{} ({}): {}", self.rule_index, self.label, self.kind)
    }
}

/// Checks every rule in the catalog and returns all violations found.
pub fn validate(catalog: &RuleCatalog) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (rule_index, rule) in catalog.rules().iter().enumerate() {
        let label = catalog.label_name(rule.label);
        for kind in check_rule(catalog, rule) {
            diagnostics.push(Diagnostic {
                rule_index,
                label: label.to_string(),
                kind,
            });
        }
    }
    diagnostics
}

/// Emits one warning log line per diagnostic.
pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        tracing::warn!(rule = d.rule_index, label = %d.label, "rule config error: {}", d.kind);
    }
}

fn check_rule(catalog: &RuleCatalog, rule: &ClassificationRule) -> Vec<WarningKind> {
    let mut found = Vec::new();

    let mut seen = HashSet::new();
    for &source in &rule.source_labels {
        if !seen.insert(source) {
            found.push(WarningKind::DuplicateSourceLabel(
                catalog.label_name(source).to_string(),
            ));
        }
    }

    if !rule.allow_on_land && !rule.allow_on_water {
        found.push(WarningKind::NeverSpawns);
    }

    let ranges = [
        (RangeField::Temperature, rule.temperature.is_inverted()),
        (RangeField::NorthLatitude, rule.latitude.north_range().is_inverted()),
        (
            RangeField::SouthLatitude,
            rule.latitude.min_south > rule.latitude.max_south,
        ),
        (RangeField::Ruggedness, rule.ruggedness.min > rule.ruggedness.max),
        (RangeField::Elevation, rule.elevation.is_inverted()),
        (RangeField::Rainfall, rule.rainfall.is_inverted()),
    ];
    found.extend(
        ranges
            .into_iter()
            .filter(|&(_, inverted)| inverted)
            .map(|(field, _)| WarningKind::InvertedRange(field)),
    );

    if !(0..=MAX_FREQUENCY).contains(&rule.frequency) {
        found.push(WarningKind::FrequencyOutOfRange(rule.frequency));
    }

    if !rule.noise.enabled {
        if rule.noise.per_cell_seed {
            found.push(WarningKind::PerCellSeedWithoutNoise);
        }
        if rule.noise.fixed_seed.is_some() {
            found.push(WarningKind::FixedSeedWithoutNoise);
        }
    }

    if rule.tier == 0 {
        found.push(WarningKind::NonPositiveTier(rule.tier));
    }

    if rule.legacy_spawn_ruggedness {
        found.push(WarningKind::DeprecatedSpawnRuggedness);
    }

    if let Some(overlay) = &rule.overlay
        && overlay.material_layer >= OVERLAY_SELECTION_LAYER
    {
        found.push(WarningKind::OverlayLayerAboveSelection(overlay.material_layer));
    }

    found
}
