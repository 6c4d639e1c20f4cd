//! Classification rule: the match criteria and mutations for one label.

use serde::{Deserialize, Serialize};
use tilekit_grid::{LabelId, Ruggedness};

/// Sentinel for a latitude bound the rule author left unset.
///
/// Lies outside any real latitude, so an unset window never matches on its own.
pub const LATITUDE_UNSET: f32 = -9999.0;

/// Closed interval `[min, max]` over an `f32` attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    /// Inclusive lower bound.
    pub min: f32,
    /// Inclusive upper bound.
    pub max: f32,
}

impl ValueRange {
    /// Creates a range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `value` lies within the range, bounds included.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns `true` if `min > max`, which makes the range empty.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Closed interval over [`Ruggedness`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuggednessRange {
    /// Inclusive lower bound.
    pub min: Ruggedness,
    /// Inclusive upper bound.
    pub max: Ruggedness,
}

impl RuggednessRange {
    /// Returns `true` if `value` lies within the range, bounds included.
    pub fn contains(&self, value: Ruggedness) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for RuggednessRange {
    fn default() -> Self {
        Self {
            min: Ruggedness::Flat,
            max: Ruggedness::Impassable,
        }
    }
}

/// The north and south latitude windows of a rule.
///
/// South bounds are magnitudes: `min_south = 10, max_south = 20` describes
/// latitudes `[-20, -10]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatitudeWindows {
    /// Lower bound of the north window, in degrees.
    pub min_north: f32,
    /// Upper bound of the north window, in degrees.
    pub max_north: f32,
    /// Magnitude of the south window's bound nearest the equator.
    pub min_south: f32,
    /// Magnitude of the south window's bound nearest the pole.
    pub max_south: f32,
}

impl LatitudeWindows {
    /// Windows with every bound unset.
    pub const UNSET: Self = Self {
        min_north: LATITUDE_UNSET,
        max_north: LATITUDE_UNSET,
        min_south: LATITUDE_UNSET,
        max_south: LATITUDE_UNSET,
    };

    /// North window only.
    pub const fn north(min: f32, max: f32) -> Self {
        Self {
            min_north: min,
            max_north: max,
            ..Self::UNSET
        }
    }

    /// South window only, given as magnitudes.
    pub const fn south(min: f32, max: f32) -> Self {
        Self {
            min_south: min,
            max_south: max,
            ..Self::UNSET
        }
    }

    /// Returns `true` if all four bounds hold the unset sentinel.
    pub fn is_unset(&self) -> bool {
        self.min_north == LATITUDE_UNSET
            && self.max_north == LATITUDE_UNSET
            && self.min_south == LATITUDE_UNSET
            && self.max_south == LATITUDE_UNSET
    }

    /// The north window as a signed latitude range.
    pub fn north_range(&self) -> ValueRange {
        ValueRange::new(self.min_north, self.max_north)
    }

    /// The south window as a signed latitude range (bounds negated).
    pub fn south_range(&self) -> ValueRange {
        ValueRange::new(-self.max_south, -self.min_south)
    }
}

impl Default for LatitudeWindows {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Fractal noise parameters for a rule's noise predicate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Number of octaves.
    pub octaves: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            frequency: 0.1,
            lacunarity: 10.0,
            persistence: 0.6,
            octaves: 12,
        }
    }
}

/// Which side of the culling threshold a noise predicate rejects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullDirection {
    /// Reject samples strictly above the threshold.
    #[default]
    RejectAbove,
    /// Reject samples strictly below the threshold.
    RejectBelow,
}

impl CullDirection {
    /// Returns `true` if `sample` lies on the accepted side of `threshold`.
    pub fn accepts(self, sample: f64, threshold: f64) -> bool {
        match self {
            CullDirection::RejectAbove => sample <= threshold,
            CullDirection::RejectBelow => sample >= threshold,
        }
    }
}

/// The noise predicate of a rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSettings {
    /// Whether the predicate runs at all.
    pub enabled: bool,
    /// Field parameters.
    pub params: NoiseParams,
    /// Seed that overrides both the world seed and per-cell seeding.
    pub fixed_seed: Option<u32>,
    /// Seed the field with the cell index instead of the world seed.
    pub per_cell_seed: bool,
    /// Culling threshold.
    pub culling: f64,
    /// Side of `culling` that is rejected.
    pub cull_direction: CullDirection,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            params: NoiseParams::default(),
            fixed_seed: None,
            per_cell_seed: false,
            culling: 0.99,
            cull_direction: CullDirection::RejectAbove,
        }
    }
}

/// How a matching rule rewrites the cell's ruggedness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuggednessDirective {
    /// Set a specific class.
    Fixed(Ruggedness),
    /// Pick uniformly among [`Ruggedness::MOVABLE`].
    Random,
}

/// Overlay sprites drawn on cells carrying the rule's label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Material drawn on every cell of the label.
    pub material_path: Option<String>,
    /// Render layer of the label's materials.
    pub material_layer: i32,
    /// Sprite size relative to the average tile size.
    pub material_size_multiplier: f32,
    /// Rotate sprites randomly around the surface normal.
    pub material_random_rotation: bool,
    /// Draw forest sprites on flat cells.
    pub forested: bool,
    /// Forest uses the snowy variant below this temperature.
    pub forest_snowy_below: f32,
    /// Forest uses the sparse variant below this rainfall.
    pub forest_sparse_below: f32,
    /// Forest uses the dense variant above this rainfall.
    pub forest_dense_above: f32,
    /// Draw label-specific hill sprites instead of the host's default hills.
    pub unique_hills: bool,
    /// Hills of any class use the extra-snowy variant below this temperature.
    pub hill_extra_snowy_below: f32,
    /// Mountains use the snowy variant below this temperature.
    pub hill_snowy_below: f32,
    /// Mountains use the semi-snowy variant below this temperature.
    pub hill_semi_snowy_below: f32,
    /// Size multiplier for small hills.
    pub small_hill_size_multiplier: f32,
    /// Size multiplier for large hills.
    pub large_hill_size_multiplier: f32,
    /// Size multiplier for mountains.
    pub mountain_size_multiplier: f32,
    /// Size multiplier for impassable mountains.
    pub impassable_size_multiplier: f32,
}

impl OverlaySettings {
    /// Sprite size multiplier for hills of the given class.
    pub fn hill_size_multiplier(&self, ruggedness: Ruggedness) -> f32 {
        match ruggedness {
            Ruggedness::Flat => self.material_size_multiplier,
            Ruggedness::SmallHills => self.small_hill_size_multiplier,
            Ruggedness::LargeHills => self.large_hill_size_multiplier,
            Ruggedness::Mountainous => self.mountain_size_multiplier,
            Ruggedness::Impassable => self.impassable_size_multiplier,
        }
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            material_path: None,
            material_layer: 3515,
            material_size_multiplier: 1.0,
            material_random_rotation: true,
            forested: false,
            forest_snowy_below: -9999.0,
            forest_sparse_below: -9999.0,
            forest_dense_above: 9999.0,
            unique_hills: false,
            hill_extra_snowy_below: -9999.0,
            hill_snowy_below: -9999.0,
            hill_semi_snowy_below: -9999.0,
            small_hill_size_multiplier: 1.5,
            large_hill_size_multiplier: 2.0,
            mountain_size_multiplier: 1.4,
            impassable_size_multiplier: 1.3,
        }
    }
}

/// Match criteria and mutations for one assignable label.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationRule {
    /// Label assigned on match.
    pub label: LabelId,
    /// Labels this rule may overwrite. Empty means any.
    pub source_labels: Vec<LabelId>,
    /// Accepted temperature.
    pub temperature: ValueRange,
    /// Accepted elevation.
    pub elevation: ValueRange,
    /// Accepted rainfall.
    pub rainfall: ValueRange,
    /// Accepted ruggedness.
    pub ruggedness: RuggednessRange,
    /// Latitude windows.
    pub latitude: LatitudeWindows,
    /// Match water-covered cells.
    pub allow_on_water: bool,
    /// Match land cells.
    pub allow_on_land: bool,
    /// Only match cells with a river.
    pub requires_river: bool,
    /// Minimum number of neighbors carrying the water label.
    pub min_water_neighbors: u32,
    /// Minimum number of neighbors not carrying the water label.
    pub min_land_neighbors: u32,
    /// Noise predicate.
    pub noise: NoiseSettings,
    /// Coarse probability in `[0, 100]`; per-cell acceptance is `(frequency / 100)²`.
    pub frequency: i32,
    /// Priority tier. Lower tiers run first.
    pub tier: u32,
    /// Ruggedness rewrite on match.
    pub set_ruggedness: Option<RuggednessDirective>,
    /// Elevation rewrite on match.
    pub set_elevation: Option<f32>,
    /// Overlay sprites for cells carrying this label.
    pub overlay: Option<OverlaySettings>,
    /// `set_ruggedness` came from the deprecated `spawn_ruggedness` field.
    pub legacy_spawn_ruggedness: bool,
}

impl ClassificationRule {
    /// Default tier for rules that do not name one.
    pub const DEFAULT_TIER: u32 = 1;

    /// A rule for `label` with every criterion at its permissive default:
    /// land only, any latitude, frequency 100, tier 1, no noise.
    pub fn new(label: LabelId) -> Self {
        Self {
            label,
            source_labels: Vec::new(),
            temperature: ValueRange::new(-999.0, 999.0),
            elevation: ValueRange::new(-9999.0, 9999.0),
            rainfall: ValueRange::new(-9999.0, 9999.0),
            ruggedness: RuggednessRange::default(),
            latitude: LatitudeWindows::UNSET,
            allow_on_water: false,
            allow_on_land: true,
            requires_river: false,
            min_water_neighbors: 0,
            min_land_neighbors: 0,
            noise: NoiseSettings::default(),
            frequency: 100,
            tier: Self::DEFAULT_TIER,
            set_ruggedness: None,
            set_elevation: None,
            overlay: None,
            legacy_spawn_ruggedness: false,
        }
    }

    /// The tier this rule is scheduled in. Tier 0 runs with tier 1.
    pub fn effective_tier(&self) -> u32 {
        self.tier.max(Self::DEFAULT_TIER)
    }

    /// Per-cell acceptance probability of the stochastic step.
    ///
    /// Frequency is clamped to `[0, 100]` and squared, so low frequencies
    /// become rare rather than merely less common.
    pub fn acceptance_probability(&self) -> f64 {
        let f = f64::from(self.frequency.clamp(0, 100)) / 100.0;
        f * f
    }

    /// Returns `true` if the rule restricts which labels it may overwrite.
    pub fn restricts_source(&self) -> bool {
        !self.source_labels.is_empty()
    }
}
