//! Demo planet synthesis.
//!
//! Builds an equirectangular grid and fills in the attributes rules read:
//! fBm elevation, temperature from latitude and altitude, noisy rainfall with
//! a subtropical dry belt, rivers on wet lowland, a few roads, and base labels
//! from a Whittaker diagram.

use glam::DVec3;
use noise::{NoiseFn, Simplex};
use tilekit_classifier::derive_noise_seed;
use tilekit_config::WorldConfig;
use tilekit_grid::{LabelId, LatLongGrid, Ruggedness, TileGrid, VecGrid};
use tilekit_rules::RuleCatalog;

use crate::error::AppError;

/// Degrees Celsius lost per meter of altitude.
const LAPSE_RATE: f32 = 0.0065;

/// Longitude spacing, in degrees, of the north-south trade roads.
const ROAD_SPACING_DEG: f64 = 45.0;

/// Multi-octave fBm over simplex noise, sampled on the unit sphere.
#[derive(Clone, Debug)]
pub struct FbmSampler {
    noise: Simplex,
    octaves: u32,
    base_frequency: f64,
    lacunarity: f64,
    persistence: f64,
    amplitude: f64,
}

impl FbmSampler {
    pub fn new(seed: u32, octaves: u32, base_frequency: f64, amplitude: f64) -> Self {
        Self {
            noise: Simplex::new(seed),
            octaves,
            base_frequency,
            lacunarity: 2.0,
            persistence: 0.5,
            amplitude,
        }
    }

    /// Sample at a point on the sphere, normalised to unit radius.
    pub fn sample(&self, point: DVec3) -> f64 {
        let p = point.normalize_or_zero();
        let mut total = 0.0;
        let mut frequency = self.base_frequency;
        let mut amplitude = self.amplitude;
        for _ in 0..self.octaves {
            total += self.noise.get((p * frequency).to_array()) * amplitude;
            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }
        total
    }

    /// Theoretical maximum absolute value (geometric series sum).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.amplitude;
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence;
        }
        sum
    }
}

/// A rectangle in normalised (temperature, moisture) space.
#[derive(Clone, Debug)]
struct WhittakerRegion {
    temp_min: f32,
    temp_max: f32,
    moisture_min: f32,
    moisture_max: f32,
    label: LabelId,
}

/// Maps normalised temperature and moisture to a base label; first match wins.
#[derive(Clone, Debug)]
pub struct WhittakerDiagram {
    regions: Vec<WhittakerRegion>,
    fallback: LabelId,
}

/// `(name, temp_min, temp_max, moisture_min, moisture_max)`, all in `[0, 1]`.
const DEFAULT_REGIONS: [(&str, f32, f32, f32, f32); 11] = [
    ("IceSheet", 0.0, 0.2, 0.0, 1.01),
    ("Tundra", 0.2, 0.4, 0.0, 1.01),
    ("Tundra", 0.4, 0.55, 0.0, 0.1),
    ("BorealForest", 0.4, 0.55, 0.1, 1.01),
    ("Desert", 0.55, 0.75, 0.0, 0.15),
    ("Grassland", 0.55, 0.75, 0.15, 0.35),
    ("TemperateForest", 0.55, 0.75, 0.35, 1.01),
    ("Desert", 0.75, 1.01, 0.0, 0.15),
    ("Savanna", 0.75, 1.01, 0.15, 0.4),
    ("TropicalRainforest", 0.75, 1.01, 0.4, 1.01),
    ("Grassland", 0.0, 1.01, 0.0, 1.01),
];

impl WhittakerDiagram {
    /// Builds the default diagram with labels resolved from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingBaseLabel`] if the catalog does not declare
    /// one of the diagram's labels.
    pub fn from_catalog(catalog: &RuleCatalog) -> Result<Self, AppError> {
        let resolve = |name: &str| {
            catalog
                .label(name)
                .ok_or_else(|| AppError::MissingBaseLabel(name.to_string()))
        };
        let mut regions = Vec::with_capacity(DEFAULT_REGIONS.len());
        for (name, temp_min, temp_max, moisture_min, moisture_max) in DEFAULT_REGIONS {
            regions.push(WhittakerRegion {
                temp_min,
                temp_max,
                moisture_min,
                moisture_max,
                label: resolve(name)?,
            });
        }
        Ok(Self {
            regions,
            fallback: resolve("Grassland")?,
        })
    }

    /// Looks up the label for normalised temperature and moisture.
    pub fn lookup(&self, temperature: f32, moisture: f32) -> LabelId {
        self.regions
            .iter()
            .find(|r| {
                temperature >= r.temp_min
                    && temperature < r.temp_max
                    && moisture >= r.moisture_min
                    && moisture < r.moisture_max
            })
            .map_or(self.fallback, |r| r.label)
    }
}

/// A synthesized planet: grid shape plus the attribute grid.
#[derive(Clone, Debug)]
pub struct Planet {
    pub shape: LatLongGrid,
    pub grid: VecGrid,
}

/// Synthesizes the demo planet described by `world`, labeled with `catalog`'s
/// water label and base labels.
///
/// # Errors
///
/// Fails if the grid has no cells or the catalog lacks a base label.
pub fn synthesize(world: &WorldConfig, catalog: &RuleCatalog) -> Result<Planet, AppError> {
    let diagram = WhittakerDiagram::from_catalog(catalog)?;
    let water = catalog.water_label();
    let shape = LatLongGrid::new(world.rows, world.columns).with_radius(world.radius);
    let mut grid = shape.build(water)?;

    let seed = derive_noise_seed(world.seed);
    let height = FbmSampler::new(seed, 6, 1.5, 3000.0);
    let moisture = FbmSampler::new(seed.wrapping_add(1), 3, 2.0, 1.0);
    let moisture_norm = moisture.max_amplitude().max(f64::EPSILON);

    for cell in 0..grid.cell_count() {
        let (row, column) = shape.row_col(cell);
        let latitude = shape.row_latitude(row) as f32;
        let longitude = shape.column_longitude(column);
        let Some(attrs) = grid.cell_mut(cell) else {
            continue;
        };

        attrs.elevation = height.sample(attrs.position) as f32;
        let above_sea = attrs.elevation - world.sea_level;
        attrs.water_covered = above_sea < 0.0;

        attrs.temperature = 28.0 - 0.75 * latitude.abs() - LAPSE_RATE * above_sea.max(0.0);
        let wetness = 0.5 + 0.5 * (moisture.sample(attrs.position) / moisture_norm) as f32;
        attrs.rainfall = (wetness * rain_belt(latitude) * 3000.0).max(0.0);

        if attrs.water_covered {
            attrs.label = water;
            continue;
        }

        attrs.ruggedness = ruggedness_for(above_sea);
        attrs.has_river = attrs.rainfall > 1500.0 && above_sea < 500.0;
        let column_width = 360.0 / world.columns as f64;
        attrs.has_road =
            latitude.abs() < 50.0 && (longitude + 180.0) % ROAD_SPACING_DEG < column_width;

        let t = ((attrs.temperature + 40.0) / 75.0).clamp(0.0, 1.0);
        let m = (attrs.rainfall / 3000.0).clamp(0.0, 1.0);
        attrs.label = diagram.lookup(t, m);
    }

    tracing::info!(
        "Synthesized {}x{} planet ({} cells)",
        world.rows,
        world.columns,
        grid.cell_count()
    );
    Ok(Planet { shape, grid })
}

/// Rainfall multiplier by latitude: wet tropics, a dry belt near 28 degrees,
/// drying toward the poles.
fn rain_belt(latitude: f32) -> f32 {
    let lat = latitude.abs();
    let dry = ((lat - 28.0) / 10.0).powi(2);
    1.0 - 0.6 * (-dry).exp() - 0.5 * (lat / 90.0).powi(2)
}

fn ruggedness_for(above_sea: f32) -> Ruggedness {
    match above_sea {
        h if h < 300.0 => Ruggedness::Flat,
        h if h < 800.0 => Ruggedness::SmallHills,
        h if h < 1500.0 => Ruggedness::LargeHills,
        h if h < 2500.0 => Ruggedness::Mountainous,
        _ => Ruggedness::Impassable,
    }
}
