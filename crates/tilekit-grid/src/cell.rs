//! Per-cell attribute types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Stable index of a cell within a grid.
pub type CellIndex = usize;

/// Identifier for a label (biome) assigned to a cell.
///
/// Ids are allocated by a label registry; the grid only stores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId(pub u16);

/// Ordered terrain roughness classification.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Ruggedness {
    /// No relief.
    #[default]
    Flat,
    /// Gentle rolling hills.
    SmallHills,
    /// Steep hills.
    LargeHills,
    /// Mountain ranges.
    Mountainous,
    /// Terrain nothing can cross.
    Impassable,
}

impl Ruggedness {
    /// Every class in ascending order.
    pub const ALL: [Ruggedness; 5] = [
        Ruggedness::Flat,
        Ruggedness::SmallHills,
        Ruggedness::LargeHills,
        Ruggedness::Mountainous,
        Ruggedness::Impassable,
    ];

    /// The classes a random ruggedness directive may pick from.
    pub const MOVABLE: [Ruggedness; 4] = [
        Ruggedness::Flat,
        Ruggedness::SmallHills,
        Ruggedness::LargeHills,
        Ruggedness::Mountainous,
    ];
}

/// Snapshot of one cell's attributes as seen by the classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct CellAttributes {
    /// Cell center on the planet surface. The planet's rotation axis is +Y.
    pub position: DVec3,
    /// Elevation in meters; negative below sea level.
    pub elevation: f32,
    /// Mean annual temperature in degrees Celsius.
    pub temperature: f32,
    /// Annual rainfall in millimeters.
    pub rainfall: f32,
    /// Terrain roughness.
    pub ruggedness: Ruggedness,
    /// Whether the cell is covered by sea or lake water.
    pub water_covered: bool,
    /// Whether a river runs through the cell.
    pub has_river: bool,
    /// Whether a road runs through the cell.
    pub has_road: bool,
    /// Currently assigned label.
    pub label: LabelId,
}

impl CellAttributes {
    /// Creates a flat, dry land cell at `position` carrying `label`.
    pub fn new(position: DVec3, label: LabelId) -> Self {
        Self {
            position,
            elevation: 0.0,
            temperature: 0.0,
            rainfall: 0.0,
            ruggedness: Ruggedness::Flat,
            water_covered: false,
            has_river: false,
            has_road: false,
            label,
        }
    }

    /// Latitude of the cell center in degrees, positive north.
    ///
    /// A cell at the planet's center has latitude 0.
    pub fn latitude(&self) -> f32 {
        let len = self.position.length();
        if len <= f64::EPSILON {
            return 0.0;
        }
        let sin_lat = (self.position.y / len).clamp(-1.0, 1.0);
        libm::asin(sin_lat).to_degrees() as f32
    }
}
