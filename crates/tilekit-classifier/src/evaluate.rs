//! Per-cell predicate evaluation.
//!
//! A rule's predicate is a conjunction evaluated in a fixed, short-circuiting
//! order. Cheap attribute checks come first; the noise sample and the random
//! draw only run for cells that survive them.

use rand::Rng;
use tilekit_grid::{CellIndex, LabelId, Ruggedness, TileGrid};
use tilekit_rules::{ClassificationRule, RuggednessDirective};

use crate::seed::{cell_rng, resolve_noise_seed};
use crate::{ClassifyError, NoiseField};

/// Pass-wide inputs shared by every evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalContext {
    /// Label counted as water by the neighbor thresholds.
    pub water_label: LabelId,
    /// Seed of the whole pass.
    pub world_seed: u64,
}

/// Writes a matching rule makes to a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mutation {
    /// New label.
    pub label: LabelId,
    /// New ruggedness, if the rule sets one.
    pub ruggedness: Option<Ruggedness>,
    /// New elevation, if the rule sets one.
    pub elevation: Option<f32>,
}

/// The first predicate a cell failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    /// The cell's label is not one of the rule's source labels.
    SourceLabel,
    /// The cell lies outside both latitude windows.
    Latitude,
    /// The cell is water and the rule does not allow water.
    Water,
    /// The cell is land and the rule does not allow land.
    Land,
    /// The rule requires a river and the cell has none.
    River,
    /// Too few neighbors carry the water label.
    WaterNeighbors,
    /// Too few neighbors carry another label.
    LandNeighbors,
    /// The noise sample fell on the culled side of the threshold.
    Noise,
    /// The frequency draw failed.
    Chance,
    /// Elevation outside the rule's range.
    Elevation,
    /// Temperature outside the rule's range.
    Temperature,
    /// Rainfall outside the rule's range.
    Rainfall,
    /// Ruggedness outside the rule's range.
    Ruggedness,
}

/// Outcome of evaluating one rule against one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// Every predicate passed.
    Match(Mutation),
    /// The cell failed a predicate.
    Reject(RejectReason),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Match`].
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match(_))
    }
}

/// Evaluates `rule` (catalog index `rule_index`) against `cell`.
///
/// Reads the grid's current state and never writes to it. The random draw and
/// any random ruggedness come from the RNG for `(world_seed, rule_index, cell)`,
/// so the verdict depends only on the inputs.
///
/// # Errors
///
/// Returns [`ClassifyError`] if the grid rejects a read or the noise field
/// fails to sample.
pub fn evaluate_cell<G, N>(
    grid: &G,
    noise: &mut N,
    rule: &ClassificationRule,
    rule_index: usize,
    cell: CellIndex,
    ctx: &EvalContext,
) -> Result<Verdict, ClassifyError>
where
    G: TileGrid + ?Sized,
    N: NoiseField + ?Sized,
{
    let attrs = grid.attributes(cell)?;

    if rule.restricts_source() && !rule.source_labels.contains(&attrs.label) {
        return Ok(Verdict::Reject(RejectReason::SourceLabel));
    }

    let latitude = attrs.latitude();
    let in_window = rule.latitude.south_range().contains(latitude)
        || rule.latitude.north_range().contains(latitude);
    if !in_window && !rule.latitude.is_unset() {
        return Ok(Verdict::Reject(RejectReason::Latitude));
    }

    if attrs.water_covered && !rule.allow_on_water {
        return Ok(Verdict::Reject(RejectReason::Water));
    }
    if !attrs.water_covered && !rule.allow_on_land {
        return Ok(Verdict::Reject(RejectReason::Land));
    }

    if rule.requires_river && !attrs.has_river {
        return Ok(Verdict::Reject(RejectReason::River));
    }

    if rule.min_water_neighbors > 0 || rule.min_land_neighbors > 0 {
        let (water, land) = count_neighbors(grid, cell, ctx.water_label)?;
        if rule.min_water_neighbors > 0 && water < rule.min_water_neighbors {
            return Ok(Verdict::Reject(RejectReason::WaterNeighbors));
        }
        if rule.min_land_neighbors > 0 && land < rule.min_land_neighbors {
            return Ok(Verdict::Reject(RejectReason::LandNeighbors));
        }
    }

    if rule.noise.enabled {
        let seed = resolve_noise_seed(&rule.noise, ctx.world_seed, cell);
        let sample = noise.sample(seed, attrs.position, &rule.noise.params)?;
        if !rule.noise.cull_direction.accepts(sample, rule.noise.culling) {
            return Ok(Verdict::Reject(RejectReason::Noise));
        }
    }

    let mut rng = cell_rng(ctx.world_seed, rule_index, cell);
    let draw: f64 = rng.random();
    if draw > rule.acceptance_probability() {
        return Ok(Verdict::Reject(RejectReason::Chance));
    }

    if !rule.elevation.contains(attrs.elevation) {
        return Ok(Verdict::Reject(RejectReason::Elevation));
    }
    if !rule.temperature.contains(attrs.temperature) {
        return Ok(Verdict::Reject(RejectReason::Temperature));
    }
    if !rule.rainfall.contains(attrs.rainfall) {
        return Ok(Verdict::Reject(RejectReason::Rainfall));
    }
    if !rule.ruggedness.contains(attrs.ruggedness) {
        return Ok(Verdict::Reject(RejectReason::Ruggedness));
    }

    let ruggedness = rule.set_ruggedness.map(|directive| match directive {
        RuggednessDirective::Fixed(class) => class,
        RuggednessDirective::Random => {
            Ruggedness::MOVABLE[rng.random_range(0..Ruggedness::MOVABLE.len())]
        }
    });

    Ok(Verdict::Match(Mutation {
        label: rule.label,
        ruggedness,
        elevation: rule.set_elevation,
    }))
}

/// Counts `(water, land)` neighbors of `cell` in one scan.
fn count_neighbors<G: TileGrid + ?Sized>(
    grid: &G,
    cell: CellIndex,
    water_label: LabelId,
) -> Result<(u32, u32), ClassifyError> {
    let mut water = 0;
    let mut land = 0;
    for &neighbor in grid.neighbors(cell)? {
        if grid.label(neighbor)? == water_label {
            water += 1;
        } else {
            land += 1;
        }
    }
    Ok((water, land))
}
