//! The classification pass: tiers, rules, cells.

use hashbrown::HashMap;
use tilekit_grid::{CellIndex, LabelId, Ruggedness, TileGrid};
use tilekit_rules::{RuleCatalog, Tier, group_by_tier};

use crate::evaluate::{EvalContext, Mutation, RejectReason, Verdict, evaluate_cell};
use crate::{ClassifyError, NoiseField};

/// What one rule did during a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleOutcome {
    /// Catalog index of the rule.
    pub rule_index: usize,
    /// Label the rule assigns.
    pub label: LabelId,
    /// Tier the rule ran in.
    pub tier: u32,
    /// Cells the rule matched.
    pub matched: usize,
    /// Rejected cells, keyed by the first predicate they failed.
    pub rejections: HashMap<RejectReason, usize>,
}

/// Result of one classification pass.
///
/// Owns the side tables the pass fills in: the value a cell's ruggedness or
/// elevation held before the pass first overwrote it.
#[derive(Clone, Debug, Default)]
pub struct PassReport {
    /// Seed the pass ran with.
    pub world_seed: u64,
    /// One entry per rule, in execution order.
    pub outcomes: Vec<RuleOutcome>,
    /// Ruggedness of each rewritten cell before its first rewrite.
    pub ruggedness_backup: HashMap<CellIndex, Ruggedness>,
    /// Elevation of each rewritten cell before its first rewrite.
    pub elevation_backup: HashMap<CellIndex, f32>,
}

impl PassReport {
    /// Total matches over all rules. A cell matched by several rules counts
    /// once per rule.
    pub fn total_matches(&self) -> usize {
        self.outcomes.iter().map(|o| o.matched).sum()
    }

    /// Outcome of the rule at catalog index `rule_index`.
    pub fn outcome(&self, rule_index: usize) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule_index == rule_index)
    }

    /// Writes the backed-up ruggedness values back into `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Grid`] if a backed-up cell no longer exists.
    pub fn restore_ruggedness<G: TileGrid + ?Sized>(
        &self,
        grid: &mut G,
    ) -> Result<(), ClassifyError> {
        for (&cell, &ruggedness) in &self.ruggedness_backup {
            grid.set_ruggedness(cell, ruggedness)?;
        }
        Ok(())
    }

    /// Writes the backed-up elevation values back into `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Grid`] if a backed-up cell no longer exists.
    pub fn restore_elevation<G: TileGrid + ?Sized>(
        &self,
        grid: &mut G,
    ) -> Result<(), ClassifyError> {
        for (&cell, &elevation) in &self.elevation_backup {
            grid.set_elevation(cell, elevation)?;
        }
        Ok(())
    }
}

/// A catalog prepared for repeated passes.
///
/// The tier schedule is computed once; each [`run`](Self::run) is an
/// independent pass over the grid's current state.
#[derive(Clone, Debug)]
pub struct Classifier<'a> {
    catalog: &'a RuleCatalog,
    tiers: Vec<Tier>,
    world_seed: u64,
}

impl<'a> Classifier<'a> {
    /// Schedules `catalog` for passes seeded with `world_seed`.
    pub fn new(catalog: &'a RuleCatalog, world_seed: u64) -> Self {
        Self {
            catalog,
            tiers: group_by_tier(catalog),
            world_seed,
        }
    }

    /// The tier schedule, ascending.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Seed every pass runs with.
    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    /// Runs one pass over `grid`, mutating it in place.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ClassifyError`]. Cells already rewritten keep
    /// their new values.
    pub fn run<G, N>(&self, grid: &mut G, noise: &mut N) -> Result<PassReport, ClassifyError>
    where
        G: TileGrid + ?Sized,
        N: NoiseField + ?Sized,
    {
        let _span = tracing::info_span!("classification_pass", seed = self.world_seed).entered();

        let ctx = EvalContext {
            water_label: self.catalog.water_label(),
            world_seed: self.world_seed,
        };
        let cell_count = grid.cell_count();
        let mut report = PassReport {
            world_seed: self.world_seed,
            ..PassReport::default()
        };

        for tier in &self.tiers {
            for &rule_index in &tier.rules {
                let rule = &self.catalog.rules()[rule_index];
                let mut outcome = RuleOutcome {
                    rule_index,
                    label: rule.label,
                    tier: tier.tier,
                    matched: 0,
                    rejections: HashMap::new(),
                };

                for cell in 0..cell_count {
                    match evaluate_cell(&*grid, &mut *noise, rule, rule_index, cell, &ctx)? {
                        Verdict::Match(mutation) => {
                            apply(grid, cell, &mutation, &mut report)?;
                            outcome.matched += 1;
                        }
                        Verdict::Reject(reason) => {
                            *outcome.rejections.entry(reason).or_insert(0) += 1;
                        }
                    }
                }

                tracing::debug!(
                    rule = rule_index,
                    tier = tier.tier,
                    label = self.catalog.label_name(rule.label),
                    matched = outcome.matched,
                    "rule applied"
                );
                report.outcomes.push(outcome);
            }
        }

        tracing::info!(
            "Classified {} cells with {} rules in {} tiers ({} matches)",
            cell_count,
            report.outcomes.len(),
            self.tiers.len(),
            report.total_matches()
        );
        Ok(report)
    }
}

/// Runs one classification pass of `catalog` over `grid`.
///
/// Tiers run in ascending order, rules within a tier in declaration order,
/// cells in index order. Every evaluation sees the grid as left by all
/// evaluations before it.
///
/// # Errors
///
/// Returns the first [`ClassifyError`] raised by the grid or the noise field.
pub fn run_classification_pass<G, N>(
    catalog: &RuleCatalog,
    grid: &mut G,
    noise: &mut N,
    world_seed: u64,
) -> Result<PassReport, ClassifyError>
where
    G: TileGrid + ?Sized,
    N: NoiseField + ?Sized,
{
    Classifier::new(catalog, world_seed).run(grid, noise)
}

fn apply<G: TileGrid + ?Sized>(
    grid: &mut G,
    cell: CellIndex,
    mutation: &Mutation,
    report: &mut PassReport,
) -> Result<(), ClassifyError> {
    grid.set_label(cell, mutation.label)?;

    if mutation.ruggedness.is_some() || mutation.elevation.is_some() {
        let prior = grid.attributes(cell)?;
        if let Some(ruggedness) = mutation.ruggedness {
            report
                .ruggedness_backup
                .entry(cell)
                .or_insert(prior.ruggedness);
            grid.set_ruggedness(cell, ruggedness)?;
        }
        if let Some(elevation) = mutation.elevation {
            report.elevation_backup.entry(cell).or_insert(prior.elevation);
            grid.set_elevation(cell, elevation)?;
        }
    }
    Ok(())
}
