//! One end-to-end run: synthesize, classify, plan overlays, summarize.

use tilekit_classifier::{FbmNoiseField, PassReport, run_classification_pass};
use tilekit_config::Config;
use tilekit_overlay::{OverlayPlan, plan_overlays};
use tilekit_rules::{RuleCatalog, log_diagnostics, validate};

use crate::DEFAULT_RULES;
use crate::error::AppError;
use crate::report::Summary;
use crate::world::{Planet, synthesize};

/// Results of [`classify_world`].
#[derive(Debug)]
pub struct RunOutput {
    pub planet: Planet,
    pub report: PassReport,
    pub plan: OverlayPlan,
    pub summary: Summary,
}

/// Loads the configured catalog, or the built-in one when no path is set.
///
/// # Errors
///
/// Returns [`AppError::Catalog`] if the catalog cannot be read or parsed.
pub fn load_catalog(config: &Config) -> Result<RuleCatalog, AppError> {
    let catalog = match &config.classifier.rules_path {
        Some(path) => RuleCatalog::load(path)?,
        None => {
            tracing::info!("Using built-in rule catalog");
            RuleCatalog::from_ron_str(DEFAULT_RULES)?
        }
    };
    Ok(catalog)
}

/// Runs the whole pipeline for `config` against `catalog`.
///
/// # Errors
///
/// Fails if the planet cannot be synthesized or the pass hits a grid error.
pub fn classify_world(config: &Config, catalog: &RuleCatalog) -> Result<RunOutput, AppError> {
    let diagnostics = validate(catalog);
    log_diagnostics(&diagnostics);

    let mut planet = synthesize(&config.world, catalog)?;
    let mut noise = FbmNoiseField::new();
    let report = run_classification_pass(catalog, &mut planet.grid, &mut noise, config.world.seed)?;
    let plan = plan_overlays(catalog, &planet.grid, config.world.seed)?;

    let summary = Summary::new(
        catalog,
        (planet.shape.rows, planet.shape.columns),
        &planet.grid,
        &report,
        &diagnostics,
        &plan,
    );
    Ok(RunOutput {
        planet,
        report,
        plan,
        summary,
    })
}
