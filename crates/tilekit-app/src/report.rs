//! Run summaries: a console histogram and an optional JSON file.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use tilekit_classifier::PassReport;
use tilekit_grid::VecGrid;
use tilekit_overlay::OverlayPlan;
use tilekit_rules::{Diagnostic, RuleCatalog};

use crate::error::AppError;

/// One rule's results, keyed by names rather than ids.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RuleSummary {
    pub index: usize,
    pub label: String,
    pub tier: u32,
    pub matched: usize,
    /// Rejection counts by the first predicate that failed.
    pub rejections: BTreeMap<String, usize>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct OverlayCounts {
    pub hills: usize,
    pub forests: usize,
    pub materials: usize,
    pub suppress_default_hills: bool,
}

/// Everything a run reports.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Summary {
    pub seed: u64,
    pub rows: usize,
    pub columns: usize,
    pub rules: Vec<RuleSummary>,
    /// Final cell count per declared label, zero for labels no cell carries.
    pub labels: BTreeMap<String, usize>,
    pub diagnostics: Vec<String>,
    pub overlays: OverlayCounts,
}

impl Summary {
    pub fn new(
        catalog: &RuleCatalog,
        shape: (usize, usize),
        grid: &VecGrid,
        report: &PassReport,
        diagnostics: &[Diagnostic],
        plan: &OverlayPlan,
    ) -> Self {
        let rules = report
            .outcomes
            .iter()
            .map(|outcome| RuleSummary {
                index: outcome.rule_index,
                label: catalog.label_name(outcome.label).to_string(),
                tier: outcome.tier,
                matched: outcome.matched,
                rejections: outcome
                    .rejections
                    .iter()
                    .map(|(reason, count)| (format!("{reason:?}"), *count))
                    .collect(),
            })
            .collect();

        let mut labels: BTreeMap<String, usize> = catalog
            .registry()
            .iter()
            .map(|(_, name)| (name.to_string(), 0))
            .collect();
        for cell in grid.cells() {
            *labels
                .entry(catalog.label_name(cell.label).to_string())
                .or_insert(0) += 1;
        }

        let (hills, forests, materials) = plan.counts();
        Self {
            seed: report.world_seed,
            rows: shape.0,
            columns: shape.1,
            rules,
            labels,
            diagnostics: diagnostics.iter().map(ToString::to_string).collect(),
            overlays: OverlayCounts {
                hills,
                forests,
                materials,
                suppress_default_hills: plan.suppress_default_hills,
            },
        }
    }

    /// Label histogram, largest first, with a bar per label.
    pub fn histogram(&self) -> String {
        let total: usize = self.labels.values().sum();
        let mut rows: Vec<_> = self.labels.iter().filter(|(_, count)| **count > 0).collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (name, count) in rows {
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            };
            let bar = "#".repeat((share * 50.0).round() as usize);
            let _ = writeln!(
                out,
                "{name:<width$} {count:>7} {:>5.1}% {bar}",
                share * 100.0
            );
        }
        let _ = writeln!(
            out,
            "overlays: {} hills, {} forests, {} materials",
            self.overlays.hills, self.overlays.forests, self.overlays.materials
        );
        out
    }

    /// Writes the summary as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Write`] if the file cannot be created, or
    /// [`AppError::Json`] if encoding fails.
    pub fn write_json(&self, path: &Path) -> Result<(), AppError> {
        let file = std::fs::File::create(path).map_err(|source| AppError::Write {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        tracing::info!("Wrote summary to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary {
            seed: 7,
            rows: 2,
            columns: 2,
            rules: vec![RuleSummary {
                index: 0,
                label: "Marsh".to_string(),
                tier: 1,
                matched: 1,
                rejections: BTreeMap::from([("River".to_string(), 3)]),
            }],
            labels: BTreeMap::from([
                ("Marsh".to_string(), 1),
                ("Ocean".to_string(), 3),
                ("Tundra".to_string(), 0),
            ]),
            diagnostics: Vec::new(),
            overlays: OverlayCounts {
                hills: 0,
                forests: 0,
                materials: 1,
                suppress_default_hills: false,
            },
        }
    }

    #[test]
    fn test_histogram_sorted_by_count() {
        let text = summary().histogram();
        let ocean = text.find("Ocean").unwrap();
        let marsh = text.find("Marsh").unwrap();
        assert!(ocean < marsh);
        assert!(text.contains("75.0%"));
        assert!(text.contains("1 materials"));
        assert!(!text.contains("Tundra"));
    }

    #[test]
    fn test_write_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("summary.json");
        summary().write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["rules"][0]["rejections"]["River"], 3);
        assert_eq!(value["labels"]["Ocean"], 3);
    }

    #[test]
    fn test_write_json_bad_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("summary.json");
        assert!(matches!(
            summary().write_json(&path),
            Err(AppError::Write { .. })
        ));
    }
}
