//! End-to-end behavior of a classification pass over small grids.

use glam::DVec3;
use tilekit_classifier::{FbmNoiseField, PassReport, RejectReason, run_classification_pass};
use tilekit_grid::{CellAttributes, LabelId, LatLongGrid, Ruggedness, TileGrid, VecGrid};
use tilekit_rules::{
    ClassificationRule, LabelRegistry, LatitudeWindows, RuleCatalog, ValueRange, WarningKind,
    validate,
};

struct Labels {
    registry: LabelRegistry,
    ocean: LabelId,
    plains: LabelId,
    a: LabelId,
    b: LabelId,
}

fn labels() -> Labels {
    let mut registry = LabelRegistry::new();
    let ocean = registry.intern("Ocean").unwrap();
    let plains = registry.intern("Plains").unwrap();
    let a = registry.intern("A").unwrap();
    let b = registry.intern("B").unwrap();
    Labels {
        registry,
        ocean,
        plains,
        a,
        b,
    }
}

fn cell_at(lat: f64, label: LabelId) -> CellAttributes {
    let r = lat.to_radians();
    CellAttributes::new(DVec3::new(r.cos(), r.sin(), 0.0), label)
}

fn run(catalog: &RuleCatalog, grid: &mut VecGrid, seed: u64) -> PassReport {
    run_classification_pass(catalog, grid, &mut FbmNoiseField::new(), seed).unwrap()
}

/// A 48x96 planet with latitude-driven temperature and a wet band.
fn varied_planet(label: LabelId, ocean: LabelId) -> VecGrid {
    let shape = LatLongGrid::new(48, 96);
    let mut grid = shape.build(label).unwrap();
    for cell in 0..grid.cell_count() {
        let (row, col) = shape.row_col(cell);
        let lat = shape.row_latitude(row) as f32;
        let attrs = grid.cell_mut(cell).unwrap();
        attrs.temperature = 30.0 - lat.abs() * 0.6;
        attrs.rainfall = ((col * 37 + row * 11) % 3000) as f32;
        attrs.elevation = ((row * 53 + col * 29) % 4000) as f32 - 1000.0;
        if attrs.elevation < 0.0 {
            attrs.water_covered = true;
            attrs.label = ocean;
        }
    }
    grid
}

#[test]
fn test_pass_is_deterministic() {
    let l = labels();
    let mut noisy = ClassificationRule::new(l.a);
    noisy.frequency = 40;
    noisy.noise.enabled = true;
    noisy.noise.params.octaves = 3;
    noisy.noise.params.lacunarity = 2.0;
    noisy.noise.params.frequency = 2.0;
    noisy.noise.culling = 0.1;
    noisy.set_ruggedness = Some(tilekit_rules::RuggednessDirective::Random);
    let mut coastal = ClassificationRule::new(l.b);
    coastal.tier = 2;
    coastal.min_water_neighbors = 1;
    coastal.frequency = 70;
    coastal.set_elevation = Some(5.0);
    let catalog =
        RuleCatalog::from_rules(l.registry, "Ocean", vec![noisy, coastal]).unwrap();

    let mut first = varied_planet(l.plains, l.ocean);
    let mut second = first.clone();
    let report_a = run(&catalog, &mut first, 2024);
    let report_b = run(&catalog, &mut second, 2024);

    assert_eq!(first.cells(), second.cells());
    assert_eq!(report_a.outcomes, report_b.outcomes);
    assert_eq!(report_a.ruggedness_backup, report_b.ruggedness_backup);
    assert!(report_a.total_matches() > 0);

    let mut third = varied_planet(l.plains, l.ocean);
    run(&catalog, &mut third, 2025);
    assert_ne!(first.labels(), third.labels(), "seed should matter");
}

#[test]
fn test_later_tier_wins() {
    let l = labels();
    let r2 = ClassificationRule {
        tier: 2,
        ..ClassificationRule::new(l.b)
    };
    let r1 = ClassificationRule::new(l.a);
    // Declaration order is deliberately reversed.
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![r2, r1]).unwrap();

    let mut grid = VecGrid::from_cells(vec![cell_at(5.0, l.plains)]);
    let report = run(&catalog, &mut grid, 1);
    assert_eq!(grid.labels(), vec![l.b]);
    assert_eq!(report.outcome(0).unwrap().matched, 1);
    assert_eq!(report.outcome(1).unwrap().matched, 1);
}

#[test]
fn test_same_tier_runs_in_declaration_order() {
    let l = labels();
    let first = ClassificationRule::new(l.a);
    let second = ClassificationRule::new(l.b);
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![first, second]).unwrap();

    let mut grid = VecGrid::from_cells(vec![cell_at(5.0, l.plains)]);
    run(&catalog, &mut grid, 1);
    assert_eq!(grid.labels(), vec![l.b]);
}

#[test]
fn test_later_rules_see_earlier_writes() {
    let l = labels();
    let to_a = ClassificationRule::new(l.a);
    let a_to_b = ClassificationRule {
        tier: 2,
        source_labels: vec![l.a],
        ..ClassificationRule::new(l.b)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![a_to_b, to_a]).unwrap();

    let mut grid = VecGrid::from_cells(vec![cell_at(0.0, l.plains); 3]);
    run(&catalog, &mut grid, 4);
    assert_eq!(grid.labels(), vec![l.b; 3]);
}

fn flat_grid(n: usize, label: LabelId) -> VecGrid {
    VecGrid::from_cells(
        (0..n)
            .map(|i| {
                let lon = i as f64 * 0.001;
                CellAttributes::new(DVec3::new(lon.cos(), 0.0, lon.sin()), label)
            })
            .collect(),
    )
}

#[test]
fn test_frequency_hundred_always_matches() {
    let l = labels();
    let catalog =
        RuleCatalog::from_rules(l.registry, "Ocean", vec![ClassificationRule::new(l.a)]).unwrap();
    let mut grid = flat_grid(5000, l.plains);
    let report = run(&catalog, &mut grid, 99);
    assert_eq!(report.total_matches(), 5000);
}

#[test]
fn test_frequency_ten_is_one_percent() {
    let l = labels();
    let rule = ClassificationRule {
        frequency: 10,
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule]).unwrap();
    let mut grid = flat_grid(20_000, l.plains);
    let report = run(&catalog, &mut grid, 31337);

    // Expected 200; 10% acceptance would give ~2000.
    let matched = report.total_matches();
    assert!((120..=300).contains(&matched), "matched {matched}");
    assert_eq!(
        report.outcomes[0].rejections.get(&RejectReason::Chance),
        Some(&(20_000 - matched))
    );
}

#[test]
fn test_unset_latitude_matches_all_latitudes() {
    let l = labels();
    let catalog =
        RuleCatalog::from_rules(l.registry, "Ocean", vec![ClassificationRule::new(l.a)]).unwrap();
    let shape = LatLongGrid::new(18, 4);
    let mut grid = shape.build(l.plains).unwrap();
    run(&catalog, &mut grid, 0);
    assert!(grid.labels().iter().all(|&label| label == l.a));
}

#[test]
fn test_south_window_negation() {
    let l = labels();
    let rule = ClassificationRule {
        latitude: LatitudeWindows::south(10.0, 20.0),
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule]).unwrap();
    let lats = [-25.0, -21.0, -20.0, -15.0, -10.0, -9.0, -5.0, 10.0, 15.0, 20.0];
    let mut grid = VecGrid::from_cells(lats.iter().map(|&lat| cell_at(lat, l.plains)).collect());
    run(&catalog, &mut grid, 0);

    assert_eq!(matched_latitudes(&lats, &grid, l.a), vec![-20.0, -15.0, -10.0]);
}

fn matched_latitudes(lats: &[f64], grid: &VecGrid, label: LabelId) -> Vec<f64> {
    lats.iter()
        .zip(grid.labels())
        .filter(|&(_, l)| l == label)
        .map(|(&lat, _)| lat)
        .collect()
}

#[test]
fn test_north_window_bounds_inclusive() {
    let l = labels();
    let rule = ClassificationRule {
        latitude: LatitudeWindows::north(10.0, 20.0),
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule]).unwrap();
    let lats = [-15.0, -10.0, 9.0, 10.0, 15.0, 20.0, 21.0];
    let mut grid = VecGrid::from_cells(lats.iter().map(|&lat| cell_at(lat, l.plains)).collect());
    run(&catalog, &mut grid, 0);

    assert_eq!(matched_latitudes(&lats, &grid, l.a), vec![10.0, 15.0, 20.0]);
}

#[test]
fn test_window_edges_on_lat_long_rows() {
    let l = labels();
    // Row centers of a 9-row grid sit at 80, 60, .., -80.
    let rule = ClassificationRule {
        latitude: LatitudeWindows::south(20.0, 40.0),
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule]).unwrap();
    let shape = LatLongGrid::new(9, 4);
    let mut grid = shape.build(l.plains).unwrap();
    run(&catalog, &mut grid, 0);

    for row in 0..shape.rows {
        let expected = if matches!(row, 5 | 6) { l.a } else { l.plains };
        for col in 0..shape.columns {
            let cell = grid.cell(shape.index(row, col)).unwrap();
            assert_eq!(cell.label, expected, "row {row} col {col}");
        }
    }
}

#[test]
fn test_neighbor_counters_independent() {
    let l = labels();
    // Center with exactly 2 water neighbors and 2 land neighbors.
    let mut grid = VecGrid::new();
    let center = grid.push_cell(cell_at(0.0, l.plains));
    for label in [l.ocean, l.ocean, l.plains, l.plains] {
        let mut attrs = cell_at(0.0, label);
        attrs.water_covered = label == l.ocean;
        let n = grid.push_cell(attrs);
        grid.connect(center, n).unwrap();
    }

    let rule = ClassificationRule {
        min_water_neighbors: 2,
        min_land_neighbors: 3,
        source_labels: vec![l.plains],
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule.clone()]).unwrap();
    let mut failing = grid.clone();
    let report = run(&catalog, &mut failing, 0);
    assert_eq!(failing.cell(center).unwrap().label, l.plains);
    assert_eq!(
        report.outcomes[0].rejections.get(&RejectReason::LandNeighbors),
        Some(&1)
    );

    let passing_rule = ClassificationRule {
        min_land_neighbors: 2,
        ..rule
    };
    let mut registry = LabelRegistry::new();
    for name in ["Ocean", "Plains", "A", "B"] {
        registry.intern(name).unwrap();
    }
    let catalog = RuleCatalog::from_rules(registry, "Ocean", vec![passing_rule]).unwrap();
    run(&catalog, &mut grid, 0);
    assert_eq!(grid.cell(center).unwrap().label, l.a);
}

#[test]
fn test_elevation_bounds_inclusive() {
    let l = labels();
    let rule = ClassificationRule {
        elevation: ValueRange::new(100.0, 200.0),
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule]).unwrap();

    let mut grid = flat_grid(4, l.plains);
    for (cell, elevation) in [99.0, 100.0, 200.0, 201.0].into_iter().enumerate() {
        grid.set_elevation(cell, elevation).unwrap();
    }
    run(&catalog, &mut grid, 0);
    assert_eq!(grid.labels(), vec![l.plains, l.a, l.a, l.plains]);
}

#[test]
fn test_inverted_temperature_warns_and_still_runs() {
    let l = labels();
    let rule = ClassificationRule {
        temperature: ValueRange::new(30.0, 10.0),
        ..ClassificationRule::new(l.a)
    };
    let catalog = RuleCatalog::from_rules(l.registry, "Ocean", vec![rule]).unwrap();

    let diagnostics = validate(&catalog);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0].kind, WarningKind::InvertedRange(_)));

    let mut grid = flat_grid(10, l.plains);
    let report = run(&catalog, &mut grid, 0);
    assert_eq!(report.total_matches(), 0);
    assert_eq!(report.outcomes.len(), 1);
}

#[test]
fn test_marsh_end_to_end() {
    let catalog = RuleCatalog::from_ron_str(
        r#"(
            water_label: "Ocean",
            base_labels: ["Ocean", "Grassland"],
            rules: [
                (
                    label: "Marsh",
                    tier: Some(1),
                    allow_on_land: true,
                    allow_on_water: false,
                    min_rainfall: 2000.0,
                    frequency: 100,
                    use_noise: false,
                ),
            ],
        )"#,
    )
    .unwrap();
    let grassland = catalog.label("Grassland").unwrap();
    let marsh = catalog.label("Marsh").unwrap();

    let mut grid = flat_grid(4, grassland);
    for (cell, rainfall) in [1000.0, 2000.0, 3000.0, 2000.0].into_iter().enumerate() {
        grid.cell_mut(cell).unwrap().rainfall = rainfall;
    }
    run(&catalog, &mut grid, 0);

    assert_eq!(grid.labels(), vec![grassland, marsh, marsh, marsh]);
    assert_eq!(grid.cell(0).unwrap().rainfall, 1000.0);
    assert!(grid.cells().iter().all(|c| c.ruggedness == Ruggedness::Flat));
}
