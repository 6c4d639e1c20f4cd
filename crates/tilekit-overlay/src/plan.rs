//! Sprite planning over a classified grid.

use glam::DVec3;
use hashbrown::HashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tilekit_grid::{CellIndex, GridError, LabelId, Ruggedness, TileGrid};
use tilekit_rules::{OverlaySettings, RuleCatalog};

use crate::paths::{DEFAULT_MATERIAL_ROOT, forest_path, hill_path};

/// Columns and rows of the texture atlas each material is split into.
pub const ATLAS_SIZE: (u8, u8) = (2, 2);

/// Which variant of a material's texture atlas a sprite shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AtlasCell {
    pub x: u8,
    pub y: u8,
}

/// What a sprite depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    /// Label-specific hills of the given class.
    Hill(Ruggedness),
    /// Forest canopy.
    Forest,
    /// The label's own material.
    Material,
}

/// One quad to draw tangent to the planet at a cell's center.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlaySprite {
    pub cell: CellIndex,
    pub kind: SpriteKind,
    /// Cell center on the planet surface.
    pub position: DVec3,
    /// Material path.
    pub path: String,
    /// Render layer.
    pub layer: i32,
    /// Quad size relative to the average tile size.
    pub size_multiplier: f32,
    /// Rotate the quad randomly around the surface normal.
    pub random_rotation: bool,
    pub atlas: AtlasCell,
}

/// Everything a renderer needs to draw label overlays.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OverlayPlan {
    /// Sprites in cell order.
    pub sprites: Vec<OverlaySprite>,
    /// Set when some label draws its own hills. The host should then skip its
    /// default hill layer for those cells.
    pub suppress_default_hills: bool,
}

impl OverlayPlan {
    /// Sprites drawn on `cell`.
    pub fn sprites_for(&self, cell: CellIndex) -> impl Iterator<Item = &OverlaySprite> {
        self.sprites.iter().filter(move |s| s.cell == cell)
    }

    /// Number of sprites of each kind, as `(hills, forests, materials)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.sprites
            .iter()
            .fold((0, 0, 0), |(h, f, m), s| match s.kind {
                SpriteKind::Hill(_) => (h + 1, f, m),
                SpriteKind::Forest => (h, f + 1, m),
                SpriteKind::Material => (h, f, m + 1),
            })
    }
}

/// Plans overlays with materials under [`DEFAULT_MATERIAL_ROOT`].
///
/// # Errors
///
/// Returns [`GridError`] if the grid rejects a read.
pub fn plan_overlays<G: TileGrid + ?Sized>(
    catalog: &RuleCatalog,
    grid: &G,
    world_seed: u64,
) -> Result<OverlayPlan, GridError> {
    plan_overlays_in(DEFAULT_MATERIAL_ROOT, catalog, grid, world_seed)
}

/// Plans overlays for every cell whose label has overlay settings.
///
/// A label's settings come from the first rule assigning it. Per cell, in
/// order: unique hills (hilly cells without river or road), forest (flat
/// cells without river or road), then the label material. Atlas variants are
/// drawn from one RNG seeded with `world_seed`, in sprite order.
///
/// # Errors
///
/// Returns [`GridError`] if the grid rejects a read.
pub fn plan_overlays_in<G: TileGrid + ?Sized>(
    root: &str,
    catalog: &RuleCatalog,
    grid: &G,
    world_seed: u64,
) -> Result<OverlayPlan, GridError> {
    let settings: HashMap<LabelId, &OverlaySettings> = catalog
        .rules()
        .iter()
        .filter_map(|rule| {
            let first = catalog.rule_for_label(rule.label)?;
            Some((rule.label, first.overlay.as_ref()?))
        })
        .collect();

    let mut plan = OverlayPlan {
        sprites: Vec::new(),
        suppress_default_hills: settings.values().any(|s| s.unique_hills),
    };
    if settings.is_empty() {
        return Ok(plan);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(world_seed);
    for cell in 0..grid.cell_count() {
        let attrs = grid.attributes(cell)?;
        let Some(overlay) = settings.get(&attrs.label).copied() else {
            continue;
        };
        let label = catalog.label_name(attrs.label);
        let clear = !attrs.has_river && !attrs.has_road;

        let mut push = |kind: SpriteKind, path: String, size_multiplier: f32| {
            let atlas = AtlasCell {
                x: rng.random_range(0..ATLAS_SIZE.0),
                y: rng.random_range(0..ATLAS_SIZE.1),
            };
            plan.sprites.push(OverlaySprite {
                cell,
                kind,
                position: attrs.position,
                path,
                layer: overlay.material_layer,
                size_multiplier,
                random_rotation: overlay.material_random_rotation,
                atlas,
            });
        };

        if overlay.unique_hills
            && clear
            && let Some(path) = hill_path(root, label, attrs.ruggedness, attrs.temperature, overlay)
        {
            push(
                SpriteKind::Hill(attrs.ruggedness),
                path,
                overlay.hill_size_multiplier(attrs.ruggedness),
            );
        }

        if overlay.forested && clear && attrs.ruggedness == Ruggedness::Flat {
            let path = forest_path(root, label, attrs.temperature, attrs.rainfall, overlay);
            push(SpriteKind::Forest, path, overlay.material_size_multiplier);
        }

        if let Some(path) = &overlay.material_path {
            push(
                SpriteKind::Material,
                path.clone(),
                overlay.material_size_multiplier,
            );
        }
    }

    let (hills, forests, materials) = plan.counts();
    tracing::debug!(hills, forests, materials, "planned overlays");
    Ok(plan)
}
