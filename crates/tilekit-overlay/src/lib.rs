//! Overlay planning for classified grids.
//!
//! Decides which sprites a renderer should draw over each cell (label-specific
//! hills, forests, a per-label material) and with which atlas variant. The
//! output is plain data; drawing it is up to the host.

mod paths;
mod plan;

pub use paths::{DEFAULT_MATERIAL_ROOT, forest_path, hill_path};
pub use plan::{
    ATLAS_SIZE, AtlasCell, OverlayPlan, OverlaySprite, SpriteKind, plan_overlays, plan_overlays_in,
};
