//! Planetary tile grid: cell attributes, the [`TileGrid`] store interface, and
//! an in-memory equirectangular grid used by tools and tests.

mod cell;
mod error;
mod grid;
mod lat_long;
mod vec_grid;

pub use cell::{CellAttributes, CellIndex, LabelId, Ruggedness};
pub use error::GridError;
pub use grid::TileGrid;
pub use lat_long::{GridDirection, LatLongGrid};
pub use vec_grid::VecGrid;
