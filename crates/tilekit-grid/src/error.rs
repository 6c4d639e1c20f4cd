//! Grid access errors.

use crate::CellIndex;

/// Errors raised by a [`TileGrid`](crate::TileGrid) implementation.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A cell index outside `0..cell_count` was requested.
    #[error("cell {index} out of range (grid has {count} cells)")]
    CellOutOfRange {
        /// The requested index.
        index: CellIndex,
        /// Number of cells in the grid.
        count: usize,
    },

    /// The grid has not been populated yet.
    #[error("tile grid is not initialized")]
    NotInitialized,
}
