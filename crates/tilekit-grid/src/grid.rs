//! The attribute store interface the classifier reads and writes.

use crate::{CellAttributes, CellIndex, GridError, LabelId, Ruggedness};

/// A grid of cells with per-cell attributes and an adjacency relation.
///
/// Hosts implement this over their own world representation. Cells are never
/// created or destroyed through this interface.
pub trait TileGrid {
    /// Number of cells. Valid indices are `0..cell_count()`.
    fn cell_count(&self) -> usize;

    /// Returns a copy of the cell's current attributes.
    fn attributes(&self, cell: CellIndex) -> Result<CellAttributes, GridError>;

    /// Returns the cell's current label.
    fn label(&self, cell: CellIndex) -> Result<LabelId, GridError> {
        Ok(self.attributes(cell)?.label)
    }

    /// Assigns a new label to the cell.
    fn set_label(&mut self, cell: CellIndex, label: LabelId) -> Result<(), GridError>;

    /// Overwrites the cell's ruggedness class.
    fn set_ruggedness(&mut self, cell: CellIndex, ruggedness: Ruggedness)
    -> Result<(), GridError>;

    /// Overwrites the cell's elevation.
    fn set_elevation(&mut self, cell: CellIndex, elevation: f32) -> Result<(), GridError>;

    /// Neighbors of the cell, in a stable order.
    fn neighbors(&self, cell: CellIndex) -> Result<&[CellIndex], GridError>;
}
