//! Vector-backed [`TileGrid`] implementation.

use crate::{CellAttributes, CellIndex, GridError, LabelId, Ruggedness, TileGrid};

/// An in-memory grid storing attributes and adjacency lists in parallel vectors.
#[derive(Clone, Debug, Default)]
pub struct VecGrid {
    cells: Vec<CellAttributes>,
    adjacency: Vec<Vec<CellIndex>>,
}

impl VecGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid of unconnected cells.
    pub fn from_cells(cells: Vec<CellAttributes>) -> Self {
        let adjacency = vec![Vec::new(); cells.len()];
        Self { cells, adjacency }
    }

    /// Appends a cell with no neighbors and returns its index.
    pub fn push_cell(&mut self, attributes: CellAttributes) -> CellIndex {
        self.cells.push(attributes);
        self.adjacency.push(Vec::new());
        self.cells.len() - 1
    }

    /// Connects `a` and `b` in both directions. Existing links are kept once.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellOutOfRange`] if either index is invalid.
    pub fn connect(&mut self, a: CellIndex, b: CellIndex) -> Result<(), GridError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Ok(());
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
        Ok(())
    }

    /// Replaces the neighbor list of `cell` without touching the reverse links.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellOutOfRange`] if `cell` or any neighbor is invalid.
    pub fn set_neighbors(
        &mut self,
        cell: CellIndex,
        neighbors: Vec<CellIndex>,
    ) -> Result<(), GridError> {
        self.check(cell)?;
        for &n in &neighbors {
            self.check(n)?;
        }
        self.adjacency[cell] = neighbors;
        Ok(())
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[CellAttributes] {
        &self.cells
    }

    /// Borrows a cell's attributes.
    pub fn cell(&self, cell: CellIndex) -> Option<&CellAttributes> {
        self.cells.get(cell)
    }

    /// Mutably borrows a cell's attributes.
    pub fn cell_mut(&mut self, cell: CellIndex) -> Option<&mut CellAttributes> {
        self.cells.get_mut(cell)
    }

    /// Labels of all cells in index order.
    pub fn labels(&self) -> Vec<LabelId> {
        self.cells.iter().map(|c| c.label).collect()
    }

    fn check(&self, cell: CellIndex) -> Result<(), GridError> {
        if cell < self.cells.len() {
            Ok(())
        } else {
            Err(GridError::CellOutOfRange {
                index: cell,
                count: self.cells.len(),
            })
        }
    }

    fn get_mut(&mut self, cell: CellIndex) -> Result<&mut CellAttributes, GridError> {
        let count = self.cells.len();
        self.cells
            .get_mut(cell)
            .ok_or(GridError::CellOutOfRange { index: cell, count })
    }
}

impl TileGrid for VecGrid {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn attributes(&self, cell: CellIndex) -> Result<CellAttributes, GridError> {
        self.cells
            .get(cell)
            .cloned()
            .ok_or(GridError::CellOutOfRange {
                index: cell,
                count: self.cells.len(),
            })
    }

    fn label(&self, cell: CellIndex) -> Result<LabelId, GridError> {
        self.cells
            .get(cell)
            .map(|c| c.label)
            .ok_or(GridError::CellOutOfRange {
                index: cell,
                count: self.cells.len(),
            })
    }

    fn set_label(&mut self, cell: CellIndex, label: LabelId) -> Result<(), GridError> {
        self.get_mut(cell)?.label = label;
        Ok(())
    }

    fn set_ruggedness(
        &mut self,
        cell: CellIndex,
        ruggedness: Ruggedness,
    ) -> Result<(), GridError> {
        self.get_mut(cell)?.ruggedness = ruggedness;
        Ok(())
    }

    fn set_elevation(&mut self, cell: CellIndex, elevation: f32) -> Result<(), GridError> {
        self.get_mut(cell)?.elevation = elevation;
        Ok(())
    }

    fn neighbors(&self, cell: CellIndex) -> Result<&[CellIndex], GridError> {
        self.adjacency
            .get(cell)
            .map(Vec::as_slice)
            .ok_or(GridError::CellOutOfRange {
                index: cell,
                count: self.cells.len(),
            })
    }
}
