//! Equirectangular planet grid.
//!
//! Cells are laid out in `rows` latitude bands of `columns` cells each, row 0
//! at the north pole. Neighbors follow the four cardinal directions; longitude
//! wraps around, latitude does not cross the poles.

use glam::DVec3;

use crate::{CellAttributes, CellIndex, GridError, LabelId, VecGrid};

/// Cardinal directions on the latitude/longitude grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridDirection {
    /// Toward the north pole (row - 1).
    North,
    /// Toward the south pole (row + 1).
    South,
    /// Increasing longitude (column + 1, wrapping).
    East,
    /// Decreasing longitude (column - 1, wrapping).
    West,
}

impl GridDirection {
    /// All four cardinal directions, in neighbor-list order.
    pub const ALL: [GridDirection; 4] = [
        GridDirection::North,
        GridDirection::South,
        GridDirection::East,
        GridDirection::West,
    ];
}

/// Shape of an equirectangular planet grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLongGrid {
    /// Number of latitude bands.
    pub rows: usize,
    /// Number of cells per band.
    pub columns: usize,
    /// Planet radius used for cell positions.
    pub radius: f64,
}

impl LatLongGrid {
    /// Creates a grid shape with unit radius.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            radius: 1.0,
        }
    }

    /// Sets the planet radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Cell index of `(row, column)`.
    pub fn index(&self, row: usize, column: usize) -> CellIndex {
        row * self.columns + column
    }

    /// `(row, column)` of a cell index.
    pub fn row_col(&self, cell: CellIndex) -> (usize, usize) {
        (cell / self.columns, cell % self.columns)
    }

    /// Latitude of a row's center in degrees, positive north.
    pub fn row_latitude(&self, row: usize) -> f64 {
        90.0 - (row as f64 + 0.5) * 180.0 / self.rows as f64
    }

    /// Longitude of a column's center in degrees, in `(-180, 180)`.
    pub fn column_longitude(&self, column: usize) -> f64 {
        (column as f64 + 0.5) * 360.0 / self.columns as f64 - 180.0
    }

    /// Surface point at the center of `(row, column)`.
    pub fn cell_center(&self, row: usize, column: usize) -> DVec3 {
        let lat = self.row_latitude(row).to_radians();
        let lon = self.column_longitude(column).to_radians();
        DVec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin()) * self.radius
    }

    /// The neighbor of `cell` in direction `dir`, or `None` past a pole.
    pub fn neighbor(&self, cell: CellIndex, dir: GridDirection) -> Option<CellIndex> {
        let (row, col) = self.row_col(cell);
        match dir {
            GridDirection::North => row.checked_sub(1).map(|r| self.index(r, col)),
            GridDirection::South => (row + 1 < self.rows).then(|| self.index(row + 1, col)),
            GridDirection::East => Some(self.index(row, (col + 1) % self.columns)),
            GridDirection::West => {
                Some(self.index(row, (col + self.columns - 1) % self.columns))
            }
        }
    }

    /// Builds a [`VecGrid`] with every cell labeled `label` and cardinal
    /// adjacency filled in.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NotInitialized`] if the shape has no cells.
    pub fn build(&self, label: LabelId) -> Result<VecGrid, GridError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GridError::NotInitialized);
        }

        let mut cells = Vec::with_capacity(self.cell_count());
        for row in 0..self.rows {
            for col in 0..self.columns {
                cells.push(CellAttributes::new(self.cell_center(row, col), label));
            }
        }
        let mut grid = VecGrid::from_cells(cells);

        for cell in 0..self.cell_count() {
            let mut neighbors = Vec::with_capacity(4);
            for dir in GridDirection::ALL {
                if let Some(n) = self.neighbor(cell, dir)
                    && n != cell
                    && !neighbors.contains(&n)
                {
                    neighbors.push(n);
                }
            }
            grid.set_neighbors(cell, neighbors)?;
        }

        Ok(grid)
    }
}
