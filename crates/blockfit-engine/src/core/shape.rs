use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest row or column extent a shape may have.
pub const MAX_SHAPE_EXTENT: usize = 4;

/// Error returned when a grid cannot be turned into a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no occupied cell")]
    Empty,
    #[display("shape is {rows}x{cols}, at most 4x4 is supported")]
    TooLarge { rows: usize, cols: usize },
    #[display("shape rows have different lengths")]
    Ragged,
    #[display("shape cell must be 0 or 1, got {_0}")]
    InvalidCell(#[error(not(source))] u8),
}

/// Pure piece geometry: a small grid of occupied/unoccupied cells.
///
/// Cells are stored as a bitmask where bit `row * 4 + col` is set for an
/// occupied cell. Shapes built through the public API are always trimmed: no
/// edge row or column is entirely unoccupied.
///
/// # Example
///
/// ```
/// use blockfit_engine::Shape;
///
/// let l = Shape::from_grid(&[[1u8, 0], [1, 0], [1, 1]]).unwrap();
/// assert_eq!((l.rows(), l.cols()), (3, 2));
/// assert_eq!(l.cell_count(), 4);
/// assert_eq!(l.rotated_right().key(), "111|100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    mask: u16,
}

const fn bit(row: usize, col: usize) -> u16 {
    1 << (row * MAX_SHAPE_EXTENT + col)
}

impl Shape {
    /// Builds a trimmed shape from rows of `0`/`1` values.
    pub fn from_grid<R>(grid: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[u8]>,
    {
        let shape = Self::from_grid_untrimmed(grid)?;
        if shape.mask == 0 {
            return Err(ShapeError::Empty);
        }
        Ok(shape.trimmed())
    }

    #[expect(clippy::cast_possible_truncation)]
    fn from_grid_untrimmed<R>(grid: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[u8]>,
    {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |row| row.as_ref().len());
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if rows > MAX_SHAPE_EXTENT || cols > MAX_SHAPE_EXTENT {
            return Err(ShapeError::TooLarge { rows, cols });
        }

        let mut mask = 0;
        for (r, row) in grid.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged);
            }
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => mask |= bit(r, c),
                    _ => return Err(ShapeError::InvalidCell(value)),
                }
            }
        }

        Ok(Self {
            rows: rows as u8,
            cols: cols as u8,
            mask,
        })
    }

    /// Number of rows of the bounding box.
    #[must_use]
    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    /// Number of columns of the bounding box.
    #[must_use]
    pub fn cols(&self) -> usize {
        usize::from(self.cols)
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.mask & bit(row, col) != 0
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Returns an iterator of `(row, col)` offsets of the occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows())
            .flat_map(move |r| (0..self.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| self.is_occupied(r, c))
    }

    /// Rotates the shape 90° clockwise.
    ///
    /// Cell `(r, c)` moves to `(c, rows - 1 - r)`.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let rows = self.rows();
        let mut mask = 0;
        for (r, c) in self.occupied_cells() {
            mask |= bit(c, rows - 1 - r);
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            mask,
        }
    }

    /// Removes fully unoccupied edge rows and columns.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn trimmed(&self) -> Self {
        if self.mask == 0 {
            return *self;
        }
        let (mut top, mut bottom) = (usize::MAX, 0);
        let (mut left, mut right) = (usize::MAX, 0);
        for (r, c) in self.occupied_cells() {
            top = top.min(r);
            bottom = bottom.max(r);
            left = left.min(c);
            right = right.max(c);
        }

        let mut mask = 0;
        for (r, c) in self.occupied_cells() {
            mask |= bit(r - top, c - left);
        }
        Self {
            rows: (bottom - top + 1) as u8,
            cols: (right - left + 1) as u8,
            mask,
        }
    }

    #[must_use]
    pub fn is_trimmed(&self) -> bool {
        *self == self.trimmed()
    }

    /// Canonical string form: rows of `0`/`1` digits joined by `|`.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_grid()
            .iter()
            .map(|row| row.iter().map(|&v| if v == 1 { '1' } else { '0' }).collect())
            .collect::<Vec<String>>()
            .join("|")
    }

    /// Returns the shape as rows of `0`/`1` values.
    #[must_use]
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| {
                (0..self.cols())
                    .map(|c| u8::from(self.is_occupied(r, c)))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols() {
                f.write_str(if self.is_occupied(r, c) { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_grid().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let grid = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Shape::from_grid(&grid).map_err(serde::de::Error::custom)
    }
}
