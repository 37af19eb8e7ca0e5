use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, piece::ColorId, shape::Shape};

/// A single board cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ColorId),
}

impl Cell {
    /// Color of a filled cell.
    #[must_use]
    pub const fn color(self) -> Option<ColorId> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

// Encoded as `0` for an empty cell and the color token for a filled one.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let token = match self {
            Cell::Empty => 0,
            Cell::Filled(color) => color.token(),
        };
        serializer.serialize_u8(token)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = u8::deserialize(deserializer)?;
        if token == 0 {
            return Ok(Cell::Empty);
        }
        ColorId::from_token(token)
            .map(Cell::Filled)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid cell token: {token}")))
    }
}

/// Rows and columns removed by one [`Board::clear_lines`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineClear {
    pub rows: usize,
    pub cols: usize,
}

impl LineClear {
    #[must_use]
    pub const fn total(self) -> usize {
        self.rows + self.cols
    }
}

/// The fixed 10×10 playing field.
///
/// Coordinates are `(row, col)` with `(0, 0)` at the top-left. A shape placed
/// at `(row, col)` has its bounding box's top-left cell there.
///
/// # Example
///
/// ```
/// use blockfit_engine::{Board, ColorId, Shape};
///
/// let mut board = Board::new();
/// let bar = Shape::from_grid(&[[1u8, 1, 1, 1]]).unwrap();
/// let color = ColorId::new(0).unwrap();
///
/// assert!(board.can_place(&bar, 0, 0));
/// assert_eq!(board.place(&bar, 0, 0, color), 4);
/// assert!(!board.can_place(&bar, 0, 0));
/// assert!(!board.can_place(&bar, 0, 7));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;

    /// Creates an all-empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_filled()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Checks whether `shape` fits with its top-left corner at `(row, col)`.
    ///
    /// Every occupied cell of the shape must land on an empty in-bounds cell.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, row: usize, col: usize) -> bool {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return false;
        }
        shape.occupied_cells().all(|(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            r < BOARD_SIZE && c < BOARD_SIZE && self.cells[r][c].is_empty()
        })
    }

    /// Fills the cells covered by `shape` at `(row, col)` and returns how many were filled.
    ///
    /// The caller must have checked [`Self::can_place`] for the same position.
    pub fn place(&mut self, shape: &Shape, row: usize, col: usize, color: ColorId) -> usize {
        debug_assert!(self.can_place(shape, row, col));
        let mut placed = 0;
        for (dr, dc) in shape.occupied_cells() {
            self.cells[row + dr][col + dc] = Cell::Filled(color);
            placed += 1;
        }
        placed
    }

    /// Top-left positions where `shape` keeps its bounding box on the board, row-major.
    pub fn candidate_positions(shape: &Shape) -> impl Iterator<Item = (usize, usize)> + use<> {
        let max_row = BOARD_SIZE.saturating_sub(shape.rows());
        let max_col = BOARD_SIZE.saturating_sub(shape.cols());
        (0..=max_row).flat_map(move |r| (0..=max_col).map(move |c| (r, c)))
    }

    /// Returns the first position (row-major) where `shape` fits.
    #[must_use]
    pub fn first_fit(&self, shape: &Shape) -> Option<(usize, usize)> {
        Self::candidate_positions(shape).find(|&(r, c)| self.can_place(shape, r, c))
    }

    /// Checks whether `shape` fits anywhere on the board.
    #[must_use]
    pub fn has_fit(&self, shape: &Shape) -> bool {
        self.first_fit(shape).is_some()
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    fn is_col_full(&self, col: usize) -> bool {
        self.cells.iter().all(|row| row[col].is_filled())
    }

    /// Clears every full row and every full column.
    ///
    /// Full lines are determined on the board as it is before clearing, so a
    /// cell at the crossing of a full row and a full column counts for both.
    pub fn clear_lines(&mut self) -> LineClear {
        let full_rows: Vec<usize> = (0..BOARD_SIZE).filter(|&r| self.is_row_full(r)).collect();
        let full_cols: Vec<usize> = (0..BOARD_SIZE).filter(|&c| self.is_col_full(c)).collect();

        for &r in &full_rows {
            self.cells[r] = [Cell::Empty; BOARD_SIZE];
        }
        for &c in &full_cols {
            for row in &mut self.cells {
                row[c] = Cell::Empty;
            }
        }

        LineClear {
            rows: full_rows.len(),
            cols: full_cols.len(),
        }
    }

    /// Checks whether no cell is filled.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_empty())
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_filled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(index: u8) -> ColorId {
        ColorId::new(index).unwrap()
    }

    fn shape(grid: &[&[u8]]) -> Shape {
        Shape::from_grid(grid).unwrap()
    }

    fn fill_row(board: &mut Board, row: usize) {
        for c in 0..BOARD_SIZE {
            board.cells[row][c] = Cell::Filled(color(0));
        }
    }

    fn fill_col(board: &mut Board, col: usize) {
        for r in 0..BOARD_SIZE {
            board.cells[r][col] = Cell::Filled(color(1));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_clear());
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.rows().count(), BOARD_SIZE);
    }

    #[test]
    fn test_can_place_bounds() {
        let board = Board::new();
        let bar = shape(&[&[1, 1, 1, 1]]);
        assert!(board.can_place(&bar, 0, 6));
        assert!(!board.can_place(&bar, 0, 7));
        assert!(board.can_place(&bar, 9, 0));
        assert!(!board.can_place(&bar, 10, 0));
    }

    #[test]
    fn test_can_place_far_outside_board() {
        let board = Board::new();
        let s = shape(&[&[0, 1, 1], &[1, 1, 0]]);
        assert!(!board.can_place(&s, 0, usize::MAX));
        assert!(!board.can_place(&s, usize::MAX, 0));
        assert!(!board.can_place(&s, usize::MAX, usize::MAX));
    }

    #[test]
    fn test_can_place_ignores_unoccupied_shape_cells() {
        let mut board = Board::new();
        board.cells[0][1] = Cell::Filled(color(0));
        // The L's empty top-right cell lands on the filled cell.
        let l = shape(&[&[1, 0], &[1, 0], &[1, 1]]);
        assert!(board.can_place(&l, 0, 0));
        board.cells[2][1] = Cell::Filled(color(0));
        assert!(!board.can_place(&l, 0, 0));
    }

    #[test]
    fn test_place_then_can_place_is_false() {
        let mut board = Board::new();
        let s = shape(&[&[0, 1, 1], &[1, 1, 0]]);
        for (r, c) in [(0, 0), (4, 4), (8, 7)] {
            assert!(board.can_place(&s, r, c));
            assert_eq!(board.place(&s, r, c, color(3)), 4);
            assert!(!board.can_place(&s, r, c));
        }
        assert_eq!(board.filled_count(), 12);
    }

    #[test]
    fn test_place_horizontal_bar_at_origin() {
        let mut board = Board::new();
        let bar = shape(&[&[1, 1, 1, 1]]);
        assert_eq!(board.place(&bar, 0, 0, color(2)), 4);
        let tokens: Vec<u8> = board.cells[0]
            .iter()
            .map(|cell| cell.color().map_or(0, |_| 1))
            .collect();
        assert_eq!(tokens, [1, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(board.cell(0, 3), Cell::Filled(color(2)));
    }

    #[test]
    fn test_first_fit_row_major() {
        let mut board = Board::new();
        let square = shape(&[&[1, 1], &[1, 1]]);
        assert_eq!(board.first_fit(&square), Some((0, 0)));
        board.cells[0][1] = Cell::Filled(color(0));
        assert_eq!(board.first_fit(&square), Some((0, 2)));

        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if (r + c) % 2 == 0 {
                    board.cells[r][c] = Cell::Filled(color(0));
                }
            }
        }
        assert_eq!(board.first_fit(&square), None);
        assert!(!board.has_fit(&square));
        assert!(board.has_fit(&shape(&[&[1]])));
    }

    #[test]
    fn test_clear_lines_without_full_lines_is_noop() {
        let mut board = Board::new();
        for c in 0..BOARD_SIZE - 1 {
            board.cells[3][c] = Cell::Filled(color(0));
        }
        let before = board.clone();
        assert_eq!(board.clear_lines(), LineClear::default());
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_single_row() {
        let mut board = Board::new();
        fill_row(&mut board, 5);
        board.cells[4][0] = Cell::Filled(color(2));
        let cleared = board.clear_lines();
        assert_eq!(cleared, LineClear { rows: 1, cols: 0 });
        // No gravity: rows above stay in place.
        assert!(board.is_occupied(4, 0));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_row_and_column_crossing() {
        let mut board = Board::new();
        fill_row(&mut board, 2);
        fill_col(&mut board, 7);
        assert_eq!(board.filled_count(), 19);
        let cleared = board.clear_lines();
        assert_eq!(cleared, LineClear { rows: 1, cols: 1 });
        assert_eq!(cleared.total(), 2);
        assert!(board.is_clear());
    }

    #[test]
    fn test_clear_full_board() {
        let mut board = Board::new();
        for r in 0..BOARD_SIZE {
            fill_row(&mut board, r);
        }
        let cleared = board.clear_lines();
        assert_eq!(
            cleared,
            LineClear {
                rows: BOARD_SIZE,
                cols: BOARD_SIZE
            }
        );
        assert!(board.is_clear());
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::new();
        board.place(&shape(&[&[1, 1]]), 0, 0, color(0));
        board.place(&shape(&[&[1]]), 9, 9, color(5));
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with("[[1,1,0,0,0,0,0,0,0,0],"));
        assert!(json.ends_with("[0,0,0,0,0,0,0,0,0,6]]"));

        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_cell_deserialization_rejects_unknown_token() {
        assert_eq!(serde_json::from_str::<Cell>("0").unwrap(), Cell::Empty);
        assert_eq!(
            serde_json::from_str::<Cell>("3").unwrap(),
            Cell::Filled(color(2))
        );
        assert!(serde_json::from_str::<Cell>("7").is_err());
    }
}
