use serde::{Deserialize, Serialize};

use crate::core::{BOARD_SIZE, LineClear};

/// Points for each cleared row or column.
pub const LINE_CLEAR_POINTS: usize = BOARD_SIZE;

/// Bonus for leaving the board completely empty after a clear.
pub const FULL_CLEAR_BONUS: usize = BOARD_SIZE * BOARD_SIZE;

/// Points earned by one placement.
///
/// - 1 point per placed cell
/// - [`LINE_CLEAR_POINTS`] per cleared row and per cleared column
/// - [`FULL_CLEAR_BONUS`] when the board is empty afterwards
///
/// # Example
///
/// ```
/// use blockfit_engine::{LineClear, placement_points};
///
/// assert_eq!(placement_points(4, LineClear::default(), false), 4);
/// assert_eq!(placement_points(3, LineClear { rows: 1, cols: 1 }, false), 23);
/// ```
#[must_use]
pub const fn placement_points(cells_placed: usize, lines: LineClear, full_clear: bool) -> usize {
    let bonus = if full_clear { FULL_CLEAR_BONUS } else { 0 };
    cells_placed + lines.total() * LINE_CLEAR_POINTS + bonus
}

/// Score and counters of the current game.
///
/// The whole struct is part of an undo snapshot, so undoing a placement also
/// rolls back its counters.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    placed_pieces: usize,
    placed_cells: usize,
    cleared_rows: usize,
    cleared_cols: usize,
    full_clears: usize,
}

impl GameStats {
    /// Creates statistics with every counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            placed_pieces: 0,
            placed_cells: 0,
            cleared_rows: 0,
            cleared_cols: 0,
            full_clears: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn placed_cells(&self) -> usize {
        self.placed_cells
    }

    #[must_use]
    pub const fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    #[must_use]
    pub const fn cleared_cols(&self) -> usize {
        self.cleared_cols
    }

    /// Number of placements that left the board empty.
    #[must_use]
    pub const fn full_clears(&self) -> usize {
        self.full_clears
    }

    /// Records a committed placement and returns the points it earned.
    pub const fn record_placement(
        &mut self,
        cells_placed: usize,
        lines: LineClear,
        full_clear: bool,
    ) -> usize {
        let points = placement_points(cells_placed, lines, full_clear);
        self.score += points;
        self.placed_pieces += 1;
        self.placed_cells += cells_placed;
        self.cleared_rows += lines.rows;
        self.cleared_cols += lines.cols;
        if full_clear {
            self.full_clears += 1;
        }
        points
    }
}
