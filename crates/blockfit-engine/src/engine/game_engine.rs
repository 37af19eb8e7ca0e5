use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    PlacementError, SelectError,
    core::{BOARD_SIZE, Board, LineClear, Piece, ShapeCatalog, Theme},
};

use super::{
    game_stats::GameStats,
    history::{GameSnapshot, History},
    preferences::Preferences,
    tray::{Tray, TraySeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Which tray piece, if any, the player is about to place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Selection {
    #[default]
    Idle,
    PieceSelected(usize),
}

/// A position where a tray piece fits, as top-left board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hint {
    pub tray_index: usize,
    pub row: usize,
    pub col: usize,
}

/// Outcome of one committed placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlacementReport {
    pub tray_index: usize,
    pub piece: Piece,
    /// Top-left row the piece was placed at.
    pub row: usize,
    /// Top-left column the piece was placed at.
    pub col: usize,
    pub cells_placed: usize,
    pub lines: LineClear,
    /// The board was empty after clearing.
    pub full_clear: bool,
    pub points: usize,
    /// The tray ran empty and was refilled.
    pub tray_refilled: bool,
    pub game_over: bool,
}

/// Top-left coordinate of a piece of `extent` cells centered on `anchor`,
/// pulled back so the bounding box stays on the board.
const fn resolve_anchor(anchor: usize, extent: usize) -> usize {
    let start = anchor.saturating_sub(extent / 2);
    let max = BOARD_SIZE - extent;
    if start < max { start } else { max }
}

/// A single game of blockfit together with its surrounding state.
///
/// The engine owns the board, the tray, the score, the undo history and the
/// player preferences. A presentation layer drives it with tray indices and
/// board cells and reads the state back through the getters.
///
/// # Example
///
/// ```
/// use blockfit_engine::{GameEngine, TraySeed};
///
/// let mut engine = GameEngine::with_seed(TraySeed::from_bytes([7; 16]));
/// let hint = engine.hint().unwrap();
/// let report = engine
///     .place_piece_at(hint.tray_index, hint.row, hint.col)
///     .unwrap();
///
/// assert_eq!(engine.score(), report.points);
/// assert!(engine.undo());
/// assert_eq!(engine.score(), 0);
/// ```
#[derive(Debug)]
pub struct GameEngine {
    catalog: &'static ShapeCatalog,
    board: Board,
    tray: Tray,
    stats: GameStats,
    history: History,
    selection: Selection,
    state: SessionState,
    high_score: usize,
    theme: Theme,
    preferences: Preferences,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Starts a game with a random seed and in-memory preferences.
    #[must_use]
    pub fn new() -> Self {
        Self::with_preferences(Preferences::in_memory(), rand::random())
    }

    #[must_use]
    pub fn with_seed(seed: TraySeed) -> Self {
        Self::with_preferences(Preferences::in_memory(), seed)
    }

    /// Starts a game, restoring the high score and theme from `preferences`.
    #[must_use]
    pub fn with_preferences(preferences: Preferences, seed: TraySeed) -> Self {
        let high_score = preferences.load_high_score();
        let theme = preferences.load_theme();
        let mut engine = Self {
            catalog: ShapeCatalog::standard(),
            board: Board::new(),
            tray: Tray::with_seed(seed),
            stats: GameStats::new(),
            history: History::new(),
            selection: Selection::Idle,
            state: SessionState::Playing,
            high_score,
            theme,
            preferences,
        };
        engine.new_game();
        engine
    }

    /// Resets the board, score and history and deals a fresh tray.
    ///
    /// The high score and theme carry over.
    pub fn new_game(&mut self) -> &Tray {
        self.board = Board::new();
        self.stats = GameStats::new();
        self.history.clear();
        self.selection = Selection::Idle;
        self.state = SessionState::Playing;
        self.tray.refill(self.catalog);
        info!("new game started, high score {}", self.high_score);
        &self.tray
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Number of placements that can currently be undone.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches the theme and persists it.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.preferences.save_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn select_piece(&mut self, tray_index: usize) -> Result<(), SelectError> {
        if self.is_game_over() {
            return Err(SelectError::GameOver);
        }
        if tray_index >= self.tray.len() {
            return Err(SelectError::NoSuchPiece(tray_index));
        }
        self.selection = Selection::PieceSelected(tray_index);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Commits the selected piece centered on the anchor cell.
    ///
    /// The selection is cleared whether or not the placement succeeds.
    pub fn place_selected(
        &mut self,
        anchor_row: usize,
        anchor_col: usize,
    ) -> Result<PlacementReport, PlacementError> {
        let selection = std::mem::take(&mut self.selection);
        let Selection::PieceSelected(tray_index) = selection else {
            return Err(PlacementError::NoSelection);
        };
        self.attempt_placement(tray_index, anchor_row, anchor_col)
    }

    /// Returns the top-left cell a piece would occupy when dropped on the
    /// anchor cell, if the placement is legal. Nothing is mutated.
    pub fn preview_placement(
        &self,
        tray_index: usize,
        anchor_row: usize,
        anchor_col: usize,
    ) -> Result<(usize, usize), PlacementError> {
        if self.is_game_over() {
            return Err(PlacementError::GameOver);
        }
        if anchor_row >= BOARD_SIZE || anchor_col >= BOARD_SIZE {
            return Err(PlacementError::AnchorOutOfBounds {
                row: anchor_row,
                col: anchor_col,
            });
        }
        let piece = self
            .tray
            .get(tray_index)
            .ok_or(PlacementError::NoSuchPiece(tray_index))?;
        let shape = piece.shape();
        let row = resolve_anchor(anchor_row, shape.rows());
        let col = resolve_anchor(anchor_col, shape.cols());
        if !self.board.can_place(shape, row, col) {
            return Err(PlacementError::Blocked { row, col });
        }
        Ok((row, col))
    }

    /// Places tray piece `tray_index` centered on the anchor cell.
    ///
    /// The piece's bounding box is centered on the anchor and then clamped to
    /// the board. On error nothing changes.
    pub fn attempt_placement(
        &mut self,
        tray_index: usize,
        anchor_row: usize,
        anchor_col: usize,
    ) -> Result<PlacementReport, PlacementError> {
        match self.preview_placement(tray_index, anchor_row, anchor_col) {
            Ok((row, col)) => self.place_piece_at(tray_index, row, col),
            Err(e) => {
                debug!("placement of piece {tray_index} at ({anchor_row}, {anchor_col}) rejected: {e}");
                Err(e)
            }
        }
    }

    /// Places tray piece `tray_index` with its bounding box's top-left at
    /// `(row, col)`, without any centering.
    pub fn place_piece_at(
        &mut self,
        tray_index: usize,
        row: usize,
        col: usize,
    ) -> Result<PlacementReport, PlacementError> {
        if self.is_game_over() {
            return Err(PlacementError::GameOver);
        }
        let piece = *self
            .tray
            .get(tray_index)
            .ok_or(PlacementError::NoSuchPiece(tray_index))?;
        if !self.board.can_place(piece.shape(), row, col) {
            debug!("piece {tray_index} does not fit at ({row}, {col})");
            return Err(PlacementError::Blocked { row, col });
        }

        self.history.push(GameSnapshot::new(
            self.board.clone(),
            self.tray.snapshot(),
            self.stats.clone(),
        ));

        let cells_placed = self.board.place(piece.shape(), row, col, piece.color());
        let lines = self.board.clear_lines();
        let full_clear = self.board.is_clear();
        let points = self.stats.record_placement(cells_placed, lines, full_clear);

        self.tray.remove_at(tray_index);
        let tray_refilled = self.tray.is_empty();
        if tray_refilled {
            self.tray.refill(self.catalog);
        }
        self.selection = Selection::Idle;

        if self.score() > self.high_score {
            self.high_score = self.score();
            self.preferences.save_high_score(self.high_score);
            info!("new high score: {}", self.high_score);
        }

        let game_over = !self.tray.is_empty()
            && !self.tray.iter().any(|piece| self.board.has_fit(piece.shape()));
        if game_over {
            self.state = SessionState::GameOver;
            info!("game over with score {}", self.score());
        }

        debug!(
            "placed piece {tray_index} at ({row}, {col}): {cells_placed} cells, {} rows, {} cols, +{points}",
            lines.rows, lines.cols,
        );

        Ok(PlacementReport {
            tray_index,
            piece,
            row,
            col,
            cells_placed,
            lines,
            full_clear,
            points,
            tray_refilled,
            game_over,
        })
    }

    /// Restores the state from before the last placement.
    ///
    /// Returns `false` without changing anything when there is nothing to undo
    /// or the game is over.
    pub fn undo(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        let (board, tray, stats) = snapshot.into_parts();
        self.board = board;
        self.tray.restore(tray);
        self.stats = stats;
        self.selection = Selection::Idle;
        debug!("undo, score back to {}", self.score());
        true
    }

    /// Finds the first tray piece that fits and its first row-major position.
    #[must_use]
    pub fn hint(&self) -> Option<Hint> {
        if self.is_game_over() {
            return None;
        }
        self.tray.iter().enumerate().find_map(|(tray_index, piece)| {
            let (row, col) = self.board.first_fit(piece.shape())?;
            Some(Hint {
                tray_index,
                row,
                col,
            })
        })
    }
}
