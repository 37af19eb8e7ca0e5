use serde::{Deserialize, Serialize};

use crate::core::Board;

use super::{game_stats::GameStats, tray::TrayPieces};

/// Copy of the undo-able game state taken right before a placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct GameSnapshot {
    board: Board,
    tray: TrayPieces,
    stats: GameStats,
}

impl GameSnapshot {
    #[must_use]
    pub(crate) fn new(board: Board, tray: TrayPieces, stats: GameStats) -> Self {
        Self { board, tray, stats }
    }

    pub(crate) fn into_parts(self) -> (Board, TrayPieces, GameStats) {
        (self.board, self.tray, self.stats)
    }
}

/// Stack of snapshots, newest last.
#[derive(Debug, Default, Clone)]
pub(crate) struct History {
    snapshots: Vec<GameSnapshot>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self { snapshots: vec![] }
    }

    pub fn push(&mut self, snapshot: GameSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<GameSnapshot> {
        self.snapshots.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
