use blockfit_engine::{Board, GameStats, Piece, PlacementReport, TraySeed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::auto_play::Policy;

/// One headless game played by `auto-play`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Timestamp when the game finished (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the tray generator, shared by every game of one run
    pub seed: TraySeed,
    /// Position of this game within the run (0-indexed)
    pub game_index: usize,
    pub policy: Policy,
    pub final_stats: GameStats,
    /// High score after this game
    pub high_score: usize,
    /// `false` when the game was cut off by the turn limit
    pub game_over: bool,
    pub turns: Vec<TurnRecord>,
}

/// A single placement, with the state right before it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: usize,
    pub before_placement: Board,
    pub tray: Vec<Piece>,
    pub placement: PlacementReport,
}
