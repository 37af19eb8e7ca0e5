use std::{cmp::Reverse, path::PathBuf};

use blockfit_engine::{Board, GameEngine, Hint, Piece, Preferences, TraySeed, placement_points};
use serde::{Deserialize, Serialize};

use crate::{
    schema::record::{SessionRecord, TurnRecord},
    util::Output,
};

/// Upper bound on placements per game.
const DEFAULT_MAX_TURNS: usize = 10_000;

/// How the next placement is chosen.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// First tray piece that fits, at its first row-major position
    #[default]
    #[display("first-fit")]
    FirstFit,
    /// Placement with the most immediate points, preferring emptier boards
    #[display("greedy")]
    Greedy,
}

impl Policy {
    fn choose(self, engine: &GameEngine) -> Option<Hint> {
        match self {
            Policy::FirstFit => engine.hint(),
            Policy::Greedy => greedy_placement(engine),
        }
    }
}

fn greedy_placement(engine: &GameEngine) -> Option<Hint> {
    if engine.is_game_over() {
        return None;
    }
    best_scoring_placement(engine.board(), engine.tray().pieces())
}

/// Scores every legal placement on a copy of `board`.
///
/// Ties on points go to the placement leaving fewer filled cells, then to the
/// earliest piece and position.
fn best_scoring_placement(board: &Board, pieces: &[Piece]) -> Option<Hint> {
    let mut best: Option<((usize, Reverse<usize>), Hint)> = None;
    for (tray_index, piece) in pieces.iter().enumerate() {
        let shape = piece.shape();
        for (row, col) in Board::candidate_positions(shape) {
            if !board.can_place(shape, row, col) {
                continue;
            }
            let mut after = board.clone();
            let cells = after.place(shape, row, col, piece.color());
            let lines = after.clear_lines();
            let points = placement_points(cells, lines, after.is_clear());
            let key = (points, Reverse(after.filled_count()));
            if best.as_ref().is_none_or(|(best_key, _)| key > *best_key) {
                let hint = Hint {
                    tray_index,
                    row,
                    col,
                };
                best = Some((key, hint));
            }
        }
    }
    best.map(|(_, hint)| hint)
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Placement policy
    #[arg(long, value_enum, default_value_t = Policy::FirstFit)]
    policy: Policy,
    /// Tray seed as 32 hex digits (random when omitted)
    #[arg(long)]
    seed: Option<TraySeed>,
    /// Stop a game after this many placements
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,
    /// Output file path for the session records (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AutoPlayArg, preferences: Preferences) -> anyhow::Result<()> {
    let AutoPlayArg {
        games,
        policy,
        seed,
        max_turns,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(rand::random);
    let mut engine = GameEngine::with_preferences(preferences, seed);
    log::info!("auto-play: {games} games, policy {policy}, seed {}", seed.to_hex());

    let mut records = Vec::with_capacity(*games);
    for game_index in 0..*games {
        if game_index > 0 {
            engine.new_game();
        }
        let record = play_game(&mut engine, *policy, *max_turns, seed, game_index);
        eprintln!(
            "Game {}: score {}, {} placements, {} lines cleared{}",
            game_index + 1,
            record.final_stats.score(),
            record.turns.len(),
            record.final_stats.cleared_rows() + record.final_stats.cleared_cols(),
            if record.game_over { "" } else { " (turn limit)" },
        );
        records.push(record);
    }

    if let Some(best) = records.iter().map(|r| r.final_stats.score()).max() {
        eprintln!("Best score: {best}, high score: {}", engine.high_score());
    }

    Output::save_json(&records, output.clone())?;
    Ok(())
}

fn play_game(
    engine: &mut GameEngine,
    policy: Policy,
    max_turns: usize,
    seed: TraySeed,
    game_index: usize,
) -> SessionRecord {
    let mut turns = vec![];
    while turns.len() < max_turns {
        let Some(hint) = policy.choose(engine) else {
            break;
        };
        let before_placement = engine.board().clone();
        let tray = engine.tray().pieces().to_vec();
        match engine.place_piece_at(hint.tray_index, hint.row, hint.col) {
            Ok(placement) => turns.push(TurnRecord {
                turn: turns.len(),
                before_placement,
                tray,
                placement,
            }),
            Err(e) => {
                log::warn!("policy {policy} chose an illegal placement: {e}");
                break;
            }
        }
    }

    SessionRecord {
        recorded_at: chrono::Utc::now(),
        seed,
        game_index,
        policy,
        final_stats: engine.stats().clone(),
        high_score: engine.high_score(),
        game_over: engine.is_game_over(),
        turns,
    }
}
