//! Game flow on top of the core primitives.
//!
//! - [`GameEngine`] - one game: placement, scoring, undo, hints and game over
//! - [`Tray`] - the pieces waiting to be placed
//! - [`TraySeed`] - seed for deterministic tray generation
//! - [`GameStats`] - score and placement counters
//! - [`Preferences`] - high score and theme persistence over a [`KeyValueStore`]
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`], which deals a tray of three pieces
//! 2. Place a tray piece on the board with [`GameEngine::attempt_placement`]
//! 3. Full rows and columns are cleared and the placement is scored
//! 4. Once all three pieces are placed, the tray is refilled
//! 5. Repeat until no tray piece fits anywhere
//!
//! # Example
//!
//! ```
//! use blockfit_engine::GameEngine;
//!
//! let mut engine = GameEngine::new();
//!
//! for _ in 0..30 {
//!     let Some(hint) = engine.hint() else {
//!         break; // game over
//!     };
//!     engine
//!         .place_piece_at(hint.tray_index, hint.row, hint.col)
//!         .unwrap();
//! }
//!
//! assert!(engine.score() > 0);
//! assert!(engine.high_score() >= engine.score());
//! ```

pub use self::{game_engine::*, game_stats::*, preferences::*, tray::*};

mod game_engine;
mod game_stats;
mod history;
mod preferences;
mod tray;
