pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum PlacementError {
    #[display("no piece at tray index {_0}")]
    NoSuchPiece(#[error(not(source))] usize),
    #[display("anchor cell ({row}, {col}) is outside the board")]
    AnchorOutOfBounds { row: usize, col: usize },
    #[display("piece does not fit at ({row}, {col})")]
    Blocked { row: usize, col: usize },
    #[display("no piece selected")]
    NoSelection,
    #[display("game is over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectError {
    #[display("no piece at tray index {_0}")]
    NoSuchPiece(#[error(not(source))] usize),
    #[display("game is over")]
    GameOver,
}
