//! Board and piece primitives.
//!
//! - [`Shape`] - trimmed piece geometry with rotation
//! - [`ShapeCatalog`] - every distinct orientation of the base shapes
//! - [`Piece`] - a shape bound to a [`ColorId`]
//! - [`Board`] - the 10×10 grid with placement and line clearing

pub use self::{board::*, piece::*, shape::*, shape_catalog::*};

mod board;
mod piece;
mod shape;
mod shape_catalog;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 10;
