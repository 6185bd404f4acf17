//! The 3×3×3 cube as 27 cubies on an integer grid.
//!
//! Each cell of the grid holds a [`CubieId`] and an [`Orientation`] key. A
//! move permutes the nine cells of one layer and swaps the two orientation
//! labels perpendicular to the turning axis, which keeps the key consistent
//! with the cubie's stickers under any sequence of turns.

#![warn(clippy::pedantic)]

mod cube;
mod facelets;
mod moves;
mod scramble;
mod vector;

pub use cube::{Cell, CubeState, CubieId, CubieKind, Orientation, RotationPlan};
pub use facelets::{FACELET_COUNT, InvalidConfiguration};
pub use moves::{Axis, Face, Move, ParseMoveError, format_moves, parse_moves};
pub use scramble::{DEFAULT_SCRAMBLE_LENGTH, scramble};
pub use vector::Vector;
