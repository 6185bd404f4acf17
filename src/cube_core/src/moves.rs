use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Vector;

/// One of the three coordinate axes, used both as a physical direction and as
/// a label in an [`Orientation`](crate::Orientation) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The two labels perpendicular to each axis; a quarter turn about an axis
    /// exchanges exactly these two.
    const PERPENDICULAR: [(Axis, Axis); 3] = [(Axis::Y, Axis::Z), (Axis::X, Axis::Z), (Axis::X, Axis::Y)];

    #[must_use]
    pub fn unit(self) -> Vector {
        match self {
            Axis::X => Vector::X,
            Axis::Y => Vector::Y,
            Axis::Z => Vector::Z,
        }
    }

    #[must_use]
    pub fn perpendicular_pair(self) -> (Axis, Axis) {
        Axis::PERPENDICULAR[self as usize]
    }
}

/// The six faces of the cube. `R`, `U` and `F` point along +X, +Y and +Z,
/// which makes the frame right-handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    /// The faces around the U/D axis, in the order a U turn carries stickers.
    pub const SIDES: [Face; 4] = [Face::F, Face::L, Face::B, Face::R];

    const TABLE: [(Face, char, Vector); 6] = [
        (Face::U, 'U', Vector::new(0, 1, 0)),
        (Face::D, 'D', Vector::new(0, -1, 0)),
        (Face::L, 'L', Vector::new(-1, 0, 0)),
        (Face::R, 'R', Vector::new(1, 0, 0)),
        (Face::F, 'F', Vector::new(0, 0, 1)),
        (Face::B, 'B', Vector::new(0, 0, -1)),
    ];

    #[must_use]
    pub fn axis_vector(self) -> Vector {
        Face::TABLE[self as usize].2
    }

    #[must_use]
    pub fn letter(self) -> char {
        Face::TABLE[self as usize].1
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Face> {
        Face::TABLE
            .iter()
            .find(|(_, c, _)| *c == letter)
            .map(|(face, _, _)| *face)
    }

    /// The face whose outward normal is `axis`, if `axis` is one of the six
    /// unit directions.
    #[must_use]
    pub fn from_axis_vector(axis: Vector) -> Option<Face> {
        Face::TABLE
            .iter()
            .find(|(_, _, v)| *v == axis)
            .map(|(face, _, _)| *face)
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Face::L | Face::R => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    #[must_use]
    pub fn sign(self) -> i8 {
        self.axis_vector().component(self.axis())
    }

    #[must_use]
    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A quarter turn of one outer layer. Without `reverse` the layer turns
/// clockwise as seen from outside that face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    pub face: Face,
    pub reverse: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Empty move")]
    Empty,
    #[error("Unknown face `{0}`; expected one of U, D, L, R, F, B")]
    UnknownFace(char),
    #[error("Invalid suffix in move `{0}`; expected nothing, `'` or `2`")]
    InvalidSuffix(String),
}

impl Move {
    #[must_use]
    pub const fn new(face: Face, reverse: bool) -> Move {
        Move { face, reverse }
    }

    #[must_use]
    pub const fn clockwise(face: Face) -> Move {
        Move::new(face, false)
    }

    /// The move that undoes `self`.
    #[must_use]
    pub fn reversal(self) -> Move {
        Move::new(self.face, !self.reverse)
    }

    #[must_use]
    pub fn axis(self) -> Vector {
        self.face.axis_vector()
    }

    /// All twelve quarter turns.
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL
            .into_iter()
            .flat_map(|face| [Move::new(face, false), Move::new(face, true)])
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.reverse {
            write!(f, "{}'", self.face)
        } else {
            write!(f, "{}", self.face)
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s)? {
            (move_, 1) => Ok(move_),
            _ => Err(ParseMoveError::InvalidSuffix(s.to_owned())),
        }
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = ParseMoveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse one token of move notation into a quarter turn and how many times it
/// repeats.
fn parse_token(token: &str) -> Result<(Move, usize), ParseMoveError> {
    let mut chars = token.chars();
    let letter = chars.next().ok_or(ParseMoveError::Empty)?;
    let face = Face::from_letter(letter).ok_or(ParseMoveError::UnknownFace(letter))?;
    match chars.as_str() {
        "" => Ok((Move::new(face, false), 1)),
        "'" => Ok((Move::new(face, true), 1)),
        "2" | "2'" => Ok((Move::new(face, false), 2)),
        _ => Err(ParseMoveError::InvalidSuffix(token.to_owned())),
    }
}

/// Parse a whitespace separated sequence such as `"R U R' U2"`. Half turns
/// expand into two quarter turns.
///
/// # Errors
///
/// If any token is not a face letter optionally followed by `'` or `2`.
pub fn parse_moves(sequence: &str) -> Result<Vec<Move>, ParseMoveError> {
    let mut moves = Vec::new();
    for token in sequence.split_whitespace() {
        let (move_, count) = parse_token(token)?;
        moves.extend(std::iter::repeat_n(move_, count));
    }
    Ok(moves)
}

#[must_use]
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}
