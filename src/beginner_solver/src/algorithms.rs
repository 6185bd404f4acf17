//! Fixed sequences in standard notation. They are always applied through a
//! [`Frame`](crate::Frame), never directly.

use cube_core::{Face, Move};

const U: Move = Move::clockwise(Face::U);
const UI: Move = Move::new(Face::U, true);
const D: Move = Move::clockwise(Face::D);
const DI: Move = Move::new(Face::D, true);
const R: Move = Move::clockwise(Face::R);
const RI: Move = Move::new(Face::R, true);
const L: Move = Move::clockwise(Face::L);
const LI: Move = Move::new(Face::L, true);
const F: Move = Move::clockwise(Face::F);
const FI: Move = Move::new(Face::F, true);
const B: Move = Move::clockwise(Face::B);

pub(crate) const UP: &[Move] = &[U];

pub(crate) const FRONT_HALF_TURN: &[Move] = &[F, F];

/// Bring the edge at DR up to UF, keeping the R layer intact.
pub(crate) const RAISE_SIDEWAYS_EDGE: &[Move] = &[R, FI, RI];

/// Exchanges the corners at UFR and DFR. Nothing else in the U layer moves.
pub(crate) const TRIGGER: &[Move] = &[RI, DI, R, D];

/// Two triggers: twists the corner at UFR in place.
pub(crate) const TWIST_CORNER: &[Move] = &[RI, DI, R, D, RI, DI, R, D];

/// Insert the edge at UF into FR.
pub(crate) const RIGHT_INSERT: &[Move] = &[U, R, UI, RI, UI, FI, U, F];

/// Insert the edge at UF into FL.
pub(crate) const LEFT_INSERT: &[Move] = &[UI, LI, U, L, U, F, UI, FI];

/// Cycles the edges UF → UR → UB, flipping the two that leave UF and UB.
pub(crate) const ORIENT_EDGES: &[Move] = &[F, R, U, RI, UI, FI];

/// Cycles the corners UFR → UBL → UBR, keeping UFL and all orientations.
pub(crate) const PERMUTE_CORNERS: &[Move] = &[RI, F, RI, B, B, R, FI, RI, B, B, R, R];

/// Cycles the edges UF → UR → UL, keeping UB.
pub(crate) const PERMUTE_EDGES: &[Move] = &[R, UI, R, U, R, U, R, UI, RI, UI, R, R];
