//! Phases 4 to 7: the D layer, worked with D on top. Every algorithm here
//! keeps the first two layers intact, or restores them once the phase is
//! done.

use cube_core::{CubeState, Face, Move, Vector};
use itertools::Itertools;
use log::debug;

use super::{Recorder, Phase};
use crate::{Frame, SolveError, algorithms};

/// Last layer corner cells in the order a quarter turn of the layer carries
/// pieces: UFR, UFL, UBL, UBR.
const CORNER_SLOTS: [Vector; 4] = [
    Vector::new(1, 1, 1),
    Vector::new(-1, 1, 1),
    Vector::new(-1, 1, -1),
    Vector::new(1, 1, -1),
];

const UB: Vector = Vector::new(0, 1, -1);

fn edge_cells() -> impl Iterator<Item = Vector> {
    Face::SIDES
        .into_iter()
        .map(|side| side.axis_vector() - Vector::Y)
}

fn corner_cells() -> impl Iterator<Item = Vector> {
    let frame = Frame::new(Face::D, Face::F);
    CORNER_SLOTS.into_iter().map(move |slot| frame.position(slot))
}

fn faces_down(state: &CubeState, position: Vector) -> bool {
    state.sticker(position, Face::D) == Face::D
}

/// How close the last layer edges are to all facing down: 0 for none, 1 for
/// two adjacent ones, 2 for two opposite ones and 3 for all four.
fn edge_orientation_stage(state: &CubeState) -> Option<u8> {
    let oriented = edge_cells()
        .filter(|position| faces_down(state, *position))
        .collect_vec();
    match oriented.as_slice() {
        [] => Some(0),
        [a, b] if *a + *b == Vector::Y * -2 => Some(2),
        [_, _] => Some(1),
        [_, _, _, _] => Some(3),
        _ => None,
    }
}

/// Phase 4: the classic dot, L, line, cross progression. Each step applies
/// the orienting algorithm from the side that moves one stage forward.
pub(crate) fn orient_edges(recorder: &mut Recorder, limit: usize) -> Result<(), SolveError> {
    for attempt in 1..=limit {
        let Some(stage) = edge_orientation_stage(recorder.state()) else {
            debug!("An odd number of last layer edges face down");
            return Err(SolveError::ConvergenceFailure {
                phase: Phase::OrientLastEdges,
                attempts: attempt,
            });
        };
        if stage == 3 {
            return Ok(());
        }
        debug!("Last layer edge orientation is at stage {stage}");
        let frame = Frame::around(Face::D)
            .max_by_key(|frame| {
                let after = recorder.preview(*frame, algorithms::ORIENT_EDGES);
                edge_orientation_stage(&after)
            })
            .unwrap_or(Frame::new(Face::D, Face::F));
        recorder.run(frame, algorithms::ORIENT_EDGES);
    }
    finish(
        edge_orientation_stage(recorder.state()) == Some(3),
        Phase::OrientLastEdges,
        limit,
    )
}

/// Phase 5: twist the corner at UFR with pairs of triggers until it faces
/// down, then turn the last layer to bring the next unoriented corner over.
/// The first two layers are scrambled in between and come back once every
/// corner is oriented.
pub(crate) fn orient_corners(recorder: &mut Recorder, limit: usize) -> Result<(), SolveError> {
    let frame = Frame::new(Face::D, Face::F);
    let slot = frame.position(CORNER_SLOTS[0]);
    let all_down = |state: &CubeState| corner_cells().all(|cell| faces_down(state, cell));
    for _ in 0..limit {
        if all_down(recorder.state()) {
            return Ok(());
        }
        if faces_down(recorder.state(), slot) {
            recorder.run(frame, algorithms::UP);
        } else {
            recorder.run(frame, algorithms::TWIST_CORNER);
        }
    }
    finish(all_down(recorder.state()), Phase::OrientLastCorners, limit)
}

/// Slot indices of the home cells of the corners in each slot of `frame`.
fn corner_homes(state: &CubeState, frame: Frame) -> [usize; 4] {
    let slots = CORNER_SLOTS.map(|slot| frame.position(slot));
    slots.map(|cell| {
        let home = state.cell(cell).cubie.home();
        slots.iter().position(|slot| *slot == home).unwrap_or(0)
    })
}

/// Adjacent slots holding corners that also neighbour each other at home,
/// in the same order. Four pairs means the layer is solved up to a turn.
fn corner_pairs(state: &CubeState) -> usize {
    let homes = corner_homes(state, Frame::new(Face::D, Face::F));
    (0..4)
        .filter(|&i| homes[(i + 1) % 4] == (homes[i] + 1) % 4)
        .count()
}

/// Phase 6: with one correct pair the corner cycle finishes the job when the
/// pair sits at the back; with none it creates a pair. Then turn the layer
/// into place.
pub(crate) fn permute_corners(recorder: &mut Recorder, limit: usize) -> Result<(), SolveError> {
    let mut attempts = 0;
    while corner_pairs(recorder.state()) != 4 {
        if attempts == limit {
            return Err(SolveError::ConvergenceFailure {
                phase: Phase::PermuteLastCorners,
                attempts,
            });
        }
        attempts += 1;
        debug!("{} correctly paired corners", corner_pairs(recorder.state()));
        let frame = Frame::around(Face::D)
            .find(|frame| {
                let homes = corner_homes(recorder.state(), *frame);
                homes[3] == (homes[2] + 1) % 4
            })
            .unwrap_or(Frame::new(Face::D, Face::F));
        recorder.run(frame, algorithms::PERMUTE_CORNERS);
    }

    // Turn the layer so every corner is home
    let turns = (0..4).find(|&turns| {
        let mut state = recorder.state().clone();
        for _ in 0..turns {
            state.apply(Move::clockwise(Face::D));
        }
        corner_cells().all(|cell| state.cell(cell).cubie.home() == cell)
    });
    match turns {
        Some(3) => recorder.apply(Move::new(Face::D, true)),
        Some(turns) => {
            for _ in 0..turns {
                recorder.apply(Move::clockwise(Face::D));
            }
        }
        None => {
            return Err(SolveError::ConvergenceFailure {
                phase: Phase::PermuteLastCorners,
                attempts,
            });
        }
    }
    Ok(())
}

/// Phase 7: cycle three edges around the one that is already home, or around
/// any edge when none is.
pub(crate) fn permute_edges(recorder: &mut Recorder, limit: usize) -> Result<(), SolveError> {
    let home = |state: &CubeState, cell: Vector| state.cell(cell).cubie.home() == cell;
    for attempt in 1..=limit {
        let correct = edge_cells()
            .filter(|cell| home(recorder.state(), *cell))
            .collect_vec();
        let frame = match correct.as_slice() {
            [_, _, _, _] => return Ok(()),
            [] => Frame::new(Face::D, Face::F),
            [cell] => Frame::locate(Face::D, UB, *cell).unwrap_or(Frame::new(Face::D, Face::F)),
            _ => {
                debug!("{} last layer edges are home, which no cycle fixes", correct.len());
                return Err(SolveError::ConvergenceFailure {
                    phase: Phase::PermuteLastEdges,
                    attempts: attempt,
                });
            }
        };
        debug!("Cycling last layer edges around {}", frame.resolve(Face::B));
        recorder.run(frame, algorithms::PERMUTE_EDGES);
    }
    let done = edge_cells().all(|cell| home(recorder.state(), cell));
    finish(done, Phase::PermuteLastEdges, limit)
}

fn finish(done: bool, phase: Phase, attempts: usize) -> Result<(), SolveError> {
    if done {
        Ok(())
    } else {
        Err(SolveError::ConvergenceFailure { phase, attempts })
    }
}
