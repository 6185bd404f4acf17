//! Phase 3: the four edges between the first and last layer. The cube is
//! held with D on top so the inserts can use the last layer freely.

use cube_core::{CubeState, CubieId, Face, Move, Vector};
use log::debug;

use super::{Recorder, Relaxation, cubie_for, is_placed, relax};
use crate::{Frame, SolveError, algorithms, phases::Phase};

const SLOT: Vector = Vector::new(1, 0, 1);

pub(crate) fn solve(recorder: &mut Recorder, max_passes: usize) -> Result<(), SolveError> {
    relax(
        recorder,
        Phase::MiddleLayer,
        max_passes,
        |recorder, mode| {
            for frame in Frame::around(Face::D) {
                place_edge(recorder, frame, mode)?;
            }
            Ok(())
        },
        edges_solved,
    )
}

fn edges_solved(state: &CubeState) -> bool {
    Frame::around(Face::D).all(|frame| is_placed(state, cubie_for(frame, SLOT)))
}

fn place_edge(recorder: &mut Recorder, frame: Frame, mode: Relaxation) -> Result<(), SolveError> {
    let edge = cubie_for(frame, SLOT);
    if is_placed(recorder.state(), edge) {
        return Ok(());
    }

    let position = recorder.state().position_of(edge);
    if position.y() == 0 {
        if mode == Relaxation::ForceRaise {
            return Ok(());
        }
        // Flipped, or in another edge's slot. Insert whatever is on top to
        // push it out.
        let Some(holder) = Frame::locate(Face::D, SLOT, position) else {
            unreachable!("every middle edge cell is FR of some frame");
        };
        debug!("Popping an edge out of the slot right of {}", holder.front());
        recorder.run(holder, algorithms::RIGHT_INSERT);
    }

    insert(recorder, edge)
}

/// Insert an edge that sits in the last layer.
fn insert(recorder: &mut Recorder, edge: CubieId) -> Result<(), SolveError> {
    let [first, second] = side_faces(edge);
    let (side, top) = if recorder.state().facing(edge, first) == Some(Face::D) {
        (second, first)
    } else {
        (first, second)
    };

    // Line the side sticker up with its center
    for _ in 0..4 {
        if recorder.state().facing(edge, side) == Some(side) {
            break;
        }
        recorder.apply(Move::clockwise(Face::D));
    }
    if recorder.state().facing(edge, side) != Some(side) {
        return Err(SolveError::ConvergenceFailure {
            phase: Phase::MiddleLayer,
            attempts: 4,
        });
    }

    let frame = Frame::new(Face::D, side);
    if top == frame.right() {
        debug!("Inserting the {side}{top} edge to the right");
        recorder.run(frame, algorithms::RIGHT_INSERT);
    } else {
        debug!("Inserting the {side}{top} edge to the left");
        recorder.run(frame, algorithms::LEFT_INSERT);
    }
    Ok(())
}

/// The two side faces a middle layer edge belongs to.
fn side_faces(edge: CubieId) -> [Face; 2] {
    let home = edge.home();
    let mut faces = Face::SIDES
        .into_iter()
        .filter(|face| home.component(face.axis()) == face.sign());
    match (faces.next(), faces.next()) {
        (Some(a), Some(b)) => [a, b],
        _ => unreachable!("{edge:?} is not a middle layer edge"),
    }
}

#[cfg(test)]
mod tests {
    use cube_core::scramble;

    use super::*;
    use crate::phases::{cross, first_layer};

    #[test_log::test]
    fn keeps_the_first_layer_and_solves_the_middle() {
        for seed in 100..130 {
            let mut state = CubeState::solved();
            scramble(&mut state, 80, seed);
            let mut recorder = Recorder::new(&mut state);
            cross::solve(&mut recorder).unwrap();
            first_layer::solve(&mut recorder, 50).unwrap();
            solve(&mut recorder, 50).unwrap();

            assert!(edges_solved(&state), "seed {seed}");
            for (position, cell) in state.iter() {
                if position.y() >= 0 {
                    assert!(is_placed(&state, cell.cubie), "seed {seed} at {position:?}");
                }
            }
        }
    }

    #[test]
    fn middle_edges_have_two_side_faces() {
        let edge = CubieId::between(&[Face::F, Face::R]);
        assert_eq!(side_faces(edge), [Face::F, Face::R]);
    }
}
