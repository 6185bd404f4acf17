//! Phase 2: the four corners of the U layer.

use cube_core::{CubeState, CubieId, Face, Move, Vector};
use log::debug;

use super::{Recorder, Relaxation, cubie_for, is_placed, relax};
use crate::{Frame, SolveError, algorithms, phases::Phase};

const SLOT: Vector = Vector::new(1, 1, 1);
const BELOW_SLOT: Vector = Vector::new(1, -1, 1);

/// Repeating the trigger six times is the identity, so a corner at UFR or
/// DFR is solved within five.
const MAX_TRIGGERS: usize = 6;

pub(crate) fn solve(recorder: &mut Recorder, max_passes: usize) -> Result<(), SolveError> {
    relax(
        recorder,
        Phase::FirstLayerCorners,
        max_passes,
        |recorder, mode| {
            for side in Face::SIDES {
                place_corner(recorder, Frame::new(Face::U, side), mode)?;
            }
            Ok(())
        },
        corners_solved,
    )
}

fn corners_solved(state: &CubeState) -> bool {
    Face::SIDES
        .into_iter()
        .all(|side| is_placed(state, cubie_for(Frame::new(Face::U, side), SLOT)))
}

fn place_corner(recorder: &mut Recorder, frame: Frame, mode: Relaxation) -> Result<(), SolveError> {
    let corner = cubie_for(frame, SLOT);
    if is_placed(recorder.state(), corner) {
        return Ok(());
    }

    let slot = frame.position(SLOT);
    let mut position = recorder.state().position_of(corner);
    if position.y() == 1 && position != slot {
        if mode == Relaxation::ForceRaise {
            return Ok(());
        }
        // Stuck in another corner's slot
        let Some(holder) = Frame::locate(Face::U, SLOT, position) else {
            unreachable!("every top corner cell is UFR of some frame");
        };
        debug!("Lowering the {} corner out of the {} slot", frame.front(), holder.front());
        recorder.run(holder, algorithms::TRIGGER);
        position = recorder.state().position_of(corner);
    }

    let below = frame.position(BELOW_SLOT);
    for _ in 0..3 {
        if position.y() != -1 || position == below {
            break;
        }
        recorder.apply(Move::clockwise(Face::D));
        position = recorder.state().position_of(corner);
    }

    debug!("Raising the {} corner from {position:?}", frame.front());
    raise(recorder, frame, corner)
}

fn raise(recorder: &mut Recorder, frame: Frame, corner: CubieId) -> Result<(), SolveError> {
    for _ in 0..MAX_TRIGGERS {
        if is_placed(recorder.state(), corner) {
            return Ok(());
        }
        recorder.run(frame, algorithms::TRIGGER);
    }
    if is_placed(recorder.state(), corner) {
        Ok(())
    } else {
        Err(SolveError::ConvergenceFailure {
            phase: Phase::FirstLayerCorners,
            attempts: MAX_TRIGGERS,
        })
    }
}
