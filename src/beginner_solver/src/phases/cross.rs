//! Phase 1: the four edges around the U center.

use cube_core::{CubieId, Face, Move, Vector};
use log::debug;

use super::{Recorder, is_placed};
use crate::{
    Frame, SolveError, algorithms,
    frame::face_towards,
    phases::Phase,
};

/// Any edge is placed within two steps: one brings it down to the D layer
/// from the U or middle layer, the other raises it into its slot.
const MAX_STEPS: usize = 2;

pub(crate) fn solve(recorder: &mut Recorder) -> Result<(), SolveError> {
    for side in Face::SIDES {
        let frame = Frame::new(Face::U, side);
        let edge = CubieId::between(&[Face::U, side]);
        let mut steps = 0;
        while !is_placed(recorder.state(), edge) {
            if steps == MAX_STEPS {
                return Err(SolveError::ConvergenceFailure {
                    phase: Phase::Cross,
                    attempts: steps,
                });
            }
            steps += 1;

            let position = recorder.state().position_of(edge);
            match position.y() {
                1 => drop_from_top(recorder, position),
                0 => drop_from_middle(recorder, position),
                _ => raise_from_bottom(recorder, frame, edge),
            }
        }
    }
    Ok(())
}

/// The edge is in the U layer, in the wrong slot or flipped. A half turn of
/// its side face sends it to the D layer, and only disturbs its own slot.
fn drop_from_top(recorder: &mut Recorder, position: Vector) {
    let side = face_towards(position - Vector::Y);
    debug!("Cross edge sits in the {side} slot of the top layer");
    recorder.apply(Move::clockwise(side));
    recorder.apply(Move::clockwise(side));
}

/// Turn a side face next to the edge so that it lands in the D layer, move it
/// out of the way and undo the turn to restore that face's cross slot.
fn drop_from_middle(recorder: &mut Recorder, position: Vector) {
    let side = face_towards(Vector::new(position.x(), 0, 0));
    let reverse = position.rotated(side.axis_vector(), true).y() == -1;
    debug!("Cross edge sits in the middle layer next to {side}");
    recorder.apply(Move::new(side, reverse));
    recorder.apply(Move::clockwise(Face::D));
    recorder.apply(Move::new(side, !reverse));
}

fn raise_from_bottom(recorder: &mut Recorder, frame: Frame, edge: CubieId) {
    let down = recorder.state().facing(edge, Face::U) == Some(Face::D);
    let (slot, algorithm) = if down {
        (Vector::new(0, -1, 1), algorithms::FRONT_HALF_TURN)
    } else {
        (Vector::new(1, -1, 0), algorithms::RAISE_SIDEWAYS_EDGE)
    };
    debug!(
        "Cross edge for {} sits in the bottom layer, top sticker facing {}",
        frame.front(),
        if down { "down" } else { "sideways" }
    );
    let slot = frame.position(slot);
    for _ in 0..3 {
        if recorder.state().position_of(edge) == slot {
            break;
        }
        recorder.apply(Move::clockwise(Face::D));
    }
    recorder.run(frame, algorithm);
}
