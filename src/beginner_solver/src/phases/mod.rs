//! The seven phases. Each one assumes everything the earlier phases solved
//! is still solved, and leaves it that way.

mod cross;
mod first_layer;
mod last_layer;
mod middle_layer;

use std::fmt::Display;

use cube_core::{CubeState, CubieId, Move, Orientation, Vector, format_moves};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{Frame, SolveError, solver::RetryLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Cross,
    FirstLayerCorners,
    MiddleLayer,
    OrientLastEdges,
    OrientLastCorners,
    PermuteLastCorners,
    PermuteLastEdges,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Cross,
        Phase::FirstLayerCorners,
        Phase::MiddleLayer,
        Phase::OrientLastEdges,
        Phase::OrientLastCorners,
        Phase::PermuteLastCorners,
        Phase::PermuteLastEdges,
    ];

    /// The progress label attached to the first move of the phase.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Phase::Cross => "Solving the top cross",
            Phase::FirstLayerCorners => "Solving the top corners",
            Phase::MiddleLayer => "Solving the middle layer",
            Phase::OrientLastEdges => "Orienting the bottom edges",
            Phase::OrientLastCorners => "Orienting the bottom corners",
            Phase::PermuteLastCorners => "Placing the bottom corners",
            Phase::PermuteLastEdges => "Placing the bottom edges",
        }
    }

    pub(crate) fn run(self, recorder: &mut Recorder, limits: &RetryLimits) -> Result<(), SolveError> {
        match self {
            Phase::Cross => cross::solve(recorder),
            Phase::FirstLayerCorners => first_layer::solve(recorder, limits.first_layer_passes),
            Phase::MiddleLayer => middle_layer::solve(recorder, limits.middle_layer_passes),
            Phase::OrientLastEdges => last_layer::orient_edges(recorder, limits.edge_orientation),
            Phase::OrientLastCorners => {
                last_layer::orient_corners(recorder, limits.corner_orientation)
            }
            Phase::PermuteLastCorners => {
                last_layer::permute_corners(recorder, limits.corner_permutation)
            }
            Phase::PermuteLastEdges => last_layer::permute_edges(recorder, limits.edge_permutation),
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Cross => "cross",
            Phase::FirstLayerCorners => "first layer corners",
            Phase::MiddleLayer => "middle layer",
            Phase::OrientLastEdges => "last layer edge orientation",
            Phase::OrientLastCorners => "last layer corner orientation",
            Phase::PermuteLastCorners => "last layer corner permutation",
            Phase::PermuteLastEdges => "last layer edge permutation",
        };
        f.write_str(name)
    }
}

/// Applies moves to the shared state and remembers them.
pub(crate) struct Recorder<'a> {
    state: &'a mut CubeState,
    moves: Vec<Move>,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(state: &'a mut CubeState) -> Recorder<'a> {
        Recorder {
            state,
            moves: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> &CubeState {
        self.state
    }

    pub(crate) fn len(&self) -> usize {
        self.moves.len()
    }

    pub(crate) fn take_moves(&mut self) -> Vec<Move> {
        std::mem::take(&mut self.moves)
    }

    pub(crate) fn apply(&mut self, move_: Move) {
        self.state.apply(move_);
        self.moves.push(move_);
    }

    pub(crate) fn run(&mut self, frame: Frame, algorithm: &[Move]) {
        let moves = frame.translate(algorithm);
        trace!("{} (up {}, front {})", format_moves(&moves), frame.up(), frame.front());
        for move_ in moves {
            self.apply(move_);
        }
    }

    /// The state `algorithm` would produce, without applying it.
    pub(crate) fn preview(&self, frame: Frame, algorithm: &[Move]) -> CubeState {
        let mut state = self.state.clone();
        state.apply_all(&frame.translate(algorithm));
        state
    }
}

/// The cubie that belongs in the cell `relative` of `frame`.
pub(crate) fn cubie_for(frame: Frame, relative: Vector) -> CubieId {
    CubieId::from_home(frame.position(relative))
}

/// In its home cell with every sticker on its own face.
pub(crate) fn is_placed(state: &CubeState, cubie: CubieId) -> bool {
    let position = state.position_of(cubie);
    position == cubie.home() && state.cell(position).orientation == Orientation::IDENTITY
}

/// Whether a pass may take pieces out of solved-looking slots that hold the
/// wrong piece. Passes start out only raising pieces into their slots and
/// fall back to lowering after a pass that changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relaxation {
    ForceRaise,
    AllowLower,
}

/// Run `pass` until `done` holds. Fails when a pass with lowering allowed
/// makes no change, or after `max_passes` passes.
pub(crate) fn relax(
    recorder: &mut Recorder,
    phase: Phase,
    max_passes: usize,
    mut pass: impl FnMut(&mut Recorder, Relaxation) -> Result<(), SolveError>,
    done: impl Fn(&CubeState) -> bool,
) -> Result<(), SolveError> {
    let mut mode = Relaxation::ForceRaise;
    for attempt in 1..=max_passes {
        if done(recorder.state()) {
            return Ok(());
        }
        let before = recorder.len();
        pass(recorder, mode)?;
        let changed = recorder.len() != before;
        debug!("{phase} pass {attempt} in {mode:?} mode changed the cube: {changed}");
        mode = match (changed, mode) {
            (true, _) => Relaxation::ForceRaise,
            (false, Relaxation::ForceRaise) => Relaxation::AllowLower,
            (false, Relaxation::AllowLower) => {
                return Err(SolveError::ConvergenceFailure {
                    phase,
                    attempts: attempt,
                });
            }
        };
    }
    if done(recorder.state()) {
        Ok(())
    } else {
        Err(SolveError::ConvergenceFailure {
            phase,
            attempts: max_passes,
        })
    }
}
