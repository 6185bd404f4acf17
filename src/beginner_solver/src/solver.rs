use std::{fmt::Display, time::Instant};

use cube_core::{CubeState, InvalidConfiguration, Move, format_moves};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    phases::{Phase, Recorder},
    refine::refine,
    start, success, working,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Could not generate a solution: {0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),
    #[error("Could not generate a solution: the {phase} phase gave up after {attempts} attempts")]
    ConvergenceFailure { phase: Phase, attempts: usize },
    #[error("Could not generate a solution: the moves do not solve the cube")]
    NotSolved,
}

/// Caps on the bounded loops of phases 2 to 7. The cross needs no cap since
/// every edge is placed in at most two steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryLimits {
    pub first_layer_passes: usize,
    pub middle_layer_passes: usize,
    pub edge_orientation: usize,
    pub corner_orientation: usize,
    pub corner_permutation: usize,
    pub edge_permutation: usize,
}

impl Default for RetryLimits {
    fn default() -> Self {
        RetryLimits {
            first_layer_passes: 50,
            middle_layer_passes: 50,
            edge_orientation: 50,
            corner_orientation: 50,
            corner_permutation: 50,
            edge_permutation: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Collapse redundant moves within each phase.
    pub refine: bool,
    /// Check the input for a legal configuration before solving. Without
    /// this only the grid structure is checked, and an illegal cube fails
    /// inside the phase that cannot finish.
    pub validate: bool,
    /// Replay the solution and fail unless it solves the cube.
    pub verify: bool,
    pub limits: RetryLimits,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            refine: true,
            validate: true,
            verify: true,
            limits: RetryLimits::default(),
        }
    }
}

/// One quarter turn of a solution. The first move of each phase carries the
/// phase's progress label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionStep {
    pub move_: Move,
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    steps: Vec<SolutionStep>,
}

impl Solution {
    #[must_use]
    pub fn steps(&self) -> &[SolutionStep] {
        &self.steps
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.steps.iter().map(|step| step.move_)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn push_phase(&mut self, phase: Phase, moves: Vec<Move>) {
        let labels = std::iter::once(Some(phase.message())).chain(std::iter::repeat(None));
        self.steps.extend(
            moves
                .into_iter()
                .zip(labels)
                .map(|(move_, message)| SolutionStep { move_, message }),
        );
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.moves().join(" "))
    }
}

pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Solver {
        Solver { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `state` with the beginner's method. `state` itself is left
    /// untouched; apply the returned moves to it to solve it.
    ///
    /// # Errors
    ///
    /// If `state` is not a legal configuration (only its structure is checked
    /// when validation is off), if a
    /// phase exhausts its retry limit, or if the moves fail to solve the cube
    /// (when verification is on). No partial solution is returned.
    pub fn solve(&self, state: &CubeState) -> Result<Solution, SolveError> {
        info!(start!("Solving {}"), state.to_facelets());
        let started = Instant::now();

        if self.config.validate {
            state.validate()?;
        } else {
            state.check_structure()?;
        }

        let mut cube = state.clone();
        let mut recorder = Recorder::new(&mut cube);
        let mut solution = Solution::default();
        for phase in Phase::ALL {
            let phase_start = Instant::now();
            phase.run(&mut recorder, &self.config.limits)?;
            let raw = recorder.take_moves();
            let moves = if self.config.refine {
                refine(&raw)
            } else {
                raw.clone()
            };
            debug!(
                working!("{} took {} moves ({} before refining) in {:.3}ms"),
                phase,
                moves.len(),
                raw.len(),
                phase_start.elapsed().as_secs_f64() * 1000.0
            );
            debug!("{}", format_moves(&moves));
            solution.push_phase(phase, moves);
        }

        if self.config.verify {
            let mut replay = state.clone();
            replay.apply_all(&solution.moves().collect_vec());
            if !replay.is_solved() {
                return Err(SolveError::NotSolved);
            }
        }

        info!(
            success!("Solved in {} moves in {:.3}s"),
            solution.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(solution)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(SolverConfig::default())
    }
}

/// Solve with the default configuration.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(state: &CubeState) -> Result<Solution, SolveError> {
    Solver::default().solve(state)
}
