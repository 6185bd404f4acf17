use std::thread;

use crossbeam_channel::{Receiver, bounded};
use cube_core::CubeState;
use log::warn;

use crate::{Solution, SolveError, Solver, SolverConfig};

/// Solve on a background thread. The outcome arrives on the returned channel
/// once; the channel disconnects without a message only if the solver thread
/// panicked.
#[must_use]
pub fn spawn_solve(state: CubeState, config: SolverConfig) -> Receiver<Result<Solution, SolveError>> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let outcome = Solver::new(config).solve(&state);
        if sender.send(outcome).is_err() {
            warn!("Solve finished after its receiver was dropped");
        }
    });
    receiver
}
