use log::debug;

use crate::{CubeState, Move, format_moves};

/// Scramble length used when the caller does not pick one.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 200;

/// Apply `length` random quarter turns to `state` and return them. The same
/// seed always produces the same sequence.
pub fn scramble(state: &mut CubeState, length: usize, seed: u64) -> Vec<Move> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let all = Move::all().collect::<Vec<_>>();
    let moves = (0..length)
        .map(|_| all[rng.usize(..all.len())])
        .collect::<Vec<_>>();
    state.apply_all(&moves);
    debug!("Scrambled with seed {seed}: {}", format_moves(&moves));
    moves
}
