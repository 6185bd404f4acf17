//! Cosmetic clean-up of a move list. Refining never changes what the moves
//! do to the cube.

use cube_core::Move;
use log::trace;

/// Repeatedly cancel a move followed by its reversal and collapse three
/// identical quarter turns into one the other way, until neither applies.
#[must_use]
pub fn refine(moves: &[Move]) -> Vec<Move> {
    let mut current = reduce(moves);
    loop {
        let next = reduce(&current);
        if next.len() == current.len() {
            trace!("Refined {} moves down to {}", moves.len(), next.len());
            return next;
        }
        current = next;
    }
}

/// One left-to-right pass over `moves` with a stack of kept moves.
fn reduce(moves: &[Move]) -> Vec<Move> {
    let mut kept: Vec<Move> = Vec::with_capacity(moves.len());
    for &move_ in moves {
        match kept.as_slice() {
            [.., last] if *last == move_.reversal() => {
                kept.pop();
            }
            [.., a, b] if *a == move_ && *b == move_ => {
                kept.truncate(kept.len() - 2);
                kept.push(move_.reversal());
            }
            _ => kept.push(move_),
        }
    }
    kept
}
