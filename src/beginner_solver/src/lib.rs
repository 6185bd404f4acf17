//! A layer-by-layer solver for the 3×3×3 cube.
//!
//! The solver never searches. Each of the seven phases classifies where the
//! pieces it cares about are, picks one of a handful of fixed sequences and
//! applies it through a [`Frame`] so the same sequence works from every side.

#![warn(clippy::pedantic)]

mod algorithms;
mod frame;
mod phases;
pub mod record;
pub mod refine;
pub mod solver;
pub mod worker;

pub use frame::Frame;
pub use phases::Phase;
pub use record::SolveRecord;
pub use refine::refine;
pub use solver::{RetryLimits, Solution, SolutionStep, SolveError, Solver, SolverConfig, solve};
pub use worker::spawn_solve;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
