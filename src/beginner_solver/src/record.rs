//! The statistics kept for every solve. The library only builds records;
//! persisting them is up to the caller.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use cube_core::CubeState;
use serde::{Deserialize, Serialize};

use crate::Solution;

pub const METHOD_NAME: &str = "beginner";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRecord {
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub method: String,
    /// The initial state as a facelet string.
    pub state: String,
    pub moves: String,
    pub elapsed_ms: u64,
    pub move_count: usize,
}

impl SolveRecord {
    #[must_use]
    pub fn new(initial: &CubeState, solution: &Solution, elapsed: Duration) -> SolveRecord {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |since| since.as_secs());
        SolveRecord {
            timestamp,
            method: METHOD_NAME.to_owned(),
            state: initial.to_facelets(),
            moves: solution.to_string(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            move_count: solution.len(),
        }
    }
}
