use beginner_solver::{Phase, SolveError, SolveRecord, Solver, SolverConfig, refine, solve};
use cube_core::{
    CubeState, DEFAULT_SCRAMBLE_LENGTH, InvalidConfiguration, Move, format_moves, parse_moves,
    scramble,
};
use itertools::Itertools;
use log::info;

fn scrambled(seed: u64) -> (CubeState, Vec<Move>) {
    let mut state = CubeState::solved();
    let moves = scramble(&mut state, DEFAULT_SCRAMBLE_LENGTH, seed);
    (state, moves)
}

#[test_log::test]
fn solves_a_hundred_scrambles() {
    let mut lengths = Vec::new();
    for seed in 0..100 {
        let (mut state, _) = scrambled(seed);
        let solution = solve(&state).unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        state.apply_all(&solution.moves().collect_vec());
        assert!(state.is_solved(), "seed {seed}");
        lengths.push(solution.len());
    }
    info!(
        "Move counts: min {:?}, max {:?}",
        lengths.iter().min(),
        lengths.iter().max()
    );
}

/// 200 quarter turns once drawn from seed 2024, kept as text so the fixture
/// does not depend on the random number generator.
const PINNED_SCRAMBLE: &str = concat!(
    "D U R L' D' U R R' U U R R D F' D U' ",
    "U' D' D F U' D' L' R F U R D' D L R' B' ",
    "R D L' F' U F D' U' R' L L' D' U B' R B ",
    "D' D' L R' B' L' U' R U F' U' D' D L D D' ",
    "R L' F L F' D D B' F L' U R' B B' F F' ",
    "U' R U' F R' R L U' B L' D B' D U' B' F' ",
    "F' F' L' R B L' U B L D' F L' R L' U' U ",
    "R' D U D' D' F L R' R' B B' R R L' F U ",
    "L R' B' D B L' R' F U' D' U' B B' F' B R ",
    "B F R U' L B D L L R' B' F' F D' B F' ",
    "F U' R' R D' F D L U' D' L' F B' R L' F' ",
    "U' R' U R R D B D B R' D L' B' F' F' L' ",
    "U F U D' L' D U D ",
);

const PINNED_SOLUTION: &str = concat!(
    "L L D F F R' D R D D F L' F' B B R ",
    "D R' B R' B' R' D' R D F' D' F D F' D' F ",
    "D F' D' F L' D' L D D B' D' B D B' D' B ",
    "D B' D' B D D L D' L' D' F' D F D' L' D ",
    "L D B D' B' D R D' R' D' B' D B D' D' F' ",
    "D F D L D' L' D F D' F' D' R' D R D' F ",
    "D' F' D' R' D R D' R D' R' D' B' D B R F ",
    "D F' D' R' D L' U' L U L' U' L U D D L' ",
    "U' L U L' U' L U L' U' L U L' U' L U L' ",
    "F L' B B L F' L' B B L L B' L B' R R ",
    "B L' B' R R B B D' F D' F D F D F D' ",
    "F' D' F' D' F D F D F D' F' D' F F ",
);

#[test_log::test]
fn pinned_scramble() {
    let mut state = CubeState::solved();
    state.apply_all(&parse_moves(PINNED_SCRAMBLE).unwrap());

    let solution = solve(&state).unwrap();
    assert_eq!(solution.len(), 190);
    assert_eq!(
        format_moves(&solution.moves().collect_vec()),
        format_moves(&parse_moves(PINNED_SOLUTION).unwrap())
    );

    let phase_lengths = solution.steps().iter().fold(Vec::new(), |mut lengths, step| {
        if step.message.is_some() {
            lengths.push(0);
        }
        if let Some(last) = lengths.last_mut() {
            *last += 1;
        }
        lengths
    });
    assert_eq!(phase_lengths, [21, 32, 57, 6, 27, 25, 22]);

    let mut replay = state.clone();
    replay.apply_all(&solution.moves().collect_vec());
    assert!(replay.is_solved());
}

#[test_log::test]
fn solutions_are_already_refined() {
    for seed in 500..510 {
        let (state, _) = scrambled(seed);
        let solution = solve(&state).unwrap();
        let moves = solution.moves().collect_vec();
        // Refining each phase separately leaves seams a whole-list pass can
        // still shorten, but never lengthen
        assert!(refine(&moves).len() <= moves.len());
    }
}

#[test_log::test]
fn refinement_is_optional() {
    let (state, _) = scrambled(77);
    let raw = Solver::new(SolverConfig {
        refine: false,
        ..SolverConfig::default()
    })
    .solve(&state)
    .unwrap();
    let refined = solve(&state).unwrap();
    assert!(refined.len() <= raw.len());

    let mut replay = state.clone();
    replay.apply_all(&raw.moves().collect_vec());
    assert!(replay.is_solved());
}

#[test_log::test]
fn solves_reconstructed_cubes() {
    let mut state = CubeState::solved();
    state.apply_all(&parse_moves("D2 F' L U2 B R' D L2 F2 U' R2 B' D R U F2").unwrap());
    let facelets = state.to_facelets();
    let reconstructed = CubeState::from_facelets(&facelets).unwrap();
    let solution = solve(&reconstructed).unwrap();
    info!("{facelets}: {solution}");

    let mut replay = reconstructed;
    replay.apply_all(&solution.moves().collect_vec());
    assert!(replay.is_solved());
}

#[test_log::test]
fn illegal_reconstruction_is_rejected() {
    let mut facelets = CubeState::solved().to_facelets().chars().collect_vec();
    // Twist the UFR corner
    let (u, r, f) = (facelets[8], facelets[9], facelets[20]);
    facelets[8] = f;
    facelets[9] = u;
    facelets[20] = r;
    let facelets = facelets.into_iter().collect::<String>();
    assert!(CubeState::from_facelets(&facelets).is_err());

    // Swap the R and F stickers of UFR: a mirror image of a real corner
    let mut mirrored = CubeState::solved().to_facelets().chars().collect_vec();
    mirrored.swap(9, 20);
    let mirrored = mirrored.into_iter().collect::<String>();
    assert!(matches!(
        CubeState::from_facelets(&mirrored),
        Err(InvalidConfiguration::MirroredCorner { .. })
    ));

    let mut cells = *CubeState::solved().cells();
    cells.swap(2, 8);
    let state = CubeState::from_cells_unchecked(cells);
    let error = solve(&state).unwrap_err();
    assert!(matches!(error, SolveError::InvalidConfiguration(_)));
    assert!(error.to_string().starts_with("Could not generate a solution"));
}

#[test_log::test]
fn statistics_record_round_trips_through_toml() {
    let (state, _) = scrambled(9);
    let solution = solve(&state).unwrap();
    let record = SolveRecord::new(&state, &solution, std::time::Duration::from_millis(3));
    let text = toml::to_string(&record).unwrap();
    let parsed: SolveRecord = toml::from_str(&text).unwrap();
    assert_eq!(parsed, record);
    assert_eq!(parsed.move_count, parsed.moves.split_whitespace().count());
}

#[test_log::test]
fn config_from_toml() {
    let config: SolverConfig = toml::from_str(
        r"
        refine = false

        [limits]
        edge_permutation = 4
        ",
    )
    .unwrap();
    assert!(!config.refine);
    assert!(config.validate);
    assert_eq!(config.limits.edge_permutation, 4);
    assert_eq!(config.limits.corner_orientation, 50);

    let empty: SolverConfig = toml::from_str("").unwrap();
    assert_eq!(empty, SolverConfig::default());

    assert!(toml::from_str::<SolverConfig>("refin = true").is_err());
}

#[test_log::test]
fn phases_are_named() {
    assert_eq!(Phase::ALL.len(), 7);
    assert_eq!(Phase::Cross.to_string(), "cross");
    let moves = parse_moves("R U R' U'").unwrap();
    assert_eq!(format_moves(&moves), "R U R' U'");
}
