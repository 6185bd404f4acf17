use cube_core::{
    Axis, CubeState, CubieId, CubieKind, DEFAULT_SCRAMBLE_LENGTH, Face, InvalidConfiguration,
    Move, format_moves, parse_moves, scramble,
};
use itertools::Itertools;
use log::info;

fn scrambled(seed: u64) -> CubeState {
    let mut state = CubeState::solved();
    scramble(&mut state, DEFAULT_SCRAMBLE_LENGTH, seed);
    state
}

#[test_log::test]
fn order_four_from_random_states() {
    for seed in 0..10 {
        let start = scrambled(seed);
        for move_ in Move::all() {
            let mut state = start.clone();
            for _ in 0..4 {
                state.apply(move_);
            }
            assert_eq!(state, start, "seed {seed}, {move_}");
        }
    }
}

#[test_log::test]
fn move_then_reversal_is_identity() {
    let start = scrambled(99);
    for move_ in Move::all() {
        let mut state = start.clone();
        state.apply(move_);
        assert_ne!(state, start);
        state.apply(move_.reversal());
        assert_eq!(state, start);
    }
}

#[test_log::test]
fn cubies_stay_a_bijection() {
    let mut state = CubeState::solved();
    let mut rng = fastrand::Rng::with_seed(5);
    let all = Move::all().collect_vec();
    for _ in 0..1000 {
        state.apply(all[rng.usize(..all.len())]);
        let ids = state.iter().map(|(_, cell)| cell.cubie).sorted().collect_vec();
        assert_eq!(ids, (1..=27).filter_map(CubieId::new).collect_vec());
        for (position, cell) in state.iter() {
            assert_eq!(cell.cubie.home().nonzero_count(), position.nonzero_count());
            for physical in Axis::ALL {
                let original = cell.orientation.original_along(physical);
                assert_eq!(
                    position.component(physical) == 0,
                    cell.cubie.home().component(original) == 0
                );
            }
        }
    }
}

#[test_log::test]
fn scrambles_survive_the_facelet_codec() {
    for seed in 0..20 {
        let state = scrambled(seed);
        let facelets = state.to_facelets();
        assert_eq!(facelets.len(), 54);
        for face in Face::ALL {
            assert_eq!(facelets.chars().filter(|c| *c == face.letter()).count(), 9);
        }
        assert_eq!(CubeState::from_facelets(&facelets), Ok(state));
    }
}

#[test_log::test]
fn every_corner_and_edge_has_stickers_on_its_faces() {
    let state = scrambled(3);
    for (position, cell) in state.iter() {
        if !matches!(cell.cubie.kind(), CubieKind::Corner | CubieKind::Edge) {
            continue;
        }
        let home = cell.cubie.home();
        let homes = Face::ALL
            .into_iter()
            .filter(|face| home.component(face.axis()) == face.sign())
            .collect_vec();
        let facing = homes
            .iter()
            .map(|face| state.facing(cell.cubie, *face).unwrap())
            .collect_vec();
        for (original, now) in homes.iter().zip(&facing) {
            assert_eq!(position.component(now.axis()), now.sign());
            assert_eq!(state.sticker(position, *now), *original);
        }
    }
}

#[test_log::test]
fn detects_illegal_reconstructions() {
    let state = scrambled(11);
    let facelets = state.to_facelets().chars().collect_vec();

    // Swap two stickers of the edge at UF: a single flipped edge
    let mut flipped = facelets.clone();
    flipped.swap(7, 19);
    let flipped = flipped.into_iter().collect::<String>();
    let result = CubeState::from_facelets(&flipped);
    info!("Flipped edge: {result:?}");
    assert!(result.is_err());

    // Swapping two centers breaks the layout outright
    let mut centers = facelets.clone();
    centers.swap(4, 13);
    let centers = centers.into_iter().collect::<String>();
    assert!(matches!(
        CubeState::from_facelets(&centers),
        Err(InvalidConfiguration::WrongCenter { .. })
    ));
}

#[test_log::test]
fn known_sequence_orders() {
    for (sequence, order) in [("R", 4), ("R U", 105), ("R U R' U'", 6), ("R2 U2", 6)] {
        let moves = parse_moves(sequence).unwrap();
        let mut state = CubeState::solved();
        let mut count = 0;
        loop {
            state.apply_all(&moves);
            count += 1;
            if state.is_solved() {
                break;
            }
        }
        assert_eq!(count, order, "{}", format_moves(&moves));
    }
}
