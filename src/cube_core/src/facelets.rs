//! Conversion between [`CubeState`] and the 54-sticker facelet string, plus
//! the legality checks that a reconstructed configuration has to pass.
//!
//! The facelet string lists the faces in the order U, R, F, D, L, B with nine
//! stickers each, row by row as seen from outside the face. U is seen with B
//! at the top, D with F at the top and the four side faces with U at the top.
//! Each sticker is written as the letter of the face whose center has its
//! color.

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::{Axis, Cell, CubeState, CubieId, CubieKind, Face, Orientation, Vector};

/// Face order of the facelet string with, for each face, the direction in
/// which rows advance and the direction in which columns advance.
const FACELET_LAYOUT: [(Face, Vector, Vector); 6] = [
    (Face::U, Vector::new(0, 0, 1), Vector::new(1, 0, 0)),
    (Face::R, Vector::new(0, -1, 0), Vector::new(0, 0, -1)),
    (Face::F, Vector::new(0, -1, 0), Vector::new(1, 0, 0)),
    (Face::D, Vector::new(0, 0, -1), Vector::new(1, 0, 0)),
    (Face::L, Vector::new(0, -1, 0), Vector::new(0, 0, 1)),
    (Face::B, Vector::new(0, -1, 0), Vector::new(-1, 0, 0)),
];

pub const FACELET_COUNT: usize = 54;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("Expected 54 facelets but got {0}")]
    FaceletCount(usize),
    #[error("Unknown color `{0}`; colors are written as face letters")]
    UnknownColor(char),
    #[error("The center of face {face} shows {color} instead of {face}")]
    WrongCenter { face: Face, color: Face },
    #[error("The cubie at {position:?} shows two stickers of the same axis")]
    ImpossibleCubie { position: Vector },
    #[error("The cubie {cubie:?} appears more than once")]
    DuplicateCubie { cubie: CubieId },
    #[error("The cubie at {position:?} does not belong in a cell of that kind")]
    WrongKind { position: Vector },
    #[error("The orientation key of the cubie at {position:?} contradicts its stickers")]
    InconsistentOrientation { position: Vector },
    #[error("The corner at {position:?} is a mirror image of a real corner")]
    MirroredCorner { position: Vector },
    #[error("The corners are twisted by {0} thirds of a turn in total")]
    CornerTwist(u8),
    #[error("A single edge is flipped")]
    EdgeFlip,
    #[error("The corner and edge permutations have different parity")]
    PermutationParity,
}

impl CubeState {
    /// The nine stickers of `face` as seen from outside.
    #[must_use]
    pub fn face_colors(&self, face: Face) -> [[Face; 3]; 3] {
        let (_, row, column) = FACELET_LAYOUT
            .iter()
            .find(|(f, _, _)| *f == face)
            .copied()
            .unwrap_or(FACELET_LAYOUT[0]);
        std::array::from_fn(|r| {
            std::array::from_fn(|c| {
                let position = face_cell(face, row, column, r, c);
                self.sticker(position, face)
            })
        })
    }

    /// The state as a 54-character facelet string.
    #[must_use]
    pub fn to_facelets(&self) -> String {
        FACELET_LAYOUT
            .iter()
            .flat_map(|(face, _, _)| self.face_colors(*face).into_iter().flatten())
            .map(Face::letter)
            .collect()
    }

    /// Reconstruct a state from a facelet string and check that it could be
    /// reached from the solved cube by quarter turns.
    ///
    /// # Errors
    ///
    /// If the string is malformed or describes an illegal cube.
    pub fn from_facelets(facelets: &str) -> Result<CubeState, InvalidConfiguration> {
        let colors = facelets
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Face::from_letter(c).ok_or(InvalidConfiguration::UnknownColor(c)))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.len() != FACELET_COUNT {
            return Err(InvalidConfiguration::FaceletCount(colors.len()));
        }

        // The color facing outwards along each axis, per cell
        let mut seen: [[Option<Face>; 3]; 27] = [[None; 3]; 27];
        for ((face, row, column), stickers) in FACELET_LAYOUT.iter().zip(colors.chunks_exact(9)) {
            for (i, color) in stickers.iter().enumerate() {
                let position = face_cell(*face, *row, *column, i / 3, i % 3);
                seen[position.grid_index()][face.axis() as usize] = Some(*color);
            }
            if stickers[4] != *face {
                return Err(InvalidConfiguration::WrongCenter {
                    face: *face,
                    color: stickers[4],
                });
            }
        }

        let cells = Vector::grid()
            .map(|position| cell_from_stickers(position, seen[position.grid_index()]))
            .collect::<Result<Vec<_>, _>>()?;
        let cells: [Cell; 27] = cells
            .try_into()
            .unwrap_or_else(|_| unreachable!("the grid has 27 cells"));

        let state = CubeState::from_cells_unchecked(cells);
        state.validate()?;
        Ok(state)
    }

    /// Check the invariants every state reachable by quarter turns satisfies:
    /// the structural ones of [`CubeState::check_structure`], no mirrored
    /// corner, corner twist and edge flip summing to zero and equal parity of
    /// both permutations.
    ///
    /// # Errors
    ///
    /// The first violated invariant.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.check_structure()?;

        // A turned corner keeps its handedness: every quarter turn swaps two
        // labels and flips the sign of one coordinate.
        let mirrored = self.iter().find(|(position, cell)| {
            cell.cubie.kind() == CubieKind::Corner
                && cell.orientation.is_even()
                    != (corner_sign(*position) == corner_sign(cell.cubie.home()))
        });
        if let Some((position, _)) = mirrored {
            return Err(InvalidConfiguration::MirroredCorner { position });
        }

        let twist = self
            .iter()
            .filter(|(_, cell)| cell.cubie.kind() == CubieKind::Corner)
            .map(|(position, cell)| corner_twist(position, cell))
            .sum::<u8>()
            % 3;
        if twist != 0 {
            return Err(InvalidConfiguration::CornerTwist(twist));
        }

        let flips = self
            .iter()
            .filter(|(_, cell)| cell.cubie.kind() == CubieKind::Edge)
            .filter(|(position, cell)| edge_flipped(*position, cell))
            .count();
        if flips % 2 != 0 {
            return Err(InvalidConfiguration::EdgeFlip);
        }

        if self.permutation_parity(CubieKind::Corner) != self.permutation_parity(CubieKind::Edge) {
            return Err(InvalidConfiguration::PermutationParity);
        }

        debug!("Configuration is valid");
        Ok(())
    }

    /// Check what every query on the grid relies on: the cubies form a
    /// bijection onto the cells, each cubie sits in a cell of its own kind,
    /// the centers and core are home and every orientation key agrees with
    /// which sides of its cell carry stickers.
    ///
    /// # Errors
    ///
    /// The first violated invariant.
    pub fn check_structure(&self) -> Result<(), InvalidConfiguration> {
        let mut seen = [false; 27];
        for (position, cell) in self.iter() {
            let slot = &mut seen[usize::from(cell.cubie.get() - 1)];
            if *slot {
                return Err(InvalidConfiguration::DuplicateCubie { cubie: cell.cubie });
            }
            *slot = true;

            let home = cell.cubie.home();
            if home.nonzero_count() != position.nonzero_count() {
                return Err(InvalidConfiguration::WrongKind { position });
            }
            if cell.cubie.is_fixed() && home != position {
                return Err(InvalidConfiguration::WrongKind { position });
            }
            let consistent = Axis::ALL.into_iter().all(|physical| {
                let original = cell.orientation.original_along(physical);
                (position.component(physical) == 0) == (home.component(original) == 0)
            });
            if !consistent {
                return Err(InvalidConfiguration::InconsistentOrientation { position });
            }
        }
        Ok(())
    }

    /// `true` when the cubies of `kind` are an odd permutation of their cells.
    fn permutation_parity(&self, kind: CubieKind) -> bool {
        let slots = Vector::grid()
            .filter(|position| CubieId::from_home(*position).kind() == kind)
            .collect_vec();
        let mapping = slots
            .iter()
            .map(|position| {
                let home = self.cell(*position).cubie.home();
                slots.iter().position(|slot| *slot == home).unwrap_or(0)
            })
            .collect_vec();

        let mut visited = vec![false; mapping.len()];
        let mut cycles = 0;
        for start in 0..mapping.len() {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = mapping[i];
            }
        }
        (mapping.len() - cycles) % 2 == 1
    }
}

fn face_cell(face: Face, row: Vector, column: Vector, r: usize, c: usize) -> Vector {
    let offset = |i: usize| i8::try_from(i).unwrap_or(i8::MAX) - 1;
    face.axis_vector() + row * offset(r) + column * offset(c)
}

/// Identify the cubie at `position` and its orientation key from the colors
/// seen along each axis.
fn cell_from_stickers(
    position: Vector,
    colors: [Option<Face>; 3],
) -> Result<Cell, InvalidConfiguration> {
    if position.nonzero_count() <= 1 {
        // Centers were checked against the layout; the core shows nothing
        return Ok(Cell {
            cubie: CubieId::from_home(position),
            orientation: Orientation::IDENTITY,
        });
    }

    let mut home = Vector::ZERO;
    let mut labels = [None; 3];
    for physical in Axis::ALL {
        let Some(color) = colors[physical as usize] else {
            continue;
        };
        if labels.contains(&Some(color.axis())) {
            return Err(InvalidConfiguration::ImpossibleCubie { position });
        }
        labels[physical as usize] = Some(color.axis());
        home += color.axis_vector();
    }

    // An edge has one bare axis, which must map to the one unused label
    let unused = Axis::ALL
        .into_iter()
        .filter(|axis| !labels.contains(&Some(*axis)))
        .collect_vec();
    for (slot, axis) in labels.iter_mut().filter(|slot| slot.is_none()).zip(unused) {
        *slot = Some(axis);
    }
    let orientation = Orientation::from_labels(labels.map(|label| label.unwrap_or(Axis::X)))
        .ok_or(InvalidConfiguration::ImpossibleCubie { position })?;

    Ok(Cell {
        cubie: CubieId::from_home(home),
        orientation,
    })
}

fn corner_sign(position: Vector) -> i8 {
    position.x() * position.y() * position.z()
}

/// Twist of the corner at `position`, in thirds of a clockwise turn: how far
/// its U/D sticker is from facing U or D.
fn corner_twist(position: Vector, cell: Cell) -> u8 {
    let physical = cell.orientation.physical_of(Axis::Y);
    match (physical, corner_sign(position) > 0) {
        (Axis::Y, _) => 0,
        (Axis::X, true) | (Axis::Z, false) => 1,
        (Axis::X, false) | (Axis::Z, true) => 2,
    }
}

/// An edge is flipped when its reference sticker (U/D if it has one,
/// otherwise F/B) is not on the reference side of its cell.
fn edge_flipped(position: Vector, cell: &Cell) -> bool {
    let reference = |v: Vector| if v.y() == 0 { Axis::Z } else { Axis::Y };
    cell.orientation.original_along(reference(position)) != reference(cell.cubie.home())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, parse_moves};

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn solved_facelets() {
        assert_eq!(CubeState::solved().to_facelets(), SOLVED);
        assert_eq!(CubeState::from_facelets(SOLVED), Ok(CubeState::solved()));
    }

    #[test]
    fn single_turns_match_known_facelets() {
        let mut state = CubeState::solved();
        state.apply(Move::clockwise(Face::U));
        assert_eq!(
            state.to_facelets(),
            "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB"
        );

        let mut state = CubeState::solved();
        state.apply(Move::clockwise(Face::R));
        assert_eq!(
            state.to_facelets(),
            "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"
        );
    }

    #[test]
    fn reconstructs_scrambled_states() {
        let mut state = CubeState::solved();
        state.apply_all(&parse_moves("U2 R2 L D2 L F2 B2 U' D' F U R' L2 U2 D L F' B2 D R2").unwrap());
        let facelets = state.to_facelets();
        let rebuilt = CubeState::from_facelets(&facelets).unwrap();
        assert_eq!(rebuilt.to_facelets(), facelets);
        assert_eq!(rebuilt, state);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            CubeState::from_facelets("UUU"),
            Err(InvalidConfiguration::FaceletCount(3))
        );
        assert_eq!(
            CubeState::from_facelets(&SOLVED.replace('B', "Q")),
            Err(InvalidConfiguration::UnknownColor('Q'))
        );

        // Swap the U and F stickers of the UF edge
        let mut flipped = SOLVED.chars().collect_vec();
        flipped.swap(7, 19);
        let flipped = flipped.into_iter().collect::<String>();
        assert_eq!(
            CubeState::from_facelets(&flipped),
            Err(InvalidConfiguration::EdgeFlip)
        );

        // Rotate the stickers of the UFR corner
        let mut twisted = SOLVED.chars().collect_vec();
        let (u, r, f) = (8, 9, 20);
        let (cu, cr, cf) = (twisted[u], twisted[r], twisted[f]);
        twisted[u] = cf;
        twisted[r] = cu;
        twisted[f] = cr;
        let twisted = twisted.into_iter().collect::<String>();
        assert!(matches!(
            CubeState::from_facelets(&twisted),
            Err(InvalidConfiguration::CornerTwist(_))
        ));
    }

    #[test]
    fn rejects_mirrored_corners() {
        // Swap the R and F stickers of the UFR corner, leaving U on top
        let mut mirrored = SOLVED.chars().collect_vec();
        mirrored.swap(9, 20);
        let mirrored = mirrored.into_iter().collect::<String>();
        assert_eq!(
            CubeState::from_facelets(&mirrored),
            Err(InvalidConfiguration::MirroredCorner {
                position: Vector::new(1, 1, 1)
            })
        );

        // The same corner in a scrambled cube
        let mut state = CubeState::solved();
        state.apply_all(&parse_moves("R U F' L2 D B").unwrap());
        let ufr = Vector::new(1, 1, 1);
        let mut cells = *state.cells();
        let cell = &mut cells[ufr.grid_index()];
        let [a, b, c] = cell.orientation.labels();
        cell.orientation = Orientation::from_labels([c, b, a]).unwrap();
        assert_eq!(
            CubeState::from_cells_unchecked(cells).validate(),
            Err(InvalidConfiguration::MirroredCorner { position: ufr })
        );
    }

    #[test]
    fn scrambled_corners_keep_their_handedness() {
        let mut state = CubeState::solved();
        for move_ in parse_moves("R U F' L2 D B R' U2 F L' D2 B'").unwrap() {
            state.apply(move_);
            assert_eq!(state.validate(), Ok(()), "after {move_}");
        }
    }

    #[test]
    fn rejects_single_swaps() {
        // Exchange the UF and UR edges as whole pieces
        let uf = Vector::new(0, 1, 1);
        let ur = Vector::new(1, 1, 0);
        let mut cells = *CubeState::solved().cells();
        let a = cells[uf.grid_index()];
        let b = cells[ur.grid_index()];
        cells[uf.grid_index()] = Cell {
            cubie: b.cubie,
            orientation: Orientation::IDENTITY.swap(Axis::X, Axis::Z),
        };
        cells[ur.grid_index()] = Cell {
            cubie: a.cubie,
            orientation: Orientation::IDENTITY.swap(Axis::X, Axis::Z),
        };
        let state = CubeState::from_cells_unchecked(cells);
        assert_eq!(state.validate(), Err(InvalidConfiguration::PermutationParity));
    }

    #[test]
    fn rejects_duplicates() {
        let mut cells = *CubeState::solved().cells();
        cells[0] = cells[2];
        assert!(matches!(
            CubeState::from_cells_unchecked(cells).validate(),
            Err(InvalidConfiguration::DuplicateCubie { .. })
        ));
    }
}
