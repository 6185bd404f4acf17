use std::fmt::Debug;

use log::trace;

use crate::{Axis, Face, Move, Vector};

/// Stable identity of one of the 27 cubies. The id encodes the cell the
/// cubie occupies in the solved state: `9(x+1) + 3(y+1) + (z+1) + 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubieKind {
    Corner,
    Edge,
    Center,
    Core,
}

impl CubieId {
    /// The six face centers and the core. They never leave their cell.
    pub const FIXED: [CubieId; 7] = [
        CubieId(5),
        CubieId(11),
        CubieId(13),
        CubieId(14),
        CubieId(15),
        CubieId(17),
        CubieId(23),
    ];

    #[must_use]
    pub fn new(id: u8) -> Option<CubieId> {
        (1..=27).contains(&id).then_some(CubieId(id))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The cubie that occupies `position` when the cube is solved.
    ///
    /// # Panics
    ///
    /// If `position` is not a grid cell.
    #[must_use]
    pub fn from_home(position: Vector) -> CubieId {
        // A grid index is at most 26
        CubieId(u8::try_from(position.grid_index()).unwrap_or(u8::MAX) + 1)
    }

    #[must_use]
    pub fn home(self) -> Vector {
        let index = self.0 - 1;
        let coordinate = |digit: u8| i8::try_from(digit).unwrap_or(i8::MAX) - 1;
        Vector::new(
            coordinate(index / 9),
            coordinate(index / 3 % 3),
            coordinate(index % 3),
        )
    }

    #[must_use]
    pub fn kind(self) -> CubieKind {
        match self.home().nonzero_count() {
            3 => CubieKind::Corner,
            2 => CubieKind::Edge,
            1 => CubieKind::Center,
            _ => CubieKind::Core,
        }
    }

    #[must_use]
    pub fn is_fixed(self) -> bool {
        CubieId::FIXED.contains(&self)
    }

    /// The cubie whose solved cell is the meeting point of `faces`.
    #[must_use]
    pub fn between(faces: &[Face]) -> CubieId {
        CubieId::from_home(
            faces
                .iter()
                .fold(Vector::ZERO, |acc, face| acc + face.axis_vector()),
        )
    }
}

impl Debug for CubieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which original axis of a cubie currently lies along each physical axis.
///
/// `self.0[k]` is the label of the cubie's original axis that now points
/// along physical axis `k`. The sign of each sticker follows from the
/// cubie's position, so the permutation alone is enough.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation([Axis; 3]);

impl Orientation {
    pub const IDENTITY: Orientation = Orientation([Axis::X, Axis::Y, Axis::Z]);

    /// Build an orientation key from the original axis along each physical
    /// axis. Returns `None` unless `labels` is a permutation.
    #[must_use]
    pub fn from_labels(labels: [Axis; 3]) -> Option<Orientation> {
        let is_permutation = Axis::ALL.iter().all(|axis| labels.contains(axis));
        is_permutation.then_some(Orientation(labels))
    }

    #[must_use]
    pub fn labels(self) -> [Axis; 3] {
        self.0
    }

    /// The original axis that now lies along `physical`.
    #[must_use]
    pub fn original_along(self, physical: Axis) -> Axis {
        self.0[physical as usize]
    }

    /// The physical axis that the original axis `original` now lies along.
    #[must_use]
    pub fn physical_of(self, original: Axis) -> Axis {
        Axis::ALL
            .into_iter()
            .find(|physical| self.0[*physical as usize] == original)
            .unwrap_or(original)
    }

    /// `true` when the labels are an even permutation of X, Y, Z.
    #[must_use]
    pub fn is_even(self) -> bool {
        let [a, b, c] = self.0;
        let inversions = [(a, b), (a, c), (b, c)]
            .into_iter()
            .filter(|(first, second)| first > second)
            .count();
        inversions % 2 == 0
    }

    /// Exchange the labels in two slots.
    #[must_use]
    pub fn swap(mut self, a: Axis, b: Axis) -> Orientation {
        self.0.swap(a as usize, b as usize);
        self
    }

    /// The orientation after a quarter turn about `axis`, in either direction.
    #[must_use]
    pub fn turned(self, axis: Axis) -> Orientation {
        let (a, b) = axis.perpendicular_pair();
        self.swap(a, b)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::IDENTITY
    }
}

impl Debug for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:?}{b:?}{c:?}")
    }
}

/// The content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub cubie: CubieId,
    pub orientation: Orientation,
}

/// The 3×3×3 grid. Cells are stored in x-major order so that the cell at
/// index `i` holds cubie `i + 1` when solved.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    cells: [Cell; 27],
}

/// The nine cells a move touches and what they held before the move.
#[derive(Debug, Clone)]
pub struct RotationPlan {
    move_: Move,
    affected: [(Vector, Cell); 9],
}

impl RotationPlan {
    #[must_use]
    pub fn move_(&self) -> Move {
        self.move_
    }

    #[must_use]
    pub fn affected(&self) -> &[(Vector, Cell); 9] {
        &self.affected
    }
}

impl CubeState {
    #[must_use]
    pub fn solved() -> CubeState {
        CubeState {
            cells: std::array::from_fn(|i| Cell {
                cubie: CubieId(u8::try_from(i).unwrap_or(u8::MAX) + 1),
                orientation: Orientation::IDENTITY,
            }),
        }
    }

    /// Wrap raw cells without checking anything. Use
    /// [`CubeState::validate`] before trusting the result.
    #[must_use]
    pub fn from_cells_unchecked(cells: [Cell; 27]) -> CubeState {
        CubeState { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; 27] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, position: Vector) -> Cell {
        self.cells[position.grid_index()]
    }

    /// Iterate over every cell together with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Vector, Cell)> + '_ {
        Vector::grid().zip(self.cells.iter().copied())
    }

    /// Where `cubie` currently sits.
    ///
    /// # Panics
    ///
    /// If the grid does not contain `cubie`, which cannot happen for a state
    /// built from moves.
    #[must_use]
    pub fn position_of(&self, cubie: CubieId) -> Vector {
        self.iter()
            .find(|(_, cell)| cell.cubie == cubie)
            .map(|(position, _)| position)
            .unwrap_or_else(|| panic!("cubie {cubie:?} is missing from the grid"))
    }

    /// The direction that the sticker which faced `original` in the solved
    /// state faces now, or `None` if `cubie` has no sticker on that face.
    #[must_use]
    pub fn facing(&self, cubie: CubieId, original: Face) -> Option<Face> {
        if cubie.home().component(original.axis()) != original.sign() {
            return None;
        }
        let position = self.position_of(cubie);
        let orientation = self.cell(position).orientation;
        let physical = orientation.physical_of(original.axis());
        Face::from_axis_vector(physical.unit() * position.component(physical))
    }

    /// The color, named by its solved face, showing at `position` on the side
    /// pointing towards `side`.
    ///
    /// # Panics
    ///
    /// If there is no sticker there, meaning `position` is not on `side`.
    #[must_use]
    pub fn sticker(&self, position: Vector, side: Face) -> Face {
        assert_eq!(
            position.component(side.axis()),
            side.sign(),
            "{position:?} is not on face {side}"
        );
        let cell = self.cell(position);
        let original = cell.orientation.original_along(side.axis());
        let home = cell.cubie.home();
        Face::from_axis_vector(original.unit() * home.component(original)).unwrap_or_else(|| {
            panic!("cubie {:?} has no sticker along {original:?}", cell.cubie)
        })
    }

    /// Compute which cells `move_` touches, without changing anything.
    ///
    /// # Panics
    ///
    /// If the layer does not have exactly nine cells, which would mean the
    /// axis is not one of the six face axes.
    #[must_use]
    pub fn rotation_info(&self, move_: Move) -> RotationPlan {
        let axis = move_.axis();
        let mut affected = [(Vector::ZERO, self.cells[0]); 9];
        let mut count = 0;
        for (position, cell) in self.iter().filter(|(position, _)| position.dot(axis) > 0) {
            affected[count] = (position, cell);
            count += 1;
        }
        assert_eq!(count, 9, "the layer for {move_} has {count} cells");
        RotationPlan { move_, affected }
    }

    /// Carry out a plan computed by [`CubeState::rotation_info`] on this
    /// state. The face center stays where it is with its key untouched.
    ///
    /// # Panics
    ///
    /// If the cells of the plan no longer hold what they held when it was
    /// computed, meaning the plan came from another state or is stale.
    pub fn rotate(&mut self, plan: &RotationPlan) {
        assert!(
            plan.affected
                .iter()
                .all(|(position, cell)| self.cell(*position) == *cell),
            "the plan for {} was computed on a different state",
            plan.move_
        );
        let axis = plan.move_.axis();
        let face_axis = plan.move_.face.axis();
        for (position, cell) in plan.affected {
            if cell.cubie.is_fixed() {
                continue;
            }
            let destination = position.rotated(axis, plan.move_.reverse);
            self.cells[destination.grid_index()] = Cell {
                cubie: cell.cubie,
                orientation: cell.orientation.turned(face_axis),
            };
        }
    }

    pub fn apply(&mut self, move_: Move) {
        let plan = self.rotation_info(move_);
        self.rotate(&plan);
    }

    pub fn apply_all<'a>(&mut self, moves: impl IntoIterator<Item = &'a Move>) {
        for move_ in moves {
            trace!("Applying {move_}");
            self.apply(*move_);
        }
    }

    /// Every face shows a single color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let colors = self.face_colors(face);
            colors.iter().flatten().all(|color| *color == colors[1][1])
        })
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved()
    }
}

impl Debug for CubeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CubeState").field(&self.to_facelets()).finish()
    }
}
