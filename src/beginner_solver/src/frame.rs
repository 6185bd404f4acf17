use cube_core::{Face, Move, Vector};

/// A way of holding the cube: which face is up and which faces the solver.
/// Algorithms written in standard notation are translated through a frame
/// before being applied, so `R` means "the face on the right of this frame".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    up: Face,
    front: Face,
    right: Face,
}

impl Frame {
    /// # Panics
    ///
    /// If `up` and `front` are not perpendicular.
    #[must_use]
    pub fn new(up: Face, front: Face) -> Frame {
        let right = up.axis_vector().cross(front.axis_vector());
        let Some(right) = Face::from_axis_vector(right) else {
            panic!("{up} and {front} are not perpendicular");
        };
        Frame { up, front, right }
    }

    /// The four frames with `up` on top, each one a quarter turn from the
    /// last.
    pub fn around(up: Face) -> impl Iterator<Item = Frame> {
        let first = Face::ALL
            .into_iter()
            .find(|face| face.axis() != up.axis())
            .unwrap_or(Face::F);
        std::iter::successors(Some(Frame::new(up, first)), move |frame| {
            Some(Frame::new(up, frame.resolve(Face::L)))
        })
        .take(4)
    }

    /// The frame with `up` on top that puts the cell `relative` at
    /// `absolute`, if there is one.
    #[must_use]
    pub fn locate(up: Face, relative: Vector, absolute: Vector) -> Option<Frame> {
        Frame::around(up).find(|frame| frame.position(relative) == absolute)
    }

    #[must_use]
    pub fn up(self) -> Face {
        self.up
    }

    #[must_use]
    pub fn front(self) -> Face {
        self.front
    }

    #[must_use]
    pub fn right(self) -> Face {
        self.right
    }

    /// The absolute face that plays the part of `relative`.
    #[must_use]
    pub fn resolve(self, relative: Face) -> Face {
        match relative {
            Face::U => self.up,
            Face::D => self.up.opposite(),
            Face::F => self.front,
            Face::B => self.front.opposite(),
            Face::R => self.right,
            Face::L => self.right.opposite(),
        }
    }

    /// The absolute cell for a cell given in this frame's coordinates.
    #[must_use]
    pub fn position(self, relative: Vector) -> Vector {
        self.right.axis_vector() * relative.x()
            + self.up.axis_vector() * relative.y()
            + self.front.axis_vector() * relative.z()
    }

    #[must_use]
    pub fn translate(self, algorithm: &[Move]) -> Vec<Move> {
        algorithm
            .iter()
            .map(|move_| Move::new(self.resolve(move_.face), move_.reverse))
            .collect()
    }
}

/// The face a unit vector points out of.
///
/// # Panics
///
/// If `direction` is not one of the six face axes.
pub(crate) fn face_towards(direction: Vector) -> Face {
    Face::from_axis_vector(direction)
        .unwrap_or_else(|| panic!("{direction:?} does not point out of a face"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{CubeState, parse_moves};

    #[test]
    fn standard_frame_is_identity() {
        let frame = Frame::new(Face::U, Face::F);
        assert_eq!(frame.right(), Face::R);
        for face in Face::ALL {
            assert_eq!(frame.resolve(face), face);
        }
        for cell in Vector::grid() {
            assert_eq!(frame.position(cell), cell);
        }
    }

    #[test]
    fn upside_down() {
        let frame = Frame::new(Face::D, Face::F);
        assert_eq!(frame.right(), Face::L);
        assert_eq!(frame.resolve(Face::B), Face::B);
        assert_eq!(frame.position(Vector::new(1, 1, 1)), Vector::new(-1, -1, 1));
    }

    #[test]
    fn around_visits_every_side() {
        let fronts = Frame::around(Face::U).map(Frame::front).collect::<Vec<_>>();
        assert_eq!(fronts, vec![Face::L, Face::B, Face::R, Face::F]);
        let fronts = Frame::around(Face::D).map(Frame::front).collect::<Vec<_>>();
        assert_eq!(fronts.len(), 4);
        assert!(fronts.iter().all(|front| front.axis() != Face::D.axis()));
    }

    #[test]
    fn translated_algorithms_act_like_rotated_cubes() {
        // Sexy move from every frame has order six
        let moves = parse_moves("R U R' U'").unwrap();
        for up in Face::ALL {
            for frame in Frame::around(up) {
                let mut state = CubeState::solved();
                for i in 1..=6 {
                    state.apply_all(&frame.translate(&moves));
                    assert_eq!(state.is_solved(), i == 6);
                }
                // R of this frame moves the cell at UFR of this frame to UBR
                let corner = frame.position(Vector::new(1, 1, 1));
                let r = frame.translate(&parse_moves("R").unwrap())[0];
                assert_eq!(
                    corner.rotated(r.axis(), r.reverse),
                    frame.position(Vector::new(1, 1, -1))
                );
            }
        }
    }

    #[test]
    fn locate_finds_the_slot() {
        let target = Vector::new(-1, 1, -1);
        let frame = Frame::locate(Face::U, Vector::new(1, 1, 1), target).unwrap();
        assert_eq!(frame.position(Vector::new(1, 1, 1)), target);
        assert_eq!(frame.front(), Face::B);
    }
}
