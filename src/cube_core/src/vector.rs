//! Integer 3-vectors used as grid positions and face axes.
//!
//! Every coordinate the cube ever produces lies in {-1, 0, 1}, so the vector
//! type is exact: there is no epsilon anywhere in the rotation math.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use itertools::iproduct;

use crate::Axis;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector([i8; 3]);

impl Vector {
    pub const ZERO: Vector = Vector([0, 0, 0]);
    pub const X: Vector = Vector([1, 0, 0]);
    pub const Y: Vector = Vector([0, 1, 0]);
    pub const Z: Vector = Vector([0, 0, 1]);

    #[must_use]
    pub const fn new(x: i8, y: i8, z: i8) -> Vector {
        Vector([x, y, z])
    }

    #[must_use]
    pub fn x(self) -> i8 {
        self.0[0]
    }

    #[must_use]
    pub fn y(self) -> i8 {
        self.0[1]
    }

    #[must_use]
    pub fn z(self) -> i8 {
        self.0[2]
    }

    #[must_use]
    pub fn component(self, axis: Axis) -> i8 {
        self.0[axis as usize]
    }

    #[must_use]
    pub fn into_inner(self) -> [i8; 3] {
        self.0
    }

    /// All 27 cells of the grid, x-major.
    pub fn grid() -> impl Iterator<Item = Vector> {
        iproduct!(-1..=1, -1..=1, -1..=1).map(|(x, y, z)| Vector::new(x, y, z))
    }

    /// Index of a grid cell in x-major order; inverse of the order produced
    /// by [`Vector::grid`].
    ///
    /// # Panics
    ///
    /// If any coordinate lies outside {-1, 0, 1}.
    #[must_use]
    pub fn grid_index(self) -> usize {
        assert!(
            self.0.iter().all(|c| (-1..=1).contains(c)),
            "{self:?} is not a grid cell"
        );
        self.0
            .iter()
            .fold(0, |acc, &c| acc * 3 + usize::from((c + 1).unsigned_abs()))
    }

    #[must_use]
    pub fn dot(self, other: Vector) -> i8 {
        self.0.iter().zip(other.0).map(|(a, b)| a * b).sum()
    }

    #[must_use]
    pub fn cross(self, other: Vector) -> Vector {
        let [a1, a2, a3] = self.0;
        let [b1, b2, b3] = other.0;
        Vector([a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1])
    }

    /// Two non-zero vectors are parallel when they span a line. Antiparallel
    /// vectors count.
    #[must_use]
    pub fn is_parallel(self, other: Vector) -> bool {
        self != Vector::ZERO && other != Vector::ZERO && self.cross(other) == Vector::ZERO
    }

    /// The number of non-zero coordinates. For a grid cell this is 3 for a
    /// corner, 2 for an edge, 1 for a face center and 0 for the core.
    #[must_use]
    pub fn nonzero_count(self) -> usize {
        self.0.iter().filter(|c| **c != 0).count()
    }

    /// Component of `self` along `axis`.
    ///
    /// # Panics
    ///
    /// If `axis` is the zero vector.
    #[must_use]
    pub fn project_onto(self, axis: Vector) -> Vector {
        let norm = axis.dot(axis);
        assert!(norm != 0, "cannot project onto the zero vector");
        axis * (self.dot(axis) / norm)
    }

    /// Divide out the greatest common divisor of the coordinates, giving the
    /// shortest integer vector with the same direction.
    #[must_use]
    pub fn normalized(self) -> Vector {
        let divisor = self
            .0
            .iter()
            .map(|c| c.unsigned_abs())
            .fold(0, gcd);
        if divisor <= 1 {
            return self;
        }
        let divisor = i8::try_from(divisor).unwrap_or(i8::MAX);
        Vector(self.0.map(|c| c / divisor))
    }

    #[must_use]
    pub fn with_magnitude(self, magnitude: i8) -> Vector {
        self.normalized() * magnitude
    }

    /// Some vector perpendicular to `self`; zero only for the zero vector.
    #[must_use]
    pub fn any_perpendicular(self) -> Vector {
        if self.is_parallel(Vector::X) {
            self.cross(Vector::Y)
        } else {
            self.cross(Vector::X)
        }
    }

    /// Rotate a quarter turn about the unit `axis`. The forward direction is
    /// clockwise when looking at the face that `axis` points out of.
    ///
    /// The component along `axis` is kept and the perpendicular component is
    /// turned with a cross product.
    #[must_use]
    pub fn rotated(self, axis: Vector, reverse: bool) -> Vector {
        let parallel = self.project_onto(axis);
        let perpendicular = self - parallel;
        let turned = if reverse {
            axis.cross(perpendicular)
        } else {
            perpendicular.cross(axis)
        };
        parallel + turned
    }
}

fn gcd(a: u8, b: u8) -> u8 {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl core::fmt::Debug for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "⟨{x}, {y}, {z}⟩")
    }
}

impl From<[i8; 3]> for Vector {
    fn from(value: [i8; 3]) -> Self {
        Vector(value)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(mut self, rhs: Vector) -> Vector {
        self += rhs;
        self
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self + -rhs
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(self.0.map(|c| -c))
    }
}

impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Vector {
        Vector(self.0.map(|c| c * rhs))
    }
}
