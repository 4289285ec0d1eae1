//! Rotations about the vertical axis by whole quarter turns.
//! This module is private but reexported by its parent.

use core::ops::{Add, Neg, Sub};

use euclid::Vector3D;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{FreeCoordinate, GridSize, GridVector};

/// A rotation about the vertical ([`Y`](crate::math::Axis::Y)) axis by a whole number of
/// 90° turns, always normalized into the range 0 to 3.
///
/// One turn maps the vector (*x*, *y*, *z*) to (*z*, *y*, −*x*).
/// Turns compose by addition, and four turns are the identity.
///
/// ```
/// # extern crate dungen_base as dungen;
/// use dungen::math::{GridVector, QuarterTurns};
///
/// let v = GridVector::new(1, 2, 3);
/// assert_eq!(QuarterTurns::ONE.rotate_vector(v), GridVector::new(3, 2, -1));
/// assert_eq!(QuarterTurns::from_degrees(-90.0), QuarterTurns::THREE);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct QuarterTurns(u8);

impl QuarterTurns {
    /// No rotation.
    pub const ZERO: Self = Self(0);
    /// A 90° turn.
    pub const ONE: Self = Self(1);
    /// A 180° turn.
    pub const TWO: Self = Self(2);
    /// A 270° turn, which is the same as a −90° turn.
    pub const THREE: Self = Self(3);

    /// All four distinct rotations, in increasing order.
    pub const ALL: [Self; 4] = [Self::ZERO, Self::ONE, Self::TWO, Self::THREE];

    /// Converts any integer number of turns, including negative ones.
    ///
    /// ```
    /// # extern crate dungen_base as dungen;
    /// use dungen::math::QuarterTurns;
    ///
    /// assert_eq!(QuarterTurns::from_count(5), QuarterTurns::ONE);
    /// assert_eq!(QuarterTurns::from_count(-1), QuarterTurns::THREE);
    /// ```
    #[inline]
    pub const fn from_count(count: i32) -> Self {
        Self(count.rem_euclid(4) as u8)
    }

    /// Converts an angle in degrees to the nearest whole number of quarter turns.
    ///
    /// The angle is first brought into the non-negative range by whole revolutions and
    /// then rounded, so `-60.0` and `300.0` both give [`QuarterTurns::THREE`] while
    /// `44.0` gives [`QuarterTurns::ZERO`]. Non-finite angles give [`QuarterTurns::ZERO`].
    #[inline]
    pub fn from_degrees(degrees: FreeCoordinate) -> Self {
        let mut turns = (degrees / 90.0) % 4.0;
        if turns < 0.0 {
            turns += 4.0;
        }
        if !turns.is_finite() {
            return Self::ZERO;
        }
        Self((turns.round() as u8) % 4)
    }

    /// Returns the number of turns, from 0 to 3.
    #[inline]
    pub const fn count(self) -> u8 {
        self.0
    }

    /// Returns the rotation angle in degrees, from 0 to 270.
    #[inline]
    pub fn to_degrees(self) -> FreeCoordinate {
        FreeCoordinate::from(self.0) * 90.0
    }

    /// Returns whether this rotation exchanges the X and Z axes.
    #[inline]
    pub const fn swaps_horizontal(self) -> bool {
        self.0 % 2 == 1
    }

    /// Returns the rotation which undoes this one.
    #[inline]
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self((4 - self.0) % 4)
    }

    /// Rotates a vector of any signed component type.
    #[inline]
    pub fn rotate_vector<T, U>(self, vector: Vector3D<T, U>) -> Vector3D<T, U>
    where
        T: Copy + Neg<Output = T>,
    {
        let Vector3D { x, y, z, .. } = vector;
        match self.0 {
            0 => Vector3D::new(x, y, z),
            1 => Vector3D::new(z, y, -x),
            2 => Vector3D::new(-x, y, -z),
            _ => Vector3D::new(-z, y, x),
        }
    }

    /// Rotates a size, which exchanges its horizontal extents on odd turns.
    #[inline]
    pub fn transform_size(self, size: GridSize) -> GridSize {
        if self.swaps_horizontal() {
            GridSize::new(size.depth, size.height, size.width)
        } else {
            size
        }
    }
}

/// Reduces the count modulo 4.
impl From<u8> for QuarterTurns {
    #[inline]
    fn from(count: u8) -> Self {
        Self(count % 4)
    }
}

impl From<QuarterTurns> for u8 {
    #[inline]
    fn from(value: QuarterTurns) -> Self {
        value.0
    }
}

impl Add for QuarterTurns {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self((self.0 + rhs.0) % 4)
    }
}

impl Sub for QuarterTurns {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + rhs.inverse()
    }
}

impl Neg for QuarterTurns {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.inverse()
    }
}

/// Computes the extent and offset of a room after rotating it by `turns`.
///
/// `size` and `offset` are expressed in the room's current frame; the result is in the
/// rotated frame. On odd turns the horizontal extents trade places, and the offset
/// follows [`QuarterTurns::rotate_vector()`].
///
/// ```
/// # extern crate dungen_base as dungen;
/// use dungen::math::{reorient, GridSize, GridVector, QuarterTurns};
///
/// assert_eq!(
///     reorient(GridSize::new(4, 2, 6), GridVector::new(1, 0, 2), QuarterTurns::ONE),
///     (GridSize::new(6, 2, 4), GridVector::new(2, 0, -1)),
/// );
/// ```
#[inline]
pub fn reorient(
    size: GridSize,
    offset: GridVector,
    turns: QuarterTurns,
) -> (GridSize, GridVector) {
    (turns.transform_size(size), turns.rotate_vector(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FreeVector;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(90.0, 1)]
    #[case(180.0, 2)]
    #[case(270.0, 3)]
    #[case(360.0, 0)]
    #[case(450.0, 1)]
    #[case(-90.0, 3)]
    #[case(-180.0, 2)]
    #[case(-270.0, 1)]
    #[case(-360.0, 0)]
    #[case(89.0, 1)]
    #[case(-44.0, 0)]
    #[case(-46.0, 3)]
    #[case(44.0, 0)]
    #[case(314.0, 3)]
    #[case(316.0, 0)]
    fn from_degrees(#[case] degrees: FreeCoordinate, #[case] expected: u8) {
        assert_eq!(QuarterTurns::from_degrees(degrees).count(), expected, "{degrees}");
    }

    #[test]
    fn from_degrees_non_finite() {
        assert_eq!(QuarterTurns::from_degrees(FreeCoordinate::NAN), QuarterTurns::ZERO);
        assert_eq!(
            QuarterTurns::from_degrees(FreeCoordinate::NEG_INFINITY),
            QuarterTurns::ZERO
        );
    }

    #[test]
    fn degrees_round_trip() {
        for turns in QuarterTurns::ALL {
            assert_eq!(QuarterTurns::from_degrees(turns.to_degrees()), turns);
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(QuarterTurns::THREE + QuarterTurns::TWO, QuarterTurns::ONE);
        assert_eq!(QuarterTurns::ONE - QuarterTurns::TWO, QuarterTurns::THREE);
        assert_eq!(-QuarterTurns::ONE, QuarterTurns::THREE);
        assert_eq!(-QuarterTurns::ZERO, QuarterTurns::ZERO);
        for a in QuarterTurns::ALL {
            for b in QuarterTurns::ALL {
                assert_eq!(
                    (a + b).count(),
                    (a.count() + b.count()) % 4,
                    "{a:?} + {b:?}"
                );
            }
        }
    }

    #[rstest]
    #[case(QuarterTurns::ZERO, [4, 2, 6], [1, 3, 2])]
    #[case(QuarterTurns::ONE, [6, 2, 4], [2, 3, -1])]
    #[case(QuarterTurns::TWO, [4, 2, 6], [-1, 3, -2])]
    #[case(QuarterTurns::THREE, [6, 2, 4], [-2, 3, 1])]
    fn reorient_cases(
        #[case] turns: QuarterTurns,
        #[case] expected_size: [u32; 3],
        #[case] expected_offset: [i32; 3],
    ) {
        assert_eq!(
            reorient(GridSize::new(4, 2, 6), GridVector::new(1, 3, 2), turns),
            (
                GridSize::from(expected_size),
                GridVector::from(expected_offset)
            )
        );
    }

    #[test]
    fn four_single_turns_are_identity() {
        let original = (GridSize::new(3, 5, 8), GridVector::new(-2, 7, 11));
        let mut state = original;
        for _ in 0..4 {
            state = reorient(state.0, state.1, QuarterTurns::ONE);
        }
        assert_eq!(state, original);
    }

    #[test]
    fn rotation_matches_composition() {
        let v = FreeVector::new(1.5, -2.0, 0.25);
        for a in QuarterTurns::ALL {
            for b in QuarterTurns::ALL {
                assert_eq!(
                    (a + b).rotate_vector(v),
                    b.rotate_vector(a.rotate_vector(v)),
                    "{a:?} then {b:?}"
                );
            }
        }
    }

    #[test]
    fn inverse_undoes() {
        let v = GridVector::new(1, 2, 3);
        for turns in QuarterTurns::ALL {
            assert_eq!(turns.inverse().rotate_vector(turns.rotate_vector(v)), v);
        }
    }
}
