//! Axis-aligned integer-coordinate box volumes ([`GridAab`]).

use core::fmt;
use core::ops::Range;

use manyfmt::Refmt as _;

use crate::math::{Axis, GridCoordinate, GridIter, GridPoint, GridSize};
use crate::util::ConciseDebug;

/// An axis-aligned box with integer coordinates, whose volume is made of whole voxel cells.
///
/// The occupancy grid is described by a [`GridAab`] whose lower corner is the origin, and
/// every room footprint is a set of points inside one.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridAab {
    lower_bounds: GridPoint,
    /// Constructor checks ensure this is not smaller than `lower_bounds`.
    upper_bounds: GridPoint,
}

impl GridAab {
    /// Box of zero size at `[0, 0, 0]`.
    ///
    /// Use this box as the canonical placeholder "nothing" value when it is necessary to
    /// have *some* box.
    pub const ORIGIN_EMPTY: GridAab = GridAab {
        lower_bounds: GridPoint::new(0, 0, 0),
        upper_bounds: GridPoint::new(0, 0, 0),
    };

    /// Constructs a [`GridAab`] from coordinate lower bounds and sizes.
    ///
    /// For example, if on one axis the lower bound is 5 and the size is 10,
    /// then the cells that exist are numbered 5 through 14 (inclusive).
    ///
    /// Panics if the resulting range would cause numeric overflow.
    /// Use [`GridAab::checked_from_lower_size`] to avoid panics.
    #[track_caller]
    #[inline]
    pub fn from_lower_size(
        lower_bounds: impl Into<GridPoint>,
        size: impl Into<GridSize>,
    ) -> Self {
        match Self::checked_from_lower_size(lower_bounds.into(), size.into()) {
            Ok(aab) => aab,
            Err(e) => panic!("{e}"),
        }
    }

    /// Constructs a [`GridAab`] from coordinate lower bounds and sizes.
    ///
    /// Returns [`Err`] if the resulting upper bounds would overflow.
    #[inline]
    pub fn checked_from_lower_size(
        lower_bounds: impl Into<GridPoint>,
        size: impl Into<GridSize>,
    ) -> Result<Self, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let size = size.into();
        let upper = lower_bounds
            .x
            .checked_add_unsigned(size.width)
            .zip(lower_bounds.y.checked_add_unsigned(size.height))
            .zip(lower_bounds.z.checked_add_unsigned(size.depth));
        match upper {
            Some(((x, y), z)) => Self::checked_from_lower_upper(lower_bounds, GridPoint::new(x, y, z)),
            None => Err(GridOverflowError(OverflowKind::OverflowedSize {
                lower_bounds,
                size,
            })),
        }
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Panics if the bounds are inverted.
    #[track_caller]
    #[inline]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Self {
        match Self::checked_from_lower_upper(lower_bounds.into(), upper_bounds.into()) {
            Ok(aab) => aab,
            Err(e) => panic!("{e}"),
        }
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Returns [`Err`] if the bounds are inverted.
    #[inline]
    pub fn checked_from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Result<Self, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if upper_bounds.x < lower_bounds.x
            || upper_bounds.y < lower_bounds.y
            || upper_bounds.z < lower_bounds.z
        {
            return Err(GridOverflowError(OverflowKind::Inverted {
                lower_bounds,
                upper_bounds,
            }));
        }
        Ok(GridAab {
            lower_bounds,
            upper_bounds,
        })
    }

    /// Computes the volume of this box in cells, i.e. the product of all sizes.
    ///
    /// Returns [`None`] if the volume does not fit in a `usize`.
    ///
    /// ```
    /// # extern crate dungen_base as dungen;
    /// use dungen::math::GridAab;
    ///
    /// let a = GridAab::from_lower_size([-10, 3, 7], [100, 200, 300]);
    /// assert_eq!(a.volume(), Some(6_000_000));
    /// ```
    #[inline]
    pub fn volume(&self) -> Option<usize> {
        let size = self.size();
        let width = usize::try_from(size.width).ok()?;
        let height = usize::try_from(size.height).ok()?;
        let depth = usize::try_from(size.depth).ok()?;
        width.checked_mul(height)?.checked_mul(depth)
    }

    /// Returns whether the box contains no cells (its volume is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Inclusive lower bounds on cell coordinates, or the most negative corner of the box.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cell coordinates, or the most positive corner of the box.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// Size of the box in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`, except that the result is
    /// unsigned (which is necessary so that it cannot overflow).
    #[inline]
    pub fn size(&self) -> GridSize {
        GridSize::new(
            self.upper_bounds.x.abs_diff(self.lower_bounds.x),
            self.upper_bounds.y.abs_diff(self.lower_bounds.y),
            self.upper_bounds.z.abs_diff(self.lower_bounds.z),
        )
    }

    /// The range of X coordinates for cells within the box.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::X)
    }

    /// The range of Y coordinates for cells within the box.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::Y)
    }

    /// The range of Z coordinates for cells within the box.
    #[inline]
    pub fn z_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::Z)
    }

    /// The range of coordinates for cells within the box along the given axis.
    #[inline]
    pub fn axis_range(&self, axis: Axis) -> Range<GridCoordinate> {
        (self.lower_bounds()[axis])..(self.upper_bounds()[axis])
    }

    /// Iterate over all cells that this contains.
    ///
    /// The X coordinate varies slowest and Z fastest, which is also the order in which
    /// footprints are listed.
    ///
    /// ```
    /// # extern crate dungen_base as dungen;
    /// use dungen::math::{GridAab, GridPoint};
    ///
    /// let b = GridAab::from_lower_size([10, 20, 30], [1, 2, 3]);
    /// assert_eq!(
    ///     b.interior_iter().collect::<Vec<GridPoint>>(),
    ///     &[
    ///         GridPoint::new(10, 20, 30),
    ///         GridPoint::new(10, 20, 31),
    ///         GridPoint::new(10, 20, 32),
    ///         GridPoint::new(10, 21, 30),
    ///         GridPoint::new(10, 21, 31),
    ///         GridPoint::new(10, 21, 32),
    ///     ]
    /// )
    /// ```
    #[inline]
    pub fn interior_iter(self) -> GridIter {
        GridIter::new(self)
    }

    /// Returns whether the box includes the given cell position in its volume.
    ///
    /// ```
    /// # extern crate dungen_base as dungen;
    /// use dungen::math::{GridAab, GridPoint};
    ///
    /// let b = GridAab::from_lower_size([4, 4, 4], [6, 6, 6]);
    /// assert!(!b.contains_cube(GridPoint::new(3, 5, 5)));
    /// assert!(b.contains_cube(GridPoint::new(4, 5, 5)));
    /// assert!(b.contains_cube(GridPoint::new(9, 5, 5)));
    /// assert!(!b.contains_cube(GridPoint::new(10, 5, 5)));
    /// ```
    #[inline]
    pub fn contains_cube(&self, cube: GridPoint) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            cube[axis] >= self.lower_bounds[axis] && cube[axis] < self.upper_bounds[axis]
        })
    }
}

impl fmt::Debug for GridAab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GridAab")
            .field(&RangeWithLength(self.x_range()))
            .field(&RangeWithLength(self.y_range()))
            .field(&RangeWithLength(self.z_range()))
            .finish()
    }
}

/// Error when a [`GridAab`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("{0}")]
pub struct GridOverflowError(OverflowKind);

/// Error details for [`GridOverflowError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OverflowKind {
    Inverted {
        lower_bounds: GridPoint,
        upper_bounds: GridPoint,
    },
    OverflowedSize {
        lower_bounds: GridPoint,
        size: GridSize,
    },
}

impl fmt::Display for OverflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowKind::Inverted {
                lower_bounds,
                upper_bounds,
            } => {
                write!(
                    f,
                    "GridAab's lower bounds {} were greater than upper bounds {}",
                    lower_bounds.refmt(&ConciseDebug),
                    upper_bounds.refmt(&ConciseDebug)
                )
            }
            OverflowKind::OverflowedSize { lower_bounds, size } => {
                write!(
                    f,
                    "GridAab's size {size} plus lower bounds {lower_bounds} \
                        produced {upper_bounds} which overflows",
                    lower_bounds = lower_bounds.refmt(&ConciseDebug),
                    // Do the math in i64, which is big enough not to overflow.
                    upper_bounds = (lower_bounds.to_i64() + size.to_i64()).refmt(&ConciseDebug),
                    size = size.refmt(&ConciseDebug),
                )
            }
        }
    }
}

impl core::error::Error for GridOverflowError {}

/// `Debug`-formatting helper
struct RangeWithLength(Range<GridCoordinate>);
impl fmt::Debug for RangeWithLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = &self.0;
        if f.alternate() {
            write!(
                f,
                "{range:?} ({len})",
                len = i64::from(range.end) - i64::from(range.start)
            )
        } else {
            range.fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_is_valid() {
        assert_eq!(
            GridAab::from_lower_size([1, 2, 3], [0, 1, 1]),
            GridAab::from_lower_upper([1, 2, 3], [1, 3, 4]),
        );
        assert_eq!(
            GridAab::from_lower_size([1, 2, 3], [0, 1, 1]).volume(),
            Some(0)
        );
        assert!(GridAab::from_lower_size([1, 2, 3], [0, 1, 1]).is_empty());
    }

    #[test]
    fn inverted_error_message() {
        assert_eq!(
            GridAab::checked_from_lower_upper([1, 2, 3], [0, 2, 3])
                .unwrap_err()
                .to_string(),
            "GridAab's lower bounds (+1, +2, +3) were greater than upper bounds (+0, +2, +3)"
        );
    }

    #[test]
    fn overflow_error_message() {
        let result = GridAab::checked_from_lower_size([GridCoordinate::MAX, 0, 0], [1, 1, 1]);
        assert_eq!(
            result.unwrap_err().to_string(),
            "GridAab's size (+1, +1, +1) plus lower bounds (+2147483647, +0, +0) \
                produced (+2147483648, +1, +1) which overflows"
        );
    }

    #[test]
    fn debug() {
        let b = GridAab::from_lower_size([1, 2, 3], [10, 20, 30]);
        assert_eq!(format!("{b:?}"), "GridAab(1..11, 2..22, 3..33)");
        assert_eq!(
            format!("{b:#?}\n"),
            indoc! {"
                GridAab(
                    1..11 (10),
                    2..22 (20),
                    3..33 (30),
                )
            "}
        );
    }
}
