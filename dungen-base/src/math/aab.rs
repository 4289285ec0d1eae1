use core::cmp::Ordering;
use core::fmt;

use euclid::Point3D;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{Axis, FreeCoordinate, FreePoint, FreeVector, LineVertex, Wireframe};

/// Axis-Aligned Box data type.
///
/// Note that this has continuous coordinates, and a discrete analogue exists as
/// [`GridAab`](crate::math::GridAab).
///
/// Room bounds are of this type.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aab {
    lower_bounds: FreePoint,
    upper_bounds: FreePoint,
}

impl Aab {
    /// The [`Aab`] of zero size at the origin.
    pub const ZERO: Aab = Aab {
        lower_bounds: Point3D::new(0., 0., 0.),
        upper_bounds: Point3D::new(0., 0., 0.),
    };

    /// Constructs an [`Aab`] from individual coordinates.
    #[inline]
    #[track_caller]
    pub fn new(
        lx: FreeCoordinate,
        hx: FreeCoordinate,
        ly: FreeCoordinate,
        hy: FreeCoordinate,
        lz: FreeCoordinate,
        hz: FreeCoordinate,
    ) -> Self {
        Self::from_lower_upper(Point3D::new(lx, ly, lz), Point3D::new(hx, hy, hz))
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Panics if the points are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<FreePoint>,
        upper_bounds: impl Into<FreePoint>,
    ) -> Self {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Some(aab) => aab,
            None => panic!(
                "invalid AAB points that are misordered or NaN: \
                lower {lower_bounds:?} upper {upper_bounds:?}"
            ),
        }
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Returns [`None`] if the points are not in the proper order or if they are NaN.
    pub fn checked_from_lower_upper(
        lower_bounds: FreePoint,
        upper_bounds: FreePoint,
    ) -> Option<Self> {
        if lower_bounds.x <= upper_bounds.x
            && lower_bounds.y <= upper_bounds.y
            && lower_bounds.z <= upper_bounds.z
        {
            Some(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            None
        }
    }

    /// Constructs the [`Aab`] with the given center and full size.
    ///
    /// Negative or NaN sizes are clamped to zero, producing an empty box at `center`.
    #[inline]
    pub fn from_center_size(center: FreePoint, size: FreeVector) -> Self {
        let half = size.map(|c| if c > 0.0 { c * 0.5 } else { 0.0 });
        Self {
            lower_bounds: center - half,
            upper_bounds: center + half,
        }
    }

    /// The most negative corner of the box.
    #[inline]
    pub const fn lower_bounds_p(&self) -> FreePoint {
        self.lower_bounds
    }

    /// The most positive corner of the box.
    #[inline]
    pub const fn upper_bounds_p(&self) -> FreePoint {
        self.upper_bounds
    }

    /// Size of the box in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`.
    #[inline]
    pub fn size(&self) -> FreeVector {
        self.upper_bounds - self.lower_bounds
    }

    /// The center of the enclosed volume.
    ///
    /// ```
    /// # extern crate dungen_base as dungen;
    /// use dungen::math::{Aab, FreePoint};
    ///
    /// let aab = Aab::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    /// assert_eq!(aab.center(), FreePoint::new(1.5, 3.5, 5.5));
    /// ```
    #[inline]
    pub fn center(&self) -> FreePoint {
        (self.lower_bounds + self.upper_bounds.to_vector()) * 0.5
    }

    /// Returns whether this AAB, including the boundary, contains the point.
    #[inline]
    pub fn contains(&self, point: FreePoint) -> bool {
        for axis in Axis::ALL {
            if !(self.lower_bounds[axis] <= point[axis] && point[axis] <= self.upper_bounds[axis]) {
                return false;
            }
        }
        true
    }

    /// Returns whether the two boxes share a volume of nonzero measure; that is, whether
    /// their interiors overlap on every axis.
    ///
    /// ```
    /// # extern crate dungen_base as dungen;
    /// use dungen::math::Aab;
    ///
    /// let a = Aab::new(0.0, 2.0, 0.0, 2.0, 0.0, 2.0);
    /// assert!(a.intersects_strictly(Aab::new(1.0, 3.0, 0.0, 2.0, 0.0, 2.0)));
    /// // Touching faces do not count.
    /// assert!(!a.intersects_strictly(Aab::new(2.0, 4.0, 0.0, 2.0, 0.0, 2.0)));
    /// ```
    #[inline]
    pub fn intersects_strictly(&self, other: Aab) -> bool {
        for axis in Axis::ALL {
            let intersection_min = self.lower_bounds[axis].max(other.lower_bounds[axis]);
            let intersection_max = self.upper_bounds[axis].min(other.upper_bounds[axis]);
            if intersection_min.partial_cmp(&intersection_max) != Some(Ordering::Less) {
                return false;
            }
        }
        true
    }
}

impl fmt::Debug for Aab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("Aab")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .field(&(l.z..=u.z))
            .finish()
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}

impl Wireframe for Aab {
    #[inline(never)]
    fn wireframe_points<E>(&self, output: &mut E)
    where
        E: Extend<LineVertex>,
    {
        let mut vertices = [LineVertex::from(FreePoint::origin()); 24];
        let l = self.lower_bounds_p();
        let u = self.upper_bounds_p();
        for axis_0 in Axis::ALL {
            let vbase = usize::from(axis_0) * 8;
            let axis_1 = axis_0.increment();
            let axis_2 = axis_0.decrement();
            let mut p = l;
            // Walk from lower to upper in a helix.
            vertices[vbase].position = p;
            p[axis_0] = u[axis_0];
            vertices[vbase + 1].position = p;
            vertices[vbase + 2].position = p;
            p[axis_1] = u[axis_1];
            vertices[vbase + 3].position = p;
            vertices[vbase + 4].position = p;
            p[axis_2] = u[axis_2];
            vertices[vbase + 5].position = p;
            // Go back and fill in the remaining bar.
            p[axis_2] = l[axis_2];
            vertices[vbase + 6].position = p;
            p[axis_0] = l[axis_0];
            vertices[vbase + 7].position = p;
        }
        output.extend(vertices);
    }
}
