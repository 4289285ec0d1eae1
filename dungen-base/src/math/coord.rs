//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Size3D, Vector3D};

/// Unit-of-measure marker for [`euclid`] types that are in dungeon space.
///
/// Continuous positions are measured in world units, and grid positions in voxels;
/// both share this marker since a voxel of size 1 is one world unit.
#[allow(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum World {}

/// Coordinates that are locked to the voxel grid.
pub type GridCoordinate = i32;

/// Numeric type in a [`GridSize`].
pub type GridSizeCoord = u32;

/// Positions that are locked to the voxel grid.
pub type GridPoint = Point3D<GridCoordinate, World>;

/// Vectors that are locked to the voxel grid.
pub type GridVector = Vector3D<GridCoordinate, World>;

/// Sizes of grid-aligned objects, such as room extents and voxel sizes.
pub type GridSize = Size3D<GridSizeCoord, World>;

/// Coordinates that are not locked to the grid.
///
/// Note: Because `GridCoordinate = i32` and `FreeCoordinate = f64`, which has
/// more than 32 bits of mantissa, the infallible conversion
/// `From<GridCoordinate> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Positions that are not locked to the grid but may interact with it.
pub type FreePoint = Point3D<FreeCoordinate, World>;

/// Vectors that are not locked to the grid but may interact with it.
pub type FreeVector = Vector3D<FreeCoordinate, World>;

/// Converts an integer-valued vector, such as a room offset, to continuous coordinates.
#[inline]
pub fn grid_to_free(vector: GridVector) -> FreeVector {
    vector.map(FreeCoordinate::from)
}

/// Converts a size to continuous coordinates.
#[inline]
pub fn size_to_free(size: GridSize) -> FreeVector {
    Vector3D::new(
        FreeCoordinate::from(size.width),
        FreeCoordinate::from(size.height),
        FreeCoordinate::from(size.depth),
    )
}
