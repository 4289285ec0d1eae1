//! Mathematical utilities and decisions.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

mod aab;
pub use aab::*;
mod axis;
pub use axis::*;
mod coord;
pub use coord::*;
mod grid_aab;
pub use grid_aab::*;
mod grid_iter;
pub use grid_iter::*;
mod rotation;
pub use rotation::*;

/// Rounds to the nearest integer, except that values exactly halfway between two integers
/// are rounded toward zero.
///
/// This is the rounding used to fit room centers onto the voxel grid, and it must not be
/// replaced with [`f64::round()`], which rounds halfway values away from zero and would
/// shift every odd-sized room by one cell.
///
/// ```
/// # extern crate dungen_base as dungen;
/// use dungen::math::round_toward_zero;
///
/// assert_eq!(round_toward_zero(3.5), 3);
/// assert_eq!(round_toward_zero(-3.5), -3);
/// assert_eq!(round_toward_zero(3.6), 4);
/// assert_eq!(round_toward_zero(-3.6), -4);
/// ```
#[inline]
pub fn round_toward_zero(value: FreeCoordinate) -> GridCoordinate {
    let rounded = if value < 0.0 {
        (value + 0.5).floor()
    } else {
        (value - 0.5).ceil()
    };
    rounded as GridCoordinate
}

/// Geometric objects that can be drawn as wireframes.
///
/// This is how placed rooms are shown to a host for debugging; the generator itself never
/// looks at the output.
pub trait Wireframe {
    /// Represent this object as a line drawing, or wireframe.
    ///
    /// The generated points should be in pairs, each pair defining a line segment.
    /// If there are an odd number of vertices, the caller should ignore the last.
    fn wireframe_points<E>(&self, output: &mut E)
    where
        E: Extend<LineVertex>;
}

impl<T: Wireframe> Wireframe for Option<T> {
    fn wireframe_points<E>(&self, output: &mut E)
    where
        E: Extend<LineVertex>,
    {
        if let Some(value) = self {
            value.wireframe_points(output)
        }
    }
}

/// One end of a line to be drawn.
///
/// These are the output of [`Wireframe::wireframe_points()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct LineVertex {
    /// Position of the vertex.
    pub position: FreePoint,
}

impl From<FreePoint> for LineVertex {
    #[inline]
    fn from(position: FreePoint) -> Self {
        Self { position }
    }
}
