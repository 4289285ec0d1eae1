use core::fmt;

use manyfmt::{Fmt, Refmt as _};

use crate::math::{Aab, GridAab};

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but uses an
/// alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and may lose
/// precision or Rust syntax in favor of a short at-a-glance representation. Log messages
/// about room placement use it for positions and extents.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

impl<T: Fmt<ConciseDebug>, const N: usize> Fmt<ConciseDebug> for [T; N] {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        fmt.debug_list().entries(self.iter().map(|item| item.refmt(fopt))).finish()
    }
}

impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Point3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?}, {:+.3?})", self.x, self.y, self.z)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Vector3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?}, {:+.3?})", self.x, self.y, self.z)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Size3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "({:+.3?}, {:+.3?}, {:+.3?})",
            self.width, self.height, self.depth
        )
    }
}

/// Formats the box as its two corners.
impl Fmt<ConciseDebug> for Aab {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "{}..{}",
            self.lower_bounds_p().refmt(fopt),
            self.upper_bounds_p().refmt(fopt)
        )
    }
}
impl Fmt<ConciseDebug> for GridAab {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "{}..{}",
            self.lower_bounds().refmt(fopt),
            self.upper_bounds().refmt(fopt)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FreePoint, GridSize};
    use alloc::string::ToString as _;

    #[test]
    fn concise_point() {
        assert_eq!(
            FreePoint::new(1.0, -0.5, 2.25).refmt(&ConciseDebug).to_string(),
            "(+1.000, -0.500, +2.250)"
        );
    }

    #[test]
    fn concise_boxes() {
        assert_eq!(
            GridAab::from_lower_size([0, -1, 2], GridSize::new(1, 2, 3))
                .refmt(&ConciseDebug)
                .to_string(),
            "(+0, -1, +2)..(+1, +1, +5)"
        );
        assert_eq!(
            Aab::from_lower_upper([0.0, 0.0, 0.0], [1.0, 2.0, 3.0])
                .refmt(&ConciseDebug)
                .to_string(),
            "(+0.000, +0.000, +0.000)..(+1.000, +2.000, +3.000)"
        );
    }
}
