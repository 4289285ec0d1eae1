use core::iter::FusedIterator;
use core::ops::Range;

use crate::math::{GridAab, GridCoordinate, GridPoint};

/// Iterator produced by [`GridAab::interior_iter()`].
///
/// Visits X in the outer loop, then Y, then Z in the inner loop.
#[derive(Clone, Debug)]
pub struct GridIter {
    x_range: Range<GridCoordinate>,
    y_range: Range<GridCoordinate>,
    z_range: Range<GridCoordinate>,
    cube: GridPoint,
}

impl GridIter {
    #[inline]
    pub(in crate::math) fn new(bounds: GridAab) -> Self {
        Self {
            x_range: bounds.x_range(),
            y_range: bounds.y_range(),
            z_range: bounds.z_range(),
            cube: if bounds.is_empty() {
                // next() treats any x inside x_range as a cell to produce,
                // which is only true when the box is nonempty.
                bounds.upper_bounds()
            } else {
                bounds.lower_bounds()
            },
        }
    }
}

impl Iterator for GridIter {
    type Item = GridPoint;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cube.x >= self.x_range.end {
            return None;
        }
        let result = self.cube;

        // Every produced coordinate is below an exclusive upper bound, so adding 1 cannot
        // overflow.
        let next_z = self.cube.z + 1;
        if next_z < self.z_range.end {
            self.cube.z = next_z;
        } else {
            self.cube.z = self.z_range.start;
            let next_y = self.cube.y + 1;
            if next_y < self.y_range.end {
                self.cube.y = next_y;
            } else {
                self.cube.y = self.y_range.start;
                // Leaving x_range signals the end.
                self.cube.x += 1;
            }
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from((self.x_range.end - self.cube.x) - 1) {
            Err(_) => (0, Some(0)),
            Ok(planes_remaining) => {
                let rows_remaining = planes_remaining * self.y_range.len()
                    + usize::try_from((self.y_range.end - self.cube.y) - 1).unwrap_or(0);
                let cells_remaining = rows_remaining * self.z_range.len()
                    + usize::try_from(self.z_range.end - self.cube.z).unwrap_or(0);

                (cells_remaining, Some(cells_remaining))
            }
        }
    }

    fn fold<B, F>(mut self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let mut state = init;

        // A partly advanced iterator is stepped until what remains is a whole number of
        // X planes.
        while self.cube.y != self.y_range.start || self.cube.z != self.z_range.start {
            let Some(cube) = self.next() else {
                return state;
            };
            state = f(state, cube);
        }

        for x in self.cube.x..self.x_range.end {
            for y in self.y_range.clone() {
                for z in self.z_range.clone() {
                    state = f(state, GridPoint::new(x, y, z));
                }
            }
        }

        state
    }
}

impl ExactSizeIterator for GridIter {}
impl FusedIterator for GridIter {}
