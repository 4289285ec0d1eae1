//! Voxel grid collision: choosing a cell size and recording which cells are taken.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use hashbrown::HashSet;
use itertools::Itertools as _;

use crate::math::{FreeCoordinate, GridAab, GridCoordinate, GridPoint, GridSize};
use crate::{ConfigError, Footprint, Occupancy, RoomBlock};

/// Chooses the largest voxel size that evenly divides the extent of every room whose size
/// is given, so that each room covers a whole number of cells.
///
/// The X and Z axes share one factor, which must divide every X extent and every Z extent,
/// because a quarter turn exchanges them. The Y factor is chosen independently.
/// With no sizes given, the result is 1 on every axis.
///
/// ```
/// use dungen::derive_voxel_size;
/// use dungen::math::GridSize;
///
/// assert_eq!(
///     derive_voxel_size([GridSize::new(4, 2, 6), GridSize::new(8, 2, 4)]),
///     GridSize::new(2, 2, 2),
/// );
/// ```
pub fn derive_voxel_size(sizes: impl IntoIterator<Item = GridSize>) -> GridSize {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for size in sizes {
        horizontal.push(size.width);
        horizontal.push(size.depth);
        vertical.push(size.height);
    }
    let horizontal_factor = largest_common_factor(&horizontal);
    GridSize::new(
        horizontal_factor,
        largest_common_factor(&vertical),
        horizontal_factor,
    )
}

/// Largest value from 1 up to the smallest of `values` that divides all of them.
fn largest_common_factor(values: &[u32]) -> u32 {
    let Some(&smallest) = values.iter().min() else {
        return 1;
    };
    let mut best = 1;
    for factor in 2..=smallest {
        if values.iter().all(|&value| value % factor == 0) {
            best = factor;
        }
    }
    best
}

// -------------------------------------------------------------------------------------------------

/// Dimensions of the voxel grid that confines a dungeon.
///
/// The grid is centered on the world origin: a room cell `c` (as produced by
/// [`RoomBlock::get_coordinates()`]) is stored at index `trunc(c + extent / 2)` on each
/// axis, and only indices in `0..extent` are inside the dungeon.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VoxelGrid {
    voxel_size: GridSize,
    extent: GridSize,
}

impl VoxelGrid {
    /// Creates a grid covering `dungeon_size` world units with cells of `voxel_size`.
    ///
    /// Fails if either size is zero on some axis, or the dungeon is smaller than one cell.
    pub fn new(dungeon_size: GridSize, voxel_size: GridSize) -> Result<Self, ConfigError> {
        if dungeon_size.is_empty() {
            return Err(ConfigError::ZeroDungeonSize(dungeon_size));
        }
        if voxel_size.is_empty() {
            return Err(ConfigError::ZeroVoxelSize(voxel_size));
        }
        let extent = GridSize::new(
            dungeon_size.width / voxel_size.width,
            dungeon_size.height / voxel_size.height,
            dungeon_size.depth / voxel_size.depth,
        );
        if extent.is_empty() {
            return Err(ConfigError::DungeonSmallerThanVoxel {
                dungeon_size,
                voxel_size,
            });
        }
        Ok(Self { voxel_size, extent })
    }

    /// Extent of one cell in world units.
    pub fn voxel_size(&self) -> GridSize {
        self.voxel_size
    }

    /// Number of cells along each axis.
    pub fn extent(&self) -> GridSize {
        self.extent
    }

    /// The range of valid cell indices.
    pub fn bounds(&self) -> GridAab {
        GridAab::from_lower_size(GridPoint::origin(), self.extent)
    }

    /// Converts a room cell to a grid index, or [`None`] if it lies outside the dungeon.
    ///
    /// The shifted coordinate is truncated toward zero. Where the extent is odd, the shift
    /// is a half-integer, so on that axis the cell just below the grid and the first cell
    /// of the grid both map to index 0: cell `-3` is accepted in a grid of extent 5, and
    /// rooms covering only one of those two cells are judged to collide.
    pub fn to_index(&self, cell: GridPoint) -> Option<GridPoint> {
        let shift = |coordinate: GridCoordinate, extent: u32| -> GridCoordinate {
            (FreeCoordinate::from(coordinate) + FreeCoordinate::from(extent) * 0.5)
                as GridCoordinate
        };
        let index = GridPoint::new(
            shift(cell.x, self.extent.width),
            shift(cell.y, self.extent.height),
            shift(cell.z, self.extent.depth),
        );
        self.bounds().contains_cube(index).then_some(index)
    }
}

// -------------------------------------------------------------------------------------------------

/// [`Occupancy`] by marking cells of a [`VoxelGrid`].
#[derive(Clone, Debug)]
pub struct VoxelOccupancy {
    grid: VoxelGrid,
    occupied: HashSet<GridPoint>,
}

impl VoxelOccupancy {
    /// Creates a record with no cells occupied.
    pub fn new(grid: VoxelGrid) -> Self {
        Self {
            grid,
            occupied: HashSet::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn grid(&self) -> VoxelGrid {
        self.grid
    }

    /// Whether the cell at the given grid index is occupied.
    pub fn is_occupied(&self, index: GridPoint) -> bool {
        self.occupied.contains(&index)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Returns whether every cell of `footprint` is inside the grid and unoccupied.
    ///
    /// Footprints which are not [reliable](Footprint::is_reliable) never fit.
    pub fn fits_footprint(&self, footprint: &Footprint) -> bool {
        if !footprint.is_reliable() {
            log::debug!("footprint is unreliable; rejecting");
            return false;
        }
        for &cell in footprint.cells() {
            let Some(index) = self.grid.to_index(cell) else {
                log::debug!("cell {cell:?} is outside the dungeon");
                return false;
            };
            if self.is_occupied(index) {
                log::debug!("cell {cell:?} (index {index:?}) is occupied");
                return false;
            }
        }
        true
    }

    /// Marks every cell of `footprint` that is inside the grid as occupied.
    pub fn mark_footprint(&mut self, footprint: &Footprint) {
        for &cell in footprint.cells() {
            match self.grid.to_index(cell) {
                Some(index) => {
                    log::trace!("filled cell {cell:?} at index {index:?}");
                    self.occupied.insert(index);
                }
                None => log::trace!("cell {cell:?} is outside the dungeon; not filled"),
            }
        }
    }

    /// Renders the grid as text, one block of rows per Y layer from the bottom up.
    /// Each row is one X index, listing the Z indices as `1` (occupied) or `0` (free).
    ///
    /// ```
    /// use dungen::{VoxelGrid, VoxelOccupancy};
    /// use dungen::math::GridSize;
    ///
    /// let grid = VoxelGrid::new(GridSize::new(2, 1, 3), GridSize::splat(1)).unwrap();
    /// let occupancy = VoxelOccupancy::new(grid);
    /// assert_eq!(occupancy.layer_dump(), "y = 0:\n0 0 0\n0 0 0\n");
    /// ```
    pub fn layer_dump(&self) -> String {
        let bounds = self.grid.bounds();
        let mut output = String::new();
        for y in bounds.y_range() {
            // Writing to a String cannot fail.
            let _ = writeln!(output, "y = {y}:");
            for x in bounds.x_range() {
                let row = bounds
                    .z_range()
                    .map(|z| {
                        if self.is_occupied(GridPoint::new(x, y, z)) {
                            "1"
                        } else {
                            "0"
                        }
                    })
                    .join(" ");
                output.push_str(&row);
                output.push('\n');
            }
        }
        output
    }
}

impl Occupancy for VoxelOccupancy {
    fn fits(&self, candidate: &mut RoomBlock) -> bool {
        let voxel_size = self.grid.voxel_size();
        let center = candidate.voxel_center(voxel_size);
        let fits = self.fits_footprint(candidate.get_coordinates(center, voxel_size));
        if !fits {
            log::debug!("{name} does not fit in the voxel grid", name = candidate.name());
        }
        fits
    }

    fn occupy(&mut self, room: &mut RoomBlock) {
        let voxel_size = self.grid.voxel_size();
        let center = room.voxel_center(voxel_size);
        self.mark_footprint(room.get_coordinates(center, voxel_size));
    }
}
