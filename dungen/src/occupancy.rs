use alloc::vec::Vec;

use manyfmt::Refmt as _;

use crate::math::Aab;
use crate::util::ConciseDebug;
use crate::{RoomBlock, VoxelOccupancy};

/// Record of the space taken up by placed rooms, used to decide whether another room fits.
///
/// Both methods take the room mutably only so that it can cache its geometry.
pub trait Occupancy {
    /// Returns whether `candidate`, at its current position and rotation, can be placed
    /// without colliding with anything already recorded.
    fn fits(&self, candidate: &mut RoomBlock) -> bool;

    /// Records the space taken by `room`, which has been placed.
    fn occupy(&mut self, room: &mut RoomBlock);
}

impl<T: ?Sized + Occupancy> Occupancy for &mut T {
    fn fits(&self, candidate: &mut RoomBlock) -> bool {
        (**self).fits(candidate)
    }
    fn occupy(&mut self, room: &mut RoomBlock) {
        (**self).occupy(room)
    }
}

/// [`Occupancy`] by comparing bounding boxes.
///
/// Every placed room's box is kept, and a candidate fits if its box does not overlap any of
/// them with positive volume. Boxes are already shrunk by
/// [`BOUNDS_EPSILON`](crate::BOUNDS_EPSILON), so rooms sharing a wall are allowed.
#[derive(Clone, Debug, Default)]
pub struct BoundsOccupancy {
    placed: Vec<Aab>,
}

impl BoundsOccupancy {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding boxes of the recorded rooms, in placement order.
    pub fn boxes(&self) -> &[Aab] {
        &self.placed
    }
}

impl Occupancy for BoundsOccupancy {
    fn fits(&self, candidate: &mut RoomBlock) -> bool {
        let bounds = candidate.get_bounds();
        match self.placed.iter().position(|placed| placed.intersects_strictly(bounds)) {
            Some(index) => {
                log::debug!(
                    "{name} at {bounds} overlaps placed room #{index}",
                    name = candidate.name(),
                    bounds = bounds.refmt(&ConciseDebug),
                );
                false
            }
            None => true,
        }
    }

    fn occupy(&mut self, room: &mut RoomBlock) {
        self.placed.push(room.get_bounds());
    }
}

/// The occupancy record of a [`Dungeon`](crate::Dungeon), according to its
/// [`CollisionMode`](crate::CollisionMode).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum DungeonOccupancy {
    #[allow(missing_docs)]
    Bounds(BoundsOccupancy),
    #[allow(missing_docs)]
    Voxels(VoxelOccupancy),
}

impl Occupancy for DungeonOccupancy {
    fn fits(&self, candidate: &mut RoomBlock) -> bool {
        match self {
            Self::Bounds(o) => o.fits(candidate),
            Self::Voxels(o) => o.fits(candidate),
        }
    }

    fn occupy(&mut self, room: &mut RoomBlock) {
        match self {
            Self::Bounds(o) => o.occupy(room),
            Self::Voxels(o) => o.occupy(room),
        }
    }
}
