//! The result of generation: placed rooms and how they are joined.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::math::{Aab, LineVertex, Wireframe};
use crate::{DungeonHost, DungeonOccupancy, RoomBlock, VoxelOccupancy};

/// Identifies a room within a [`Dungeon`].
///
/// Ids are assigned in placement order starting from zero, which is always the starting
/// room. They are not meaningful across different dungeons.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlockId(usize);

impl BlockId {
    /// Position of the room in [`Dungeon::rooms()`].
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a room was joined to the room it grew from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct Attachment {
    /// The room that was already placed.
    pub parent: BlockId,
    /// Id of the connection point on the parent.
    pub parent_point: usize,
    /// Id of the connection point on the attached room.
    pub child_point: usize,
}

/// A room that is part of a [`Dungeon`].
#[derive(Clone, Debug)]
pub struct PlacedRoom {
    id: BlockId,
    palette_index: Option<usize>,
    block: RoomBlock,
    bounds: Aab,
    attachment: Option<Attachment>,
}

impl PlacedRoom {
    #[allow(missing_docs)]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Order in which the room was placed; the starting room is 0.
    pub fn sequence(&self) -> usize {
        self.id.0
    }

    /// Index into [`DungeonSpec::palette`](crate::DungeonSpec::palette) of the entry this
    /// room was made from, or [`None`] for the starting room.
    pub fn palette_index(&self) -> Option<usize> {
        self.palette_index
    }

    /// The room's geometry and connection points.
    pub fn block(&self) -> &RoomBlock {
        &self.block
    }

    pub(crate) fn block_mut(&mut self) -> &mut RoomBlock {
        &mut self.block
    }

    /// Bounding box of the room, as used for [bounds collision](crate::CollisionMode::Bounds).
    pub fn bounds(&self) -> Aab {
        self.bounds
    }

    /// How this room was joined to its parent, or [`None`] for the starting room.
    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    /// Name for the room combining its sequence number and template name, such as
    /// `"3: corridor"`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.sequence(), self.block.name())
    }
}

impl Wireframe for PlacedRoom {
    fn wireframe_points<E>(&self, output: &mut E)
    where
        E: Extend<LineVertex>,
    {
        self.bounds.wireframe_points(output)
    }
}

// -------------------------------------------------------------------------------------------------

/// A generated dungeon: a tree of [`PlacedRoom`]s rooted at the starting room.
///
/// Produced by [`GrowthEngine::generate()`](crate::GrowthEngine::generate).
#[derive(Clone, Debug)]
pub struct Dungeon {
    rooms: Vec<PlacedRoom>,
    placement_counts: Vec<u32>,
    occupancy: DungeonOccupancy,
}

impl Dungeon {
    pub(crate) fn new(palette_len: usize, occupancy: DungeonOccupancy) -> Self {
        Self {
            rooms: Vec::new(),
            placement_counts: vec![0; palette_len],
            occupancy,
        }
    }

    /// Adds `block` to the dungeon and tells `host` about it.
    ///
    /// The block's position and rotation must be final.
    pub(crate) fn spawn(
        &mut self,
        mut block: RoomBlock,
        palette_index: Option<usize>,
        attachment: Option<Attachment>,
        host: &mut (impl DungeonHost + ?Sized),
    ) -> BlockId {
        let id = BlockId(self.rooms.len());
        if let Some(index) = palette_index {
            if let Some(count) = self.placement_counts.get_mut(index) {
                *count += 1;
            }
        }
        let room = PlacedRoom {
            id,
            palette_index,
            bounds: block.get_bounds(),
            block,
            attachment,
        };
        host.spawn(id, &room);
        self.rooms.push(room);
        id
    }

    /// All rooms, in placement order.
    pub fn rooms(&self) -> &[PlacedRoom] {
        &self.rooms
    }

    /// The room with the given id, if it belongs to this dungeon.
    pub fn room(&self, id: BlockId) -> Option<&PlacedRoom> {
        self.rooms.get(id.0)
    }

    pub(crate) fn room_mut(&mut self, id: BlockId) -> Option<&mut PlacedRoom> {
        self.rooms.get_mut(id.0)
    }

    /// The starting room.
    pub fn root(&self) -> Option<&PlacedRoom> {
        self.rooms.first()
    }

    /// Rooms that were attached to the room `id`, in placement order.
    pub fn children(&self, id: BlockId) -> impl Iterator<Item = &PlacedRoom> + '_ {
        self.rooms
            .iter()
            .filter(move |room| room.attachment.is_some_and(|a| a.parent == id))
    }

    /// Number of rooms placed from each palette entry, indexed like
    /// [`DungeonSpec::palette`](crate::DungeonSpec::palette).
    pub fn placement_counts(&self) -> &[u32] {
        &self.placement_counts
    }

    #[allow(missing_docs)]
    pub fn occupancy(&self) -> &DungeonOccupancy {
        &self.occupancy
    }

    pub(crate) fn occupancy_mut(&mut self) -> &mut DungeonOccupancy {
        &mut self.occupancy
    }

    /// The voxel grid, if the dungeon was generated with
    /// [`CollisionMode::Voxels`](crate::CollisionMode::Voxels).
    pub fn voxel_occupancy(&self) -> Option<&VoxelOccupancy> {
        match &self.occupancy {
            DungeonOccupancy::Voxels(voxels) => Some(voxels),
            DungeonOccupancy::Bounds(_) => None,
        }
    }

    /// Number of rooms, including the starting room.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Number of connection points, over all rooms, which are still open.
    ///
    /// This is zero for any dungeon returned from a completed generation.
    pub fn open_point_count(&self) -> usize {
        self.rooms
            .iter()
            .flat_map(|room| room.block.points())
            .filter(|point| point.is_open())
            .count()
    }

    /// Removes every room, newest first, telling `host` about each.
    pub(crate) fn destroy(self, host: &mut (impl DungeonHost + ?Sized)) {
        log::debug!("destroying {count} rooms", count = self.rooms.len());
        for room in self.rooms.iter().rev() {
            host.destroy(room.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FreeVector, QuarterTurns};
    use crate::{BoundsOccupancy, ConnectionPoint, RoomTemplate};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl DungeonHost for Log {
        fn spawn(&mut self, id: BlockId, room: &PlacedRoom) {
            self.0.push(format!("spawn {id} {}", room.label()));
        }
        fn destroy(&mut self, id: BlockId) {
            self.0.push(format!("destroy {id}"));
        }
    }

    fn template(name: &str) -> RoomTemplate {
        RoomTemplate::new(name, [2, 2, 2])
            .with_point(ConnectionPoint::new([0.0, 0.0, 1.0], QuarterTurns::ZERO))
    }

    #[test]
    fn spawn_tree_and_destroy() {
        let mut host = Log::default();
        let mut dungeon = Dungeon::new(2, DungeonOccupancy::Bounds(BoundsOccupancy::new()));
        let root = dungeon.spawn(template("hub").instantiate(), None, None, &mut host);
        let mut child_block = template("arm").instantiate();
        child_block.translate(FreeVector::new(0.0, 0.0, 2.0));
        let attachment = Attachment {
            parent: root,
            parent_point: 0,
            child_point: 0,
        };
        let child = dungeon.spawn(child_block, Some(1), Some(attachment), &mut host);

        assert_eq!(dungeon.len(), 2);
        assert_eq!(dungeon.root().map(PlacedRoom::id), Some(root));
        assert_eq!(dungeon.placement_counts(), &[0, 1]);
        assert_eq!(
            dungeon.children(root).map(PlacedRoom::id).collect::<Vec<_>>(),
            vec![child]
        );
        assert_eq!(dungeon.children(child).count(), 0);
        assert_eq!(dungeon.room(child).unwrap().attachment(), Some(attachment));
        assert_eq!(dungeon.room(child).unwrap().bounds().center().z, 2.0);
        assert!(dungeon.voxel_occupancy().is_none());
        assert_eq!(dungeon.open_point_count(), 2);

        dungeon.destroy(&mut host);
        assert_eq!(
            host.0,
            vec!["spawn #0 0: hub", "spawn #1 1: arm", "destroy #1", "destroy #0"]
        );
    }

    #[test]
    fn wireframe_outlines_bounds() {
        let mut dungeon = Dungeon::new(0, DungeonOccupancy::Bounds(BoundsOccupancy::new()));
        let id = dungeon.spawn(template("hub").instantiate(), None, None, &mut ());
        let room = dungeon.room(id).unwrap();
        let mut lines: Vec<LineVertex> = Vec::new();
        room.wireframe_points(&mut lines);
        assert_eq!(lines.len(), 24);
        assert!(lines.iter().all(|v| room.bounds().contains(v.position)));
    }
}
