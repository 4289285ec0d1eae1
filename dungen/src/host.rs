use crate::math::LineVertex;
use crate::{BlockId, ConnectionPoint, PlacedRoom};

/// Receives notice of everything the [`GrowthEngine`](crate::GrowthEngine) does that an
/// application displaying the dungeon would need to reflect.
///
/// Every method does nothing by default, so implementations need only handle what they
/// care about. The unit type `()` is a host which ignores everything.
///
/// The [`Dungeon`](crate::Dungeon) remains the authoritative record; the host is only
/// told about changes to it, and is never asked for anything.
#[allow(unused_variables)]
pub trait DungeonHost {
    /// A room has been placed. Its position and rotation will not change afterward.
    fn spawn(&mut self, id: BlockId, room: &PlacedRoom) {}

    /// A previously placed room has been removed, because the dungeon is being regenerated
    /// or cleared. Rooms are destroyed in the reverse of the order they were placed.
    fn destroy(&mut self, id: BlockId) {}

    /// A connection point of the room `id` is closed and should no longer be shown as open.
    ///
    /// Called exactly once for every point of every placed room by the time generation
    /// finishes.
    fn hide_point(&mut self, id: BlockId, point: &ConnectionPoint) {}

    /// Line segments outlining the bounding box of the room `id`, for debugging.
    fn draw_bounds(&mut self, id: BlockId, lines: &[LineVertex]) {}
}

impl DungeonHost for () {}

impl<H: ?Sized + DungeonHost> DungeonHost for &mut H {
    fn spawn(&mut self, id: BlockId, room: &PlacedRoom) {
        (**self).spawn(id, room)
    }
    fn destroy(&mut self, id: BlockId) {
        (**self).destroy(id)
    }
    fn hide_point(&mut self, id: BlockId, point: &ConnectionPoint) {
        (**self).hide_point(id, point)
    }
    fn draw_bounds(&mut self, id: BlockId, lines: &[LineVertex]) {
        (**self).draw_bounds(id, lines)
    }
}
