use alloc::string::String;
use alloc::vec::Vec;

use manyfmt::Refmt as _;

use crate::ConnectionPoint;
use crate::math::{
    Aab, FreeCoordinate, FreePoint, FreeVector, GridAab, GridPoint, GridSize, GridVector,
    QuarterTurns, grid_to_free, reorient, round_toward_zero, size_to_free,
};
use crate::util::ConciseDebug;

/// Amount, in world units, subtracted from a room's extent on every axis before its
/// bounding box is built, so that rooms placed flush against each other do not overlap.
pub const BOUNDS_EPSILON: FreeCoordinate = 0.01;

// -------------------------------------------------------------------------------------------------

/// Description of a kind of room, from which any number of [`RoomBlock`]s can be made.
///
/// Sizes and offsets are in world units. The offset is the displacement of the room's
/// box center from the room's placement origin, which is the point that connection point
/// positions are relative to.
///
/// ```
/// use dungen::{ConnectionPoint, RoomTemplate};
/// use dungen::math::QuarterTurns;
///
/// let corridor = RoomTemplate::new("corridor", [2, 2, 6])
///     .with_point(ConnectionPoint::new([0.0, 0.0, 3.0], QuarterTurns::ZERO))
///     .with_point(ConnectionPoint::new([0.0, 0.0, -3.0], QuarterTurns::TWO));
/// assert_eq!(corridor.points().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomTemplate {
    name: String,
    size: GridSize,
    #[cfg_attr(feature = "serde", serde(default))]
    offset: GridVector,
    #[cfg_attr(feature = "serde", serde(default))]
    points: Vec<ConnectionPoint>,
}

impl RoomTemplate {
    /// Creates a template with no offset and no connection points.
    pub fn new(name: impl Into<String>, size: impl Into<GridSize>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            offset: GridVector::zero(),
            points: Vec::new(),
        }
    }

    /// Sets the displacement of the room's box center from its placement origin.
    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<GridVector>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Adds a connection point. Points are numbered in the order they are added.
    #[must_use]
    pub fn with_point(mut self, point: ConnectionPoint) -> Self {
        self.points.push(point);
        self
    }

    /// Name used in log messages and room labels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extent of the room in world units, unrotated.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Displacement of the room's box center from its placement origin, unrotated.
    pub fn offset(&self) -> GridVector {
        self.offset
    }

    /// The room's connection points, unrotated.
    pub fn points(&self) -> &[ConnectionPoint] {
        &self.points
    }

    /// Makes a new unplaced, unrotated room at the origin.
    ///
    /// Connection point ids are assigned here, in declaration order.
    pub fn instantiate(&self) -> RoomBlock {
        let mut points = self.points.clone();
        for (id, point) in points.iter_mut().enumerate() {
            point.set_id(id);
        }
        RoomBlock {
            name: self.name.clone(),
            size: self.size,
            offset: self.offset,
            position: FreePoint::origin(),
            rotation: QuarterTurns::ZERO,
            points,
            dirty: true,
            bounds: Aab::ZERO,
            footprint: None,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A room which has been, or is about to be, placed in a dungeon.
///
/// The stored extent and offset are always in the room's current (rotated) frame;
/// [`RoomBlock::reorient_size()`] keeps them in step with the rotation.
/// The bounding box and voxel footprint are computed on demand and cached until the room is
/// moved or reoriented.
#[derive(Clone, Debug)]
pub struct RoomBlock {
    name: String,
    size: GridSize,
    offset: GridVector,
    position: FreePoint,
    rotation: QuarterTurns,
    points: Vec<ConnectionPoint>,

    /// Whether `bounds` and `footprint` must be recomputed before use.
    dirty: bool,
    bounds: Aab,
    footprint: Option<CachedFootprint>,
}

#[derive(Clone, Debug)]
struct CachedFootprint {
    center: FreePoint,
    voxel_size: GridSize,
    footprint: Footprint,
}

impl RoomBlock {
    /// Name of the template this room was made from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extent of the room in world units, in its current orientation.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Displacement of the box center from the placement origin, in its current orientation.
    pub fn offset(&self) -> GridVector {
        self.offset
    }

    /// Placement origin of the room.
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// Rotation of the room about the vertical axis.
    pub fn rotation(&self) -> QuarterTurns {
        self.rotation
    }

    /// Center of the room's box in the dungeon.
    pub fn center(&self) -> FreePoint {
        self.position + grid_to_free(self.offset)
    }

    /// The room's connection points, in id order.
    pub fn points(&self) -> &[ConnectionPoint] {
        &self.points
    }

    /// Mutable access to one connection point.
    pub fn point_mut(&mut self, id: usize) -> Option<&mut ConnectionPoint> {
        self.points.get_mut(id)
    }

    /// Position of the given connection point in the dungeon.
    pub fn point_position(&self, id: usize) -> Option<FreePoint> {
        self.points
            .get(id)
            .map(|point| point.world_position(self.position, self.rotation))
    }

    /// Outward direction of the given connection point in the dungeon.
    pub fn point_facing(&self, id: usize) -> Option<QuarterTurns> {
        self.points.get(id).map(|point| point.world_facing(self.rotation))
    }

    /// Moves the placement origin to `position`.
    pub fn set_position(&mut self, position: FreePoint) {
        self.position = position;
        self.dirty = true;
    }

    /// Moves the room by `offset`.
    pub fn translate(&mut self, offset: FreeVector) {
        self.set_position(self.position + offset);
    }

    /// Turns the room about its placement origin, carrying its connection points and its
    /// extent along.
    pub fn rotate_by(&mut self, turns: QuarterTurns) {
        self.rotation = self.rotation + turns;
        self.reorient_size(turns);
    }

    /// Rotates the stored extent and offset by `turns`, without changing the rotation that
    /// connection points are placed with.
    ///
    /// [`RoomBlock::rotate_by()`] calls this; it is public so that the effect on a room's
    /// geometry can be examined before the room is placed.
    pub fn reorient_size(&mut self, turns: QuarterTurns) {
        (self.size, self.offset) = reorient(self.size, self.offset, turns);
        self.dirty = true;
    }

    /// Turns and moves the room so that its connection point `id` sits at `target_position`
    /// and faces the opposite way from `target_facing`, as needed to join it to a point
    /// with that position and facing.
    ///
    /// Returns [`None`], leaving the room unchanged, if there is no such point.
    pub fn mate_to(
        &mut self,
        id: usize,
        target_position: FreePoint,
        target_facing: QuarterTurns,
    ) -> Option<()> {
        let facing = self.point_facing(id)?;
        self.rotate_by(target_facing - facing + QuarterTurns::TWO);
        let socket = self.point_position(id)?;
        self.translate(target_position - socket);
        Some(())
    }

    fn refresh(&mut self) {
        if self.dirty {
            let extent = size_to_free(self.size) - FreeVector::splat(BOUNDS_EPSILON);
            self.bounds = Aab::from_center_size(self.center(), extent);
            self.footprint = None;
            self.dirty = false;
        }
    }

    /// Returns the room's bounding box, slightly shrunk by [`BOUNDS_EPSILON`].
    pub fn get_bounds(&mut self) -> Aab {
        self.refresh();
        self.bounds
    }

    /// Computes the voxel cells covered by the room when its center is at `center`,
    /// which is in voxel units.
    ///
    /// The result is cached until the room is moved or reoriented, or until different
    /// arguments are given. If the room's extent is not a multiple of `voxel_size`, the
    /// footprint is logged as anomalous and [`Footprint::is_reliable()`] returns false.
    pub fn get_coordinates(&mut self, center: FreePoint, voxel_size: GridSize) -> &Footprint {
        self.refresh();
        if self
            .footprint
            .as_ref()
            .is_none_or(|cached| cached.center != center || cached.voxel_size != voxel_size)
        {
            self.footprint = None;
        }
        let (name, size) = (&self.name, self.size);
        &self
            .footprint
            .get_or_insert_with(|| CachedFootprint {
                center,
                voxel_size,
                footprint: compute_logged(name, size, center, voxel_size),
            })
            .footprint
    }

    /// Position of the room's box center in voxel units.
    pub fn voxel_center(&self, voxel_size: GridSize) -> FreePoint {
        let center = self.center();
        let voxel = size_to_free(voxel_size);
        FreePoint::new(center.x / voxel.x, center.y / voxel.y, center.z / voxel.z)
    }
}

fn compute_logged(name: &str, size: GridSize, center: FreePoint, voxel_size: GridSize) -> Footprint {
    let footprint = Footprint::compute(size, center, voxel_size);
    if footprint.is_reliable() {
        log::trace!(
            "{name}: {count} cells in {bounds}",
            count = footprint.len(),
            bounds = footprint.bounds().refmt(&ConciseDebug),
        );
    } else {
        log::warn!(
            "{name}: footprint at {center} missed its cell count by {shortfall} \
                (size {size}, voxel size {voxel_size})",
            center = center.refmt(&ConciseDebug),
            shortfall = footprint.shortfall(),
            size = size.refmt(&ConciseDebug),
            voxel_size = voxel_size.refmt(&ConciseDebug),
        );
    }
    footprint
}

// -------------------------------------------------------------------------------------------------

/// The set of voxel cells a room covers, as computed by [`RoomBlock::get_coordinates()`].
///
/// Cells are listed with X varying slowest and Z fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Footprint {
    cells: Vec<GridPoint>,
    bounds: GridAab,
    expected_volume: FreeCoordinate,
}

impl Footprint {
    /// Computes the cells covered by a room of extent `size` (in world units) centered at
    /// `center` (in voxel units).
    ///
    /// The lower corner on each axis is `center - (cells + 1) / 2`, rounded with
    /// [`round_toward_zero`]; this places even-sized rooms evenly about integer centers and
    /// odd-sized rooms about half-integer centers.
    pub fn compute(size: GridSize, center: FreePoint, voxel_size: GridSize) -> Self {
        let cell_counts = GridSize::new(
            size.width.checked_div(voxel_size.width).unwrap_or(0),
            size.height.checked_div(voxel_size.height).unwrap_or(0),
            size.depth.checked_div(voxel_size.depth).unwrap_or(0),
        );
        let exact = size_to_free(size);
        let voxel = size_to_free(voxel_size);
        let expected_volume = (exact.x / voxel.x) * (exact.y / voxel.y) * (exact.z / voxel.z);

        let half = (size_to_free(cell_counts) + FreeVector::splat(1.0)) / 2.0;
        let lower = GridPoint::new(
            round_toward_zero(center.x - half.x),
            round_toward_zero(center.y - half.y),
            round_toward_zero(center.z - half.z),
        );
        let bounds = GridAab::checked_from_lower_size(lower, cell_counts)
            .unwrap_or(GridAab::ORIGIN_EMPTY);

        Self {
            cells: bounds.interior_iter().collect(),
            bounds,
            expected_volume,
        }
    }

    /// The covered cells.
    pub fn cells(&self) -> &[GridPoint] {
        &self.cells
    }

    /// Number of covered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are covered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The box enclosing all the cells.
    pub fn bounds(&self) -> GridAab {
        self.bounds
    }

    /// Volume of the room divided by the volume of one voxel.
    pub fn expected_volume(&self) -> FreeCoordinate {
        self.expected_volume
    }

    /// Difference between [`Footprint::expected_volume()`] and the number of cells produced.
    pub fn shortfall(&self) -> FreeCoordinate {
        self.expected_volume - self.cells.len() as FreeCoordinate
    }

    /// Whether the cells account for exactly the room's volume.
    ///
    /// An unreliable footprint does not describe the room's shape correctly and should not
    /// be used to decide whether the room fits.
    pub fn is_reliable(&self) -> bool {
        self.shortfall() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample_template() -> RoomTemplate {
        RoomTemplate::new("hall", [4, 2, 6])
            .with_offset([1, 0, 0])
            .with_point(ConnectionPoint::new([0.0, 0.0, 3.0], QuarterTurns::ZERO))
            .with_point(ConnectionPoint::new([3.0, 0.0, 0.0], QuarterTurns::ONE))
    }

    #[test]
    fn instantiate_numbers_points() {
        let room = sample_template().instantiate();
        assert_eq!(
            room.points().iter().map(ConnectionPoint::id).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert!(room.points().iter().all(ConnectionPoint::is_open));
        assert_eq!(room.rotation(), QuarterTurns::ZERO);
        assert_eq!(room.position(), FreePoint::origin());
    }

    #[test]
    fn bounds_are_shrunk_and_offset() {
        let mut room = sample_template().instantiate();
        room.set_position(FreePoint::new(10.0, 0.0, 0.0));
        let bounds = room.get_bounds();
        assert_eq!(bounds.center(), FreePoint::new(11.0, 0.0, 0.0));
        let size = bounds.size();
        assert!((size.x - (4.0 - BOUNDS_EPSILON)).abs() < 1e-9, "{size:?}");
        assert!((size.z - (6.0 - BOUNDS_EPSILON)).abs() < 1e-9, "{size:?}");
    }

    #[test]
    fn bounds_cache_invalidated_by_moves_and_turns() {
        let mut room = sample_template().instantiate();
        let before = room.get_bounds();
        assert_eq!(room.get_bounds(), before);

        room.translate(FreeVector::new(0.0, 0.0, 5.0));
        let moved = room.get_bounds();
        assert_eq!(moved.center(), FreePoint::new(1.0, 0.0, 5.0));

        room.reorient_size(QuarterTurns::ONE);
        let turned = room.get_bounds();
        assert_eq!(turned.center(), FreePoint::new(0.0, 0.0, 4.0));
        assert!(turned.size().x > turned.size().z);
    }

    #[test]
    fn coincident_rooms_intersect() {
        let mut a = sample_template().instantiate();
        let mut b = sample_template().instantiate();
        assert!(a.get_bounds().intersects_strictly(b.get_bounds()));
    }

    #[rstest]
    #[case(FreeVector::new(4.0, 0.0, 0.0))]
    #[case(FreeVector::new(-4.0, 0.0, 0.0))]
    #[case(FreeVector::new(0.0, 2.0, 0.0))]
    #[case(FreeVector::new(0.0, 0.0, 6.0))]
    #[case(FreeVector::new(3.0, 0.0, 9.0))]
    fn separated_rooms_do_not_intersect(#[case] displacement: FreeVector) {
        let mut a = sample_template().instantiate();
        let mut b = sample_template().instantiate();
        b.translate(displacement);
        assert!(!a.get_bounds().intersects_strictly(b.get_bounds()));
    }

    #[test]
    fn rotate_by_moves_points_and_extent() {
        let mut room = sample_template().instantiate();
        room.rotate_by(QuarterTurns::ONE);
        assert_eq!(room.size(), GridSize::new(6, 2, 4));
        assert_eq!(room.offset(), GridVector::new(0, 0, -1));
        assert_eq!(room.point_position(0), Some(FreePoint::new(3.0, 0.0, 0.0)));
        assert_eq!(room.point_facing(0), Some(QuarterTurns::ONE));
        assert_eq!(room.point_position(1), Some(FreePoint::new(0.0, 0.0, -3.0)));
        assert_eq!(room.point_facing(1), Some(QuarterTurns::TWO));
        assert_eq!(room.point_position(2), None);
    }

    #[rstest]
    fn mate_to_faces_target(
        #[values(0, 1)] socket: usize,
        #[values(QuarterTurns::ZERO, QuarterTurns::ONE, QuarterTurns::TWO, QuarterTurns::THREE)]
        target_facing: QuarterTurns,
    ) {
        let target = FreePoint::new(7.0, 1.0, -3.0);
        let mut room = sample_template().instantiate();
        room.mate_to(socket, target, target_facing).unwrap();
        assert_eq!(room.point_position(socket), Some(target));
        assert_eq!(
            room.point_facing(socket),
            Some(target_facing + QuarterTurns::TWO)
        );
        // The extent follows the rotation.
        let expected_size = room.rotation().transform_size(GridSize::new(4, 2, 6));
        assert_eq!(room.size(), expected_size);
    }

    #[test]
    fn mate_to_missing_point() {
        let mut room = sample_template().instantiate();
        assert_eq!(room.mate_to(5, FreePoint::new(1.0, 0.0, 0.0), QuarterTurns::ONE), None);
        assert_eq!(room.rotation(), QuarterTurns::ZERO);
        assert_eq!(room.position(), FreePoint::origin());
    }

    #[test]
    fn mated_rooms_sit_flush() {
        // Two 4×2×6 halls joined end to end along Z.
        let mut first = sample_template().instantiate();
        let mut second = sample_template().instantiate();
        let target = first.point_position(0).unwrap();
        let facing = first.point_facing(0).unwrap();
        second.mate_to(0, target, facing).unwrap();
        assert_eq!(second.rotation(), QuarterTurns::TWO);
        assert_eq!(second.center(), FreePoint::new(-1.0, 0.0, 6.0));
        assert!(!first.get_bounds().intersects_strictly(second.get_bounds()));
    }

    #[test]
    fn four_turns_restore_geometry() {
        let mut room = sample_template().instantiate();
        let original = (room.size(), room.offset(), room.get_bounds());
        for _ in 0..4 {
            room.rotate_by(QuarterTurns::ONE);
        }
        assert_eq!((room.size(), room.offset(), room.get_bounds()), original);
        assert_eq!(room.rotation(), QuarterTurns::ZERO);
    }

    #[test]
    fn footprint_even_size_centered_on_integer() {
        let footprint = Footprint::compute(
            GridSize::new(2, 2, 2),
            FreePoint::origin(),
            GridSize::splat(1),
        );
        assert!(footprint.is_reliable());
        assert_eq!(footprint.bounds(), GridAab::from_lower_size([-1, -1, -1], [2, 2, 2]));
        assert_eq!(footprint.len(), 8);
        assert_eq!(footprint.cells()[0], GridPoint::new(-1, -1, -1));
        assert_eq!(footprint.cells()[1], GridPoint::new(-1, -1, 0));
    }

    #[test]
    fn footprint_odd_size_uses_tie_toward_zero() {
        // Lower corner is 0.5 - 2 = -1.5, which rounds to -1 rather than -2.
        let footprint = Footprint::compute(
            GridSize::new(3, 1, 1),
            FreePoint::new(0.5, 0.0, 0.0),
            GridSize::splat(1),
        );
        assert_eq!(footprint.bounds(), GridAab::from_lower_size([-1, -1, -1], [3, 1, 1]));
        assert!(footprint.is_reliable());
    }

    #[rstest]
    #[case([4, 2, 6], [2, 2, 2], 6)]
    #[case([4, 2, 6], [1, 1, 1], 48)]
    #[case([8, 4, 4], [4, 2, 4], 4)]
    fn footprint_count_matches_volume(
        #[case] size: [u32; 3],
        #[case] voxel_size: [u32; 3],
        #[case] expected: usize,
    ) {
        for center in [
            FreePoint::origin(),
            FreePoint::new(-3.5, 2.0, 7.25),
            FreePoint::new(100.5, -40.0, 0.5),
        ] {
            let footprint = Footprint::compute(size.into(), center, voxel_size.into());
            assert_eq!(footprint.len(), expected, "{center:?}");
            assert!(footprint.is_reliable());
        }
    }

    #[test]
    fn footprint_anomaly_when_not_divisible() {
        let mut room = RoomTemplate::new("odd", [5, 2, 2]).instantiate();
        let footprint = room.get_coordinates(FreePoint::origin(), GridSize::new(2, 2, 2));
        assert_eq!(footprint.len(), 2);
        assert_eq!(footprint.shortfall(), 0.5);
        assert!(!footprint.is_reliable());
    }

    #[test]
    fn footprint_overflow_is_anomaly() {
        let footprint = Footprint::compute(
            GridSize::new(2, 2, 2),
            FreePoint::new(1e12, 0.0, 0.0),
            GridSize::splat(1),
        );
        assert!(footprint.is_empty());
        assert!(!footprint.is_reliable());
    }

    #[test]
    fn footprint_cache_follows_arguments() {
        let mut room = RoomTemplate::new("cube", [2, 2, 2]).instantiate();
        let first = room.get_coordinates(FreePoint::origin(), GridSize::splat(1)).clone();
        let second = room
            .get_coordinates(FreePoint::new(5.0, 0.0, 0.0), GridSize::splat(1))
            .clone();
        assert_ne!(first, second);
        // 5 - 1.5 = 3.5 rounds toward zero.
        assert_eq!(second.bounds().lower_bounds(), GridPoint::new(3, -1, -1));

        room.reorient_size(QuarterTurns::TWO);
        let third = room.get_coordinates(FreePoint::origin(), GridSize::splat(1));
        assert_eq!(*third, first);
    }

    #[test]
    fn voxel_center_includes_offset() {
        let mut room = sample_template().instantiate();
        room.set_position(FreePoint::new(3.0, 4.0, 8.0));
        assert_eq!(
            room.voxel_center(GridSize::new(2, 2, 4)),
            FreePoint::new(2.0, 2.0, 2.0)
        );
    }
}
