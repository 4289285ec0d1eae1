//! [`GrowthEngine`], which grows a [`Dungeon`] outward from its starting room.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use manyfmt::Refmt as _;
use rand::{Rng, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::math::{LineVertex, Wireframe as _};
use crate::util::ConciseDebug;
use crate::{
    Attachment, BlockId, BoundsOccupancy, CollisionMode, ConfigError, Dungeon, DungeonHost,
    DungeonOccupancy, DungeonSpec, MatingSocket, Occupancy as _, RoomBlock, VoxelGrid,
    VoxelOccupancy, VoxelSizeSetting, derive_voxel_size,
};

/// Phase of a [`GrowthEngine`].
///
/// Between calls to [`GrowthEngine::generate()`] the engine is always either
/// [`Idle`](Self::Idle) or [`Done`](Self::Done); the other states are passed through
/// during a call and appear in log messages.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GenerationState {
    /// Nothing has been generated, or the last attempt was refused.
    Idle,
    /// Checking the configuration.
    Validating,
    /// Attaching rooms.
    Growing,
    /// Closing the connection points of rooms that were never visited.
    Finalizing,
    /// A dungeon has been generated.
    Done,
}

/// Errors from [`GrowthEngine::generate()`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The [`DungeonSpec`] cannot be generated.
    #[error("invalid dungeon configuration")]
    Config(#[from] ConfigError),
}

/// Grows dungeons from a [`DungeonSpec`].
///
/// The engine owns its source of randomness, so successive calls to
/// [`generate()`](Self::generate) produce different dungeons, while two engines created
/// with the same seed produce identical sequences of dungeons.
///
/// ```
/// use dungen::{ConnectionPoint, DungeonSpec, GrowthEngine, PaletteEntry, RoomTemplate};
/// use dungen::math::QuarterTurns;
///
/// let corridor = RoomTemplate::new("corridor", [2, 2, 6])
///     .with_point(ConnectionPoint::new([0.0, 0.0, 3.0], QuarterTurns::ZERO))
///     .with_point(ConnectionPoint::new([0.0, 0.0, -3.0], QuarterTurns::TWO));
/// let spec = DungeonSpec::new(corridor.clone())
///     .with_palette_entry(PaletteEntry::new(corridor, 4));
///
/// let mut engine = GrowthEngine::with_seed(spec, 1234);
/// let dungeon = engine.generate(&mut ()).unwrap();
/// assert_eq!(dungeon.len(), 5);
/// assert_eq!(dungeon.open_point_count(), 0);
/// ```
#[derive(Debug)]
pub struct GrowthEngine<R = Xoshiro256Plus> {
    spec: DungeonSpec,
    rng: R,
    state: GenerationState,
    dungeon: Option<Dungeon>,
}

impl GrowthEngine<Xoshiro256Plus> {
    /// Creates an engine whose randomness is determined by `seed`.
    pub fn with_seed(spec: DungeonSpec, seed: u64) -> Self {
        Self::new(spec, Xoshiro256Plus::seed_from_u64(seed))
    }
}

impl<R: Rng> GrowthEngine<R> {
    /// Creates an engine which draws its random choices from `rng`.
    pub fn new(spec: DungeonSpec, rng: R) -> Self {
        Self {
            spec,
            rng,
            state: GenerationState::Idle,
            dungeon: None,
        }
    }

    #[allow(missing_docs)]
    pub fn spec(&self) -> &DungeonSpec {
        &self.spec
    }

    /// Replaces the configuration used by the next call to [`generate()`](Self::generate).
    ///
    /// The current dungeon, if any, is kept until then.
    pub fn set_spec(&mut self, spec: DungeonSpec) {
        self.spec = spec;
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// The most recently generated dungeon, if any.
    pub fn dungeon(&self) -> Option<&Dungeon> {
        self.dungeon.as_ref()
    }

    /// Whether a dungeon currently exists, which [`generate()`](Self::generate) will destroy
    /// before building a new one.
    pub fn is_generated(&self) -> bool {
        self.dungeon.is_some()
    }

    /// Destroys the current dungeon, if any, telling `host` about each room.
    pub fn clear(&mut self, host: &mut (impl DungeonHost + ?Sized)) {
        if let Some(dungeon) = self.dungeon.take() {
            dungeon.destroy(host);
        }
        self.set_state(GenerationState::Idle);
    }

    /// Builds a new dungeon, replacing the previous one.
    ///
    /// If the configuration is invalid, nothing is changed (the previous dungeon, if any,
    /// is kept) and the engine returns to [`GenerationState::Idle`]. Otherwise generation
    /// always succeeds, though the dungeon may be smaller than the palette allows if rooms
    /// could not be fitted.
    pub fn generate(
        &mut self,
        host: &mut (impl DungeonHost + ?Sized),
    ) -> Result<&Dungeon, GenerateError> {
        self.set_state(GenerationState::Validating);
        let (start, occupancy) = match prepare(&self.spec) {
            Ok(prepared) => prepared,
            Err(error) => {
                log::warn!("refusing to generate dungeon: {error}");
                self.set_state(GenerationState::Idle);
                return Err(error.into());
            }
        };

        self.set_state(GenerationState::Growing);
        if let Some(previous) = self.dungeon.take() {
            previous.destroy(&mut *host);
        }
        log::info!(
            "generating dungeon from {start:?} with {count} palette entries",
            start = start.name(),
            count = self.spec.palette.len(),
        );

        let mut growth = Growth {
            spec: &self.spec,
            rng: &mut self.rng,
            host,
            dungeon: Dungeon::new(self.spec.palette.len(), occupancy),
            palette: self
                .spec
                .palette
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.max_placements > 0)
                .map(|(index, _)| index)
                .collect(),
            frontier: VecDeque::new(),
        };
        growth.place_start(start);
        growth.grow();

        transition(&mut self.state, GenerationState::Finalizing);
        growth.finalize();
        let dungeon = growth.dungeon;

        log::info!(
            "generated {rooms} rooms; placements per palette entry: {counts:?}",
            rooms = dungeon.len(),
            counts = dungeon.placement_counts(),
        );
        self.set_state(GenerationState::Done);
        Ok(self.dungeon.insert(dungeon))
    }

    fn set_state(&mut self, state: GenerationState) {
        transition(&mut self.state, state);
    }
}

fn transition(state: &mut GenerationState, next: GenerationState) {
    if *state != next {
        log::debug!("{state:?} -> {next:?}");
        *state = next;
    }
}

/// Validates `spec`, then instantiates its starting room and sets up the occupancy record
/// it calls for.
fn prepare(spec: &DungeonSpec) -> Result<(RoomBlock, DungeonOccupancy), ConfigError> {
    let start = spec.validated_starting_room()?.instantiate();
    let occupancy = match spec.collision {
        CollisionMode::Bounds => DungeonOccupancy::Bounds(BoundsOccupancy::new()),
        CollisionMode::Voxels {
            dungeon_size,
            voxel_size,
        } => {
            let voxel_size = match voxel_size {
                VoxelSizeSetting::Auto => {
                    derive_voxel_size(spec.templates().map(|template| template.size()))
                }
                VoxelSizeSetting::Explicit(size) => size,
            };
            let grid = VoxelGrid::new(dungeon_size, voxel_size)?;
            log::debug!(
                "voxel size {voxel_size}, grid extent {extent}",
                voxel_size = voxel_size.refmt(&ConciseDebug),
                extent = grid.extent().refmt(&ConciseDebug),
            );
            for template in spec.templates() {
                let size = template.size();
                if size.width % voxel_size.width != 0
                    || size.height % voxel_size.height != 0
                    || size.depth % voxel_size.depth != 0
                    || size.width % voxel_size.depth != 0
                    || size.depth % voxel_size.width != 0
                {
                    log::warn!(
                        "room {name:?} of size {size} is not a whole number of voxels of size \
                            {voxel_size} in every orientation; it will never fit",
                        name = template.name(),
                        size = size.refmt(&ConciseDebug),
                        voxel_size = voxel_size.refmt(&ConciseDebug),
                    );
                }
            }
            DungeonOccupancy::Voxels(VoxelOccupancy::new(grid))
        }
    };
    Ok((start, occupancy))
}

// -------------------------------------------------------------------------------------------------

/// State of one run of [`GrowthEngine::generate()`] after validation.
struct Growth<'a, R, H: ?Sized> {
    spec: &'a DungeonSpec,
    rng: &'a mut R,
    host: &'a mut H,
    dungeon: Dungeon,
    /// Indices into `spec.palette` of the entries that may still be placed.
    palette: Vec<usize>,
    /// Placed rooms whose connection points have yet to be visited.
    frontier: VecDeque<BlockId>,
}

impl<R: Rng, H: ?Sized + DungeonHost> Growth<'_, R, H> {
    fn place_start(&mut self, mut block: RoomBlock) {
        // The starting room is placed even if it does not fit, as there is nothing to
        // collide with except the dungeon's own limits.
        if !self.dungeon.occupancy().fits(&mut block) {
            log::warn!(
                "starting room {name:?} does not fit in the dungeon",
                name = block.name()
            );
        }
        self.dungeon.occupancy_mut().occupy(&mut block);
        let id = self.dungeon.spawn(block, None, None, &mut *self.host);
        self.draw_bounds(id);
        self.frontier.push_back(id);
    }

    fn grow(&mut self) {
        while !self.palette.is_empty() {
            let Some(id) = self.frontier.pop_front() else {
                break;
            };
            self.visit(id);
        }
        if self.palette.is_empty() {
            log::debug!("palette exhausted");
        }
    }

    /// Tries to attach a room at every open connection point of the room `id`.
    fn visit(&mut self, id: BlockId) {
        let Some(room) = self.dungeon.room(id) else {
            return;
        };
        let label = room.label();
        let point_count = room.block().points().len();
        log::debug!("visiting {label} with {point_count} points");

        for point_id in 0..point_count {
            if self.palette.is_empty() {
                log::debug!("{label}: palette exhausted, closing remaining points");
                for remaining in point_id..point_count {
                    self.close_point(id, remaining);
                }
                return;
            }
            let open = self
                .dungeon
                .room(id)
                .and_then(|room| room.block().points().get(point_id))
                .is_some_and(|point| point.is_open());
            if open {
                self.fill_point(id, point_id);
            }
            self.close_point(id, point_id);
        }
    }

    /// Makes up to [`DungeonSpec::retry_limit`] attempts to attach a room at point
    /// `point_id` of room `parent`.
    fn fill_point(&mut self, parent: BlockId, point_id: usize) {
        let Some((target_position, target_facing, label)) =
            self.dungeon.room(parent).and_then(|room| {
                Some((
                    room.block().point_position(point_id)?,
                    room.block().point_facing(point_id)?,
                    room.label(),
                ))
            })
        else {
            return;
        };

        let spec = self.spec;
        for attempt in 1..=spec.retry_limit {
            let slot = self.rng.random_range(0..self.palette.len());
            let palette_index = self.palette[slot];
            let entry = &spec.palette[palette_index];
            let mut candidate = entry.template.instantiate();
            let socket = match spec.mating_socket {
                MatingSocket::Random => self.rng.random_range(0..candidate.points().len()),
                MatingSocket::First => 0,
            };
            if candidate
                .mate_to(socket, target_position, target_facing)
                .is_none()
            {
                continue;
            }

            if !self.dungeon.occupancy().fits(&mut candidate) {
                log::debug!(
                    "{label} point {point_id}: attempt {attempt} with {name:?} did not fit",
                    name = candidate.name(),
                );
                continue;
            }

            if let Some(point) = candidate.point_mut(socket) {
                point.connect();
            }
            if let Some(point) = self
                .dungeon
                .room_mut(parent)
                .and_then(|room| room.block_mut().point_mut(point_id))
            {
                point.connect();
            }
            self.dungeon.occupancy_mut().occupy(&mut candidate);
            let child = self.dungeon.spawn(
                candidate,
                Some(palette_index),
                Some(Attachment {
                    parent,
                    parent_point: point_id,
                    child_point: socket,
                }),
                &mut *self.host,
            );
            self.draw_bounds(child);
            self.frontier.push_back(child);
            if let Some(room) = self.dungeon.room(child) {
                log::debug!(
                    "{label} point {point_id}: placed {child_label} on attempt {attempt}",
                    child_label = room.label(),
                );
            }

            let placed = self.dungeon.placement_counts()[palette_index];
            if placed >= entry.max_placements {
                log::debug!(
                    "retiring {name:?} after {placed} placements",
                    name = entry.template.name(),
                );
                self.palette.remove(slot);
            }
            return;
        }
        log::debug!("{label} point {point_id}: nothing fit");
    }

    /// Closes point `point_id` of room `id`, if it is not already closed.
    fn close_point(&mut self, id: BlockId, point_id: usize) {
        let Some(point) = self
            .dungeon
            .room_mut(id)
            .and_then(|room| room.block_mut().point_mut(point_id))
        else {
            return;
        };
        if !point.is_hidden() {
            point.hide();
            self.host.hide_point(id, point);
        }
    }

    fn draw_bounds(&mut self, id: BlockId) {
        if let Some(room) = self.dungeon.room(id) {
            let mut lines: Vec<LineVertex> = Vec::with_capacity(24);
            room.wireframe_points(&mut lines);
            self.host.draw_bounds(id, &lines);
        }
    }

    /// Closes every point of every room still waiting to be visited.
    fn finalize(&mut self) {
        if !self.frontier.is_empty() {
            log::debug!(
                "closing points of {count} unvisited rooms",
                count = self.frontier.len()
            );
        }
        while let Some(id) = self.frontier.pop_front() {
            let point_count = self
                .dungeon
                .room(id)
                .map_or(0, |room| room.block().points().len());
            for point_id in 0..point_count {
                self.close_point(id, point_id);
            }
        }
    }
}
