//! Static description of a dungeon to be generated.

use alloc::string::String;
use alloc::vec::Vec;

use manyfmt::Refmt as _;

use crate::RoomTemplate;
use crate::math::GridSize;
use crate::util::ConciseDebug;

/// Number of candidate rooms tried at each connection point before giving up on it,
/// unless [`DungeonSpec::retry_limit`] says otherwise.
pub const DEFAULT_RETRY_LIMIT: u32 = 6;

/// Everything the [`GrowthEngine`](crate::GrowthEngine) needs to know to build a dungeon.
///
/// This is read, never modified, during generation.
///
/// ```
/// use dungen::{ConnectionPoint, DungeonSpec, PaletteEntry, RoomTemplate};
/// use dungen::math::QuarterTurns;
///
/// let hub = RoomTemplate::new("hub", [6, 3, 6])
///     .with_point(ConnectionPoint::new([0.0, 0.0, 3.0], QuarterTurns::ZERO))
///     .with_point(ConnectionPoint::new([0.0, 0.0, -3.0], QuarterTurns::TWO));
/// let spec = DungeonSpec::new(hub.clone()).with_palette_entry(PaletteEntry::new(hub, 4));
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct DungeonSpec {
    /// The room placed first, at the origin. Generation is refused if this is [`None`].
    pub starting_room: Option<RoomTemplate>,
    /// Rooms which may be attached, and how many of each.
    pub palette: Vec<PaletteEntry>,
    /// How to decide whether a room fits.
    pub collision: CollisionMode,
    /// Which connection point of a candidate room is joined to the open point.
    pub mating_socket: MatingSocket,
    /// Number of candidates tried per connection point.
    pub retry_limit: u32,
}

impl DungeonSpec {
    /// Creates a configuration with the given starting room, an empty palette, bounding-box
    /// collision, random mating sockets, and [`DEFAULT_RETRY_LIMIT`].
    pub fn new(starting_room: RoomTemplate) -> Self {
        Self {
            starting_room: Some(starting_room),
            ..Self::default()
        }
    }

    /// Adds a room type to the palette.
    #[must_use]
    pub fn with_palette_entry(mut self, entry: PaletteEntry) -> Self {
        self.palette.push(entry);
        self
    }

    /// Sets the collision strategy.
    #[must_use]
    pub fn with_collision(mut self, collision: CollisionMode) -> Self {
        self.collision = collision;
        self
    }

    /// Sets the mating socket policy.
    #[must_use]
    pub fn with_mating_socket(mut self, mating_socket: MatingSocket) -> Self {
        self.mating_socket = mating_socket;
        self
    }

    /// Sets the number of candidates tried per connection point.
    #[must_use]
    pub fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Every template that may appear in the dungeon, starting room first.
    pub fn templates(&self) -> impl Iterator<Item = &RoomTemplate> {
        self.starting_room
            .iter()
            .chain(self.palette.iter().map(|entry| &entry.template))
    }

    /// Checks the configuration for mistakes that would make generation meaningless.
    ///
    /// This is performed by [`GrowthEngine::generate()`](crate::GrowthEngine::generate)
    /// before it changes anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validated_starting_room().map(|_| ())
    }

    /// Performs [`DungeonSpec::validate()`], returning the starting room on success.
    pub(crate) fn validated_starting_room(&self) -> Result<&RoomTemplate, ConfigError> {
        let Some(starting_room) = &self.starting_room else {
            return Err(ConfigError::MissingStartingRoom);
        };

        if let CollisionMode::Voxels {
            dungeon_size,
            voxel_size,
        } = self.collision
        {
            if dungeon_size.is_empty() {
                return Err(ConfigError::ZeroDungeonSize(dungeon_size));
            }
            if let VoxelSizeSetting::Explicit(voxel_size) = voxel_size {
                if voxel_size.is_empty() {
                    return Err(ConfigError::ZeroVoxelSize(voxel_size));
                }
            }
        }

        for template in self.templates() {
            if template.size().is_empty() {
                return Err(ConfigError::EmptyRoom {
                    name: template.name().into(),
                    size: template.size(),
                });
            }
        }
        for entry in &self.palette {
            if entry.template.points().is_empty() {
                return Err(ConfigError::NoConnectionPoints {
                    name: entry.template.name().into(),
                });
            }
        }
        Ok(starting_room)
    }
}

impl Default for DungeonSpec {
    /// A configuration with no starting room, which cannot be generated.
    fn default() -> Self {
        Self {
            starting_room: None,
            palette: Vec::new(),
            collision: CollisionMode::Bounds,
            mating_socket: MatingSocket::Random,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }
}

/// A room type which may be attached, and the maximum number of times it may be.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct PaletteEntry {
    /// The room to place.
    pub template: RoomTemplate,
    /// Number of placements after which this entry is no longer chosen.
    /// Zero means the entry is never chosen.
    pub max_placements: u32,
}

impl PaletteEntry {
    #[allow(missing_docs)]
    pub fn new(template: RoomTemplate, max_placements: u32) -> Self {
        Self {
            template,
            max_placements,
        }
    }
}

/// How the generator decides whether a candidate room fits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum CollisionMode {
    /// A room fits if its bounding box does not overlap any placed room's bounding box.
    /// The dungeon is unbounded.
    #[default]
    Bounds,
    /// A room fits if every voxel cell it covers lies within the dungeon volume and is not
    /// covered by a placed room.
    Voxels {
        /// Extent of the dungeon volume in world units, centered on the origin.
        dungeon_size: GridSize,
        /// Extent of one cell.
        voxel_size: VoxelSizeSetting,
    },
}

/// Where the voxel size comes from, in [`CollisionMode::Voxels`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VoxelSizeSetting {
    /// Use the largest size that evenly divides every room, as computed by
    /// [`derive_voxel_size()`](crate::derive_voxel_size).
    #[default]
    Auto,
    /// Use this size.
    Explicit(GridSize),
}

/// Which connection point of a candidate room is joined to the open point being filled.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MatingSocket {
    /// Any of the candidate's points, chosen uniformly at random on each try.
    #[default]
    Random,
    /// Always the candidate's first point.
    First,
}

/// Mistakes in a [`DungeonSpec`] that prevent generation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No starting room was given.
    #[error("no starting room set")]
    MissingStartingRoom,
    /// The voxel dungeon volume has zero extent on some axis.
    #[error("dungeon size {} is zero on some axis", .0.refmt(&ConciseDebug))]
    ZeroDungeonSize(GridSize),
    /// The explicit voxel size has zero extent on some axis.
    #[error("voxel size {} is zero on some axis", .0.refmt(&ConciseDebug))]
    ZeroVoxelSize(GridSize),
    /// The dungeon volume is smaller than one voxel on some axis.
    #[error(
        "dungeon size {} is smaller than voxel size {}",
        .dungeon_size.refmt(&ConciseDebug),
        .voxel_size.refmt(&ConciseDebug),
    )]
    DungeonSmallerThanVoxel {
        #[allow(missing_docs)]
        dungeon_size: GridSize,
        #[allow(missing_docs)]
        voxel_size: GridSize,
    },
    /// A room template has zero extent on some axis.
    #[error("room {name:?} has zero size {}", .size.refmt(&ConciseDebug))]
    EmptyRoom {
        /// Name of the template.
        name: String,
        #[allow(missing_docs)]
        size: GridSize,
    },
    /// A palette room has nowhere to be attached.
    #[error("room {name:?} has no connection points")]
    NoConnectionPoints {
        /// Name of the template.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConnectionPoint;
    use crate::math::QuarterTurns;
    use alloc::string::ToString as _;
    use pretty_assertions::assert_eq;

    fn door_room(name: &str) -> RoomTemplate {
        RoomTemplate::new(name, [2, 2, 2])
            .with_point(ConnectionPoint::new([0.0, 0.0, 1.0], QuarterTurns::ZERO))
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(
            DungeonSpec::default().validate(),
            Err(ConfigError::MissingStartingRoom)
        );
    }

    #[test]
    fn validation_yields_starting_room() {
        let spec = DungeonSpec::new(door_room("entrance"))
            .with_palette_entry(PaletteEntry::new(door_room("cell"), 2));
        assert_eq!(spec.validated_starting_room(), Ok(&door_room("entrance")));
        assert_eq!(
            DungeonSpec::default().validated_starting_room(),
            Err(ConfigError::MissingStartingRoom)
        );
    }

    #[test]
    fn starting_room_without_points_is_valid() {
        let spec = DungeonSpec::new(RoomTemplate::new("lonely", [1, 1, 1]));
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn zero_dungeon_size() {
        let spec = DungeonSpec::new(door_room("a")).with_collision(CollisionMode::Voxels {
            dungeon_size: GridSize::new(10, 0, 10),
            voxel_size: VoxelSizeSetting::Auto,
        });
        assert_eq!(
            spec.validate(),
            Err(ConfigError::ZeroDungeonSize(GridSize::new(10, 0, 10)))
        );
    }

    #[test]
    fn zero_voxel_size() {
        let spec = DungeonSpec::new(door_room("a")).with_collision(CollisionMode::Voxels {
            dungeon_size: GridSize::splat(10),
            voxel_size: VoxelSizeSetting::Explicit(GridSize::new(1, 1, 0)),
        });
        assert_eq!(
            spec.validate(),
            Err(ConfigError::ZeroVoxelSize(GridSize::new(1, 1, 0)))
        );
    }

    #[test]
    fn empty_room() {
        let spec = DungeonSpec::new(door_room("a"))
            .with_palette_entry(PaletteEntry::new(RoomTemplate::new("flat", [3, 0, 3]), 1));
        let error = spec.validate().unwrap_err();
        assert_eq!(error.to_string(), "room \"flat\" has zero size (+3, +0, +3)");
    }

    #[test]
    fn palette_room_needs_points() {
        let spec = DungeonSpec::new(door_room("a"))
            .with_palette_entry(PaletteEntry::new(door_room("b"), 1))
            .with_palette_entry(PaletteEntry::new(RoomTemplate::new("closet", [1, 1, 1]), 1));
        assert_eq!(
            spec.validate(),
            Err(ConfigError::NoConnectionPoints {
                name: "closet".into()
            })
        );
    }

    #[test]
    fn templates_lists_starting_room_first() {
        let spec = DungeonSpec::new(door_room("start"))
            .with_palette_entry(PaletteEntry::new(door_room("b"), 1))
            .with_palette_entry(PaletteEntry::new(door_room("c"), 0));
        assert_eq!(
            spec.templates().map(RoomTemplate::name).collect::<Vec<_>>(),
            vec!["start", "b", "c"]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let spec = DungeonSpec::new(door_room("start"))
            .with_palette_entry(PaletteEntry::new(door_room("b"), 3))
            .with_collision(CollisionMode::Voxels {
                dungeon_size: GridSize::splat(40),
                voxel_size: VoxelSizeSetting::Explicit(GridSize::splat(2)),
            });
        let json = serde_json::to_string(&spec).unwrap();
        let parsed: DungeonSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
    }
}
