use crate::math::{FreeCoordinate, FreePoint, FreeVector, QuarterTurns};

/// A socket on a room where another room may be attached.
///
/// The position and facing are given in the room's own frame, relative to the room's
/// placement origin. A facing of [`QuarterTurns::ZERO`] points along +Z, and each
/// further turn follows [`QuarterTurns::rotate_vector()`], so a facing of
/// [`QuarterTurns::ONE`] points along +X. The facing must point out of the room.
///
/// A point is *connected* once a room has been attached through it, and *hidden* once the
/// generator has finished considering it (whether or not anything was attached). Neither
/// state is ever undone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionPoint {
    #[cfg_attr(feature = "serde", serde(skip))]
    id: usize,
    position: FreeVector,
    facing: QuarterTurns,
    #[cfg_attr(feature = "serde", serde(skip))]
    connected: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    hidden: bool,
}

impl ConnectionPoint {
    /// Creates an unconnected point at `position` (relative to the room's origin) facing
    /// outward in the direction `facing`.
    ///
    /// Its id is assigned when the room is instantiated.
    pub fn new(position: impl Into<FreeVector>, facing: QuarterTurns) -> Self {
        Self {
            id: 0,
            position: position.into(),
            facing,
            connected: false,
            hidden: false,
        }
    }

    /// Like [`ConnectionPoint::new()`], but with the facing given as an angle in degrees
    /// about the vertical axis, as editors usually present it.
    pub fn with_degrees(position: impl Into<FreeVector>, degrees: FreeCoordinate) -> Self {
        Self::new(position, QuarterTurns::from_degrees(degrees))
    }

    /// Index of this point among its room's points, in the order they were declared.
    pub fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    /// Position of the point relative to its room's origin, before the room is rotated.
    pub fn local_position(&self) -> FreeVector {
        self.position
    }

    /// Outward direction of the point, before the room is rotated.
    pub fn local_facing(&self) -> QuarterTurns {
        self.facing
    }

    /// Position of the point in the dungeon, given where its room is and how it is turned.
    pub fn world_position(&self, room_position: FreePoint, room_rotation: QuarterTurns) -> FreePoint {
        room_position + room_rotation.rotate_vector(self.position)
    }

    /// Outward direction of the point in the dungeon, given how its room is turned.
    pub fn world_facing(&self, room_rotation: QuarterTurns) -> QuarterTurns {
        room_rotation + self.facing
    }

    /// Records that a room has been attached through this point.
    ///
    /// Calling this again has no further effect.
    pub fn connect(&mut self) {
        self.connected = true;
    }

    /// Whether a room has been attached through this point.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Records that this point will not be offered for attachment any more.
    ///
    /// Presentation of the point (such as a door or marker) is up to the
    /// [`DungeonHost`](crate::DungeonHost).
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Whether [`ConnectionPoint::hide()`] has been called.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the point is still available for attaching a room.
    pub fn is_open(&self) -> bool {
        !self.connected && !self.hidden
    }
}
