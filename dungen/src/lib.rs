//! Dungen assembles dungeons out of reusable rooms.
//!
//! Each room is an axis-aligned box with a number of *connection points* on its surface.
//! Starting from a single room, the [`GrowthEngine`] visits placed rooms breadth-first and
//! tries to attach a randomly chosen room from the palette to every open connection point,
//! turning the new room about the vertical axis so that the two points face each other and
//! then sliding it so that they coincide. A room is only kept if it does not collide with
//! anything already placed.
//!
//! ## Collision strategies
//!
//! * [`CollisionMode::Bounds`] compares each candidate's bounding box against every placed
//!   room. Boxes are shrunk slightly so that rooms sitting flush against each other are
//!   not considered overlapping.
//! * [`CollisionMode::Voxels`] divides a fixed dungeon volume into cells and records which
//!   ones each placed room occupies. This also confines the dungeon to that volume.
//!
//! ## Host integration
//!
//! The generator produces a plain data structure, the [`Dungeon`]. Applications which
//! display the dungeon implement [`DungeonHost`] to be told when rooms are created and
//! destroyed and when connection points are closed. The unit type `()` is a host which
//! ignores everything.
//!
//! ## Package features
//!
//! * `std` (default): Uses the standard library's floating-point routines. Without it,
//!   the library is `no_std` but still requires `alloc`.
//! * `serde`: Adds `Serialize` and `Deserialize` implementations for the configuration
//!   types, so that hosts can save dungeon definitions.
//!
//! ## Dependencies and global state
//!
//! `dungen` has no global state. It writes log messages using the [`log`] crate and is
//! therefore subject to that global configuration. Randomness is always supplied by the
//! caller, so generation is reproducible given the same seed.
//!
//! `dungen` re-exports [`euclid`] for vector math as `dungen::euclid`.

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test, allow(clippy::float_cmp))]

#[allow(unused_imports)] // false positive unused macro_use
#[macro_use]
extern crate alloc;
#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod math;

mod arena;
pub use arena::*;
mod config;
pub use config::*;
mod connection;
pub use connection::*;
pub mod diagnostics;
mod engine;
pub use engine::*;
mod host;
pub use host::*;
mod occupancy;
pub use occupancy::*;
mod room;
pub use room::*;
pub mod util;
mod voxel;
pub use voxel::*;

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
