//! Tools for checking a dungeon configuration, separate from generation.

use alloc::string::String;
use alloc::vec::Vec;

use crate::DungeonSpec;
use crate::math::{FreeCoordinate, FreePoint, FreeVector, GridSize, QuarterTurns};

/// Default for the `radius` parameter of [`sweep_footprints()`].
pub const DEFAULT_SWEEP_RADIUS: FreeCoordinate = 100.0;

/// Upper bound on the number of sweep steps, in case of a pathological radius.
const MAX_SWEEP_STEPS: usize = 100_000;

/// A footprint found by [`sweep_footprints()`] whose cell count does not match its room's
/// volume.
#[derive(Clone, Debug, PartialEq, displaydoc::Display)]
#[displaydoc("{template:?} turned {rotation:?} at {center:?} covers {cell_count} cells; expected {expected_volume}")]
#[non_exhaustive]
pub struct FootprintAnomaly {
    /// Name of the palette template.
    pub template: String,
    /// Orientation of the room.
    pub rotation: QuarterTurns,
    /// Center at which the footprint was computed, in voxel units.
    pub center: FreePoint,
    /// Number of cells produced.
    pub cell_count: usize,
    /// Number of cells that the room's volume calls for.
    pub expected_volume: FreeCoordinate,
}

/// Computes the voxel footprint of every palette template, in each of the four
/// orientations, at a series of centers, and returns every footprint that does not cover
/// exactly its room's volume.
///
/// The centers lie on the diagonal through the origin. Starting from the origin, the
/// center moves half a cell toward negative before each template is tried; after each
/// pass over the palette it is alternately reflected through the origin and pushed half a
/// cell further from it. This visits both integer and half-integer centers on both sides
/// of the origin, which is where rounding mistakes show up. The sweep ends when the center
/// is `radius` or more from the origin.
///
/// Anomalies are also logged as warnings as they are found.
pub fn sweep_footprints(
    spec: &DungeonSpec,
    voxel_size: GridSize,
    radius: FreeCoordinate,
) -> Vec<FootprintAnomaly> {
    let mut anomalies = Vec::new();
    let half_step = FreeVector::splat(0.5);
    let mut center = FreePoint::origin();

    for pass in 1..=MAX_SWEEP_STEPS {
        if center.to_vector().square_length() >= radius * radius {
            break;
        }
        for entry in &spec.palette {
            center -= half_step;
            for rotation in QuarterTurns::ALL {
                let mut block = entry.template.instantiate();
                block.reorient_size(rotation);
                let footprint = block.get_coordinates(center, voxel_size);
                if !footprint.is_reliable() {
                    anomalies.push(FootprintAnomaly {
                        template: entry.template.name().into(),
                        rotation,
                        center,
                        cell_count: footprint.len(),
                        expected_volume: footprint.expected_volume(),
                    });
                }
            }
        }
        if pass % 2 == 0 {
            center = FreePoint::origin() - center.to_vector();
        } else if center.x > 0.0 {
            center += half_step;
        } else {
            center -= half_step;
        }
    }
    log::info!(
        "footprint sweep found {count} anomalies",
        count = anomalies.len()
    );
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConnectionPoint, PaletteEntry, RoomTemplate};
    use alloc::string::ToString as _;
    use pretty_assertions::assert_eq;

    fn room(name: &str, size: [u32; 3]) -> RoomTemplate {
        RoomTemplate::new(name, size)
            .with_point(ConnectionPoint::new([0.0, 0.0, 1.0], QuarterTurns::ZERO))
    }

    #[test]
    fn divisible_rooms_have_no_anomalies() {
        let spec = DungeonSpec::new(room("start", [4, 2, 4]))
            .with_palette_entry(PaletteEntry::new(room("square", [4, 2, 4]), 1))
            .with_palette_entry(PaletteEntry::new(room("long", [2, 2, 6]), 1));
        assert_eq!(
            sweep_footprints(&spec, GridSize::splat(2), DEFAULT_SWEEP_RADIUS),
            vec![]
        );
    }

    #[test]
    fn indivisible_room_is_reported() {
        let spec = DungeonSpec::new(room("start", [4, 2, 4]))
            .with_palette_entry(PaletteEntry::new(room("square", [4, 2, 4]), 1))
            .with_palette_entry(PaletteEntry::new(room("odd", [3, 2, 4]), 1));
        let anomalies = sweep_footprints(&spec, GridSize::splat(2), 5.0);
        assert!(!anomalies.is_empty());
        assert!(anomalies.iter().all(|a| a.template == "odd"));
        // Every orientation is affected.
        for rotation in QuarterTurns::ALL {
            assert!(anomalies.iter().any(|a| a.rotation == rotation));
        }
        let first = &anomalies[0];
        assert_eq!(first.cell_count, 2);
        assert_eq!(first.expected_volume, 3.0);
        assert_eq!(first.center, FreePoint::splat(-1.0));
        assert!(first.to_string().starts_with("\"odd\" turned"), "{first}");
    }

    #[test]
    fn empty_palette_terminates() {
        let spec = DungeonSpec::new(room("start", [4, 2, 4]));
        assert_eq!(sweep_footprints(&spec, GridSize::splat(2), 10.0), vec![]);
    }
}
