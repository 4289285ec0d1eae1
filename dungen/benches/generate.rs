#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use dungen::math::{GridSize, QuarterTurns};
use dungen::{
    CollisionMode, ConnectionPoint, DungeonSpec, GrowthEngine, PaletteEntry, RoomTemplate,
    VoxelSizeSetting,
};

fn spec(collision: CollisionMode, count: u32) -> DungeonSpec {
    let hall = RoomTemplate::new("hall", [6, 4, 6])
        .with_point(ConnectionPoint::new([0.0, 0.0, 3.0], QuarterTurns::ZERO))
        .with_point(ConnectionPoint::new([3.0, 0.0, 0.0], QuarterTurns::ONE))
        .with_point(ConnectionPoint::new([0.0, 0.0, -3.0], QuarterTurns::TWO))
        .with_point(ConnectionPoint::new([-3.0, 0.0, 0.0], QuarterTurns::THREE));
    let corridor = RoomTemplate::new("corridor", [2, 4, 8])
        .with_point(ConnectionPoint::new([0.0, 0.0, 4.0], QuarterTurns::ZERO))
        .with_point(ConnectionPoint::new([0.0, 0.0, -4.0], QuarterTurns::TWO));
    DungeonSpec::new(hall.clone())
        .with_palette_entry(PaletteEntry::new(hall, count))
        .with_palette_entry(PaletteEntry::new(corridor, count * 2))
        .with_collision(collision)
}

fn generate_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for count in [10, 100] {
        group.bench_function(BenchmarkId::new("bounds", count), |b| {
            let mut engine = GrowthEngine::with_seed(spec(CollisionMode::Bounds, count), 0);
            b.iter(|| black_box(engine.generate(&mut ()).unwrap().len()))
        });
        group.bench_function(BenchmarkId::new("voxels", count), |b| {
            let collision = CollisionMode::Voxels {
                dungeon_size: GridSize::new(400, 4, 400),
                voxel_size: VoxelSizeSetting::Auto,
            };
            let mut engine = GrowthEngine::with_seed(spec(collision, count), 0);
            b.iter(|| black_box(engine.generate(&mut ()).unwrap().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, generate_bench);
criterion_main!(benches);
