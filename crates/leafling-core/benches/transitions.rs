//! Microbenchmarks for the hot transitions.
//!
//! Run with: `cargo bench -p leafling-core --bench transitions`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use leafling_core::engine::PlantEngine;
use leafling_core::persistence::{read_snapshot, write_snapshot, SaveData};
use leafling_logic::care::{apply_care, CareAction};
use leafling_logic::cooldown::CooldownLedger;
use leafling_logic::growth::stage_for_points;
use leafling_logic::plant::{decay_tick, PlantState};

fn bench_decay(c: &mut Criterion) {
    let plant = PlantState::planted("Fern");
    c.bench_function("decay_tick", |b| {
        b.iter(|| black_box(decay_tick(black_box(&plant))));
    });
}

fn bench_apply_care(c: &mut Criterion) {
    let plant = PlantState::planted("Fern");
    let ledger = CooldownLedger::new();
    c.bench_function("apply_care_water", |b| {
        b.iter(|| {
            black_box(apply_care(
                black_box(&plant),
                black_box(&ledger),
                CareAction::Water,
                1_000,
                false,
            ))
        });
    });
}

fn bench_stage_lookup(c: &mut Criterion) {
    c.bench_function("stage_for_points", |b| {
        b.iter(|| black_box(stage_for_points(black_box(812.0))));
    });
}

fn bench_engine_tick(c: &mut Criterion) {
    c.bench_function("engine_tick", |b| {
        b.iter_batched(
            || {
                let mut engine = PlantEngine::new();
                engine.initialize("Fern", 0).unwrap();
                engine
            },
            |mut engine| {
                engine.tick(2_000);
                black_box(engine.state().health)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_snapshot_roundtrip(c: &mut Criterion) {
    let data = SaveData::new(PlantState::planted("Fern"), CooldownLedger::new(), false);
    c.bench_function("snapshot_roundtrip", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            write_snapshot(&mut buf, black_box(&data)).unwrap();
            black_box(read_snapshot(buf.as_slice()).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_decay,
    bench_apply_care,
    bench_stage_lookup,
    bench_engine_tick,
    bench_snapshot_roundtrip,
);
criterion_main!(benches);
