use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use battlebit_ttk::analysis::{linspace, sweep};
use battlebit_ttk::arsenal::{default_roster, ArsenalPreset};
use battlebit_ttk::core::types::DamageType;
use battlebit_ttk::damage::DamageEngine;
use battlebit_ttk::falloff::{BezierCache, FalloffModel, ModelKind, DEFAULT_OFFSET};

fn bench_models(c: &mut Criterion) {
    let roster = default_roster().unwrap();
    let ak = roster.build("AK74").unwrap();
    let cache = Arc::new(BezierCache::new());
    let distances = linspace(0.0, 300.0, 150);

    for kind in [ModelKind::Linear, ModelKind::Cubic, ModelKind::Bezier] {
        let engine = DamageEngine::new(FalloffModel::from_kind(kind, DEFAULT_OFFSET, cache.clone()).unwrap());
        c.bench_function(&format!("shot_damage_150_points_{}", kind), |b| {
            b.iter(|| {
                for &d in &distances {
                    black_box(engine.shot_damage(black_box(&ak), d, DamageType::Body).unwrap());
                }
            })
        });
    }
}

fn bench_sweep(c: &mut Criterion) {
    let roster = default_roster().unwrap();
    let arsenal = ArsenalPreset::TtkDat.build(&roster).unwrap();
    let weapons: Vec<_> = arsenal.weapons().collect();
    let distances = linspace(0.0, 150.0, 150);
    let cache = Arc::new(BezierCache::new());

    for kind in [ModelKind::Cubic, ModelKind::Bezier] {
        let engine = DamageEngine::new(FalloffModel::from_kind(kind, DEFAULT_OFFSET, cache.clone()).unwrap());
        c.bench_function(&format!("sweep_ttk_dat_{}", kind), |b| {
            b.iter(|| sweep(&engine, black_box(&weapons), DamageType::Body, &distances).unwrap())
        });
    }
}

criterion_group!(benches, bench_models, bench_sweep);
criterion_main!(benches);
