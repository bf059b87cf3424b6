use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use training_tracker::models::{AthleteBaseline, ObservedPeaks};
use training_tracker::services::{calculate_zones, raise_baseline, zones_for, UntrackedMetrics};

fn benchmark_zone_derivation(c: &mut Criterion) {
    let tracked = AthleteBaseline::new(192, 285, 38.5);
    let partial = AthleteBaseline::new(180, 0, 0.0);

    let mut group = c.benchmark_group("zone_derivation");

    group.bench_function("calculate_zones", |b| {
        b.iter(|| calculate_zones(black_box(&tracked)))
    });

    group.bench_function("zones_for_omit_untracked", |b| {
        b.iter(|| zones_for(black_box(&partial), UntrackedMetrics::Omit))
    });

    group.finish();
}

fn benchmark_report_recalculation(c: &mut Criterion) {
    let current = AthleteBaseline::new(180, 250, 35.0);
    let raising = ObservedPeaks {
        heart_rate: Some(190),
        watt: Some(240),
        speed: None,
    };
    let below = ObservedPeaks {
        heart_rate: Some(170),
        watt: Some(200),
        speed: Some(30.0),
    };

    let mut group = c.benchmark_group("report_recalculation");

    // Raise plus full recompute, as done when a report exceeds a baseline
    group.bench_function("raise_and_recompute", |b| {
        b.iter(|| {
            raise_baseline(black_box(&current), black_box(&raising))
                .map(|baseline| zones_for(&baseline, UntrackedMetrics::Emit))
        })
    });

    group.bench_function("no_change", |b| {
        b.iter(|| raise_baseline(black_box(&current), black_box(&below)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_zone_derivation,
    benchmark_report_recalculation
);
criterion_main!(benches);
