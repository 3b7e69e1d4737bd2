use compression_viewer::api::{ChartData, ViewportClampController};
use compression_viewer::core::{
    AlignedPoint, CanonicalInstant, RawTimestamp, SYNTHETIC_BASE_EPOCH_MILLIS, ViewportTuning,
    align, reconcile,
};
use compression_viewer::interaction::VisibleWindow;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_align_10k_mixed(c: &mut Criterion) {
    let raw: Vec<RawTimestamp> = (0..10_000i64)
        .map(|i| {
            if i % 3 == 0 {
                let hour = (i / 60) % 12 + 1;
                let minute = i % 60;
                RawTimestamp::from(format!("{hour}:{minute:02} AM"))
            } else {
                let instant =
                    CanonicalInstant::from_epoch_millis(SYNTHETIC_BASE_EPOCH_MILLIS - i * 1_000)
                        .expect("valid instant");
                RawTimestamp::from(instant)
            }
        })
        .collect();
    let values: Vec<f64> = (0..10_000).map(|i| 100.0 + f64::from(i) * 0.01).collect();

    c.bench_function("align_10k_mixed", |b| {
        b.iter(|| {
            let _ = align(black_box(&values), black_box(&raw)).expect("align should succeed");
        })
    });
}

fn bench_reconcile_10k_with_boundaries(c: &mut Criterion) {
    let points: Vec<AlignedPoint> = (0..10_000i64)
        .map(|i| {
            // Every tenth point reuses the previous instant.
            let second = i - i / 10;
            let time = CanonicalInstant::from_epoch_millis(second * 1_000).expect("valid instant");
            AlignedPoint::new(time, (second % 97) as f64)
        })
        .collect();

    c.bench_function("reconcile_10k_with_boundaries", |b| {
        b.iter(|| {
            let _ = reconcile(black_box(&points));
        })
    });
}

fn bench_clamp_interaction_2k(c: &mut Criterion) {
    let raw: Vec<AlignedPoint> = (0..2_000i64)
        .map(|i| {
            let time = CanonicalInstant::from_epoch_millis(i * 60_000).expect("valid instant");
            AlignedPoint::new(time, 400.0 + (i % 50) as f64)
        })
        .collect();
    let compressed = reconcile(&raw[..1_000]);
    let chart = ChartData::build(&raw, &compressed);
    let mut controller: ViewportClampController = chart
        .viewport_controller(ViewportTuning::default())
        .expect("controller fit")
        .expect("non-empty chart");

    c.bench_function("clamp_interaction_2k", |b| {
        b.iter(|| {
            let _ = controller
                .on_interaction_complete_linear(
                    black_box(VisibleWindow::new((-40.0, 2_400.0), (350.0, 480.0))),
                    0.0,
                    1_600.0,
                )
                .expect("interaction should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_align_10k_mixed,
    bench_reconcile_10k_with_boundaries,
    bench_clamp_interaction_2k
);
criterion_main!(benches);
