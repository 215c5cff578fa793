use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use yogascan::{evaluate_chart, Chart, Planet};

fn dense_chart() -> Chart {
    Chart::whole_sign_with_motion(
        275.0,
        &[
            (Planet::Sun, 95.0, 0.98),
            (Planet::Moon, 280.0, 13.2),
            (Planet::Mars, 298.0, 0.5),
            (Planet::Mercury, 100.0, -1.2),
            (Planet::Jupiter, 190.0, 0.08),
            (Planet::Venus, 40.0, 1.1),
            (Planet::Saturn, 310.0, 0.03),
            (Planet::Rahu, 140.0, -0.05),
            (Planet::Ketu, 320.0, -0.05),
        ],
    )
}

fn bench_full_pipeline(c: &mut Criterion) {
    let chart = dense_chart();
    c.bench_function("evaluate_chart_dense", |b| {
        b.iter(|| evaluate_chart(black_box(&chart)))
    });
}

fn bench_sort(c: &mut Criterion) {
    let chart = dense_chart();
    let results = evaluate_chart(&chart);
    c.bench_function("sorted_by_strength", |b| {
        b.iter(|| black_box(&results).sorted_by_strength())
    });
}

criterion_group!(benches, bench_full_pipeline, bench_sort);
criterion_main!(benches);
