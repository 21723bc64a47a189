use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use cometa::{Distance, SublimationEstimator, SublimationInput};

/// Log-spaced grid of geocentric distances from 1 R⊕ to ~1.6e6 km.
fn make_inputs(samples: usize) -> Vec<SublimationInput> {
    (0..samples)
        .map(|i| {
            let f = i as f64 / samples as f64;
            let r_sun = 0.1 + 4.9 * f;
            let r_earth = 6371.0 * 10f64.powf(2.4 * f);
            SublimationInput::new(r_sun, Distance::kilometers(r_earth), None)
                .expect("valid benchmark input")
        })
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let estimator = SublimationEstimator::default();
    let input = SublimationInput::new(1.0, Distance::earth_radii(1.0), None).unwrap();

    c.bench_function("sublimation_estimate/single", |b| {
        b.iter(|| estimator.estimate(black_box(&input)).unwrap())
    });

    c.bench_function("sublimation_estimate/grid_1000", |b| {
        b.iter_batched(
            || make_inputs(1000),
            |inputs| {
                for input in &inputs {
                    black_box(estimator.estimate(input).unwrap());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
