use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treadscan_core::{dispatch, filtfilt, FilterCoefficients, PipelineConfig, ValleyDetector};

/// One full-width sensor sweep with a groove and some ripple
fn sweep(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let x = i as f64 / len as f64;
            let groove = 600.0 * libm::exp(-((x - 0.5) * (x - 0.5)) / 0.002);
            let ripple = 15.0 * libm::sin(i as f64 * 1.7);
            2200.0 - groove + ripple
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let data = sweep(3700);
    let coeffs = FilterCoefficients::default();
    c.bench_function("filtfilt_3700", |b| {
        b.iter(|| filtfilt(black_box(&data), black_box(&coeffs)))
    });

    let detector = ValleyDetector::default();
    c.bench_function("valley_3700", |b| b.iter(|| detector.detect(black_box(&data))));
}

fn bench_dispatch(c: &mut Criterion) {
    let data = sweep(800);
    let mut lines = Vec::new();
    for id in 1..=6 {
        lines.push(format!("--- SENSOR {} ---", id));
        for (i, mv) in data.iter().enumerate() {
            lines.push(format!("Pixel[{}]: {:.2} mV", 280 + i, mv));
        }
    }
    let config = PipelineConfig::default();
    c.bench_function("dispatch_6x800", |b| {
        b.iter(|| dispatch(black_box(&lines), black_box(&config)))
    });
}

criterion_group!(benches, bench_filter, bench_dispatch);
criterion_main!(benches);
