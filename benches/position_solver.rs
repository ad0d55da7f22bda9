use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery::{Observer, Orrery};

/// Observer epochs spread far enough apart that every solve misses the
/// coarse cache.
fn cold_epochs(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    (0..n).map(|_| 60000.0 + rng.gen::<f64>() * 3650.0).collect()
}

fn bench_heliocentric_cold(c: &mut Criterion) {
    let orrery = Orrery::from_default_catalog().unwrap();
    let epochs = cold_epochs(10_000);

    for name in ["moon", "jupiter", "io", "pluto"] {
        let ix = orrery.body_by_name(name).unwrap();
        let mut cursor = 0usize;
        c.bench_function(&format!("position_heliocentric/cold/{name}"), |b| {
            b.iter(|| {
                cursor = (cursor + 1) % epochs.len();
                let obs = Observer::geocentric(epochs[cursor]);
                black_box(orrery.position_heliocentric(ix, &obs))
            })
        });
    }
}

fn bench_observed_warm(c: &mut Criterion) {
    let orrery = Orrery::from_default_catalog().unwrap();
    let obs = Observer::geocentric(60000.0);
    let jupiter = orrery.body_by_name("jupiter").unwrap();

    // Prime the caches once; every timed iteration is a hash hit.
    orrery.position_observed(jupiter, &obs, true);
    c.bench_function("position_observed/warm/jupiter", |b| {
        b.iter(|| black_box(orrery.position_observed(jupiter, &obs, true)))
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let orrery = Orrery::from_default_catalog().unwrap();
    let epochs = cold_epochs(10_000);
    let mut cursor = 0usize;

    c.bench_function("frame/all_bodies_vmag_and_position", |b| {
        b.iter(|| {
            cursor = (cursor + 1) % epochs.len();
            let obs = Observer::geocentric(epochs[cursor]);
            for (ix, _) in orrery.bodies() {
                black_box(orrery.position_observed(ix, &obs, true));
                black_box(orrery.visual_magnitude(ix, &obs));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_heliocentric_cold,
    bench_observed_warm,
    bench_full_frame
);
criterion_main!(benches);
