//! Criterion benchmarks for likelihood evaluation.
//!
//! Measures one `evaluate` call per iteration for both comparison modes at
//! catalog sizes typical of third-generation detector forecasts.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use siren_likelihood::{
    CatalogFile, DensitySpec, EventCatalog, FlatLambdaCdm, InterpolationMethod,
    LikelihoodEvaluator,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_catalog(n_events: usize, n_samples: usize, seed: u64) -> EventCatalog {
    let cosmo = FlatLambdaCdm::new(70.0, 0.3).unwrap();
    // xorshift64 keeps the bench free of rand_distr
    let mut state = seed;
    let mut uniform = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state as f64) / (u64::MAX as f64)
    };

    let zs: Vec<f64> =
        (0..n_events).map(|i| 0.02 + 3.0 * (i as f64 + 0.5) / n_events as f64).collect();
    let d_obs: Vec<f64> = zs.iter().map(|&z| cosmo.luminosity_distance(z)).collect();
    let sigma: Vec<f64> = d_obs.iter().map(|d| 0.05 * d).collect();
    let dens: Vec<DensitySpec> = d_obs
        .iter()
        .zip(&sigma)
        .map(|(&d, &s)| {
            let samples = (0..n_samples).map(|_| d + s * (2.0 * uniform() - 1.0) * 1.7).collect();
            DensitySpec::Kde { samples, bandwidth: None, weights: None }
        })
        .collect();

    let file = CatalogFile {
        redshifts: zs,
        density_uncorrected: dens,
        observed_distance: d_obs,
        distance_sigma: sigma,
        density_corrected: None,
    };
    EventCatalog::from_file(file, false).unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("siren_evaluate");
    let provider = FlatLambdaCdm::new(68.0, 0.31).unwrap();

    for n in [100usize, 1_000] {
        let catalog = make_catalog(n, 200, 42);
        let gaussian =
            LikelihoodEvaluator::from_catalog(catalog.clone(), InterpolationMethod::Gaussian);
        let kde = LikelihoodEvaluator::from_catalog(catalog, InterpolationMethod::Kde);

        group.bench_with_input(BenchmarkId::new("gaussian", n), &n, |b, _| {
            b.iter(|| black_box(gaussian.evaluate(black_box(&provider)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("kde", n), &n, |b, _| {
            b.iter(|| black_box(kde.log_likelihood_or_reject(black_box(&provider))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
