//! Benchmarks for yield solving.
//!
//! Run with: cargo bench -p ytm-bonds

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ytm_bonds::cache::YieldCache;
use ytm_bonds::cashflows::CashFlowGenerator;
use ytm_bonds::pricing::YieldSolver;
use ytm_core::BondParameters;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_test_bonds(n: usize) -> Vec<BondParameters> {
    let coupons = [0.0, 2.5, 5.0, 7.5, 11.0088, 15.0, 20.0];
    let prices = [85.0, 92.5, 97.76, 100.0, 104.0, 112.0];

    (0..n)
        .filter_map(|i| {
            let years = ((i % 20) + 1) as f64 / 2.0;
            BondParameters::new(prices[i % prices.len()], coupons[i % coupons.len()], years, 100.0)
                .ok()
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_generate(c: &mut Criterion) {
    let params = BondParameters::new(97.76, 11.0088, 10.0, 100.0).unwrap();

    c.bench_function("generate_20_periods", |b| {
        b.iter(|| CashFlowGenerator::generate(black_box(&params)));
    });
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for years in [0.5, 5.0, 10.0] {
        let params = BondParameters::new(97.76, 11.0088, years, 100.0).unwrap();
        let schedule = CashFlowGenerator::generate(&params);

        group.bench_with_input(BenchmarkId::new("fixed_200", years), &schedule, |b, s| {
            let solver = YieldSolver::new();
            b.iter(|| solver.solve(black_box(s), 97.76));
        });
        group.bench_with_input(BenchmarkId::new("early_exit", years), &schedule, |b, s| {
            let solver = YieldSolver::converged();
            b.iter(|| solver.solve(black_box(s), 97.76));
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let bonds = create_test_bonds(100);
    let mut group = c.benchmark_group("cache");
    group.throughput(Throughput::Elements(bonds.len() as u64));

    group.bench_function("warm_lookups", |b| {
        let cache = YieldCache::default();
        for params in &bonds {
            let _ = cache.get_or_compute(params);
        }
        b.iter(|| {
            for params in &bonds {
                let _ = black_box(cache.get_or_compute(params));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_solve, bench_cache);
criterion_main!(benches);
