// ============================================================================
// Idle Economy Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Decimal Arithmetic - Big-integer backed add, multiply and divide
// 2. Formatting - Display and scientific strings at growing magnitudes
// 3. Pricing - Batch quotes that sum one geometric unit price per item
// 4. Tick Loop - Catch-up pumping through the game session
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use idle_economy::prelude::*;
use std::hint::black_box;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

// ============================================================================
// Decimal Arithmetic
// ============================================================================

fn benchmark_decimal_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_arithmetic");

    let a: Currency = "123456789.0123456789".parse().unwrap();
    let b: Currency = "0.1".parse().unwrap();

    group.bench_function("add", |bench| {
        bench.iter(|| black_box(&a) + black_box(&b));
    });

    group.bench_function("mul", |bench| {
        bench.iter(|| black_box(&a) * black_box(&b));
    });

    group.bench_function("div", |bench| {
        bench.iter(|| black_box(&a).checked_div(black_box(&b)));
    });

    group.finish();
}

// ============================================================================
// Formatting
// ============================================================================

fn benchmark_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    for digits in [3usize, 12, 40].iter() {
        let value: Currency = format!("{}.5", "9".repeat(*digits)).parse().unwrap();

        group.bench_with_input(BenchmarkId::new("display", digits), &value, |b, value| {
            b.iter(|| black_box(value.to_display_string()));
        });

        group.bench_with_input(BenchmarkId::new("scientific", digits), &value, |b, value| {
            b.iter(|| black_box(value.to_scientific_string()));
        });
    }

    group.finish();
}

// ============================================================================
// Pricing
// ============================================================================

fn benchmark_batch_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_pricing");
    let prices = PriceSchedule::new(1.15);
    let base = Currency::from_integer(6);

    for n in [1u64, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::new("units", n), n, |b, &n| {
            b.iter(|| black_box(prices.batch_price(&base, black_box(25), n)));
        });
    }

    group.finish();
}

// ============================================================================
// Tick Loop
// ============================================================================

fn benchmark_tick_catch_up(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_catch_up");

    for seconds in [1u64, 10].iter() {
        group.bench_with_input(BenchmarkId::new("seconds", seconds), seconds, |b, &seconds| {
            b.iter_batched(
                || {
                    let mut game = EconomyBuilder::new()
                        .tick_rate(NonZeroU32::new(60).unwrap())
                        .build_game()
                        .unwrap();
                    for _ in 0..50 {
                        game.click();
                    }
                    game.purchase("shield", 1).unwrap();
                    game
                },
                |mut game| {
                    let t0 = Instant::now();
                    game.start(t0);
                    black_box(game.frame(t0 + Duration::from_secs(seconds)))
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decimal_arithmetic,
    benchmark_formatting,
    benchmark_batch_pricing,
    benchmark_tick_catch_up,
);
criterion_main!(benches);
