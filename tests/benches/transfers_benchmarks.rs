//! # Currency-Chain Transfer Benchmarks
//!
//! | Group | Path measured |
//! |-------|---------------|
//! | `fact` | Fact hash over growing item lists |
//! | `validate` | Stateless checks including signature verification |
//! | `execute` | Pre-process plus commit of one operation |
//! | `batch` | Conflict planning and wave execution |

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use currency_tests::fixtures::{address, service, Ledger};
use currency_transfers::domain::plan_waves;
use currency_transfers::prelude::*;
use std::time::Duration;

// ============================================================================
// FACT HASHING
// ============================================================================

fn bench_fact_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("fact");

    for width in [1usize, 10, 100] {
        let items = (1..=width)
            .map(|r| TransferItem::new(address(r), Amount::new(1)))
            .collect();
        let fact = TransfersFact::new(b"bench".to_vec(), address(0), items);

        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("generate_hash", width), &fact, |b, fact| {
            b.iter(|| black_box(fact.generate_hash()))
        });
    }

    group.finish();
}

// ============================================================================
// VALIDATION
// ============================================================================

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let ledger = Ledger::new(11, 1_000);
    let service = service(FeeConfig::nil());

    for width in [1usize, 10] {
        let items: Vec<_> = (1..=width).map(|r| (r, 1)).collect();
        let op = ledger.transfer(0, &items, "bench");

        group.bench_with_input(BenchmarkId::new("operation", width), &op, |b, op| {
            b.iter(|| black_box(service.validate(op).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// SINGLE EXECUTION
// ============================================================================

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");
    let service = service(FeeConfig::fixed(Amount::new(1)));

    group.bench_function("three_receivers", |b| {
        b.iter_batched(
            || {
                let ledger = Ledger::new(4, 1_000);
                let op = ledger.transfer(0, &[(1, 10), (2, 10), (3, 10)], "bench");
                (ledger, op)
            },
            |(ledger, op)| black_box(service.execute(&op, &ledger.pool).is_ok()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// BATCH EXECUTION
// ============================================================================

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.measurement_time(Duration::from_secs(10));
    let service = service(FeeConfig::fixed(Amount::new(1)));

    for size in [16usize, 128] {
        // Disjoint pairs give one wave; a shared sender serializes every operation.
        let disjoint = |ledger: &Ledger| -> Vec<Operation> {
            (0..size)
                .map(|n| ledger.transfer(2 * n, &[(2 * n + 1, 5)], &format!("d-{n}")))
                .collect()
        };
        let chained = |ledger: &Ledger| -> Vec<Operation> {
            (0..size)
                .map(|n| ledger.transfer(0, &[(n + 1, 1)], &format!("c-{n}")))
                .collect()
        };

        let planned = Ledger::new(2 * size, 1_000);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("plan_waves", size),
            &chained(&planned),
            |b, ops| b.iter(|| black_box(plan_waves(ops).len())),
        );

        group.bench_function(BenchmarkId::new("disjoint", size), |b| {
            b.iter_batched(
                || {
                    let ledger = Ledger::new(2 * size, 1_000);
                    let ops = disjoint(&ledger);
                    (ledger, ops)
                },
                |(ledger, ops)| black_box(service.execute_batch(&ops, &ledger.pool).is_ok()),
                BatchSize::LargeInput,
            )
        });

        group.bench_function(BenchmarkId::new("chained", size), |b| {
            b.iter_batched(
                || {
                    let ledger = Ledger::new(size + 1, 1_000);
                    let ops = chained(&ledger);
                    (ledger, ops)
                },
                |(ledger, ops)| black_box(service.execute_batch(&ops, &ledger.pool).is_ok()),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fact_hash,
    bench_validate,
    bench_execute,
    bench_batch
);
criterion_main!(benches);
