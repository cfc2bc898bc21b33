// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for notification store churn.
//!
//! Measures the performance of:
//! - Bursts of timed notifications followed by a single expiring tick
//! - Removing notifications out of order from a busy store
//! - Resolving confirm notifications

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hvac_notify::notifications::{ConfirmCallbacks, NotificationStore, NotifyOptions, Outcome};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Benchmark adding a burst of notifications and expiring them in one tick.
fn bench_burst_and_expire(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_churn");

    for size in [10_usize, 100, 1_000] {
        let id = BenchmarkId::new("burst_and_expire", size);
        group.bench_with_input(id, &size, |b, &size| {
            b.iter(|| {
                let mut store = NotificationStore::new();
                for i in 0..size {
                    let millis = 1 + (i as u64 % 50);
                    store.show_info("Sync started", NotifyOptions::new().duration_ms(millis));
                }
                let removed = store.tick(Instant::now() + Duration::from_secs(1));
                black_box(removed);
            });
        });
    }

    group.finish();
}

/// Benchmark removing every other notification from a store of 500.
fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_churn");

    group.bench_function("remove_interleaved", |b| {
        b.iter(|| {
            let mut store = NotificationStore::new();
            let ids: Vec<_> = (0..500)
                .map(|_| store.show_warning("Low stock", NotifyOptions::new()))
                .collect();
            for id in ids.iter().step_by(2) {
                black_box(store.remove(*id));
            }
            black_box(store.len());
        });
    });

    group.finish();
}

/// Benchmark answering confirm notifications.
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_churn");

    group.bench_function("resolve_confirm", |b| {
        b.iter(|| {
            let mut store = NotificationStore::new();
            let tokens: Vec<_> = (0..100)
                .map(|_| {
                    let callbacks = ConfirmCallbacks::new().on_confirm(|| {});
                    store.show_confirm("Delete technician?", callbacks).1
                })
                .collect();
            for token in tokens {
                black_box(store.resolve(token, Outcome::Confirm));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_burst_and_expire, bench_remove, bench_resolve);
criterion_main!(benches);
