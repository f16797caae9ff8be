// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use relay_core::SubscriptionCounter;
use std::hint::black_box;

pub fn bench_subscription_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscription_counter");

    group.throughput(Throughput::Elements(2));
    group.bench_function("add_remove", |bencher| {
        let counter = SubscriptionCounter::new();
        bencher.iter(|| {
            counter.add(black_box("src/sensors.rs:42:9"));
            counter.remove(black_box("src/sensors.rs:42:9"));
        });
    });

    for &keys in &[10usize, 100, 1000] {
        group.throughput(Throughput::Elements(keys as u64));
        let id = BenchmarkId::from_parameter(format!("report_keys_{keys}"));
        group.bench_with_input(id, &keys, |bencher, &keys| {
            let counter = SubscriptionCounter::new();
            for key in 0..keys {
                for _ in 0..=(key % 5) {
                    counter.add(&format!("src/site_{key}.rs:1:1"));
                }
            }
            bencher.iter(|| black_box(counter.report()));
        });
    }

    group.finish();
}
