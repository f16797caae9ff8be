// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use relay_core::{LeakTracking, Subject, Subscription, SubscriptionCounter};
use std::hint::black_box;
use std::sync::Arc;

fn subscribe_sinks<T: Clone + Send + 'static>(subject: &Subject<T>, count: usize) -> Vec<Subscription> {
    (0..count)
        .map(|_| {
            subject.subscribe_fn(
                |value| {
                    black_box(value);
                    Ok(())
                },
                |_| Ok(()),
                || Ok(()),
            )
        })
        .collect()
}

pub fn bench_subject(c: &mut Criterion) {
    let mut group = c.benchmark_group("subject");

    // Subscriber counts to test fan-out
    let subscriber_counts = [1usize, 8, 64, 256];

    // Scenario 1: small numeric payload
    for &subs in &subscriber_counts {
        group.throughput(Throughput::Elements(subs as u64));
        let id = BenchmarkId::from_parameter(format!("feed_subs_{subs}"));
        group.bench_with_input(id, &subs, |bencher, &subs| {
            let subject = Subject::<u64>::new();
            let _subscriptions = subscribe_sinks(&subject, subs);
            bencher.iter(|| subject.feed(black_box(42)));
        });
    }

    // Scenario 2: payload cloning cost
    let payload_sizes = [256usize, 4096usize];
    for &size in &payload_sizes {
        for &subs in &subscriber_counts {
            group.throughput(Throughput::Bytes((size * subs) as u64));
            let id = BenchmarkId::from_parameter(format!("feed_p{size}_subs_{subs}"));
            group.bench_with_input(id, &(size, subs), |bencher, &(size, subs)| {
                let subject = Subject::<Arc<Vec<u8>>>::new();
                let _subscriptions = subscribe_sinks(&subject, subs);
                let payload = Arc::new(vec![0u8; size]);
                bencher.iter(|| subject.feed(Arc::clone(&payload)));
            });
        }
    }

    // Scenario 3: subscribe + release round trip, with and without leak tracking
    group.throughput(Throughput::Elements(1));
    group.bench_function("subscribe_release", |bencher| {
        let subject = Subject::<u64>::new();
        bencher.iter(|| subject.subscribe_fn(|_| Ok(()), |_| Ok(()), || Ok(())));
    });
    group.bench_function("subscribe_release_tracked", |bencher| {
        let counter = Arc::new(SubscriptionCounter::new());
        let subject = Subject::<u64>::with_leak_tracking(LeakTracking::new(counter));
        bencher.iter(|| subject.subscribe_fn(|_| Ok(()), |_| Ok(()), || Ok(())));
    });

    group.finish();
}
