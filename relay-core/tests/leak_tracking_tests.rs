// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use relay_core::{
    BacktraceFingerprint, LeakTracking, Observer, RelayError, Subject, Subscription,
    SubscriptionCounter,
};
use relay_test_utils::{FixedFingerprint, RecordingObserver};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;

fn tracked_subject(key: &str) -> (Subject<i32>, Arc<SubscriptionCounter>) {
    let counter = Arc::new(SubscriptionCounter::new());
    let tracking =
        LeakTracking::new(counter.clone()).with_fingerprint(Arc::new(FixedFingerprint::new(key)));
    (Subject::with_leak_tracking(tracking), counter)
}

#[test]
fn subscription_is_counted_until_released() {
    let (subject, counter) = tracked_subject("siteX");

    let first = subject.subscribe(RecordingObserver::<i32>::shared());
    let second = subject.subscribe(RecordingObserver::<i32>::shared());
    assert_eq!(counter.count("siteX"), 2);
    assert_eq!(counter.total_outstanding(), 2);

    first.release();
    assert_eq!(counter.count("siteX"), 1);

    drop(second);
    assert_eq!(counter.total_outstanding(), 0);
}

#[test]
fn repeated_release_decrements_once() {
    let (subject, counter) = tracked_subject("siteX");

    let subscription = subject.subscribe(RecordingObserver::<i32>::shared());
    subscription.release();
    subscription.release();
    drop(subscription);

    assert_eq!(counter.count("siteX"), 0);
    assert!(counter.anomalies().is_empty());
}

#[test]
fn leaked_subscription_shows_in_report() {
    let (subject, counter) = tracked_subject("leaky::site");

    let leaked: Vec<Subscription> = (0..3)
        .map(|_| subject.subscribe(RecordingObserver::<i32>::shared()))
        .collect();
    leaked[0].release();

    assert_eq!(counter.report(), "2: leaky::site");
}

#[test]
fn termination_does_not_release_the_count() {
    let (subject, counter) = tracked_subject("siteX");

    let subscription = subject.subscribe(RecordingObserver::<i32>::shared());
    subject.complete().unwrap();
    assert_eq!(counter.count("siteX"), 1);

    subscription.release();
    assert_eq!(counter.count("siteX"), 0);
}

#[test]
fn late_subscribers_are_not_counted() {
    let (subject, counter) = tracked_subject("siteX");
    subject.fail(RelayError::stream_fault("boom")).unwrap();

    let _subscription = subject.subscribe(RecordingObserver::<i32>::shared());

    assert_eq!(counter.total_outstanding(), 0);
    assert!(counter.is_empty());
}

#[test]
fn count_survives_dropping_the_subject() {
    let (subject, counter) = tracked_subject("siteX");
    let subscription = subject.subscribe(RecordingObserver::<i32>::shared());

    drop(subject);
    assert_eq!(counter.count("siteX"), 1);

    drop(subscription);
    assert_eq!(counter.count("siteX"), 0);
}

#[test]
fn default_fingerprint_points_at_the_subscribing_line() {
    let counter = Arc::new(SubscriptionCounter::new());
    let subject = Subject::<i32>::with_leak_tracking(LeakTracking::new(counter.clone()));

    let line = line!() + 1;
    let _subscription = subject.subscribe(RecordingObserver::<i32>::shared());

    let report = counter.report();
    assert!(report.starts_with("1: "), "{report}");
    assert!(report.contains("leak_tracking_tests.rs"), "{report}");
    assert!(report.contains(&format!(":{line}:")), "{report}");
}

#[test]
fn same_call_site_aggregates_across_subscriptions() {
    let counter = Arc::new(SubscriptionCounter::new());
    let subject = Subject::<i32>::with_leak_tracking(LeakTracking::new(counter.clone()));

    let subscriptions: Vec<_> = (0..5)
        .map(|_| subject.subscribe_fn(|_| Ok(()), |_| Ok(()), || Ok(())))
        .collect();

    assert_eq!(counter.len(), 1);
    assert_eq!(counter.total_outstanding(), 5);
    drop(subscriptions);
    assert_eq!(counter.total_outstanding(), 0);
}

#[test]
fn stream_subscriptions_are_tracked() {
    let (subject, counter) = tracked_subject("stream");

    let stream = subject.subscribe_stream();
    assert_eq!(counter.count("stream"), 1);

    drop(stream);
    assert_eq!(counter.count("stream"), 0);
}

#[test]
fn backtrace_fingerprint_can_be_plugged_in() {
    let counter = Arc::new(SubscriptionCounter::new());
    let tracking = LeakTracking::new(counter.clone())
        .with_fingerprint(Arc::new(BacktraceFingerprint::new()));
    let subject = Subject::<i32>::with_leak_tracking(tracking);

    let subscription = subject.subscribe(RecordingObserver::<i32>::shared());
    assert_eq!(counter.total_outstanding(), 1);
    assert!(!counter.report().is_empty());

    subscription.release();
    assert_eq!(counter.total_outstanding(), 0);
}

#[test]
fn backtrace_key_starts_at_the_subscribing_function() {
    let counter = Arc::new(SubscriptionCounter::new());
    let tracking = LeakTracking::new(counter.clone())
        .with_fingerprint(Arc::new(BacktraceFingerprint::new()));
    let subject = Subject::<i32>::with_leak_tracking(tracking);

    let subscriptions: Vec<_> = (0..3)
        .map(|_| subject.subscribe(RecordingObserver::<i32>::shared()))
        .collect();
    let report = counter.report();

    assert_eq!(counter.len(), 1);
    assert!(report.starts_with("3: "), "{report}");
    let first_frame = report.trim_start_matches("3: ").lines().next().unwrap_or_default();
    if Backtrace::force_capture().status() == BacktraceStatus::Captured {
        assert!(
            first_frame.starts_with("leak_tracking_tests::backtrace_key_starts_at_the_subscribing_function"),
            "{report}"
        );
    } else {
        assert!(first_frame.contains("leak_tracking_tests.rs"), "{report}");
    }
    drop(subscriptions);
}

#[test]
fn subjects_can_share_one_counter() {
    let counter = Arc::new(SubscriptionCounter::new());
    let tracking = LeakTracking::new(counter.clone())
        .with_fingerprint(Arc::new(FixedFingerprint::new("shared")));
    let temperatures = Subject::<i32>::with_leak_tracking(tracking.clone());
    let pressures = Subject::<i32>::with_leak_tracking(tracking);

    let _a = temperatures.subscribe(RecordingObserver::<i32>::shared());
    let _b = pressures.subscribe(RecordingObserver::<i32>::shared());

    assert_eq!(counter.count("shared"), 2);
    assert!(Arc::ptr_eq(
        temperatures.leak_tracking().unwrap().counter(),
        &counter
    ));
}

#[test]
fn untracked_subject_has_no_tracking() {
    let subject = Subject::<i32>::new();
    assert!(subject.leak_tracking().is_none());

    let recorder = RecordingObserver::<i32>::shared();
    let _subscription = subject.subscribe(recorder.clone());
    subject.on_next(1).unwrap();
    assert_eq!(recorder.values(), vec![1]);
}
