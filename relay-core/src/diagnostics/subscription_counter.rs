// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::collections::HashMap;

/// Registry of live subscriptions, counted per creation-site fingerprint.
///
/// Keys are never removed: a key whose subscriptions were all released stays at zero,
/// so the registry accumulates every call site seen during its lifetime. A negative
/// count means a subscription was released more often than it was created; the
/// registry records the anomaly instead of failing.
///
/// Create one per process (or per test), share it with `Arc`, and hand it to the
/// subjects that should be tracked.
///
/// # Example
///
/// ```
/// use relay_core::SubscriptionCounter;
///
/// let counter = SubscriptionCounter::new();
/// counter.add("siteX");
/// counter.add("siteX");
/// counter.add("siteX");
/// counter.remove("siteX");
///
/// assert_eq!(counter.total_outstanding(), 2);
/// assert!(counter.report().contains("2: siteX"));
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionCounter {
    counts: Mutex<HashMap<String, i64>>,
}

impl SubscriptionCounter {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more live subscription created under `key`.
    pub fn add(&self, key: &str) {
        let mut counts = self.counts.lock();
        match counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.to_owned(), 1);
            }
        }
    }

    /// Records the release of one subscription created under `key`.
    ///
    /// Releasing a key that has nothing outstanding is logged and leaves a negative
    /// count behind; it never panics.
    pub fn remove(&self, key: &str) {
        let mut counts = self.counts.lock();
        let count = counts.entry(key.to_owned()).or_insert(0);
        *count -= 1;
        if *count < 0 {
            warn!(
                "subscription released more often than created ({}): {}",
                count, key
            );
        }
    }

    /// Current count for `key`; zero for unknown keys.
    #[must_use]
    pub fn count(&self, key: &str) -> i64 {
        self.counts.lock().get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts: the number of subscriptions believed to be alive.
    #[must_use]
    pub fn total_outstanding(&self) -> i64 {
        self.counts.lock().values().sum()
    }

    /// Renders every key with a positive count as `"<count>: <key>"`, ascending by
    /// count, entries separated by a blank line.
    ///
    /// The worst offenders come last, where a log tail shows them.
    #[must_use]
    pub fn report(&self) -> String {
        let counts = self.counts.lock();
        let mut live: Vec<(&String, i64)> = counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(key, count)| (key, *count))
            .collect();
        live.sort_by(|(key_a, a), (key_b, b)| a.cmp(b).then_with(|| key_a.cmp(key_b)));

        live.iter()
            .map(|(key, count)| format!("{count}: {key}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Keys whose count went below zero, sorted by key.
    #[must_use]
    pub fn anomalies(&self) -> Vec<(String, i64)> {
        let counts = self.counts.lock();
        let mut negative: Vec<(String, i64)> = counts
            .iter()
            .filter(|(_, count)| **count < 0)
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        negative.sort();
        negative
    }

    /// Number of distinct keys ever recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    /// Returns `true` if no key was ever recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }
}
