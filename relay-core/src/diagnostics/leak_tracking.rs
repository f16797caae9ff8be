// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{CallSiteFingerprint, FingerprintSource, SubscriptionCounter};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Leak tracking configuration for a subject: where to count, and how to name
/// call sites.
#[derive(Clone)]
pub struct LeakTracking {
    counter: Arc<SubscriptionCounter>,
    fingerprint: Arc<dyn FingerprintSource>,
}

impl LeakTracking {
    /// Counts subscriptions in `counter`, keyed by [`CallSiteFingerprint`].
    #[must_use]
    pub fn new(counter: Arc<SubscriptionCounter>) -> Self {
        Self {
            counter,
            fingerprint: Arc::new(CallSiteFingerprint),
        }
    }

    /// Replaces the fingerprint source.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Arc<dyn FingerprintSource>) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// The registry subscriptions are counted in.
    #[must_use]
    pub fn counter(&self) -> &Arc<SubscriptionCounter> {
        &self.counter
    }

    pub(crate) fn fingerprint(&self, caller: &'static Location<'static>) -> String {
        self.fingerprint.fingerprint(caller)
    }
}

impl fmt::Debug for LeakTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeakTracking")
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

/// One counted subscription. Releasing it decrements its key exactly once because
/// `release` consumes the value.
pub(crate) struct TrackedKey {
    counter: Arc<SubscriptionCounter>,
    key: String,
}

impl TrackedKey {
    pub(crate) fn register(tracking: &LeakTracking, key: String) -> Self {
        tracking.counter.add(&key);
        trace!("subscription tracked under {}", key);
        Self {
            counter: Arc::clone(&tracking.counter),
            key,
        }
    }

    pub(crate) fn release(self) {
        trace!("subscription untracked under {}", self.key);
        self.counter.remove(&self.key);
    }
}
