// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscription leak diagnostics.
//!
//! A [`SubscriptionCounter`] counts live subscriptions per creation site. Subjects
//! configured with [`LeakTracking`] add one count when a subscription is created and
//! remove it when the [`Subscription`](crate::Subscription) is released. A count that
//! keeps growing points at code that subscribes and never lets go.
//!
//! ```
//! use relay_core::{LeakTracking, Subject, SubscriptionCounter};
//! use std::sync::Arc;
//!
//! let counter = Arc::new(SubscriptionCounter::new());
//! let subject = Subject::<i32>::with_leak_tracking(LeakTracking::new(counter.clone()));
//!
//! let subscription = subject.subscribe_fn(|_| Ok(()), |_| Ok(()), || Ok(()));
//! assert_eq!(counter.total_outstanding(), 1);
//!
//! subscription.release();
//! assert_eq!(counter.total_outstanding(), 0);
//! ```

mod fingerprint;
mod leak_tracking;
mod subscription_counter;

pub use fingerprint::{BacktraceFingerprint, CallSiteFingerprint, FingerprintSource};
pub use leak_tracking::LeakTracking;
pub(crate) use leak_tracking::TrackedKey;
pub use subscription_counter::SubscriptionCounter;
