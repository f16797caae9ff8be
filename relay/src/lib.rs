// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Relay
//!
//! Hot, push-based subjects and a diagnostic for subscriptions that are never released.
//!
//! ## Overview
//!
//! A [`Subject`] is fed by a producer and broadcasts each value to the subscribers
//! registered at that moment. Once it fails or completes, it stays terminated: further
//! values are ignored and every later subscriber is immediately told how it ended.
//!
//! Subscribing returns a [`Subscription`]. Releasing (or dropping) it removes the
//! subscriber. Subscriptions that are never released are a common leak in long-lived
//! reactive code; a [`SubscriptionCounter`] finds them by counting live subscriptions
//! per creation site.
//!
//! ## Quick Start
//!
//! ```rust
//! use relay::prelude::*;
//! use std::sync::Arc;
//!
//! let counter = Arc::new(SubscriptionCounter::new());
//! let readings = Subject::<f64>::with_leak_tracking(LeakTracking::new(counter.clone()));
//!
//! let kept = readings.subscribe_fn(|_| Ok(()), |_| Ok(()), || Ok(()));
//! let forgotten = readings.subscribe_fn(|_| Ok(()), |_| Ok(()), || Ok(()));
//! std::mem::forget(forgotten);
//!
//! readings.feed(21.5).unwrap();
//! kept.release();
//!
//! // One subscription is still alive, counted under the line that created it.
//! assert_eq!(counter.total_outstanding(), 1);
//! println!("{}", counter.report());
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): log through the `tracing` crate. Without it, warnings go to
//!   standard error and debug output is compiled out.

pub use relay_core::diagnostics;
pub use relay_core::{
    BacktraceFingerprint, CallSiteFingerprint, EventPattern, EventPatternLike,
    FingerprintSource, LeakTracking, Notification, Observable, Observer, ObserverFn,
    StreamItem, Subject, SubjectLike, SubjectStream, Subscription, SubscriptionCounter,
};
pub use relay_error::{RelayError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        LeakTracking, Observable, Observer, RelayError, Subject, SubjectLike, Subscription,
        SubscriptionCounter,
    };
}
