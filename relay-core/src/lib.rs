// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-based subjects and subscription leak diagnostics.
//!
//! - [`Subject`]: fed by a producer, broadcast to subscribers, replays its
//!   termination to late subscribers.
//! - [`Observer`] / [`Observable`]: the sink and source capabilities a subject combines.
//! - [`Subscription`]: the handle owning one subscriber's registration.
//! - [`SubscriptionCounter`]: counts live subscriptions per creation site to find leaks.
//! - [`EventPattern`]: a structural (sender, payload) pair.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod diagnostics;
pub mod event_pattern;
pub mod notification;
pub mod observer;
pub mod stream_item;
pub mod subject;
pub mod subject_stream;
pub mod subscription;

pub use self::diagnostics::{
    BacktraceFingerprint, CallSiteFingerprint, FingerprintSource, LeakTracking,
    SubscriptionCounter,
};
pub use self::event_pattern::{EventPattern, EventPatternLike};
pub use self::notification::Notification;
pub use self::observer::{Observable, Observer, ObserverFn, SubjectLike};
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
pub use self::subject_stream::SubjectStream;
pub use self::subscription::Subscription;
pub use relay_error::{RelayError, Result};
