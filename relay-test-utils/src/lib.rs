// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Relay library.
//!
//! This crate is meant for development and testing only.
//!
//! # Key Types
//!
//! - [`RecordingObserver`] keeps every signal it receives, in order.
//! - [`FailingObserver`] records like `RecordingObserver` but fails selected handlers.
//! - [`FixedFingerprint`] counts every subscription under one known key.
//! - [`Sensor`] plus the `sensor_*` fixtures give a non-`Copy` payload.
//!
//! # Example
//!
//! ```rust
//! use relay_core::{Notification, Subject};
//! use relay_test_utils::RecordingObserver;
//!
//! let subject = Subject::<i32>::new();
//! let recorder = RecordingObserver::<i32>::shared();
//! let _subscription = subject.subscribe(recorder.clone());
//!
//! subject.feed(1).unwrap();
//! subject.complete().unwrap();
//!
//! assert_eq!(
//!     recorder.notifications(),
//!     vec![Notification::Next(1), Notification::Completed]
//! );
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod failing_observer;
pub mod fixed_fingerprint;
pub mod sensor;
pub mod recording_observer;

pub use failing_observer::FailingObserver;
pub use fixed_fingerprint::FixedFingerprint;
pub use sensor::{sensor_attic, sensor_boiler, sensor_garage, Sensor};
pub use recording_observer::RecordingObserver;
