// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use relay_core::{Notification, Observer};
use relay_error::{RelayError, Result};
use std::sync::Arc;

/// Observer that records every signal it receives.
#[derive(Debug)]
pub struct RecordingObserver<T> {
    notifications: Mutex<Vec<Notification<T>>>,
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// A recorder ready to be passed to `subscribe` while the test keeps a handle.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub(crate) fn record(&self, notification: Notification<T>) {
        self.notifications.lock().push(notification);
    }
}

impl<T: Clone> RecordingObserver<T> {
    /// Every signal received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.notifications.lock().clone()
    }

    /// Only the values, in arrival order.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.notifications
            .lock()
            .iter()
            .filter_map(|n| n.value().cloned())
            .collect()
    }

    /// Only the errors, in arrival order.
    #[must_use]
    pub fn errors(&self) -> Vec<RelayError> {
        self.notifications
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(error) => Some(error.clone()),
                _ => None,
            })
            .collect()
    }

    /// How many completion signals arrived.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.notifications
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Completed))
            .count()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_count() > 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.lock().is_empty()
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Observer<T> for RecordingObserver<T> {
    fn on_next(&self, value: T) -> Result<()> {
        self.record(Notification::Next(value));
        Ok(())
    }

    fn on_error(&self, error: RelayError) -> Result<()> {
        self.record(Notification::Error(error));
        Ok(())
    }

    fn on_completed(&self) -> Result<()> {
        self.record(Notification::Completed);
        Ok(())
    }
}
