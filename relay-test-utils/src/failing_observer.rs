// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observer that injects handler faults.

use crate::RecordingObserver;
use relay_core::{Notification, Observer};
use relay_error::{RelayError, Result};
use std::sync::Arc;

/// Records every signal like [`RecordingObserver`], then fails the handlers it was
/// told to fail.
///
/// ```rust
/// use relay_core::Observer;
/// use relay_test_utils::FailingObserver;
///
/// let observer = FailingObserver::<i32>::failing_values("rejected");
/// assert!(observer.on_next(1).is_err());
/// assert_eq!(observer.recorder().values(), vec![1]);
/// ```
#[derive(Debug)]
pub struct FailingObserver<T> {
    recorder: RecordingObserver<T>,
    context: String,
    fail_values: bool,
    fail_terminal: bool,
}

impl<T> FailingObserver<T> {
    /// Fails every `on_next` with a handler fault carrying `context`.
    #[must_use]
    pub fn failing_values(context: impl Into<String>) -> Self {
        Self {
            recorder: RecordingObserver::new(),
            context: context.into(),
            fail_values: true,
            fail_terminal: false,
        }
    }

    /// Fails `on_error` and `on_completed` with a handler fault carrying `context`.
    #[must_use]
    pub fn failing_terminal(context: impl Into<String>) -> Self {
        Self {
            recorder: RecordingObserver::new(),
            context: context.into(),
            fail_values: false,
            fail_terminal: true,
        }
    }

    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// What the observer received, including the signals it failed on.
    #[must_use]
    pub const fn recorder(&self) -> &RecordingObserver<T> {
        &self.recorder
    }

    fn fault(&self, failing: bool) -> Result<()> {
        if failing {
            Err(RelayError::handler_fault(self.context.clone()))
        } else {
            Ok(())
        }
    }
}

impl<T: Send> Observer<T> for FailingObserver<T> {
    fn on_next(&self, value: T) -> Result<()> {
        self.recorder.record(Notification::Next(value));
        self.fault(self.fail_values)
    }

    fn on_error(&self, error: RelayError) -> Result<()> {
        self.recorder.record(Notification::Error(error));
        self.fault(self.fail_terminal)
    }

    fn on_completed(&self) -> Result<()> {
        self.recorder.record(Notification::Completed);
        self.fault(self.fail_terminal)
    }
}
