// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Observer;
use relay_error::{RelayError, Result};

/// A materialized signal: one value, the terminal error, or completion.
///
/// Two `Error` notifications compare equal when their errors render the same message,
/// which is what assertions on recorded signals need.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// A value pushed with `feed`
    Next(T),
    /// The error that terminated the stream
    Error(RelayError),
    /// Successful termination
    Completed,
}

impl<T> Notification<T> {
    /// Returns `true` for `Completed` and `Error`.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Next(_))
    }

    /// Returns the carried value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Notification::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Replays this notification into `observer`.
    ///
    /// # Errors
    /// Returns whatever the observer's handler returns.
    pub fn accept(self, observer: &dyn Observer<T>) -> Result<()> {
        match self {
            Notification::Next(value) => observer.on_next(value),
            Notification::Error(error) => observer.on_error(error),
            Notification::Completed => observer.on_completed(),
        }
    }
}

impl<T: PartialEq> PartialEq for Notification<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Notification::Next(a), Notification::Next(b)) => a == b,
            (Notification::Error(a), Notification::Error(b)) => a.to_string() == b.to_string(),
            (Notification::Completed, Notification::Completed) => true,
            _ => false,
        }
    }
}
