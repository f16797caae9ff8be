// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// Read access to an event invocation: who raised it and what it carried.
pub trait EventPatternLike {
    /// The type of the party that raised the event.
    type Sender;
    /// The type of the event data.
    type Args;

    /// Gets the party that raised the event.
    fn sender(&self) -> &Self::Sender;

    /// Gets the data generated by the event.
    fn event_args(&self) -> &Self::Args;
}

/// An immutable (sender, payload) pair.
///
/// Equality and hashing are structural: two patterns are equal when both their
/// senders and their payloads are equal.
///
/// # Example
///
/// ```
/// use relay_core::{EventPattern, EventPatternLike};
///
/// let pattern = EventPattern::new("thermometer", 21.5);
/// assert_eq!(*pattern.sender(), "thermometer");
/// assert_eq!(pattern, EventPattern::new("thermometer", 21.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EventPattern<S, A> {
    sender: S,
    event_args: A,
}

impl<S, A> EventPattern<S, A> {
    /// Creates a pattern from the raising party and the event data.
    pub const fn new(sender: S, event_args: A) -> Self {
        Self { sender, event_args }
    }

    /// Splits the pattern back into its parts.
    pub fn into_parts(self) -> (S, A) {
        (self.sender, self.event_args)
    }
}

impl<S, A> EventPatternLike for EventPattern<S, A> {
    type Sender = S;
    type Args = A;

    fn sender(&self) -> &S {
        &self.sender
    }

    fn event_args(&self) -> &A {
        &self.event_args
    }
}

impl<S, A> From<(S, A)> for EventPattern<S, A> {
    fn from((sender, event_args): (S, A)) -> Self {
        Self::new(sender, event_args)
    }
}

impl<S: Display, A: Display> Display for EventPattern<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventPattern[sender={}, args={}]", self.sender, self.event_args)
    }
}
