// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Capability traits for the two sides of a push-based stream.
//!
//! - [`Observer`] is the event **sink**: it can be fed values, an error, or completion.
//! - [`Observable`] is the event **source**: observers subscribe to it and receive signals.
//! - [`SubjectLike`] names anything that is both at once.
//!
//! A single concrete type can implement both traits; [`Subject`](crate::Subject) does.

use crate::Subscription;
use relay_error::{RelayError, Result};
use std::sync::Arc;

/// Receiver of push-based signals.
///
/// Every handler returns a [`Result`]. An `Err` is a handler fault: the producer that
/// emitted the signal is told about it, but delivery to other observers goes on.
pub trait Observer<T>: Send + Sync {
    /// Receives the next value of the stream.
    ///
    /// # Errors
    /// Returns an error if the observer cannot process the value.
    fn on_next(&self, value: T) -> Result<()>;

    /// Receives the error that terminated the stream.
    ///
    /// # Errors
    /// Returns an error if the observer cannot handle the failure.
    fn on_error(&self, error: RelayError) -> Result<()>;

    /// Receives the completion signal that terminated the stream.
    ///
    /// # Errors
    /// Returns an error if the observer fails while finishing.
    fn on_completed(&self) -> Result<()>;
}

/// Source of push-based signals.
pub trait Observable<T> {
    /// Registers `observer` and returns the handle that owns the registration.
    ///
    /// The returned [`Subscription`] releases the registration when dropped.
    #[track_caller]
    fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Subscription;
}

/// Something that consumes `I` signals and produces `O` signals.
///
/// Implemented automatically for every type that is both an [`Observer<I>`] and an
/// [`Observable<O>`].
pub trait SubjectLike<I, O = I>: Observer<I> + Observable<O> {}

impl<S, I, O> SubjectLike<I, O> for S where S: Observer<I> + Observable<O> + ?Sized {}

type NextHandler<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;
type ErrorHandler = Box<dyn Fn(RelayError) -> Result<()> + Send + Sync>;
type CompletedHandler = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// An [`Observer`] assembled from closures.
///
/// Only the value handler is mandatory. Without an error handler the terminal error
/// is handed back to the producer as unhandled; without a completion handler
/// completion is silently accepted.
///
/// # Example
///
/// ```
/// use relay_core::{Observer, ObserverFn};
///
/// let observer = ObserverFn::new(|value: i32| {
///     assert_eq!(value, 7);
///     Ok(())
/// })
/// .with_completed(|| Ok(()));
///
/// observer.on_next(7).unwrap();
/// observer.on_completed().unwrap();
/// ```
pub struct ObserverFn<T> {
    on_next: NextHandler<T>,
    on_error: Option<ErrorHandler>,
    on_completed: Option<CompletedHandler>,
}

impl<T> ObserverFn<T> {
    /// Creates an observer that forwards values to `on_next`.
    pub fn new<N>(on_next: N) -> Self
    where
        N: Fn(T) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            on_next: Box::new(on_next),
            on_error: None,
            on_completed: None,
        }
    }

    /// Sets the handler invoked with the terminal error.
    #[must_use]
    pub fn with_error<E>(mut self, on_error: E) -> Self
    where
        E: Fn(RelayError) -> Result<()> + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Sets the handler invoked on completion.
    #[must_use]
    pub fn with_completed<C>(mut self, on_completed: C) -> Self
    where
        C: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.on_completed = Some(Box::new(on_completed));
        self
    }
}

impl<T> Observer<T> for ObserverFn<T> {
    fn on_next(&self, value: T) -> Result<()> {
        (self.on_next)(value)
    }

    fn on_error(&self, error: RelayError) -> Result<()> {
        match &self.on_error {
            Some(handler) => handler(error),
            None => Err(error),
        }
    }

    fn on_completed(&self) -> Result<()> {
        match &self.on_completed {
            Some(handler) => handler(),
            None => Ok(()),
        }
    }
}
