// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject with replayed termination.
//!
//! A [`Subject`] is fed by a producer (`feed`, `fail`, `complete`) and broadcasts every
//! signal to the subscribers registered at that moment.
//!
//! ## Characteristics
//!
//! - **Hot**: subscribers only receive values fed after they joined.
//! - **Synchronous**: handlers run on the producer's thread, inside the emitting call.
//! - **Terminal replay**: after `fail` or `complete`, a new subscriber immediately receives
//!   the stored error or the completion signal, and nothing else.
//! - **Thread-safe**: cheap to clone; all clones share the same state. Emissions are
//!   serialized, so every subscriber observes the same order.
//! - **Fault isolation**: a failing handler does not stop delivery to the others; the
//!   producer gets the fault back once every subscriber was served.
//!
//! ## Example
//!
//! ```
//! use relay_core::Subject;
//! use std::sync::{Arc, Mutex};
//!
//! let subject = Subject::<i32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! let subscription = subject.subscribe_fn(
//!     move |value| {
//!         sink.lock().unwrap().push(value);
//!         Ok(())
//!     },
//!     |_| Ok(()),
//!     || Ok(()),
//! );
//!
//! subject.feed(1).unwrap();
//! subject.feed(2).unwrap();
//! subject.complete().unwrap();
//! subject.feed(3).unwrap(); // ignored: the subject is terminated
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! subscription.release();
//! ```

mod state;

use crate::diagnostics::{LeakTracking, TrackedKey};
use crate::subscription::{Gate, Registration, Registry};
use crate::{Observable, Observer, ObserverFn, Subscription};
use parking_lot::{Mutex, ReentrantMutex};
use relay_error::{RelayError, Result};
use state::{Entry, SubjectState, Terminal};
use std::panic::Location;
use std::sync::{Arc, Weak};

pub(crate) struct SubjectInner<T> {
    // Serializes feed/fail/complete. Reentrant so handlers may emit on the same thread.
    emission: ReentrantMutex<()>,
    // Never held while a handler runs.
    state: Mutex<SubjectState<T>>,
    tracking: Option<LeakTracking>,
}

impl<T> Registry for SubjectInner<T> {
    fn detach(&self, id: u64) {
        let mut state = self.state.lock();
        if let Some(position) = state.entries.iter().position(|entry| entry.id == id) {
            state.entries.remove(position);
            trace!("subscriber {} detached", id);
        }
    }
}

/// A hot subject that broadcasts values, errors and completion to its subscribers.
///
/// See the [module documentation](self) for semantics and an example.
pub struct Subject<T> {
    inner: Arc<SubjectInner<T>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    /// Creates an active subject with no subscribers and no leak tracking.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates an active subject whose subscriptions are counted by `tracking`.
    #[must_use]
    pub fn with_leak_tracking(tracking: LeakTracking) -> Self {
        Self::build(Some(tracking))
    }

    fn build(tracking: Option<LeakTracking>) -> Self {
        Self {
            inner: Arc::new(SubjectInner {
                emission: ReentrantMutex::new(()),
                state: Mutex::new(SubjectState::new()),
                tracking,
            }),
        }
    }

    /// Delivers `value` to every current subscriber, in subscription order.
    ///
    /// Does nothing once the subject is terminated.
    ///
    /// # Errors
    ///
    /// Returns the fault of a failing handler, or `RelayError::MultipleErrors` when
    /// several failed. The remaining subscribers are served either way.
    pub fn feed(&self, value: T) -> Result<()> {
        let _emission = self.inner.emission.lock();
        let entries = {
            let state = self.inner.state.lock();
            if state.terminal.is_some() {
                return Ok(());
            }
            state.entries.clone()
        };

        let mut faults = Vec::new();
        for entry in &entries {
            if let Err(fault) = entry.deliver(value.clone()) {
                warn!("subscriber {} failed to handle a value: {}", entry.id, fault);
                faults.push(fault);
            }
        }
        RelayError::from_faults(faults)
    }

    /// Terminates the subject with `error`.
    ///
    /// Every current subscriber receives the error and is detached; later subscribers
    /// receive it as soon as they subscribe. Does nothing if already terminated.
    ///
    /// # Errors
    ///
    /// Returns the faults of error handlers that failed (including subscribers without
    /// an error handler). The subject is terminated regardless.
    pub fn fail(&self, error: RelayError) -> Result<()> {
        self.terminate(Terminal::Faulted(error))
    }

    /// Completes the subject.
    ///
    /// Every current subscriber is notified and detached; later subscribers are
    /// notified as soon as they subscribe. Does nothing if already terminated.
    ///
    /// # Errors
    ///
    /// Returns the faults of completion handlers that failed. The subject is completed
    /// regardless.
    pub fn complete(&self) -> Result<()> {
        self.terminate(Terminal::Completed)
    }

    fn terminate(&self, terminal: Terminal) -> Result<()> {
        let _emission = self.inner.emission.lock();
        let entries = {
            let mut state = self.inner.state.lock();
            if state.terminal.is_some() {
                return Ok(());
            }
            state.terminal = Some(terminal.clone());
            std::mem::take(&mut state.entries)
        };
        debug!(
            "subject terminated ({:?}); notifying {} subscribers",
            terminal,
            entries.len()
        );

        let mut faults = Vec::new();
        for entry in &entries {
            if let Err(fault) = entry.terminate(&terminal) {
                warn!("subscriber {} failed to handle termination: {}", entry.id, fault);
                faults.push(fault);
            }
        }
        RelayError::from_faults(faults)
    }

    /// Registers `observer`.
    ///
    /// On an active subject the observer joins the broadcast list. On a terminated
    /// subject it immediately receives the stored error or completion and the returned
    /// handle owns nothing.
    ///
    /// With leak tracking configured, live subscriptions are counted under the
    /// fingerprint of the calling site until the handle is released.
    #[track_caller]
    pub fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Subscription {
        let caller = Location::caller();

        let entry = {
            let mut state = self.inner.state.lock();
            if let Some(terminal) = state.terminal.clone() {
                drop(state);
                if let Err(fault) = terminal.notify(observer.as_ref()) {
                    warn!("late subscriber failed to handle replayed termination: {}", fault);
                }
                return Subscription::empty();
            }

            let id = state.next_id;
            state.next_id += 1;
            let entry = Arc::new(Entry::new(id, observer));
            state.entries.push(Arc::clone(&entry));
            entry
        };

        let tracked = match &self.inner.tracking {
            Some(tracking) => Some(TrackedKey::register(tracking, tracking.fingerprint(caller))),
            None => None,
        };

        let gate = Arc::downgrade(&entry) as Weak<dyn Gate>;
        let registry = Arc::downgrade(&self.inner) as Weak<dyn Registry>;
        trace!("subscriber {} registered at {}", entry.id, caller);

        Subscription::new(Registration {
            id: entry.id,
            gate,
            registry,
            tracked,
        })
    }

    /// Registers three handlers: values, the terminal error and completion.
    #[track_caller]
    pub fn subscribe_fn<N, E, C>(&self, on_next: N, on_error: E, on_completed: C) -> Subscription
    where
        N: Fn(T) -> Result<()> + Send + Sync + 'static,
        E: Fn(RelayError) -> Result<()> + Send + Sync + 'static,
        C: Fn() -> Result<()> + Send + Sync + 'static,
    {
        let observer = ObserverFn::new(on_next)
            .with_error(on_error)
            .with_completed(on_completed);
        self.subscribe(Arc::new(observer))
    }

    /// Returns `true` once `fail` or `complete` was called.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.state.lock().terminal.is_some()
    }

    /// Returns `true` if the subject was completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.inner.state.lock().terminal, Some(Terminal::Completed))
    }

    /// Returns `true` if the subject was terminated with an error.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        matches!(self.inner.state.lock().terminal, Some(Terminal::Faulted(_)))
    }

    /// The error the subject failed with, if any.
    #[must_use]
    pub fn terminal_error(&self) -> Option<RelayError> {
        match &self.inner.state.lock().terminal {
            Some(Terminal::Faulted(error)) => Some(error.clone()),
            _ => None,
        }
    }

    /// Number of subscribers currently registered.
    ///
    /// Released subscriptions are removed immediately; termination detaches everyone.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    /// Returns `true` if at least one subscriber is registered.
    #[must_use]
    pub fn has_observers(&self) -> bool {
        self.subscriber_count() > 0
    }

    /// The leak tracking configuration, if any.
    #[must_use]
    pub fn leak_tracking(&self) -> Option<&LeakTracking> {
        self.inner.tracking.as_ref()
    }
}

impl<T: Clone + Send + 'static> Observer<T> for Subject<T> {
    fn on_next(&self, value: T) -> Result<()> {
        self.feed(value)
    }

    fn on_error(&self, error: RelayError) -> Result<()> {
        self.fail(error)
    }

    fn on_completed(&self) -> Result<()> {
        self.complete()
    }
}

impl<T: Clone + Send + 'static> Observable<T> for Subject<T> {
    #[track_caller]
    fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Subscription {
        Subject::subscribe(self, observer)
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
