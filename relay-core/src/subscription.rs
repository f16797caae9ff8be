// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::diagnostics::TrackedKey;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Weak;

/// Per-subscriber delivery gate. Once closed, no further signal reaches the subscriber.
pub(crate) trait Gate: Send + Sync {
    /// Closes the gate, waiting for a delivery in progress on another thread.
    fn close(&self);
}

/// The list a subscriber is registered in.
pub(crate) trait Registry: Send + Sync {
    /// Removes subscriber `id`; unknown ids are ignored.
    fn detach(&self, id: u64);
}

pub(crate) struct Registration {
    pub(crate) id: u64,
    pub(crate) gate: Weak<dyn Gate>,
    pub(crate) registry: Weak<dyn Registry>,
    pub(crate) tracked: Option<TrackedKey>,
}

impl Registration {
    fn release(self) {
        if let Some(gate) = self.gate.upgrade() {
            gate.close();
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(self.id);
        }
        if let Some(tracked) = self.tracked {
            tracked.release();
        }
    }
}

/// Handle owning one subscriber's registration with a subject.
///
/// Releasing the handle removes the subscriber: once [`release`](Self::release)
/// returns, none of the subscriber's handlers will be invoked again. Release is
/// idempotent, and dropping the handle releases it.
///
/// Handles returned to subscribers that joined an already terminated subject own
/// nothing and release as a no-op.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    registration: Mutex<Option<Registration>>,
}

impl Subscription {
    pub(crate) fn new(registration: Registration) -> Self {
        Self {
            registration: Mutex::new(Some(registration)),
        }
    }

    /// A handle that owns nothing.
    pub fn empty() -> Self {
        Self {
            registration: Mutex::new(None),
        }
    }

    /// Removes the subscriber from its subject.
    ///
    /// Safe to call any number of times, from any thread, including from inside the
    /// subscriber's own handlers.
    ///
    /// # Blocking
    ///
    /// If one of this subscriber's handlers is running on another thread, `release`
    /// waits for it to return. Two threads whose handlers release each other's
    /// subscriptions (a handler on subject A releasing a B subscription while a B
    /// handler releases an A subscription) therefore deadlock. Release such
    /// subscriptions outside the handlers, or from the thread that runs them.
    pub fn release(&self) {
        let Some(registration) = self.registration.lock().take() else {
            return;
        };
        registration.release();
    }

    /// Returns `true` once the handle no longer owns a registration.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.registration.lock().is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registration = self.registration.lock();
        f.debug_struct("Subscription")
            .field("id", &registration.as_ref().map(|r| r.id))
            .field("released", &registration.is_none())
            .finish()
    }
}
