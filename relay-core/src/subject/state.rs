// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::subscription::Gate;
use crate::Observer;
use parking_lot::ReentrantMutex;
use relay_error::{RelayError, Result};
use std::cell::Cell;
use std::sync::Arc;

/// How a subject ended. Replayed to every subscriber that joins afterwards.
#[derive(Debug, Clone)]
pub(crate) enum Terminal {
    Completed,
    Faulted(RelayError),
}

impl Terminal {
    pub(crate) fn notify<T>(&self, observer: &dyn Observer<T>) -> Result<()> {
        match self {
            Self::Completed => observer.on_completed(),
            Self::Faulted(error) => observer.on_error(error.clone()),
        }
    }
}

pub(crate) struct SubjectState<T> {
    pub(crate) terminal: Option<Terminal>,
    pub(crate) next_id: u64,
    pub(crate) entries: Vec<Arc<Entry<T>>>,
}

impl<T> SubjectState<T> {
    pub(crate) const fn new() -> Self {
        Self {
            terminal: None,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// A registered subscriber.
///
/// Handlers run while the gate is held: closing the gate from another thread waits
/// for the running handler, and the same thread may close it from inside a handler.
pub(crate) struct Entry<T> {
    pub(crate) id: u64,
    observer: Arc<dyn Observer<T>>,
    gate: ReentrantMutex<Cell<bool>>,
}

impl<T> Entry<T> {
    pub(crate) fn new(id: u64, observer: Arc<dyn Observer<T>>) -> Self {
        Self {
            id,
            observer,
            gate: ReentrantMutex::new(Cell::new(true)),
        }
    }

    pub(crate) fn deliver(&self, value: T) -> Result<()> {
        let open = self.gate.lock();
        if !open.get() {
            return Ok(());
        }
        self.observer.on_next(value)
    }

    pub(crate) fn terminate(&self, terminal: &Terminal) -> Result<()> {
        let open = self.gate.lock();
        if !open.replace(false) {
            return Ok(());
        }
        terminal.notify(self.observer.as_ref())
    }
}

impl<T> Gate for Entry<T> {
    fn close(&self) {
        self.gate.lock().set(false);
    }
}
