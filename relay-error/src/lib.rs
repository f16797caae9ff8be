// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Relay subject library
//!
//! This crate defines the root [`RelayError`] type shared by subjects, observers and
//! the subscription diagnostics. Errors travel two ways:
//!
//! - as **terminal signals**, pushed into a subject with `fail` and replayed to late subscribers;
//! - as **handler faults**, returned to the producer when an observer callback fails.
//!
//! # Examples
//!
//! ```
//! use relay_error::{RelayError, Result};
//!
//! fn handle(value: i32) -> Result<()> {
//!     if value < 0 {
//!         return Err(RelayError::handler_fault("negative reading"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(handle(1).is_ok());
//! assert!(handle(-1).is_err());
//! ```

use std::sync::Arc;

/// Root error type for all Relay operations
///
/// Every variant is cheap to clone: a subject keeps the error it failed with and
/// hands a copy to each subscriber that joins afterwards.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RelayError {
    /// Application-level fault pushed into a subject
    ///
    /// This is the normal way a producer terminates a stream with an error.
    #[error("Stream fault: {context}")]
    StreamFault {
        /// Description of what went wrong upstream
        context: String,
    },

    /// Observer handler failed while processing a signal
    #[error("Handler fault: {context}")]
    HandlerFault {
        /// Description of the failing handler
        context: String,
    },

    /// Custom error from user code
    ///
    /// This wraps errors produced by user-provided functions and callbacks,
    /// allowing them to be propagated through the Relay error system.
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// Multiple errors occurred
    ///
    /// One emission can reach many observers, and several of them can fail.
    /// This variant aggregates them.
    #[error("Multiple errors occurred: {count} errors")]
    MultipleErrors {
        /// Number of errors that occurred
        count: usize,
        /// The individual errors
        errors: Vec<RelayError>,
    },
}

impl RelayError {
    /// Create a stream fault with the given context
    pub fn stream_fault(context: impl Into<String>) -> Self {
        Self::StreamFault {
            context: context.into(),
        }
    }

    /// Create a handler fault with the given context
    pub fn handler_fault(context: impl Into<String>) -> Self {
        Self::HandlerFault {
            context: context.into(),
        }
    }

    /// Wrap an error raised by an observer handler, keeping it as the source
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Fold the faults collected during one emission pass into a single result.
    ///
    /// No faults yields `Ok(())`, a single fault is returned as is, and several
    /// faults become `MultipleErrors` in the order they were collected.
    ///
    /// # Errors
    /// Returns the collected fault(s) when `faults` is not empty.
    pub fn from_faults(mut faults: Vec<RelayError>) -> Result<()> {
        match faults.len() {
            0 => Ok(()),
            1 => Err(faults.remove(0)),
            count => Err(Self::MultipleErrors {
                count,
                errors: faults,
            }),
        }
    }

    /// Check if this error was raised by an observer rather than pushed by a producer
    #[must_use]
    pub fn is_handler_fault(&self) -> bool {
        match self {
            Self::HandlerFault { .. } => true,
            Self::MultipleErrors { errors, .. } => errors.iter().all(Self::is_handler_fault),
            _ => false,
        }
    }
}

/// Specialized Result type for Relay operations
///
/// # Examples
///
/// ```
/// use relay_error::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, RelayError>;
