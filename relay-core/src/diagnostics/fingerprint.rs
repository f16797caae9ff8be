// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Derivation of the key a subscription is counted under.
//!
//! A fingerprint names *where* a subscription was created. Subscriptions created from
//! the same place share a fingerprint, so the counter aggregates per call site rather
//! than per instance.
//!
//! Two sources are provided:
//!
//! - [`CallSiteFingerprint`] uses the `#[track_caller]` location of the `subscribe`
//!   call. Cheap enough to leave on in production.
//! - [`BacktraceFingerprint`] captures the whole synchronous call history, strips the
//!   innermost frames up to the caller of `subscribe` and the frames of async
//!   executors, and keeps the rest.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;

/// Produces the key a new subscription is counted under.
///
/// `caller` is the location of the `subscribe` call that created the subscription.
pub trait FingerprintSource: Send + Sync {
    /// Builds the fingerprint for a subscription created at `caller`.
    fn fingerprint(&self, caller: &'static Location<'static>) -> String;
}

/// Fingerprints a subscription by the source location of its `subscribe` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSiteFingerprint;

impl FingerprintSource for CallSiteFingerprint {
    fn fingerprint(&self, caller: &'static Location<'static>) -> String {
        format_location(caller)
    }
}

/// Symbol prefixes of the frames that capture the backtrace and run `subscribe`.
///
/// The innermost run of frames matching these is dropped as a whole, so standard
/// library frames nested inside the subscribe path never lead the key.
const MACHINERY_PREFIXES: &[&str] = &[
    "std::",
    "<std::",
    "core::",
    "<core::",
    "alloc::",
    "<alloc::",
    "relay_core::",
    "<relay_core::",
];

/// Symbol prefixes of generated future plumbing and executor internals, dropped
/// wherever they appear in the remaining frames.
const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &[
    "core::future::",
    "<core::future::",
    "std::future::",
    "<core::pin::Pin<",
    "tokio::runtime::",
    "<tokio::runtime::",
    "tokio::task::",
    "<tokio::task::",
    "futures_executor::",
    "<futures_executor::",
    "futures_util::",
    "<futures_util::",
];

/// Fingerprints a subscription by its full call history.
///
/// Falls back to the call-site location when the platform cannot capture a
/// backtrace, or when every frame was filtered out.
///
/// # Example
///
/// ```
/// use relay_core::{BacktraceFingerprint, FingerprintSource};
/// use std::panic::Location;
///
/// let source = BacktraceFingerprint::new().exclude_prefix("my_framework::");
/// let key = source.fingerprint(Location::caller());
/// assert!(!key.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BacktraceFingerprint {
    excluded_prefixes: Vec<String>,
}

impl BacktraceFingerprint {
    /// Creates a source that filters common executors' frames.
    #[must_use]
    pub fn new() -> Self {
        Self {
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_owned())
                .collect(),
        }
    }

    /// Additionally drops frames whose symbol starts with `prefix`.
    #[must_use]
    pub fn exclude_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_prefixes.push(prefix.into());
        self
    }

    /// The symbol prefixes currently filtered out.
    #[must_use]
    pub fn excluded_prefixes(&self) -> &[String] {
        &self.excluded_prefixes
    }

    /// Applies this source's filtering to an already rendered backtrace.
    ///
    /// Frames are listed innermost first. The leading run of standard library, subject
    /// and excluded frames is skipped, then excluded frames are dropped from the rest.
    #[must_use]
    pub fn fingerprint_from_trace(&self, trace: &str) -> String {
        parse_frames(trace)
            .into_iter()
            .skip_while(|frame| is_machinery(frame.symbol) || self.is_excluded(frame.symbol))
            .filter(|frame| !self.is_excluded(frame.symbol))
            .flat_map(Frame::into_lines)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn is_excluded(&self, symbol: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| symbol.starts_with(prefix.as_str()))
    }
}

impl Default for BacktraceFingerprint {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintSource for BacktraceFingerprint {
    fn fingerprint(&self, caller: &'static Location<'static>) -> String {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return format_location(caller);
        }

        let key = self.fingerprint_from_trace(&backtrace.to_string());
        if key.is_empty() {
            format_location(caller)
        } else {
            key
        }
    }
}

fn is_machinery(symbol: &str) -> bool {
    MACHINERY_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(*prefix))
}

fn format_location(location: &Location<'_>) -> String {
    format!(
        "{}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    )
}

struct Frame<'a> {
    symbol: &'a str,
    details: Vec<&'a str>,
}

impl<'a> Frame<'a> {
    fn into_lines(self) -> impl Iterator<Item = String> + 'a {
        std::iter::once(self.symbol.trim_end().to_owned()).chain(
            self.details
                .into_iter()
                .map(|line| format!("  {}", line.trim_end())),
        )
    }
}

// Rendered backtraces list frames as "<index>: <symbol>" followed by indented
// "at <file>:<line>:<col>" lines; inlined symbols appear without an index.
// Indices are dropped so the key only depends on the frames that survive filtering.
fn parse_frames(trace: &str) -> Vec<Frame<'_>> {
    let mut frames: Vec<Frame<'_>> = Vec::new();
    for line in trace.lines() {
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() {
            continue;
        }
        if trimmed.starts_with("at ") {
            if let Some(frame) = frames.last_mut() {
                frame.details.push(trimmed);
            }
            continue;
        }
        frames.push(Frame {
            symbol: frame_symbol(trimmed).unwrap_or(trimmed),
            details: Vec::new(),
        });
    }
    frames
}

fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.split_once(": ")?;
    index.parse::<usize>().ok()?;
    Some(symbol)
}
