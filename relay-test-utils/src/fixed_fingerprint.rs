// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use relay_core::FingerprintSource;
use std::panic::Location;

/// Fingerprint source that ignores the call site and always answers the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFingerprint(pub String);

impl FixedFingerprint {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl FingerprintSource for FixedFingerprint {
    fn fingerprint(&self, _caller: &'static Location<'static>) -> String {
        self.0.clone()
    }
}
