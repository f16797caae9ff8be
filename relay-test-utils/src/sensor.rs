// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// Identity of a reading source: a non-`Copy` payload and event sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sensor {
    pub id: String,
    pub zone: u8,
}

impl Sensor {
    #[must_use]
    pub fn new(id: impl Into<String>, zone: u8) -> Self {
        Self { id: id.into(), zone }
    }
}

impl Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@zone{}", self.id, self.zone)
    }
}

#[must_use]
pub fn sensor_boiler() -> Sensor {
    Sensor::new("boiler", 1)
}

#[must_use]
pub fn sensor_attic() -> Sensor {
    Sensor::new("attic", 2)
}

#[must_use]
pub fn sensor_garage() -> Sensor {
    Sensor::new("garage", 3)
}
