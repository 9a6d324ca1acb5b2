// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local wall-clock source.
//!
//! Every rule in this crate takes `now` as an argument. Callers read a
//! [`Clock`] once at the start of an operation and pass that single value
//! through, so that all predicates inside one operation agree.

use crate::error::DomainError;
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// The zone the cinema API reports local times in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Moscow";

/// Source of the current local date-time.
pub trait Clock: Send + Sync {
    /// Returns the current wall-clock time in the cinema's zone.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock and converts it into a fixed IANA zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Creates a clock for the given zone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a clock from an IANA zone name such as `Europe/Moscow`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not a known zone.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    /// The zone this clock reports in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Moscow)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
