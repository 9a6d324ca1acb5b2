// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while parsing or validating client-side inputs.
///
/// Classification itself never fails; these cover the selectors a caller
/// passes in (filters, buckets, locales) and admin form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Status filter value is not recognized.
    InvalidStatusFilter(String),
    /// Date bucket name is not recognized.
    InvalidDateBucket(String),
    /// Admin date mode is not recognized.
    InvalidAdminDateMode(String),
    /// Locale code is not recognized.
    InvalidLocale(String),
    /// Classification scheme name is not recognized.
    InvalidStatusScheme(String),
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// A required director field is empty or invalid.
    InvalidDirector {
        /// The field that failed validation.
        field: &'static str,
        /// A human-readable description of the failure.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatusFilter(value) => write!(
                f,
                "Invalid status filter '{value}'. Expected one of: all, active, completed, cancelled, inactive, expired"
            ),
            Self::InvalidDateBucket(value) => write!(
                f,
                "Invalid date bucket '{value}'. Expected one of: today, tomorrow, week, upcoming, all"
            ),
            Self::InvalidAdminDateMode(value) => write!(
                f,
                "Invalid admin date mode '{value}'. Expected one of: all, today, week"
            ),
            Self::InvalidLocale(value) => {
                write!(f, "Invalid locale '{value}'. Expected 'ru' or 'en'")
            }
            Self::InvalidStatusScheme(value) => write!(
                f,
                "Invalid status scheme '{value}'. Expected 'collapsed' or 'extended'"
            ),
            Self::InvalidTimezone(value) => write!(f, "Invalid timezone: {value}"),
            Self::InvalidDirector { field, reason } => {
                write!(f, "Invalid director {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
