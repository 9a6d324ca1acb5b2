// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status normalization.
//!
//! The API stores booking status as free text, in English or Russian, with
//! inconsistent casing. This module is the only place that interprets those
//! strings. Everything downstream works with [`CanonicalStatus`].
//!
//! ## Schemes
//!
//! Two classification schemes exist:
//!
//! - [`StatusScheme::Collapsed`] (default) folds `inactive` and `expired`
//!   into `completed`, leaving three canonical values.
//! - [`StatusScheme::Extended`] keeps all five buckets distinct.
//!
//! Both read the same token table, so display text, display class, filtering
//! and sorting cannot disagree about what a raw string means.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Normalized booking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    /// Booking is valid for an upcoming session.
    Active,
    /// Session has taken place.
    Completed,
    /// Booking was deactivated without being cancelled.
    Inactive,
    /// Booking was cancelled by the user or the cinema.
    Cancelled,
    /// Booking lapsed before it was used.
    Expired,
}

/// Raw tokens recognized for each status, lowercase.
const STATUS_TOKENS: &[(CanonicalStatus, &[&str])] = &[
    (CanonicalStatus::Active, &["active", "активно"]),
    (CanonicalStatus::Completed, &["completed", "завершено"]),
    (CanonicalStatus::Inactive, &["inactive", "неактивно"]),
    (CanonicalStatus::Cancelled, &["cancelled", "отменено", "отмена"]),
    (CanonicalStatus::Expired, &["expired", "просрочено"]),
];

/// Looks up a raw status in the token table without applying any scheme.
fn recognize(raw: &str) -> Option<CanonicalStatus> {
    let needle: String = raw.trim().to_lowercase();
    STATUS_TOKENS
        .iter()
        .find(|(_, tokens)| tokens.contains(&needle.as_str()))
        .map(|(status, _)| *status)
}

impl CanonicalStatus {
    /// Every status, in descending display priority.
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Completed,
        Self::Inactive,
        Self::Cancelled,
        Self::Expired,
    ];

    /// Classifies a raw status under the default scheme.
    ///
    /// Never fails. Unrecognized input is treated as `Completed`.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        StatusScheme::default().classify(raw)
    }

    /// Returns the English token for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Inactive => "inactive",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Sort priority. Higher sorts first; cancelled and expired tie.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        match self {
            Self::Active => 3,
            Self::Completed => 2,
            Self::Inactive => 1,
            Self::Cancelled | Self::Expired => 0,
        }
    }

    /// User-facing label.
    #[must_use]
    pub const fn display_text(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Ru, Self::Active) => "Активно",
            (Locale::Ru, Self::Completed) => "Завершено",
            (Locale::Ru, Self::Inactive) => "Неактивно",
            (Locale::Ru, Self::Cancelled) => "Отменено",
            (Locale::Ru, Self::Expired) => "Просрочено",
            (Locale::En, Self::Active) => "Active",
            (Locale::En, Self::Completed) => "Completed",
            (Locale::En, Self::Inactive) => "Inactive",
            (Locale::En, Self::Cancelled) => "Cancelled",
            (Locale::En, Self::Expired) => "Expired",
        }
    }

    /// CSS class used by the booking list.
    #[must_use]
    pub const fn display_class(&self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Completed => "status-completed",
            Self::Inactive => "status-inactive",
            Self::Cancelled => "status-cancelled",
            Self::Expired => "status-expired",
        }
    }

    /// Returns true for the only status that can still be cancelled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which set of canonical values classification produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusScheme {
    /// Three values: active, completed, cancelled.
    #[default]
    Collapsed,
    /// Five values: active, completed, inactive, cancelled, expired.
    Extended,
}

impl StatusScheme {
    /// Classifies a raw status string.
    ///
    /// Matching ignores case and surrounding whitespace. Unrecognized input
    /// falls back to `Completed`; this is the documented default, not an error.
    #[must_use]
    pub fn classify(self, raw: &str) -> CanonicalStatus {
        recognize(raw).map_or(CanonicalStatus::Completed, |status| self.fold(status))
    }

    /// Maps a status onto the values this scheme can produce.
    #[must_use]
    pub const fn fold(self, status: CanonicalStatus) -> CanonicalStatus {
        match (self, status) {
            (Self::Collapsed, CanonicalStatus::Inactive | CanonicalStatus::Expired) => {
                CanonicalStatus::Completed
            }
            (_, other) => other,
        }
    }

    /// Display label for a raw status.
    #[must_use]
    pub fn display_text(self, raw: &str, locale: Locale) -> &'static str {
        self.classify(raw).display_text(locale)
    }

    /// Display class for a raw status.
    #[must_use]
    pub fn display_class(self, raw: &str) -> &'static str {
        self.classify(raw).display_class()
    }

    /// Returns the scheme's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Extended => "extended",
        }
    }
}

impl FromStr for StatusScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "collapsed" => Ok(Self::Collapsed),
            "extended" => Ok(Self::Extended),
            _ => Err(DomainError::InvalidStatusScheme(s.to_string())),
        }
    }
}

/// Returns true if the raw status appears in the token table.
#[must_use]
pub fn is_recognized(raw: &str) -> bool {
    recognize(raw).is_some()
}

/// Language for user-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            _ => Err(DomainError::InvalidLocale(s.to_string())),
        }
    }
}

/// Booking list filter selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Keep only bookings whose canonical status equals this one.
    Only(CanonicalStatus),
}

impl StatusFilter {
    /// Returns true if a booking with this canonical status passes the filter.
    #[must_use]
    pub fn matches(&self, status: CanonicalStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    /// Returns the filter's name as used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: String = s.trim().to_lowercase();
        if value == "all" {
            return Ok(Self::All);
        }
        CanonicalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .map(Self::Only)
            .ok_or_else(|| DomainError::InvalidStatusFilter(s.to_string()))
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
