// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session status as used by the admin session list.
//!
//! This taxonomy is separate from booking status. It only decides whether
//! an administrator may edit or delete a session:
//!
//! | Status | Edit | Delete |
//! |---|---|---|
//! | Запланирован (scheduled) | yes | yes |
//! | Активен (running) | no | no |
//! | Завершен (finished) | no | yes |
//! | Отменен (cancelled) | yes | yes |

use serde::Serialize;

/// Admin-facing session status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
    /// Any value outside the known set, kept verbatim.
    Other(String),
}

impl SessionStatus {
    /// Parses the API's status string. Matching is exact, as the API emits
    /// these values from a fixed reference table.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Запланирован" => Self::Scheduled,
            "Активен" => Self::Active,
            "Завершен" => Self::Completed,
            "Отменен" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    /// The API's string for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "Запланирован",
            Self::Active => "Активен",
            Self::Completed => "Завершен",
            Self::Cancelled => "Отменен",
            Self::Other(raw) => raw,
        }
    }

    /// Display label; unknown or empty values read "Неизвестно".
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Other(raw) if raw.trim().is_empty() => "Неизвестно",
            other => other.as_str(),
        }
    }

    /// CSS class used by the admin session list.
    #[must_use]
    pub const fn display_class(&self) -> &'static str {
        match self {
            Self::Scheduled => "status-scheduled",
            Self::Active => "status-active",
            Self::Completed => "status-completed",
            Self::Cancelled => "status-cancelled",
            Self::Other(_) => "status-unknown",
        }
    }

    /// Returns true if an administrator may edit the session.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        !matches!(self, Self::Active | Self::Completed)
    }

    /// Returns true if an administrator may delete the session.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        !matches!(self, Self::Active)
    }

    /// Why editing is refused, or `None` if it is allowed.
    #[must_use]
    pub const fn edit_refusal(&self) -> Option<&'static str> {
        match self {
            Self::Active => Some("Активный сеанс нельзя редактировать"),
            Self::Completed => Some("Завершенный сеанс нельзя редактировать"),
            _ => None,
        }
    }

    /// Why deletion is refused, or `None` if it is allowed.
    #[must_use]
    pub const fn delete_refusal(&self) -> Option<&'static str> {
        match self {
            Self::Active => Some("Активный сеанс нельзя удалять"),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}
