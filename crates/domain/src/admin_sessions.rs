// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin session list: join, filters and ordering.
//!
//! Rows are joined against the film and hall maps of the current load. The
//! quick date filters reuse the shared [`DateBucket`] predicates; a manually
//! entered calendar date overrides them.

use crate::date_bucket::{BucketWindow, DateBucket};
use crate::enrichment::{BatchLookup, film_placeholder_title};
use crate::error::DomainError;
use crate::session_status::SessionStatus;
use crate::types::{Film, Hall, Session};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::str::FromStr;

/// Hall name used when the hall could not be loaded.
#[must_use]
pub fn hall_placeholder_name(hall_id: i64) -> String {
    format!("Зал #{hall_id}")
}

/// Quick date filter on the admin session list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminDateMode {
    #[default]
    All,
    Today,
    Week,
}

impl AdminDateMode {
    /// The shared bucket behind this mode, or `None` for no date filtering.
    #[must_use]
    pub const fn bucket(self) -> Option<DateBucket> {
        match self {
            Self::All => None,
            Self::Today => Some(DateBucket::Today),
            Self::Week => Some(DateBucket::Week),
        }
    }
}

impl FromStr for AdminDateMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            _ => Err(DomainError::InvalidAdminDateMode(s.to_string())),
        }
    }
}

/// Filters applied to the admin session list. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSessionQuery {
    /// Quick date filter. Ignored while `date` is set.
    pub mode: AdminDateMode,
    /// Exact local calendar date.
    pub date: Option<NaiveDate>,
    /// Exact session status string.
    pub status: Option<String>,
    /// Case-insensitive substring of the film title.
    pub film_name: Option<String>,
    /// Case-insensitive substring of the hall name.
    pub hall_name: Option<String>,
}

/// One session joined with its film and hall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSessionRow {
    pub session: Session,
    pub status: SessionStatus,
    pub film_title: String,
    pub hall_name: String,
    pub film: Option<Film>,
    pub hall: Option<Hall>,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl AdminSessionRow {
    /// Joins one session with the loaded film and hall maps.
    #[must_use]
    pub fn build(session: &Session, films: &BatchLookup<Film>, halls: &BatchLookup<Hall>) -> Self {
        let film: Option<Film> = films.get(session.film_id).cloned();
        let hall: Option<Hall> = halls.get(session.hall_id).cloned();
        let status: SessionStatus = SessionStatus::parse(&session.status);

        let film_title: String = film
            .as_ref()
            .map(|f| f.title.trim())
            .filter(|t| !t.is_empty())
            .map_or_else(|| film_placeholder_title(session.film_id), String::from);
        let hall_name: String = hall
            .as_ref()
            .map(|h| h.hall_name.trim())
            .filter(|n| !n.is_empty())
            .map_or_else(|| hall_placeholder_name(session.hall_id), String::from);

        Self {
            session: session.clone(),
            can_edit: status.can_edit(),
            can_delete: status.can_delete(),
            status,
            film_title,
            hall_name,
            film,
            hall,
        }
    }
}

/// Joins every session with the loaded film and hall maps, in input order.
#[must_use]
pub fn build_rows(
    sessions: &[Session],
    films: &BatchLookup<Film>,
    halls: &BatchLookup<Hall>,
) -> Vec<AdminSessionRow> {
    sessions
        .iter()
        .map(|s| AdminSessionRow::build(s, films, halls))
        .collect()
}

fn contains_ignoring_case(haystack: &str, needle: Option<&str>) -> bool {
    needle
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

/// Applies the query and orders the result by start time.
///
/// Sessions without a start time sort last and never match a date filter.
#[must_use]
pub fn filter_rows(
    rows: &[AdminSessionRow],
    query: &AdminSessionQuery,
    now: NaiveDateTime,
) -> Vec<AdminSessionRow> {
    let window: BucketWindow = BucketWindow::at(now);

    let mut result: Vec<AdminSessionRow> = rows
        .iter()
        .filter(|row| match (query.date, query.mode.bucket()) {
            (Some(date), _) => row
                .session
                .date_time
                .is_some_and(|start| start.date() == date),
            (None, Some(bucket)) => window.contains_session(bucket, &row.session),
            (None, None) => true,
        })
        .filter(|row| {
            query
                .status
                .as_deref()
                .filter(|s| !s.is_empty())
                .is_none_or(|s| row.session.status == s)
        })
        .filter(|row| contains_ignoring_case(&row.film_title, query.film_name.as_deref()))
        .filter(|row| contains_ignoring_case(&row.hall_name, query.hall_name.as_deref()))
        .cloned()
        .collect();

    result.sort_by_key(|row| (row.session.date_time.is_none(), row.session.date_time));
    result
}
