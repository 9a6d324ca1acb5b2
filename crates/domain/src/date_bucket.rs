// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Temporal buckets for session listings.
//!
//! The home page, the film page and the admin session list all ask the same
//! question: "does this session fall into the selected period?". They all
//! answer it through [`BucketWindow`], built once per operation from a single
//! `now`.
//!
//! ## Bucket semantics
//!
//! | Bucket | Predicate |
//! |---|---|
//! | `today` | local calendar date is today, and start is strictly after `now` |
//! | `tomorrow` | local calendar date is today + 1, any time of day |
//! | `week` | start strictly after `now` and no later than `now + 7 days` |
//! | `upcoming` | local calendar date is today + 2 or later |
//! | `all` | start strictly after `now` |
//!
//! `week` is a rolling duration window, not a calendar window. Sessions
//! without a start time never match any bucket.

use crate::booking_status::Locale;
use crate::error::DomainError;
use crate::types::{Film, Session};
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Length of the rolling `week` window.
pub const WEEK_WINDOW: Duration = Duration::days(7);

/// Sessions starting sooner than this are flagged as soon.
pub const SOON_THRESHOLD: Duration = Duration::hours(1);

/// A named period of sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    #[default]
    Today,
    Tomorrow,
    Week,
    Upcoming,
    All,
}

impl DateBucket {
    /// Every bucket, in tab order.
    pub const ALL: [Self; 5] = [
        Self::Today,
        Self::Tomorrow,
        Self::Week,
        Self::Upcoming,
        Self::All,
    ];

    /// Returns the bucket's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Week => "week",
            Self::Upcoming => "upcoming",
            Self::All => "all",
        }
    }
}

impl FromStr for DateBucket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: String = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == value)
            .ok_or_else(|| DomainError::InvalidDateBucket(s.to_string()))
    }
}

impl std::fmt::Display for DateBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calendar boundaries derived from one captured `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketWindow {
    now: NaiveDateTime,
    today: NaiveDate,
    tomorrow: NaiveDate,
    day_after_tomorrow: NaiveDate,
    week_end: NaiveDateTime,
}

impl BucketWindow {
    /// Captures the boundaries for `now`.
    #[must_use]
    pub fn at(now: NaiveDateTime) -> Self {
        let today: NaiveDate = now.date();
        Self {
            now,
            today,
            tomorrow: today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX),
            day_after_tomorrow: today.checked_add_days(Days::new(2)).unwrap_or(NaiveDate::MAX),
            week_end: now
                .checked_add_signed(WEEK_WINDOW)
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    /// The instant the window was captured at.
    #[must_use]
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Today's local calendar date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Tomorrow's local calendar date.
    #[must_use]
    pub const fn tomorrow(&self) -> NaiveDate {
        self.tomorrow
    }

    /// Returns true if a session starting at `start` belongs to `bucket`.
    #[must_use]
    pub fn contains(&self, bucket: DateBucket, start: NaiveDateTime) -> bool {
        match bucket {
            DateBucket::Today => start.date() == self.today && start > self.now,
            DateBucket::Tomorrow => start.date() == self.tomorrow,
            DateBucket::Week => start > self.now && start <= self.week_end,
            DateBucket::Upcoming => start.date() >= self.day_after_tomorrow,
            DateBucket::All => start > self.now,
        }
    }

    /// Like [`Self::contains`], for a session whose start may be absent.
    #[must_use]
    pub fn contains_session(&self, bucket: DateBucket, session: &Session) -> bool {
        session
            .date_time
            .is_some_and(|start| self.contains(bucket, start))
    }
}

/// Sessions on one calendar date, ascending by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub sessions: Vec<&'a Session>,
}

impl DateGroup<'_> {
    /// The date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_key(&self) -> String {
        calendar_key(self.date)
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn calendar_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sessions from a list that fall into `bucket`, ascending by start time.
#[must_use]
pub fn sessions_matching(
    sessions: &[Session],
    bucket: DateBucket,
    now: NaiveDateTime,
) -> Vec<&Session> {
    let window: BucketWindow = BucketWindow::at(now);
    let mut matching: Vec<&Session> = sessions
        .iter()
        .filter(|s| window.contains_session(bucket, s))
        .collect();
    matching.sort_by_key(|s| s.date_time);
    matching
}

/// A film's sessions that fall into `bucket`, ascending by start time.
#[must_use]
pub fn sessions_in_bucket(film: &Film, bucket: DateBucket, now: NaiveDateTime) -> Vec<&Session> {
    sessions_matching(&film.session_list, bucket, now)
}

/// Returns true if the film has at least one session in `bucket`.
#[must_use]
pub fn film_in_bucket(film: &Film, bucket: DateBucket, window: &BucketWindow) -> bool {
    film.session_list
        .iter()
        .any(|s| window.contains_session(bucket, s))
}

/// Films with at least one session in `bucket`, in catalog order.
#[must_use]
pub fn films_in_bucket(films: &[Film], bucket: DateBucket, now: NaiveDateTime) -> Vec<&Film> {
    let window: BucketWindow = BucketWindow::at(now);
    films
        .iter()
        .filter(|film| film_in_bucket(film, bucket, &window))
        .collect()
}

/// Films with any session strictly in the future.
#[must_use]
pub fn films_with_future_sessions(films: &[Film], now: NaiveDateTime) -> Vec<&Film> {
    films_in_bucket(films, DateBucket::All, now)
}

/// Total sessions across the catalog that fall into `bucket`.
#[must_use]
pub fn count_sessions(films: &[Film], bucket: DateBucket, now: NaiveDateTime) -> usize {
    let window: BucketWindow = BucketWindow::at(now);
    films
        .iter()
        .flat_map(|film| film.session_list.iter())
        .filter(|s| window.contains_session(bucket, s))
        .count()
}

/// Groups a film's sessions in `bucket` by local calendar date.
///
/// Groups are ascending by date; sessions inside a group are ascending by
/// start time.
#[must_use]
pub fn group_by_date(film: &Film, bucket: DateBucket, now: NaiveDateTime) -> Vec<DateGroup<'_>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Session>> = BTreeMap::new();
    for session in sessions_in_bucket(film, bucket, now) {
        if let Some(start) = session.date_time {
            groups.entry(start.date()).or_default().push(session);
        }
    }

    groups
        .into_iter()
        .map(|(date, sessions)| DateGroup { date, sessions })
        .collect()
}

/// Distinct calendar dates of a film's sessions in `bucket`, ascending.
#[must_use]
pub fn session_dates(film: &Film, bucket: DateBucket, now: NaiveDateTime) -> Vec<NaiveDate> {
    sessions_in_bucket(film, bucket, now)
        .into_iter()
        .filter_map(|s| s.date_time.map(|start| start.date()))
        .collect::<BTreeSet<NaiveDate>>()
        .into_iter()
        .collect()
}

/// A film's future sessions on one calendar date, ascending by start time.
#[must_use]
pub fn sessions_on_date(film: &Film, date: NaiveDate, now: NaiveDateTime) -> Vec<&Session> {
    sessions_in_bucket(film, DateBucket::All, now)
        .into_iter()
        .filter(|s| s.date_time.is_some_and(|start| start.date() == date))
        .collect()
}

/// The earliest session starting strictly after `now`.
#[must_use]
pub fn nearest_session(sessions: &[Session], now: NaiveDateTime) -> Option<&Session> {
    sessions_matching(sessions, DateBucket::All, now)
        .into_iter()
        .next()
}

/// Returns true if the session starts in less than an hour.
///
/// Sessions that already started also count as soon; sessions without a
/// start time never do.
#[must_use]
pub fn is_session_soon(session: &Session, now: NaiveDateTime) -> bool {
    session
        .date_time
        .is_some_and(|start| start - now < SOON_THRESHOLD)
}

/// Relative label for a session date: "today", "tomorrow" or the date itself.
#[must_use]
pub fn day_label(date: NaiveDate, now: NaiveDateTime, locale: Locale) -> String {
    let window: BucketWindow = BucketWindow::at(now);
    match locale {
        Locale::Ru if date == window.today() => String::from("Сегодня"),
        Locale::Ru if date == window.tomorrow() => String::from("Завтра"),
        Locale::En if date == window.today() => String::from("Today"),
        Locale::En if date == window.tomorrow() => String::from("Tomorrow"),
        Locale::Ru => date.format("%d.%m.%Y").to_string(),
        Locale::En => calendar_key(date),
    }
}
