// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking list enrichment, filtering and ordering.
//!
//! Enrichment joins a user's bookings with the sessions and films fetched for
//! that load. The joins read per-load maps built by the caller after its
//! lookups have all settled; nothing here performs I/O.
//!
//! ## Degradation
//!
//! Missing data never aborts the join:
//!
//! - a session that could not be resolved leaves `session` and
//!   `session_time` empty and titles the booking `"Фильм"`
//! - a film that could not be resolved titles the booking `"Фильм #<id>"`
//! - a whole batch that failed is passed as [`BatchLookup::Unavailable`]
//!   and every booking degrades the same way

use crate::booking_status::{CanonicalStatus, Locale, StatusFilter, StatusScheme};
use crate::cancellation::is_cancellable_at;
use crate::types::{Booking, Film, Session};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

/// Title used when not even the film id is known.
pub const UNKNOWN_FILM_TITLE: &str = "Фильм";

/// Title used when the film id is known but the film could not be loaded.
#[must_use]
pub fn film_placeholder_title(film_id: i64) -> String {
    format!("{UNKNOWN_FILM_TITLE} #{film_id}")
}

/// Result of one bulk lookup batch, keyed by entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchLookup<T> {
    /// The batch settled. Ids that failed or were not found are absent.
    Resolved(HashMap<i64, T>),
    /// The batch as a whole failed.
    Unavailable,
}

impl<T> BatchLookup<T> {
    /// Returns the entity for an id, if the batch resolved it.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&T> {
        match self {
            Self::Resolved(map) => map.get(&id),
            Self::Unavailable => None,
        }
    }

    /// Returns true if the batch as a whole failed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Returns true if the batch resolved no entity at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Resolved(map) => map.is_empty(),
            Self::Unavailable => true,
        }
    }
}

impl<T> Default for BatchLookup<T> {
    fn default() -> Self {
        Self::Resolved(HashMap::new())
    }
}

impl<T> FromIterator<(i64, T)> for BatchLookup<T> {
    fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
        Self::Resolved(iter.into_iter().collect())
    }
}

/// How much derived data an enrichment pass could attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentLevel {
    /// Sessions and films were both available.
    Full,
    /// Sessions were available; film titles are placeholders.
    WithoutFilms,
    /// Sessions were unavailable; only booking fields are present.
    Bare,
}

/// A booking joined with its session and film for display.
///
/// Built fresh on every load and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedBooking {
    /// The booking as received, including its raw status.
    pub booking: Booking,
    /// Normalized status.
    pub status: CanonicalStatus,
    /// The booking's session, if it could be resolved.
    pub session: Option<Session>,
    /// The session's start time, if the session resolved and carries one.
    pub session_time: Option<NaiveDateTime>,
    /// Film title, or a placeholder.
    pub film_title: String,
    /// Whether the booking can still be cancelled.
    pub can_cancel: bool,
}

impl EnrichedBooking {
    /// The booking id.
    #[must_use]
    pub const fn booking_id(&self) -> i64 {
        self.booking.booking_id
    }

    /// The time used for ordering: session start if known, else booking time.
    #[must_use]
    pub fn effective_time(&self) -> NaiveDateTime {
        self.session_time.unwrap_or(self.booking.booking_time)
    }

    /// Display label for the status.
    #[must_use]
    pub const fn status_text(&self, locale: Locale) -> &'static str {
        self.status.display_text(locale)
    }

    /// Seat count label, e.g. "1 место" or "3 места". Empty without tickets.
    #[must_use]
    pub fn seat_label(&self) -> String {
        match self.booking.ticket_list.len() {
            0 => String::new(),
            1 => String::from("1 место"),
            count => format!("{count} места"),
        }
    }

    /// Marks the booking as cancelled after the API confirmed it.
    pub const fn mark_cancelled(&mut self) {
        self.status = CanonicalStatus::Cancelled;
        self.can_cancel = false;
    }
}

/// Joins bookings with the sessions and films of one load.
///
/// Returns one enriched booking per input booking, in input order, together
/// with the level of data that was available. Bookings whose sessions all
/// went missing count as `Bare`, the same as a failed session batch.
#[must_use]
pub fn enrich(
    bookings: &[Booking],
    sessions: &BatchLookup<Session>,
    films: &BatchLookup<Film>,
    scheme: StatusScheme,
    now: NaiveDateTime,
) -> (Vec<EnrichedBooking>, EnrichmentLevel) {
    let level: EnrichmentLevel = if sessions.is_empty() && !bookings.is_empty() {
        EnrichmentLevel::Bare
    } else if films.is_unavailable() {
        EnrichmentLevel::WithoutFilms
    } else {
        EnrichmentLevel::Full
    };

    let enriched: Vec<EnrichedBooking> = bookings
        .iter()
        .map(|booking| enrich_one(booking, sessions, films, scheme, now))
        .collect();

    (enriched, level)
}

fn enrich_one(
    booking: &Booking,
    sessions: &BatchLookup<Session>,
    films: &BatchLookup<Film>,
    scheme: StatusScheme,
    now: NaiveDateTime,
) -> EnrichedBooking {
    let session: Option<Session> = sessions.get(booking.session_id).cloned();
    let session_time: Option<NaiveDateTime> = session.as_ref().and_then(|s| s.date_time);

    let film_title: String = session.as_ref().map_or_else(
        || String::from(UNKNOWN_FILM_TITLE),
        |s| {
            films
                .get(s.film_id)
                .map(|film| film.title.trim())
                .filter(|title| !title.is_empty())
                .map_or_else(|| film_placeholder_title(s.film_id), String::from)
        },
    );

    let status: CanonicalStatus = scheme.classify(&booking.status);
    let can_cancel: bool =
        is_cancellable_at(status, session_time.unwrap_or(booking.booking_time), now);

    EnrichedBooking {
        booking: booking.clone(),
        status,
        session,
        session_time,
        film_title,
        can_cancel,
    }
}

/// Distinct session ids referenced by a booking batch, ascending.
#[must_use]
pub fn distinct_session_ids(bookings: &[Booking]) -> Vec<i64> {
    bookings
        .iter()
        .map(|b| b.session_id)
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .collect()
}

/// Distinct film ids referenced by resolved sessions, ascending.
#[must_use]
pub fn distinct_film_ids<'a>(sessions: impl IntoIterator<Item = &'a Session>) -> Vec<i64> {
    sessions
        .into_iter()
        .map(|s| s.film_id)
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .collect()
}

/// Keeps bookings that pass the filter. `All` keeps everything.
#[must_use]
pub fn filter_by_status(list: &[EnrichedBooking], filter: StatusFilter) -> Vec<EnrichedBooking> {
    list.iter()
        .filter(|b| filter.matches(b.status))
        .cloned()
        .collect()
}

/// Orders bookings for display.
///
/// Descending status priority first, then ascending effective time. The sort
/// is stable, so bookings with equal keys keep their input order.
#[must_use]
pub fn sort_for_display(mut list: Vec<EnrichedBooking>) -> Vec<EnrichedBooking> {
    list.sort_by_key(|b| (Reverse(b.status.priority()), b.effective_time()));
    list
}

/// Filters then orders, producing the list a view shows.
#[must_use]
pub fn visible_bookings(list: &[EnrichedBooking], filter: StatusFilter) -> Vec<EnrichedBooking> {
    sort_for_display(filter_by_status(list, filter))
}

/// Bookings with exactly this status, preserving order.
#[must_use]
pub fn with_status(list: &[EnrichedBooking], status: CanonicalStatus) -> Vec<&EnrichedBooking> {
    list.iter().filter(|b| b.status == status).collect()
}
