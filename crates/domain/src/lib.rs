// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod admin_sessions;
mod booking_status;
mod cancellation;
mod clock;
mod date_bucket;
mod directors;
mod enrichment;
mod error;
mod session_status;
mod types;

#[cfg(test)]
mod tests;

pub use admin_sessions::{
    AdminDateMode, AdminSessionQuery, AdminSessionRow, build_rows, filter_rows,
    hall_placeholder_name,
};
pub use booking_status::{CanonicalStatus, Locale, StatusFilter, StatusScheme, is_recognized};
pub use cancellation::{CANCELLATION_LEAD_TIME, is_cancellable, is_cancellable_at};
pub use clock::{Clock, DEFAULT_TIMEZONE, FixedClock, SystemClock};
pub use date_bucket::{
    BucketWindow, DateBucket, DateGroup, SOON_THRESHOLD, WEEK_WINDOW, calendar_key,
    count_sessions, day_label, film_in_bucket, films_in_bucket, films_with_future_sessions,
    group_by_date, is_session_soon, nearest_session, session_dates, sessions_in_bucket,
    sessions_matching, sessions_on_date,
};
pub use directors::{
    CreateDirectorRequest, NewDirector, country_name, director_name, search_countries,
    search_directors,
};
pub use enrichment::{
    BatchLookup, EnrichedBooking, EnrichmentLevel, UNKNOWN_FILM_TITLE, distinct_film_ids,
    distinct_session_ids, enrich, film_placeholder_title, filter_by_status, sort_for_display,
    visible_bookings, with_status,
};
pub use error::DomainError;
pub use session_status::SessionStatus;
pub use types::{Booking, Country, Director, Film, FilmInfo, Hall, Session, Ticket};
