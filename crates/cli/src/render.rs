// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of engine output.

use chrono::NaiveDateTime;
use cinema_domain::{
    AdminSessionRow, BatchLookup, Country, DateBucket, DateGroup, Director, EnrichedBooking,
    EnrichmentLevel, Film, FilmInfo, Hall, Locale, Session, country_name, day_label,
    director_name, hall_placeholder_name, is_session_soon,
};

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Shown for halls that have no type, or that could not be loaded.
const DEFAULT_HALL_TYPE: &str = "2D";
/// Ticket price shown when a hall has no base price, or could not be loaded.
const DEFAULT_TICKET_PRICE: f64 = 400.0;

fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| String::from("--"), |t| t.format(TIME_FORMAT).to_string())
}

fn finish(lines: Vec<String>) -> String {
    let mut out: String = lines.join("\n");
    out.push('\n');
    out
}

/// One line per booking, preceded by a notice when details are degraded.
pub fn render_bookings(
    bookings: &[EnrichedBooking],
    level: Option<EnrichmentLevel>,
    locale: Locale,
) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(bookings.len() + 1);
    match level {
        Some(EnrichmentLevel::WithoutFilms) => {
            lines.push(String::from("! film titles are unavailable"));
        }
        Some(EnrichmentLevel::Bare) => {
            lines.push(String::from("! session details are unavailable"));
        }
        Some(EnrichmentLevel::Full) | None => {}
    }
    if bookings.is_empty() {
        lines.push(String::from("No bookings"));
        return finish(lines);
    }

    for booking in bookings {
        let mut line: String = format!(
            "#{:<6} {:<10} {:<24} {}",
            booking.booking_id(),
            booking.status_text(locale),
            booking.film_title,
            format_time(booking.session_time),
        );
        let seats: String = booking.seat_label();
        if !seats.is_empty() {
            line.push_str(&format!("  {seats}"));
        }
        if let Some(cost) = booking.booking.total_cost {
            line.push_str(&format!("  {cost:.2}"));
        }
        if booking.can_cancel {
            line.push_str("  [cancellable]");
        }
        lines.push(line);
    }
    finish(lines)
}

/// Bucket tabs with their counts, then each film with its matching sessions.
pub fn render_home(
    films: &[(&Film, Vec<&Session>)],
    bucket: DateBucket,
    counts: &[(DateBucket, usize)],
    now: NaiveDateTime,
) -> String {
    let tabs: Vec<String> = counts
        .iter()
        .map(|(tab, count)| {
            if *tab == bucket {
                format!("[{tab} {count}]")
            } else {
                format!("{tab} {count}")
            }
        })
        .collect();
    let mut lines: Vec<String> = vec![tabs.join("  ")];

    if films.is_empty() {
        lines.push(String::from("No sessions"));
        return finish(lines);
    }
    for (film, sessions) in films {
        lines.push(format!("{} (#{})", film.title, film.film_id));
        for session in sessions {
            let soon: &str = if is_session_soon(session, now) {
                "  soon"
            } else {
                ""
            };
            lines.push(format!(
                "  {}  hall {}{soon}",
                format_time(session.date_time),
                session.hall_id
            ));
        }
    }
    finish(lines)
}

/// Name, type and ticket price of a session's hall, with defaults for halls
/// that are missing or only partly filled in.
fn hall_summary(halls: &BatchLookup<Hall>, hall_id: i64) -> String {
    let Some(hall) = halls.get(hall_id) else {
        return format!(
            "{}  {DEFAULT_HALL_TYPE}  {DEFAULT_TICKET_PRICE:.0} ₽",
            hall_placeholder_name(hall_id)
        );
    };
    let hall_type: &str = if hall.hall_type.trim().is_empty() {
        DEFAULT_HALL_TYPE
    } else {
        hall.hall_type.as_str()
    };
    let price: f64 = if hall.base_price > 0.0 {
        hall.base_price
    } else {
        DEFAULT_TICKET_PRICE
    };
    format!("{}  {hall_type}  {price:.0} ₽", hall.hall_name)
}

/// A film's credits and its sessions grouped under relative day labels.
pub fn render_film(
    film: &Film,
    info: &FilmInfo,
    groups: &[DateGroup<'_>],
    nearest: Option<&Session>,
    halls: &BatchLookup<Hall>,
    now: NaiveDateTime,
    locale: Locale,
) -> String {
    let mut lines: Vec<String> = vec![film.title.clone()];
    if let Some(director_id) = film.director_id {
        lines.push(format!("Director: {}", director_name(&info.directors, director_id)));
    }
    if let Some(country_id) = film.country_id {
        lines.push(format!("Country: {}", country_name(&info.countries, country_id)));
    }
    if let Some(description) = film.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(description.to_string());
    }
    if let Some(session) = nearest {
        lines.push(format!("Next: {}", format_time(session.date_time)));
    }
    if groups.is_empty() {
        lines.push(String::from("No sessions"));
    }
    for group in groups {
        lines.push(format!("{}:", day_label(group.date, now, locale)));
        for session in &group.sessions {
            let time: String = session
                .date_time
                .map_or_else(String::new, |t| t.format("%H:%M").to_string());
            lines.push(format!("  {time}  {}", hall_summary(halls, session.hall_id)));
        }
    }
    finish(lines)
}

/// The admin session table.
pub fn render_admin_sessions(rows: &[AdminSessionRow]) -> String {
    if rows.is_empty() {
        return finish(vec![String::from("No sessions")]);
    }
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let mut flags: Vec<&str> = Vec::new();
            if row.can_edit {
                flags.push("edit");
            }
            if row.can_delete {
                flags.push("delete");
            }
            format!(
                "#{:<6} {}  {:<24} {:<16} {:<14} {}",
                row.session.session_id,
                format_time(row.session.date_time),
                row.film_title,
                row.hall_name,
                row.status.display_text(),
                flags.join(",")
            )
        })
        .collect();
    finish(lines)
}

/// Directors with their country names.
pub fn render_directors(directors: &[&Director], countries: &[Country]) -> String {
    if directors.is_empty() {
        return finish(vec![String::from("No directors")]);
    }
    let lines: Vec<String> = directors
        .iter()
        .map(|director| {
            let country: &str = director
                .country_id
                .map_or("-", |id| country_name(countries, id));
            let born: String = director
                .birth_date
                .map_or_else(|| String::from("-"), |d| d.format("%d.%m.%Y").to_string());
            let films: &str = if director.has_films() { "" } else { "  (no films)" };
            format!(
                "#{:<4} {:<28} {born:<10}  {country}{films}",
                director.director_id, director.director_name_and_surname
            )
        })
        .collect();
    finish(lines)
}
