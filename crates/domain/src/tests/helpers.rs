// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Booking, Film, Hall, Session};

/// Builds a local date-time from its parts.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// 2024-06-01 10:00, the reference "now" used across tests.
pub fn reference_now() -> NaiveDateTime {
    at(2024, 6, 1, 10, 0)
}

pub fn create_test_booking(booking_id: i64, session_id: i64, status: &str) -> Booking {
    Booking {
        booking_id,
        user_id: 7,
        session_id,
        status: status.to_string(),
        booking_time: at(2024, 5, 20, 12, 0),
        total_cost: Some(800.0),
        ticket_list: Vec::new(),
    }
}

pub fn create_test_session(session_id: i64, film_id: i64, start: Option<NaiveDateTime>) -> Session {
    Session {
        session_id,
        film_id,
        hall_id: 1,
        date_time: start,
        status: String::from("Запланирован"),
    }
}

pub fn create_test_film(film_id: i64, title: &str, sessions: Vec<Session>) -> Film {
    Film::new(film_id, title, sessions)
}

pub fn create_test_hall(hall_id: i64, name: &str) -> Hall {
    Hall {
        hall_id,
        hall_name: name.to_string(),
        hall_type: String::from("2D"),
        base_price: 400.0,
        status: None,
    }
}
