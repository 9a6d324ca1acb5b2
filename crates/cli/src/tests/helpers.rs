// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use cinema_api::{Gateway, GatewayError, Identity, Role};
use cinema_domain::{
    Booking, Country, CreateDirectorRequest, Director, FilmInfo, FixedClock, Film, Hall, Session,
};

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Frozen at 2024-06-01 10:00.
pub fn test_clock() -> FixedClock {
    FixedClock(at(2024, 6, 1, 10, 0))
}

pub fn create_test_user() -> Identity {
    Identity::new(7, Role::User, Some(String::from("token")))
}

pub fn create_test_admin() -> Identity {
    Identity::new(1, Role::Admin, Some(String::from("token")))
}

pub fn create_test_session(session_id: i64, hall_id: i64, start: NaiveDateTime) -> Session {
    Session {
        session_id,
        film_id: 100,
        hall_id,
        date_time: Some(start),
        status: String::from("Запланирован"),
    }
}

/// Canned responses for a single film, two sessions and one booking.
pub struct StubGateway {
    pub unauthorized: bool,
    pub cancelled: Mutex<Vec<i64>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            unauthorized: false,
            cancelled: Mutex::new(Vec::new()),
        }
    }

    pub fn expired() -> Self {
        Self {
            unauthorized: true,
            ..Self::new()
        }
    }

    fn sessions() -> Vec<Session> {
        vec![
            create_test_session(10, 1, at(2024, 6, 1, 10, 30)),
            create_test_session(11, 2, at(2024, 6, 2, 18, 0)),
        ]
    }

    fn film() -> Film {
        Film::new(100, "Солярис", Self::sessions())
    }
}

#[async_trait]
impl Gateway for StubGateway {
    async fn list_films(&self) -> Result<Vec<Film>, GatewayError> {
        Ok(vec![Self::film(), Film::new(200, "Сталкер", Vec::new())])
    }

    async fn get_film(&self, film_id: i64) -> Result<Option<Film>, GatewayError> {
        Ok((film_id == 100).then(|| Film {
            director_id: Some(3),
            country_id: Some(1),
            ..Film::new(100, "Солярис", Vec::new())
        }))
    }

    async fn list_active_films(&self) -> Result<Vec<Film>, GatewayError> {
        Ok(vec![Self::film()])
    }

    async fn film_info(&self) -> Result<FilmInfo, GatewayError> {
        Ok(FilmInfo {
            directors: vec![Director {
                director_id: 3,
                director_name_and_surname: String::from("Андрей Тарковский"),
                birth_date: NaiveDate::from_ymd_opt(1932, 4, 4),
                country_id: Some(1),
                film_list: Vec::new(),
            }],
            countries: vec![Country {
                country_id: 1,
                country_name: String::from("СССР"),
            }],
        })
    }

    async fn create_director(
        &self,
        request: &CreateDirectorRequest,
    ) -> Result<Director, GatewayError> {
        Ok(Director {
            director_id: 4,
            director_name_and_surname: request.director_name_and_surname.clone(),
            birth_date: request.birth_date,
            country_id: Some(request.country_id),
            film_list: Vec::new(),
        })
    }

    async fn list_sessions(&self, _film_id: Option<i64>) -> Result<Vec<Session>, GatewayError> {
        Ok(Self::sessions())
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<Session>, GatewayError> {
        if self.unauthorized {
            return Err(GatewayError::Unauthorized);
        }
        Ok(Self::sessions()
            .into_iter()
            .find(|s| s.session_id == session_id))
    }

    async fn delete_session(&self, _session_id: i64) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_user_bookings(&self, user_id: i64) -> Result<Vec<Booking>, GatewayError> {
        Ok(vec![Booking {
            booking_id: 2,
            user_id,
            session_id: 11,
            status: String::from("АКТИВНО"),
            booking_time: at(2024, 5, 20, 12, 0),
            total_cost: Some(800.0),
            ticket_list: Vec::new(),
        }])
    }

    async fn cancel_booking(&self, booking_id: i64) -> Result<(), GatewayError> {
        self.cancelled.lock().unwrap().push(booking_id);
        Ok(())
    }

    async fn get_hall(&self, hall_id: i64) -> Result<Option<Hall>, GatewayError> {
        Ok((hall_id == 1).then(|| Hall {
            hall_id: 1,
            hall_name: String::from("Большой зал"),
            hall_type: String::from("IMAX"),
            base_price: 550.0,
            status: None,
        }))
    }
}
