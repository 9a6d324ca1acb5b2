// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use cinema_domain::{
    Booking, CreateDirectorRequest, Director, FixedClock, Film, FilmInfo, Hall, Session,
};
use tokio::sync::Notify;

use crate::{Gateway, GatewayError, Identity, Role};

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

pub fn create_test_admin() -> Identity {
    Identity::new(1, Role::Admin, Some(String::from("admin-token")))
}

pub fn create_test_user() -> Identity {
    Identity::new(7, Role::User, Some(String::from("user-token")))
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

pub fn create_test_session(
    session_id: i64,
    film_id: i64,
    hall_id: i64,
    start: Option<NaiveDateTime>,
) -> Session {
    Session {
        session_id,
        film_id,
        hall_id,
        date_time: start,
        status: String::from("Запланирован"),
    }
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

/// In-memory gateway with scripted failures.
///
/// Every call is appended to `calls` as `"<kind>:<id>"`.
#[derive(Default)]
pub struct FakeGateway {
    pub bookings: Mutex<Vec<Booking>>,
    pub sessions: Mutex<HashMap<i64, Session>>,
    pub films: Mutex<HashMap<i64, Film>>,
    pub halls: Mutex<HashMap<i64, Hall>>,
    /// Served by `film_info`; created directors are appended.
    pub directors: Mutex<Vec<Director>>,
    /// Lookups of these ids fail with a 500.
    pub failing_sessions: Mutex<HashSet<i64>>,
    pub failing_films: Mutex<HashSet<i64>>,
    pub failing_halls: Mutex<HashSet<i64>>,
    /// Lookups of these session ids fail with a 401.
    pub unauthorized_sessions: Mutex<HashSet<i64>>,
    /// Scripted cancel and delete outcomes; absent ids succeed.
    pub cancel_errors: Mutex<HashMap<i64, GatewayError>>,
    pub delete_errors: Mutex<HashMap<i64, GatewayError>>,
    pub calls: Mutex<Vec<String>>,
    /// When set, the first booking list request waits for `release`.
    pub hold_first_load: Option<Notify>,
    booking_list_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding_first_load() -> Self {
        Self {
            hold_first_load: Some(Notify::new()),
            ..Self::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.hold_first_load {
            gate.notify_one();
        }
    }

    pub fn with_bookings(self, bookings: Vec<Booking>) -> Self {
        *self.bookings.lock().unwrap() = bookings;
        self
    }

    pub fn with_sessions(self, sessions: Vec<Session>) -> Self {
        self.sessions
            .lock()
            .unwrap()
            .extend(sessions.into_iter().map(|s| (s.session_id, s)));
        self
    }

    pub fn with_films(self, films: Vec<Film>) -> Self {
        self.films
            .lock()
            .unwrap()
            .extend(films.into_iter().map(|f| (f.film_id, f)));
        self
    }

    pub fn with_halls(self, halls: Vec<Hall>) -> Self {
        self.halls
            .lock()
            .unwrap()
            .extend(halls.into_iter().map(|h| (h.hall_id, h)));
        self
    }

    pub fn with_directors(self, directors: Vec<Director>) -> Self {
        *self.directors.lock().unwrap() = directors;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: &str) -> usize {
        let prefix: String = format!("{kind}:");
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    fn record(&self, kind: &str, id: i64) {
        self.calls.lock().unwrap().push(format!("{kind}:{id}"));
    }
}

fn server_error(resource: &str) -> GatewayError {
    GatewayError::Status {
        status: 500,
        resource: resource.to_string(),
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn list_films(&self) -> Result<Vec<Film>, GatewayError> {
        Ok(self.films.lock().unwrap().values().cloned().collect())
    }

    async fn get_film(&self, film_id: i64) -> Result<Option<Film>, GatewayError> {
        self.record("film", film_id);
        if self.failing_films.lock().unwrap().contains(&film_id) {
            return Err(server_error("film"));
        }
        Ok(self.films.lock().unwrap().get(&film_id).cloned())
    }

    async fn list_active_films(&self) -> Result<Vec<Film>, GatewayError> {
        self.list_films().await
    }

    async fn film_info(&self) -> Result<FilmInfo, GatewayError> {
        Ok(FilmInfo {
            directors: self.directors.lock().unwrap().clone(),
            countries: Vec::new(),
        })
    }

    async fn create_director(
        &self,
        request: &CreateDirectorRequest,
    ) -> Result<Director, GatewayError> {
        self.record("create_director", request.country_id);
        let mut directors = self.directors.lock().unwrap();
        let director: Director = Director {
            director_id: 100 + i64::try_from(directors.len()).unwrap(),
            director_name_and_surname: request.director_name_and_surname.clone(),
            birth_date: request.birth_date,
            country_id: Some(request.country_id),
            film_list: Vec::new(),
        };
        directors.push(director.clone());
        Ok(director)
    }

    async fn list_sessions(&self, film_id: Option<i64>) -> Result<Vec<Session>, GatewayError> {
        self.record("sessions", film_id.unwrap_or_default());
        let mut sessions: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| film_id.is_none_or(|id| s.film_id == id))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.session_id);
        Ok(sessions)
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<Session>, GatewayError> {
        self.record("session", session_id);
        if self.unauthorized_sessions.lock().unwrap().contains(&session_id) {
            return Err(GatewayError::Unauthorized);
        }
        if self.failing_sessions.lock().unwrap().contains(&session_id) {
            return Err(server_error("session"));
        }
        Ok(self.sessions.lock().unwrap().get(&session_id).cloned())
    }

    async fn delete_session(&self, session_id: i64) -> Result<(), GatewayError> {
        self.record("delete_session", session_id);
        if let Some(err) = self.delete_errors.lock().unwrap().get(&session_id) {
            return Err(err.clone());
        }
        self.sessions.lock().unwrap().remove(&session_id);
        Ok(())
    }

    async fn list_user_bookings(&self, user_id: i64) -> Result<Vec<Booking>, GatewayError> {
        self.record("bookings", user_id);
        let call: usize = self.booking_list_calls.fetch_add(1, Ordering::SeqCst);
        if let (0, Some(gate)) = (call, &self.hold_first_load) {
            gate.notified().await;
        }
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn cancel_booking(&self, booking_id: i64) -> Result<(), GatewayError> {
        self.record("cancel", booking_id);
        match self.cancel_errors.lock().unwrap().get(&booking_id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn get_hall(&self, hall_id: i64) -> Result<Option<Hall>, GatewayError> {
        self.record("hall", hall_id);
        if self.failing_halls.lock().unwrap().contains(&hall_id) {
            return Err(server_error("hall"));
        }
        Ok(self.halls.lock().unwrap().get(&hall_id).cloned())
    }
}
