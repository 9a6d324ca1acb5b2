// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The cinema API as seen by the client.

use async_trait::async_trait;
use cinema_domain::{Booking, CreateDirectorRequest, Director, Film, FilmInfo, Hall, Session};

use crate::error::GatewayError;

/// Read and write endpoints of the cinema API.
///
/// Single-entity lookups return `Ok(None)` on 404 so that batch callers can
/// tell a missing entity apart from a failed request.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET films`
    async fn list_films(&self) -> Result<Vec<Film>, GatewayError>;

    /// `GET films/{id}`
    async fn get_film(&self, film_id: i64) -> Result<Option<Film>, GatewayError>;

    /// `GET films/active`: films that still have sessions scheduled.
    async fn list_active_films(&self) -> Result<Vec<Film>, GatewayError>;

    /// `GET films/info`: every director and country.
    async fn film_info(&self) -> Result<FilmInfo, GatewayError>;

    /// `POST films/director`
    async fn create_director(
        &self,
        request: &CreateDirectorRequest,
    ) -> Result<Director, GatewayError>;

    /// `GET sessions`, or `GET sessions?filmId=` when a film is given.
    async fn list_sessions(&self, film_id: Option<i64>) -> Result<Vec<Session>, GatewayError>;

    /// `GET sessions/{id}`
    async fn get_session(&self, session_id: i64) -> Result<Option<Session>, GatewayError>;

    /// `DELETE sessions/{id}`
    async fn delete_session(&self, session_id: i64) -> Result<(), GatewayError>;

    /// `GET bookings?userId=`
    async fn list_user_bookings(&self, user_id: i64) -> Result<Vec<Booking>, GatewayError>;

    /// `POST bookings/{id}/cancel`
    async fn cancel_booking(&self, booking_id: i64) -> Result<(), GatewayError>;

    /// `GET halls/{id}`
    async fn get_hall(&self, hall_id: i64) -> Result<Option<Hall>, GatewayError>;
}
