// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin views: the session list and director management.
//!
//! The session list is joined with films and halls looked up for that load
//! only. Film and hall batches run concurrently and both settle before any
//! row is built. Loads follow the same numbering as
//! [`crate::BookingBoard`]. When either batch is wholly unavailable the
//! outcome's level is [`EnrichmentLevel::WithoutFilms`] and the affected
//! names fall back to placeholders.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use cinema_domain::{
    AdminSessionQuery, AdminSessionRow, BatchLookup, Clock, CreateDirectorRequest, Director,
    EnrichmentLevel, Film, FilmInfo, Hall, NewDirector, Session, build_rows, filter_rows,
};
use futures::future::join;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::auth::{AuthorizationService, Identity};
use crate::batch::lookup_all;
use crate::bookings::LoadOutcome;
use crate::error::{AdminError, GatewayError};
use crate::gateway::Gateway;

#[derive(Debug, Default)]
struct AdminState {
    rows: Vec<AdminSessionRow>,
    query: AdminSessionQuery,
}

/// Holds the joined session list and the admin's filters.
pub struct AdminSessionBoard<G> {
    gateway: G,
    state: Mutex<AdminState>,
    generation: AtomicU64,
    torn_down: AtomicBool,
}

impl<G: Gateway> AdminSessionBoard<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(AdminState::default()),
            generation: AtomicU64::new(0),
            torn_down: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Loads every session, or only `film_id`'s sessions, and joins each with
    /// its film and hall.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` on any 401, or the session list
    /// request's error if that request fails.
    pub async fn load(&self, film_id: Option<i64>) -> Result<LoadOutcome, GatewayError> {
        let generation: u64 = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, ?film_id, "Loading admin sessions");

        let sessions: Vec<Session> = self.gateway.list_sessions(film_id).await?;

        let film_ids: Vec<i64> = sessions
            .iter()
            .map(|s| s.film_id)
            .collect::<BTreeSet<i64>>()
            .into_iter()
            .collect();
        let hall_ids: Vec<i64> = sessions
            .iter()
            .map(|s| s.hall_id)
            .collect::<BTreeSet<i64>>()
            .into_iter()
            .collect();

        let (films, halls) = join(
            lookup_all("film", &film_ids, |id| self.gateway.get_film(id)),
            lookup_all("hall", &hall_ids, |id| self.gateway.get_hall(id)),
        )
        .await;
        let films: BatchLookup<Film> = films?;
        let halls: BatchLookup<Hall> = halls?;

        let level: EnrichmentLevel = if films.is_unavailable() || halls.is_unavailable() {
            EnrichmentLevel::WithoutFilms
        } else {
            EnrichmentLevel::Full
        };
        let rows: Vec<AdminSessionRow> = build_rows(&sessions, &films, &halls);

        let mut state = self.state.lock().await;
        if self.torn_down.load(Ordering::SeqCst) {
            return Ok(LoadOutcome::Detached);
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            info!(generation, "Discarding superseded admin session load");
            return Ok(LoadOutcome::Superseded);
        }

        if level != EnrichmentLevel::Full {
            warn!(?level, "Admin sessions loaded with placeholder names");
        }
        let count: usize = rows.len();
        state.rows = rows;
        info!(count, "Admin sessions loaded");

        Ok(LoadOutcome::Applied { level, count })
    }

    /// Replaces the filters.
    pub async fn set_query(&self, query: AdminSessionQuery) {
        self.state.lock().await.query = query;
    }

    /// Rows passing the current filters, ordered by start time.
    pub async fn visible(&self, clock: &impl Clock) -> Vec<AdminSessionRow> {
        let now: NaiveDateTime = clock.now();
        let state = self.state.lock().await;
        filter_rows(&state.rows, &state.query, now)
    }

    /// Deletes a session.
    ///
    /// A loaded session whose status forbids deletion is refused locally.
    /// On success the row is removed from the stored list.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Forbidden` for non-admins, `AdminError::Refused`
    /// for a running session, and the mapped API outcome otherwise.
    pub async fn delete_session(&self, identity: &Identity, session_id: i64) -> Result<(), AdminError> {
        AuthorizationService::authorize_admin(identity, "delete_session")?;

        {
            let state = self.state.lock().await;
            if let Some(reason) = state
                .rows
                .iter()
                .find(|row| row.session.session_id == session_id)
                .and_then(|row| row.status.delete_refusal())
            {
                info!(session_id, reason, "Refusing to delete session");
                return Err(AdminError::Refused { reason });
            }
        }

        if let Err(err) = self.gateway.delete_session(session_id).await {
            warn!(session_id, error = %err, "Session deletion failed");
            return Err(err.into());
        }
        info!(session_id, "Session deleted");

        if !self.torn_down.load(Ordering::SeqCst) {
            self.state
                .lock()
                .await
                .rows
                .retain(|row| row.session.session_id != session_id);
        }
        Ok(())
    }

    /// Detaches the board. Loads still in flight will not write.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }
}

/// Loads every director and country for the director admin page.
///
/// # Errors
///
/// Returns `AdminError::Forbidden` for non-admins and the mapped API outcome
/// otherwise.
pub async fn load_film_info<G: Gateway>(
    gateway: &G,
    identity: &Identity,
) -> Result<FilmInfo, AdminError> {
    AuthorizationService::authorize_admin(identity, "list_directors")?;
    Ok(gateway.film_info().await?)
}

/// Validates the form against the current directors and creates a director.
///
/// # Errors
///
/// Returns `AdminError::Forbidden` for non-admins, `AdminError::Invalid` for
/// an invalid form or a name that is already taken, and the mapped API
/// outcome otherwise.
pub async fn create_director<G: Gateway>(
    gateway: &G,
    identity: &Identity,
    form: NewDirector,
    clock: &impl Clock,
) -> Result<Director, AdminError> {
    AuthorizationService::authorize_admin(identity, "create_director")?;
    let today: NaiveDate = clock.now().date();
    let existing: FilmInfo = gateway.film_info().await?;
    let request: CreateDirectorRequest = form.into_request(today, &existing.directors)?;

    let director: Director = gateway.create_director(&request).await.map_err(|err| {
        warn!(error = %err, "Director creation failed");
        AdminError::from(err)
    })?;
    info!(
        director_id = director.director_id,
        name = %director.director_name_and_surname,
        "Director created"
    );
    Ok(director)
}
