// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The "my bookings" view.
//!
//! A load runs in three steps: the user's bookings, then every distinct
//! session, then every distinct film of the resolved sessions. Each step
//! waits for all of its lookups before the next one starts, and nothing is
//! stored until the last step has settled.
//!
//! Loads are numbered. Only the most recently started load may write; an
//! older load that finishes later reports [`LoadOutcome::Superseded`]. After
//! [`BookingBoard::teardown`] every completion reports
//! [`LoadOutcome::Detached`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::NaiveDateTime;
use cinema_domain::{
    BatchLookup, Booking, CanonicalStatus, Clock, EnrichedBooking, EnrichmentLevel, Film,
    Session, StatusFilter, StatusScheme, distinct_film_ids, distinct_session_ids, enrich,
    is_cancellable_at, visible_bookings, with_status,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::batch::lookup_all;
use crate::error::{CancelError, GatewayError};
use crate::gateway::Gateway;

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The load's result is now the board's state.
    Applied {
        /// How much derived data could be attached.
        level: EnrichmentLevel,
        /// Number of items stored.
        count: usize,
    },
    /// A newer load started meanwhile; this result was discarded.
    Superseded,
    /// The board was torn down; this result was discarded.
    Detached,
}

#[derive(Debug, Default)]
struct BoardState {
    bookings: Vec<EnrichedBooking>,
    filter: StatusFilter,
    level: Option<EnrichmentLevel>,
    loaded_at: Option<NaiveDateTime>,
}

/// Holds one user's enriched bookings and the selected status filter.
pub struct BookingBoard<G> {
    gateway: G,
    scheme: StatusScheme,
    state: Mutex<BoardState>,
    generation: AtomicU64,
    torn_down: AtomicBool,
}

impl<G: Gateway> BookingBoard<G> {
    /// Creates an empty board using the default status scheme.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self::with_scheme(gateway, StatusScheme::default())
    }

    /// Creates an empty board classifying statuses with `scheme`.
    #[must_use]
    pub fn with_scheme(gateway: G, scheme: StatusScheme) -> Self {
        Self {
            gateway,
            scheme,
            state: Mutex::new(BoardState::default()),
            generation: AtomicU64::new(0),
            torn_down: AtomicBool::new(false),
        }
    }

    /// The gateway this board loads through.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The status scheme used for classification.
    #[must_use]
    pub const fn scheme(&self) -> StatusScheme {
        self.scheme
    }

    /// Loads and enriches the user's bookings.
    ///
    /// Failed session or film lookups degrade the affected bookings instead of
    /// failing the load.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` if any request is rejected with 401,
    /// or the booking list request's error if that request fails. Stored state
    /// is left untouched in both cases.
    pub async fn load(&self, user_id: i64, clock: &impl Clock) -> Result<LoadOutcome, GatewayError> {
        let generation: u64 = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let now: NaiveDateTime = clock.now();
        info!(user_id, generation, "Loading bookings");

        let bookings: Vec<Booking> = self.gateway.list_user_bookings(user_id).await?;

        let session_ids: Vec<i64> = distinct_session_ids(&bookings);
        let sessions: BatchLookup<Session> =
            lookup_all("session", &session_ids, |id| self.gateway.get_session(id)).await?;

        let films: BatchLookup<Film> = match &sessions {
            BatchLookup::Resolved(map) => {
                let film_ids: Vec<i64> = distinct_film_ids(map.values());
                lookup_all("film", &film_ids, |id| self.gateway.get_film(id)).await?
            }
            BatchLookup::Unavailable => BatchLookup::Unavailable,
        };

        let (enriched, level) = enrich(&bookings, &sessions, &films, self.scheme, now);

        let mut state = self.state.lock().await;
        if self.torn_down.load(Ordering::SeqCst) {
            return Ok(LoadOutcome::Detached);
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            info!(user_id, generation, "Discarding superseded booking load");
            return Ok(LoadOutcome::Superseded);
        }

        if level != EnrichmentLevel::Full {
            warn!(user_id, ?level, "Bookings loaded with degraded details");
        }
        let count: usize = enriched.len();
        state.bookings = enriched;
        state.level = Some(level);
        state.loaded_at = Some(now);
        info!(user_id, count, ?level, "Bookings loaded");

        Ok(LoadOutcome::Applied { level, count })
    }

    /// Bookings passing the current filter, in display order.
    pub async fn visible(&self) -> Vec<EnrichedBooking> {
        let state = self.state.lock().await;
        visible_bookings(&state.bookings, state.filter)
    }

    /// Visible bookings with the given canonical status.
    pub async fn visible_with_status(&self, status: CanonicalStatus) -> Vec<EnrichedBooking> {
        let visible: Vec<EnrichedBooking> = self.visible().await;
        with_status(&visible, status).into_iter().cloned().collect()
    }

    /// Every stored booking, in load order.
    #[cfg(test)]
    pub(crate) async fn all(&self) -> Vec<EnrichedBooking> {
        self.state.lock().await.bookings.clone()
    }

    /// Changes the status filter and returns the re-derived visible list.
    pub async fn set_filter(&self, filter: StatusFilter) -> Vec<EnrichedBooking> {
        let mut state = self.state.lock().await;
        state.filter = filter;
        visible_bookings(&state.bookings, filter)
    }

    /// Enrichment level of the stored list, or `None` before the first load.
    pub async fn level(&self) -> Option<EnrichmentLevel> {
        self.state.lock().await.level
    }

    /// The `now` the stored list was computed against.
    pub async fn loaded_at(&self) -> Option<NaiveDateTime> {
        self.state.lock().await.loaded_at
    }

    /// Cancels a stored booking.
    ///
    /// Cancellability is re-checked against the clock before the request is
    /// sent. On success the stored booking becomes cancelled.
    ///
    /// # Errors
    ///
    /// Returns `CancelError::NotCancellable` if the booking is not active or
    /// starts within the hour, and the mapped API outcome otherwise.
    pub async fn cancel(&self, booking_id: i64, clock: &impl Clock) -> Result<(), CancelError> {
        let now: NaiveDateTime = clock.now();
        {
            let state = self.state.lock().await;
            let booking: &EnrichedBooking = state
                .bookings
                .iter()
                .find(|b| b.booking_id() == booking_id)
                .ok_or(CancelError::NotFound)?;
            if !is_cancellable_at(booking.status, booking.effective_time(), now) {
                info!(booking_id, status = %booking.status, "Refusing to cancel booking");
                return Err(CancelError::NotCancellable { booking_id });
            }
        }

        if let Err(err) = self.gateway.cancel_booking(booking_id).await {
            warn!(booking_id, error = %err, "Cancellation failed");
            return Err(err.into());
        }
        info!(booking_id, "Booking cancelled");

        if self.torn_down.load(Ordering::SeqCst) {
            return Ok(());
        }
        let mut state = self.state.lock().await;
        if let Some(booking) = state
            .bookings
            .iter_mut()
            .find(|b| b.booking_id() == booking_id)
        {
            booking.mark_cancelled();
            booking.booking.status = CanonicalStatus::Cancelled.as_str().to_string();
        }
        Ok(())
    }

    /// Detaches the board. Loads still in flight will not write.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`Self::teardown`] has been called.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }
}
