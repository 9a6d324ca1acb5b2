// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellation eligibility.
//!
//! A booking may be cancelled only while it is active and more than one
//! hour remains before its reference time. The reference time is the
//! session's start when the session is known, otherwise the booking's own
//! timestamp.

use crate::booking_status::{CanonicalStatus, StatusScheme};
use crate::types::Booking;
use chrono::{Duration, NaiveDateTime};

/// Minimum lead time before the reference time, exclusive.
pub const CANCELLATION_LEAD_TIME: Duration = Duration::hours(1);

/// Returns true if an active booking may still be cancelled.
///
/// The comparison is strict: exactly one hour before the session is already
/// too late.
#[must_use]
pub fn is_cancellable_at(
    status: CanonicalStatus,
    reference_time: NaiveDateTime,
    now: NaiveDateTime,
) -> bool {
    status.is_active() && reference_time - now > CANCELLATION_LEAD_TIME
}

/// Returns true if the booking may be cancelled at `now`.
///
/// # Arguments
///
/// * `booking` - The booking with its raw status
/// * `session_time` - The resolved session start, if the session lookup succeeded
/// * `now` - The current local time, captured once by the caller
#[must_use]
pub fn is_cancellable(
    booking: &Booking,
    session_time: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> bool {
    let status: CanonicalStatus = StatusScheme::default().classify(&booking.status);
    is_cancellable_at(status, session_time.unwrap_or(booking.booking_time), now)
}
