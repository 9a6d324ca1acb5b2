// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entities read from the cinema API.
//!
//! Field names follow the API's camelCase JSON. Date-times are naive
//! local date-times in the cinema's zone, which is how the API emits them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A booking as returned by `GET bookings?userId=`.
///
/// `status` is the raw, free-text value the API stores. It is bilingual and
/// inconsistent across records; use [`crate::CanonicalStatus::classify`]
/// before making any decision on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub status: String,
    pub booking_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ticket_list: Vec<Ticket>,
}

/// A ticket attached to a booking. Only the count matters to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default)]
    pub ticket_id: Option<i64>,
    #[serde(default)]
    pub seat_id: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A scheduled screening.
///
/// `status` uses the admin taxonomy (see [`crate::SessionStatus`]) and is
/// unrelated to booking status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: i64,
    pub film_id: i64,
    pub hall_id: i64,
    #[serde(default)]
    pub date_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// A film with its embedded session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub film_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub director_id: Option<i64>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub age_rating: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_list: Vec<Session>,
}

impl Film {
    /// Creates a film with only an id, a title and its sessions.
    #[must_use]
    pub fn new(film_id: i64, title: impl Into<String>, session_list: Vec<Session>) -> Self {
        Self {
            film_id,
            title: title.into(),
            description: None,
            release_date: None,
            duration: None,
            director_id: None,
            country_id: None,
            age_rating: None,
            genres: Vec::new(),
            poster_url: None,
            session_list,
        }
    }
}

/// A cinema hall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub hall_id: i64,
    pub hall_name: String,
    pub hall_type: String,
    pub base_price: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// A film director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Director {
    pub director_id: i64,
    pub director_name_and_surname: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub film_list: Vec<Film>,
}

impl Director {
    /// Returns true if the API lists at least one film for this director.
    #[must_use]
    pub fn has_films(&self) -> bool {
        !self.film_list.is_empty()
    }
}

/// A production country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub country_id: i64,
    pub country_name: String,
}

/// Response of `GET films/info`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilmInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub directors: Vec<Director>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<Country>,
}

/// Treats an explicit JSON `null` the same as a missing field.
///
/// The API serializes empty collections and unset strings as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
