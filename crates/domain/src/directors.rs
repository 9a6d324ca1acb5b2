// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Director admin: search and new-director validation.

use crate::error::DomainError;
use crate::types::{Country, Director};
use chrono::NaiveDate;
use serde::Serialize;

/// Body of `POST films/director`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectorRequest {
    pub director_name_and_surname: String,
    pub birth_date: Option<NaiveDate>,
    pub country_id: i64,
}

/// Form input for a new director.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDirector {
    pub name: String,
    pub surname: String,
    pub birth_date: Option<NaiveDate>,
    pub country_id: i64,
}

impl NewDirector {
    /// Validates the form and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDirector` if the name or surname is empty,
    /// if no country is selected, if `existing` already holds a director with
    /// the same full name ignoring case, or if the birth date lies after `today`.
    pub fn into_request(
        self,
        today: NaiveDate,
        existing: &[Director],
    ) -> Result<CreateDirectorRequest, DomainError> {
        let name: &str = self.name.trim();
        let surname: &str = self.surname.trim();

        if name.is_empty() {
            return Err(DomainError::InvalidDirector {
                field: "name",
                reason: String::from("name is required"),
            });
        }
        if surname.is_empty() {
            return Err(DomainError::InvalidDirector {
                field: "surname",
                reason: String::from("surname is required"),
            });
        }
        if self.country_id <= 0 {
            return Err(DomainError::InvalidDirector {
                field: "country",
                reason: String::from("a country must be selected"),
            });
        }
        let full_name: String = format!("{name} {surname}");
        let wanted: String = full_name.to_lowercase();
        if existing
            .iter()
            .any(|d| d.director_name_and_surname.trim().to_lowercase() == wanted)
        {
            return Err(DomainError::InvalidDirector {
                field: "name",
                reason: format!("{full_name} already exists"),
            });
        }
        if let Some(birth_date) = self.birth_date.filter(|date| *date > today) {
            return Err(DomainError::InvalidDirector {
                field: "birth date",
                reason: format!("{birth_date} is in the future"),
            });
        }

        Ok(CreateDirectorRequest {
            director_name_and_surname: full_name,
            birth_date: self.birth_date,
            country_id: self.country_id,
        })
    }
}

/// Directors whose full name contains `term`, ignoring case.
/// A blank term returns every director.
#[must_use]
pub fn search_directors<'a>(directors: &'a [Director], term: &str) -> Vec<&'a Director> {
    let term: String = term.trim().to_lowercase();
    directors
        .iter()
        .filter(|d| term.is_empty() || d.director_name_and_surname.to_lowercase().contains(&term))
        .collect()
}

/// Countries whose name contains `term`, ignoring case.
/// A blank term returns every country.
#[must_use]
pub fn search_countries<'a>(countries: &'a [Country], term: &str) -> Vec<&'a Country> {
    let term: String = term.trim().to_lowercase();
    countries
        .iter()
        .filter(|c| term.is_empty() || c.country_name.to_lowercase().contains(&term))
        .collect()
}

/// Name of the country with this id, or a placeholder.
#[must_use]
pub fn country_name(countries: &[Country], country_id: i64) -> &str {
    countries
        .iter()
        .find(|c| c.country_id == country_id)
        .map_or("Неизвестная страна", |c| c.country_name.as_str())
}

/// Name of the director with this id, or a placeholder.
#[must_use]
pub fn director_name(directors: &[Director], director_id: i64) -> &str {
    directors
        .iter()
        .find(|d| d.director_id == director_id)
        .map_or("Неизвестный режиссер", |d| {
            d.director_name_and_surname.as_str()
        })
}
