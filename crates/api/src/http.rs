// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP implementation of [`Gateway`].
//!
//! Status mapping: 401 becomes [`GatewayError::Unauthorized`], 404 becomes
//! [`GatewayError::NotFound`] (or `Ok(None)` for single-entity reads), and
//! 400 becomes [`GatewayError::Rejected`] carrying the response body.

use std::time::Duration;

use async_trait::async_trait;
use cinema_domain::{Booking, CreateDirectorRequest, Director, Film, FilmInfo, Hall, Session};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the API, e.g. `http://localhost:8080/api/`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a config with no token and the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Talks to the cinema API over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpGateway {
    /// Builds a gateway from its config.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidBaseUrl` if the base URL does not parse,
    /// or `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        // Url::join drops the last path segment unless it ends with '/'.
        let mut base: String = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url: Url =
            Url::parse(&base).map_err(|_| GatewayError::InvalidBaseUrl(config.base_url.clone()))?;

        let client: Client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<RequestBuilder, GatewayError> {
        let mut url: Url = self
            .base_url
            .join(path)
            .map_err(|_| GatewayError::InvalidBaseUrl(format!("{}{path}", self.base_url)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let builder: RequestBuilder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder, resource: &str) -> Result<Response, GatewayError> {
        let response: Response = builder.send().await.map_err(|err| {
            warn!(resource, error = %err, "Request failed");
            GatewayError::Transport(err.to_string())
        })?;

        let status: StatusCode = response.status();
        debug!(resource, status = status.as_u16(), "Received response");
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound {
                resource: resource.to_string(),
            }),
            StatusCode::BAD_REQUEST => {
                let message: String = response.text().await.unwrap_or_default();
                Err(GatewayError::Rejected { message })
            }
            other => Err(GatewayError::Status {
                status: other.as_u16(),
                resource: resource.to_string(),
            }),
        }
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        resource: &str,
    ) -> Result<T, GatewayError> {
        let text: String = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        serde_json::from_str::<T>(&text).map_err(|err| GatewayError::Decode {
            resource: resource.to_string(),
            message: err.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let response: Response = self
            .send(self.request(Method::GET, path, query)?, path)
            .await?;
        Self::decode(response, path).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, GatewayError> {
        match self.get_json(path, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(GatewayError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn execute(&self, method: Method, path: &str) -> Result<(), GatewayError> {
        self.send(self.request(method, path, &[])?, path).await?;
        Ok(())
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_films(&self) -> Result<Vec<Film>, GatewayError> {
        self.get_json("films", &[]).await
    }

    async fn get_film(&self, film_id: i64) -> Result<Option<Film>, GatewayError> {
        self.get_optional(&format!("films/{film_id}")).await
    }

    async fn list_active_films(&self) -> Result<Vec<Film>, GatewayError> {
        self.get_json("films/active", &[]).await
    }

    async fn film_info(&self) -> Result<FilmInfo, GatewayError> {
        self.get_json("films/info", &[]).await
    }

    async fn create_director(
        &self,
        request: &CreateDirectorRequest,
    ) -> Result<Director, GatewayError> {
        let path: &str = "films/director";
        let builder: RequestBuilder = self.request(Method::POST, path, &[])?.json(request);
        let response: Response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    async fn list_sessions(&self, film_id: Option<i64>) -> Result<Vec<Session>, GatewayError> {
        match film_id {
            Some(id) => {
                self.get_json("sessions", &[("filmId", id.to_string())])
                    .await
            }
            None => self.get_json("sessions", &[]).await,
        }
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<Session>, GatewayError> {
        self.get_optional(&format!("sessions/{session_id}")).await
    }

    async fn delete_session(&self, session_id: i64) -> Result<(), GatewayError> {
        self.execute(Method::DELETE, &format!("sessions/{session_id}"))
            .await
    }

    async fn list_user_bookings(&self, user_id: i64) -> Result<Vec<Booking>, GatewayError> {
        self.get_json("bookings", &[("userId", user_id.to_string())])
            .await
    }

    async fn cancel_booking(&self, booking_id: i64) -> Result<(), GatewayError> {
        self.execute(Method::POST, &format!("bookings/{booking_id}/cancel"))
            .await
    }

    async fn get_hall(&self, hall_id: i64) -> Result<Option<Hall>, GatewayError> {
        self.get_optional(&format!("halls/{hall_id}")).await
    }
}
