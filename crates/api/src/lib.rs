// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod admin;
mod auth;
mod batch;
mod bookings;
mod error;
mod gateway;
mod http;

#[cfg(test)]
mod tests;

pub use admin::{AdminSessionBoard, create_director, load_film_info};
pub use auth::{AuthorizationService, Identity, Role};
pub use batch::lookup_all;
pub use bookings::{BookingBoard, LoadOutcome};
pub use error::{AdminError, AuthError, CancelError, GatewayError};
pub use gateway::Gateway;
pub use http::{DEFAULT_TIMEOUT, GatewayConfig, HttpGateway};
