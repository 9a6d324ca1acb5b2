// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity of the signed-in user and role checks.

use std::str::FromStr;

use crate::error::AuthError;

/// Roles issued by the cinema API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Administrators manage films, directors and sessions.
    Admin,
    /// Regular customers browse films and manage their own bookings.
    #[default]
    User,
}

impl Role {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    /// The API is inconsistent about case, so both `ADMIN` and `admin` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(AuthError::UnknownRole(s.to_string())),
        }
    }
}

/// The signed-in user.
///
/// The token is sent as a bearer credential. A 401 from any endpoint means it
/// has expired and the caller should discard this identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The user's id, used for `GET bookings?userId=`.
    pub user_id: i64,
    /// The role assigned to this user.
    pub role: Role,
    /// Bearer token, if signed in with one.
    pub token: Option<String>,
}

impl Identity {
    /// Creates a new identity.
    #[must_use]
    pub const fn new(user_id: i64, role: Role, token: Option<String>) -> Self {
        Self {
            user_id,
            role,
            token,
        }
    }

    /// Returns true if this identity carries the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Role checks for administrative actions.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the identity may perform an admin-only action.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity does not have the Admin role.
    pub fn authorize_admin(identity: &Identity, action: &str) -> Result<(), AuthError> {
        match identity.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }
}
