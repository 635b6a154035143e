// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and authorization.
//!
//! Credentials are verified upstream. This service receives the caller's
//! user ID and role as forwarded by the gateway and only decides what that
//! caller may do.

use crate::error::{ApiError, AuthError};

/// Caller roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A client of the service. Sees only their own data.
    Client,
    /// Staff (including admins). Manages applications across all clients.
    Staff,
}

impl Role {
    /// Parses a forwarded role value. `admin` and `staff` both map to `Staff`.
    ///
    /// # Errors
    ///
    /// Returns an error for any other value.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "admin" | "staff" => Ok(Self::Staff),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Staff => "staff",
        }
    }
}

/// An authenticated caller with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    /// The caller's user ID (UUID).
    pub id: String,
    pub role: Role,
}

impl AuthenticatedCaller {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Builds a caller from forwarded identity values.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is missing, the ID is not a UUID,
    /// or the role is unknown.
    pub fn from_forwarded(user_id: Option<&str>, role: Option<&str>) -> Result<Self, AuthError> {
        let user_id: &str = user_id.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
            AuthError::AuthenticationFailed {
                reason: String::from("Missing user identity"),
            }
        })?;
        let role: &str = role.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Missing user role"),
        })?;

        let id: uuid::Uuid =
            uuid::Uuid::try_parse(user_id).map_err(|_| AuthError::AuthenticationFailed {
                reason: String::from("User identity is not a valid UUID"),
            })?;

        Ok(Self {
            id: id.hyphenated().to_string(),
            role: Role::parse(role)?,
        })
    }

    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self.role, Role::Staff)
    }
}

/// Parses a client or record identifier into the stored form: a
/// lower-case hyphenated UUID.
///
/// # Errors
///
/// Returns an error naming `field` if the value is not a UUID.
pub fn parse_identifier(field: &str, value: &str) -> Result<String, ApiError> {
    uuid::Uuid::try_parse(value.trim())
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("Invalid uuid"),
        })
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_staff(caller: &AuthenticatedCaller, action: &str) -> Result<(), AuthError> {
        match caller.role {
            Role::Staff => Ok(()),
            Role::Client => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Staff"),
            }),
        }
    }

    /// Checks if a caller may create applications on a client's behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not staff.
    pub fn authorize_create_application(caller: &AuthenticatedCaller) -> Result<(), AuthError> {
        Self::require_staff(caller, "create_application")
    }

    /// Checks if a caller may update applications.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not staff.
    pub fn authorize_update_application(caller: &AuthenticatedCaller) -> Result<(), AuthError> {
        Self::require_staff(caller, "update_application")
    }

    /// Checks if a caller may approve onboarding submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not staff.
    pub fn authorize_approve_onboarding(caller: &AuthenticatedCaller) -> Result<(), AuthError> {
        Self::require_staff(caller, "approve_onboarding")
    }

    /// Checks if a caller may reject onboarding submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not staff.
    pub fn authorize_reject_onboarding(caller: &AuthenticatedCaller) -> Result<(), AuthError> {
        Self::require_staff(caller, "reject_onboarding")
    }

    /// Checks if a caller may submit an onboarding questionnaire.
    ///
    /// Only clients onboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not a client.
    pub fn authorize_submit_onboarding(caller: &AuthenticatedCaller) -> Result<(), AuthError> {
        match caller.role {
            Role::Client => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: String::from("submit_onboarding"),
                required_role: String::from("Client"),
            }),
        }
    }

    /// Resolves which client's data a read request targets.
    ///
    /// Clients always read their own data and may not name another client.
    /// Staff must name the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a client names someone else, staff name no one,
    /// or the named client ID is not a UUID.
    pub fn resolve_client_scope(
        caller: &AuthenticatedCaller,
        requested: Option<&str>,
    ) -> Result<String, ApiError> {
        let requested: Option<&str> = requested.map(str::trim).filter(|v| !v.is_empty());

        match (caller.role, requested) {
            (Role::Client, None) => Ok(caller.id.clone()),
            (Role::Client, Some(id)) => {
                if parse_identifier("client_id", id)? == caller.id {
                    Ok(caller.id.clone())
                } else {
                    Err(ApiError::Unauthorized {
                        action: String::from("read_other_client"),
                        required_role: String::from("Staff"),
                    })
                }
            }
            (Role::Staff, Some(id)) => parse_identifier("client_id", id),
            (Role::Staff, None) => Err(ApiError::InvalidInput {
                field: String::from("client_id"),
                message: String::from("Staff requests must name a client"),
            }),
        }
    }
}
