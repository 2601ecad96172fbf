// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Every route except `/login` requires `Authorization: Bearer <token>`.
//! The extractor validates the token against the sessions table and
//! yields the authenticated actor.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use wrm_api::{AuthenticatedActor, AuthenticationService};

use crate::AppState;

/// Extractor for authenticated actors.
pub struct SessionActor(pub AuthenticatedActor);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let actor =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(employee_id = actor.id, role = ?actor.role, "Session validated");
        Ok(Self(actor))
    }
}

/// Session extraction errors, converted to HTTP 401 responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
