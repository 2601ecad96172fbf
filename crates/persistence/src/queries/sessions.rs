// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::SessionData;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Fetches a session by its token.
///
/// # Errors
///
/// Returns `PersistenceError::SessionNotFound` if no such session exists.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<SessionData, PersistenceError> {
    sessions::table
        .filter(sessions::session_token.eq(session_token))
        .first::<SessionData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::SessionNotFound(session_token.to_string())
            }
            _ => e.into(),
        })
}
