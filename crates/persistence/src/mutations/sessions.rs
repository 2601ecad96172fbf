// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session row mutations. Token generation and expiry policy live in the
//! API layer; this module only stores what it is given.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Creates a session row for an employee.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    employee_id: i64,
    session_token: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(employee_id, "Creating session");

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::employee_id.eq(employee_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Updates a session's last-activity timestamp.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn touch_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .set(sessions::last_activity_at.eq(sql::<Text>("CURRENT_TIMESTAMP")))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session row, logging the holder out.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;
    Ok(())
}
