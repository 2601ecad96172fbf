// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use wrm_domain::EntityKind;

use crate::data_models::AuditLogData;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Loads the audit trail for one entity, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn audit_for_entity(
    conn: &mut SqliteConnection,
    entity_kind: EntityKind,
    entity_id: i64,
) -> Result<Vec<AuditLogData>, PersistenceError> {
    Ok(audit_log::table
        .filter(audit_log::entity_type.eq(entity_kind.as_str()))
        .filter(audit_log::entity_id.eq(entity_id))
        .order(audit_log::audit_id.desc())
        .load::<AuditLogData>(conn)?)
}

/// Counts all audit entries. Used by tests to assert failed mutations
/// leave no trace.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_audit_entries(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(audit_log::table.count().get_result(conn)?)
}
