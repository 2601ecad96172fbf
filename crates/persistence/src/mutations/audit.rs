// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log appends.
//!
//! The audit log is append-only; there are no update or delete mutations
//! for it anywhere in this crate.

use diesel::prelude::*;
use tracing::debug;
use wrm::PendingAudit;
use wrm_audit::{AuditEntry, Operation};
use wrm_domain::{EntityKind, EntityRef};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Appends one audit row.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn append_entry(
    conn: &mut SqliteConnection,
    entry: &AuditEntry,
) -> Result<i64, PersistenceError> {
    append_row(
        conn,
        entry.entity.kind(),
        entry.entity.id(),
        entry.operation,
        entry.changed_by,
        &entry.changed_fields,
    )
}

/// Resolves a plan's pending audit entry and appends it.
///
/// `inserted_id` supplies the row id for entries describing the row the
/// plan inserted.
///
/// # Errors
///
/// Returns an error if the entry has no resolvable entity id, or if the
/// insert fails.
pub fn append_pending(
    conn: &mut SqliteConnection,
    pending: &PendingAudit,
    inserted_id: Option<i64>,
    changed_by: i64,
) -> Result<i64, PersistenceError> {
    let entity_id = pending.entity_id.or(inserted_id).ok_or_else(|| {
        PersistenceError::Other(String::from(
            "Pending audit entry has no entity id and no inserted row id was supplied",
        ))
    })?;
    append_row(
        conn,
        pending.entity_kind,
        entity_id,
        pending.operation,
        changed_by,
        &pending.changed_fields,
    )
}

fn append_row(
    conn: &mut SqliteConnection,
    entity_kind: EntityKind,
    entity_id: i64,
    operation: Operation,
    changed_by: i64,
    changed_fields: &serde_json::Value,
) -> Result<i64, PersistenceError> {
    let fields_json = serde_json::to_string(changed_fields)?;

    diesel::insert_into(audit_log::table)
        .values((
            audit_log::entity_type.eq(entity_kind.as_str()),
            audit_log::entity_id.eq(entity_id),
            audit_log::operation.eq(operation.as_str()),
            audit_log::changed_by.eq(changed_by),
            audit_log::changed_fields.eq(&fields_json),
        ))
        .execute(conn)?;

    let audit_id = get_last_insert_rowid(conn)?;
    debug!(
        audit_id,
        entity_type = entity_kind.as_str(),
        entity_id,
        operation = operation.as_str(),
        changed_by,
        "Appended audit entry"
    );
    Ok(audit_id)
}

/// Convenience for mutations that audit a row they just inserted.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn append_insert(
    conn: &mut SqliteConnection,
    entity: EntityRef,
    changed_by: i64,
    changed_fields: serde_json::Value,
) -> Result<i64, PersistenceError> {
    append_entry(conn, &AuditEntry::insert(entity, changed_by, changed_fields))
}

/// Convenience for mutations that audit an in-place update.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn append_update(
    conn: &mut SqliteConnection,
    entity: EntityRef,
    changed_by: i64,
    changed_fields: serde_json::Value,
) -> Result<i64, PersistenceError> {
    append_entry(conn, &AuditEntry::update(entity, changed_by, changed_fields))
}
