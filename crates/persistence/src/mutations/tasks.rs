// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task mutations.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Nullable;
use diesel::sql_types::Text;
use serde_json::json;
use time::Date;
use tracing::{debug, info};
use wrm_domain::{EntityRef, TaskStatus, validate_required};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::tasks;
use crate::error::PersistenceError;
use crate::mutations::audit::{append_insert, append_update};
use crate::queries;

/// Field values for a new task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: i64,
    /// The entity this task is about.
    pub entity: EntityRef,
    pub description: String,
    pub due_on: Option<Date>,
}

/// Creates a task with status DUE.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the owner does not exist, or
/// `PersistenceError::Domain` if the description is blank.
pub fn create_task(
    conn: &mut SqliteConnection,
    new_task: NewTask,
    assigned_by: i64,
) -> Result<i64, PersistenceError> {
    validate_required("description", &new_task.description)?;

    debug!(
        owner_id = new_task.owner_id,
        entity_type = new_task.entity.kind().as_str(),
        entity_id = new_task.entity.id(),
        "Creating task"
    );

    conn.immediate_transaction(|conn| {
        queries::employees::get_employee(conn, new_task.owner_id)?;

        diesel::insert_into(tasks::table)
            .values((
                tasks::owner_id.eq(new_task.owner_id),
                tasks::entity_type.eq(new_task.entity.kind().as_str()),
                tasks::entity_id.eq(new_task.entity.id()),
                tasks::description.eq(&new_task.description),
                tasks::status.eq(TaskStatus::Due.as_str()),
                tasks::due_on.eq(new_task.due_on.map(|d| d.to_string())),
                tasks::assigned_by.eq(assigned_by),
            ))
            .execute(conn)?;

        let task_id = get_last_insert_rowid(conn)?;
        append_insert(
            conn,
            EntityRef::Task(task_id),
            assigned_by,
            json!({
                "owner_id": new_task.owner_id,
                "entity_type": new_task.entity.kind().as_str(),
                "entity_id": new_task.entity.id(),
                "description": new_task.description,
                "status": TaskStatus::Due.as_str(),
                "due_on": new_task.due_on.map(|d| d.to_string()),
            }),
        )?;

        info!(task_id, "Task created");
        Ok(task_id)
    })
}

/// Completes a DUE task. COMPLETED is terminal; completing an
/// already-terminal task fails.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task does not exist, or
/// `PersistenceError::Domain` if the task is not DUE.
pub fn complete_task(
    conn: &mut SqliteConnection,
    task_id: i64,
    changed_by: i64,
) -> Result<(), PersistenceError> {
    debug!(task_id, "Completing task");

    conn.immediate_transaction(|conn| {
        let current = queries::tasks::get_task(conn, task_id)?;
        current.parse_status()?.validate_complete()?;

        diesel::update(tasks::table)
            .filter(tasks::task_id.eq(task_id))
            .set((
                tasks::status.eq(TaskStatus::Completed.as_str()),
                tasks::completed_at.eq(sql::<Nullable<Text>>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        append_update(
            conn,
            EntityRef::Task(task_id),
            changed_by,
            json!({ "status": TaskStatus::Completed.as_str() }),
        )?;
        Ok(())
    })
}
