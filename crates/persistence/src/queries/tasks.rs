// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::TaskData;
use crate::diesel_schema::tasks;
use crate::error::PersistenceError;

/// Fetches a task by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such task exists.
pub fn get_task(conn: &mut SqliteConnection, task_id: i64) -> Result<TaskData, PersistenceError> {
    tasks::table
        .filter(tasks::task_id.eq(task_id))
        .first::<TaskData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Task not found: {task_id}"))
            }
            _ => e.into(),
        })
}

/// Loads all tasks owned by an employee, for the exit cascade.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn tasks_for_owner(
    conn: &mut SqliteConnection,
    owner_id: i64,
) -> Result<Vec<TaskData>, PersistenceError> {
    Ok(tasks::table
        .filter(tasks::owner_id.eq(owner_id))
        .order(tasks::task_id.asc())
        .load::<TaskData>(conn)?)
}
