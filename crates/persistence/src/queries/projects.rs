// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::ProjectData;
use crate::diesel_schema::projects;
use crate::error::PersistenceError;

/// Fetches a project by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such project exists.
pub fn get_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<ProjectData, PersistenceError> {
    projects::table
        .filter(projects::project_id.eq(project_id))
        .first::<ProjectData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Project not found: {project_id}"))
            }
            _ => e.into(),
        })
}

/// Checks whether a project code is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn project_code_exists(
    conn: &mut SqliteConnection,
    project_code: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = projects::table
        .filter(projects::project_code.eq(project_code))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists all projects, ordered by project code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_projects(conn: &mut SqliteConnection) -> Result<Vec<ProjectData>, PersistenceError> {
    Ok(projects::table
        .order(projects::project_code.asc())
        .load::<ProjectData>(conn)?)
}
