// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project mutations: create, the permission-checked update, and close.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde_json::json;
use time::Date;
use tracing::{debug, info};
use wrm::ProjectPatch;
use wrm_domain::{DomainError, EntityRef, ProjectStatus, Role, validate_required};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::AllocationData;
use crate::diesel_schema::{project_allocations, projects};
use crate::error::PersistenceError;
use crate::mutations::audit::{append_insert, append_pending};
use crate::queries;

/// Field values for a new project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_code: String,
    pub project_name: String,
    pub client_name: Option<String>,
    pub manager_id: Option<i64>,
    pub short_description: Option<String>,
    pub started_on: Option<Date>,
}

/// The effects of a project closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseOutcome {
    pub allocations_ended: usize,
}

fn load_project_allocations(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<wrm::AllocationRecord>, PersistenceError> {
    queries::allocations::allocations_for_project(conn, project_id)?
        .iter()
        .map(AllocationData::to_record)
        .collect()
}

fn truncate_allocations(
    conn: &mut SqliteConnection,
    allocation_ids: &[i64],
    cutoff: Date,
) -> Result<(), PersistenceError> {
    if allocation_ids.is_empty() {
        return Ok(());
    }
    diesel::update(project_allocations::table)
        .filter(project_allocations::allocation_id.eq_any(allocation_ids))
        .set((
            project_allocations::end_date.eq(Some(cutoff.to_string())),
            project_allocations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;
    Ok(())
}

/// Creates a project with status DRAFT.
///
/// # Errors
///
/// Returns `PersistenceError::Domain` if a field fails validation or the
/// project code is already taken, and `PersistenceError::NotFound` if a
/// manager id references a missing employee.
pub fn create_project(
    conn: &mut SqliteConnection,
    new_project: NewProject,
    changed_by: i64,
) -> Result<i64, PersistenceError> {
    validate_required("project_code", &new_project.project_code)?;
    validate_required("project_name", &new_project.project_name)?;

    info!(project_code = %new_project.project_code, "Creating project");

    conn.immediate_transaction(|conn| {
        if queries::projects::project_code_exists(conn, &new_project.project_code)? {
            return Err(PersistenceError::Domain(DomainError::Validation(format!(
                "project_code already exists: {}",
                new_project.project_code
            ))));
        }
        if let Some(manager_id) = new_project.manager_id {
            queries::employees::get_employee(conn, manager_id)?;
        }

        diesel::insert_into(projects::table)
            .values((
                projects::project_code.eq(&new_project.project_code),
                projects::project_name.eq(&new_project.project_name),
                projects::client_name.eq(&new_project.client_name),
                projects::manager_id.eq(new_project.manager_id),
                projects::short_description.eq(&new_project.short_description),
                projects::status.eq(ProjectStatus::Draft.as_str()),
                projects::started_on.eq(new_project.started_on.map(|d| d.to_string())),
            ))
            .execute(conn)?;

        let project_id = get_last_insert_rowid(conn)?;
        append_insert(
            conn,
            EntityRef::Project(project_id),
            changed_by,
            json!({
                "project_code": new_project.project_code,
                "project_name": new_project.project_name,
                "client_name": new_project.client_name,
                "manager_id": new_project.manager_id,
                "short_description": new_project.short_description,
                "status": ProjectStatus::Draft.as_str(),
                "started_on": new_project.started_on.map(|d| d.to_string()),
            }),
        )?;

        info!(project_id, "Project created");
        Ok(project_id)
    })
}

/// Applies a permission-checked patch to a project.
///
/// Field permissions and status transitions are validated by the project
/// engine for the given actor. A patch that moves the project into a
/// terminal status runs the closure cascade in the same transaction.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist,
/// or `PersistenceError::Domain` if the engine rejects the patch.
pub fn update_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    patch: ProjectPatch,
    actor_id: i64,
    role: Role,
) -> Result<(), PersistenceError> {
    debug!(project_id, actor_id, role = role.as_str(), "Updating project");

    conn.immediate_transaction(|conn| {
        let current = queries::projects::get_project(conn, project_id)?.to_record()?;
        let allocations = load_project_allocations(conn, project_id)?;
        let plan = wrm::plan_update_project(&current, patch, actor_id, role, &allocations)?;

        let changes = &plan.changes;
        if let Some(value) = &changes.project_name {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::project_name.eq(value))
                .execute(conn)?;
        }
        if let Some(value) = &changes.client_name {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::client_name.eq(Some(value)))
                .execute(conn)?;
        }
        if let Some(value) = changes.manager_id {
            queries::employees::get_employee(conn, value)?;
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::manager_id.eq(Some(value)))
                .execute(conn)?;
        }
        if let Some(value) = changes.started_on {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::started_on.eq(Some(value.to_string())))
                .execute(conn)?;
        }
        if let Some(value) = &changes.short_description {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::short_description.eq(Some(value)))
                .execute(conn)?;
        }
        if let Some(value) = &changes.long_description {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::long_description.eq(Some(value)))
                .execute(conn)?;
        }
        if let Some(value) = &changes.pitch_deck_url {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::pitch_deck_url.eq(Some(value)))
                .execute(conn)?;
        }
        if let Some(value) = &changes.github_url {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::github_url.eq(Some(value)))
                .execute(conn)?;
        }
        if let Some(status) = changes.status {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::status.eq(status.as_str()))
                .execute(conn)?;
        }
        if let Some(closed_on) = plan.closed_on {
            diesel::update(projects::table)
                .filter(projects::project_id.eq(project_id))
                .set(projects::closed_on.eq(Some(closed_on.to_string())))
                .execute(conn)?;
            truncate_allocations(conn, &plan.allocations_to_truncate, closed_on)?;
        }
        diesel::update(projects::table)
            .filter(projects::project_id.eq(project_id))
            .set(projects::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")))
            .execute(conn)?;

        append_pending(conn, &plan.audit, None, actor_id)?;
        Ok(())
    })
}

/// Closes a project: sets a terminal status and `closed_on`, and
/// truncates allocations extending past the closure date. One
/// transaction; a retry with the same date is a no-op.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist,
/// or `PersistenceError::Domain` if the requested status is not
/// terminal.
pub fn close_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    status: ProjectStatus,
    closed_on: Date,
    changed_by: i64,
) -> Result<CloseOutcome, PersistenceError> {
    info!(
        project_id,
        status = status.as_str(),
        closed_on = %closed_on,
        "Closing project"
    );

    conn.immediate_transaction(|conn| {
        let current = queries::projects::get_project(conn, project_id)?.to_record()?;
        let allocations = load_project_allocations(conn, project_id)?;
        let plan = wrm::plan_close(&current, status, closed_on, &allocations)?;

        diesel::update(projects::table)
            .filter(projects::project_id.eq(project_id))
            .set((
                projects::status.eq(plan.status.as_str()),
                projects::closed_on.eq(Some(closed_on.to_string())),
                projects::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        truncate_allocations(conn, &plan.allocations_to_truncate, closed_on)?;
        append_pending(conn, &plan.audit, None, changed_by)?;

        let outcome = CloseOutcome {
            allocations_ended: plan.allocations_to_truncate.len(),
        };
        info!(
            project_id,
            allocations_ended = outcome.allocations_ended,
            "Project closed"
        );
        Ok(outcome)
    })
}
