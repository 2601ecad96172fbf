// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Workforce Resource Manager.
//!
//! Built on Diesel over `SQLite`. The schema is created by embedded
//! migrations; foreign key enforcement is verified at startup. All
//! multi-row mutations run inside `immediate_transaction` so the write
//! lock is taken before any planning snapshot is read.
//!
//! ## Testing
//!
//! Tests run against isolated in-memory databases created by
//! [`Persistence::new_in_memory`]; each call gets a unique database via
//! an atomic counter, so tests cannot collide.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use wrm::{AllocationPatch, AllocationRequest, ProjectPatch};
use wrm_domain::{EntityKind, Role};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AllocationData, AuditLogData, EmployeeData, EmployeeSkillData, ProjectData,
    ResourceDemandData, SessionData, SkillData, TaskData,
};
pub use error::PersistenceError;
pub use mutations::demands::NewDemand;
pub use mutations::employees::{EmployeePatch, ExitOutcome, NewEmployee};
pub use mutations::projects::{CloseOutcome, NewProject};
pub use mutations::tasks::NewTask;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// test databases never collide.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning the `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are
        // isolated without time-based collisions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = backend::sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases.
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Creates an employee. See [`mutations::employees::create_employee`].
    ///
    /// # Errors
    ///
    /// Returns an error on validation failure or duplicate code/email.
    pub fn create_employee(
        &mut self,
        new_employee: NewEmployee,
        changed_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::employees::create_employee(&mut self.conn, new_employee, changed_by)
    }

    /// Updates an employee's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is missing or validation fails.
    pub fn update_employee(
        &mut self,
        employee_id: i64,
        patch: EmployeePatch,
        changed_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_employee(&mut self.conn, employee_id, patch, changed_by)
    }

    /// Exits an employee, truncating allocations and cancelling tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is missing or the date invalid.
    pub fn exit_employee(
        &mut self,
        employee_id: i64,
        exited_on: Date,
        changed_by: i64,
    ) -> Result<ExitOutcome, PersistenceError> {
        mutations::employees::exit_employee(&mut self.conn, employee_id, exited_on, changed_by)
    }

    /// Fetches an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<EmployeeData, PersistenceError> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    /// Fetches an employee by email.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_employee_by_email(
        &mut self,
        email: &str,
    ) -> Result<EmployeeData, PersistenceError> {
        queries::employees::get_employee_by_email(&mut self.conn, email)
    }

    /// Lists all employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees(&mut self) -> Result<Vec<EmployeeData>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn)
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Creates a project in DRAFT.
    ///
    /// # Errors
    ///
    /// Returns an error on validation failure or duplicate project code.
    pub fn create_project(
        &mut self,
        new_project: NewProject,
        changed_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::projects::create_project(&mut self.conn, new_project, changed_by)
    }

    /// Applies a permission-checked patch to a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the engine rejects
    /// the patch for this actor.
    pub fn update_project(
        &mut self,
        project_id: i64,
        patch: ProjectPatch,
        actor_id: i64,
        role: Role,
    ) -> Result<(), PersistenceError> {
        mutations::projects::update_project(&mut self.conn, project_id, patch, actor_id, role)
    }

    /// Closes a project with a terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the status is not
    /// terminal.
    pub fn close_project(
        &mut self,
        project_id: i64,
        status: wrm_domain::ProjectStatus,
        closed_on: Date,
        changed_by: i64,
    ) -> Result<CloseOutcome, PersistenceError> {
        mutations::projects::close_project(&mut self.conn, project_id, status, closed_on, changed_by)
    }

    /// Fetches a project by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_project(&mut self, project_id: i64) -> Result<ProjectData, PersistenceError> {
        queries::projects::get_project(&mut self.conn, project_id)
    }

    /// Lists all projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&mut self) -> Result<Vec<ProjectData>, PersistenceError> {
        queries::projects::list_projects(&mut self.conn)
    }

    // ========================================================================
    // Allocations
    // ========================================================================

    /// Creates an allocation, enforcing the capacity cap.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing employee/project or a capacity
    /// overflow.
    pub fn create_allocation(
        &mut self,
        request: AllocationRequest,
        assigned_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::allocations::create_allocation(&mut self.conn, request, assigned_by)
    }

    /// Updates an allocation, re-checking capacity over the new window.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing allocation or a capacity overflow.
    pub fn update_allocation(
        &mut self,
        allocation_id: i64,
        patch: AllocationPatch,
        changed_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::allocations::update_allocation(&mut self.conn, allocation_id, patch, changed_by)
    }

    /// Transfers the tail of an allocation to another project.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing allocation/project or an
    /// out-of-window transfer date.
    pub fn transfer_allocation(
        &mut self,
        allocation_id: i64,
        target_project_id: i64,
        transfer_date: Date,
        changed_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::allocations::transfer_allocation(
            &mut self.conn,
            allocation_id,
            target_project_id,
            transfer_date,
            changed_by,
        )
    }

    /// Fetches an allocation by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_allocation(
        &mut self,
        allocation_id: i64,
    ) -> Result<AllocationData, PersistenceError> {
        queries::allocations::get_allocation(&mut self.conn, allocation_id)
    }

    /// Lists an employee's allocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn allocations_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<AllocationData>, PersistenceError> {
        queries::allocations::allocations_for_employee(&mut self.conn, employee_id)
    }

    /// Lists a project's allocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn allocations_for_project(
        &mut self,
        project_id: i64,
    ) -> Result<Vec<AllocationData>, PersistenceError> {
        queries::allocations::allocations_for_project(&mut self.conn, project_id)
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing owner or blank description.
    pub fn create_task(
        &mut self,
        new_task: NewTask,
        assigned_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::tasks::create_task(&mut self.conn, new_task, assigned_by)
    }

    /// Completes a DUE task.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing or already-terminal task.
    pub fn complete_task(&mut self, task_id: i64, changed_by: i64) -> Result<(), PersistenceError> {
        mutations::tasks::complete_task(&mut self.conn, task_id, changed_by)
    }

    /// Fetches a task by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_task(&mut self, task_id: i64) -> Result<TaskData, PersistenceError> {
        queries::tasks::get_task(&mut self.conn, task_id)
    }

    // ========================================================================
    // Skills
    // ========================================================================

    /// Records a skill request for an employee.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing employee or duplicate request.
    pub fn request_skill(
        &mut self,
        employee_id: i64,
        skill_name: &str,
        proficiency_level: &str,
        changed_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::skills::request_skill(
            &mut self.conn,
            employee_id,
            skill_name,
            proficiency_level,
            changed_by,
        )
    }

    /// Approves a pending skill request.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing or already-approved request.
    pub fn approve_skill(
        &mut self,
        employee_skill_id: i64,
        approved_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::skills::approve_skill(&mut self.conn, employee_skill_id, approved_by)
    }

    /// Fetches a skill request by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_employee_skill(
        &mut self,
        employee_skill_id: i64,
    ) -> Result<EmployeeSkillData, PersistenceError> {
        queries::skills::get_employee_skill(&mut self.conn, employee_skill_id)
    }

    /// Lists an employee's skill links.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn skills_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<EmployeeSkillData>, PersistenceError> {
        queries::skills::skills_for_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Resource demands
    // ========================================================================

    /// Records a staffing demand against a project the requester manages.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing project, a blank role, or a project
    /// the requester does not manage.
    pub fn create_demand(
        &mut self,
        new_demand: NewDemand,
        requested_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::demands::create_demand(&mut self.conn, new_demand, requested_by)
    }

    /// Fetches a demand by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if missing.
    pub fn get_demand(&mut self, demand_id: i64) -> Result<ResourceDemandData, PersistenceError> {
        queries::demands::get_demand(&mut self.conn, demand_id)
    }

    /// Lists all demands, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_demands(&mut self) -> Result<Vec<ResourceDemandData>, PersistenceError> {
        queries::demands::list_demands(&mut self.conn)
    }

    /// Lists demands raised by one requester, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn demands_for_requester(
        &mut self,
        requested_by: i64,
    ) -> Result<Vec<ResourceDemandData>, PersistenceError> {
        queries::demands::demands_for_requester(&mut self.conn, requested_by)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Loads the audit trail for one entity, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_for_entity(
        &mut self,
        entity_kind: EntityKind,
        entity_id: i64,
    ) -> Result<Vec<AuditLogData>, PersistenceError> {
        queries::audit::audit_for_entity(&mut self.conn, entity_kind, entity_id)
    }

    /// Counts all audit entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_audit_entries(&mut self) -> Result<i64, PersistenceError> {
        queries::audit::count_audit_entries(&mut self.conn)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        employee_id: i64,
        session_token: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, employee_id, session_token, expires_at)
    }

    /// Fetches a session by token.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SessionNotFound` if missing.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<SessionData, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates a session's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn touch_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::touch_session(&mut self.conn, session_token)
    }

    /// Deletes a session row.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }
}
