// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations, including the exit cascade.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde_json::json;
use time::Date;
use tracing::{debug, info};
use wrm_domain::{
    DomainError, EmployeeStatus, EntityRef, Role, TaskStatus, validate_email, validate_required,
};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{employees, project_allocations, tasks};
use crate::error::PersistenceError;
use crate::mutations::audit::{append_insert, append_pending, append_update};
use crate::queries;

/// Field values for a new employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    /// Plain-text password; hashed with bcrypt before storage.
    pub password: String,
    pub role: Role,
    pub department: Option<String>,
    pub joined_on: Date,
}

/// Partial changes to an existing employee. The employee code is
/// immutable and deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department: Option<String>,
}

/// The effects of an employee exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub allocations_ended: usize,
    pub tasks_cancelled: usize,
}

/// Creates an employee with status ACTIVE.
///
/// # Errors
///
/// Returns `PersistenceError::Domain` if a field fails validation or the
/// employee code or email is already taken.
pub fn create_employee(
    conn: &mut SqliteConnection,
    new_employee: NewEmployee,
    changed_by: i64,
) -> Result<i64, PersistenceError> {
    validate_required("employee_code", &new_employee.employee_code)?;
    validate_required("full_name", &new_employee.full_name)?;
    validate_email(&new_employee.email)?;
    validate_required("password", &new_employee.password)?;

    info!(
        employee_code = %new_employee.employee_code,
        role = new_employee.role.as_str(),
        "Creating employee"
    );

    let password_hash = bcrypt::hash(&new_employee.password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    conn.immediate_transaction(|conn| {
        if queries::employees::employee_code_exists(conn, &new_employee.employee_code)? {
            return Err(PersistenceError::Domain(DomainError::Validation(format!(
                "employee_code already exists: {}",
                new_employee.employee_code
            ))));
        }
        if queries::employees::email_exists(conn, &new_employee.email)? {
            return Err(PersistenceError::Domain(DomainError::Validation(format!(
                "email already exists: {}",
                new_employee.email
            ))));
        }

        diesel::insert_into(employees::table)
            .values((
                employees::employee_code.eq(&new_employee.employee_code),
                employees::full_name.eq(&new_employee.full_name),
                employees::email.eq(&new_employee.email),
                employees::password_hash.eq(&password_hash),
                employees::role.eq(new_employee.role.as_str()),
                employees::department.eq(&new_employee.department),
                employees::status.eq(EmployeeStatus::Active.as_str()),
                employees::joined_on.eq(new_employee.joined_on.to_string()),
            ))
            .execute(conn)?;

        let employee_id = get_last_insert_rowid(conn)?;
        append_insert(
            conn,
            EntityRef::Employee(employee_id),
            changed_by,
            json!({
                "employee_code": new_employee.employee_code,
                "full_name": new_employee.full_name,
                "email": new_employee.email,
                "role": new_employee.role.as_str(),
                "department": new_employee.department,
                "status": EmployeeStatus::Active.as_str(),
                "joined_on": new_employee.joined_on.to_string(),
            }),
        )?;

        info!(employee_id, "Employee created");
        Ok(employee_id)
    })
}

/// Updates an employee's mutable fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee does not exist,
/// or `PersistenceError::Domain` on validation failure.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    patch: EmployeePatch,
    changed_by: i64,
) -> Result<(), PersistenceError> {
    debug!(employee_id, "Updating employee");

    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(name) = &patch.full_name {
        validate_required("full_name", name)?;
    }

    conn.immediate_transaction(|conn| {
        let current = queries::employees::get_employee(conn, employee_id)?;

        if let Some(email) = &patch.email
            && *email != current.email
            && queries::employees::email_exists(conn, email)?
        {
            return Err(PersistenceError::Domain(DomainError::Validation(format!(
                "email already exists: {email}"
            ))));
        }

        let full_name = patch.full_name.clone().unwrap_or(current.full_name);
        let email = patch.email.clone().unwrap_or(current.email);
        let role = patch.role.map_or(current.role, |r| r.as_str().to_string());
        let department = match patch.department.clone() {
            Some(dept) => Some(dept),
            None => current.department,
        };

        diesel::update(employees::table)
            .filter(employees::employee_id.eq(employee_id))
            .set((
                employees::full_name.eq(&full_name),
                employees::email.eq(&email),
                employees::role.eq(&role),
                employees::department.eq(&department),
                employees::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        let mut fields = serde_json::Map::new();
        if let Some(value) = &patch.full_name {
            fields.insert(String::from("full_name"), json!(value));
        }
        if let Some(value) = &patch.email {
            fields.insert(String::from("email"), json!(value));
        }
        if let Some(value) = patch.role {
            fields.insert(String::from("role"), json!(value.as_str()));
        }
        if let Some(value) = &patch.department {
            fields.insert(String::from("department"), json!(value));
        }
        append_update(
            conn,
            EntityRef::Employee(employee_id),
            changed_by,
            serde_json::Value::Object(fields),
        )?;
        Ok(())
    })
}

/// Exits an employee: marks them EXITED, truncates their open or
/// future-dated allocations to the exit date, and cancels their DUE
/// tasks. One transaction; a retry with the same date is a no-op.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee does not exist,
/// or `PersistenceError::Domain` if the exit date precedes the join
/// date.
pub fn exit_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    exited_on: Date,
    changed_by: i64,
) -> Result<ExitOutcome, PersistenceError> {
    info!(employee_id, exited_on = %exited_on, "Exiting employee");

    conn.immediate_transaction(|conn| {
        let employee = queries::employees::get_employee(conn, employee_id)?.to_record()?;
        let allocations = queries::allocations::allocations_for_employee(conn, employee_id)?
            .iter()
            .map(crate::data_models::AllocationData::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        let owned_tasks = queries::tasks::tasks_for_owner(conn, employee_id)?
            .iter()
            .map(crate::data_models::TaskData::to_record)
            .collect::<Result<Vec<_>, _>>()?;

        let plan = wrm::plan_exit(&employee, exited_on, &allocations, &owned_tasks)?;

        diesel::update(employees::table)
            .filter(employees::employee_id.eq(employee_id))
            .set((
                employees::status.eq(EmployeeStatus::Exited.as_str()),
                employees::exited_on.eq(Some(exited_on.to_string())),
                employees::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        if !plan.allocations_to_truncate.is_empty() {
            diesel::update(project_allocations::table)
                .filter(
                    project_allocations::allocation_id.eq_any(&plan.allocations_to_truncate),
                )
                .set((
                    project_allocations::end_date.eq(Some(exited_on.to_string())),
                    project_allocations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
                ))
                .execute(conn)?;
        }

        if !plan.tasks_to_cancel.is_empty() {
            diesel::update(tasks::table)
                .filter(tasks::task_id.eq_any(&plan.tasks_to_cancel))
                .set(tasks::status.eq(TaskStatus::Cancelled.as_str()))
                .execute(conn)?;
        }

        append_pending(conn, &plan.audit, None, changed_by)?;

        let outcome = ExitOutcome {
            allocations_ended: plan.allocations_to_truncate.len(),
            tasks_cancelled: plan.tasks_to_cancel.len(),
        };
        info!(
            employee_id,
            allocations_ended = outcome.allocations_ended,
            tasks_cancelled = outcome.tasks_cancelled,
            "Employee exited"
        );
        Ok(outcome)
    })
}
