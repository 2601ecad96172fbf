// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The lifecycle transition engine.
//!
//! Employee exits and project closures cascade onto dependent rows:
//! open or future-dated allocations are truncated to the lifecycle date,
//! and (for exits) the employee's outstanding tasks are cancelled. The
//! whole cascade is one plan, executed in one transaction.
//!
//! Both plans are idempotent by construction: a retry with the same date
//! finds nothing left to truncate or cancel and reports zero counts.

use crate::error::CoreError;
use crate::records::{AllocationRecord, EmployeeRecord, PendingAudit, ProjectRecord, TaskRecord};
use serde_json::json;
use time::Date;
use wrm_domain::{
    DomainError, EmployeeStatus, EntityKind, ProjectStatus, TaskStatus, validate_exit_date,
};

/// A planned employee exit with its cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitEmployeePlan {
    pub employee_id: i64,
    pub exited_on: Date,
    /// Allocations whose end date moves to `exited_on`.
    pub allocations_to_truncate: Vec<i64>,
    /// DUE tasks owned by the employee, to be cancelled.
    pub tasks_to_cancel: Vec<i64>,
    pub audit: PendingAudit,
}

/// A planned project closure with its cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseProjectPlan {
    pub project_id: i64,
    pub status: ProjectStatus,
    pub closed_on: Date,
    /// Allocations whose end date moves to `closed_on`.
    pub allocations_to_truncate: Vec<i64>,
    pub audit: PendingAudit,
}

/// Returns the ids of allocations that extend past `cutoff` (open-ended
/// counts as past everything).
fn allocations_past(allocations: &[AllocationRecord], cutoff: Date) -> Vec<i64> {
    allocations
        .iter()
        .filter(|alloc| alloc.window.end.is_none_or(|end| end > cutoff))
        .map(|alloc| alloc.allocation_id)
        .collect()
}

/// Plans an employee exit.
///
/// `allocations` and `tasks` are the employee's current allocations and
/// owned tasks. Already-truncated allocations and already-terminal tasks
/// are skipped, which makes a retry with the same date a no-op.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if `exited_on` precedes the
/// employee's join date.
pub fn plan_exit(
    employee: &EmployeeRecord,
    exited_on: Date,
    allocations: &[AllocationRecord],
    tasks: &[TaskRecord],
) -> Result<ExitEmployeePlan, CoreError> {
    validate_exit_date(employee.joined_on, exited_on)?;

    let allocations_to_truncate = allocations_past(allocations, exited_on);
    let tasks_to_cancel: Vec<i64> = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Due)
        .map(|task| task.task_id)
        .collect();

    let audit = PendingAudit::for_update(
        EntityKind::Employee,
        employee.employee_id,
        json!({
            "status": EmployeeStatus::Exited.as_str(),
            "exited_on": exited_on.to_string(),
            "allocations_ended": allocations_to_truncate.len(),
            "tasks_cancelled": tasks_to_cancel.len(),
        }),
    );

    Ok(ExitEmployeePlan {
        employee_id: employee.employee_id,
        exited_on,
        allocations_to_truncate,
        tasks_to_cancel,
        audit,
    })
}

/// Plans a project closure.
///
/// `requested_status` must be one of the two terminal statuses.
/// `allocations` are the project's current allocations; only those
/// extending past `closed_on` are touched, so a retry is a no-op.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the requested status is not
/// terminal.
pub fn plan_close(
    project: &ProjectRecord,
    requested_status: ProjectStatus,
    closed_on: Date,
    allocations: &[AllocationRecord],
) -> Result<CloseProjectPlan, CoreError> {
    if !requested_status.is_terminal() {
        return Err(CoreError::DomainViolation(DomainError::Validation(
            String::from("status must be COMPLETED or CANCELLED"),
        )));
    }

    let allocations_to_truncate = allocations_past(allocations, closed_on);

    let audit = PendingAudit::for_update(
        EntityKind::Project,
        project.project_id,
        json!({
            "status": requested_status.as_str(),
            "closed_on": closed_on.to_string(),
            "allocations_ended": allocations_to_truncate.len(),
        }),
    );

    Ok(CloseProjectPlan {
        project_id: project.project_id,
        status: requested_status,
        closed_on,
        allocations_to_truncate,
        audit,
    })
}
