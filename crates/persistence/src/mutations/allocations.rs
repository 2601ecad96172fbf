// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation mutations.
//!
//! Each mutation takes the write lock up front (`immediate_transaction`),
//! loads the planning snapshot, asks the allocation engine for a plan,
//! and executes it. The capacity read and the write are therefore
//! serialized against concurrent allocation writers.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use time::Date;
use tracing::{debug, info};
use wrm::{AllocationPatch, AllocationRequest, NewAllocation};
use wrm_domain::AllocationSpan;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::project_allocations;
use crate::error::PersistenceError;
use crate::mutations::audit::append_pending;
use crate::queries;

fn load_spans(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<AllocationSpan>, PersistenceError> {
    queries::allocations::allocations_for_employee(conn, employee_id)?
        .iter()
        .map(|data| Ok(data.to_record()?.span()))
        .collect()
}

fn percentage_column(percentage: u32) -> Result<i32, PersistenceError> {
    i32::try_from(percentage)
        .map_err(|_| PersistenceError::Other(format!("Percentage out of range: {percentage}")))
}

fn insert_allocation_row(
    conn: &mut SqliteConnection,
    allocation: &NewAllocation,
    assigned_by: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(project_allocations::table)
        .values((
            project_allocations::employee_id.eq(allocation.employee_id),
            project_allocations::project_id.eq(allocation.project_id),
            project_allocations::role_label.eq(&allocation.role_label),
            project_allocations::allocation_percentage
                .eq(percentage_column(allocation.percentage)?),
            project_allocations::start_date.eq(allocation.window.start.to_string()),
            project_allocations::end_date.eq(allocation.window.end.map(|d| d.to_string())),
            project_allocations::is_billable.eq(i32::from(allocation.is_billable)),
            project_allocations::is_critical.eq(i32::from(allocation.is_critical)),
            project_allocations::assigned_by.eq(assigned_by),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Creates an allocation, enforcing the capacity cap.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee or project does
/// not exist, or `PersistenceError::Domain` if the engine rejects the
/// request. Either way the transaction rolls back completely.
pub fn create_allocation(
    conn: &mut SqliteConnection,
    request: AllocationRequest,
    assigned_by: i64,
) -> Result<i64, PersistenceError> {
    info!(
        employee_id = request.employee_id,
        project_id = request.project_id,
        percentage = request.percentage,
        "Creating allocation"
    );

    conn.immediate_transaction(|conn| {
        queries::employees::get_employee(conn, request.employee_id)?;
        queries::projects::get_project(conn, request.project_id)?;

        let existing = load_spans(conn, request.employee_id)?;
        let plan = wrm::plan_create(&existing, request)?;

        let allocation_id = insert_allocation_row(conn, &plan.allocation, assigned_by)?;
        append_pending(conn, &plan.audit, Some(allocation_id), assigned_by)?;

        info!(allocation_id, "Allocation created");
        Ok(allocation_id)
    })
}

/// Updates an allocation in place, re-running the capacity check over
/// the new window with the allocation excluded from its own sum.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the allocation does not
/// exist, or `PersistenceError::Domain` if the engine rejects the patch.
pub fn update_allocation(
    conn: &mut SqliteConnection,
    allocation_id: i64,
    patch: AllocationPatch,
    changed_by: i64,
) -> Result<(), PersistenceError> {
    debug!(allocation_id, "Updating allocation");

    conn.immediate_transaction(|conn| {
        let current = queries::allocations::get_allocation(conn, allocation_id)?.to_record()?;
        let existing = load_spans(conn, current.employee_id)?;
        let plan = wrm::plan_update(&existing, &current, patch)?;

        diesel::update(project_allocations::table)
            .filter(project_allocations::allocation_id.eq(allocation_id))
            .set((
                project_allocations::role_label.eq(&plan.updated.role_label),
                project_allocations::allocation_percentage
                    .eq(percentage_column(plan.updated.percentage)?),
                project_allocations::start_date.eq(plan.updated.window.start.to_string()),
                project_allocations::end_date.eq(plan.updated.window.end.map(|d| d.to_string())),
                project_allocations::is_billable.eq(i32::from(plan.updated.is_billable)),
                project_allocations::is_critical.eq(i32::from(plan.updated.is_critical)),
                project_allocations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        append_pending(conn, &plan.audit, None, changed_by)?;
        Ok(())
    })
}

/// Transfers the tail of an allocation to another project.
///
/// Truncates the old allocation at the transfer date and inserts its
/// continuation on the target project, atomically. Returns the id of
/// the replacement allocation.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the allocation or target
/// project does not exist, or `PersistenceError::Domain` if the
/// transfer date is outside the allocation's window.
pub fn transfer_allocation(
    conn: &mut SqliteConnection,
    allocation_id: i64,
    target_project_id: i64,
    transfer_date: Date,
    changed_by: i64,
) -> Result<i64, PersistenceError> {
    info!(
        allocation_id,
        target_project_id,
        transfer_date = %transfer_date,
        "Transferring allocation"
    );

    conn.immediate_transaction(|conn| {
        let current = queries::allocations::get_allocation(conn, allocation_id)?.to_record()?;
        queries::projects::get_project(conn, target_project_id)?;

        let plan = wrm::plan_transfer(&current, target_project_id, transfer_date)?;

        diesel::update(project_allocations::table)
            .filter(project_allocations::allocation_id.eq(allocation_id))
            .set((
                project_allocations::end_date.eq(Some(plan.truncate_to.to_string())),
                project_allocations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        let replacement_id = insert_allocation_row(conn, &plan.replacement, changed_by)?;

        append_pending(conn, &plan.truncate_audit, None, changed_by)?;
        append_pending(conn, &plan.replacement_audit, Some(replacement_id), changed_by)?;

        info!(replacement_id, "Allocation transferred");
        Ok(replacement_id)
    })
}
