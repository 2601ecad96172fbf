// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::AllocationData;
use crate::diesel_schema::project_allocations;
use crate::error::PersistenceError;

/// Fetches an allocation by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such allocation exists.
pub fn get_allocation(
    conn: &mut SqliteConnection,
    allocation_id: i64,
) -> Result<AllocationData, PersistenceError> {
    project_allocations::table
        .filter(project_allocations::allocation_id.eq(allocation_id))
        .first::<AllocationData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Allocation not found: {allocation_id}"))
            }
            _ => e.into(),
        })
}

/// Loads all allocations for an employee.
///
/// This is the snapshot the capacity check runs over; callers must hold
/// the write transaction across this read and the subsequent write.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn allocations_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<AllocationData>, PersistenceError> {
    Ok(project_allocations::table
        .filter(project_allocations::employee_id.eq(employee_id))
        .order(project_allocations::allocation_id.asc())
        .load::<AllocationData>(conn)?)
}

/// Loads all allocations for a project, for the closure cascade.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn allocations_for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<AllocationData>, PersistenceError> {
    Ok(project_allocations::table
        .filter(project_allocations::project_id.eq(project_id))
        .order(project_allocations::allocation_id.asc())
        .load::<AllocationData>(conn)?)
}
