// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::EmployeeData;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Fetches an employee by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such employee exists.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<EmployeeData, PersistenceError> {
    employees::table
        .filter(employees::employee_id.eq(employee_id))
        .first::<EmployeeData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Employee not found: {employee_id}"))
            }
            _ => e.into(),
        })
}

/// Fetches an employee by email, for login.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such employee exists.
pub fn get_employee_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<EmployeeData, PersistenceError> {
    employees::table
        .filter(employees::email.eq(email))
        .first::<EmployeeData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Employee not found: {email}"))
            }
            _ => e.into(),
        })
}

/// Checks whether an employee code is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn employee_code_exists(
    conn: &mut SqliteConnection,
    employee_code: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::employee_code.eq(employee_code))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Checks whether an email is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn email_exists(conn: &mut SqliteConnection, email: &str) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::email.eq(email))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists all employees, ordered by employee code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<EmployeeData>, PersistenceError> {
    Ok(employees::table
        .order(employees::employee_code.asc())
        .load::<EmployeeData>(conn)?)
}
