// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::{EmployeeSkillData, SkillData};
use crate::diesel_schema::{employee_skills, skills};
use crate::error::PersistenceError;

/// Fetches a skill by name, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_skill_by_name(
    conn: &mut SqliteConnection,
    skill_name: &str,
) -> Result<Option<SkillData>, PersistenceError> {
    Ok(skills::table
        .filter(skills::skill_name.eq(skill_name))
        .first::<SkillData>(conn)
        .optional()?)
}

/// Fetches an employee-skill link by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such link exists.
pub fn get_employee_skill(
    conn: &mut SqliteConnection,
    employee_skill_id: i64,
) -> Result<EmployeeSkillData, PersistenceError> {
    employee_skills::table
        .filter(employee_skills::employee_skill_id.eq(employee_skill_id))
        .first::<EmployeeSkillData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Skill request not found: {employee_skill_id}"))
            }
            _ => e.into(),
        })
}

/// Checks whether an employee already has (or has requested) a skill.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn employee_skill_exists(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = employee_skills::table
        .filter(employee_skills::employee_id.eq(employee_id))
        .filter(employee_skills::skill_id.eq(skill_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists skill links for an employee.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn skills_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<EmployeeSkillData>, PersistenceError> {
    Ok(employee_skills::table
        .filter(employee_skills::employee_id.eq(employee_id))
        .order(employee_skills::employee_skill_id.asc())
        .load::<EmployeeSkillData>(conn)?)
}
