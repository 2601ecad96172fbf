// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Skill catalogue and skill request mutations.

use diesel::prelude::*;
use serde_json::json;
use tracing::{debug, info};
use wrm_domain::{DomainError, EntityRef, validate_required};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{employee_skills, skills};
use crate::error::PersistenceError;
use crate::mutations::audit::{append_insert, append_update};
use crate::queries;

fn get_or_create_skill(
    conn: &mut SqliteConnection,
    skill_name: &str,
) -> Result<i64, PersistenceError> {
    if let Some(skill) = queries::skills::find_skill_by_name(conn, skill_name)? {
        return Ok(skill.skill_id);
    }
    diesel::insert_into(skills::table)
        .values(skills::skill_name.eq(skill_name))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Records a skill request for an employee.
///
/// The skill row is created on first use. A duplicate request for the
/// same (employee, skill) pair is rejected. The link starts unapproved.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee does not exist,
/// or `PersistenceError::Domain` on a blank skill name or a duplicate
/// request.
pub fn request_skill(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_name: &str,
    proficiency_level: &str,
    changed_by: i64,
) -> Result<i64, PersistenceError> {
    validate_required("skill_name", skill_name)?;
    validate_required("proficiency_level", proficiency_level)?;

    debug!(employee_id, skill_name, "Requesting skill");

    conn.immediate_transaction(|conn| {
        queries::employees::get_employee(conn, employee_id)?;
        let skill_id = get_or_create_skill(conn, skill_name)?;

        if queries::skills::employee_skill_exists(conn, employee_id, skill_id)? {
            return Err(PersistenceError::Domain(DomainError::Validation(format!(
                "Skill already requested: {skill_name}"
            ))));
        }

        diesel::insert_into(employee_skills::table)
            .values((
                employee_skills::employee_id.eq(employee_id),
                employee_skills::skill_id.eq(skill_id),
                employee_skills::proficiency_level.eq(proficiency_level),
            ))
            .execute(conn)?;

        let employee_skill_id = get_last_insert_rowid(conn)?;
        append_insert(
            conn,
            EntityRef::EmployeeSkill(employee_skill_id),
            changed_by,
            json!({
                "employee_id": employee_id,
                "skill_id": skill_id,
                "skill_name": skill_name,
                "proficiency_level": proficiency_level,
            }),
        )?;

        info!(employee_skill_id, "Skill requested");
        Ok(employee_skill_id)
    })
}

/// Approves a pending skill request, stamping who approved it and when.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not exist,
/// or `PersistenceError::Domain` if it was already approved.
pub fn approve_skill(
    conn: &mut SqliteConnection,
    employee_skill_id: i64,
    approved_by: i64,
) -> Result<(), PersistenceError> {
    debug!(employee_skill_id, approved_by, "Approving skill request");

    conn.immediate_transaction(|conn| {
        let current = queries::skills::get_employee_skill(conn, employee_skill_id)?;
        if current.approved_by.is_some() {
            return Err(PersistenceError::Domain(DomainError::Validation(
                String::from("Skill request already approved"),
            )));
        }

        diesel::update(employee_skills::table)
            .filter(employee_skills::employee_skill_id.eq(employee_skill_id))
            .set((
                employee_skills::approved_by.eq(Some(approved_by)),
                employee_skills::approved_at.eq(diesel::dsl::sql::<
                    diesel::sql_types::Nullable<diesel::sql_types::Text>,
                >("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        append_update(
            conn,
            EntityRef::EmployeeSkill(employee_skill_id),
            approved_by,
            json!({ "approved_by": approved_by }),
        )?;
        Ok(())
    })
}
