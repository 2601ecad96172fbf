// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource demand mutations.
//!
//! A demand is a manager's request for additional staffing on a project
//! they manage. Demands start PENDING and are fulfilled out of band by
//! HR creating allocations.

use diesel::prelude::*;
use serde_json::json;
use time::Date;
use tracing::{debug, info};
use wrm_domain::{DomainError, EntityRef, validate_required};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::resource_demands;
use crate::error::PersistenceError;
use crate::mutations::audit::append_insert;
use crate::queries;

/// The status every demand is created with.
pub const DEMAND_STATUS_PENDING: &str = "PENDING";

/// Field values for a new resource demand.
#[derive(Debug, Clone)]
pub struct NewDemand {
    pub project_id: i64,
    pub role_required: String,
    /// Free-form skill names, comma separated.
    pub skills_required: Option<String>,
    pub start_date: Date,
}

/// Records a staffing demand against a project the requester manages.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist,
/// or `PersistenceError::Domain` on a blank role or a project the
/// requester does not manage.
pub fn create_demand(
    conn: &mut SqliteConnection,
    new_demand: NewDemand,
    requested_by: i64,
) -> Result<i64, PersistenceError> {
    validate_required("role_required", &new_demand.role_required)?;

    debug!(
        project_id = new_demand.project_id,
        requested_by, "Creating resource demand"
    );

    conn.immediate_transaction(|conn| {
        let project = queries::projects::get_project(conn, new_demand.project_id)?;
        if project.manager_id != Some(requested_by) {
            return Err(PersistenceError::Domain(DomainError::Forbidden(
                String::from("Cannot request resources for projects you do not manage"),
            )));
        }

        diesel::insert_into(resource_demands::table)
            .values((
                resource_demands::project_id.eq(new_demand.project_id),
                resource_demands::role_required.eq(&new_demand.role_required),
                resource_demands::skills_required.eq(new_demand.skills_required.as_deref()),
                resource_demands::start_date.eq(new_demand.start_date.to_string()),
                resource_demands::status.eq(DEMAND_STATUS_PENDING),
                resource_demands::requested_by.eq(requested_by),
            ))
            .execute(conn)?;

        let demand_id = get_last_insert_rowid(conn)?;
        append_insert(
            conn,
            EntityRef::ResourceDemand(demand_id),
            requested_by,
            json!({
                "project_id": new_demand.project_id,
                "role_required": new_demand.role_required,
                "skills_required": new_demand.skills_required,
                "start_date": new_demand.start_date.to_string(),
                "status": DEMAND_STATUS_PENDING,
            }),
        )?;

        info!(demand_id, "Resource demand created");
        Ok(demand_id)
    })
}
