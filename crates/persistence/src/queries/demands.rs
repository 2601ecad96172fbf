// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::data_models::ResourceDemandData;
use crate::diesel_schema::resource_demands;
use crate::error::PersistenceError;

/// Fetches a demand by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such demand exists.
pub fn get_demand(
    conn: &mut SqliteConnection,
    demand_id: i64,
) -> Result<ResourceDemandData, PersistenceError> {
    resource_demands::table
        .filter(resource_demands::demand_id.eq(demand_id))
        .first::<ResourceDemandData>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Demand not found: {demand_id}"))
            }
            _ => e.into(),
        })
}

/// Lists all demands, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_demands(
    conn: &mut SqliteConnection,
) -> Result<Vec<ResourceDemandData>, PersistenceError> {
    Ok(resource_demands::table
        .order(resource_demands::demand_id.desc())
        .load::<ResourceDemandData>(conn)?)
}

/// Lists demands raised by one requester, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn demands_for_requester(
    conn: &mut SqliteConnection,
    requested_by: i64,
) -> Result<Vec<ResourceDemandData>, PersistenceError> {
    Ok(resource_demands::table
        .filter(resource_demands::requested_by.eq(requested_by))
        .order(resource_demands::demand_id.desc())
        .load::<ResourceDemandData>(conn)?)
}
