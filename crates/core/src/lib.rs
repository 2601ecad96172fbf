// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Consistency and lifecycle engines.
//!
//! The engines here are pure: each takes a snapshot of the rows it cares
//! about and returns a plan describing the row changes and audit entries
//! a mutation should make. The persistence layer executes plans inside a
//! single transaction, holding the write lock across the snapshot read
//! and the writes.

mod allocation;
mod error;
mod lifecycle;
mod project;
mod records;

#[cfg(test)]
mod tests;

pub use allocation::{
    AllocationPatch, AllocationRequest, CreateAllocationPlan, NewAllocation,
    TransferAllocationPlan, UpdateAllocationPlan, plan_create, plan_transfer, plan_update,
};
pub use error::CoreError;
pub use lifecycle::{CloseProjectPlan, ExitEmployeePlan, plan_close, plan_exit};
pub use project::{ProjectPatch, UpdateProjectPlan, plan_update_project};
pub use records::{
    AllocationRecord, EmployeeRecord, PendingAudit, ProjectRecord, TaskRecord,
};
