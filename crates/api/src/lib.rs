// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Workforce Resource Manager.
//!
//! Handlers here are transport-agnostic: they take a persistence handle,
//! a request DTO, and an authenticated actor, and return a response DTO
//! or an [`ApiError`]. The HTTP server wraps them; tests call them
//! directly.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    allocations_for_employee, allocations_for_project, approve_skill, audit_for_entity,
    close_project, complete_task, create_allocation, create_demand, create_employee,
    create_project, create_task, exit_employee, get_employee, get_project, get_task,
    list_demands, list_employees, list_projects, login, logout, request_skill,
    skills_for_employee, transfer_allocation, update_allocation, update_employee, update_project,
};
pub use request_response::{
    AuditEntryResponse, CloseProjectRequest, CloseProjectResponse, CreateAllocationRequest,
    CreateAllocationResponse, CreateDemandRequest, CreateDemandResponse, CreateEmployeeRequest,
    CreateEmployeeResponse, CreateProjectRequest,
    CreateProjectResponse, CreateTaskRequest, CreateTaskResponse, ExitEmployeeRequest,
    ExitEmployeeResponse, LoginRequest, LoginResponse, RequestSkillRequest, RequestSkillResponse,
    TransferAllocationRequest, TransferAllocationResponse, UpdateAllocationRequest,
    UpdateEmployeeRequest, UpdateProjectRequest,
};
