// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These are distinct from the domain and persistence types. Dates cross
//! the boundary as `YYYY-MM-DD` strings and are parsed in the handlers;
//! statuses and roles cross as their canonical string forms.

use serde::{Deserialize, Serialize};

/// API request to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub employee_id: i64,
    pub role: String,
}

/// API request to create an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// One of `employee`, `project_manager`, `hr_executive`.
    pub role: String,
    pub department: Option<String>,
    pub joined_on: String,
}

/// API response for a successful employee creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEmployeeResponse {
    pub employee_id: i64,
    pub message: String,
}

/// API request to update an employee's mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// API request to exit an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct ExitEmployeeRequest {
    pub exited_on: String,
}

/// API response for a successful employee exit.
#[derive(Debug, Clone, Serialize)]
pub struct ExitEmployeeResponse {
    pub allocations_ended: usize,
    pub tasks_cancelled: usize,
    pub message: String,
}

/// API request to create a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub project_code: String,
    pub project_name: String,
    pub client_name: Option<String>,
    pub manager_id: Option<i64>,
    pub short_description: Option<String>,
    pub started_on: Option<String>,
}

/// API response for a successful project creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectResponse {
    pub project_id: i64,
    pub message: String,
}

/// API request to update a project. Absent fields are left as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub project_code: Option<String>,
    pub project_name: Option<String>,
    pub client_name: Option<String>,
    pub manager_id: Option<i64>,
    pub started_on: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub pitch_deck_url: Option<String>,
    pub github_url: Option<String>,
    pub status: Option<String>,
    pub closed_on: Option<String>,
}

/// API request to close a project with a terminal status.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseProjectRequest {
    /// `COMPLETED` or `CANCELLED`.
    pub status: String,
    pub closed_on: String,
}

/// API response for a successful project closure.
#[derive(Debug, Clone, Serialize)]
pub struct CloseProjectResponse {
    pub allocations_ended: usize,
    pub message: String,
}

/// API request to create an allocation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAllocationRequest {
    pub employee_id: i64,
    pub project_id: i64,
    pub role_label: String,
    pub allocation_percentage: i64,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_billable: bool,
    #[serde(default)]
    pub is_critical: bool,
}

/// API response for a successful allocation creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAllocationResponse {
    pub allocation_id: i64,
    pub message: String,
}

/// API request to update an allocation. Absent fields are left as is;
/// `clear_end_date` makes the allocation open-ended.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAllocationRequest {
    pub role_label: Option<String>,
    pub allocation_percentage: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub clear_end_date: bool,
    pub is_billable: Option<bool>,
    pub is_critical: Option<bool>,
}

/// API request to transfer an allocation to another project.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferAllocationRequest {
    pub target_project_id: i64,
    pub transfer_date: String,
}

/// API response for a successful allocation transfer.
#[derive(Debug, Clone, Serialize)]
pub struct TransferAllocationResponse {
    pub new_allocation_id: i64,
    pub message: String,
}

/// API request to create a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub owner_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub description: String,
    pub due_on: Option<String>,
}

/// API response for a successful task creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskResponse {
    pub task_id: i64,
    pub message: String,
}

/// API request to record a skill request.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSkillRequest {
    pub employee_id: i64,
    pub skill_name: String,
    pub proficiency_level: String,
}

/// API response for a successful skill request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSkillResponse {
    pub employee_skill_id: i64,
    pub message: String,
}

/// API request to raise a staffing demand for a managed project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDemandRequest {
    pub project_id: i64,
    pub role_required: String,
    pub skills_required: Option<String>,
    pub start_date: String,
}

/// API response for a successful demand creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDemandResponse {
    pub demand_id: i64,
    pub message: String,
}

/// One audit trail entry, with its changed fields decoded from JSON.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntryResponse {
    pub audit_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub operation: String,
    pub changed_by: i64,
    pub changed_at: String,
    pub changed_fields: serde_json::Value,
}
