// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operation handlers.
//!
//! Every handler enforces authorization first, translates the request
//! DTO into domain and persistence types, delegates to the persistence
//! layer, and translates any error into an [`ApiError`]. Handlers never
//! leak domain or persistence errors directly.

use time::Date;
use tracing::info;
use wrm::{AllocationPatch, AllocationRequest, ProjectPatch};
use wrm_domain::{EntityKind, EntityRef, ProjectStatus, Role, parse_date};
use wrm_persistence::{
    AllocationData, EmployeeData, EmployeeSkillData, NewDemand, NewEmployee, NewProject, NewTask,
    Persistence, ProjectData, ResourceDemandData, TaskData,
};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AuditEntryResponse, CloseProjectRequest, CloseProjectResponse, CreateAllocationRequest,
    CreateAllocationResponse, CreateDemandRequest, CreateDemandResponse, CreateEmployeeRequest,
    CreateEmployeeResponse, CreateProjectRequest,
    CreateProjectResponse, CreateTaskRequest, CreateTaskResponse, ExitEmployeeRequest,
    ExitEmployeeResponse, LoginRequest, LoginResponse, RequestSkillRequest, RequestSkillResponse,
    TransferAllocationRequest, TransferAllocationResponse, UpdateAllocationRequest,
    UpdateEmployeeRequest, UpdateProjectRequest,
};

fn parse_date_field(value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(translate_domain_error)
}

fn parse_optional_date_field(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value.map(parse_date_field).transpose()
}

fn parse_role_field(value: &str) -> Result<Role, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn parse_status_field(value: &str) -> Result<ProjectStatus, ApiError> {
    value.parse().map_err(translate_domain_error)
}

// ============================================================================
// Sessions
// ============================================================================

/// Authenticates an employee and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are invalid or the employee has
/// exited.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, actor) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;
    Ok(LoginResponse {
        session_token,
        employee_id: actor.id,
        role: actor.role.as_str().to_string(),
    })
}

/// Closes a session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

// ============================================================================
// Employees
// ============================================================================

/// Creates an employee. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, a field fails validation, or
/// the employee code or email is already taken.
pub fn create_employee(
    persistence: &mut Persistence,
    request: CreateEmployeeRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateEmployeeResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(actor)?;

    let role = parse_role_field(&request.role)?;
    let joined_on = parse_date_field(&request.joined_on)?;
    let employee_code = request.employee_code.clone();

    let employee_id = persistence
        .create_employee(
            NewEmployee {
                employee_code: request.employee_code,
                full_name: request.full_name,
                email: request.email,
                password: request.password,
                role,
                department: request.department,
                joined_on,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    Ok(CreateEmployeeResponse {
        employee_id,
        message: format!("Employee '{employee_code}' created"),
    })
}

/// Updates an employee's mutable fields. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the employee is missing, or
/// a field fails validation.
pub fn update_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    request: UpdateEmployeeRequest,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_employees(actor)?;

    let role = request
        .role
        .as_deref()
        .map(parse_role_field)
        .transpose()?;

    persistence
        .update_employee(
            employee_id,
            wrm_persistence::EmployeePatch {
                full_name: request.full_name,
                email: request.email,
                role,
                department: request.department,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)
}

/// Exits an employee, cascading onto allocations and tasks. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the employee is missing, or
/// the exit date precedes the join date.
pub fn exit_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &ExitEmployeeRequest,
    actor: &AuthenticatedActor,
) -> Result<ExitEmployeeResponse, ApiError> {
    AuthorizationService::authorize_exit_employee(actor)?;

    let exited_on = parse_date_field(&request.exited_on)?;
    let outcome = persistence
        .exit_employee(employee_id, exited_on, actor.id)
        .map_err(translate_persistence_error)?;

    info!(
        employee_id,
        allocations_ended = outcome.allocations_ended,
        tasks_cancelled = outcome.tasks_cancelled,
        "Employee exited via API"
    );
    Ok(ExitEmployeeResponse {
        allocations_ended: outcome.allocations_ended,
        tasks_cancelled: outcome.tasks_cancelled,
        message: format!(
            "Employee exited; {} allocation(s) ended, {} task(s) cancelled",
            outcome.allocations_ended, outcome.tasks_cancelled
        ),
    })
}

/// Fetches an employee by id.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn get_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<EmployeeData, ApiError> {
    persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)
}

/// Lists all employees.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employees(persistence: &mut Persistence) -> Result<Vec<EmployeeData>, ApiError> {
    persistence
        .list_employees()
        .map_err(translate_persistence_error)
}

// ============================================================================
// Projects
// ============================================================================

/// Creates a project in DRAFT. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, a field fails validation, or
/// the project code is already taken.
pub fn create_project(
    persistence: &mut Persistence,
    request: CreateProjectRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateProjectResponse, ApiError> {
    AuthorizationService::authorize_create_project(actor)?;

    let started_on = parse_optional_date_field(request.started_on.as_deref())?;
    let project_code = request.project_code.clone();

    let project_id = persistence
        .create_project(
            NewProject {
                project_code: request.project_code,
                project_name: request.project_name,
                client_name: request.client_name,
                manager_id: request.manager_id,
                short_description: request.short_description,
                started_on,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    Ok(CreateProjectResponse {
        project_id,
        message: format!("Project '{project_code}' created"),
    })
}

/// Applies a permission-checked patch to a project. Managers and HR.
///
/// # Errors
///
/// Returns an error if the actor is a plain employee, the project is
/// missing, or the update engine rejects the patch for this actor.
pub fn update_project(
    persistence: &mut Persistence,
    project_id: i64,
    request: UpdateProjectRequest,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_update_project(actor)?;

    let status = request
        .status
        .as_deref()
        .map(parse_status_field)
        .transpose()?;
    let started_on = parse_optional_date_field(request.started_on.as_deref())?;
    let closed_on = parse_optional_date_field(request.closed_on.as_deref())?;

    persistence
        .update_project(
            project_id,
            ProjectPatch {
                project_code: request.project_code,
                project_name: request.project_name,
                client_name: request.client_name,
                manager_id: request.manager_id,
                started_on,
                short_description: request.short_description,
                long_description: request.long_description,
                pitch_deck_url: request.pitch_deck_url,
                github_url: request.github_url,
                status,
                closed_on,
            },
            actor.id,
            actor.role,
        )
        .map_err(translate_persistence_error)
}

/// Closes a project with a terminal status. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the project is missing, or
/// the status is not terminal.
pub fn close_project(
    persistence: &mut Persistence,
    project_id: i64,
    request: &CloseProjectRequest,
    actor: &AuthenticatedActor,
) -> Result<CloseProjectResponse, ApiError> {
    AuthorizationService::authorize_close_project(actor)?;

    let status = parse_status_field(&request.status)?;
    let closed_on = parse_date_field(&request.closed_on)?;

    let outcome = persistence
        .close_project(project_id, status, closed_on, actor.id)
        .map_err(translate_persistence_error)?;

    Ok(CloseProjectResponse {
        allocations_ended: outcome.allocations_ended,
        message: format!(
            "Project closed as {}; {} allocation(s) ended",
            status.as_str(),
            outcome.allocations_ended
        ),
    })
}

/// Fetches a project by id.
///
/// # Errors
///
/// Returns an error if the project does not exist.
pub fn get_project(
    persistence: &mut Persistence,
    project_id: i64,
) -> Result<ProjectData, ApiError> {
    persistence
        .get_project(project_id)
        .map_err(translate_persistence_error)
}

/// Lists all projects.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_projects(persistence: &mut Persistence) -> Result<Vec<ProjectData>, ApiError> {
    persistence
        .list_projects()
        .map_err(translate_persistence_error)
}

// ============================================================================
// Allocations
// ============================================================================

/// Creates an allocation, enforcing the capacity cap. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the employee or project is
/// missing, or the allocation would push the employee past 100%.
pub fn create_allocation(
    persistence: &mut Persistence,
    request: CreateAllocationRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateAllocationResponse, ApiError> {
    AuthorizationService::authorize_manage_allocations(actor)?;

    let start_date = parse_date_field(&request.start_date)?;
    let end_date = parse_optional_date_field(request.end_date.as_deref())?;

    let allocation_id = persistence
        .create_allocation(
            AllocationRequest {
                employee_id: request.employee_id,
                project_id: request.project_id,
                role_label: request.role_label,
                percentage: request.allocation_percentage,
                start_date,
                end_date,
                is_billable: request.is_billable,
                is_critical: request.is_critical,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    Ok(CreateAllocationResponse {
        allocation_id,
        message: String::from("Allocation created"),
    })
}

/// Updates an allocation, re-checking capacity over the new window. HR
/// only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the allocation is missing,
/// or the change would push the employee past 100%.
pub fn update_allocation(
    persistence: &mut Persistence,
    allocation_id: i64,
    request: UpdateAllocationRequest,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_allocations(actor)?;

    let start_date = parse_optional_date_field(request.start_date.as_deref())?;
    let end_date = if request.clear_end_date {
        Some(None)
    } else {
        parse_optional_date_field(request.end_date.as_deref())?.map(Some)
    };

    persistence
        .update_allocation(
            allocation_id,
            AllocationPatch {
                role_label: request.role_label,
                percentage: request.allocation_percentage,
                start_date,
                end_date,
                is_billable: request.is_billable,
                is_critical: request.is_critical,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)
}

/// Transfers the tail of an allocation to another project. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the allocation or target
/// project is missing, or the transfer date is outside the window.
pub fn transfer_allocation(
    persistence: &mut Persistence,
    allocation_id: i64,
    request: &TransferAllocationRequest,
    actor: &AuthenticatedActor,
) -> Result<TransferAllocationResponse, ApiError> {
    AuthorizationService::authorize_manage_allocations(actor)?;

    let transfer_date = parse_date_field(&request.transfer_date)?;
    let new_allocation_id = persistence
        .transfer_allocation(
            allocation_id,
            request.target_project_id,
            transfer_date,
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    Ok(TransferAllocationResponse {
        new_allocation_id,
        message: String::from("Allocation transferred"),
    })
}

/// Lists an employee's allocations.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn allocations_for_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Vec<AllocationData>, ApiError> {
    persistence
        .allocations_for_employee(employee_id)
        .map_err(translate_persistence_error)
}

/// Lists a project's allocations.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn allocations_for_project(
    persistence: &mut Persistence,
    project_id: i64,
) -> Result<Vec<AllocationData>, ApiError> {
    persistence
        .allocations_for_project(project_id)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Tasks
// ============================================================================

/// Creates a task. Any authenticated actor may.
///
/// # Errors
///
/// Returns an error if the owner is missing, the entity type is
/// unknown, or the description is blank.
pub fn create_task(
    persistence: &mut Persistence,
    request: CreateTaskRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateTaskResponse, ApiError> {
    AuthorizationService::authorize_create_task(actor)?;

    let kind: EntityKind = request
        .entity_type
        .parse()
        .map_err(translate_domain_error)?;
    let due_on = parse_optional_date_field(request.due_on.as_deref())?;

    let task_id = persistence
        .create_task(
            NewTask {
                owner_id: request.owner_id,
                entity: EntityRef::new(kind, request.entity_id),
                description: request.description,
                due_on,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    Ok(CreateTaskResponse {
        task_id,
        message: String::from("Task created"),
    })
}

/// Completes a task. The owner or an HR executive may.
///
/// # Errors
///
/// Returns an error if the actor is neither the owner nor HR, the task
/// is missing, or the task is already terminal.
pub fn complete_task(
    persistence: &mut Persistence,
    task_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    let task = persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_complete_task(actor, task.owner_id)?;

    persistence
        .complete_task(task_id, actor.id)
        .map_err(translate_persistence_error)
}

/// Fetches a task by id.
///
/// # Errors
///
/// Returns an error if the task does not exist.
pub fn get_task(persistence: &mut Persistence, task_id: i64) -> Result<TaskData, ApiError> {
    persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Skills
// ============================================================================

/// Records a skill request. Employees request for themselves; HR may
/// request on anyone's behalf.
///
/// # Errors
///
/// Returns an error if the actor may not request for this employee, the
/// employee is missing, or the request is a duplicate.
pub fn request_skill(
    persistence: &mut Persistence,
    request: &RequestSkillRequest,
    actor: &AuthenticatedActor,
) -> Result<RequestSkillResponse, ApiError> {
    AuthorizationService::authorize_request_skill(actor, request.employee_id)?;

    let employee_skill_id = persistence
        .request_skill(
            request.employee_id,
            &request.skill_name,
            &request.proficiency_level,
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    Ok(RequestSkillResponse {
        employee_skill_id,
        message: format!("Skill '{}' requested", request.skill_name),
    })
}

/// Approves a pending skill request. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the request is missing, or
/// it was already approved.
pub fn approve_skill(
    persistence: &mut Persistence,
    employee_skill_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_approve_skill(actor)?;

    persistence
        .approve_skill(employee_skill_id, actor.id)
        .map_err(translate_persistence_error)
}

/// Lists an employee's skill links.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn skills_for_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Vec<EmployeeSkillData>, ApiError> {
    persistence
        .skills_for_employee(employee_id)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Resource demands
// ============================================================================

/// Raises a staffing demand. Managers only, and only against projects
/// they manage.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the project is
/// missing, or the actor does not manage it.
pub fn create_demand(
    persistence: &mut Persistence,
    request: CreateDemandRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateDemandResponse, ApiError> {
    AuthorizationService::authorize_create_demand(actor)?;

    let start_date = parse_date_field(&request.start_date)?;
    let demand_id = persistence
        .create_demand(
            NewDemand {
                project_id: request.project_id,
                role_required: request.role_required,
                skills_required: request.skills_required,
                start_date,
            },
            actor.id,
        )
        .map_err(translate_persistence_error)?;

    info!(demand_id, "Resource demand created");
    Ok(CreateDemandResponse {
        demand_id,
        message: String::from("Resource demand recorded"),
    })
}

/// Lists resource demands. Managers see their own; HR sees all.
///
/// # Errors
///
/// Returns an error if the actor is a plain employee or the query fails.
pub fn list_demands(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<ResourceDemandData>, ApiError> {
    AuthorizationService::authorize_view_demands(actor)?;

    let rows = match actor.role {
        Role::HrExecutive => persistence.list_demands(),
        _ => persistence.demands_for_requester(actor.id),
    };
    rows.map_err(translate_persistence_error)
}

// ============================================================================
// Audit
// ============================================================================

/// Loads the audit trail for one entity, newest first. HR only.
///
/// # Errors
///
/// Returns an error if the actor is not HR, the entity type is unknown,
/// or the query fails.
pub fn audit_for_entity(
    persistence: &mut Persistence,
    entity_type: &str,
    entity_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Vec<AuditEntryResponse>, ApiError> {
    AuthorizationService::authorize_view_audit(actor)?;

    let kind: EntityKind = entity_type.parse().map_err(translate_domain_error)?;
    let rows = persistence
        .audit_for_entity(kind, entity_id)
        .map_err(translate_persistence_error)?;

    rows.into_iter()
        .map(|row| {
            let changed_fields =
                serde_json::from_str(&row.changed_fields).map_err(|e| ApiError::Internal {
                    message: format!("Malformed audit entry {}: {e}", row.audit_id),
                })?;
            Ok(AuditEntryResponse {
                audit_id: row.audit_id,
                entity_type: row.entity_type,
                entity_id: row.entity_id,
                operation: row.operation,
                changed_by: row.changed_by,
                changed_at: row.changed_at,
                changed_fields,
            })
        })
        .collect()
}
