// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Workforce Resource Manager.
//!
//! A thin Axum layer over the `wrm-api` handlers. Authentication is
//! session-based: `/login` issues a bearer token, every other route
//! validates it through the [`session::SessionActor`] extractor.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use wrm_api::{
    ApiError, AuditEntryResponse, CloseProjectRequest, CloseProjectResponse,
    CreateAllocationRequest, CreateAllocationResponse, CreateDemandRequest, CreateDemandResponse,
    CreateEmployeeRequest, CreateEmployeeResponse, CreateProjectRequest, CreateProjectResponse,
    CreateTaskRequest, CreateTaskResponse, ExitEmployeeRequest, ExitEmployeeResponse,
    LoginRequest, LoginResponse,
    RequestSkillRequest, RequestSkillResponse, TransferAllocationRequest,
    TransferAllocationResponse, UpdateAllocationRequest, UpdateEmployeeRequest,
    UpdateProjectRequest,
};
use wrm_domain::Role;
use wrm_persistence::{
    AllocationData, EmployeeData, EmployeeSkillData, NewEmployee, Persistence, ProjectData,
    ResourceDemandData, TaskData,
};

use crate::session::SessionActor;

/// WRM Server - HTTP server for the Workforce Resource Manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Email for the initial HR account, created only when the database
    /// holds no employees
    #[arg(long)]
    seed_admin_email: Option<String>,

    /// Password for the initial HR account
    #[arg(long)]
    seed_admin_password: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: bool,
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        if matches!(err, ApiError::Internal { .. }) {
            error!(error = %err, "Internal error");
        }
        Self {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: err.to_string(),
        }
    }
}

/// Success response for operations with no other payload.
#[derive(Debug, Clone, Serialize)]
struct OkResponse {
    success: bool,
}

const OK: OkResponse = OkResponse { success: true };

// ============================================================================
// Sessions
// ============================================================================

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = wrm_api::login(&mut persistence, &req)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<OkResponse>, HttpError> {
    let token = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing Authorization header"),
        })?
        .to_string();

    let mut persistence = state.persistence.lock().await;
    wrm_api::logout(&mut persistence, &token)?;
    Ok(Json(OK))
}

// ============================================================================
// Employees
// ============================================================================

async fn handle_create_employee(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<CreateEmployeeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::create_employee(&mut persistence, req, &actor)?))
}

async fn handle_update_employee(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    wrm_api::update_employee(&mut persistence, employee_id, req, &actor)?;
    Ok(Json(OK))
}

async fn handle_exit_employee(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(employee_id): Path<i64>,
    Json(req): Json<ExitEmployeeRequest>,
) -> Result<Json<ExitEmployeeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::exit_employee(
        &mut persistence,
        employee_id,
        &req,
        &actor,
    )?))
}

async fn handle_get_employee(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeData>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::get_employee(&mut persistence, employee_id)?))
}

async fn handle_list_employees(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
) -> Result<Json<Vec<EmployeeData>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::list_employees(&mut persistence)?))
}

async fn handle_employee_allocations(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<AllocationData>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::allocations_for_employee(
        &mut persistence,
        employee_id,
    )?))
}

async fn handle_employee_skills(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<EmployeeSkillData>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::skills_for_employee(
        &mut persistence,
        employee_id,
    )?))
}

// ============================================================================
// Projects
// ============================================================================

async fn handle_create_project(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<CreateProjectResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::create_project(&mut persistence, req, &actor)?))
}

async fn handle_update_project(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(project_id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    wrm_api::update_project(&mut persistence, project_id, req, &actor)?;
    Ok(Json(OK))
}

async fn handle_close_project(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(project_id): Path<i64>,
    Json(req): Json<CloseProjectRequest>,
) -> Result<Json<CloseProjectResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::close_project(
        &mut persistence,
        project_id,
        &req,
        &actor,
    )?))
}

async fn handle_get_project(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectData>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::get_project(&mut persistence, project_id)?))
}

async fn handle_list_projects(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
) -> Result<Json<Vec<ProjectData>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::list_projects(&mut persistence)?))
}

async fn handle_project_allocations(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<AllocationData>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::allocations_for_project(
        &mut persistence,
        project_id,
    )?))
}

// ============================================================================
// Allocations
// ============================================================================

async fn handle_create_allocation(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateAllocationRequest>,
) -> Result<Json<CreateAllocationResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::create_allocation(
        &mut persistence,
        req,
        &actor,
    )?))
}

async fn handle_update_allocation(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(allocation_id): Path<i64>,
    Json(req): Json<UpdateAllocationRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    wrm_api::update_allocation(&mut persistence, allocation_id, req, &actor)?;
    Ok(Json(OK))
}

async fn handle_transfer_allocation(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(allocation_id): Path<i64>,
    Json(req): Json<TransferAllocationRequest>,
) -> Result<Json<TransferAllocationResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::transfer_allocation(
        &mut persistence,
        allocation_id,
        &req,
        &actor,
    )?))
}

// ============================================================================
// Tasks
// ============================================================================

async fn handle_create_task(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<CreateTaskResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::create_task(&mut persistence, req, &actor)?))
}

async fn handle_complete_task(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(task_id): Path<i64>,
) -> Result<Json<OkResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    wrm_api::complete_task(&mut persistence, task_id, &actor)?;
    Ok(Json(OK))
}

async fn handle_get_task(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor): SessionActor,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskData>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::get_task(&mut persistence, task_id)?))
}

// ============================================================================
// Resource demands
// ============================================================================

async fn handle_create_demand(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateDemandRequest>,
) -> Result<Json<CreateDemandResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::create_demand(&mut persistence, req, &actor)?))
}

async fn handle_list_demands(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<ResourceDemandData>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::list_demands(&mut persistence, &actor)?))
}

// ============================================================================
// Skills
// ============================================================================

async fn handle_request_skill(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<RequestSkillRequest>,
) -> Result<Json<RequestSkillResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::request_skill(&mut persistence, &req, &actor)?))
}

async fn handle_approve_skill(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(employee_skill_id): Path<i64>,
) -> Result<Json<OkResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    wrm_api::approve_skill(&mut persistence, employee_skill_id, &actor)?;
    Ok(Json(OK))
}

// ============================================================================
// Audit
// ============================================================================

async fn handle_audit_for_entity(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path((entity_type, entity_id)): Path<(String, i64)>,
) -> Result<Json<Vec<AuditEntryResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(wrm_api::audit_for_entity(
        &mut persistence,
        &entity_type,
        entity_id,
        &actor,
    )?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/employees", post(handle_create_employee))
        .route("/employees", get(handle_list_employees))
        .route("/employees/{id}", get(handle_get_employee))
        .route("/employees/{id}", put(handle_update_employee))
        .route("/employees/{id}/exit", post(handle_exit_employee))
        .route("/employees/{id}/allocations", get(handle_employee_allocations))
        .route("/employees/{id}/skills", get(handle_employee_skills))
        .route("/projects", post(handle_create_project))
        .route("/projects", get(handle_list_projects))
        .route("/projects/{id}", get(handle_get_project))
        .route("/projects/{id}", put(handle_update_project))
        .route("/projects/{id}/close", post(handle_close_project))
        .route("/projects/{id}/allocations", get(handle_project_allocations))
        .route("/allocations", post(handle_create_allocation))
        .route("/allocations/{id}", put(handle_update_allocation))
        .route("/allocations/{id}/transfer", post(handle_transfer_allocation))
        .route("/demands", post(handle_create_demand))
        .route("/demands", get(handle_list_demands))
        .route("/tasks", post(handle_create_task))
        .route("/tasks/{id}", get(handle_get_task))
        .route("/tasks/{id}/complete", post(handle_complete_task))
        .route("/skills/requests", post(handle_request_skill))
        .route("/skills/requests/{id}/approve", post(handle_approve_skill))
        .route("/audit/{entity_type}/{entity_id}", get(handle_audit_for_entity))
        .with_state(app_state)
}

/// Creates the initial HR account when the database holds no employees.
fn seed_initial_hr(persistence: &mut Persistence, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(email), Some(password)) = (&args.seed_admin_email, &args.seed_admin_password) else {
        return Ok(());
    };

    if !persistence.list_employees()?.is_empty() {
        info!("Employees already exist; skipping HR seed");
        return Ok(());
    }

    let employee_id = persistence.create_employee(
        NewEmployee {
            employee_code: String::from("HR-0001"),
            full_name: String::from("Initial HR Executive"),
            email: email.clone(),
            password: password.clone(),
            role: Role::HrExecutive,
            department: Some(String::from("Human Resources")),
            joined_on: time::OffsetDateTime::now_utc().date(),
        },
        0,
    )?;
    info!(employee_id, "Seeded initial HR account");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing WRM Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    seed_initial_hr(&mut persistence, &args)?;

    let app_state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
