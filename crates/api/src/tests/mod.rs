// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod authorization_tests;
mod handler_tests;

use crate::auth::AuthenticatedActor;
use crate::handlers;
use crate::request_response::{
    CreateAllocationRequest, CreateEmployeeRequest, CreateProjectRequest,
};
use wrm_domain::Role;
use wrm_persistence::Persistence;

/// The actor used to bootstrap the first employee.
pub const BOOTSTRAP: AuthenticatedActor = AuthenticatedActor::new(0, Role::HrExecutive);

pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn seed_employee(db: &mut Persistence, code: &str, role: &str) -> AuthenticatedActor {
    let response = handlers::create_employee(
        db,
        CreateEmployeeRequest {
            employee_code: code.to_string(),
            full_name: format!("Test {code}"),
            email: format!("{}@example.com", code.to_lowercase()),
            password: TEST_PASSWORD.to_string(),
            role: role.to_string(),
            department: Some(String::from("Engineering")),
            joined_on: String::from("2022-01-10"),
        },
        &BOOTSTRAP,
    )
    .unwrap();
    AuthenticatedActor::new(response.employee_id, role.parse().unwrap())
}

pub fn seed_project(db: &mut Persistence, code: &str, hr: &AuthenticatedActor) -> i64 {
    handlers::create_project(
        db,
        CreateProjectRequest {
            project_code: code.to_string(),
            project_name: format!("Project {code}"),
            client_name: Some(String::from("Acme Corp")),
            manager_id: None,
            short_description: None,
            started_on: Some(String::from("2024-01-01")),
        },
        hr,
    )
    .unwrap()
    .project_id
}

pub fn seed_managed_project(
    db: &mut Persistence,
    code: &str,
    manager: &AuthenticatedActor,
    hr: &AuthenticatedActor,
) -> i64 {
    handlers::create_project(
        db,
        CreateProjectRequest {
            project_code: code.to_string(),
            project_name: format!("Project {code}"),
            client_name: Some(String::from("Acme Corp")),
            manager_id: Some(manager.id),
            short_description: None,
            started_on: Some(String::from("2024-01-01")),
        },
        hr,
    )
    .unwrap()
    .project_id
}

pub fn allocation_request(
    employee_id: i64,
    project_id: i64,
    percentage: i64,
    start: &str,
    end: Option<&str>,
) -> CreateAllocationRequest {
    CreateAllocationRequest {
        employee_id,
        project_id,
        role_label: String::from("Backend Engineer"),
        allocation_percentage: percentage,
        start_date: start.to_string(),
        end_date: end.map(str::to_string),
        is_billable: true,
        is_critical: false,
    }
}
