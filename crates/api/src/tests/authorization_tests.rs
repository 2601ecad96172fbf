// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CloseProjectRequest, CreateDemandRequest, CreateEmployeeRequest, CreateTaskRequest,
    ExitEmployeeRequest, RequestSkillRequest, UpdateProjectRequest,
};
use crate::tests::{
    allocation_request, seed_employee, seed_managed_project, seed_project, test_db,
};

#[test]
fn test_employee_cannot_create_employee() {
    let mut db = test_db();
    seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");

    let result = handlers::create_employee(
        &mut db,
        CreateEmployeeRequest {
            employee_code: String::from("EMP-002"),
            full_name: String::from("New Hire"),
            email: String::from("new.hire@example.com"),
            password: String::from("password123456"),
            role: String::from("employee"),
            department: None,
            joined_on: String::from("2024-01-01"),
        },
        &emp,
    );

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.status_code(), 403);
}

#[test]
fn test_manager_cannot_manage_allocations() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm = seed_employee(&mut db, "PM-001", "project_manager");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let result = handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p1, 50, "2024-01-01", None),
        &pm,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(handlers::allocations_for_employee(&mut db, emp.id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_employee_cannot_update_project() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let result = handlers::update_project(
        &mut db,
        p1,
        UpdateProjectRequest {
            short_description: Some(String::from("nope")),
            ..UpdateProjectRequest::default()
        },
        &emp,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_manager_cannot_close_or_exit() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm = seed_employee(&mut db, "PM-001", "project_manager");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let close = handlers::close_project(
        &mut db,
        p1,
        &CloseProjectRequest {
            status: String::from("COMPLETED"),
            closed_on: String::from("2024-06-01"),
        },
        &pm,
    );
    assert!(matches!(close, Err(ApiError::Unauthorized { .. })));

    let exit = handlers::exit_employee(
        &mut db,
        emp.id,
        &ExitEmployeeRequest {
            exited_on: String::from("2024-06-01"),
        },
        &pm,
    );
    assert!(matches!(exit, Err(ApiError::Unauthorized { .. })));
    assert_eq!(handlers::get_employee(&mut db, emp.id).unwrap().status, "ACTIVE");
}

#[test]
fn test_task_completion_is_owner_or_hr() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let owner = seed_employee(&mut db, "EMP-001", "employee");
    let other = seed_employee(&mut db, "EMP-002", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let first = handlers::create_task(
        &mut db,
        CreateTaskRequest {
            owner_id: owner.id,
            entity_type: String::from("PROJECT"),
            entity_id: p1,
            description: String::from("Write the runbook"),
            due_on: None,
        },
        &hr,
    )
    .unwrap()
    .task_id;
    let second = handlers::create_task(
        &mut db,
        CreateTaskRequest {
            owner_id: owner.id,
            entity_type: String::from("PROJECT"),
            entity_id: p1,
            description: String::from("Kickoff notes"),
            due_on: None,
        },
        &hr,
    )
    .unwrap()
    .task_id;

    let result = handlers::complete_task(&mut db, first, &other);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    handlers::complete_task(&mut db, first, &owner).unwrap();
    handlers::complete_task(&mut db, second, &hr).unwrap();
}

#[test]
fn test_skill_request_is_self_or_hr() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let other = seed_employee(&mut db, "EMP-002", "employee");

    let foreign = handlers::request_skill(
        &mut db,
        &RequestSkillRequest {
            employee_id: emp.id,
            skill_name: String::from("Rust"),
            proficiency_level: String::from("ADVANCED"),
        },
        &other,
    );
    assert!(matches!(foreign, Err(ApiError::Unauthorized { .. })));

    let own = handlers::request_skill(
        &mut db,
        &RequestSkillRequest {
            employee_id: emp.id,
            skill_name: String::from("Rust"),
            proficiency_level: String::from("ADVANCED"),
        },
        &emp,
    )
    .unwrap();

    // Approval is HR-only, even for the requester.
    let self_approve = handlers::approve_skill(&mut db, own.employee_skill_id, &emp);
    assert!(matches!(self_approve, Err(ApiError::Unauthorized { .. })));
    handlers::approve_skill(&mut db, own.employee_skill_id, &hr).unwrap();
}

#[test]
fn test_audit_trail_is_hr_only() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm = seed_employee(&mut db, "PM-001", "project_manager");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let result = handlers::audit_for_entity(&mut db, "PROJECT", p1, &pm);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    let trail = handlers::audit_for_entity(&mut db, "PROJECT", p1, &hr).unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].operation, "INSERT");
}

#[test]
fn test_demand_access_is_role_gated() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm = seed_employee(&mut db, "PM-001", "project_manager");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_managed_project(&mut db, "PRJ-001", &pm, &hr);

    let request = CreateDemandRequest {
        project_id: p1,
        role_required: String::from("Backend Engineer"),
        skills_required: None,
        start_date: String::from("2024-02-01"),
    };

    // Raising demands is a manager-only operation, even for HR.
    let from_emp = handlers::create_demand(&mut db, request.clone(), &emp);
    assert!(matches!(from_emp, Err(ApiError::Unauthorized { .. })));
    let from_hr = handlers::create_demand(&mut db, request.clone(), &hr);
    assert!(matches!(from_hr, Err(ApiError::Unauthorized { .. })));
    handlers::create_demand(&mut db, request, &pm).unwrap();

    let from_emp = handlers::list_demands(&mut db, &emp);
    assert!(matches!(from_emp, Err(ApiError::Unauthorized { .. })));
    assert_eq!(handlers::list_demands(&mut db, &pm).unwrap().len(), 1);
    assert_eq!(handlers::list_demands(&mut db, &hr).unwrap().len(), 1);
}
