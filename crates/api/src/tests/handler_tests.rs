// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CreateDemandRequest, CreateTaskRequest, ExitEmployeeRequest, TransferAllocationRequest,
    UpdateProjectRequest,
};
use crate::tests::{
    allocation_request, seed_employee, seed_managed_project, seed_project, test_db,
};

#[test]
fn test_capacity_violation_maps_to_domain_rule() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);
    let p2 = seed_project(&mut db, "PRJ-002", &hr);

    handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p1, 80, "2024-01-01", None),
        &hr,
    )
    .unwrap();

    let err = handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p2, 30, "2024-03-01", None),
        &hr,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 400);
    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "allocation_capacity");
            assert!(message.contains("110%"));
        }
        other => panic!("expected capacity violation, got {other:?}"),
    }
}

#[test]
fn test_invalid_date_maps_to_invalid_input() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let err = handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p1, 50, "01/01/2024", None),
        &hr,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date"));
}

#[test]
fn test_missing_employee_maps_to_not_found() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let err = handlers::create_allocation(
        &mut db,
        allocation_request(9999, p1, 50, "2024-01-01", None),
        &hr,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_manager_field_refusal_maps_to_forbidden() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm = seed_employee(&mut db, "PM-001", "project_manager");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);
    handlers::update_project(
        &mut db,
        p1,
        UpdateProjectRequest {
            manager_id: Some(pm.id),
            ..UpdateProjectRequest::default()
        },
        &hr,
    )
    .unwrap();

    let err = handlers::update_project(
        &mut db,
        p1,
        UpdateProjectRequest {
            client_name: Some(String::from("Acme")),
            ..UpdateProjectRequest::default()
        },
        &pm,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 403);
    assert!(
        matches!(err, ApiError::Forbidden { ref message } if message == "Cannot update client_name. HR only")
    );
}

#[test]
fn test_invalid_transition_maps_to_domain_rule() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let err = handlers::update_project(
        &mut db,
        p1,
        UpdateProjectRequest {
            status: Some(String::from("COMPLETED")),
            closed_on: Some(String::from("2024-06-01")),
            ..UpdateProjectRequest::default()
        },
        &hr,
    )
    .unwrap_err();

    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "status_transition");
            assert!(message.contains("DRAFT"));
            assert!(message.contains("COMPLETED"));
        }
        other => panic!("expected transition violation, got {other:?}"),
    }
}

#[test]
fn test_transfer_flow_through_handlers() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);
    let p2 = seed_project(&mut db, "PRJ-002", &hr);

    let original = handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p1, 60, "2024-01-01", Some("2024-12-31")),
        &hr,
    )
    .unwrap()
    .allocation_id;

    let transferred = handlers::transfer_allocation(
        &mut db,
        original,
        &TransferAllocationRequest {
            target_project_id: p2,
            transfer_date: String::from("2024-06-01"),
        },
        &hr,
    )
    .unwrap();

    let allocations = handlers::allocations_for_employee(&mut db, emp.id).unwrap();
    assert_eq!(allocations.len(), 2);

    let trail = handlers::audit_for_entity(
        &mut db,
        "ALLOCATION",
        transferred.new_allocation_id,
        &hr,
    )
    .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].operation, "INSERT");
    assert_eq!(trail[0].changed_fields["project_id"], p2);
}

#[test]
fn test_exit_flow_through_handlers() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p1, 40, "2024-01-01", None),
        &hr,
    )
    .unwrap();
    handlers::create_task(
        &mut db,
        CreateTaskRequest {
            owner_id: emp.id,
            entity_type: String::from("PROJECT"),
            entity_id: p1,
            description: String::from("Handover notes"),
            due_on: None,
        },
        &hr,
    )
    .unwrap();

    let response = handlers::exit_employee(
        &mut db,
        emp.id,
        &ExitEmployeeRequest {
            exited_on: String::from("2024-06-01"),
        },
        &hr,
    )
    .unwrap();

    assert_eq!(response.allocations_ended, 1);
    assert_eq!(response.tasks_cancelled, 1);
    assert_eq!(
        handlers::get_employee(&mut db, emp.id).unwrap().status,
        "EXITED"
    );
}

#[test]
fn test_unknown_entity_type_rejected() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");

    let err = handlers::audit_for_entity(&mut db, "WIDGET", 1, &hr).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "entity_type"));
}

#[test]
fn test_employee_listing_hides_password_hash() {
    let mut db = test_db();
    seed_employee(&mut db, "HR-001", "hr_executive");

    let employees = handlers::list_employees(&mut db).unwrap();
    let json = serde_json::to_value(&employees).unwrap();
    assert!(json[0].get("password_hash").is_none());
    assert_eq!(json[0]["employee_code"], "HR-001");
}

#[test]
fn test_demand_flow_and_visibility() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm1 = seed_employee(&mut db, "PM-001", "project_manager");
    let pm2 = seed_employee(&mut db, "PM-002", "project_manager");
    let p1 = seed_managed_project(&mut db, "PRJ-001", &pm1, &hr);
    let p2 = seed_managed_project(&mut db, "PRJ-002", &pm2, &hr);

    handlers::create_demand(
        &mut db,
        CreateDemandRequest {
            project_id: p1,
            role_required: String::from("UI/UX Designer"),
            skills_required: Some(String::from("Figma")),
            start_date: String::from("2024-02-01"),
        },
        &pm1,
    )
    .unwrap();
    handlers::create_demand(
        &mut db,
        CreateDemandRequest {
            project_id: p2,
            role_required: String::from("Backend Engineer"),
            skills_required: None,
            start_date: String::from("2024-03-01"),
        },
        &pm2,
    )
    .unwrap();

    let own = handlers::list_demands(&mut db, &pm1).unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].project_id, p1);
    assert_eq!(own[0].status, "PENDING");

    let all = handlers::list_demands(&mut db, &hr).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_demand_on_foreign_project_maps_to_forbidden() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let pm1 = seed_employee(&mut db, "PM-001", "project_manager");
    let pm2 = seed_employee(&mut db, "PM-002", "project_manager");
    let p1 = seed_managed_project(&mut db, "PRJ-001", &pm1, &hr);

    let err = handlers::create_demand(
        &mut db,
        CreateDemandRequest {
            project_id: p1,
            role_required: String::from("Backend Engineer"),
            skills_required: None,
            start_date: String::from("2024-02-01"),
        },
        &pm2,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 403);
    assert!(
        matches!(err, ApiError::Forbidden { ref message } if message == "Cannot request resources for projects you do not manage")
    );
    assert!(handlers::list_demands(&mut db, &hr).unwrap().is_empty());
}

#[test]
fn test_out_of_range_percentage_maps_to_invalid_input() {
    let mut db = test_db();
    let hr = seed_employee(&mut db, "HR-001", "hr_executive");
    let emp = seed_employee(&mut db, "EMP-001", "employee");
    let p1 = seed_project(&mut db, "PRJ-001", &hr);

    let err = handlers::create_allocation(
        &mut db,
        allocation_request(emp.id, p1, 150, "2024-01-01", None),
        &hr,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 400);
    match err {
        ApiError::InvalidInput { field, message } => {
            assert_eq!(field, "allocation_percentage");
            assert!(message.contains("between 0 and 100"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
