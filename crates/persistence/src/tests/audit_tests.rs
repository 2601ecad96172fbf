// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{allocation_request, create_test_employee, create_test_project, test_db};
use time::macros::date;
use wrm_domain::{EntityKind, ProjectStatus, Role};

#[test]
fn test_employee_create_is_audited() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);

    let trail = db.audit_for_entity(EntityKind::Employee, hr).unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].operation, "INSERT");
    assert_eq!(trail[0].entity_type, "EMPLOYEE");
    assert_eq!(trail[0].entity_id, hr);

    let fields: serde_json::Value = serde_json::from_str(&trail[0].changed_fields).unwrap();
    assert_eq!(fields["employee_code"], "HR-001");
    assert!(fields.get("password").is_none());
    assert!(fields.get("password_hash").is_none());
}

#[test]
fn test_allocation_create_is_audited() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);

    let allocation_id = db
        .create_allocation(
            allocation_request(emp, p1, 50, date!(2024 - 01 - 01), None),
            hr,
        )
        .unwrap();

    let trail = db
        .audit_for_entity(EntityKind::Allocation, allocation_id)
        .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].operation, "INSERT");
    assert_eq!(trail[0].changed_by, hr);
}

#[test]
fn test_audit_trail_is_newest_first() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);

    db.update_project(
        p1,
        wrm::ProjectPatch {
            status: Some(ProjectStatus::Active),
            ..wrm::ProjectPatch::default()
        },
        hr,
        Role::HrExecutive,
    )
    .unwrap();
    db.update_project(
        p1,
        wrm::ProjectPatch {
            status: Some(ProjectStatus::OnHold),
            ..wrm::ProjectPatch::default()
        },
        hr,
        Role::HrExecutive,
    )
    .unwrap();

    let trail = db.audit_for_entity(EntityKind::Project, p1).unwrap();
    assert_eq!(trail.len(), 3);
    assert!(trail[0].audit_id > trail[1].audit_id);
    assert_eq!(trail[0].operation, "UPDATE");
    assert_eq!(trail[2].operation, "INSERT");

    let newest: serde_json::Value = serde_json::from_str(&trail[0].changed_fields).unwrap();
    assert_eq!(newest["status"], "ON_HOLD");
}

#[test]
fn test_exit_writes_one_employee_entry() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);
    db.create_allocation(
        allocation_request(emp, p1, 40, date!(2024 - 01 - 01), None),
        hr,
    )
    .unwrap();

    db.exit_employee(emp, date!(2024 - 06 - 01), hr).unwrap();

    let trail = db.audit_for_entity(EntityKind::Employee, emp).unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].operation, "UPDATE");
    assert_eq!(trail[0].changed_by, hr);

    let fields: serde_json::Value = serde_json::from_str(&trail[0].changed_fields).unwrap();
    assert_eq!(fields["status"], "EXITED");
    assert_eq!(fields["exited_on"], "2024-06-01");
    assert_eq!(fields["allocations_ended"], 1);
}

#[test]
fn test_failed_mutation_leaves_trail_unchanged() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);
    db.create_allocation(
        allocation_request(emp, p1, 90, date!(2024 - 01 - 01), None),
        hr,
    )
    .unwrap();

    let before = db.count_audit_entries().unwrap();
    assert!(
        db.create_allocation(
            allocation_request(emp, p1, 20, date!(2024 - 03 - 01), None),
            hr,
        )
        .is_err()
    );
    assert!(
        db.exit_employee(emp, date!(2020 - 01 - 01), hr).is_err()
    );
    assert_eq!(db.count_audit_entries().unwrap(), before);
}
