// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use crate::tests::{allocation_request, create_test_employee, create_test_project, test_db};
use time::macros::date;
use wrm::AllocationPatch;
use wrm_domain::{DomainError, Role};

#[test]
fn test_capacity_scenario_end_to_end() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);
    let p2 = create_test_project(&mut db, "PRJ-002", hr);
    let p3 = create_test_project(&mut db, "PRJ-003", hr);

    db.create_allocation(
        allocation_request(emp, p1, 50, date!(2024 - 01 - 01), Some(date!(2024 - 06 - 30))),
        hr,
    )
    .unwrap();
    db.create_allocation(
        allocation_request(emp, p2, 30, date!(2024 - 03 - 01), Some(date!(2024 - 12 - 31))),
        hr,
    )
    .unwrap();

    // 25% over April-May would reach 105%.
    let rejected = db.create_allocation(
        allocation_request(emp, p3, 25, date!(2024 - 04 - 01), Some(date!(2024 - 05 - 01))),
        hr,
    );
    assert_eq!(
        rejected,
        Err(PersistenceError::Domain(DomainError::CapacityExceeded {
            current: 80,
            requested: 25,
            total: 105,
        }))
    );

    // 15% fits exactly at the 95% mark.
    let accepted = db.create_allocation(
        allocation_request(emp, p3, 15, date!(2024 - 04 - 01), Some(date!(2024 - 05 - 01))),
        hr,
    );
    assert!(accepted.is_ok());
    assert_eq!(db.allocations_for_employee(emp).unwrap().len(), 3);
}

#[test]
fn test_rejected_create_leaves_no_rows() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);

    db.create_allocation(
        allocation_request(emp, p1, 100, date!(2024 - 01 - 01), None),
        hr,
    )
    .unwrap();

    let audit_before = db.count_audit_entries().unwrap();
    let result = db.create_allocation(
        allocation_request(emp, p1, 1, date!(2024 - 06 - 01), None),
        hr,
    );
    assert!(result.is_err());

    assert_eq!(db.allocations_for_employee(emp).unwrap().len(), 1);
    assert_eq!(db.count_audit_entries().unwrap(), audit_before);
}

#[test]
fn test_create_rejects_missing_employee() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);

    let result = db.create_allocation(
        allocation_request(9999, p1, 10, date!(2024 - 01 - 01), None),
        hr,
    );
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_update_excludes_itself() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);

    let allocation_id = db
        .create_allocation(
            allocation_request(emp, p1, 60, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31))),
            hr,
        )
        .unwrap();

    // Raising its own percentage to 100 is fine; the old 60 does not
    // count against it.
    db.update_allocation(
        allocation_id,
        AllocationPatch {
            percentage: Some(100),
            ..AllocationPatch::default()
        },
        hr,
    )
    .unwrap();

    let row = db.get_allocation(allocation_id).unwrap();
    assert_eq!(row.allocation_percentage, 100);
}

#[test]
fn test_transfer_is_atomic_and_writes_two_audit_entries() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);
    let p2 = create_test_project(&mut db, "PRJ-002", hr);

    let original = db
        .create_allocation(
            allocation_request(emp, p1, 60, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31))),
            hr,
        )
        .unwrap();

    let audit_before = db.count_audit_entries().unwrap();
    let replacement = db
        .transfer_allocation(original, p2, date!(2024 - 06 - 01), hr)
        .unwrap();

    let old_row = db.get_allocation(original).unwrap();
    assert_eq!(old_row.end_date.as_deref(), Some("2024-06-01"));
    assert_eq!(old_row.project_id, p1);

    let new_row = db.get_allocation(replacement).unwrap();
    assert_eq!(new_row.project_id, p2);
    assert_eq!(new_row.start_date, "2024-06-01");
    assert_eq!(new_row.end_date.as_deref(), Some("2024-12-31"));
    assert_eq!(new_row.allocation_percentage, 60);

    assert_eq!(db.count_audit_entries().unwrap(), audit_before + 2);
}

#[test]
fn test_failed_transfer_changes_nothing() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);
    let p2 = create_test_project(&mut db, "PRJ-002", hr);

    let original = db
        .create_allocation(
            allocation_request(emp, p1, 60, date!(2024 - 01 - 01), Some(date!(2024 - 06 - 30))),
            hr,
        )
        .unwrap();

    let audit_before = db.count_audit_entries().unwrap();
    let result = db.transfer_allocation(original, p2, date!(2024 - 07 - 01), hr);
    assert_eq!(
        result,
        Err(PersistenceError::Domain(DomainError::Validation(
            String::from("transfer_date must be between start_date and end_date"),
        )))
    );

    let row = db.get_allocation(original).unwrap();
    assert_eq!(row.end_date.as_deref(), Some("2024-06-30"));
    assert_eq!(db.allocations_for_employee(emp).unwrap().len(), 1);
    assert_eq!(db.count_audit_entries().unwrap(), audit_before);
}

#[test]
fn test_transfer_leaves_total_percentage_unchanged() {
    let mut db = test_db();
    let hr = create_test_employee(&mut db, "HR-001", Role::HrExecutive);
    let emp = create_test_employee(&mut db, "EMP-001", Role::Employee);
    let p1 = create_test_project(&mut db, "PRJ-001", hr);
    let p2 = create_test_project(&mut db, "PRJ-002", hr);

    let original = db
        .create_allocation(
            allocation_request(emp, p1, 80, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31))),
            hr,
        )
        .unwrap();
    db.transfer_allocation(original, p2, date!(2024 - 06 - 01), hr)
        .unwrap();

    // Another 30% over the second half must still be rejected: the
    // transferred allocation holds its 80% there.
    let result = db.create_allocation(
        allocation_request(emp, p1, 30, date!(2024 - 08 - 01), Some(date!(2024 - 09 - 30))),
        hr,
    );
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::CapacityExceeded { .. }))
    ));
}
