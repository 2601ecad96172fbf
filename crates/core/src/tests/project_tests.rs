// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{allocation, project};
use crate::{CoreError, ProjectPatch, plan_update_project};
use time::macros::date;
use wrm_domain::{DomainError, ProjectStatus, Role};

const MANAGER_ID: i64 = 7;
const HR_ID: i64 = 1;

#[test]
fn test_manager_updates_descriptive_fields_on_own_project() {
    let target = project(10, Some(MANAGER_ID), ProjectStatus::Active);
    let patch = ProjectPatch {
        short_description: Some(String::from("Billing revamp")),
        github_url: Some(String::from("https://github.com/acme/billing")),
        ..ProjectPatch::default()
    };

    let plan = match plan_update_project(&target, patch, MANAGER_ID, Role::ProjectManager, &[]) {
        Ok(plan) => plan,
        Err(e) => panic!("Descriptive update should pass: {e}"),
    };
    assert_eq!(plan.project_id, 10);
    assert!(plan.closed_on.is_none());
    assert_eq!(plan.audit.changed_fields["short_description"], "Billing revamp");
}

#[test]
fn test_manager_rejected_on_foreign_project() {
    let target = project(10, Some(99), ProjectStatus::Active);
    let patch = ProjectPatch {
        short_description: Some(String::from("nope")),
        ..ProjectPatch::default()
    };
    let result = plan_update_project(&target, patch, MANAGER_ID, Role::ProjectManager, &[]);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::Forbidden(_)))
    ));
}

#[test]
fn test_manager_rejected_on_restricted_field_regardless_of_others() {
    let target = project(10, Some(MANAGER_ID), ProjectStatus::Active);
    // A legal field alongside an illegal one still fails the whole patch.
    let patch = ProjectPatch {
        short_description: Some(String::from("fine")),
        client_name: Some(String::from("Acme")),
        ..ProjectPatch::default()
    };
    let result = plan_update_project(&target, patch, MANAGER_ID, Role::ProjectManager, &[]);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::Forbidden(
            String::from("Cannot update client_name. HR only"),
        )))
    );
}

#[test]
fn test_project_code_immutable_even_for_hr() {
    let target = project(10, None, ProjectStatus::Active);
    let patch = ProjectPatch {
        project_code: Some(String::from("PRJ-0042")),
        ..ProjectPatch::default()
    };
    let result = plan_update_project(&target, patch, HR_ID, Role::HrExecutive, &[]);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::Validation(
            String::from("Cannot update project_code"),
        )))
    );
}

#[test]
fn test_empty_patch_rejected() {
    let target = project(10, None, ProjectStatus::Active);
    let result = plan_update_project(
        &target,
        ProjectPatch::default(),
        HR_ID,
        Role::HrExecutive,
        &[],
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::Validation(_)))
    ));
}

#[test]
fn test_manager_transition_active_to_on_hold() {
    let target = project(10, Some(MANAGER_ID), ProjectStatus::Active);
    let patch = ProjectPatch {
        status: Some(ProjectStatus::OnHold),
        ..ProjectPatch::default()
    };
    assert!(plan_update_project(&target, patch, MANAGER_ID, Role::ProjectManager, &[]).is_ok());
}

#[test]
fn test_manager_cannot_complete_project() {
    let target = project(10, Some(MANAGER_ID), ProjectStatus::Active);
    let patch = ProjectPatch {
        status: Some(ProjectStatus::Completed),
        closed_on: Some(date!(2024 - 06 - 01)),
        ..ProjectPatch::default()
    };
    let result = plan_update_project(&target, patch, MANAGER_ID, Role::ProjectManager, &[]);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTransition {
            from: ProjectStatus::Active,
            to: ProjectStatus::Completed,
        }))
    );
}

#[test]
fn test_hr_completion_requires_closed_on() {
    let target = project(10, None, ProjectStatus::Active);
    let patch = ProjectPatch {
        status: Some(ProjectStatus::Completed),
        ..ProjectPatch::default()
    };
    let result = plan_update_project(&target, patch, HR_ID, Role::HrExecutive, &[]);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::Validation(
            String::from("closed_on is required when closing a project"),
        )))
    );
}

#[test]
fn test_hr_completion_cascades_allocation_truncation() {
    let target = project(10, None, ProjectStatus::Active);
    let allocations = vec![
        allocation(1, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)), 50),
        allocation(2, date!(2024 - 01 - 01), Some(date!(2024 - 05 - 01)), 20),
    ];
    let patch = ProjectPatch {
        status: Some(ProjectStatus::Completed),
        closed_on: Some(date!(2024 - 06 - 01)),
        ..ProjectPatch::default()
    };

    let plan = match plan_update_project(&target, patch, HR_ID, Role::HrExecutive, &allocations) {
        Ok(plan) => plan,
        Err(e) => panic!("HR completion should pass: {e}"),
    };
    assert_eq!(plan.closed_on, Some(date!(2024 - 06 - 01)));
    assert_eq!(plan.allocations_to_truncate, vec![1]);
    assert_eq!(plan.audit.changed_fields["allocations_ended"], 1);
}

#[test]
fn test_repeated_status_is_not_a_transition() {
    let target = project(10, None, ProjectStatus::Active);
    let patch = ProjectPatch {
        status: Some(ProjectStatus::Active),
        client_name: Some(String::from("Acme")),
        ..ProjectPatch::default()
    };
    assert!(plan_update_project(&target, patch, HR_ID, Role::HrExecutive, &[]).is_ok());
}

#[test]
fn test_terminal_project_rejects_transitions() {
    let target = project(10, None, ProjectStatus::Completed);
    let patch = ProjectPatch {
        status: Some(ProjectStatus::Active),
        ..ProjectPatch::default()
    };
    let result = plan_update_project(&target, patch, HR_ID, Role::HrExecutive, &[]);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTransition { .. }
        ))
    ));
}
