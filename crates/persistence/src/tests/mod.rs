// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod allocation_tests;
mod audit_tests;

use crate::{NewEmployee, NewProject, Persistence};
use time::macros::date;
use wrm::AllocationRequest;
use wrm_domain::Role;

/// The actor id used to bootstrap the first employee.
pub const BOOTSTRAP_ACTOR: i64 = 0;

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_employee(persistence: &mut Persistence, code: &str, role: Role) -> i64 {
    persistence
        .create_employee(
            NewEmployee {
                employee_code: code.to_string(),
                full_name: format!("Test {code}"),
                email: format!("{}@example.com", code.to_lowercase()),
                password: String::from("correct horse battery staple"),
                role,
                department: Some(String::from("Engineering")),
                joined_on: date!(2022 - 01 - 10),
            },
            BOOTSTRAP_ACTOR,
        )
        .unwrap()
}

pub fn create_test_project(persistence: &mut Persistence, code: &str, hr_id: i64) -> i64 {
    persistence
        .create_project(
            NewProject {
                project_code: code.to_string(),
                project_name: format!("Project {code}"),
                client_name: Some(String::from("Acme Corp")),
                manager_id: None,
                short_description: None,
                started_on: Some(date!(2024 - 01 - 01)),
            },
            hr_id,
        )
        .unwrap()
}

pub fn create_test_managed_project(
    persistence: &mut Persistence,
    code: &str,
    manager_id: i64,
    hr_id: i64,
) -> i64 {
    persistence
        .create_project(
            NewProject {
                project_code: code.to_string(),
                project_name: format!("Project {code}"),
                client_name: Some(String::from("Acme Corp")),
                manager_id: Some(manager_id),
                short_description: None,
                started_on: Some(date!(2024 - 01 - 01)),
            },
            hr_id,
        )
        .unwrap()
}

pub fn allocation_request(
    employee_id: i64,
    project_id: i64,
    percentage: i64,
    start: time::Date,
    end: Option<time::Date>,
) -> AllocationRequest {
    AllocationRequest {
        employee_id,
        project_id,
        role_label: String::from("Backend Engineer"),
        percentage,
        start_date: start,
        end_date: end,
        is_billable: true,
        is_critical: false,
    }
}
