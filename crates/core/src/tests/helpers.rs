// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::records::{AllocationRecord, EmployeeRecord, ProjectRecord, TaskRecord};
use time::Date;
use time::macros::date;
use wrm_domain::{DateWindow, EmployeeStatus, ProjectStatus, TaskStatus};

pub fn allocation(id: i64, start: Date, end: Option<Date>, percentage: u32) -> AllocationRecord {
    AllocationRecord {
        allocation_id: id,
        employee_id: 1,
        project_id: 10,
        role_label: String::from("Backend Engineer"),
        percentage,
        window: DateWindow { start, end },
        is_billable: true,
        is_critical: false,
    }
}

pub fn active_employee(id: i64) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id,
        status: EmployeeStatus::Active,
        joined_on: date!(2022 - 01 - 10),
        exited_on: None,
    }
}

pub fn project(id: i64, manager_id: Option<i64>, status: ProjectStatus) -> ProjectRecord {
    ProjectRecord {
        project_id: id,
        manager_id,
        status,
        closed_on: None,
    }
}

pub fn task(id: i64, status: TaskStatus) -> TaskRecord {
    TaskRecord {
        task_id: id,
        status,
    }
}
