// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mapping the Diesel schema, plus conversions into the
//! typed snapshots the engines plan against.
//!
//! Dates are stored as `YYYY-MM-DD` text; statuses and roles as their
//! canonical string forms. Conversions parse eagerly so malformed rows
//! surface as errors instead of leaking strings into the domain.

use diesel::prelude::*;
use serde::Serialize;
use wrm::{AllocationRecord, EmployeeRecord, ProjectRecord, TaskRecord};
use wrm_domain::{
    DateWindow, EmployeeStatus, ProjectStatus, Role, TaskStatus, parse_date, parse_optional_date,
    validate_percentage,
};

use crate::error::PersistenceError;

/// An employee row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct EmployeeData {
    pub employee_id: i64,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub department: Option<String>,
    pub status: String,
    pub joined_on: String,
    pub exited_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl EmployeeData {
    /// Parses the row's role string.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role is unrecognized.
    pub fn parse_role(&self) -> Result<Role, PersistenceError> {
        Ok(self.role.parse()?)
    }

    /// Converts to the snapshot the lifecycle engine plans against.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status or dates are malformed.
    pub fn to_record(&self) -> Result<EmployeeRecord, PersistenceError> {
        let status: EmployeeStatus = self.status.parse()?;
        Ok(EmployeeRecord {
            employee_id: self.employee_id,
            status,
            joined_on: parse_date(&self.joined_on)?,
            exited_on: parse_optional_date(self.exited_on.as_deref())?,
        })
    }
}

/// A project row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct ProjectData {
    pub project_id: i64,
    pub project_code: String,
    pub project_name: String,
    pub client_name: Option<String>,
    pub manager_id: Option<i64>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub pitch_deck_url: Option<String>,
    pub github_url: Option<String>,
    pub status: String,
    pub started_on: Option<String>,
    pub closed_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectData {
    /// Converts to the snapshot the project engines plan against.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status or dates are malformed.
    pub fn to_record(&self) -> Result<ProjectRecord, PersistenceError> {
        let status: ProjectStatus = self.status.parse()?;
        Ok(ProjectRecord {
            project_id: self.project_id,
            manager_id: self.manager_id,
            status,
            closed_on: parse_optional_date(self.closed_on.as_deref())?,
        })
    }
}

/// An allocation row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct AllocationData {
    pub allocation_id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub role_label: String,
    pub allocation_percentage: i32,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_billable: i32,
    pub is_critical: i32,
    pub assigned_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl AllocationData {
    /// Converts to the snapshot the allocation engine plans against.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored dates or percentage are malformed.
    pub fn to_record(&self) -> Result<AllocationRecord, PersistenceError> {
        let window = DateWindow {
            start: parse_date(&self.start_date)?,
            end: parse_optional_date(self.end_date.as_deref())?,
        };
        Ok(AllocationRecord {
            allocation_id: self.allocation_id,
            employee_id: self.employee_id,
            project_id: self.project_id,
            role_label: self.role_label.clone(),
            percentage: validate_percentage(i64::from(self.allocation_percentage))?,
            window,
            is_billable: self.is_billable != 0,
            is_critical: self.is_critical != 0,
        })
    }
}

/// A task row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct TaskData {
    pub task_id: i64,
    pub owner_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub description: String,
    pub status: String,
    pub due_on: Option<String>,
    pub assigned_by: i64,
    pub completed_at: Option<String>,
}

impl TaskData {
    /// Parses the row's status string.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status is unrecognized.
    pub fn parse_status(&self) -> Result<TaskStatus, PersistenceError> {
        Ok(self.status.parse()?)
    }

    /// Converts to the snapshot the exit cascade plans against.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status is unrecognized.
    pub fn to_record(&self) -> Result<TaskRecord, PersistenceError> {
        Ok(TaskRecord {
            task_id: self.task_id,
            status: self.parse_status()?,
        })
    }
}

/// A skill row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct SkillData {
    pub skill_id: i64,
    pub skill_name: String,
}

/// An employee-skill link row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct EmployeeSkillData {
    pub employee_skill_id: i64,
    pub employee_id: i64,
    pub skill_id: i64,
    pub proficiency_level: String,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
}

/// A resource demand row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct ResourceDemandData {
    pub demand_id: i64,
    pub project_id: i64,
    pub role_required: String,
    pub skills_required: Option<String>,
    pub start_date: String,
    pub status: String,
    pub requested_by: i64,
    pub created_at: String,
}

/// An audit log row.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct AuditLogData {
    pub audit_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub operation: String,
    pub changed_by: i64,
    pub changed_at: String,
    pub changed_fields: String,
}

/// A session row.
#[derive(Debug, Clone, Queryable)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub employee_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
