// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row snapshots the engines plan against, and the pending audit entries
//! their plans carry.
//!
//! The engines are pure: they never touch storage. The persistence layer
//! loads the relevant rows into these snapshot types, asks an engine for a
//! plan, and executes the plan (rows plus audit entries) in one
//! transaction.

use time::Date;
use wrm_audit::Operation;
use wrm_domain::{
    AllocationSpan, DateWindow, EmployeeStatus, EntityKind, ProjectStatus, TaskStatus,
};

/// A persisted allocation, as loaded for planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    pub allocation_id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub role_label: String,
    pub percentage: u32,
    pub window: DateWindow,
    pub is_billable: bool,
    pub is_critical: bool,
}

impl AllocationRecord {
    /// Projects this record down to the view the capacity check needs.
    #[must_use]
    pub fn span(&self) -> AllocationSpan {
        AllocationSpan {
            allocation_id: self.allocation_id,
            window: self.window,
            percentage: self.percentage,
        }
    }
}

/// The employee fields the lifecycle engine plans against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee_id: i64,
    pub status: EmployeeStatus,
    pub joined_on: Date,
    pub exited_on: Option<Date>,
}

/// The project fields the state machine and lifecycle engine plan against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub project_id: i64,
    pub manager_id: Option<i64>,
    pub status: ProjectStatus,
    pub closed_on: Option<Date>,
}

/// A task owned by an employee, as loaded for the exit cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRecord {
    pub task_id: i64,
    pub status: TaskStatus,
}

/// An audit entry a plan wants written.
///
/// `entity_id` is `None` when the entry describes the row the plan itself
/// inserts; the executor fills in the id the insert produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAudit {
    pub entity_kind: EntityKind,
    pub entity_id: Option<i64>,
    pub operation: Operation,
    pub changed_fields: serde_json::Value,
}

impl PendingAudit {
    /// An entry for the row this plan inserts.
    #[must_use]
    pub const fn for_inserted_row(entity_kind: EntityKind, changed_fields: serde_json::Value) -> Self {
        Self {
            entity_kind,
            entity_id: None,
            operation: Operation::Insert,
            changed_fields,
        }
    }

    /// An entry for an update to a known row.
    #[must_use]
    pub const fn for_update(
        entity_kind: EntityKind,
        entity_id: i64,
        changed_fields: serde_json::Value,
    ) -> Self {
        Self {
            entity_kind,
            entity_id: Some(entity_id),
            operation: Operation::Update,
            changed_fields,
        }
    }
}
