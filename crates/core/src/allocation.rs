// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The allocation consistency engine.
//!
//! Plans allocation creates, updates, and transfers against the capacity
//! cap. Every plan is computed from a snapshot of the employee's existing
//! allocations; the executor must hold the write lock across both the
//! snapshot read and the plan execution so no concurrent writer can slip
//! an allocation in between.

use crate::error::CoreError;
use crate::records::{AllocationRecord, PendingAudit};
use serde_json::json;
use time::Date;
use wrm_domain::{
    AllocationSpan, DateWindow, EntityKind, check_capacity, validate_percentage,
    validate_required, validate_transfer_date,
};

/// A requested new allocation, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    pub employee_id: i64,
    pub project_id: i64,
    pub role_label: String,
    /// Raw percentage as received on the wire.
    pub percentage: i64,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub is_billable: bool,
    pub is_critical: bool,
}

/// Validated values for an allocation row about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAllocation {
    pub employee_id: i64,
    pub project_id: i64,
    pub role_label: String,
    pub percentage: u32,
    pub window: DateWindow,
    pub is_billable: bool,
    pub is_critical: bool,
}

/// Partial changes to an existing allocation. `None` means "leave as is";
/// for the end date, `Some(None)` clears it to open-ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationPatch {
    pub role_label: Option<String>,
    pub percentage: Option<i64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Option<Date>>,
    pub is_billable: Option<bool>,
    pub is_critical: Option<bool>,
}

/// A planned allocation insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAllocationPlan {
    pub allocation: NewAllocation,
    pub audit: PendingAudit,
}

/// A planned in-place allocation update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAllocationPlan {
    pub allocation_id: i64,
    pub updated: NewAllocation,
    pub audit: PendingAudit,
}

/// A planned transfer: truncate the old allocation, insert its
/// continuation on the target project. Both rows or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAllocationPlan {
    pub allocation_id: i64,
    /// New end date for the allocation being left.
    pub truncate_to: Date,
    pub replacement: NewAllocation,
    pub truncate_audit: PendingAudit,
    pub replacement_audit: PendingAudit,
}

/// Plans a new allocation, enforcing the capacity cap over `existing`
/// (the employee's current allocations).
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` for inverted dates, out-of-range
/// percentages, or a capacity overflow.
pub fn plan_create(
    existing: &[AllocationSpan],
    request: AllocationRequest,
) -> Result<CreateAllocationPlan, CoreError> {
    validate_required("role_label", &request.role_label)?;
    let window = DateWindow::new(request.start_date, request.end_date)?;
    let percentage = validate_percentage(request.percentage)?;
    check_capacity(existing, &window, percentage, None)?;

    let audit = PendingAudit::for_inserted_row(
        EntityKind::Allocation,
        json!({
            "employee_id": request.employee_id,
            "project_id": request.project_id,
            "role_label": request.role_label,
            "allocation_percentage": percentage,
            "start_date": request.start_date.to_string(),
            "end_date": request.end_date.map(|d| d.to_string()),
            "is_billable": request.is_billable,
            "is_critical": request.is_critical,
        }),
    );

    Ok(CreateAllocationPlan {
        allocation: NewAllocation {
            employee_id: request.employee_id,
            project_id: request.project_id,
            role_label: request.role_label,
            percentage,
            window,
            is_billable: request.is_billable,
            is_critical: request.is_critical,
        },
        audit,
    })
}

/// Plans an update to an existing allocation.
///
/// The capacity check runs over the possibly-changed window and
/// percentage, with the allocation excluded from its own overlap sum.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` on the same conditions as
/// [`plan_create`].
pub fn plan_update(
    existing: &[AllocationSpan],
    current: &AllocationRecord,
    patch: AllocationPatch,
) -> Result<UpdateAllocationPlan, CoreError> {
    let start = patch.start_date.unwrap_or(current.window.start);
    let end = patch.end_date.unwrap_or(current.window.end);
    let window = DateWindow::new(start, end)?;

    let percentage = match patch.percentage {
        Some(raw) => validate_percentage(raw)?,
        None => current.percentage,
    };
    let role_label = patch
        .role_label
        .unwrap_or_else(|| current.role_label.clone());
    validate_required("role_label", &role_label)?;

    check_capacity(existing, &window, percentage, Some(current.allocation_id))?;

    let audit = PendingAudit::for_update(
        EntityKind::Allocation,
        current.allocation_id,
        json!({
            "role_label": role_label,
            "allocation_percentage": percentage,
            "start_date": start.to_string(),
            "end_date": end.map(|d| d.to_string()),
            "is_billable": patch.is_billable.unwrap_or(current.is_billable),
            "is_critical": patch.is_critical.unwrap_or(current.is_critical),
        }),
    );

    Ok(UpdateAllocationPlan {
        allocation_id: current.allocation_id,
        updated: NewAllocation {
            employee_id: current.employee_id,
            project_id: current.project_id,
            role_label,
            percentage,
            window,
            is_billable: patch.is_billable.unwrap_or(current.is_billable),
            is_critical: patch.is_critical.unwrap_or(current.is_critical),
        },
        audit,
    })
}

/// Plans moving the tail of an allocation to another project.
///
/// The old allocation is truncated to `transfer_date`; the replacement
/// starts there on `target_project_id` with identical percentage, role,
/// and flags, and keeps the old end date. The percentage is unchanged by
/// construction, so no capacity re-check is needed.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if `transfer_date` falls outside
/// the allocation's window.
pub fn plan_transfer(
    current: &AllocationRecord,
    target_project_id: i64,
    transfer_date: Date,
) -> Result<TransferAllocationPlan, CoreError> {
    validate_transfer_date(&current.window, transfer_date)?;

    let replacement_window = DateWindow::new(transfer_date, current.window.end)?;

    let truncate_audit = PendingAudit::for_update(
        EntityKind::Allocation,
        current.allocation_id,
        json!({
            "end_date": transfer_date.to_string(),
            "transfer_to_project_id": target_project_id,
        }),
    );
    let replacement_audit = PendingAudit::for_inserted_row(
        EntityKind::Allocation,
        json!({
            "employee_id": current.employee_id,
            "project_id": target_project_id,
            "role_label": current.role_label,
            "allocation_percentage": current.percentage,
            "start_date": transfer_date.to_string(),
            "end_date": current.window.end.map(|d| d.to_string()),
            "transferred_from_allocation_id": current.allocation_id,
        }),
    );

    Ok(TransferAllocationPlan {
        allocation_id: current.allocation_id,
        truncate_to: transfer_date,
        replacement: NewAllocation {
            employee_id: current.employee_id,
            project_id: target_project_id,
            role_label: current.role_label.clone(),
            percentage: current.percentage,
            window: replacement_window,
            is_billable: current.is_billable,
            is_critical: current.is_critical,
        },
        truncate_audit,
        replacement_audit,
    })
}
