// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The project update engine: field permissions plus the status state
//! machine.
//!
//! Every field present in a patch is checked against the actor's role
//! before anything else is considered. Status changes additionally run
//! through the role-keyed transition table, and a transition into a
//! terminal status performs the same allocation-truncation cascade as an
//! explicit project closure, keeping `closed_on` present exactly on
//! terminal projects.

use crate::error::CoreError;
use crate::records::{AllocationRecord, PendingAudit, ProjectRecord};
use serde_json::json;
use time::Date;
use wrm_domain::{DomainError, EntityKind, ProjectField, ProjectStatus, Role};

/// Partial changes to a project. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    /// Always rejected; present so the attempt can be reported precisely.
    pub project_code: Option<String>,
    pub project_name: Option<String>,
    pub client_name: Option<String>,
    pub manager_id: Option<i64>,
    pub started_on: Option<Date>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub pitch_deck_url: Option<String>,
    pub github_url: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Required when `status` moves the project into a terminal state.
    pub closed_on: Option<Date>,
}

impl ProjectPatch {
    /// The fields present in this patch, in schema order.
    fn present_fields(&self) -> Vec<ProjectField> {
        let mut fields = Vec::new();
        if self.project_code.is_some() {
            fields.push(ProjectField::ProjectCode);
        }
        if self.project_name.is_some() {
            fields.push(ProjectField::ProjectName);
        }
        if self.client_name.is_some() {
            fields.push(ProjectField::ClientName);
        }
        if self.manager_id.is_some() {
            fields.push(ProjectField::ProjectManagerId);
        }
        if self.started_on.is_some() {
            fields.push(ProjectField::StartedOn);
        }
        if self.short_description.is_some() {
            fields.push(ProjectField::ShortDescription);
        }
        if self.long_description.is_some() {
            fields.push(ProjectField::LongDescription);
        }
        if self.pitch_deck_url.is_some() {
            fields.push(ProjectField::PitchDeckUrl);
        }
        if self.github_url.is_some() {
            fields.push(ProjectField::GithubUrl);
        }
        if self.status.is_some() {
            fields.push(ProjectField::Status);
        }
        fields
    }
}

/// A planned project update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectPlan {
    pub project_id: i64,
    pub changes: ProjectPatch,
    /// Set when the patch moves the project into a terminal status.
    pub closed_on: Option<Date>,
    /// Closure cascade: allocations whose end date moves to `closed_on`.
    pub allocations_to_truncate: Vec<i64>,
    pub audit: PendingAudit,
}

/// Plans a project update on behalf of `actor_id` acting as `role`.
///
/// `allocations` are the project's current allocations, consulted only
/// when the patch closes the project.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` when:
/// - the patch is empty;
/// - a project manager touches a project they do not manage, or a field
///   outside their descriptive set;
/// - any actor touches the immutable project code;
/// - a status change is not in the transition table for the role;
/// - a transition into a terminal status omits `closed_on`.
pub fn plan_update_project(
    project: &ProjectRecord,
    patch: ProjectPatch,
    actor_id: i64,
    role: Role,
    allocations: &[AllocationRecord],
) -> Result<UpdateProjectPlan, CoreError> {
    let fields = patch.present_fields();
    if fields.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::Validation(
            String::from("No fields to update"),
        )));
    }

    if role == Role::ProjectManager && project.manager_id != Some(actor_id) {
        return Err(CoreError::DomainViolation(DomainError::Forbidden(
            String::from("Cannot update projects you do not manage"),
        )));
    }

    for field in &fields {
        field.validate_writable_by(role)?;
    }

    // A repeated status is a no-op, not a transition.
    let new_status = patch.status.filter(|status| *status != project.status);
    if let Some(status) = new_status {
        project.status.validate_transition(status, role)?;
    }

    let closing = new_status.is_some_and(|status| status.is_terminal());
    let closed_on = if closing {
        match patch.closed_on {
            Some(date) => Some(date),
            None => {
                return Err(CoreError::DomainViolation(DomainError::Validation(
                    String::from("closed_on is required when closing a project"),
                )));
            }
        }
    } else {
        None
    };

    let allocations_to_truncate = match closed_on {
        Some(cutoff) => allocations
            .iter()
            .filter(|alloc| alloc.window.end.is_none_or(|end| end > cutoff))
            .map(|alloc| alloc.allocation_id)
            .collect(),
        None => Vec::new(),
    };

    let audit = PendingAudit::for_update(
        EntityKind::Project,
        project.project_id,
        changed_fields_json(&patch, closed_on, allocations_to_truncate.len()),
    );

    Ok(UpdateProjectPlan {
        project_id: project.project_id,
        changes: patch,
        closed_on,
        allocations_to_truncate,
        audit,
    })
}

fn changed_fields_json(
    patch: &ProjectPatch,
    closed_on: Option<Date>,
    allocations_ended: usize,
) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    if let Some(value) = &patch.project_name {
        fields.insert(String::from("project_name"), json!(value));
    }
    if let Some(value) = &patch.client_name {
        fields.insert(String::from("client_name"), json!(value));
    }
    if let Some(value) = patch.manager_id {
        fields.insert(String::from("manager_id"), json!(value));
    }
    if let Some(value) = patch.started_on {
        fields.insert(String::from("started_on"), json!(value.to_string()));
    }
    if let Some(value) = &patch.short_description {
        fields.insert(String::from("short_description"), json!(value));
    }
    if let Some(value) = &patch.long_description {
        fields.insert(String::from("long_description"), json!(value));
    }
    if let Some(value) = &patch.pitch_deck_url {
        fields.insert(String::from("pitch_deck_url"), json!(value));
    }
    if let Some(value) = &patch.github_url {
        fields.insert(String::from("github_url"), json!(value));
    }
    if let Some(status) = patch.status {
        fields.insert(String::from("status"), json!(status.as_str()));
    }
    if let Some(date) = closed_on {
        fields.insert(String::from("closed_on"), json!(date.to_string()));
        fields.insert(String::from("allocations_ended"), json!(allocations_ended));
    }
    serde_json::Value::Object(fields)
}
