// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project status lifecycle and field-level write permissions.
//!
//! Status transitions are validated against a table keyed by the actor's
//! role; `COMPLETED` and `CANCELLED` are terminal for every role. Field
//! permissions are independent of transition validity: a project manager
//! may touch only descriptive fields on projects they manage, while HR may
//! write anything except the immutable project code.

use crate::error::DomainError;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Project lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Created but not yet staffed or started.
    Draft,
    /// Actively running.
    Active,
    /// Paused; can resume or be closed.
    OnHold,
    /// Finished successfully. Terminal.
    Completed,
    /// Abandoned. Terminal.
    Cancelled,
}

impl ProjectStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::OnHold => "ON_HOLD",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            "ON_HOLD" => Ok(Self::OnHold),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidProjectStatus(s.to_string())),
        }
    }

    /// Returns true if this status has no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validates a status transition for the given actor role.
    ///
    /// Transition table:
    ///
    /// | From \ Role | `project_manager` | `hr_executive` |
    /// |---|---|---|
    /// | DRAFT | ACTIVE | ACTIVE |
    /// | ACTIVE | `ON_HOLD` | `ON_HOLD`, COMPLETED, CANCELLED |
    /// | `ON_HOLD` | ACTIVE | ACTIVE, COMPLETED, CANCELLED |
    ///
    /// Plain employees have no transitions at all.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` for any pair not in the
    /// table.
    pub fn validate_transition(&self, new_status: Self, role: Role) -> Result<(), DomainError> {
        let valid = match role {
            Role::Employee => false,
            Role::ProjectManager => matches!(
                (self, new_status),
                (Self::Draft, Self::Active)
                    | (Self::Active, Self::OnHold)
                    | (Self::OnHold, Self::Active)
            ),
            Role::HrExecutive => matches!(
                (self, new_status),
                (Self::Draft, Self::Active)
                    | (Self::Active, Self::OnHold | Self::Completed | Self::Cancelled)
                    | (Self::OnHold, Self::Active | Self::Completed | Self::Cancelled)
            ),
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: *self,
                to: new_status,
            })
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Writable fields on a project update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    ProjectCode,
    ProjectName,
    ClientName,
    ProjectManagerId,
    StartedOn,
    ShortDescription,
    LongDescription,
    PitchDeckUrl,
    GithubUrl,
    Status,
}

impl ProjectField {
    /// Returns the wire name of the field as it appears in payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCode => "project_code",
            Self::ProjectName => "project_name",
            Self::ClientName => "client_name",
            Self::ProjectManagerId => "project_manager_id",
            Self::StartedOn => "started_on",
            Self::ShortDescription => "short_description",
            Self::LongDescription => "long_description",
            Self::PitchDeckUrl => "pitch_deck_url",
            Self::GithubUrl => "github_url",
            Self::Status => "status",
        }
    }

    /// Validates that `role` may write this field.
    ///
    /// Project managers may write only descriptive fields and status; HR
    /// may write anything except the immutable project code. Transition
    /// validity for status writes is checked separately.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` for manager-restricted fields and
    /// `DomainError::Validation` for the immutable project code.
    pub fn validate_writable_by(&self, role: Role) -> Result<(), DomainError> {
        if matches!(self, Self::ProjectCode) {
            // Immutable after creation for every role.
            return Err(DomainError::Validation(String::from(
                "Cannot update project_code",
            )));
        }

        match role {
            Role::HrExecutive => Ok(()),
            Role::ProjectManager => match self {
                Self::ShortDescription
                | Self::LongDescription
                | Self::PitchDeckUrl
                | Self::GithubUrl
                | Self::Status => Ok(()),
                _ => Err(DomainError::Forbidden(format!(
                    "Cannot update {}. HR only",
                    self.as_str()
                ))),
            },
            Role::Employee => Err(DomainError::Forbidden(format!(
                "Cannot update {}. HR only",
                self.as_str()
            ))),
        }
    }
}
