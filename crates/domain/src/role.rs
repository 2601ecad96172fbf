// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles for authorization and permission dispatch.
//!
//! Roles form a closed set; every permission decision in the system is a
//! match over this enum rather than a string comparison in a handler.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role assigned to an employee account.
///
/// Roles gate which operations an actor may perform and which project
/// fields they may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular employee: owns tasks, logs work, requests skills.
    Employee,
    /// Project manager: edits descriptive fields and pauses/resumes
    /// projects they manage.
    ProjectManager,
    /// HR executive: full administrative authority, including allocations,
    /// employee exits, and project closure.
    HrExecutive,
}

impl Role {
    /// Returns the string representation of the role.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::ProjectManager => "project_manager",
            Self::HrExecutive => "hr_executive",
        }
    }

    /// Parses a role from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "employee" => Ok(Self::Employee),
            "project_manager" => Ok(Self::ProjectManager),
            "hr_executive" => Ok(Self::HrExecutive),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
