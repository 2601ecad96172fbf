// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee status and exit validation.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Employment states. Exit is one-way; there is no rehire path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    Exited,
}

impl EmployeeStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Exited => "EXITED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "EXITED" => Ok(Self::Exited),
            _ => Err(DomainError::InvalidEmployeeStatus(s.to_string())),
        }
    }

    /// Returns true if the employee can no longer be allocated or assigned.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Exited)
    }
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Validates an exit date against the employee's join date.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `exited_on` precedes `joined_on`.
pub fn validate_exit_date(joined_on: Date, exited_on: Date) -> Result<(), DomainError> {
    if exited_on < joined_on {
        return Err(DomainError::Validation(String::from(
            "exited_on must be >= joined_on",
        )));
    }
    Ok(())
}
