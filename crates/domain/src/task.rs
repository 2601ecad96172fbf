// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task status lifecycle.
//!
//! Tasks are lightweight work items hung off other entities via a typed
//! reference. They start `DUE` and end either `COMPLETED` (by their owner
//! or HR) or `CANCELLED` (by the employee-exit cascade). Both ends are
//! terminal.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Due,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Due => "DUE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "DUE" => Ok(Self::Due),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidTaskStatus(s.to_string())),
        }
    }

    /// Returns true if the task can no longer change state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validates completing a task in this status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the task is already terminal.
    pub fn validate_complete(&self) -> Result<(), DomainError> {
        match self {
            Self::Due => Ok(()),
            Self::Completed => Err(DomainError::Validation(String::from(
                "Task is already completed",
            ))),
            Self::Cancelled => Err(DomainError::Validation(String::from(
                "Cannot complete a cancelled task",
            ))),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
