// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entity::EntityKind;
use crate::project::ProjectStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or logically invalid input (bad date ordering, bad literal).
    Validation(String),
    /// An allocation would push an employee past 100% of capacity.
    CapacityExceeded {
        /// Sum of overlapping allocation percentages before this request.
        current: u32,
        /// The percentage being requested.
        requested: u32,
        /// The sum that would result (`current + requested`).
        total: u32,
    },
    /// The actor lacks permission for a specific field or operation.
    Forbidden(String),
    /// A project status transition not permitted by the transition table.
    InvalidTransition {
        /// The current status.
        from: ProjectStatus,
        /// The requested status.
        to: ProjectStatus,
    },
    /// A referenced entity does not exist.
    NotFound(EntityKind),
    /// Role string is not a recognized role.
    InvalidRole(String),
    /// Employee status string is not a recognized status.
    InvalidEmployeeStatus(String),
    /// Project status string is not a recognized status.
    InvalidProjectStatus(String),
    /// Task status string is not a recognized status.
    InvalidTaskStatus(String),
    /// Entity type string is not a recognized entity kind.
    InvalidEntityKind(String),
    /// Allocation percentage outside the 0-100 range.
    InvalidPercentage {
        /// The offending value.
        value: i64,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::CapacityExceeded {
                current,
                requested,
                total,
            } => {
                write!(
                    f,
                    "Allocation exceeds capacity: current {current}% + requested {requested}% = {total}% (limit 100%)"
                )
            }
            Self::Forbidden(msg) => write!(f, "{msg}"),
            Self::InvalidTransition { from, to } => {
                write!(
                    f,
                    "Invalid project status transition from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::NotFound(kind) => write!(f, "{} not found", kind.as_str()),
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::InvalidEmployeeStatus(value) => {
                write!(f, "Invalid employee status: {value}")
            }
            Self::InvalidProjectStatus(value) => {
                write!(f, "Invalid project status: {value}")
            }
            Self::InvalidTaskStatus(value) => write!(f, "Invalid task status: {value}"),
            Self::InvalidEntityKind(value) => write!(f, "Invalid entity type: {value}"),
            Self::InvalidPercentage { value } => {
                write!(
                    f,
                    "Invalid allocation percentage: {value}. Must be between 0 and 100"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
