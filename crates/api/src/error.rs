// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use wrm_domain::DomainError;
use wrm_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed. The actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor's role allows the operation in general but not on this
    /// target or field.
    Forbidden {
        /// A human-readable description of what was refused.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The HTTP status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AuthenticationFailed { .. } => 401,
            Self::Unauthorized { .. } | Self::Forbidden { .. } => 403,
            Self::DomainRuleViolation { .. } | Self::InvalidInput { .. } => 400,
            Self::ResourceNotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Forbidden { message } => write!(f, "Forbidden: {message}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::Validation(message) => ApiError::DomainRuleViolation {
            rule: String::from("validation"),
            message,
        },
        DomainError::CapacityExceeded {
            current,
            requested,
            total,
        } => ApiError::DomainRuleViolation {
            rule: String::from("allocation_capacity"),
            message: format!(
                "Employee is allocated {current}% over the requested window; adding {requested}% would reach {total}%, above the 100% cap"
            ),
        },
        DomainError::Forbidden(message) => ApiError::Forbidden { message },
        DomainError::InvalidTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!(
                "Cannot transition project from {} to {}",
                from.as_str(),
                to.as_str()
            ),
        },
        DomainError::NotFound(kind) => ApiError::ResourceNotFound {
            resource_type: kind.as_str().to_string(),
            message: format!("{} does not exist", kind.as_str()),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role: {value}"),
        },
        DomainError::InvalidEmployeeStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown employee status: {value}"),
        },
        DomainError::InvalidProjectStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown project status: {value}"),
        },
        DomainError::InvalidTaskStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown task status: {value}"),
        },
        DomainError::InvalidEntityKind(value) => ApiError::InvalidInput {
            field: String::from("entity_type"),
            message: format!("Unknown entity type: {value}"),
        },
        DomainError::InvalidPercentage { value } => ApiError::InvalidInput {
            field: String::from("allocation_percentage"),
            message: format!("Invalid allocation percentage: {value}. Must be between 0 and 100"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Domain(domain_err) => translate_domain_error(domain_err),
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::SessionNotFound(reason) | PersistenceError::SessionExpired(reason) => {
            ApiError::AuthenticationFailed { reason }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
