// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Authorization is role-based and enforced before any persistence call.
//! Field-level project permissions are not decided here; those belong to
//! the update engine, which knows which fields a manager may touch.

use rand::RngExt;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use wrm_domain::{EmployeeStatus, Role};
use wrm_persistence::{Persistence, PersistenceError};

use crate::error::AuthError;

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The employee id of this actor.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

fn require_hr(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
    if actor.role == Role::HrExecutive {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: String::from("hr_executive"),
        })
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may create or update employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_manage_employees(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "manage_employees")
    }

    /// Checks if an actor may exit an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_exit_employee(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "exit_employee")
    }

    /// Checks if an actor may create a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_create_project(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "create_project")
    }

    /// Checks if an actor may attempt a project update.
    ///
    /// Managers and HR executives may attempt updates; which fields a
    /// manager may change, and on which projects, is enforced by the
    /// update engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a plain employee.
    pub fn authorize_update_project(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::ProjectManager | Role::HrExecutive => Ok(()),
            Role::Employee => Err(AuthError::Unauthorized {
                action: String::from("update_project"),
                required_role: String::from("project_manager"),
            }),
        }
    }

    /// Checks if an actor may close a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_close_project(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "close_project")
    }

    /// Checks if an actor may create, update, or transfer allocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_manage_allocations(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "manage_allocations")
    }

    /// Checks if an actor may create a task. Any authenticated actor may.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other checks.
    pub const fn authorize_create_task(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Ok(())
    }

    /// Checks if an actor may complete a task. The task owner may, as
    /// may HR executives.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the owner nor HR.
    pub fn authorize_complete_task(
        actor: &AuthenticatedActor,
        owner_id: i64,
    ) -> Result<(), AuthError> {
        if actor.id == owner_id || actor.role == Role::HrExecutive {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("complete_task"),
                required_role: String::from("task owner or hr_executive"),
            })
        }
    }

    /// Checks if an actor may request a skill for an employee. Employees
    /// request for themselves; HR executives may request on anyone's
    /// behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the employee nor HR.
    pub fn authorize_request_skill(
        actor: &AuthenticatedActor,
        employee_id: i64,
    ) -> Result<(), AuthError> {
        if actor.id == employee_id || actor.role == Role::HrExecutive {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("request_skill"),
                required_role: String::from("self or hr_executive"),
            })
        }
    }

    /// Checks if an actor may approve a skill request.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_approve_skill(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "approve_skill")
    }

    /// Checks if an actor may raise a resource demand. Only managers
    /// raise demands; which projects qualify is enforced by the
    /// persistence layer (the requester must manage the project).
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a project manager.
    pub fn authorize_create_demand(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role == Role::ProjectManager {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("create_demand"),
                required_role: String::from("project_manager"),
            })
        }
    }

    /// Checks if an actor may view resource demands. Managers see their
    /// own; HR executives see all; plain employees see none.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a plain employee.
    pub fn authorize_view_demands(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::ProjectManager | Role::HrExecutive => Ok(()),
            Role::Employee => Err(AuthError::Unauthorized {
                action: String::from("view_demands"),
                required_role: String::from("project_manager"),
            }),
        }
    }

    /// Checks if an actor may read audit trails.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an HR executive.
    pub fn authorize_view_audit(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_hr(actor, "view_audit")
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration.
    const SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an employee by email and password and creates a
    /// session.
    ///
    /// The failure reason is the same for an unknown email and a wrong
    /// password so the response does not reveal which emails exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are invalid, the employee has
    /// exited, or the session cannot be created.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor), AuthError> {
        let employee = match persistence.get_employee_by_email(email) {
            Ok(employee) => employee,
            Err(PersistenceError::NotFound(_)) => {
                return Err(AuthError::AuthenticationFailed {
                    reason: String::from("Invalid email or password"),
                });
            }
            Err(e) => {
                return Err(AuthError::AuthenticationFailed {
                    reason: format!("Database error: {e}"),
                });
            }
        };

        if employee.status == EmployeeStatus::Exited.as_str() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Employee has exited"),
            });
        }

        let verified = bcrypt::verify(password, &employee.password_hash).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to verify password: {e}"),
            }
        })?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        let role: Role =
            employee
                .role
                .parse()
                .map_err(|_| AuthError::AuthenticationFailed {
                    reason: format!("Invalid role: {}", employee.role),
                })?;

        let session_token = Self::generate_session_token();
        let expires_at = OffsetDateTime::now_utc() + Self::SESSION_EXPIRATION;
        let expires_at_str = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(employee.employee_id, &session_token, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!(employee_id = employee.employee_id, "Login successful");
        Ok((
            session_token,
            AuthenticatedActor::new(employee.employee_id, role),
        ))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is missing or expired, or the
    /// employee behind it has exited.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?;

        let expires_at = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;
        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let employee = persistence
            .get_employee(session.employee_id)
            .map_err(Self::map_persistence_error)?;
        if employee.status == EmployeeStatus::Exited.as_str() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Employee has exited"),
            });
        }

        let role: Role =
            employee
                .role
                .parse()
                .map_err(|_| AuthError::AuthenticationFailed {
                    reason: format!("Invalid role: {}", employee.role),
                })?;

        persistence
            .touch_session(session_token)
            .map_err(Self::map_persistence_error)?;

        debug!(
            employee_id = employee.employee_id,
            role = role.as_str(),
            "Session validated"
        );
        Ok(AuthenticatedActor::new(employee.employee_id, role))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    fn generate_session_token() -> String {
        let token: u128 = rand::rng().random();
        format!("{token:032x}")
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(reason)
            | PersistenceError::SessionNotFound(reason) => {
                AuthError::AuthenticationFailed { reason }
            }
            PersistenceError::NotFound(reason) => AuthError::AuthenticationFailed { reason },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
