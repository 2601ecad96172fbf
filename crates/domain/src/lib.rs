// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod employee;
mod entity;
mod error;
mod project;
mod role;
mod task;
mod validation;

#[cfg(test)]
mod tests;

pub use allocation::{
    AllocationSpan, CAPACITY_LIMIT, DateWindow, check_capacity, overlapping_total,
    validate_percentage, validate_transfer_date,
};
pub use employee::{EmployeeStatus, validate_exit_date};
pub use entity::{EntityKind, EntityRef};
pub use error::DomainError;
pub use project::{ProjectField, ProjectStatus};
pub use role::Role;
pub use task::TaskStatus;
pub use validation::{
    parse_date, parse_optional_date, validate_email, validate_required,
};
