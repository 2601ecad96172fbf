// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed references to auditable entities.
//!
//! Tasks and audit entries reference other entities polymorphically. Rather
//! than an untyped (string, id) pair, references are a tagged union keyed by
//! entity kind, each variant carrying the referenced row's id.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kinds of entity that can be referenced by tasks and audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Employee,
    Project,
    Allocation,
    Task,
    Skill,
    EmployeeSkill,
    ResourceDemand,
}

impl EntityKind {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Project => "PROJECT",
            Self::Allocation => "ALLOCATION",
            Self::Task => "TASK",
            Self::Skill => "SKILL",
            Self::EmployeeSkill => "EMPLOYEE_SKILL",
            Self::ResourceDemand => "RESOURCE_DEMAND",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "EMPLOYEE" => Ok(Self::Employee),
            "PROJECT" => Ok(Self::Project),
            "ALLOCATION" => Ok(Self::Allocation),
            "TASK" => Ok(Self::Task),
            "SKILL" => Ok(Self::Skill),
            "EMPLOYEE_SKILL" => Ok(Self::EmployeeSkill),
            "RESOURCE_DEMAND" => Ok(Self::ResourceDemand),
            _ => Err(DomainError::InvalidEntityKind(s.to_string())),
        }
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A typed reference to a single entity row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Employee(i64),
    Project(i64),
    Allocation(i64),
    Task(i64),
    Skill(i64),
    EmployeeSkill(i64),
    ResourceDemand(i64),
}

impl EntityRef {
    /// Constructs a reference from a kind and an id.
    #[must_use]
    pub const fn new(kind: EntityKind, id: i64) -> Self {
        match kind {
            EntityKind::Employee => Self::Employee(id),
            EntityKind::Project => Self::Project(id),
            EntityKind::Allocation => Self::Allocation(id),
            EntityKind::Task => Self::Task(id),
            EntityKind::Skill => Self::Skill(id),
            EntityKind::EmployeeSkill => Self::EmployeeSkill(id),
            EntityKind::ResourceDemand => Self::ResourceDemand(id),
        }
    }

    /// Returns the kind tag of this reference.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Employee(_) => EntityKind::Employee,
            Self::Project(_) => EntityKind::Project,
            Self::Allocation(_) => EntityKind::Allocation,
            Self::Task(_) => EntityKind::Task,
            Self::Skill(_) => EntityKind::Skill,
            Self::EmployeeSkill(_) => EntityKind::EmployeeSkill,
            Self::ResourceDemand(_) => EntityKind::ResourceDemand,
        }
    }

    /// Returns the referenced row id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Employee(id)
            | Self::Project(id)
            | Self::Allocation(id)
            | Self::Task(id)
            | Self::Skill(id)
            | Self::EmployeeSkill(id)
            | Self::ResourceDemand(id) => *id,
        }
    }
}
