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
    clippy::all
)]

//! Audit trail types.
//!
//! Every successful mutation produces one audit entry (two for an
//! allocation transfer) recording what row changed, how, by whom, and
//! which fields were involved. Entries are immutable once created; the
//! persistence layer appends them in the same transaction as the row
//! changes they describe, so a rolled-back mutation leaves no trace.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wrm_domain::{DomainError, EntityRef};

/// The kind of row change an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

impl Operation {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(DomainError::Validation(format!(
                "Invalid audit operation: {s}"
            ))),
        }
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// An immutable record of one row change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The row that changed.
    pub entity: EntityRef,
    /// How it changed.
    pub operation: Operation,
    /// The employee id of the actor who made the change.
    pub changed_by: i64,
    /// The changed fields and their new values, as a JSON object.
    pub changed_fields: serde_json::Value,
}

impl AuditEntry {
    /// Creates an entry for a freshly inserted row.
    #[must_use]
    pub const fn insert(entity: EntityRef, changed_by: i64, changed_fields: serde_json::Value) -> Self {
        Self {
            entity,
            operation: Operation::Insert,
            changed_by,
            changed_fields,
        }
    }

    /// Creates an entry for an updated row.
    #[must_use]
    pub const fn update(entity: EntityRef, changed_by: i64, changed_fields: serde_json::Value) -> Self {
        Self {
            entity,
            operation: Operation::Update,
            changed_by,
            changed_fields,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wrm_domain::EntityKind;

    #[test]
    fn test_operation_string_round_trip() {
        for op in [Operation::Insert, Operation::Update, Operation::Delete] {
            assert_eq!(Operation::parse_str(op.as_str()).ok(), Some(op));
        }
    }

    #[test]
    fn test_invalid_operation_string() {
        assert!(Operation::parse_str("UPSERT").is_err());
    }

    #[test]
    fn test_insert_entry_carries_entity_and_actor() {
        let entry = AuditEntry::insert(
            EntityRef::new(EntityKind::Allocation, 7),
            3,
            json!({ "allocation_percentage": 40 }),
        );

        assert_eq!(entry.entity, EntityRef::Allocation(7));
        assert_eq!(entry.operation, Operation::Insert);
        assert_eq!(entry.changed_by, 3);
        assert_eq!(entry.changed_fields["allocation_percentage"], 40);
    }

    #[test]
    fn test_update_entry_operation() {
        let entry = AuditEntry::update(EntityRef::Project(2), 1, json!({ "status": "ACTIVE" }));
        assert_eq!(entry.operation, Operation::Update);
    }
}
