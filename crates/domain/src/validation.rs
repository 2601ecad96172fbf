// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level input validation shared by every mutation path.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Validates that a required string field is present and non-blank.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming the field if the value is
/// empty or whitespace-only.
pub fn validate_required(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validates a minimally plausible email address.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the value is blank or lacks an
/// `@` with text on both sides.
pub fn validate_email(value: &str) -> Result<(), DomainError> {
    validate_required("email", value)?;
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(DomainError::Validation(format!("Invalid email: {value}")));
    }
    Ok(())
}

/// Parses a calendar date from the `YYYY-MM-DD` wire format.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` carrying the offending string.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses an optional date field, passing `None` through.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if a present value is malformed.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, DomainError> {
    value.map(parse_date).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_required_rejects_blank() {
        assert!(validate_required("full_name", "Ada Lovelace").is_ok());
        assert!(validate_required("full_name", "").is_err());
        assert!(validate_required("full_name", "   ").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@nodomain").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_parse_date_wire_format() {
        assert_eq!(parse_date("2024-06-01").ok(), Some(date!(2024 - 06 - 01)));
        assert!(parse_date("06/01/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).ok(), Some(None));
        assert_eq!(
            parse_optional_date(Some("2024-06-01")).ok(),
            Some(Some(date!(2024 - 06 - 01)))
        );
        assert!(parse_optional_date(Some("nope")).is_err());
    }
}
