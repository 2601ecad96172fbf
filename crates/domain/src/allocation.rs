// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation interval arithmetic and the capacity cap.
//!
//! An allocation occupies a closed date interval at a percentage of an
//! employee's capacity. The single hard invariant of the system lives here:
//! for any instant, the sum of allocation percentages across all of an
//! employee's intervals covering that instant must never exceed 100.
//!
//! ## Invariants
//!
//! - Two closed intervals `[s1, e1]` and `[s2, e2]` overlap iff
//!   `s1 <= e2 && s2 <= e1`.
//! - A missing end date means "open-ended" and is treated as unbounded for
//!   overlap purposes. Lifecycle events (employee exit, project closure)
//!   eventually force a concrete end date onto open allocations.

use crate::error::DomainError;
use time::Date;

/// The capacity ceiling on simultaneous allocation percentage.
pub const CAPACITY_LIMIT: u32 = 100;

/// A date interval with an optional (= unbounded) upper end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day of the interval (inclusive).
    pub start: Date,
    /// Last day of the interval (inclusive); `None` means open-ended.
    pub end: Option<Date>,
}

impl DateWindow {
    /// Creates a window, validating date ordering when an end is present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `end < start`.
    pub fn new(start: Date, end: Option<Date>) -> Result<Self, DomainError> {
        if let Some(end_date) = end
            && end_date < start
        {
            return Err(DomainError::Validation(String::from(
                "end_date must be >= start_date",
            )));
        }
        Ok(Self { start, end })
    }

    /// Returns true if this window shares at least one day with `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let self_starts_before_other_ends = match other.end {
            Some(other_end) => self.start <= other_end,
            None => true,
        };
        let other_starts_before_self_ends = match self.end {
            Some(self_end) => other.start <= self_end,
            None => true,
        };
        self_starts_before_other_ends && other_starts_before_self_ends
    }

    /// Returns true if `date` falls within this window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        if date < self.start {
            return false;
        }
        match self.end {
            Some(end) => date <= end,
            None => true,
        }
    }
}

/// An existing allocation's share of an employee's capacity.
///
/// This is the minimal view of a persisted allocation that the capacity
/// check needs: its id (so updates can exclude themselves), its window,
/// and its percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSpan {
    /// The persisted allocation id.
    pub allocation_id: i64,
    /// The allocation's date window.
    pub window: DateWindow,
    /// The allocation's percentage of capacity (0-100).
    pub percentage: u32,
}

/// Validates that a percentage is within the 0-100 range.
///
/// # Errors
///
/// Returns `DomainError::InvalidPercentage` for out-of-range values.
pub fn validate_percentage(value: i64) -> Result<u32, DomainError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= CAPACITY_LIMIT)
        .ok_or(DomainError::InvalidPercentage { value })
}

/// Sums the percentages of existing allocations that overlap `window`,
/// excluding the allocation identified by `exclude_id` (if any).
///
/// The exclusion exists for updates: an allocation must not count against
/// itself when its own window or percentage changes.
#[must_use]
pub fn overlapping_total(
    existing: &[AllocationSpan],
    window: &DateWindow,
    exclude_id: Option<i64>,
) -> u32 {
    existing
        .iter()
        .filter(|span| exclude_id != Some(span.allocation_id))
        .filter(|span| span.window.overlaps(window))
        .map(|span| span.percentage)
        .sum()
}

/// Enforces the capacity cap for a requested allocation.
///
/// Computes the overlapping total over `existing` (minus `exclude_id`) and
/// rejects the request if adding `requested` would push the sum past 100.
///
/// # Returns
///
/// The pre-existing overlapping total on success, so callers can report it.
///
/// # Errors
///
/// Returns `DomainError::CapacityExceeded` carrying the current total, the
/// requested percentage, and the sum that was rejected.
pub fn check_capacity(
    existing: &[AllocationSpan],
    window: &DateWindow,
    requested: u32,
    exclude_id: Option<i64>,
) -> Result<u32, DomainError> {
    let current = overlapping_total(existing, window, exclude_id);
    let total = current + requested;
    if total > CAPACITY_LIMIT {
        return Err(DomainError::CapacityExceeded {
            current,
            requested,
            total,
        });
    }
    Ok(current)
}

/// Validates that a transfer date falls within the allocation being split.
///
/// An open-ended allocation accepts any transfer date on or after its
/// start.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the date is outside the window.
pub fn validate_transfer_date(window: &DateWindow, transfer_date: Date) -> Result<(), DomainError> {
    if !window.contains(transfer_date) {
        return Err(DomainError::Validation(String::from(
            "transfer_date must be between start_date and end_date",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn window(start: Date, end: Option<Date>) -> DateWindow {
        DateWindow::new(start, end).expect("valid window")
    }

    fn span(id: i64, start: Date, end: Option<Date>, percentage: u32) -> AllocationSpan {
        AllocationSpan {
            allocation_id: id,
            window: window(start, end),
            percentage,
        }
    }

    #[test]
    fn test_window_rejects_inverted_dates() {
        let result = DateWindow::new(date!(2024 - 06 - 01), Some(date!(2024 - 01 - 01)));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_single_day_window_is_valid() {
        let result = DateWindow::new(date!(2024 - 06 - 01), Some(date!(2024 - 06 - 01)));
        assert!(result.is_ok());
    }

    #[test]
    fn test_overlap_shared_interior() {
        let a = window(date!(2024 - 01 - 01), Some(date!(2024 - 06 - 30)));
        let b = window(date!(2024 - 03 - 01), Some(date!(2024 - 12 - 31)));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_touching_endpoints() {
        // Closed intervals: sharing a single boundary day counts.
        let a = window(date!(2024 - 01 - 01), Some(date!(2024 - 03 - 01)));
        let b = window(date!(2024 - 03 - 01), Some(date!(2024 - 06 - 01)));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_disjoint_windows_do_not_overlap() {
        let a = window(date!(2024 - 01 - 01), Some(date!(2024 - 02 - 28)));
        let b = window(date!(2024 - 03 - 01), Some(date!(2024 - 06 - 01)));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_open_ended_window_overlaps_everything_after_start() {
        let open = window(date!(2024 - 06 - 01), None);
        let before = window(date!(2024 - 01 - 01), Some(date!(2024 - 05 - 31)));
        let after = window(date!(2025 - 01 - 01), Some(date!(2025 - 12 - 31)));
        assert!(!open.overlaps(&before));
        assert!(open.overlaps(&after));
    }

    #[test]
    fn test_two_open_ended_windows_overlap() {
        let a = window(date!(2024 - 01 - 01), None);
        let b = window(date!(2030 - 01 - 01), None);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_validate_percentage_bounds() {
        assert_eq!(validate_percentage(0).ok(), Some(0));
        assert_eq!(validate_percentage(100).ok(), Some(100));
        assert!(validate_percentage(101).is_err());
        assert!(validate_percentage(-1).is_err());
    }

    #[test]
    fn test_capacity_scenario_from_requirements() {
        // A1: 50% Jan-Jun, A2: 30% Mar-Dec. A 25% request for Apr-May must
        // fail with current=80, requested=25, total=105; 15% must succeed.
        let existing = vec![
            span(1, date!(2024 - 01 - 01), Some(date!(2024 - 06 - 30)), 50),
            span(2, date!(2024 - 03 - 01), Some(date!(2024 - 12 - 31)), 30),
        ];
        let requested_window = window(date!(2024 - 04 - 01), Some(date!(2024 - 05 - 01)));

        let rejected = check_capacity(&existing, &requested_window, 25, None);
        assert_eq!(
            rejected,
            Err(DomainError::CapacityExceeded {
                current: 80,
                requested: 25,
                total: 105,
            })
        );

        let accepted = check_capacity(&existing, &requested_window, 15, None);
        assert_eq!(accepted, Ok(80));
    }

    #[test]
    fn test_capacity_excludes_updated_allocation() {
        let existing = vec![
            span(1, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)), 60),
            span(2, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)), 40),
        ];
        let w = window(date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)));

        // Raising allocation 2 to 40% again is fine when it excludes itself.
        assert_eq!(check_capacity(&existing, &w, 40, Some(2)), Ok(60));
        // Raising it to 41% is not.
        assert!(check_capacity(&existing, &w, 41, Some(2)).is_err());
    }

    #[test]
    fn test_capacity_allows_exactly_one_hundred() {
        let existing = vec![span(
            1,
            date!(2024 - 01 - 01),
            Some(date!(2024 - 12 - 31)),
            70,
        )];
        let w = window(date!(2024 - 03 - 01), Some(date!(2024 - 09 - 30)));
        assert_eq!(check_capacity(&existing, &w, 30, None), Ok(70));
    }

    #[test]
    fn test_capacity_ignores_non_overlapping_spans() {
        let existing = vec![span(
            1,
            date!(2023 - 01 - 01),
            Some(date!(2023 - 12 - 31)),
            100,
        )];
        let w = window(date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)));
        assert_eq!(check_capacity(&existing, &w, 100, None), Ok(0));
    }

    #[test]
    fn test_transfer_date_inside_window() {
        let w = window(date!(2024 - 01 - 01), Some(date!(2024 - 06 - 30)));
        assert!(validate_transfer_date(&w, date!(2024 - 03 - 15)).is_ok());
        assert!(validate_transfer_date(&w, date!(2024 - 01 - 01)).is_ok());
        assert!(validate_transfer_date(&w, date!(2024 - 06 - 30)).is_ok());
    }

    #[test]
    fn test_transfer_date_outside_window() {
        let w = window(date!(2024 - 01 - 01), Some(date!(2024 - 06 - 30)));
        assert!(validate_transfer_date(&w, date!(2023 - 12 - 31)).is_err());
        assert!(validate_transfer_date(&w, date!(2024 - 07 - 01)).is_err());
    }

    #[test]
    fn test_transfer_date_open_ended_window() {
        let w = window(date!(2024 - 01 - 01), None);
        assert!(validate_transfer_date(&w, date!(2030 - 01 - 01)).is_ok());
        assert!(validate_transfer_date(&w, date!(2023 - 12 - 31)).is_err());
    }
}
