//! Date-range value object.
//!
//! Memberships, employment history, fiscal years and financial periods all
//! carry a validity window; the overlap rule lives here once instead of being
//! re-derived per entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// An inclusive date range, optionally open-ended.
///
/// `end == None` means "until further notice" (e.g. a current membership).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a possibly open-ended range. Start must not come after end.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> DomainResult<Self> {
        if let Some(end) = end {
            if start > end {
                return Err(DomainError::validation("start date is after end date"));
            }
        }
        Ok(Self { start, end })
    }

    /// Build a closed range with a strict ordering (`start < end`).
    ///
    /// Fiscal years and financial periods must span at least two days.
    pub fn closed(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::validation("start date must precede end date"));
        }
        Ok(Self { start, end: Some(end) })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether the range is open-ended (no end date yet).
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether `date` falls within the range (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }

    /// Whether two ranges share at least one day.
    ///
    /// Two ranges `[a, b?]` and `[c, d?]` overlap iff `a <= d` and `c <= b`,
    /// with a missing bound treated as unbounded.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        let starts_before_other_ends = other.end.map_or(true, |d| self.start <= d);
        let other_starts_before_self_ends = self.end.map_or(true, |b| other.start <= b);
        starts_before_other_ends && other_starts_before_self_ends
    }
}

impl ValueObject for DateRange {}

impl core::fmt::Display for DateRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} - {}", self.start, end),
            None => write!(f, "{} - open", self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(d(2024, 5, 1), Some(d(2024, 4, 1))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn closed_requires_strict_ordering() {
        assert!(DateRange::closed(d(2024, 1, 1), d(2024, 1, 1)).is_err());
        assert!(DateRange::closed(d(2024, 1, 1), d(2024, 12, 30)).is_ok());
    }

    #[test]
    fn open_range_overlaps_everything_after_start() {
        let open = DateRange::new(d(2024, 1, 1), None).unwrap();
        let later = DateRange::new(d(2030, 1, 1), Some(d(2030, 6, 1))).unwrap();
        assert!(open.overlaps(&later));
        assert!(later.overlaps(&open));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let a = DateRange::new(d(2024, 1, 1), Some(d(2024, 3, 31))).unwrap();
        let b = DateRange::new(d(2024, 4, 1), Some(d(2024, 6, 30))).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn touching_endpoints_count_as_overlap() {
        // Inclusive ranges: sharing a single day is an overlap.
        let a = DateRange::new(d(2024, 1, 1), Some(d(2024, 3, 31))).unwrap();
        let b = DateRange::new(d(2024, 3, 31), Some(d(2024, 6, 30))).unwrap();
        assert!(a.overlaps(&b));
    }

    #[test]
    fn contains_respects_bounds() {
        let r = DateRange::new(d(2024, 1, 10), Some(d(2024, 1, 20))).unwrap();
        assert!(r.contains(d(2024, 1, 10)));
        assert!(r.contains(d(2024, 1, 20)));
        assert!(!r.contains(d(2024, 1, 21)));

        let open = DateRange::new(d(2024, 1, 10), None).unwrap();
        assert!(open.contains(d(2099, 1, 1)));
        assert!(!open.contains(d(2023, 12, 31)));
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|off| d(2000, 1, 1) + chrono::Duration::days(off))
    }

    fn arb_range() -> impl Strategy<Value = DateRange> {
        (arb_date(), 0i64..2_000, any::<bool>()).prop_map(|(start, len, open)| {
            let end = if open {
                None
            } else {
                Some(start + chrono::Duration::days(len))
            };
            DateRange::new(start, end).unwrap()
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn range_overlaps_itself(a in arb_range()) {
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn shared_day_implies_overlap(a in arb_range(), b in arb_range(), probe in arb_date()) {
            if a.contains(probe) && b.contains(probe) {
                prop_assert!(a.overlaps(&b));
            }
        }
    }
}
