use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Error returned when a range ends before it starts
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Display for InvalidRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "start date {} is after end date {}",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

/// A closed interval of instants, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidRange> {
        if start > end {
            return Err(InvalidRange { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive overlap: ranges that merely touch at an endpoint overlap
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Whole nights in the range; partial days are dropped
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_hours() / 24
    }
}

/// A window during which an accommodation is offered
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableTerm {
    pub id: i32,
    pub accommodation_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A range that is already booked
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedTerm {
    pub id: i32,
    pub accommodation_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Input for creating either kind of term
#[derive(Debug, Clone, PartialEq)]
pub struct NewTerm {
    pub accommodation_id: i32,
    pub range: DateRange,
}

macro_rules! term_range {
    ($($term:ty),*) => {
        $(
            impl $term {
                pub fn range(&self) -> DateRange {
                    DateRange {
                        start: self.start_date,
                        end: self.end_date,
                    }
                }
            }
        )*
    };
}

term_range!(AvailableTerm, ReservedTerm, crate::price::Price);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn test_range_rejects_reversed_bounds() {
        let err = DateRange::new(at(2023, 1, 4, 0), at(2023, 1, 1, 0)).unwrap_err();
        assert_eq!(err.start, at(2023, 1, 4, 0));
        assert!(err.to_string().contains("is after"));

        // A single instant is a valid range
        assert!(DateRange::new(at(2023, 1, 1, 0), at(2023, 1, 1, 0)).is_ok());
    }

    #[test]
    fn test_overlap_is_inclusive_at_both_ends() {
        let query = range(at(2023, 3, 10, 0), at(2023, 3, 20, 0));

        // Term ending exactly when the query starts
        let before = range(at(2023, 3, 1, 0), at(2023, 3, 10, 0));
        assert!(before.overlaps(&query));
        assert!(query.overlaps(&before));

        // Term starting exactly when the query ends
        let after = range(at(2023, 3, 20, 0), at(2023, 3, 25, 0));
        assert!(after.overlaps(&query));
        assert!(query.overlaps(&after));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let query = range(at(2023, 3, 10, 0), at(2023, 3, 20, 0));
        let earlier = range(at(2023, 3, 1, 0), at(2023, 3, 9, 23));
        let later = range(at(2023, 3, 20, 1), at(2023, 3, 30, 0));

        assert!(!earlier.overlaps(&query));
        assert!(!later.overlaps(&query));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = range(at(2023, 1, 1, 0), at(2023, 12, 31, 0));
        let inner = range(at(2023, 6, 1, 0), at(2023, 6, 5, 0));

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_nights_truncates_partial_days() {
        assert_eq!(range(at(2023, 1, 1, 0), at(2023, 1, 4, 0)).nights(), 3);
        assert_eq!(range(at(2023, 1, 1, 14), at(2023, 1, 4, 10)).nights(), 2);
        assert_eq!(range(at(2023, 1, 1, 0), at(2023, 1, 1, 23)).nights(), 0);
    }

    #[test]
    fn test_term_range_uses_stored_dates() {
        let term = ReservedTerm {
            id: 7,
            accommodation_id: 1,
            start_date: at(2023, 5, 1, 10),
            end_date: at(2023, 5, 3, 10),
        };

        assert_eq!(term.range().start(), at(2023, 5, 1, 10));
        assert_eq!(term.range().nights(), 2);
    }
}
