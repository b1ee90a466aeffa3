//! Date-range filtering over the weekly series.

use chrono::NaiveDate;
use mixboard_core::WeeklyRecord;

/// Return the contiguous sub-slice of `records` whose dates fall inside the
/// inclusive `[from, to]` range. Relies on the series being chronologically
/// ordered; either bound may be omitted.
pub fn date_window(
    records: &[WeeklyRecord],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> &[WeeklyRecord] {
    let start = match from {
        Some(from) => records.partition_point(|r| r.date < from),
        None => 0,
    };
    let end = match to {
        Some(to) => records.partition_point(|r| r.date <= to),
        None => records.len(),
    };
    if start >= end {
        &[]
    } else {
        &records[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::series;

    #[test]
    fn test_unbounded_window_is_full_series() {
        let data = series(10);
        assert_eq!(date_window(&data, None, None).len(), 10);
    }

    #[test]
    fn test_bounded_window_is_inclusive() {
        let data = series(10);
        let from = data[2].date;
        let to = data[5].date;
        let w = date_window(&data, Some(from), Some(to));
        assert_eq!(w.len(), 4);
        assert_eq!(w[0].week, 3);
        assert_eq!(w[3].week, 6);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let data = series(10);
        let w = date_window(&data, Some(data[5].date), Some(data[2].date));
        assert!(w.is_empty());
    }

    #[test]
    fn test_range_outside_series_is_empty() {
        let data = series(4);
        let far = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(date_window(&data, Some(far), None).is_empty());
    }
}
