use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::api::dto::usage_dto::UsageQuery;
use crate::errors::{internal_error, AppError};

/// Naive timestamp layouts, ISO-8601 with either separator and an optional
/// fractional part.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Clone, Debug)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Resolves the caller-supplied time inputs into a concrete window.
///
/// Precedence: explicit `start` + `end` win and any `range` is ignored;
/// otherwise the missing endpoint is derived from `range` hours; `range`
/// alone anchors the window at the current instant. Every other
/// combination is rejected. Empty strings count as absent.
pub fn resolve_time_window(q: &UsageQuery) -> Result<TimeWindow, AppError> {
    let start = q.start.as_deref().filter(|s| !s.is_empty());
    let end = q.end.as_deref().filter(|s| !s.is_empty());

    let (start, end) = match (start, end, q.range) {
        (Some(start), Some(end), _) => (parse_timestamp(start)?, parse_timestamp(end)?),
        (None, Some(raw), Some(range)) => {
            let end = parse_timestamp(raw)?;
            (hours_before(end, range)?, end)
        }
        (Some(raw), None, Some(range)) => {
            let start = parse_timestamp(raw)?;
            (start, hours_after(start, range)?)
        }
        (None, None, Some(range)) => {
            let end = Utc::now();
            (hours_before(end, range)?, end)
        }
        _ => return Err(AppError::InvalidInput("insufficient parameters".into())),
    };

    if start >= end {
        return Err(AppError::InvalidInput("start must precede end".into()));
    }

    Ok(TimeWindow { start, end })
}

/// Parses an ISO-8601 instant: a naive date-time (taken as UTC), an
/// offset-carrying RFC 3339 form (normalized to UTC), or a bare date at
/// midnight.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Some(dt) = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_time(NaiveTime::MIN);
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(AppError::InvalidInput("malformed timestamp".into()))
}

fn hours_before(anchor: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_hours(hours)
        .and_then(|span| anchor.checked_sub_signed(span))
        .ok_or_else(|| internal_error("time window out of range"))
}

fn hours_after(anchor: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_hours(hours)
        .and_then(|span| anchor.checked_add_signed(span))
        .ok_or_else(|| internal_error("time window out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: Option<&str>, end: Option<&str>, range: Option<i64>) -> UsageQuery {
        UsageQuery {
            start: start.map(String::from),
            end: end.map(String::from),
            range,
            resource: Some("cpu".into()),
        }
    }

    fn utc(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn explicit_endpoints_win_over_range() {
        let q = query(
            Some("2024-07-27T15:00:00"),
            Some("2024-07-27T16:00:00"),
            Some(48),
        );
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(window.start, utc("2024-07-27T15:00:00"));
        assert_eq!(window.end, utc("2024-07-27T16:00:00"));
    }

    #[test]
    fn space_separated_timestamps_are_accepted() {
        let q = query(Some("2024-07-27 15:00:00"), Some("2024-07-27 16:00:00"), None);
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(window.end - window.start, Duration::hours(1));
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let q = query(
            Some("2024-07-27T15:00:00.250"),
            Some("2024-07-27T16:00:00"),
            None,
        );
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(
            window.start,
            utc("2024-07-27T15:00:00") + Duration::milliseconds(250)
        );
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let q = query(
            Some("2024-07-27T17:00:00+02:00"),
            Some("2024-07-27T16:00:00Z"),
            None,
        );
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(window.start, utc("2024-07-27T15:00:00"));
        assert_eq!(window.end, utc("2024-07-27T16:00:00"));
    }

    #[test]
    fn bare_dates_resolve_to_midnight() {
        let q = query(Some("2024-07-27"), Some("2024-07-28"), None);
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(window.start, utc("2024-07-27T00:00:00"));
        assert_eq!(window.end - window.start, Duration::hours(24));
    }

    #[test]
    fn end_and_range_derive_start() {
        let q = query(None, Some("2024-07-27T16:00:00"), Some(2));
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(window.start, utc("2024-07-27T14:00:00"));
        assert_eq!(window.end, utc("2024-07-27T16:00:00"));
    }

    #[test]
    fn start_and_range_derive_end() {
        let q = query(Some("2024-07-27T15:00:00"), None, Some(1));
        let window = resolve_time_window(&q).unwrap();

        assert_eq!(window.start, utc("2024-07-27T15:00:00"));
        assert_eq!(window.end, utc("2024-07-27T16:00:00"));
    }

    #[test]
    fn range_alone_anchors_at_now() {
        let before = Utc::now();
        let window = resolve_time_window(&query(None, None, Some(1))).unwrap();
        let after = Utc::now();

        assert_eq!(window.end - window.start, Duration::hours(1));
        assert!(window.end >= before && window.end <= after);
    }

    #[test]
    fn lone_endpoint_without_range_is_rejected() {
        let cases = [
            query(Some("2024-07-27T15:00:00"), None, None),
            query(None, Some("2024-07-27T16:00:00"), None),
            query(None, None, None),
        ];

        for q in cases {
            let err = resolve_time_window(&q).unwrap_err();
            assert_eq!(err.to_string(), "Invalid input: insufficient parameters");
        }
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let err = resolve_time_window(&query(Some(""), Some(""), None)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: insufficient parameters");
    }

    #[test]
    fn reversed_window_is_rejected() {
        let q = query(
            Some("2024-07-27T16:00:00"),
            Some("2024-07-27T15:00:00"),
            None,
        );
        let err = resolve_time_window(&q).unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: start must precede end");
    }

    #[test]
    fn zero_width_window_is_rejected() {
        let q = query(
            Some("2024-07-27T15:00:00"),
            Some("2024-07-27T15:00:00"),
            None,
        );
        let err = resolve_time_window(&q).unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: start must precede end");
    }

    #[test]
    fn negative_range_yields_reversed_window() {
        let err = resolve_time_window(&query(None, None, Some(-1))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: start must precede end");
    }

    #[test]
    fn unparsable_timestamp_is_rejected() {
        let q = query(Some("not-a-date"), Some("2024-07-27T16:00:00"), None);
        let err = resolve_time_window(&q).unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: malformed timestamp");
    }
}
