use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use crate::error::AppError;

/// Half-open `[start, end)` time span in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Parses an instant from either full RFC 3339 / ISO-8601 or the legacy
/// `DD/MM/YYYY HH:mm` form. The legacy form is wall-clock time in the
/// center's display timezone.
pub fn parse_instant(raw: &str, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%d/%m/%Y %H:%M")
        .map_err(|_| AppError::Parse(format!("Unrecognized date/time format: {raw}")))?;

    tz.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::Parse(format!("Invalid local time (ambiguous or skipped due to DST): {raw}")))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a raw start/end pair into a canonical interval. Does not enforce
/// `start < end`; callers apply [`apply_rollover`] first where the midnight
/// convention is in play.
pub fn normalize(raw_start: &str, raw_end: &str, tz: Tz) -> Result<Interval, AppError> {
    let start = parse_instant(raw_start, tz)?;
    let end = parse_instant(raw_end, tz)?;
    Ok(Interval::new(start, end))
}

/// An end time of exactly 00:00 means 24:00 of the start day: whenever the
/// end's wall-clock time is midnight and it does not already lie after the
/// start, it is moved to midnight following the start day.
pub fn apply_rollover(interval: Interval, tz: Tz) -> Interval {
    let end_local = interval.end.with_timezone(&tz);

    if end_local.hour() == 0 && end_local.minute() == 0 && interval.end <= interval.start {
        let start_local = interval.start.with_timezone(&tz);
        let next_midnight = (start_local.date_naive() + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .unwrap();

        if let Some(end) = tz.from_local_datetime(&next_midnight).single() {
            return Interval::new(interval.start, end.with_timezone(&Utc));
        }
    }

    interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Paris;

    #[test]
    fn test_parses_rfc3339() {
        let dt = parse_instant("2030-06-10T08:00:00+02:00", Paris).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 6, 10, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_parses_wall_clock_in_timezone() {
        // June in Paris is UTC+2.
        let dt = parse_instant("10/06/2030 10:00", Paris).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 6, 10, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_instant("next tuesday", Paris).is_err());
        assert!(parse_instant("2030-06-10", Paris).is_err());
    }

    #[test]
    fn test_rejects_skipped_dst_time() {
        // 02:30 on the spring-forward night does not exist in Paris.
        assert!(parse_instant("30/03/2025 02:30", Paris).is_err());
    }

    #[test]
    fn test_rollover_moves_same_day_midnight_end() {
        let parsed = normalize("10/06/2030 22:00", "10/06/2030 00:00", Paris).unwrap();
        let adjusted = apply_rollover(parsed, Paris);
        // Midnight after June 10 local is 22:00Z June 10.
        assert_eq!(adjusted.end, Utc.with_ymd_and_hms(2030, 6, 10, 22, 0, 0).unwrap());
        assert!(adjusted.end > adjusted.start);
    }

    #[test]
    fn test_rollover_leaves_ordinary_intervals_alone() {
        let parsed = normalize("10/06/2030 09:00", "10/06/2030 10:30", Paris).unwrap();
        assert_eq!(apply_rollover(parsed, Paris), parsed);
    }

    #[test]
    fn test_rollover_leaves_explicit_next_day_midnight_alone() {
        let parsed = normalize("10/06/2030 22:00", "11/06/2030 00:00", Paris).unwrap();
        assert_eq!(apply_rollover(parsed, Paris), parsed);
    }
}
