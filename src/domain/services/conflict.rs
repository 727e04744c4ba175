use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use crate::domain::models::reservation::Reservation;
use crate::domain::services::interval::Interval;

/// Returns every reservation the candidate interval collides with in the
/// given room. Only reservations starting on the candidate's calendar day
/// are considered; a previous day's booking running past midnight is not
/// checked here (the store's transactional re-check covers that case).
///
/// Two intervals conflict when they strictly overlap (`s1 < e2 && e1 > s2`)
/// or share the exact same start instant. Boundary-touching intervals are
/// allowed.
pub fn find_conflicts<'a>(
    candidate: &Interval,
    room_id: &str,
    reservations: &'a [Reservation],
    exclude_id: Option<&str>,
    tz: Tz,
) -> Vec<&'a Reservation> {
    let candidate_day = candidate.start.with_timezone(&tz).date_naive();

    reservations.iter()
        .filter(|r| {
            if exclude_id.is_some_and(|id| id == r.id) {
                return false;
            }
            if r.room_id != room_id {
                return false;
            }
            if r.start_time.with_timezone(&tz).date_naive() != candidate_day {
                return false;
            }

            let res_end = comparison_end(r, tz);

            (candidate.start < res_end && candidate.end > r.start_time)
                || candidate.start == r.start_time
        })
        .collect()
}

pub fn has_conflict(
    candidate: &Interval,
    room_id: &str,
    reservations: &[Reservation],
    exclude_id: Option<&str>,
    tz: Tz,
) -> bool {
    !find_conflicts(candidate, room_id, reservations, exclude_id, tz).is_empty()
}

/// End instant used for overlap comparison: an end at wall-clock midnight
/// counts as 24:00 of the reservation's start day, so a booking "until
/// midnight" blocks the whole evening instead of collapsing to zero length.
fn comparison_end(reservation: &Reservation, tz: Tz) -> DateTime<Utc> {
    let end_local = reservation.end_time.with_timezone(&tz);

    if end_local.hour() == 0 && end_local.minute() == 0 {
        let start_local = reservation.start_time.with_timezone(&tz);
        let next_midnight = (start_local.date_naive() + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .unwrap();

        if let Some(end) = tz.from_local_datetime(&next_midnight).single() {
            return end.with_timezone(&Utc);
        }
    }

    reservation.end_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Paris;

    fn booking(id: &str, room: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Reservation {
        Reservation {
            id: id.to_string(),
            room_id: room.to_string(),
            activity_id: "act".to_string(),
            start_time: start,
            end_time: end,
            title: None,
            description: None,
            notes: None,
            created_by: "u1".to_string(),
            created_at: Utc::now(),
            parent_reservation_id: None,
            recurrence_json: None,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 10, h, m, 0).unwrap()
    }

    #[test]
    fn test_strict_overlap_detected_both_ways() {
        let existing = vec![booking("a", "r1", at(9, 0), at(11, 0))];
        assert!(has_conflict(&Interval::new(at(10, 0), at(12, 0)), "r1", &existing, None, Paris));
        assert!(has_conflict(&Interval::new(at(8, 0), at(10, 0)), "r1", &existing, None, Paris));
        assert!(has_conflict(&Interval::new(at(9, 30), at(10, 30)), "r1", &existing, None, Paris));
        assert!(has_conflict(&Interval::new(at(8, 0), at(12, 0)), "r1", &existing, None, Paris));
    }

    #[test]
    fn test_touching_boundaries_allowed() {
        let existing = vec![booking("a", "r1", at(9, 0), at(11, 0))];
        assert!(!has_conflict(&Interval::new(at(11, 0), at(12, 0)), "r1", &existing, None, Paris));
        assert!(!has_conflict(&Interval::new(at(8, 0), at(9, 0)), "r1", &existing, None, Paris));
    }

    #[test]
    fn test_identical_start_always_conflicts() {
        let existing = vec![booking("a", "r1", at(9, 0), at(11, 0))];
        assert!(has_conflict(&Interval::new(at(9, 0), at(9, 15)), "r1", &existing, None, Paris));
    }

    #[test]
    fn test_other_room_ignored() {
        let existing = vec![booking("a", "r2", at(9, 0), at(11, 0))];
        assert!(!has_conflict(&Interval::new(at(9, 0), at(11, 0)), "r1", &existing, None, Paris));
    }

    #[test]
    fn test_exclusion_skips_own_record() {
        let existing = vec![booking("a", "r1", at(9, 0), at(11, 0))];
        assert!(!has_conflict(&Interval::new(at(9, 0), at(10, 0)), "r1", &existing, Some("a"), Paris));
    }

    #[test]
    fn test_other_day_ignored() {
        let existing = vec![booking("a", "r1",
            Utc.with_ymd_and_hms(2030, 6, 11, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, 11, 11, 0, 0).unwrap())];
        assert!(!has_conflict(&Interval::new(at(9, 0), at(11, 0)), "r1", &existing, None, Paris));
    }

    #[test]
    fn test_midnight_end_counts_as_end_of_day() {
        // Stored end at 00:00 local (22:00Z the previous evening in June)
        // blocks the whole evening.
        let start = Utc.with_ymd_and_hms(2030, 6, 10, 18, 0, 0).unwrap(); // 20:00 local
        let end = Utc.with_ymd_and_hms(2030, 6, 9, 22, 0, 0).unwrap(); // degenerate stored end
        let existing = vec![booking("a", "r1", start, end)];

        // 21:00-22:00 local sits inside 20:00-24:00 local.
        let candidate = Interval::new(
            Utc.with_ymd_and_hms(2030, 6, 10, 19, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, 10, 20, 0, 0).unwrap(),
        );
        assert!(has_conflict(&candidate, "r1", &existing, None, Paris));
    }

    #[test]
    fn test_find_conflicts_returns_colliding_records() {
        let existing = vec![
            booking("a", "r1", at(9, 0), at(10, 0)),
            booking("b", "r1", at(10, 0), at(11, 0)),
            booking("c", "r1", at(12, 0), at(13, 0)),
        ];
        let hits = find_conflicts(&Interval::new(at(9, 30), at(10, 30)), "r1", &existing, None, Paris);
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
