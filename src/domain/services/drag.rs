use chrono::{Duration, Timelike};
use chrono_tz::Tz;
use crate::domain::services::interval::Interval;

/// Pointer-drag delta plus the calendar geometry of the view it happened
/// in. One vertical cell is a 30-minute slot; cell height varies with the
/// active view (30-48px), so the client reports it.
#[derive(Debug, Clone, Copy)]
pub struct DragInput {
    pub pixel_delta_x: f64,
    pub pixel_delta_y: f64,
    pub cell_height_px: f64,
    pub day_column_width_px: f64,
}

/// Moves smaller than this on both axes are clicks, not drags.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;

const SLOT_MINUTES: i64 = 30;
const OPENING_HOUR: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Below the drag threshold; no reschedule intended.
    Click,
    /// The snapped start would land outside the 08:00-24:00 window.
    OutOfHours,
    Moved(Interval),
}

/// Converts a pixel drag into a candidate interval: the vertical delta
/// snaps to 30-minute blocks, the horizontal delta to whole days, and the
/// original duration is preserved verbatim. The result still has to pass
/// the overlap check before it may be committed.
pub fn compute_move(original: &Interval, input: &DragInput, tz: Tz) -> DragOutcome {
    if input.pixel_delta_x.abs() < CLICK_THRESHOLD_PX
        && input.pixel_delta_y.abs() < CLICK_THRESHOLD_PX
    {
        return DragOutcome::Click;
    }

    let half_hour_blocks = (input.pixel_delta_y / input.cell_height_px).round() as i64;
    let minutes_delta = half_hour_blocks * SLOT_MINUTES;
    let days_delta = (input.pixel_delta_x / input.day_column_width_px).round() as i64;

    let new_start = original.start + Duration::minutes(minutes_delta) + Duration::days(days_delta);
    let new_end = new_start + original.duration();

    let start_local = new_start.with_timezone(&tz);
    let hour = start_local.hour();
    let minute = start_local.minute();

    // Operating window is 08:00 up to midnight; a start of exactly 00:00
    // counts as the closing instant and stays allowed.
    if hour >= OPENING_HOUR || (hour == 0 && minute == 0) {
        DragOutcome::Moved(Interval::new(new_start, new_end))
    } else {
        DragOutcome::OutOfHours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::Paris;

    fn input(dx: f64, dy: f64) -> DragInput {
        DragInput {
            pixel_delta_x: dx,
            pixel_delta_y: dy,
            cell_height_px: 30.0,
            day_column_width_px: 120.0,
        }
    }

    fn interval(start_h: u32, end_h: u32) -> Interval {
        // June, so Paris local = UTC+2.
        Interval::new(
            Utc.with_ymd_and_hms(2030, 6, 10, start_h, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, 10, end_h, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_sub_threshold_is_click() {
        assert_eq!(compute_move(&interval(8, 9), &input(4.0, -4.9), Paris), DragOutcome::Click);
    }

    #[test]
    fn test_one_axis_over_threshold_is_a_drag() {
        let out = compute_move(&interval(8, 9), &input(0.0, 30.0), Paris);
        assert!(matches!(out, DragOutcome::Moved(_)));
    }

    #[test]
    fn test_vertical_drag_rounds_to_nearest_block() {
        // 44px at 30px/cell rounds to one block: +30 minutes.
        let out = compute_move(&interval(8, 9), &input(0.0, 44.0), Paris);
        let DragOutcome::Moved(moved) = out else { panic!("expected a move") };
        assert_eq!(moved.start, Utc.with_ymd_and_hms(2030, 6, 10, 8, 30, 0).unwrap());
        assert_eq!(moved.end, Utc.with_ymd_and_hms(2030, 6, 10, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_horizontal_drag_moves_days_and_keeps_duration() {
        let out = compute_move(&interval(8, 10), &input(-130.0, 0.0), Paris);
        let DragOutcome::Moved(moved) = out else { panic!("expected a move") };
        assert_eq!(moved.start, Utc.with_ymd_and_hms(2030, 6, 9, 8, 0, 0).unwrap());
        assert_eq!(moved.duration(), chrono::Duration::hours(2));
    }

    #[test]
    fn test_landing_before_opening_hour_rejected() {
        // 10:00 local minus 3 hours lands at 07:00 local.
        let out = compute_move(&interval(8, 9), &input(0.0, -180.0), Paris);
        assert_eq!(out, DragOutcome::OutOfHours);
    }

    #[test]
    fn test_landing_exactly_at_midnight_allowed() {
        // 22:00 local (20:00Z) plus 2 hours lands at 00:00 local.
        let out = compute_move(&interval(20, 21), &input(0.0, 120.0), Paris);
        assert!(matches!(out, DragOutcome::Moved(_)));
    }

    #[test]
    fn test_just_past_midnight_rejected() {
        // 22:30 local plus 2 hours lands at 00:30 local.
        let original = Interval::new(
            Utc.with_ymd_and_hms(2030, 6, 10, 20, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 6, 10, 21, 30, 0).unwrap(),
        );
        assert_eq!(compute_move(&original, &input(0.0, 120.0), Paris), DragOutcome::OutOfHours);
    }
}
