use chrono::{Datelike, Duration, Months, NaiveDate};
use crate::domain::models::reservation::{Recurrence, RecurrenceKind};

/// Expands a recurrence rule into the ordered set of occurrence dates,
/// inclusive of both the start date and the rule's end date. The caller
/// combines each date with the booking's fixed start/end time of day.
///
/// Weekly rules emit the selected weekdays (0 = Sunday) of every
/// `interval`-th week, weeks running Sunday through Saturday; an empty
/// weekday selection emits nothing. Monthly steps inherit chrono's
/// day-of-month clamping (Jan 31 + 1 month = Feb 28/29).
pub fn expand(start_date: NaiveDate, rule: &Recurrence) -> Vec<NaiveDate> {
    let end_date = rule.end_date;
    let interval = rule.interval.max(1);
    let mut dates = Vec::new();

    match rule.kind {
        RecurrenceKind::None => {
            dates.push(start_date);
        }
        RecurrenceKind::Daily => {
            let mut cursor = start_date;
            while cursor <= end_date {
                dates.push(cursor);
                cursor += Duration::days(interval as i64);
            }
        }
        RecurrenceKind::Weekly => {
            let mut cursor = start_date;
            while cursor <= end_date {
                let week_start = cursor - Duration::days(cursor.weekday().num_days_from_sunday() as i64);
                for &day in &rule.days_of_week {
                    if day > 6 {
                        continue;
                    }
                    let date = week_start + Duration::days(day as i64);
                    if date >= start_date && date <= end_date {
                        dates.push(date);
                    }
                }
                cursor += Duration::weeks(interval as i64);
            }
        }
        RecurrenceKind::Monthly => {
            let mut cursor = Some(start_date);
            while let Some(date) = cursor {
                if date > end_date {
                    break;
                }
                dates.push(date);
                cursor = date.checked_add_months(Months::new(interval));
            }
        }
    }

    dates.sort();
    dates.dedup();
    dates
}
