use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::schedule::model::{RepeatFrequency, ScheduleConfig, SchedulePreview};

/// How many upcoming occurrences a repeating schedule previews.
pub const PREVIEW_OCCURRENCES: usize = 5;

/// Compute the next execution timestamps for a schedule.
///
/// Returns an empty sequence when `from_date` or `trigger_time` is missing
/// or unparsable; that is a guard, not an error. A one-time schedule yields
/// exactly one timestamp, every repeating frequency yields
/// [`PREVIEW_OCCURRENCES`].
pub fn preview_runs(
    from_date: &str,
    trigger_time: &str,
    frequency: RepeatFrequency,
) -> Vec<NaiveDateTime> {
    let Some(start) = combine(from_date, trigger_time) else {
        return vec![];
    };

    if frequency == RepeatFrequency::Never {
        return vec![start];
    }

    (0..PREVIEW_OCCURRENCES)
        .map(|i| start + step(frequency, i as i64))
        .collect()
}

/// Parse a `YYYY-MM-DD` date and `HH:MM` time into one timestamp.
pub fn combine(from_date: &str, trigger_time: &str) -> Option<NaiveDateTime> {
    if from_date.is_empty() || trigger_time.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(from_date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(trigger_time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trigger_time, "%H:%M:%S"))
        .ok()?;
    Some(NaiveDateTime::new(date, time))
}

// Monthly carries no step yet, so its preview repeats the start
// timestamp. TODO: advance by calendar month once the scheduler
// backend supports month arithmetic.
fn step(frequency: RepeatFrequency, occurrence: i64) -> Duration {
    match frequency {
        RepeatFrequency::Never | RepeatFrequency::Monthly => Duration::zero(),
        RepeatFrequency::Every1Hr => Duration::hours(occurrence),
        RepeatFrequency::Every2Hr => Duration::hours(2 * occurrence),
        RepeatFrequency::Every4Hr => Duration::hours(4 * occurrence),
        RepeatFrequency::Every6Hr => Duration::hours(6 * occurrence),
        RepeatFrequency::Daily => Duration::days(occurrence),
        RepeatFrequency::Weekly => Duration::days(7 * occurrence),
    }
}

/// Human-readable projection of the preview for the confirmation views.
pub fn render_preview(schedule: &ScheduleConfig) -> SchedulePreview {
    let runs = preview_runs(
        &schedule.from_date,
        &schedule.trigger_time,
        schedule.repeat_frequency,
    );
    let description = if runs.is_empty() {
        String::new()
    } else if schedule.repeat_frequency == RepeatFrequency::Never {
        "Scheduled to run once:".to_string()
    } else {
        format!("Next {} scheduled runs:", PREVIEW_OCCURRENCES)
    };
    SchedulePreview {
        description,
        runs: runs
            .iter()
            .map(|run| run.format("%a, %b %-d, %Y at %H:%M").to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_time_schedule_yields_single_combined_timestamp() {
        let runs = preview_runs("2024-01-15", "09:00", RepeatFrequency::Never);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], combine("2024-01-15", "09:00").unwrap());
    }

    #[test]
    fn daily_runs_are_24_hours_apart() {
        let runs = preview_runs("2024-01-15", "09:00", RepeatFrequency::Daily);
        assert_eq!(runs.len(), 5);
        assert_eq!(runs[0], combine("2024-01-15", "09:00").unwrap());
        for pair in runs.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::hours(24));
        }
    }

    #[test]
    fn weekly_runs_are_7_days_apart() {
        let runs = preview_runs("2024-01-15", "09:00", RepeatFrequency::Weekly);
        assert_eq!(runs.len(), 5);
        for pair in runs.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(7));
        }
    }

    #[test]
    fn hourly_variants_step_by_the_embedded_hour_count() {
        let runs = preview_runs("2024-01-15", "09:00", RepeatFrequency::Every2Hr);
        assert_eq!(runs.len(), 5);
        let start = combine("2024-01-15", "09:00").unwrap();
        for (i, run) in runs.iter().enumerate() {
            assert_eq!(*run, start + Duration::hours(2 * i as i64));
        }

        let six = preview_runs("2024-01-15", "09:00", RepeatFrequency::Every6Hr);
        assert_eq!(six[4] - six[0], Duration::hours(24));
    }

    #[test]
    fn monthly_repeats_the_start_timestamp() {
        let runs = preview_runs("2024-01-15", "09:00", RepeatFrequency::Monthly);
        assert_eq!(runs.len(), 5);
        assert!(runs.iter().all(|run| *run == runs[0]));
    }

    #[test]
    fn missing_inputs_yield_empty_previews() {
        assert!(preview_runs("", "09:00", RepeatFrequency::Daily).is_empty());
        assert!(preview_runs("2024-01-15", "", RepeatFrequency::Daily).is_empty());
        assert!(preview_runs("not-a-date", "09:00", RepeatFrequency::Daily).is_empty());
    }

    #[test]
    fn rendered_preview_describes_one_time_and_repeating_schedules() {
        let mut schedule = ScheduleConfig {
            from_date: "2024-01-15".to_string(),
            trigger_time: "09:00".to_string(),
            ..ScheduleConfig::default()
        };
        let once = render_preview(&schedule);
        assert_eq!(once.description, "Scheduled to run once:");
        assert_eq!(once.runs, vec!["Mon, Jan 15, 2024 at 09:00".to_string()]);

        schedule.repeat_frequency = RepeatFrequency::Daily;
        let repeating = render_preview(&schedule);
        assert_eq!(repeating.description, "Next 5 scheduled runs:");
        assert_eq!(repeating.runs.len(), 5);
    }

    #[test]
    fn rendered_preview_stays_silent_without_runs() {
        let incomplete = ScheduleConfig {
            trigger_time: "09:00".to_string(),
            ..ScheduleConfig::default()
        };
        let preview = render_preview(&incomplete);
        assert!(preview.runs.is_empty());
        assert!(preview.description.is_empty());
    }
}
