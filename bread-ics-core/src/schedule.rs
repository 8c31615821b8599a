use chrono::{Duration, NaiveDateTime};

use crate::{Error, Result, ScheduledStep, Step};

#[cfg(test)]
mod tests;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Parses a target completion time in datetime-local form
/// (`2024-01-01T08:00`, seconds optional).
pub fn parse_target_time(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "target completion time is required".into(),
        ));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|_| Error::InvalidInput(format!("invalid date format: '{}'", trimmed)))
}

/// Converts a duration in hours to a chrono duration with millisecond
/// resolution, so fractional hours like 0.33 keep their sub-second part.
fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * MILLIS_PER_HOUR).round() as i64)
}

/// Computes the backward-chained schedule for `steps` so that the last
/// step ends exactly at `target_end`.
///
/// Steps are processed in reverse: each step ends where the cursor
/// stands and starts `duration` earlier, then the cursor moves to that
/// start. The returned schedule is in the original forward order and is
/// gap-free: every step's end equals the next step's start.
///
/// An empty step list yields an empty schedule.
pub fn compute_schedule(steps: &[Step], target_end: NaiveDateTime) -> Result<Vec<ScheduledStep>> {
    let mut schedule = Vec::with_capacity(steps.len());
    let mut cursor = target_end;

    for step in steps.iter().rev() {
        let end_time = cursor;
        let start_time = end_time - hours_to_duration(step.duration_hours);

        schedule.insert(
            0,
            ScheduledStep {
                name: step.name.clone(),
                kind: step.kind,
                duration_hours: step.duration_hours,
                start_time,
                end_time,
            },
        );

        cursor = start_time;
    }

    if let Some(first) = schedule.first() {
        tracing::debug!(
            steps = schedule.len(),
            start = %first.start_time,
            end = %target_end,
            "computed schedule"
        );
    }

    Ok(schedule)
}
