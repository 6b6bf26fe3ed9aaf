use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use tracing::debug;

use crate::models::{AvailabilityConfig, TimeSlot};
use crate::services::conflict::{add_buffer_time, find_conflicts};

/// Enumerate the open start times for one provider day.
///
/// Candidates step from opening time at appointment-duration granularity. A
/// candidate is dropped when its buffered window would run past closing time,
/// when it touches the lunch break (a hard exclusion zone, compared without
/// buffer), or when its buffered window overlaps an existing booking.
///
/// Pure and deterministic: the same `(date, config, existing)` triple always
/// produces the same chronologically ordered sequence.
pub fn calculate_available_slots(
    date: NaiveDate,
    config: &AvailabilityConfig,
    existing: &[TimeSlot],
) -> Vec<DateTime<Utc>> {
    if config.appointment_duration_minutes <= 0 {
        return Vec::new();
    }

    let Some(hours) = config.working_hours.hours_for(date.weekday()) else {
        debug!("Provider {} is closed on {}", config.provider_id, date);
        return Vec::new();
    };

    let duration = Duration::minutes(config.appointment_duration_minutes as i64);
    let buffer = Duration::minutes(config.buffer_minutes as i64);
    let open = date.and_time(hours.open).and_utc();
    let close = date.and_time(hours.close).and_utc();
    let lunch = config
        .working_hours
        .lunch_break()
        .map(|l| (date.and_time(l.start).and_utc(), date.and_time(l.end).and_utc()));

    let mut slots = Vec::new();
    let mut current = open;

    while current + duration + buffer <= close {
        let candidate_end = current + duration;

        let overlaps_lunch = lunch
            .map_or(false, |(lunch_start, lunch_end)| {
                current < lunch_end && lunch_start < candidate_end
            });

        if !overlaps_lunch {
            let candidate = TimeSlot {
                id: None,
                provider_id: config.provider_id,
                start: current,
                end: candidate_end,
            };
            let buffered = add_buffer_time(&candidate, config.buffer_minutes);
            if find_conflicts(&buffered, existing).is_empty() {
                slots.push(current);
            }
        }

        current += duration;
    }

    debug!(
        "Provider {} has {} open slots on {}",
        config.provider_id,
        slots.len(),
        date
    );
    slots
}

/// Conventional presentation split: before 12:00 is morning, 12:00 and later
/// is afternoon.
pub fn split_morning_afternoon(
    slots: &[DateTime<Utc>],
) -> (Vec<DateTime<Utc>>, Vec<DateTime<Utc>>) {
    let mut morning = Vec::new();
    let mut afternoon = Vec::new();

    for slot in slots {
        if slot.hour() < 12 {
            morning.push(*slot);
        } else {
            afternoon.push(*slot);
        }
    }

    (morning, afternoon)
}
