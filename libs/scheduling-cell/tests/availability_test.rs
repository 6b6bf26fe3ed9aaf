use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use scheduling_cell::services::availability::{calculate_available_slots, split_morning_afternoon};
use scheduling_cell::{AvailabilityConfig, TimeSlot, WorkingHoursConfig};

// 2026-09-07 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 6).unwrap()
}

fn dt(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 7, hour, minute, 0).unwrap()
}

fn config(duration: i32, buffer: i32) -> AvailabilityConfig {
    AvailabilityConfig::new(
        Uuid::new_v4(),
        WorkingHoursConfig::clinic_default(),
        duration,
        buffer,
    )
    .expect("valid config")
}

#[test]
fn test_empty_day_with_default_hours() {
    // 09:00-18:00 with a 12:00-13:00 lunch break, 30 minute appointments,
    // no buffer: 6 morning starts and 10 afternoon starts.
    let config = config(30, 0);

    let slots = calculate_available_slots(monday(), &config, &[]);

    assert_eq!(slots.len(), 16);
    assert_eq!(slots.first(), Some(&dt(9, 0)));
    assert_eq!(slots.last(), Some(&dt(17, 30)));
    assert!(!slots.contains(&dt(12, 0)), "lunch break is excluded");
    assert!(!slots.contains(&dt(12, 30)), "lunch break is excluded");
    assert!(slots.contains(&dt(11, 30)));
    assert!(slots.contains(&dt(13, 0)));
}

#[test]
fn test_closed_day_has_no_slots() {
    let config = config(30, 0);

    let slots = calculate_available_slots(sunday(), &config, &[]);

    assert!(slots.is_empty());
}

#[test]
fn test_calculation_is_deterministic() {
    let config = config(30, 15);
    let existing = vec![TimeSlot::new(config.provider_id, dt(10, 0), dt(10, 30)).unwrap()];

    let first = calculate_available_slots(monday(), &config, &existing);
    let second = calculate_available_slots(monday(), &config, &existing);

    assert_eq!(first, second);
    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted, "slots come back in chronological order");
}

#[test]
fn test_existing_booking_excludes_buffered_neighbours() {
    // A 10:00-10:30 booking with a 15 minute buffer knocks out the 09:30
    // and 10:30 candidates (their buffered windows reach into the booking)
    // but leaves 09:00 and 11:00 intact.
    let config = config(30, 15);
    let existing = vec![TimeSlot::new(config.provider_id, dt(10, 0), dt(10, 30)).unwrap()];

    let slots = calculate_available_slots(monday(), &config, &existing);

    assert!(slots.contains(&dt(9, 0)));
    assert!(!slots.contains(&dt(9, 30)));
    assert!(!slots.contains(&dt(10, 0)));
    assert!(!slots.contains(&dt(10, 30)));
    assert!(slots.contains(&dt(11, 0)));
}

#[test]
fn test_buffered_end_must_fit_before_close() {
    // 09:00-12:00 day, 30 minute appointments, 15 minute buffer. The 11:30
    // candidate would end buffered at 12:15, past closing, so the last
    // offered start is 11:00.
    let open_day = scheduling_cell::DayHours {
        open: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        close: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    };
    let working_hours = WorkingHoursConfig::new(
        [Some(open_day), None, None, None, None, None, None],
        None,
    )
    .unwrap();
    let config = AvailabilityConfig::new(Uuid::new_v4(), working_hours, 30, 15).unwrap();

    let slots = calculate_available_slots(monday(), &config, &[]);

    assert_eq!(slots.last(), Some(&dt(11, 0)));
    assert!(!slots.contains(&dt(11, 30)));
}

#[test]
fn test_other_provider_bookings_do_not_reduce_availability() {
    let config = config(30, 0);
    let existing = vec![TimeSlot::new(Uuid::new_v4(), dt(10, 0), dt(10, 30)).unwrap()];

    let slots = calculate_available_slots(monday(), &config, &existing);

    assert_eq!(slots.len(), 16);
}

#[test]
fn test_split_morning_afternoon() {
    let slots = vec![dt(9, 0), dt(11, 30), dt(12, 0), dt(13, 0), dt(17, 30)];

    let (morning, afternoon) = split_morning_afternoon(&slots);

    assert_eq!(morning, vec![dt(9, 0), dt(11, 30)]);
    assert_eq!(afternoon, vec![dt(12, 0), dt(13, 0), dt(17, 30)]);
}
