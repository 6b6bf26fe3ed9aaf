use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use scheduling_cell::services::conflict::{add_buffer_time, find_conflicts};
use scheduling_cell::TimeSlot;

fn dt(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 7, hour, minute, 0).unwrap()
}

fn slot(provider_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSlot {
    TimeSlot::new(provider_id, start, end).expect("valid slot")
}

#[test]
fn test_add_buffer_time_expands_both_sides() {
    let provider = Uuid::new_v4();
    let original = slot(provider, dt(10, 0), dt(10, 30));

    let buffered = add_buffer_time(&original, 15);

    assert_eq!(buffered.start, dt(9, 45));
    assert_eq!(buffered.end, dt(10, 45));
    // Input is untouched
    assert_eq!(original.start, dt(10, 0));
    assert_eq!(original.end, dt(10, 30));
}

#[test]
fn test_add_buffer_time_zero_is_identity() {
    let provider = Uuid::new_v4();
    let original = slot(provider, dt(14, 0), dt(14, 45));

    let buffered = add_buffer_time(&original, 0);

    assert_eq!(buffered, original);
}

#[test]
fn test_touching_boundaries_do_not_conflict() {
    let provider = Uuid::new_v4();
    let existing = vec![slot(provider, dt(10, 0), dt(10, 30))];
    let proposed = slot(provider, dt(10, 30), dt(11, 0));

    let conflicts = find_conflicts(&proposed, &existing);

    assert!(conflicts.is_empty(), "back-to-back slots should be allowed");
}

#[test]
fn test_overlapping_slots_conflict() {
    let provider = Uuid::new_v4();
    let existing = vec![slot(provider, dt(10, 0), dt(10, 30))];
    let proposed = slot(provider, dt(10, 15), dt(10, 45));

    let conflicts = find_conflicts(&proposed, &existing);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].start, dt(10, 0));
}

#[test]
fn test_other_providers_slots_are_ignored() {
    let provider = Uuid::new_v4();
    let other_provider = Uuid::new_v4();
    let existing = vec![slot(other_provider, dt(10, 0), dt(11, 0))];
    let proposed = slot(provider, dt(10, 15), dt(10, 45));

    let conflicts = find_conflicts(&proposed, &existing);

    assert!(conflicts.is_empty(), "conflicts are scoped per provider");
}

#[test]
fn test_buffered_proposal_conflicts_within_buffer_distance() {
    // Existing 10:00-10:30. Proposed 10:40-11:10 with a 15 minute buffer
    // becomes 10:25-11:25, which overlaps the existing booking.
    let provider = Uuid::new_v4();
    let existing = vec![slot(provider, dt(10, 0), dt(10, 30))];
    let proposed = slot(provider, dt(10, 40), dt(11, 10));

    let buffered = add_buffer_time(&proposed, 15);
    let conflicts = find_conflicts(&buffered, &existing);

    assert_eq!(conflicts.len(), 1);
}

#[test]
fn test_buffered_proposal_passes_at_exact_buffer_distance() {
    // Proposed 10:45-11:15 buffered to 10:30-11:30 touches the existing
    // booking's end exactly, which half-open semantics allow.
    let provider = Uuid::new_v4();
    let existing = vec![slot(provider, dt(10, 0), dt(10, 30))];
    let proposed = slot(provider, dt(10, 45), dt(11, 15));

    let buffered = add_buffer_time(&proposed, 15);
    let conflicts = find_conflicts(&buffered, &existing);

    assert!(conflicts.is_empty(), "a full buffer gap should be enough");
}

#[test]
fn test_find_conflicts_returns_all_overlapping_slots() {
    let provider = Uuid::new_v4();
    let existing = vec![
        slot(provider, dt(9, 0), dt(9, 30)),
        slot(provider, dt(10, 0), dt(10, 30)),
        slot(provider, dt(10, 30), dt(11, 0)),
        slot(provider, dt(14, 0), dt(14, 30)),
    ];
    let proposed = slot(provider, dt(10, 15), dt(10, 45));

    let conflicts = find_conflicts(&proposed, &existing);

    assert_eq!(conflicts.len(), 2);
}
