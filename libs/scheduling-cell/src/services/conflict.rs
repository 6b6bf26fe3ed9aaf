use chrono::Duration;

use crate::models::TimeSlot;

/// Expand a proposed slot by the safety buffer on both sides. The input is
/// left untouched; callers compare the returned copy against existing
/// bookings.
pub fn add_buffer_time(slot: &TimeSlot, buffer_minutes: i32) -> TimeSlot {
    let buffer = Duration::minutes(buffer_minutes as i64);
    TimeSlot {
        id: slot.id,
        provider_id: slot.provider_id,
        start: slot.start - buffer,
        end: slot.end + buffer,
    }
}

/// Subset of `existing` that belongs to the proposed slot's provider and
/// overlaps it under half-open semantics. The buffer is applied to the
/// proposed slot only, before this call; existing entries were checked the
/// same way when they were admitted, so buffering them again would
/// double-count the margin.
pub fn find_conflicts(proposed: &TimeSlot, existing: &[TimeSlot]) -> Vec<TimeSlot> {
    existing
        .iter()
        .filter(|slot| slot.provider_id == proposed.provider_id && proposed.overlaps(slot))
        .cloned()
        .collect()
}
