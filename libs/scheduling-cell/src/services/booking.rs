// libs/scheduling-cell/src/services/booking.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::{BookingDecision, SchedulingError, TimeSlot};
use crate::services::conflict::{add_buffer_time, find_conflicts};
use crate::store::AppointmentStore;

/// Booking admission over an [`AppointmentStore`].
///
/// The fetch-check-insert sequence runs under a per-(provider, day) lock so
/// two concurrent requests for the same day cannot both pass the conflict
/// check and double-book.
pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    day_locks: Mutex<HashMap<(Uuid, NaiveDate), Arc<Mutex<()>>>>,
}

impl BookingService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            store,
            day_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or reject a proposed unbuffered slot. On rejection the
    /// conflicting slots are returned so the caller can surface them and
    /// offer alternatives.
    #[instrument(skip(self, proposed), fields(provider_id = %proposed.provider_id, start = %proposed.start))]
    pub async fn book(
        &self,
        proposed: TimeSlot,
        buffer_minutes: i32,
    ) -> Result<BookingDecision, SchedulingError> {
        if proposed.start >= proposed.end {
            return Err(SchedulingError::InvalidInterval {
                start: proposed.start,
                end: proposed.end,
            });
        }
        if buffer_minutes < 0 {
            return Err(SchedulingError::InvalidBuffer(buffer_minutes));
        }

        let day = proposed.start.date_naive();
        let lock = self.day_lock(proposed.provider_id, day).await;
        let _guard = lock.lock().await;

        let existing = self.store.slots_for_day(proposed.provider_id, day).await?;
        let buffered = add_buffer_time(&proposed, buffer_minutes);
        let conflicts = find_conflicts(&buffered, &existing);

        if !conflicts.is_empty() {
            warn!(
                "Booking rejected for provider {}: {} conflicting slots",
                proposed.provider_id,
                conflicts.len()
            );
            return Ok(BookingDecision::Rejected { conflicts });
        }

        let slot_id = self.store.insert(proposed).await?;
        info!("Booking admitted with slot id {}", slot_id);
        Ok(BookingDecision::Admitted { slot_id })
    }

    /// Cancel a booking and hand the freed slot back to the caller, which is
    /// responsible for triggering waitlist auto-fill.
    pub async fn cancel(&self, slot_id: Uuid) -> Result<TimeSlot, SchedulingError> {
        match self.store.remove(slot_id).await? {
            Some(slot) => {
                info!(
                    "Cancelled slot {} for provider {} at {}",
                    slot_id, slot.provider_id, slot.start
                );
                Ok(slot)
            }
            None => Err(SchedulingError::SlotNotFound(slot_id)),
        }
    }

    async fn day_lock(&self, provider_id: Uuid, date: NaiveDate) -> Arc<Mutex<()>> {
        let mut locks = self.day_locks.lock().await;
        locks
            .entry((provider_id, date))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
