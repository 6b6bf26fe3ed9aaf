use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::WaitlistError;
use crate::models::{
    EnqueueWaitlistRequest, FreedSlot, WaitlistEntry, WaitlistFilter, WaitlistStatus,
};
use crate::repository::WaitlistRepository;

/// Priority waitlist over a [`WaitlistRepository`].
pub struct WaitlistQueueService {
    repository: Arc<dyn WaitlistRepository>,
}

impl WaitlistQueueService {
    pub fn new(repository: Arc<dyn WaitlistRepository>) -> Self {
        Self { repository }
    }

    /// Add a patient to the waitlist. Rejected when the patient already has
    /// an active entry for the same service type; entries in terminal states
    /// do not block re-joining.
    #[instrument(skip(self, request), fields(patient_id = %request.patient_id, service_type = %request.service_type))]
    pub async fn enqueue(
        &self,
        request: EnqueueWaitlistRequest,
        now: DateTime<Utc>,
    ) -> Result<WaitlistEntry, WaitlistError> {
        let entry = WaitlistEntry::new(request, now);
        let entry = self.repository.insert_active(entry).await?;
        info!(
            "Waitlist entry {} created with {} priority, expires {}",
            entry.id, entry.priority, entry.expires_at
        );
        Ok(entry)
    }

    pub async fn list(&self, filter: &WaitlistFilter) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        self.repository.list(filter).await
    }

    pub async fn get(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError> {
        self.repository.get(entry_id).await
    }

    /// Remove an entry from the queue. Removing an entry already in a
    /// terminal state is a no-op, so repeated removals stay idempotent.
    pub async fn remove(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError> {
        let entry = self.repository.get(entry_id).await?;
        if entry.status.is_terminal() {
            debug!(
                "Waitlist entry {} already in terminal state {:?}",
                entry_id, entry.status
            );
            return Ok(entry);
        }
        self.repository
            .set_status(entry_id, WaitlistStatus::Removed)
            .await
    }

    pub async fn update_status(
        &self,
        entry_id: Uuid,
        status: WaitlistStatus,
    ) -> Result<WaitlistEntry, WaitlistError> {
        self.repository.set_status(entry_id, status).await
    }

    /// Sweep active entries past their deadline.
    pub async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64, WaitlistError> {
        let expired = self.repository.expire_overdue(now).await?;
        if expired > 0 {
            info!("Expired {} overdue waitlist entries", expired);
        }
        Ok(expired)
    }

    /// The top candidates for a freed slot: active entries for the slot's
    /// service type whose provider preference matches, in queue order,
    /// truncated to `limit`.
    pub async fn candidates_for_slot(
        &self,
        freed: &FreedSlot,
        limit: usize,
    ) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        let filter = WaitlistFilter {
            status: Some(WaitlistStatus::Active),
            service_type: Some(freed.service_type.clone()),
            provider_id: None,
        };
        let mut candidates = self.repository.list(&filter).await?;
        candidates.retain(|entry| entry.matches_freed_slot(freed));
        candidates.truncate(limit);
        Ok(candidates)
    }
}
