use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::WaitlistError;
use crate::models::{WaitlistEntry, WaitlistFilter, WaitlistStatus};

/// Persistence port for the waitlist. Implementations must enforce the
/// single-active-entry rule per (patient, service type) atomically with the
/// insert, the same way a partial unique index would.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    async fn insert_active(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, WaitlistError>;

    async fn get(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError>;

    /// Entries matching the filter, ordered by priority rank then creation
    /// time. Older entries win ties within a tier.
    async fn list(&self, filter: &WaitlistFilter) -> Result<Vec<WaitlistEntry>, WaitlistError>;

    /// Transition an entry to a new status, validating the transition under
    /// the same lock that applies it.
    async fn set_status(
        &self,
        entry_id: Uuid,
        status: WaitlistStatus,
    ) -> Result<WaitlistEntry, WaitlistError>;

    /// Mark every active entry whose deadline has passed as expired and
    /// return how many were affected.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64, WaitlistError>;
}

#[derive(Default)]
pub struct InMemoryWaitlistRepository {
    entries: RwLock<HashMap<Uuid, WaitlistEntry>>,
}

impl InMemoryWaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn insert_active(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, WaitlistError> {
        let mut entries = self.entries.write().await;

        // Duplicate check and insert under one write lock.
        let duplicate = entries.values().any(|existing| {
            existing.patient_id == entry.patient_id
                && existing.service_type == entry.service_type
                && existing.status == WaitlistStatus::Active
        });
        if duplicate {
            return Err(WaitlistError::DuplicateActiveEntry {
                patient_id: entry.patient_id,
                service_type: entry.service_type,
            });
        }

        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError> {
        self.entries
            .read()
            .await
            .get(&entry_id)
            .cloned()
            .ok_or(WaitlistError::EntryNotFound(entry_id))
    }

    async fn list(&self, filter: &WaitlistFilter) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        let entries = self.entries.read().await;

        let mut matching: Vec<WaitlistEntry> = entries
            .values()
            .filter(|entry| {
                filter.status.map_or(true, |s| entry.status == s)
                    && filter
                        .service_type
                        .as_ref()
                        .map_or(true, |t| &entry.service_type == t)
                    && filter.provider_id.map_or(true, |p| {
                        entry.provider_id.map_or(true, |wanted| wanted == p)
                    })
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then(a.created_at.cmp(&b.created_at))
        });

        Ok(matching)
    }

    async fn set_status(
        &self,
        entry_id: Uuid,
        status: WaitlistStatus,
    ) -> Result<WaitlistEntry, WaitlistError> {
        let mut entries = self.entries.write().await;

        let entry = entries
            .get_mut(&entry_id)
            .ok_or(WaitlistError::EntryNotFound(entry_id))?;

        if !entry.status.can_transition_to(&status) {
            return Err(WaitlistError::InvalidStatusTransition {
                from: entry.status,
                to: status,
            });
        }

        entry.status = status;
        Ok(entry.clone())
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64, WaitlistError> {
        let mut entries = self.entries.write().await;

        let mut expired = 0u64;
        for entry in entries.values_mut() {
            if entry.status == WaitlistStatus::Active && entry.expires_at < now {
                entry.status = WaitlistStatus::Expired;
                expired += 1;
            }
        }

        Ok(expired)
    }
}
