use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Active entries expire this many days after creation.
pub const WAITLIST_ENTRY_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub service_type: String,
    pub provider_id: Option<Uuid>,
    pub priority: WaitlistPriority,
    pub status: WaitlistStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(request: EnqueueWaitlistRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            service_type: request.service_type,
            provider_id: request.provider_id,
            priority: request.priority,
            status: WaitlistStatus::Active,
            notes: request.notes,
            created_at: now,
            expires_at: now + Duration::days(WAITLIST_ENTRY_TTL_DAYS),
        }
    }

    /// Whether a freed slot is a match for this entry. Service type must be
    /// equal; a slot with no provider matches any entry, and an entry with no
    /// provider preference accepts any slot.
    pub fn matches_freed_slot(&self, freed: &FreedSlot) -> bool {
        if self.service_type != freed.service_type {
            return false;
        }
        match (self.provider_id, freed.provider_id) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(wanted), Some(freed_provider)) => wanted == freed_provider,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistPriority {
    Urgent,
    Convenience,
}

impl WaitlistPriority {
    /// Sort key. Urgent entries come before convenience entries.
    pub fn rank(&self) -> u8 {
        match self {
            WaitlistPriority::Urgent => 0,
            WaitlistPriority::Convenience => 1,
        }
    }
}

impl std::fmt::Display for WaitlistPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitlistPriority::Urgent => write!(f, "urgent"),
            WaitlistPriority::Convenience => write!(f, "convenience"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Active,
    Notified,
    Expired,
    Fulfilled,
    Removed,
}

impl WaitlistStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WaitlistStatus::Expired | WaitlistStatus::Fulfilled | WaitlistStatus::Removed
        )
    }

    /// Transitions are forward-only; a notified entry never returns to the
    /// active pool.
    pub fn can_transition_to(&self, target: &WaitlistStatus) -> bool {
        use WaitlistStatus::*;
        match (self, target) {
            (Active, Notified) => true,
            (Active, Expired) => true,
            (Active, Removed) => true,
            (Active, Fulfilled) => true,
            (Notified, Removed) => true,
            (Notified, Fulfilled) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnqueueWaitlistRequest {
    pub patient_id: Uuid,
    pub service_type: String,
    pub provider_id: Option<Uuid>,
    pub priority: WaitlistPriority,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWaitlistStatusRequest {
    pub status: WaitlistStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistFilter {
    pub status: Option<WaitlistStatus>,
    pub service_type: Option<String>,
    pub provider_id: Option<Uuid>,
}

/// A slot released by a cancellation, offered back to the waitlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreedSlot {
    pub service_type: String,
    pub provider_id: Option<Uuid>,
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoFillReport {
    pub attempted: usize,
    pub outcomes: Vec<NotificationOutcome>,
}

impl AutoFillReport {
    pub fn notified(&self) -> usize {
        self.outcomes.iter().filter(|o| o.delivered).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.delivered).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationOutcome {
    pub entry_id: Uuid,
    pub patient_id: Uuid,
    pub delivered: bool,
    pub error: Option<String>,
}
