use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::models::{FreedSlot, WaitlistEntry};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("Notification endpoint rejected the request with status {0}")]
    Rejected(u16),
}

/// Delivery port for freed-slot offers. The auto-fill flow only cares
/// whether a given offer reached the patient, not how.
#[async_trait]
pub trait SlotNotifier: Send + Sync {
    async fn notify(&self, entry: &WaitlistEntry, freed: &FreedSlot) -> Result<(), NotifyError>;
}

/// Posts freed-slot offers to an external webhook endpoint.
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: String, timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, endpoint }
    }
}

#[async_trait]
impl SlotNotifier for WebhookNotifier {
    async fn notify(&self, entry: &WaitlistEntry, freed: &FreedSlot) -> Result<(), NotifyError> {
        let payload = json!({
            "waitlist_entry_id": entry.id,
            "patient_id": entry.patient_id,
            "service_type": freed.service_type,
            "provider_id": freed.provider_id,
            "slot_start": freed.start,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(response.status().as_u16()));
        }

        debug!(
            "Freed-slot offer delivered to patient {} for entry {}",
            entry.patient_id, entry.id
        );
        Ok(())
    }
}
