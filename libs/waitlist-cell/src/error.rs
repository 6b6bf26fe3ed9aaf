use thiserror::Error;
use uuid::Uuid;

use crate::models::WaitlistStatus;

#[derive(Error, Debug)]
pub enum WaitlistError {
    #[error("Patient {patient_id} already has an active waitlist entry for '{service_type}'")]
    DuplicateActiveEntry {
        patient_id: Uuid,
        service_type: String,
    },

    #[error("Waitlist entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: WaitlistStatus,
        to: WaitlistStatus,
    },

    #[error("Repository error: {0}")]
    RepositoryError(String),
}
