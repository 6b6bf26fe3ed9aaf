use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::WaitlistError;
use crate::models::{AutoFillReport, FreedSlot, NotificationOutcome, WaitlistStatus};
use crate::services::notifier::SlotNotifier;
use crate::services::queue::WaitlistQueueService;

/// Offers a freed slot to the top waitlist candidates.
pub struct AutoFillService {
    queue: Arc<WaitlistQueueService>,
    notifier: Arc<dyn SlotNotifier>,
    fan_out: usize,
}

impl AutoFillService {
    pub fn new(
        queue: Arc<WaitlistQueueService>,
        notifier: Arc<dyn SlotNotifier>,
        fan_out: usize,
    ) -> Self {
        Self {
            queue,
            notifier,
            fan_out,
        }
    }

    /// Notify up to `fan_out` matching candidates in queue order. A failed
    /// delivery leaves that entry active and does not stop the remaining
    /// candidates from being tried; every outcome lands in the report.
    #[instrument(skip(self, freed), fields(service_type = %freed.service_type))]
    pub async fn notify_waitlist_for_freed_slot(
        &self,
        freed: &FreedSlot,
    ) -> Result<AutoFillReport, WaitlistError> {
        let candidates = self.queue.candidates_for_slot(freed, self.fan_out).await?;
        info!(
            "Offering freed slot at {} to {} waitlist candidates",
            freed.start,
            candidates.len()
        );

        let mut outcomes = Vec::with_capacity(candidates.len());
        for entry in &candidates {
            match self.notifier.notify(entry, freed).await {
                Ok(()) => {
                    let error = match self
                        .queue
                        .update_status(entry.id, WaitlistStatus::Notified)
                        .await
                    {
                        Ok(_) => None,
                        Err(e) => {
                            warn!(
                                "Delivered offer for entry {} but could not mark it notified: {}",
                                entry.id, e
                            );
                            Some(e.to_string())
                        }
                    };
                    outcomes.push(NotificationOutcome {
                        entry_id: entry.id,
                        patient_id: entry.patient_id,
                        delivered: true,
                        error,
                    });
                }
                Err(e) => {
                    warn!(
                        "Offer for entry {} failed, entry stays active: {}",
                        entry.id, e
                    );
                    outcomes.push(NotificationOutcome {
                        entry_id: entry.id,
                        patient_id: entry.patient_id,
                        delivered: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(AutoFillReport {
            attempted: candidates.len(),
            outcomes,
        })
    }
}
