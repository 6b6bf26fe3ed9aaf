use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AvailabilityConfig, SchedulingError, TimeSlot, WorkingHoursConfig};

/// Storage port for booked appointment slots. The engine only ever touches
/// these operations; any persistence technology may back them.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn slots_for_day(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, SchedulingError>;

    async fn insert(&self, slot: TimeSlot) -> Result<Uuid, SchedulingError>;

    async fn remove(&self, slot_id: Uuid) -> Result<Option<TimeSlot>, SchedulingError>;
}

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    slots: RwLock<HashMap<Uuid, TimeSlot>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn slots_for_day(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        let slots = self.slots.read().await;
        let mut result: Vec<TimeSlot> = slots
            .values()
            .filter(|slot| slot.provider_id == provider_id && slot.start.date_naive() == date)
            .cloned()
            .collect();
        result.sort_by_key(|slot| slot.start);
        Ok(result)
    }

    async fn insert(&self, slot: TimeSlot) -> Result<Uuid, SchedulingError> {
        let id = slot.id.unwrap_or_else(Uuid::new_v4);
        let mut slots = self.slots.write().await;
        slots.insert(id, TimeSlot { id: Some(id), ..slot });
        Ok(id)
    }

    async fn remove(&self, slot_id: Uuid) -> Result<Option<TimeSlot>, SchedulingError> {
        Ok(self.slots.write().await.remove(&slot_id))
    }
}

// ==============================================================================
// PROVIDER SCHEDULE STORE
// ==============================================================================

#[derive(Debug, Clone)]
pub struct ScheduleDefaults {
    pub working_hours: WorkingHoursConfig,
    pub appointment_duration_minutes: i32,
    pub buffer_minutes: i32,
}

/// Per-provider availability configuration with clinic-wide defaults for
/// providers that never set up a schedule of their own.
pub struct ScheduleStore {
    configs: RwLock<HashMap<Uuid, AvailabilityConfig>>,
    defaults: ScheduleDefaults,
}

impl ScheduleStore {
    pub fn new(defaults: ScheduleDefaults) -> Self {
        Self {
            configs: RwLock::new(HashMap::new()),
            defaults,
        }
    }

    pub async fn upsert(&self, config: AvailabilityConfig) {
        let mut configs = self.configs.write().await;
        configs.insert(config.provider_id, config);
    }

    pub async fn config_for(&self, provider_id: Uuid) -> AvailabilityConfig {
        let configs = self.configs.read().await;
        configs.get(&provider_id).cloned().unwrap_or(AvailabilityConfig {
            provider_id,
            working_hours: self.defaults.working_hours.clone(),
            appointment_duration_minutes: self.defaults.appointment_duration_minutes,
            buffer_minutes: self.defaults.buffer_minutes,
        })
    }
}
