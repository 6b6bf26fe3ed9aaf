// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE SCHEDULING MODELS
// ==============================================================================

/// A `[start, end)` interval owned by one provider. Appointments are the
/// persisted entities; a `TimeSlot` is the projection the engine works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Option<Uuid>,
    pub provider_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(
        provider_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, SchedulingError> {
        if start >= end {
            return Err(SchedulingError::InvalidInterval { start, end });
        }
        Ok(Self {
            id: None,
            provider_id,
            start,
            end,
        })
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Half-open overlap: `[s1,e1)` and `[s2,e2)` overlap iff
    /// `s1 < e2 && s2 < e1`. Touching boundaries do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ==============================================================================
// WORKING HOURS CONFIGURATION
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunchBreak {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Weekday-keyed opening hours plus an optional lunch break applied to every
/// open day. Validated at construction so slot generation never sees a
/// malformed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHoursConfig {
    /// Indexed Monday through Sunday; `None` means closed.
    days: [Option<DayHours>; 7],
    lunch_break: Option<LunchBreak>,
}

impl WorkingHoursConfig {
    pub fn new(
        days: [Option<DayHours>; 7],
        lunch_break: Option<LunchBreak>,
    ) -> Result<Self, SchedulingError> {
        if let Some(lunch) = lunch_break {
            if lunch.start >= lunch.end {
                return Err(SchedulingError::InvalidWorkingHours(format!(
                    "lunch break start {} is not before its end {}",
                    lunch.start, lunch.end
                )));
            }
        }

        for day in days.iter().flatten() {
            if day.open >= day.close {
                return Err(SchedulingError::InvalidWorkingHours(format!(
                    "opening time {} is not before closing time {}",
                    day.open, day.close
                )));
            }
            if let Some(lunch) = lunch_break {
                if lunch.start <= day.open || lunch.end >= day.close {
                    return Err(SchedulingError::InvalidWorkingHours(format!(
                        "lunch break {}-{} must fall strictly inside working hours {}-{}",
                        lunch.start, lunch.end, day.open, day.close
                    )));
                }
            }
        }

        Ok(Self { days, lunch_break })
    }

    pub fn hours_for(&self, weekday: Weekday) -> Option<DayHours> {
        self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn lunch_break(&self) -> Option<LunchBreak> {
        self.lunch_break
    }

    /// Monday to Friday 09:00-18:00 with a 12:00-13:00 lunch break.
    pub fn clinic_default() -> Self {
        let open_day = DayHours {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        };
        let lunch = LunchBreak {
            start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        };
        Self {
            days: [
                Some(open_day),
                Some(open_day),
                Some(open_day),
                Some(open_day),
                Some(open_day),
                None,
                None,
            ],
            lunch_break: Some(lunch),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    pub provider_id: Uuid,
    pub working_hours: WorkingHoursConfig,
    pub appointment_duration_minutes: i32,
    pub buffer_minutes: i32,
}

impl AvailabilityConfig {
    pub fn new(
        provider_id: Uuid,
        working_hours: WorkingHoursConfig,
        appointment_duration_minutes: i32,
        buffer_minutes: i32,
    ) -> Result<Self, SchedulingError> {
        if appointment_duration_minutes <= 0 {
            return Err(SchedulingError::InvalidDuration(appointment_duration_minutes));
        }
        if buffer_minutes < 0 {
            return Err(SchedulingError::InvalidBuffer(buffer_minutes));
        }
        Ok(Self {
            provider_id,
            working_hours,
            appointment_duration_minutes,
            buffer_minutes,
        })
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub provider_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Falls back to the provider's configured buffer when absent.
    pub buffer_minutes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum BookingDecision {
    Admitted { slot_id: Uuid },
    Rejected { conflicts: Vec<TimeSlot> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    /// Service the freed slot should be offered for on the waitlist.
    pub service_type: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailabilityResponse {
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub morning_slots: Vec<DateTime<Utc>>,
    pub afternoon_slots: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertScheduleRequest {
    pub days: [Option<DayHours>; 7],
    pub lunch_break: Option<LunchBreak>,
    pub appointment_duration_minutes: Option<i32>,
    pub buffer_minutes: Option<i32>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Invalid time interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Appointment duration must be positive, got {0}")]
    InvalidDuration(i32),

    #[error("Buffer minutes must not be negative, got {0}")]
    InvalidBuffer(i32),

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Appointment slot not found: {0}")]
    SlotNotFound(Uuid),

    #[error("Store error: {0}")]
    StoreError(String),
}
