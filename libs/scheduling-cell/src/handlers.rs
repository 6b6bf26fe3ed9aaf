// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use shared_models::AppError;
use waitlist_cell::{AutoFillService, FreedSlot};

use crate::models::{
    AvailabilityConfig, AvailabilityQuery, BookSlotRequest, BookingDecision,
    CancelAppointmentRequest, DayAvailabilityResponse, TimeSlot, UpsertScheduleRequest,
    WorkingHoursConfig,
};
use crate::services::availability::{calculate_available_slots, split_morning_afternoon};
use crate::services::booking::BookingService;
use crate::store::{AppointmentStore, ScheduleStore};

pub struct SchedulingState {
    pub booking: Arc<BookingService>,
    pub store: Arc<dyn AppointmentStore>,
    pub schedules: Arc<ScheduleStore>,
    pub autofill: Arc<AutoFillService>,
}

/// Admit a booking or reject it with the conflicting slots.
pub async fn book_appointment(
    State(state): State<Arc<SchedulingState>>,
    Json(request): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let proposed = TimeSlot::new(request.provider_id, request.start, request.end)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let buffer_minutes = match request.buffer_minutes {
        Some(buffer) => buffer,
        None => state.schedules.config_for(request.provider_id).await.buffer_minutes,
    };

    let decision = state
        .booking
        .book(proposed, buffer_minutes)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    match decision {
        BookingDecision::Admitted { slot_id } => Ok((
            StatusCode::CREATED,
            Json(json!({
                "admitted": true,
                "slot_id": slot_id
            })),
        )),
        BookingDecision::Rejected { conflicts } => Ok((
            StatusCode::CONFLICT,
            Json(json!({
                "admitted": false,
                "conflicts": conflicts
            })),
        )),
    }
}

/// Open slots for a provider day, split into morning and afternoon.
pub async fn get_availability(
    State(state): State<Arc<SchedulingState>>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<DayAvailabilityResponse>, AppError> {
    let mut config = state.schedules.config_for(provider_id).await;

    if let Some(duration) = query.duration_minutes {
        config = AvailabilityConfig::new(
            provider_id,
            config.working_hours,
            duration,
            config.buffer_minutes,
        )
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    }

    let existing = state
        .store
        .slots_for_day(provider_id, query.date)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let slots = calculate_available_slots(query.date, &config, &existing);
    let (morning_slots, afternoon_slots) = split_morning_afternoon(&slots);

    Ok(Json(DayAvailabilityResponse {
        provider_id,
        date: query.date,
        morning_slots,
        afternoon_slots,
    }))
}

/// Set or replace a provider's working hours and slot parameters.
pub async fn upsert_schedule(
    State(state): State<Arc<SchedulingState>>,
    Path(provider_id): Path<Uuid>,
    Json(request): Json<UpsertScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let defaults = state.schedules.config_for(provider_id).await;

    let working_hours = WorkingHoursConfig::new(request.days, request.lunch_break)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let config = AvailabilityConfig::new(
        provider_id,
        working_hours,
        request
            .appointment_duration_minutes
            .unwrap_or(defaults.appointment_duration_minutes),
        request.buffer_minutes.unwrap_or(defaults.buffer_minutes),
    )
    .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state.schedules.upsert(config).await;
    info!("Schedule updated for provider {}", provider_id);

    Ok(Json(json!({ "updated": true })))
}

/// Cancel a booking and offer the freed slot to matching waitlist entries.
/// The auto-fill outcome is recorded in the response rather than fired off
/// and forgotten, so partial notification failures stay observable.
pub async fn cancel_appointment(
    State(state): State<Arc<SchedulingState>>,
    Path(slot_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let freed_slot = state
        .booking
        .cancel(slot_id)
        .await
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    let freed = FreedSlot {
        service_type: request.service_type,
        provider_id: Some(freed_slot.provider_id),
        start: freed_slot.start,
    };

    match state.autofill.notify_waitlist_for_freed_slot(&freed).await {
        Ok(report) => Ok(Json(json!({
            "cancelled": true,
            "slot_id": slot_id,
            "waitlist_candidates_attempted": report.attempted,
            "waitlist_candidates_notified": report.notified(),
            "waitlist_outcomes": report.outcomes
        }))),
        Err(e) => {
            error!("Auto-fill failed after cancelling slot {}: {}", slot_id, e);
            Ok(Json(json!({
                "cancelled": true,
                "slot_id": slot_id,
                "auto_fill_error": e.to_string()
            })))
        }
    }
}
