// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{
    book_appointment, cancel_appointment, get_availability, upsert_schedule, SchedulingState,
};

pub fn create_scheduling_router(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/book", post(book_appointment))
        .route("/availability/{provider_id}", get(get_availability))
        .route("/schedule/{provider_id}", put(upsert_schedule))
        .route("/{slot_id}/cancel", post(cancel_appointment))
        .with_state(state)
}
