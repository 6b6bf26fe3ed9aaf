use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use scheduling_cell::create_scheduling_router;
use scheduling_cell::handlers::SchedulingState;
use waitlist_cell::create_waitlist_router;
use waitlist_cell::handlers::WaitlistState;

pub fn create_router(
    scheduling_state: Arc<SchedulingState>,
    waitlist_state: Arc<WaitlistState>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic scheduler API is running!" }))
        .nest("/appointments", create_scheduling_router(scheduling_state))
        .nest("/waitlist", create_waitlist_router(waitlist_state))
}
