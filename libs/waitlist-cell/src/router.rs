use std::sync::Arc;

use axum::{
    routing::{delete, patch, post},
    Router,
};

use crate::handlers::{
    enqueue_entry, expire_overdue, list_entries, remove_entry, update_entry_status, WaitlistState,
};

pub fn create_waitlist_router(state: Arc<WaitlistState>) -> Router {
    Router::new()
        .route("/", post(enqueue_entry).get(list_entries))
        .route("/{entry_id}", delete(remove_entry))
        .route("/{entry_id}/status", patch(update_entry_status))
        .route("/expire", post(expire_overdue))
        .with_state(state)
}
