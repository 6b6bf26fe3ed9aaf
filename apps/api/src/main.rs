use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use scheduling_cell::handlers::SchedulingState;
use scheduling_cell::services::booking::BookingService;
use scheduling_cell::{
    InMemoryAppointmentStore, ScheduleDefaults, ScheduleStore, WorkingHoursConfig,
};
use shared_config::AppConfig;
use waitlist_cell::handlers::WaitlistState;
use waitlist_cell::{
    AutoFillService, InMemoryWaitlistRepository, WaitlistQueueService, WebhookNotifier,
};

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic scheduler API server");

    // Load configuration
    let config = AppConfig::from_env();

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Wire up the waitlist cell
    let repository = Arc::new(InMemoryWaitlistRepository::new());
    let queue = Arc::new(WaitlistQueueService::new(repository));
    let notifier = Arc::new(WebhookNotifier::new(
        config.notify_webhook_url.clone(),
        config.notify_timeout_seconds,
    ));
    let autofill = Arc::new(AutoFillService::new(
        Arc::clone(&queue),
        notifier,
        config.auto_fill_fan_out,
    ));
    let waitlist_state = Arc::new(WaitlistState {
        queue: Arc::clone(&queue),
    });

    // Wire up the scheduling cell
    let store = Arc::new(InMemoryAppointmentStore::new());
    let schedules = Arc::new(ScheduleStore::new(ScheduleDefaults {
        working_hours: WorkingHoursConfig::clinic_default(),
        appointment_duration_minutes: config.default_appointment_duration_minutes,
        buffer_minutes: config.default_buffer_minutes,
    }));
    let booking = Arc::new(BookingService::new(store.clone()));
    let scheduling_state = Arc::new(SchedulingState {
        booking,
        store,
        schedules,
        autofill,
    });

    // Build the application router
    let app = router::create_router(scheduling_state, waitlist_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .await
        .unwrap();
}
