pub mod models;
pub mod services;
pub mod store;
pub mod handlers;
pub mod router;

pub use models::*;
pub use store::{AppointmentStore, InMemoryAppointmentStore, ScheduleDefaults, ScheduleStore};
pub use router::create_scheduling_router;
