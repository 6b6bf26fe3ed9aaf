pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use error::WaitlistError;
pub use models::*;
pub use repository::{InMemoryWaitlistRepository, WaitlistRepository};
pub use router::create_waitlist_router;
pub use services::autofill::AutoFillService;
pub use services::notifier::{NotifyError, SlotNotifier, WebhookNotifier};
pub use services::queue::WaitlistQueueService;
