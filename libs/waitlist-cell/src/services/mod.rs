pub mod autofill;
pub mod notifier;
pub mod queue;
