pub mod api;
pub mod clock;
pub mod metrics;
pub mod poller;
pub mod scheduler;
