pub mod display;
pub mod health;
pub mod metrics;
