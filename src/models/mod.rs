pub mod content;
pub mod schedule;
pub mod settings;
pub mod snapshot;
