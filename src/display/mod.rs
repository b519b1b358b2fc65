pub mod engine;
pub mod frame;
pub mod locale;
pub mod schedule;
pub mod slideshow;
pub mod theme;
pub mod ticker;
pub mod video;
