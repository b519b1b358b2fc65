use chrono::{DateTime, Local};

/// Wall-clock source. The display derives today's day name and the clock
/// text from it on every poll, so tests pin it.
pub trait WallClock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always answers the same instant.
pub struct FixedClock(pub DateTime<Local>);

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
