use serde::Serialize;

use super::{content::ContentItem, schedule::ScheduleEntry, settings::DisplaySettings};

/// Everything fetched in one poll cycle. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Snapshot {
    pub items: Vec<ContentItem>,
    pub schedule: Vec<ScheduleEntry>,
    pub settings: DisplaySettings,
}
