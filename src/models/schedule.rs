use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Index with Sunday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// English name, the value the schedules endpoint filters on.
    pub fn english_name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        DayOfWeek::ALL[day.num_days_from_sunday() as usize]
    }
}

/// Row of `GET /api/schedules?day=<day>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEntry {
    pub id: i64,
    pub course_name: String,
    #[serde(default)]
    pub lecturer: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleEntry {
    /// `HH:MM - HH:MM`
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mysql_time_columns() {
        let raw = r#"{
            "id": 9,
            "course_name": "Basis Data",
            "lecturer": "Dr. Sari",
            "room": null,
            "day_of_week": "Monday",
            "start_time": "08:00:00",
            "end_time": "09:40:00",
            "created_at": "2026-09-01T00:00:00.000Z"
        }"#;
        let entry: ScheduleEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.day_of_week, DayOfWeek::Monday);
        assert_eq!(entry.room, None);
        assert_eq!(entry.time_range(), "08:00 - 09:40");
    }

    #[test]
    fn weekday_maps_to_sunday_based_index() {
        assert_eq!(DayOfWeek::from(Weekday::Sun).index(), 0);
        assert_eq!(DayOfWeek::from(Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from(Weekday::Sat).english_name(), "Saturday");
    }
}
