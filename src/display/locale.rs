use chrono::{DateTime, Datelike, Local};
use serde::Serialize;

use crate::models::schedule::DayOfWeek;

/// Day-name and message table of the public display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Indonesian,
    English,
}

const DAYS_ID: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

impl Locale {
    pub fn day_name(self, day: DayOfWeek) -> &'static str {
        match self {
            Locale::Indonesian => DAYS_ID[day.index()],
            Locale::English => day.english_name(),
        }
    }

    pub fn schedule_title(self, day: DayOfWeek) -> String {
        let prefix = match self {
            Locale::Indonesian => "Jadwal Perkuliahan",
            Locale::English => "Lecture Schedule",
        };
        format!("{prefix} - {}", self.day_name(day))
    }

    pub fn no_classes_message(self) -> &'static str {
        match self {
            Locale::Indonesian => "Tidak ada jadwal kuliah hari ini.",
            Locale::English => "No classes today.",
        }
    }

    pub fn no_images_message(self) -> &'static str {
        "No Images"
    }

    /// 24-hour clock; id-ID separates with dots.
    pub fn clock_text(self, now: DateTime<Local>) -> String {
        match self {
            Locale::Indonesian => now.format("%H.%M.%S").to_string(),
            Locale::English => now.format("%H:%M:%S").to_string(),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "indonesian" => Ok(Locale::Indonesian),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            other => Err(anyhow::anyhow!("Unknown display locale: {other}")),
        }
    }
}

/// Local day of week of `now`.
pub fn today(now: DateTime<Local>) -> DayOfWeek {
    DayOfWeek::from(now.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn indonesian_title_uses_local_day_name() {
        assert_eq!(
            Locale::Indonesian.schedule_title(DayOfWeek::Monday),
            "Jadwal Perkuliahan - Senin"
        );
        assert_eq!(Locale::English.schedule_title(DayOfWeek::Sunday), "Lecture Schedule - Sunday");
    }

    #[test]
    fn clock_text_is_24_hour() {
        let now = Local.with_ymd_and_hms(2026, 10, 18, 21, 5, 9).unwrap();
        assert_eq!(Locale::Indonesian.clock_text(now), "21.05.09");
        assert_eq!(Locale::English.clock_text(now), "21:05:09");
    }

    #[test]
    fn today_follows_local_weekday() {
        // 2026-10-19 is a Monday.
        let now = Local.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap();
        assert_eq!(today(now), DayOfWeek::Monday);
    }

    #[test]
    fn parses_locale_codes() {
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Indonesian);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr".parse::<Locale>().is_err());
    }
}
