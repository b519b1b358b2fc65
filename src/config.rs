use std::env;

use crate::display::locale::Locale;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub poll_interval_ms: u64,
    pub slide_interval_ms: u64,
    pub schedule_rotate_ms: u64,
    pub schedule_fade_ms: u64,
    pub schedule_page_size: usize,
    pub locale: Locale,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3000/api".into(),
            poll_interval_ms: 60_000,
            slide_interval_ms: 5_000,
            schedule_rotate_ms: 8_000,
            schedule_fade_ms: 500,
            schedule_page_size: 5,
            locale: Locale::Indonesian,
            host: "0.0.0.0".into(),
            port: 8090,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            api_base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.api_base_url),
            poll_interval_ms: parsed("POLL_INTERVAL_MS", defaults.poll_interval_ms)?,
            slide_interval_ms: parsed("SLIDE_INTERVAL_MS", defaults.slide_interval_ms)?,
            schedule_rotate_ms: parsed("SCHEDULE_ROTATE_MS", defaults.schedule_rotate_ms)?,
            schedule_fade_ms: parsed("SCHEDULE_FADE_MS", defaults.schedule_fade_ms)?,
            schedule_page_size: parsed("SCHEDULE_PAGE_SIZE", defaults.schedule_page_size)?,
            locale: env::var("DISPLAY_LOCALE")
                .unwrap_or_else(|_| "id".into())
                .parse()?,
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.schedule_page_size == 0 {
            anyhow::bail!("SCHEDULE_PAGE_SIZE must be at least 1");
        }
        for (key, value) in [
            ("POLL_INTERVAL_MS", self.poll_interval_ms),
            ("SLIDE_INTERVAL_MS", self.slide_interval_ms),
            ("SCHEDULE_ROTATE_MS", self.schedule_rotate_ms),
        ] {
            if value == 0 {
                anyhow::bail!("{key} must be greater than zero");
            }
        }
        // Fade-out and fade-in both finish before the next rotation tick.
        if self.schedule_fade_ms.saturating_mul(2) >= self.schedule_rotate_ms {
            anyhow::bail!(
                "SCHEDULE_FADE_MS ({}) must be less than half of SCHEDULE_ROTATE_MS ({})",
                self.schedule_fade_ms,
                self.schedule_rotate_ms
            );
        }
        Ok(())
    }
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {key}: {e}")),
        _ => Ok(default),
    }
}
