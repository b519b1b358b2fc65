use serde::{Deserialize, Serialize};

/// The single settings row. `GET /api/settings` answers `{}` when the row
/// does not exist yet, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub color_bg_page: Option<String>,
    #[serde(default)]
    pub color_bg_header: Option<String>,
    #[serde(default)]
    pub color_bg_marquee: Option<String>,
    #[serde(default)]
    pub color_text_header: Option<String>,
    #[serde(default)]
    pub color_text_marquee: Option<String>,
}

/// Empty strings are treated like missing fields.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
