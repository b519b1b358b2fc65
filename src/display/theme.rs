use super::frame::ThemeView;
use crate::models::settings::{present, DisplaySettings};

fn keep_or_set(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = present(value) {
        *slot = Some(v.to_string());
    }
}

/// Maps settings onto the theme. Absent fields keep the previous value,
/// except the logo: a removed logo must disappear.
pub fn apply(settings: &DisplaySettings, theme: &mut ThemeView) {
    keep_or_set(&mut theme.page_background, &settings.color_bg_page);
    keep_or_set(&mut theme.header_background, &settings.color_bg_header);
    keep_or_set(&mut theme.ticker_background, &settings.color_bg_marquee);
    keep_or_set(&mut theme.ticker_color, &settings.color_text_marquee);
    keep_or_set(&mut theme.clock_color, &settings.color_text_header);
    keep_or_set(&mut theme.school_name, &settings.school_name);
    theme.logo_url = present(&settings.logo_url).map(str::to_string);
}
