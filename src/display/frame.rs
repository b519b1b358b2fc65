use serde::Serialize;

/// Rendered display state: what the kiosk page shows right now. Renderers
/// mutate their own section; the agent serves a copy at `GET /display`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DisplayFrame {
    pub clock: ClockView,
    pub video: VideoView,
    pub ticker: TickerView,
    pub slideshow: SlideshowView,
    pub schedule: ScheduleView,
    pub theme: ThemeView,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ClockView {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VideoView {
    pub src: Option<String>,
    /// How many times the element was (re)loaded.
    pub loads: u64,
    pub playing: bool,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TickerView {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SlideshowView {
    pub images: Vec<String>,
    pub active: Option<usize>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FadeClass {
    #[default]
    None,
    FadeExit,
    FadeEnter,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScheduleView {
    pub title: String,
    pub rows: Vec<ScheduleRow>,
    /// Replaces the rows when there is nothing to show.
    pub message: Option<String>,
    pub fade: FadeClass,
    pub page: Option<PageIndicator>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageIndicator {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleRow {
    pub time: String,
    pub course: String,
    pub lecturer: String,
    pub room: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ThemeView {
    pub page_background: Option<String>,
    pub header_background: Option<String>,
    pub ticker_background: Option<String>,
    pub ticker_color: Option<String>,
    pub clock_color: Option<String>,
    pub school_name: Option<String>,
    pub logo_url: Option<String>,
}
