use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which renderer consumes an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Announcement,
    Event,
    News,
    Video,
    Slideshow,
}

impl Category {
    /// Announcements and news scroll in the ticker.
    pub fn is_headline(self) -> bool {
        matches!(self, Category::Announcement | Category::News)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Announcement => "announcement",
            Category::Event => "event",
            Category::News => "news",
            Category::Video => "video",
            Category::Slideshow => "slideshow",
        };
        write!(f, "{s}")
    }
}

/// Row of `GET /api/items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    /// Body text, or the asset path for video items.
    #[serde(default)]
    pub content: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Non-empty content, the asset path of a video item.
    pub fn asset_path(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    pub fn image_path(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.is_empty())
    }
}
