use super::frame::TickerView;
use crate::models::content::ContentItem;

pub const SEPARATOR: &str = "   |   ";

/// Announcement and news titles joined by [`SEPARATOR`].
pub fn headlines(items: &[ContentItem]) -> String {
    items
        .iter()
        .filter(|item| item.category.is_headline())
        .map(|item| item.title.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Writes the headlines twice so the marquee wraps without a seam. Nothing
/// to show leaves the previous text in place.
pub fn render(items: &[ContentItem], view: &mut TickerView) -> bool {
    let headlines = headlines(items);
    if headlines.is_empty() {
        return false;
    }
    let text = format!("{headlines}{SEPARATOR}{headlines}");
    if view.text == text {
        return false;
    }
    view.text = text;
    true
}
