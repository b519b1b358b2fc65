use tracing::info;

use super::frame::VideoView;
use crate::error::DisplayError;
use crate::models::content::{Category, ContentItem};
use crate::services::metrics::{PLAYBACK_BLOCKED_COUNTER, VIDEO_LOADS_COUNTER};

/// Starts playback of a freshly loaded source.
pub trait MediaPlayer: Send + Sync {
    fn play(&mut self, src: &str) -> Result<(), DisplayError>;
}

/// Headless player: playback always starts.
pub struct AutoplayPlayer;

impl MediaPlayer for AutoplayPlayer {
    fn play(&mut self, _src: &str) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Most recently created video item; ties keep response order.
pub fn pick_video(items: &[ContentItem]) -> Option<&ContentItem> {
    items
        .iter()
        .filter(|item| item.category == Category::Video && item.asset_path().is_some())
        .fold(None, |best: Option<&ContentItem>, item| match best {
            Some(b) if b.created_at >= item.created_at => Some(b),
            _ => Some(item),
        })
}

pub struct VideoRenderer {
    player: Box<dyn MediaPlayer>,
}

impl VideoRenderer {
    pub fn new(player: Box<dyn MediaPlayer>) -> Self {
        Self { player }
    }

    /// Returns true when the element was reloaded. No video item leaves the
    /// current one playing.
    pub fn render(&mut self, items: &[ContentItem], view: &mut VideoView) -> bool {
        let Some(path) = pick_video(items).and_then(ContentItem::asset_path) else {
            return false;
        };

        // Absolute and relative forms of the same asset compare equal.
        if view.src.as_deref().is_some_and(|current| current.ends_with(path)) {
            return false;
        }

        view.src = Some(path.to_string());
        view.loads += 1;
        VIDEO_LOADS_COUNTER.inc();
        info!("Video source changed to {}", path);

        match self.player.play(path) {
            Ok(()) => view.playing = true,
            Err(e) => {
                view.playing = false;
                PLAYBACK_BLOCKED_COUNTER.inc();
                info!("Autoplay policy blocked: {}", e);
            }
        }
        true
    }
}
