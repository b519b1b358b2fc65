use tracing::{debug, info};

use super::frame::SlideshowView;
use crate::models::content::{Category, ContentItem};
use crate::services::metrics::SLIDESHOW_REBUILDS_COUNTER;
use crate::services::scheduler::{Scheduler, TimerEvent, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowState {
    Idle,
    Single,
    Rotating,
}

/// Ordered image paths of the slideshow items. Two snapshots with the same
/// key render identically.
pub fn slide_key(items: &[ContentItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.category == Category::Slideshow)
        .filter_map(|item| {
            let path = item.image_path().map(str::to_string);
            if path.is_none() {
                debug!("Slideshow item {} has no image, skipped", item.id);
            }
            path
        })
        .collect()
}

pub struct SlideshowRenderer {
    interval_ms: u64,
    rendered: Option<Vec<String>>,
    index: usize,
    timer: Option<TimerId>,
}

impl SlideshowRenderer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            rendered: None,
            index: 0,
            timer: None,
        }
    }

    pub fn state(&self) -> SlideshowState {
        match self.rendered.as_ref().map(Vec::len) {
            None | Some(0) => SlideshowState::Idle,
            Some(1) => SlideshowState::Single,
            Some(_) => SlideshowState::Rotating,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Rebuilds only when the slide set changed. Returns true on rebuild.
    pub fn render(
        &mut self,
        items: &[ContentItem],
        view: &mut SlideshowView,
        scheduler: &mut Scheduler,
        placeholder: &str,
    ) -> bool {
        let key = slide_key(items);
        if self.rendered.as_ref() == Some(&key) {
            debug!("Slideshow unchanged ({} slides), skipping rebuild", key.len());
            return false;
        }

        scheduler.clear(&mut self.timer);
        self.index = 0;
        SLIDESHOW_REBUILDS_COUNTER.inc();

        if key.is_empty() {
            view.images.clear();
            view.active = None;
            view.placeholder = Some(placeholder.to_string());
        } else {
            view.images = key.clone();
            view.active = Some(0);
            view.placeholder = None;
            if key.len() > 1 {
                self.timer = Some(scheduler.set_interval(TimerEvent::SlideAdvance, self.interval_ms));
            }
        }

        info!("Slideshow rebuilt with {} slide(s)", key.len());
        self.rendered = Some(key);
        true
    }

    /// Rotation tick: deactivate the current slide and activate the next one.
    pub fn advance(&mut self, view: &mut SlideshowView) {
        let count = view.images.len();
        if count < 2 {
            return;
        }
        self.index = (self.index + 1) % count;
        view.active = Some(self.index);
    }
}
