use chrono::{DateTime, Local};
use serde::Serialize;

use super::frame::DisplayFrame;
use super::locale::{today, Locale};
use super::schedule::{PaginatorTiming, SchedulePaginator};
use super::slideshow::SlideshowRenderer;
use super::video::{MediaPlayer, VideoRenderer};
use super::{theme, ticker};
use crate::config::Config;
use crate::error::DisplayError;
use crate::models::snapshot::Snapshot;
use crate::services::scheduler::{Scheduler, TimerEvent, TimerId};

const CLOCK_TICK_MS: u64 = 1_000;

/// Outcome of one [`DisplayEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing else is due before the deadline.
    Idle,
    Fired(TimerEvent),
    /// The poll timer fired; the caller fetches and applies a snapshot.
    PollDue,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PollStats {
    pub polls: u64,
    pub failures: u64,
    pub last_poll_ok: Option<bool>,
    pub last_error: Option<String>,
}

/// Owns the current snapshot, every renderer and their timers. Only the
/// poller replaces the snapshot; renderers read it and write their own
/// section of the frame.
pub struct DisplayEngine {
    locale: Locale,
    poll_interval_ms: u64,
    scheduler: Scheduler,
    frame: DisplayFrame,
    snapshot: Snapshot,
    video: VideoRenderer,
    slideshow: SlideshowRenderer,
    schedule: SchedulePaginator,
    poll_timer: Option<TimerId>,
    clock_timer: Option<TimerId>,
    stats: PollStats,
}

impl DisplayEngine {
    pub fn new(config: &Config, player: Box<dyn MediaPlayer>) -> Self {
        Self {
            locale: config.locale,
            poll_interval_ms: config.poll_interval_ms,
            scheduler: Scheduler::new(),
            frame: DisplayFrame::default(),
            snapshot: Snapshot::default(),
            video: VideoRenderer::new(player),
            slideshow: SlideshowRenderer::new(config.slide_interval_ms),
            schedule: SchedulePaginator::new(PaginatorTiming {
                page_size: config.schedule_page_size,
                rotate_ms: config.schedule_rotate_ms,
                fade_ms: config.schedule_fade_ms,
            }),
            poll_timer: None,
            clock_timer: None,
            stats: PollStats::default(),
        }
    }

    /// Arms the poll and clock timers. The first poll is the caller's job.
    pub fn start(&mut self, now: DateTime<Local>) {
        self.scheduler.clear(&mut self.poll_timer);
        self.scheduler.clear(&mut self.clock_timer);
        self.poll_timer = Some(self.scheduler.set_interval(TimerEvent::Poll, self.poll_interval_ms));
        self.clock_timer = Some(self.scheduler.set_interval(TimerEvent::ClockTick, CLOCK_TICK_MS));
        self.frame.clock.text = self.locale.clock_text(now);
    }

    /// Hands a fresh snapshot to the renderers in display order: video,
    /// ticker, slideshow, settings, schedule.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot, now: DateTime<Local>) {
        self.video.render(&snapshot.items, &mut self.frame.video);
        ticker::render(&snapshot.items, &mut self.frame.ticker);
        self.slideshow.render(
            &snapshot.items,
            &mut self.frame.slideshow,
            &mut self.scheduler,
            self.locale.no_images_message(),
        );
        theme::apply(&snapshot.settings, &mut self.frame.theme);

        self.frame.schedule.title = self.locale.schedule_title(today(now));
        self.schedule.render(
            &snapshot.schedule,
            &mut self.frame.schedule,
            &mut self.scheduler,
            self.locale.no_classes_message(),
        );

        self.snapshot = snapshot;
        self.stats.polls += 1;
        self.stats.last_poll_ok = Some(true);
        self.stats.last_error = None;
    }

    /// A failed poll leaves the snapshot and the frame as they were.
    pub fn record_failure(&mut self, err: &DisplayError) {
        self.stats.polls += 1;
        self.stats.failures += 1;
        self.stats.last_poll_ok = Some(false);
        self.stats.last_error = Some(err.to_string());
    }

    /// Fires the earliest timer due at or before `until`.
    pub fn step(&mut self, until: u64, now: DateTime<Local>) -> Step {
        let Some((_, event)) = self.scheduler.pop_due(until) else {
            return Step::Idle;
        };
        match event {
            TimerEvent::Poll => return Step::PollDue,
            TimerEvent::ClockTick => self.frame.clock.text = self.locale.clock_text(now),
            TimerEvent::SlideAdvance => self.slideshow.advance(&mut self.frame.slideshow),
            TimerEvent::PageRotate => self
                .schedule
                .begin_rotation(&mut self.frame.schedule, &mut self.scheduler),
            TimerEvent::PageSwap => self
                .schedule
                .swap_page(&mut self.frame.schedule, &mut self.scheduler),
            TimerEvent::PageSettle => self.schedule.settle(&mut self.frame.schedule),
        }
        Step::Fired(event)
    }

    pub fn advance_to(&mut self, ms: u64) {
        self.scheduler.advance_to(ms);
    }

    /// After the loop fell behind real time, fire each interval once.
    pub fn skip_missed(&mut self, now_ms: u64) {
        self.scheduler.skip_missed(now_ms);
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    pub fn frame(&self) -> &DisplayFrame {
        &self.frame
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn slideshow(&self) -> &SlideshowRenderer {
        &self.slideshow
    }

    pub fn paginator(&self) -> &SchedulePaginator {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::video::AutoplayPlayer;
    use crate::models::content::{Category, ContentItem};
    use crate::models::settings::DisplaySettings;
    use chrono::TimeZone;

    fn engine() -> DisplayEngine {
        DisplayEngine::new(&Config::default(), Box::new(AutoplayPlayer))
    }

    fn monday() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
    }

    fn item(id: i64, category: Category, content: Option<&str>, image: Option<&str>) -> ContentItem {
        ContentItem {
            id,
            title: format!("Item {id}"),
            content: content.map(str::to_string),
            category,
            image_url: image.map(str::to_string),
            start_date: None,
            end_date: None,
            created_at: None,
        }
    }

    fn drain(engine: &mut DisplayEngine, until: u64) -> Vec<Step> {
        let mut steps = Vec::new();
        loop {
            match engine.step(until, monday()) {
                Step::Idle => break,
                step => steps.push(step),
            }
        }
        engine.advance_to(until);
        steps
    }

    #[test]
    fn snapshot_fills_every_section() {
        let mut engine = engine();
        engine.start(monday());
        engine.apply_snapshot(
            Snapshot {
                items: vec![
                    item(1, Category::Video, Some("/v1.mp4"), None),
                    item(2, Category::Announcement, None, None),
                    item(3, Category::Slideshow, None, Some("/a.jpg")),
                ],
                schedule: vec![],
                settings: DisplaySettings {
                    color_bg_page: Some("#101010".into()),
                    ..DisplaySettings::default()
                },
            },
            monday(),
        );

        let frame = engine.frame();
        assert_eq!(frame.video.src.as_deref(), Some("/v1.mp4"));
        assert_eq!(frame.ticker.text, "Item 2   |   Item 2");
        assert_eq!(frame.slideshow.images, vec!["/a.jpg".to_string()]);
        assert_eq!(frame.theme.page_background.as_deref(), Some("#101010"));
        assert_eq!(frame.schedule.title, "Jadwal Perkuliahan - Senin");
        assert_eq!(frame.schedule.message.as_deref(), Some("Tidak ada jadwal kuliah hari ini."));
        assert_eq!(engine.stats().last_poll_ok, Some(true));
    }

    #[test]
    fn poll_timer_surfaces_every_interval() {
        let mut engine = engine();
        engine.start(monday());
        let steps = drain(&mut engine, 120_000);
        let polls = steps.iter().filter(|s| **s == Step::PollDue).count();
        assert_eq!(polls, 2);
        assert_eq!(engine.now_ms(), 120_000);
    }

    #[test]
    fn slides_rotate_on_their_own_timer() {
        let mut engine = engine();
        engine.start(monday());
        engine.apply_snapshot(
            Snapshot {
                items: vec![
                    item(1, Category::Slideshow, None, Some("/a.jpg")),
                    item(2, Category::Slideshow, None, Some("/b.jpg")),
                ],
                ..Snapshot::default()
            },
            monday(),
        );
        drain(&mut engine, 5_000);
        assert_eq!(engine.frame().slideshow.active, Some(1));
        drain(&mut engine, 10_000);
        assert_eq!(engine.frame().slideshow.active, Some(0));
    }

    #[test]
    fn failure_keeps_the_frame() {
        let mut engine = engine();
        engine.apply_snapshot(
            Snapshot {
                items: vec![item(1, Category::News, None, None)],
                ..Snapshot::default()
            },
            monday(),
        );
        let before = engine.frame().clone();
        engine.record_failure(&DisplayError::network("/api/items", "connection refused"));
        assert_eq!(engine.frame(), &before);
        assert_eq!(engine.snapshot().items.len(), 1);
        assert_eq!(engine.stats().failures, 1);
        assert_eq!(engine.stats().last_poll_ok, Some(false));
    }

    #[test]
    fn restart_does_not_duplicate_poll_timer() {
        let mut engine = engine();
        engine.start(monday());
        engine.start(monday());
        assert_eq!(engine.scheduler().count_for(TimerEvent::Poll), 1);
        assert_eq!(engine.scheduler().count_for(TimerEvent::ClockTick), 1);
    }
}
