use tracing::{debug, info};

use super::frame::{FadeClass, PageIndicator, ScheduleRow, ScheduleView};
use crate::models::schedule::ScheduleEntry;
use crate::services::metrics::SCHEDULE_PAGES_GAUGE;
use crate::services::scheduler::{Scheduler, TimerEvent, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    Empty,
    SinglePage,
    Paginated { pages: usize },
}

/// Phase of one page rotation. The row swap happens on the
/// `FadingOut -> FadingIn` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    Showing,
    FadingOut,
    FadingIn,
}

#[derive(Debug, Clone, Copy)]
pub struct PaginatorTiming {
    pub page_size: usize,
    pub rotate_ms: u64,
    pub fade_ms: u64,
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

fn to_row(entry: &ScheduleEntry) -> ScheduleRow {
    ScheduleRow {
        time: entry.time_range(),
        course: entry.course_name.clone(),
        lecturer: entry.lecturer.clone().unwrap_or_default(),
        room: entry.room.clone().unwrap_or_default(),
    }
}

pub struct SchedulePaginator {
    timing: PaginatorTiming,
    entries: Vec<ScheduleEntry>,
    rendered: bool,
    state: PaginatorState,
    phase: RotationPhase,
    /// Page currently on screen.
    shown: usize,
    /// Page the next swap brings in.
    next: usize,
    rotate_timer: Option<TimerId>,
    swap_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
}

impl SchedulePaginator {
    pub fn new(timing: PaginatorTiming) -> Self {
        Self {
            timing,
            entries: Vec::new(),
            rendered: false,
            state: PaginatorState::Empty,
            phase: RotationPhase::Showing,
            shown: 0,
            next: 0,
            rotate_timer: None,
            swap_timer: None,
            settle_timer: None,
        }
    }

    pub fn state(&self) -> PaginatorState {
        self.state
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn shown_page(&self) -> usize {
        self.shown
    }

    pub fn rotate_timer(&self) -> Option<TimerId> {
        self.rotate_timer
    }

    /// Renders today's schedule. An identical schedule keeps the running
    /// rotation; anything else cancels every pending timer before the new
    /// state is chosen. Returns true when the table was re-rendered.
    pub fn render(
        &mut self,
        entries: &[ScheduleEntry],
        view: &mut ScheduleView,
        scheduler: &mut Scheduler,
        empty_message: &str,
    ) -> bool {
        if self.rendered && self.entries == entries {
            debug!("Schedule unchanged ({} entries), keeping rotation", entries.len());
            return false;
        }

        self.cancel_timers(scheduler);
        self.entries = entries.to_vec();
        self.rendered = true;
        self.phase = RotationPhase::Showing;
        self.shown = 0;
        view.fade = FadeClass::None;

        let size = self.timing.page_size.max(1);
        if entries.is_empty() {
            self.state = PaginatorState::Empty;
            self.next = 0;
            view.rows.clear();
            view.message = Some(empty_message.to_string());
            view.page = None;
            SCHEDULE_PAGES_GAUGE.set(0.0);
            return true;
        }

        view.message = None;
        let pages = page_count(entries.len(), size);
        SCHEDULE_PAGES_GAUGE.set(pages as f64);

        if pages == 1 {
            self.state = PaginatorState::SinglePage;
            self.next = 0;
            view.rows = entries.iter().map(to_row).collect();
            view.page = None;
            return true;
        }

        self.state = PaginatorState::Paginated { pages };
        self.show_page(0, view);
        self.next = 1 % pages;
        self.rotate_timer = Some(scheduler.set_interval(TimerEvent::PageRotate, self.timing.rotate_ms));
        info!("Schedule paginated: {} entries over {} pages", entries.len(), pages);
        true
    }

    /// Rotation tick: start fading the current page out.
    pub fn begin_rotation(&mut self, view: &mut ScheduleView, scheduler: &mut Scheduler) {
        if !matches!(self.state, PaginatorState::Paginated { .. }) {
            return;
        }
        scheduler.clear(&mut self.swap_timer);
        scheduler.clear(&mut self.settle_timer);
        self.phase = RotationPhase::FadingOut;
        view.fade = FadeClass::FadeExit;
        self.swap_timer = Some(scheduler.set_timeout(TimerEvent::PageSwap, self.timing.fade_ms));
    }

    /// Fade-out done: bring in the next page and start fading it in.
    pub fn swap_page(&mut self, view: &mut ScheduleView, scheduler: &mut Scheduler) {
        self.swap_timer = None;
        let PaginatorState::Paginated { pages } = self.state else {
            return;
        };
        if self.phase != RotationPhase::FadingOut {
            return;
        }
        self.show_page(self.next, view);
        self.next = (self.next + 1) % pages;
        self.phase = RotationPhase::FadingIn;
        view.fade = FadeClass::FadeEnter;
        self.settle_timer = Some(scheduler.set_timeout(TimerEvent::PageSettle, self.timing.fade_ms));
    }

    pub fn settle(&mut self, view: &mut ScheduleView) {
        self.settle_timer = None;
        if self.phase == RotationPhase::FadingIn {
            self.phase = RotationPhase::Showing;
            view.fade = FadeClass::None;
        }
    }

    fn show_page(&mut self, page: usize, view: &mut ScheduleView) {
        let size = self.timing.page_size.max(1);
        let start = (page * size).min(self.entries.len());
        let end = (start + size).min(self.entries.len());
        view.rows = self.entries[start..end].iter().map(to_row).collect();
        view.page = Some(PageIndicator {
            current: page + 1,
            total: page_count(self.entries.len(), size),
        });
        self.shown = page;
    }

    fn cancel_timers(&mut self, scheduler: &mut Scheduler) {
        scheduler.clear(&mut self.rotate_timer);
        scheduler.clear(&mut self.swap_timer);
        scheduler.clear(&mut self.settle_timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::DayOfWeek;
    use chrono::NaiveTime;

    const TIMING: PaginatorTiming = PaginatorTiming {
        page_size: 5,
        rotate_ms: 8_000,
        fade_ms: 500,
    };

    fn entries(n: usize) -> Vec<ScheduleEntry> {
        (0..n)
            .map(|i| ScheduleEntry {
                id: i as i64,
                course_name: format!("Course {i}"),
                lecturer: Some(format!("Lecturer {i}")),
                room: None,
                day_of_week: DayOfWeek::Monday,
                start_time: NaiveTime::from_hms_opt(7 + i as u32, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(7 + i as u32, 50, 0).unwrap(),
            })
            .collect()
    }

    fn courses(view: &ScheduleView) -> Vec<String> {
        view.rows.iter().map(|r| r.course.clone()).collect()
    }

    /// Fire everything due up to `until`, the way the engine dispatches.
    fn run_until(p: &mut SchedulePaginator, view: &mut ScheduleView, s: &mut Scheduler, until: u64) {
        while let Some((_, event)) = s.pop_due(until) {
            match event {
                TimerEvent::PageRotate => p.begin_rotation(view, s),
                TimerEvent::PageSwap => p.swap_page(view, s),
                TimerEvent::PageSettle => p.settle(view),
                _ => {}
            }
        }
        s.advance_to(until);
    }

    #[test]
    fn state_follows_entry_count() {
        for n in 0..=16 {
            let mut scheduler = Scheduler::new();
            let mut paginator = SchedulePaginator::new(TIMING);
            let mut view = ScheduleView::default();
            paginator.render(&entries(n), &mut view, &mut scheduler, "none");

            let rotations = scheduler.count_for(TimerEvent::PageRotate);
            match n {
                0 => {
                    assert_eq!(paginator.state(), PaginatorState::Empty);
                    assert_eq!(rotations, 0);
                }
                1..=5 => {
                    assert_eq!(paginator.state(), PaginatorState::SinglePage);
                    assert_eq!(rotations, 0);
                    assert_eq!(view.rows.len(), n);
                }
                _ => {
                    assert_eq!(
                        paginator.state(),
                        PaginatorState::Paginated { pages: n.div_ceil(5) }
                    );
                    assert_eq!(rotations, 1);
                }
            }
        }
    }

    #[test]
    fn seven_entries_rotate_and_wrap() {
        let mut scheduler = Scheduler::new();
        let mut paginator = SchedulePaginator::new(TIMING);
        let mut view = ScheduleView::default();
        let list = entries(7);
        paginator.render(&list, &mut view, &mut scheduler, "none");

        // First page is on screen right away.
        assert_eq!(courses(&view), ["Course 0", "Course 1", "Course 2", "Course 3", "Course 4"]);
        assert_eq!(view.fade, FadeClass::None);

        run_until(&mut paginator, &mut view, &mut scheduler, 8_000);
        assert_eq!(paginator.phase(), RotationPhase::FadingOut);
        assert_eq!(view.fade, FadeClass::FadeExit);
        assert_eq!(view.rows.len(), 5);

        run_until(&mut paginator, &mut view, &mut scheduler, 8_500);
        assert_eq!(courses(&view), ["Course 5", "Course 6"]);
        assert_eq!(view.fade, FadeClass::FadeEnter);
        assert_eq!(view.page, Some(PageIndicator { current: 2, total: 2 }));

        run_until(&mut paginator, &mut view, &mut scheduler, 9_000);
        assert_eq!(paginator.phase(), RotationPhase::Showing);
        assert_eq!(view.fade, FadeClass::None);

        run_until(&mut paginator, &mut view, &mut scheduler, 16_500);
        assert_eq!(paginator.shown_page(), 0);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn identical_schedule_keeps_rotation_timer() {
        let mut scheduler = Scheduler::new();
        let mut paginator = SchedulePaginator::new(TIMING);
        let mut view = ScheduleView::default();
        let list = entries(12);
        paginator.render(&list, &mut view, &mut scheduler, "none");
        let timer = paginator.rotate_timer();
        run_until(&mut paginator, &mut view, &mut scheduler, 9_000);

        assert!(!paginator.render(&list, &mut view, &mut scheduler, "none"));
        assert_eq!(paginator.rotate_timer(), timer);
        assert_eq!(paginator.shown_page(), 1);
    }

    #[test]
    fn new_schedule_cancels_pending_transition() {
        let mut scheduler = Scheduler::new();
        let mut paginator = SchedulePaginator::new(TIMING);
        let mut view = ScheduleView::default();
        paginator.render(&entries(7), &mut view, &mut scheduler, "none");
        run_until(&mut paginator, &mut view, &mut scheduler, 8_000);
        assert_eq!(scheduler.count_for(TimerEvent::PageSwap), 1);

        paginator.render(&entries(11), &mut view, &mut scheduler, "none");
        assert_eq!(scheduler.count_for(TimerEvent::PageSwap), 0);
        assert_eq!(scheduler.count_for(TimerEvent::PageRotate), 1);
        assert_eq!(view.fade, FadeClass::None);
        assert_eq!(paginator.state(), PaginatorState::Paginated { pages: 3 });
    }

    #[test]
    fn dropping_to_single_page_stops_rotation() {
        let mut scheduler = Scheduler::new();
        let mut paginator = SchedulePaginator::new(TIMING);
        let mut view = ScheduleView::default();
        paginator.render(&entries(9), &mut view, &mut scheduler, "none");
        paginator.render(&entries(3), &mut view, &mut scheduler, "none");
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(view.page, None);
    }

    #[test]
    fn empty_schedule_shows_message() {
        let mut scheduler = Scheduler::new();
        let mut paginator = SchedulePaginator::new(TIMING);
        let mut view = ScheduleView::default();
        paginator.render(&entries(2), &mut view, &mut scheduler, "none");
        paginator.render(&[], &mut view, &mut scheduler, "Tidak ada jadwal kuliah hari ini.");
        assert!(view.rows.is_empty());
        assert_eq!(view.message.as_deref(), Some("Tidak ada jadwal kuliah hari ini."));
    }

    #[test]
    fn rows_format_times_and_blank_missing_cells() {
        let mut scheduler = Scheduler::new();
        let mut paginator = SchedulePaginator::new(TIMING);
        let mut view = ScheduleView::default();
        paginator.render(&entries(1), &mut view, &mut scheduler, "none");
        assert_eq!(view.rows[0].time, "07:00 - 07:50");
        assert_eq!(view.rows[0].room, "");
        assert_eq!(view.rows[0].lecturer, "Lecturer 0");
    }
}
