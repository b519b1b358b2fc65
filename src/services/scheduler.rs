use std::collections::BTreeMap;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    Poll,
    ClockTick,
    SlideAdvance,
    /// Start of a schedule page rotation (fade out).
    PageRotate,
    /// Fade-out finished: swap the rendered rows.
    PageSwap,
    /// Fade-in finished: clear the transition state.
    PageSettle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    event: TimerEvent,
    due_ms: u64,
    period_ms: Option<u64>,
}

/// Virtual-time timer table. Time only moves through [`Scheduler::pop_due`]
/// and [`Scheduler::advance_to`], so rotation logic runs the same under a
/// tokio loop and under tests that step the clock by hand.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fires every `period_ms`, first time one period from now.
    pub fn set_interval(&mut self, event: TimerEvent, period_ms: u64) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(event, self.now_ms + period_ms, Some(period_ms))
    }

    pub fn set_timeout(&mut self, event: TimerEvent, delay_ms: u64) -> TimerId {
        self.insert(event, self.now_ms + delay_ms, None)
    }

    /// Returns false when the timer already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel through an owned handle slot, leaving it empty.
    pub fn clear(&mut self, handle: &mut Option<TimerId>) {
        if let Some(id) = handle.take() {
            self.cancel(id);
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn count_for(&self, event: TimerEvent) -> usize {
        self.timers.values().filter(|t| t.event == event).count()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.values().map(|t| t.due_ms).min()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Ties fire in creation order. Intervals are re-armed.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, TimerEvent)> {
        let (id, due_ms) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= until)
            .min_by_key(|(id, t)| (t.due_ms, **id))
            .map(|(id, t)| (*id, t.due_ms))?;

        self.now_ms = self.now_ms.max(due_ms);
        let timer = self.timers.get_mut(&id)?;
        let event = timer.event;
        match timer.period_ms {
            Some(period) => timer.due_ms = due_ms + period,
            None => {
                self.timers.remove(&id);
            }
        }
        Some((id, event))
    }

    /// Collapse interval periods missed before `now` so each interval fires
    /// once for the stall instead of once per missed period.
    pub fn skip_missed(&mut self, now: u64) {
        for timer in self.timers.values_mut() {
            if let Some(period) = timer.period_ms {
                if timer.due_ms + period <= now {
                    timer.due_ms += (now - timer.due_ms) / period * period;
                }
            }
        }
    }

    /// Move the clock forward without firing anything. Callers drain
    /// [`Scheduler::pop_due`] first.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    fn insert(&mut self, event: TimerEvent, due_ms: u64, period_ms: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            Timer {
                event,
                due_ms,
                period_ms,
            },
        );
        id
    }
}
