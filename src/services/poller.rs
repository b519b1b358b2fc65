use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::display::engine::{DisplayEngine, PollStats, Step};
use crate::display::frame::DisplayFrame;
use crate::display::locale::today;
use crate::error::DisplayError;
use crate::models::{schedule::DayOfWeek, snapshot::Snapshot};
use crate::services::api::ContentSource;
use crate::services::clock::WallClock;
use crate::services::metrics::{POLLS_COUNTER, POLL_ERRORS_COUNTER};

/// What the agent publishes to its HTTP surface after every step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayStatus {
    pub frame: DisplayFrame,
    pub stats: PollStats,
}

/// Result of one fetch, tagged with the poll that started it.
struct PollOutcome {
    seq: u64,
    started_at: DateTime<Local>,
    result: Result<Snapshot, DisplayError>,
}

/// Fetch items, settings and today's schedule. All three must succeed.
async fn fetch_snapshot(source: Arc<dyn ContentSource>, day: DayOfWeek) -> Result<Snapshot, DisplayError> {
    let items = source.items().await?;
    let settings = source.settings().await?;
    let schedule = source.schedule(day).await?;
    Ok(Snapshot {
        items,
        schedule,
        settings,
    })
}

/// Drives a [`DisplayEngine`]: fetches snapshots when the poll timer fires
/// and dispatches every other timer to the renderers.
pub struct Poller {
    engine: DisplayEngine,
    source: Arc<dyn ContentSource>,
    clock: Arc<dyn WallClock>,
}

impl Poller {
    pub fn new(engine: DisplayEngine, source: Arc<dyn ContentSource>, clock: Arc<dyn WallClock>) -> Self {
        Self {
            engine,
            source,
            clock,
        }
    }

    pub fn engine(&self) -> &DisplayEngine {
        &self.engine
    }

    pub fn status(&self) -> DisplayStatus {
        DisplayStatus {
            frame: self.engine.frame().clone(),
            stats: self.engine.stats().clone(),
        }
    }

    /// Apply a finished fetch, or log it and keep the last snapshot.
    fn apply(&mut self, day: DayOfWeek, now: DateTime<Local>, result: Result<Snapshot, DisplayError>) -> bool {
        match result {
            Ok(snapshot) => {
                info!(
                    "Poll ok: {} items, {} schedule entries for {}",
                    snapshot.items.len(),
                    snapshot.schedule.len(),
                    day.english_name()
                );
                self.engine.apply_snapshot(snapshot, now);
                POLLS_COUNTER.with_label_values(&["ok"]).inc();
                true
            }
            Err(e) => {
                warn!("Error fetching data, keeping last snapshot: {}", e);
                self.engine.record_failure(&e);
                POLLS_COUNTER.with_label_values(&["error"]).inc();
                POLL_ERRORS_COUNTER.with_label_values(&[e.kind()]).inc();
                false
            }
        }
    }

    /// One poll cycle, awaited in place. The day is read from the wall clock
    /// each time so a page left open past midnight picks up the new day.
    pub async fn poll_once(&mut self) -> bool {
        let now = self.clock.now();
        let day = today(now);
        let result = fetch_snapshot(self.source.clone(), day).await;
        self.apply(day, now, result)
    }

    /// Arm the timers and poll immediately.
    pub async fn start(&mut self) {
        self.engine.start(self.clock.now());
        self.poll_once().await;
    }

    /// Run every timer due up to `until_ms` of virtual time. Polls are
    /// awaited inline, which keeps stepped tests deterministic.
    pub async fn advance_to(&mut self, until_ms: u64) {
        loop {
            match self.engine.step(until_ms, self.clock.now()) {
                Step::Idle => break,
                Step::PollDue => {
                    self.poll_once().await;
                }
                Step::Fired(_) => {}
            }
        }
        self.engine.advance_to(until_ms);
    }

    pub async fn advance(&mut self, ms: u64) {
        let until = self.engine.now_ms() + ms;
        self.advance_to(until).await;
    }

    /// Start a fetch on its own task. A fetch still running from the previous
    /// poll is aborted: the new request is the retry.
    fn spawn_poll(
        &self,
        seq: u64,
        in_flight: &mut Option<JoinHandle<()>>,
        outcomes: &mpsc::Sender<PollOutcome>,
    ) {
        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                warn!("Previous poll still in flight, abandoning it");
                previous.abort();
            }
        }
        let started_at = self.clock.now();
        let source = self.source.clone();
        let outcomes = outcomes.clone();
        *in_flight = Some(tokio::spawn(async move {
            let result = fetch_snapshot(source, today(started_at)).await;
            let _ = outcomes
                .send(PollOutcome {
                    seq,
                    started_at,
                    result,
                })
                .await;
        }));
    }

    /// Real-time loop. Timers keep firing while a fetch is in flight; the
    /// snapshot is applied whenever its fetch completes.
    pub async fn run(mut self, status: watch::Sender<DisplayStatus>) {
        let epoch = Instant::now();
        let elapsed_ms = || epoch.elapsed().as_millis() as u64;
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<PollOutcome>(8);
        let mut in_flight: Option<JoinHandle<()>> = None;
        let mut issued: u64 = 0;
        let mut applied: u64 = 0;

        self.engine.start(self.clock.now());
        issued += 1;
        self.spawn_poll(issued, &mut in_flight, &outcome_tx);
        status.send_replace(self.status());

        while let Some(next) = self.engine.next_due_ms() {
            tokio::select! {
                _ = tokio::time::sleep_until(epoch + Duration::from_millis(next)) => {
                    let until = elapsed_ms().max(next);
                    self.engine.skip_missed(until);
                    loop {
                        match self.engine.step(until, self.clock.now()) {
                            Step::Idle => break,
                            Step::PollDue => {
                                issued += 1;
                                self.spawn_poll(issued, &mut in_flight, &outcome_tx);
                            }
                            Step::Fired(_) => {}
                        }
                    }
                    self.engine.advance_to(until);
                }
                Some(outcome) = outcome_rx.recv() => {
                    if outcome.seq <= applied {
                        debug!("Dropping stale poll result #{}", outcome.seq);
                        continue;
                    }
                    applied = outcome.seq;
                    // Timers created by the renderers count from now.
                    self.engine.advance_to(elapsed_ms().min(next));
                    let day = today(outcome.started_at);
                    self.apply(day, outcome.started_at, outcome.result);
                }
            }
            status.send_replace(self.status());
        }
        if let Some(task) = in_flight {
            task.abort();
        }
        info!("No timers left, display loop stopped");
    }
}
