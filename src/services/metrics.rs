use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Gauge};

lazy_static! {
    pub static ref POLLS_COUNTER: CounterVec = register_counter_vec!(
        "display_polls_total",
        "Content polls by outcome",
        &["status"]
    ).unwrap();

    pub static ref POLL_ERRORS_COUNTER: CounterVec = register_counter_vec!(
        "display_poll_errors_total",
        "Failed polls by error kind",
        &["kind"]
    ).unwrap();

    pub static ref VIDEO_LOADS_COUNTER: Counter = register_counter!(
        "display_video_loads_total",
        "Video element (re)loads"
    ).unwrap();

    pub static ref PLAYBACK_BLOCKED_COUNTER: Counter = register_counter!(
        "display_playback_blocked_total",
        "Playback attempts rejected by autoplay policy"
    ).unwrap();

    pub static ref SLIDESHOW_REBUILDS_COUNTER: Counter = register_counter!(
        "display_slideshow_rebuilds_total",
        "Slideshow container rebuilds"
    ).unwrap();

    pub static ref SCHEDULE_PAGES_GAUGE: Gauge = register_gauge!(
        "display_schedule_pages",
        "Pages in today's schedule rotation"
    ).unwrap();
}
