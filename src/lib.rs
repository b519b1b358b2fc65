// Library exports for the agent binary and tests
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use axum::{routing::get, Router};
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use services::poller::DisplayStatus;

/// State shared by the agent's HTTP handlers. The poller task owns the
/// engine and publishes a fresh status after every timer it fires.
#[derive(Clone)]
pub struct AppState {
    pub display: watch::Receiver<DisplayStatus>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/display", get(routes::display::get_display))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .layer(TraceLayer::new_for_http())
        // The kiosk page may be served from the content backend's origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::engine::PollStats;
    use serde_json::Value;

    async fn serve(status: DisplayStatus) -> (String, watch::Sender<DisplayStatus>) {
        let (tx, rx) = watch::channel(status);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(AppState { display: rx });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), tx)
    }

    #[tokio::test]
    async fn display_route_serves_the_published_frame() {
        let mut status = DisplayStatus::default();
        status.frame.ticker.text = "A   |   A".into();
        let (base, _tx) = serve(status).await;

        let body: Value = reqwest::get(format!("{base}/display"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["ticker"]["text"], "A   |   A");
        assert_eq!(body["schedule"]["fade"], "none");
    }

    #[tokio::test]
    async fn health_reports_degraded_after_failed_poll() {
        let (base, tx) = serve(DisplayStatus::default()).await;
        let res = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(res.status(), 200);

        tx.send_replace(DisplayStatus {
            stats: PollStats {
                polls: 3,
                failures: 1,
                last_poll_ok: Some(false),
                last_error: Some("network failure".into()),
            },
            ..DisplayStatus::default()
        });
        let res = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(res.status(), 503);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["status"], "degraded");
    }
}
