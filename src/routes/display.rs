use axum::{extract::State, Json};

use crate::{display::frame::DisplayFrame, AppState};

/// GET /display — the frame the kiosk page should render right now.
pub async fn get_display(State(state): State<AppState>) -> Json<DisplayFrame> {
    Json(state.display.borrow().frame.clone())
}
