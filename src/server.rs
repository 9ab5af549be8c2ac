use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use chrono_tz::Tz;

use crate::cache::FreshnessCache;
use crate::clock::minute_digit;
use crate::feed::BlazeFeed;
use crate::types::GradeResponse;

/// Shared request-path state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<FreshnessCache<BlazeFeed>>,
    pub tz: Tz,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/grade-dados", get(grade_data))
        .with_state(state)
}

/// The single read endpoint. Always 200; upstream failure shows up as empty
/// inner maps, never as an error status.
async fn grade_data(State(state): State<AppState>) -> Json<GradeResponse> {
    let data = state.cache.get().await;
    let now = Utc::now().with_timezone(&state.tz);
    Json(GradeResponse {
        timestamp_br: now.format("%H:%M:%S").to_string(),
        digito_minuto_atual: minute_digit(&now),
        data,
    })
}
