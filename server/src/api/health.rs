use axum::{extract::State, http::StatusCode};
use axum_macros::debug_handler;

use crate::AppState;

pub const PATH: &str = "/health";

/// Healthy only while the username store answers.
#[debug_handler]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(State(AppState { data_access, .. }): State<AppState>) -> StatusCode {
    match data_access
        .read(|pool| sqlx::query("SELECT 1").execute(pool))
        .await
    {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            tracing::warn!("database unreachable :: {:?}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
