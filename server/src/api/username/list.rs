use axum::{Json, extract::State};
use error::{Context, InternalError};

use crate::AppState;

pub const PATH: &str = "/auth/usernames";

/// Every registered username, as a JSON array of strings.
#[tracing::instrument(skip_all, err)]
pub async fn handler(
    State(AppState { data_access, .. }): State<AppState>,
) -> Result<Json<Vec<String>>, InternalError> {
    let usernames = data_access
        .all_usernames()
        .await
        .context("list usernames")?;

    Ok(Json(usernames))
}
