use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use error::error_response;
use serde::Deserialize;
use validation::{ValidateError, ValidationErrors, validate, validate_json};

use crate::AppState;

pub const PATH: &str = "/check/username-availability";

#[derive(Deserialize)]
pub struct CheckUsernameAvailabilityParams {
    pub username: String,
}

/// Control value exactly as the form sent it. Only strings are checked.
#[derive(Deserialize)]
pub struct CheckUsernameAvailabilityBody {
    #[serde(default)]
    pub username: serde_json::Value,
}

type Availability = (StatusCode, Json<Option<ValidationErrors>>);

#[tracing::instrument(fields(%username), skip_all, ret)]
pub async fn handler(
    State(AppState { data_access, .. }): State<AppState>,
    Query(CheckUsernameAvailabilityParams { username }): Query<CheckUsernameAvailabilityParams>,
) -> Result<Availability, CheckUsernameAvailabilityError> {
    let errors = validate(&username, &data_access).await?;
    Ok(availability(errors))
}

#[tracing::instrument(fields(%username), skip_all, ret)]
pub async fn json_handler(
    State(AppState { data_access, .. }): State<AppState>,
    Json(CheckUsernameAvailabilityBody { username }): Json<CheckUsernameAvailabilityBody>,
) -> Result<Availability, CheckUsernameAvailabilityError> {
    let errors = validate_json(&username, &data_access).await?;
    Ok(availability(errors))
}

fn availability(errors: Option<ValidationErrors>) -> Availability {
    match errors {
        Some(errors) => (StatusCode::CONFLICT, Json(Some(errors))),
        None => (StatusCode::OK, Json(None)),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CheckUsernameAvailabilityError {
    #[error("invalid username :: expected a string, got {0}")]
    InvalidParams(&'static str),

    #[error("{0}")]
    DataAccess(#[source] data_access::Error),
}

impl From<ValidateError<data_access::Error>> for CheckUsernameAvailabilityError {
    fn from(err: ValidateError<data_access::Error>) -> Self {
        match err {
            ValidateError::InvalidInput(kind) => CheckUsernameAvailabilityError::InvalidParams(kind),
            ValidateError::DataSource(err) => CheckUsernameAvailabilityError::DataAccess(err),
        }
    }
}

impl IntoResponse for CheckUsernameAvailabilityError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CheckUsernameAvailabilityError::InvalidParams(_) => {
                error_response(StatusCode::BAD_REQUEST, self)
            }
            CheckUsernameAvailabilityError::DataAccess(err) => {
                tracing::error!("check username availability :: {:?}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
