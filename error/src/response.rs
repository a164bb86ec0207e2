use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::{OffsetDateTime, format_description::well_known::Iso8601};

/// JSON body returned for every client error.
#[derive(serde::Serialize, Debug)]
pub struct ErrorResponse {
    error: String,
    help: &'static str,
    datetime: Option<String>,
}

impl ErrorResponse {
    const HELP: &'static str = "Please check the response headers for `x-request-id`, include the datetime and raise a support ticket.";

    pub fn new(err: &impl std::error::Error) -> Self {
        Self {
            error: err.to_string(),
            help: Self::HELP,
            datetime: OffsetDateTime::now_utc()
                .format(&Iso8601::DATE_TIME_OFFSET)
                .inspect_err(|e| {
                    tracing::warn!(
                        "unable to format OffsetDateTime::now_utc() as Iso8601 :: {:?}",
                        e
                    )
                })
                .ok(),
        }
    }
}

pub fn error_response(status: StatusCode, err: impl std::error::Error) -> Response {
    tracing::info!("{:?}", err);
    (status, Json(ErrorResponse::new(&err))).into_response()
}
