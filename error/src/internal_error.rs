/// Anything the client should never see the details of, such as a failing username source.
#[derive(thiserror::Error, Debug)]
#[error("{0:?}")]
pub struct InternalError(#[from] pub anyhow::Error);

impl InternalError {
    /// The outermost context, e.g. `"list usernames"`.
    pub fn context(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for InternalError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(context = %self.0, "{:?}", self.0);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
