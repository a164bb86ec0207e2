mod context;
mod internal_error;

#[cfg(feature = "axum")]
mod response;

pub use context::Context;
pub use internal_error::InternalError;

#[cfg(feature = "axum")]
pub use response::{ErrorResponse, error_response};
