use std::fmt::Display;

use crate::InternalError;

/// Attaches what the server was doing to a failure the client will only see as a 500.
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T, InternalError>
    where
        C: Display + Send + Sync + 'static;

    /// Like [`Context::context`], but only builds the message on failure.
    fn with_context<C, F>(self, context: F) -> Result<T, InternalError>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, InternalError>
    where
        C: Display + Send + Sync + 'static,
    {
        self.with_context(|| context)
    }

    fn with_context<C, F>(self, context: F) -> Result<T, InternalError>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| InternalError(anyhow::Error::new(e).context(context())))
    }
}
