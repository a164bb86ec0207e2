use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Conflict, UsernameSource, check};

/// Error mapping in the shape form frameworks expect, e.g. `{"usernameExists": true}`.
///
/// "No errors" is `None` rather than an empty mapping, so
/// `Option<ValidationErrors>` serializes to either `null` or the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, bool>);

impl ValidationErrors {
    pub fn contains(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Conflict> for ValidationErrors {
    fn from(conflict: Conflict) -> Self {
        Self(BTreeMap::from([(conflict.key().to_string(), true)]))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidateError<E> {
    #[error("invalid input :: expected a string, got {0}")]
    InvalidInput(&'static str),

    #[error("{0}")]
    DataSource(#[source] E),
}

pub async fn validate<S>(
    candidate: &str,
    source: &S,
) -> Result<Option<ValidationErrors>, ValidateError<S::Error>>
where
    S: UsernameSource + ?Sized,
{
    let conflict = check(candidate, source)
        .await
        .map_err(ValidateError::DataSource)?;

    Ok(conflict.map(ValidationErrors::from))
}

/// Validates a raw control value as a form framework hands it over.
///
/// Only JSON strings are usernames. Anything else is rejected before the data
/// source is touched.
pub async fn validate_json<S>(
    value: &Value,
    source: &S,
) -> Result<Option<ValidationErrors>, ValidateError<S::Error>>
where
    S: UsernameSource + ?Sized,
{
    let Some(candidate) = value.as_str() else {
        return Err(ValidateError::InvalidInput(kind(value)));
    };

    validate(candidate, source).await
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
