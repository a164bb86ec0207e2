mod field;
mod form;
mod source;
mod uniqueness;

pub use field::{FieldState, FieldStatus, UsernameField};
pub use form::{ValidateError, ValidationErrors, validate, validate_json};
pub use source::UsernameSource;
pub use uniqueness::{Conflict, check, find_conflict};
