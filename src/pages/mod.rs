//! Page controllers: one form engine plus one request lifecycle each.
//!
//! Pages carry no rendering; they expose the state a view would draw and the
//! actions a view would trigger.

mod auth;
mod inputs;
mod update_place;

use thiserror::Error;

use crate::http::RequestError;

pub use auth::{AuthMode, AuthPage};
pub use inputs::FieldSpec;
pub use update_place::{PageStatus, Place, UpdatePlacePage};

#[derive(Debug, Error)]
pub enum PageError {
    /// Submit was triggered while the form is invalid.
    #[error("Form is not valid")]
    InvalidForm,

    /// The field is not part of the form in its current shape.
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' has no value")]
    MissingField(String),

    #[error("Nothing has been loaded yet")]
    NotLoaded,

    #[error(transparent)]
    Request(#[from] RequestError),
}
