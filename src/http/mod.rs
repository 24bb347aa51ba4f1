//! Request lifecycle bookkeeping for calls to the remote API.
//!
//! A [`RequestLifecycle`] belongs to one scope (a page). It tracks
//! `is_loading` and `error_message` for the calls issued through it, and
//! stops touching that state as soon as the scope is torn down.

mod cancel;
mod error;
mod lifecycle;
mod request;

pub use cancel::{CallId, CancelHandle, Scope};
pub use error::{ErrorKind, RequestError, FALLBACK_MESSAGE};
pub use lifecycle::{InFlight, RequestLifecycle, RequestState};
pub use request::{HttpRequest, MultipartBody, MultipartField, RequestBody};
pub use reqwest::Method;
