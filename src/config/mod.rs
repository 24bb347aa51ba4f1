//! Configuration for the API client.
//!
//! The only externally configured input is the base URL of the remote API;
//! pages join it with resource paths to build request URLs.

mod loader;
mod types;

pub use loader::{ConfigError, BACKEND_URL_ENV};
pub use types::{ApiConfig, Config};
