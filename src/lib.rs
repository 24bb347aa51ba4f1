//! Client runtime for the places API.
//!
//! Two primitives carry the weight: [`form`] keeps validated multi-field
//! form state, and [`http`] keeps loading/error bookkeeping for requests
//! issued on behalf of a page. [`pages`] combines them into the login/signup
//! and place-editing flows.

pub mod config;
pub mod form;
pub mod http;
pub mod logging;
pub mod mvi;
pub mod pages;
pub mod session;
pub mod upload;
