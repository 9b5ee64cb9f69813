//! REST API client module for the summarization backend.
//!
//! This module provides the `ApiClient` used to fetch processed email
//! summaries. Requests authenticate with the bearer token captured during
//! the sign-in redirect.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
