//! Authentication module for the bearer credential lifecycle.
//!
//! This module provides:
//! - `CredentialStore`: persistence of the single bearer token plus
//!   extraction of a token from the sign-in redirect link
//! - `Session`: capture-or-load initialization and derived
//!   authenticated/unauthenticated state
//!
//! The credential is opaque to this client: no expiry or refresh is modeled.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::Session;
