//! Terminal UI: a stateless projection of the application state.

pub mod input;
pub mod render;
pub mod styles;
