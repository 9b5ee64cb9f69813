//! Data models for email summary records.
//!
//! This module contains the structures used to represent the AI-processed
//! email records returned by the backend:
//!
//! - `EmailSummary`: one processed email with its summary and suggested reply
//! - `SummaryId`: record identifier (the API returns numbers or strings)

pub mod email;

pub use email::{EmailSummary, SummaryId};
