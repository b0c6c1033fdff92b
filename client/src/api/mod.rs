//! Prediction API access
//!
//! Blocking HTTP client for the inference server plus the mapping from
//! call results to the messages the UI shows.

pub mod client;
pub mod outcome;

pub use client::{ApiClient, ClientError, PredictionPayload, PredictionResponse, RawResponse};
pub use outcome::Outcome;
