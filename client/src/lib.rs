//! Diabetes prediction client
//!
//! Terminal form that posts patient data to the prediction API, plus the
//! pieces shared with the `smoke` binary.

pub mod api;
pub mod app;
pub mod constants;
pub mod ui;
