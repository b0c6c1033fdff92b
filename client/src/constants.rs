//! Central Configuration Constants
//!
//! Defaults for the client and the smoke test. Every value can be
//! overridden from the environment or a `.env` file.

/// Default prediction API URL
///
/// For a remote deployment set `DIABETES_API_URL`, e.g.
/// `DIABETES_API_URL=http://10.0.0.12:8000`.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Diabetes Prediction App";

/// Default log filter; the TUI owns the terminal, so keep it quiet
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Get API URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("DIABETES_API_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Initialize env_logger with [`DEFAULT_LOG_FILTER`] unless `RUST_LOG` is set
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
}
