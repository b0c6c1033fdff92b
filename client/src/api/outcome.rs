//! What the operator sees after pressing Predict

use super::ClientError;

pub const HIGH_RISK_MESSAGE: &str = "🚨 High risk of diabetes detected.";
pub const LOW_RISK_MESSAGE: &str = "✅ Low risk of diabetes detected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    HighRisk,
    LowRisk,
    ApiError { status: u16, body: String },
    RequestFailed(String),
}

impl Outcome {
    /// Label 1 is high risk; any other label reads as low risk
    pub fn from_prediction(prediction: i64) -> Self {
        if prediction == 1 {
            Outcome::HighRisk
        } else {
            Outcome::LowRisk
        }
    }

    pub fn from_result(result: Result<i64, ClientError>) -> Self {
        match result {
            Ok(prediction) => Self::from_prediction(prediction),
            Err(ClientError::Api { status, body }) => Outcome::ApiError { status, body },
            Err(err) => Outcome::RequestFailed(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::ApiError { .. } | Outcome::RequestFailed(_))
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::HighRisk => HIGH_RISK_MESSAGE.to_string(),
            Outcome::LowRisk => LOW_RISK_MESSAGE.to_string(),
            Outcome::ApiError { status, body } => format!("API error: {} - {}", status, body),
            Outcome::RequestFailed(reason) => format!("Request failed: {}", reason),
        }
    }
}
