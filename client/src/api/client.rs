//! Prediction API Client
//!
//! Synchronous HTTP client for the prediction server. Calls block until
//! the server answers; there is no timeout and no retry.

use serde::{Deserialize, Serialize};

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionPayload {
    pub age: f64,
    pub sex: i64,
    pub bmi: f64,
    pub bp: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
    pub s5: f64,
    pub s6: f64,
}

impl PredictionPayload {
    /// Fixed payload used by the smoke test
    pub fn sample() -> Self {
        Self {
            age: 50.0,
            sex: 1,
            bmi: 30.0,
            bp: 80.0,
            s1: 150.0,
            s2: 100.0,
            s3: 50.0,
            s4: 4.5,
            s5: 5.5,
            s6: 110.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PredictionResponse {
    pub prediction: i64,
}

/// Status and body exactly as the server sent them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Server answered with something other than 200
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// No usable HTTP exchange (refused, DNS, reset, ...)
    #[error("{0}")]
    Transport(String),

    /// 200 with a body that is not a prediction
    #[error("invalid response: {0}")]
    Parse(String),
}

/// API client
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Create new client for `base_url` (scheme, host and port)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// POST the payload and return whatever came back.
    ///
    /// Non-2xx responses are returned as `Ok`; only transport failures are
    /// errors here.
    pub fn post_predict(&self, payload: &PredictionPayload) -> Result<RawResponse, ClientError> {
        let url = self.predict_url();
        log::debug!("POST {}", url);

        let response = match self.agent.post(&url).send_json(payload) {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                log::warn!("Request to {} failed: {}", url, e);
                return Err(ClientError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        log::debug!("Response {}: {}", status, body);
        Ok(RawResponse { status, body })
    }

    /// Request a prediction label
    pub fn predict(&self, payload: &PredictionPayload) -> Result<i64, ClientError> {
        let raw = self.post_predict(payload)?;

        if raw.status != 200 {
            return Err(ClientError::Api {
                status: raw.status,
                body: raw.body,
            });
        }

        serde_json::from_str::<PredictionResponse>(&raw.body)
            .map(|r| r.prediction)
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer a single HTTP request with `status_line` and `body`.
    ///
    /// Returns the base URL and a handle yielding the request body.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }

            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            String::from_utf8(request_body).unwrap()
        });

        (format!("http://{}", addr), handle)
    }

    /// URL of a port nothing listens on
    fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn test_predict_success() {
        let (url, server) = serve_once("200 OK", r#"{"prediction": 1}"#);
        let client = ApiClient::new(url);

        let prediction = client.predict(&PredictionPayload::sample()).unwrap();
        assert_eq!(prediction, 1);

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["sex"], 1);
        assert_eq!(sent["bmi"], 30.0);
        assert_eq!(sent.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_predict_api_error() {
        let (url, server) = serve_once("422 Unprocessable Entity", r#"{"error":"Request validation failed"}"#);
        let client = ApiClient::new(url);

        match client.predict(&PredictionPayload::sample()) {
            Err(ClientError::Api { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("validation"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_predict_bad_body() {
        let (url, server) = serve_once("200 OK", r#"{"label": "high"}"#);
        let client = ApiClient::new(url);

        let err = client.predict(&PredictionPayload::sample()).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused() {
        let client = ApiClient::new(closed_url());

        let err = client.predict(&PredictionPayload::sample()).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.predict_url(), "http://localhost:8000/predict");
    }
}
