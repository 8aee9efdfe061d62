//! Gemini HTTP client: structured prompt in, raw response body out, with a
//! retry/backoff policy for rate-limit and overload responses.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::GeminiConfig;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("cannot reach inference service at {0}")]
    Connection(String),

    #[error("inference request timed out after {0}s")]
    Timeout(u64),

    #[error("inference service returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("inference service still unavailable after {attempts} attempts (status {status})")]
    RetriesExhausted { status: u16, attempts: u32 },

    #[error("transport error: {0}")]
    Transport(String),
}

impl InferenceError {
    /// Rate-limit (429) and overload (503) responses are worth retrying;
    /// everything else fails fast.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { status: 429 | 503, .. })
    }
}

/// One round trip to the inference service. The orchestrator only sees this
/// trait, so tests substitute scripted clients.
pub trait InferenceClient: Send + Sync {
    /// Send one prompt and return the raw response body text.
    fn call(&self, prompt: &str) -> Result<String, InferenceError>;
}

/// Exponential backoff around a fallible transport call: retryable errors
/// wait `base_delay * 2^(attempt-1)` between attempts, everything else
/// propagates immediately.
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn execute<T>(
        &self,
        mut op: impl FnMut() -> Result<T, InferenceError>,
    ) -> Result<T, InferenceError> {
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.base_delay * 2u32.pow(attempt - 1);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "inference service busy, backing off before retry"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) if e.is_retryable() => {
                    let status = match &e {
                        InferenceError::Http { status, .. } => *status,
                        _ => 0,
                    };
                    return Err(InferenceError::RetriesExhausted {
                        status,
                        attempts: self.max_attempts,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Blocking HTTP client against the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    fn send_once(&self, prompt: &str) -> Result<String, InferenceError> {
        // Keep the key out of logs: never log this URL.
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_url.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                InferenceError::Connection(self.config.api_url.clone())
            } else if e.is_timeout() {
                InferenceError::Timeout(self.config.timeout_secs)
            } else {
                InferenceError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InferenceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .map_err(|e| InferenceError::Transport(e.to_string()))
    }
}

impl InferenceClient for GeminiClient {
    fn call(&self, prompt: &str) -> Result<String, InferenceError> {
        self.retry.execute(|| self.send_once(prompt))
    }
}

/// Mock client returning a fixed response, for tests.
pub struct MockInferenceClient {
    response: String,
}

impl MockInferenceClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl InferenceClient for MockInferenceClient {
    fn call(&self, _prompt: &str) -> Result<String, InferenceError> {
        Ok(self.response.clone())
    }
}

/// Mock client that always fails, for fallback-path tests.
pub struct FailingInferenceClient;

impl InferenceClient for FailingInferenceClient {
    fn call(&self, _prompt: &str) -> Result<String, InferenceError> {
        Err(InferenceError::Http {
            status: 500,
            body: "internal error".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::ZERO,
        }
    }

    fn rate_limited() -> InferenceError {
        InferenceError::Http {
            status: 429,
            body: "rate limit".into(),
        }
    }

    #[test]
    fn success_needs_a_single_attempt() {
        let calls = AtomicU32::new(0);
        let result = instant_policy().execute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, InferenceError>("ok")
        });
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rate_limit_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = instant_policy().execute(|| {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(rate_limited())
            } else {
                Ok("recovered")
            }
        });
        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn overload_is_retryable_too() {
        let error = InferenceError::Http {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(error.is_retryable());
    }

    #[test]
    fn non_retryable_status_fails_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = instant_policy().execute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(InferenceError::Http {
                status: 400,
                body: "bad request".into(),
            })
        });
        assert!(matches!(result, Err(InferenceError::Http { status: 400, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn transport_errors_do_not_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = instant_policy().execute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(InferenceError::Connection("http://localhost".into()))
        });
        assert!(matches!(result, Err(InferenceError::Connection(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exhausted_retries_report_status_and_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = instant_policy().execute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(rate_limited())
        });
        assert!(matches!(
            result,
            Err(InferenceError::RetriesExhausted {
                status: 429,
                attempts: 3
            })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn backoff_delays_double_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.base_delay * 2u32.pow(0), Duration::from_millis(1000));
        assert_eq!(policy.base_delay * 2u32.pow(1), Duration::from_millis(2000));
        assert_eq!(policy.base_delay * 2u32.pow(2), Duration::from_millis(4000));
    }

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockInferenceClient::new("raw body");
        assert_eq!(client.call("prompt").unwrap(), "raw body");
    }

    #[test]
    fn generation_config_serializes_wire_names() {
        let json = serde_json::to_string(&GenerationConfig::default()).unwrap();
        assert!(json.contains("\"topK\":40"));
        assert!(json.contains("\"topP\":0.95"));
        assert!(json.contains("\"maxOutputTokens\":8192"));
    }

    #[test]
    fn request_body_matches_generate_content_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig::default(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"contents\":[{\"parts\":[{\"text\":\"hello\"}]}]"));
        assert!(json.contains("\"generationConfig\""));
    }
}
