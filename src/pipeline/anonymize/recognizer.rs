use serde::Serialize;

use super::types::{PiiRecognizer, PiiSpan};
use super::RecognizerError;

/// HTTP client for a Presidio-style analyzer REST service.
pub struct HttpRecognizer {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpRecognizer {
    /// Create a new client pointing at an analyzer instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default analyzer instance at localhost:5002 with a 2-minute timeout.
    pub fn default_local() -> Self {
        Self::new("http://localhost:5002", 120)
    }
}

/// Request body for the analyzer `/analyze` endpoint.
#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
    entities: &'a [String],
}

impl PiiRecognizer for HttpRecognizer {
    fn detect(
        &self,
        text: &str,
        language: &str,
        entities: &[String],
    ) -> Result<Vec<PiiSpan>, RecognizerError> {
        let url = format!("{}/analyze", self.base_url);
        let body = AnalyzeRequest {
            text,
            language,
            entities,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                RecognizerError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                RecognizerError::Timeout(self.timeout_secs)
            } else {
                RecognizerError::ResponseParsing(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RecognizerError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let spans: Vec<PiiSpan> = response
            .json()
            .map_err(|e| RecognizerError::ResponseParsing(e.to_string()))?;

        Ok(spans)
    }
}

/// Mock recognizer for testing — detects via configured regex patterns.
///
/// Span offsets are converted to character positions, matching what the
/// real analyzer service returns.
pub struct MockRecognizer {
    patterns: Vec<(String, regex::Regex)>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn with_pattern(mut self, entity_type: &str, pattern: &str) -> Self {
        self.patterns
            .push((entity_type.to_string(), regex::Regex::new(pattern).unwrap()));
        self
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PiiRecognizer for MockRecognizer {
    fn detect(
        &self,
        text: &str,
        _language: &str,
        entities: &[String],
    ) -> Result<Vec<PiiSpan>, RecognizerError> {
        let mut spans = Vec::new();
        for (entity_type, regex) in &self.patterns {
            if !entities.iter().any(|e| e == entity_type) {
                continue;
            }
            for m in regex.find_iter(text) {
                spans.push(PiiSpan {
                    entity_type: entity_type.clone(),
                    start: text[..m.start()].chars().count(),
                    end: text[..m.end()].chars().count(),
                    score: 0.85,
                });
            }
        }
        Ok(spans)
    }
}

/// Mock recognizer that always fails, for degradation tests.
pub struct FailingRecognizer;

impl PiiRecognizer for FailingRecognizer {
    fn detect(
        &self,
        _text: &str,
        _language: &str,
        _entities: &[String],
    ) -> Result<Vec<PiiSpan>, RecognizerError> {
        Err(RecognizerError::Connection("http://localhost:5002".into()))
    }
}
