use crate::domain::model::RawRecord;
use crate::utils::error::{FetchError, Result, ScraperError};
use crate::utils::validation::validate_url;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl FetchOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts < 1 {
            return Err(ScraperError::InvalidConfigValueError {
                field: "--retries".to_string(),
                value: self.max_attempts.to_string(),
                reason: "At least one attempt is required".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ScraperError::InvalidConfigValueError {
                field: "--timeout".to_string(),
                value: format!("{:?}", self.timeout),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// 每一次請求的結果
#[derive(Debug)]
enum AttemptOutcome {
    Success(Vec<RawRecord>),
    Retry(FetchError),
    Abort(FetchError),
}

impl From<std::result::Result<Vec<RawRecord>, FetchError>> for AttemptOutcome {
    fn from(result: std::result::Result<Vec<RawRecord>, FetchError>) -> Self {
        match result {
            Ok(records) => AttemptOutcome::Success(records),
            Err(e) if e.is_recoverable() => AttemptOutcome::Retry(e),
            Err(e) => AttemptOutcome::Abort(e),
        }
    }
}

pub struct ProductFetcher {
    client: Client,
    url: String,
    options: FetchOptions,
}

impl ProductFetcher {
    pub fn new(url: &str, options: FetchOptions) -> Result<Self> {
        validate_url("--url", url)?;
        options.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ScraperError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            options,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the product list, retrying only timeouts and connection failures.
    pub async fn fetch(&self) -> std::result::Result<Vec<RawRecord>, FetchError> {
        let max_attempts = self.options.max_attempts;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            tracing::info!("🌐 Fetching data (attempt {}/{})...", attempt, max_attempts);

            match AttemptOutcome::from(self.attempt().await) {
                AttemptOutcome::Success(records) => {
                    tracing::info!("✅ Successfully fetched {} items", records.len());
                    return Ok(records);
                }
                AttemptOutcome::Abort(e) => {
                    tracing::error!("❌ {}", e);
                    return Err(e);
                }
                AttemptOutcome::Retry(e) => {
                    tracing::warn!("⚠️ {} (attempt {}/{})", e, attempt, max_attempts);

                    if attempt >= max_attempts {
                        tracing::error!("❌ All retry attempts failed");
                        return Err(FetchError::RetriesExhausted {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }

                    tracing::info!("⏳ Waiting {:?} before retry...", self.options.delay);
                    tokio::time::sleep(self.options.delay).await;
                }
            }
        }
    }

    async fn attempt(&self) -> std::result::Result<Vec<RawRecord>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        // 讀取 body 時也可能逾時
        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        parse_products(&body)
    }
}

/// Parses a response body into raw records. Only a JSON array is accepted.
pub fn parse_products(body: &str) -> std::result::Result<Vec<RawRecord>, FetchError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => Ok(items.into_iter().map(RawRecord::from_value).collect()),
        other => Err(FetchError::UnexpectedPayload {
            found: json_kind(&other).to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub async fn fetch_products(url: &str, options: FetchOptions) -> Result<Vec<RawRecord>> {
    let fetcher = ProductFetcher::new(url, options)?;
    Ok(fetcher.fetch().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Instant;

    fn quick_options(max_attempts: u32) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(5),
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_parse_products_rejects_non_arrays() {
        assert_eq!(parse_products("[]").unwrap().len(), 0);
        assert!(matches!(
            parse_products(r#"{"items": []}"#),
            Err(FetchError::UnexpectedPayload { ref found }) if found == "object"
        ));
        assert!(matches!(
            parse_products("<html>oops</html>"),
            Err(FetchError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_options_validation() {
        assert!(FetchOptions::default().validate().is_ok());
        assert!(quick_options(0).validate().is_err());

        let zero_timeout = FetchOptions {
            timeout: Duration::ZERO,
            ..FetchOptions::default()
        };
        assert!(zero_timeout.validate().is_err());
        assert!(ProductFetcher::new("not a url", FetchOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_first_attempt_success_sends_identifying_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/products")
                .header("accept", "application/json")
                .header("user-agent", USER_AGENT_VALUE);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"title": "A", "price": 1.0},
                    {"title": "B", "price": 2.0}
                ]));
        });

        let fetcher = ProductFetcher::new(&server.url("/products"), quick_options(3)).unwrap();
        let records = fetcher.fetch().await.unwrap();

        api_mock.assert_hits(1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, Some(serde_json::json!("B")));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/products");
            then.status(500);
        });

        let fetcher = ProductFetcher::new(&server.url("/products"), quick_options(3)).unwrap();
        let err = fetcher.fetch().await.unwrap_err();

        api_mock.assert_hits(1);
        assert!(matches!(err, FetchError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_timeouts_are_retried_until_exhausted() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(serde_json::json!([]));
        });

        let options = FetchOptions {
            timeout: Duration::from_millis(200),
            max_attempts: 2,
            delay: Duration::from_millis(50),
        };
        let fetcher = ProductFetcher::new(&server.url("/slow"), options).unwrap();

        let started = Instant::now();
        let err = fetcher.fetch().await.unwrap_err();

        api_mock.assert_hits(2);
        assert!(started.elapsed() >= Duration::from_millis(450));
        match err {
            FetchError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, FetchError::Timeout(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
