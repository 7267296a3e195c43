use std::io::ErrorKind;
use thiserror::Error;

/// 單次抓取失敗的原因。
///
/// `Timeout` 與 `Connect` 屬於暫時性錯誤，會在重試次數內再試一次；
/// 其餘錯誤會立即中止抓取。
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {status} for url {url}")]
    HttpStatus { status: u16, url: String },

    #[error("invalid JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unexpected payload: expected a JSON array, got {found}")]
    UnexpectedPayload { found: String },

    #[error("unexpected error: {0}")]
    Unexpected(String),

    #[error("all {attempts} attempts failed, last error: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<FetchError>,
    },
}

impl FetchError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() || is_dropped_connection(&err) {
            // 連線被對方關閉或重設，尚未收到回應
            FetchError::Connect(err.to_string())
        } else {
            FetchError::Unexpected(err.to_string())
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Timeout(_) | FetchError::Connect(_))
    }
}

fn is_dropped_connection(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Permission denied: cannot write to {path}")]
    PermissionDenied { path: String },

    #[error("No products to save")]
    EmptyDataset,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Output,
    Configuration,
}

impl ScraperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScraperError::Fetch(FetchError::InvalidJson(_))
            | ScraperError::Fetch(FetchError::UnexpectedPayload { .. })
            | ScraperError::EmptyDataset => ErrorCategory::Data,
            ScraperError::Fetch(_) => ErrorCategory::Network,
            ScraperError::CsvError(_)
            | ScraperError::IoError(_)
            | ScraperError::PermissionDenied { .. } => ErrorCategory::Output,
            ScraperError::ConfigError { .. }
            | ScraperError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScraperError::Fetch(FetchError::RetriesExhausted { .. }) => {
                "Check your network connection, or raise --retries / --timeout"
            }
            ScraperError::Fetch(FetchError::HttpStatus { .. }) => {
                "Verify the --url points at a reachable product endpoint"
            }
            ScraperError::Fetch(FetchError::InvalidJson(_))
            | ScraperError::Fetch(FetchError::UnexpectedPayload { .. }) => {
                "The endpoint must return a JSON array of products"
            }
            ScraperError::Fetch(_) => "Retry later; the failure did not look transient",
            ScraperError::EmptyDataset => "The endpoint returned an empty list; nothing was written",
            ScraperError::PermissionDenied { .. } => {
                "Choose an --output location you have write access to"
            }
            ScraperError::CsvError(_) | ScraperError::IoError(_) => {
                "Check free disk space and the --output path"
            }
            ScraperError::ConfigError { .. } | ScraperError::InvalidConfigValueError { .. } => {
                "Fix the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScraperError::Fetch(FetchError::RetriesExhausted { attempts, .. }) => {
                format!("Could not reach the API after {} attempts", attempts)
            }
            ScraperError::Fetch(FetchError::HttpStatus { status, .. }) => {
                format!("The API answered with HTTP {}", status)
            }
            ScraperError::PermissionDenied { path } => {
                format!("Permission denied: cannot write to {}", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_timeouts_and_connect_errors_are_recoverable() {
        assert!(FetchError::Timeout("slow".into()).is_recoverable());
        assert!(FetchError::Connect("refused".into()).is_recoverable());
        assert!(!FetchError::HttpStatus {
            status: 500,
            url: "http://localhost".into()
        }
        .is_recoverable());
        assert!(!FetchError::Unexpected("boom".into()).is_recoverable());
        assert!(!FetchError::UnexpectedPayload {
            found: "object".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let exhausted = ScraperError::Fetch(FetchError::RetriesExhausted {
            attempts: 3,
            last: Box::new(FetchError::Connect("refused".into())),
        });
        assert_eq!(exhausted.category(), ErrorCategory::Network);
        assert_eq!(
            exhausted.user_friendly_message(),
            "Could not reach the API after 3 attempts"
        );

        assert_eq!(ScraperError::EmptyDataset.category(), ErrorCategory::Data);
        assert_eq!(
            ScraperError::PermissionDenied {
                path: "/root/x.csv".into()
            }
            .category(),
            ErrorCategory::Output
        );
    }
}
