use crate::utils::error::{Result, ScraperError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(flag: &str, value: impl ToString, reason: impl Into<String>) -> ScraperError {
    ScraperError::InvalidConfigValueError {
        field: flag.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The product endpoint must be an absolute http(s) URL with a host.
pub fn validate_url(flag: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str.trim()).map_err(|e| {
        invalid(
            flag,
            url_str,
            format!("{} expects an absolute http(s) URL ({})", flag, e),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            flag,
            url_str,
            format!("{} only supports http and https, not {}", flag, url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(flag, url_str, format!("{} has no host", flag)));
    }
    Ok(())
}

/// Output and log file paths: non-blank and free of NUL bytes.
pub fn validate_path(flag: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(flag, path, format!("{} needs a file name", flag)));
    }
    if path.contains('\0') {
        return Err(invalid(
            flag,
            path,
            format!("{} cannot contain NUL bytes", flag),
        ));
    }
    Ok(())
}

pub fn validate_positive_number(flag: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            flag,
            value,
            format!("{} must be at least {}", flag, min_value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("--url", "https://fakestoreapi.com/products").is_ok());
        assert!(validate_url("--url", "http://127.0.0.1:8080/products").is_ok());
        assert!(validate_url("--url", "").is_err());
        assert!(validate_url("--url", "invalid-url").is_err());
        assert!(validate_url("--url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_errors_name_the_flag() {
        match validate_url("--url", "ftp://example.com").unwrap_err() {
            ScraperError::InvalidConfigValueError { field, reason, .. } => {
                assert_eq!(field, "--url");
                assert!(reason.starts_with("--url only supports http and https"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = validate_path("--output", " ").unwrap_err();
        assert!(err.to_string().contains("--output needs a file name"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("--output", "products.csv").is_ok());
        assert!(validate_path("--output", "   ").is_err());
        assert!(validate_path("--output", "bad\0name.csv").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("--retries", 3, 1).is_ok());
        assert!(validate_positive_number("--retries", 0, 1).is_err());
    }
}
