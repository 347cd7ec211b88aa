use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Listing API root, without trailing slash.
    pub base_url: String,
    pub page_size: u32,
    pub request_timeout: Duration,
    /// Show HH:MM next to chat messages (IDX_SHOW_TIMESTAMPS).
    pub show_timestamps: bool,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL `{0}` (expected http:// or https://)")]
    InvalidBaseUrl(String),
    #[error("{var} must be a whole number, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },
    #[error("IDX_PAGE_SIZE must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
    PageSizeOutOfRange(u32),
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match reqwest::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(trimmed.to_string())
        }
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Build configuration from a variable lookup. Empty values count as unset.
pub fn from_lookup<F>(get: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

    let base_url = match get("IDX_API_BASE_URL") {
        Some(url) => validate_base_url(&url)?,
        None => DEFAULT_BASE_URL.to_string(),
    };

    let page_size = match get("IDX_PAGE_SIZE") {
        Some(v) => parse_number("IDX_PAGE_SIZE", &v)?,
        None => crate::core::filters::DEFAULT_PAGE_SIZE,
    };
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::PageSizeOutOfRange(page_size));
    }

    let timeout_secs = match get("IDX_REQUEST_TIMEOUT_SECS") {
        Some(v) => parse_number("IDX_REQUEST_TIMEOUT_SECS", &v)?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    let show_timestamps = get("IDX_SHOW_TIMESTAMPS").is_some_and(|v| is_truthy(&v));

    Ok(Config {
        base_url,
        page_size,
        request_timeout: Duration::from_secs(timeout_secs),
        show_timestamps,
    })
}

/// Load configuration from environment (call after `dotenv()`).
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

impl Config {
    /// Apply the `--base-url` flag, which wins over the environment.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.base_url = validate_base_url(url)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let c = from_lookup(lookup(&[])).unwrap();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.page_size, 20);
        assert_eq!(c.request_timeout, Duration::from_secs(30));
        assert!(!c.show_timestamps);
    }

    #[test]
    fn reads_all_variables() {
        let c = from_lookup(lookup(&[
            ("IDX_API_BASE_URL", "https://listings.example.com/api/"),
            ("IDX_PAGE_SIZE", "50"),
            ("IDX_REQUEST_TIMEOUT_SECS", "5"),
            ("IDX_SHOW_TIMESTAMPS", "yes"),
        ]))
        .unwrap();
        assert_eq!(c.base_url, "https://listings.example.com/api");
        assert_eq!(c.page_size, 50);
        assert_eq!(c.request_timeout, Duration::from_secs(5));
        assert!(c.show_timestamps);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let c = from_lookup(lookup(&[("IDX_API_BASE_URL", ""), ("IDX_PAGE_SIZE", " ")])).unwrap();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.page_size, 20);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            from_lookup(lookup(&[("IDX_API_BASE_URL", "localhost:8080")])),
            Err(ConfigError::InvalidBaseUrl("localhost:8080".to_string()))
        );
        assert_eq!(
            from_lookup(lookup(&[("IDX_PAGE_SIZE", "0")])),
            Err(ConfigError::PageSizeOutOfRange(0))
        );
        assert_eq!(
            from_lookup(lookup(&[("IDX_PAGE_SIZE", "500")])),
            Err(ConfigError::PageSizeOutOfRange(500))
        );
        assert!(matches!(
            from_lookup(lookup(&[("IDX_REQUEST_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidNumber {
                var: "IDX_REQUEST_TIMEOUT_SECS",
                ..
            })
        ));
    }

    #[test]
    fn flag_overrides_environment() {
        let c = from_lookup(lookup(&[("IDX_API_BASE_URL", "http://a.example")]))
            .unwrap()
            .with_base_url(Some("http://127.0.0.1:9000/"))
            .unwrap();
        assert_eq!(c.base_url, "http://127.0.0.1:9000");

        let err = from_lookup(lookup(&[]))
            .unwrap()
            .with_base_url(Some("ftp://x"))
            .unwrap_err();
        assert!(err.to_string().contains("invalid API base URL"));
    }
}
