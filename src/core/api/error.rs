//! Listing API error types.

/// Errors from the listing API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("property {0} not found")]
    NotFound(i64),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request worker stopped before replying")]
    Interrupted,
}

impl ApiError {
    /// Text shown to the user in the TUI. Transport and server failures all
    /// collapse to one hint pointing at the configured API.
    pub fn user_message(&self, base_url: &str) -> String {
        match self {
            ApiError::NotFound(id) => format!("Property {} not found", id),
            ApiError::InvalidBaseUrl(_) => self.to_string(),
            ApiError::Transport(_)
            | ApiError::Status { .. }
            | ApiError::Decode(_)
            | ApiError::Interrupted => format!(
                "Failed to load properties. Make sure the listing API is running at {}",
                base_url
            ),
        }
    }

    /// True for failures where the server was never reached (refused, DNS, timeout).
    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_connect() || e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_generic_for_server_errors() {
        let e = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            e.user_message("http://localhost:8080"),
            "Failed to load properties. Make sure the listing API is running at http://localhost:8080"
        );
        assert!(e.to_string().contains("500"));
    }

    #[test]
    fn user_message_names_missing_property() {
        assert_eq!(
            ApiError::NotFound(7).user_message("http://x"),
            "Property 7 not found"
        );
    }

    #[test]
    fn decode_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: ApiError = err.into();
        assert!(matches!(e, ApiError::Decode(_)));
        assert!(!e.is_connection());
    }

    #[test]
    fn interrupted_worker_uses_generic_message() {
        let msg = ApiError::Interrupted.user_message("http://localhost:8080");
        assert!(msg.starts_with("Failed to load properties"));
        assert!(!ApiError::Interrupted.is_connection());
    }
}
