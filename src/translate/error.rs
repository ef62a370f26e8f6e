use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TranslateError {
    #[error("missing api key: pass --api-key or set OPENAI_API_KEY")]
    MissingApiKey,
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("empty response")]
    EmptyResponse,
}

impl TranslateError {
    /// Errors that would fail the same way for every key of a run.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TranslateError::Http {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "http 503: overloaded");
        assert!(
            TranslateError::MissingApiKey
                .to_string()
                .contains("OPENAI_API_KEY")
        );
    }

    #[test]
    fn test_is_persistent() {
        assert!(TranslateError::MissingApiKey.is_persistent());
        assert!(TranslateError::InvalidApiKey.is_persistent());
        assert!(!TranslateError::Timeout.is_persistent());
        assert!(!TranslateError::RateLimited.is_persistent());
    }
}
